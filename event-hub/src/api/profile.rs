//! Profile Extractor
//!
//! The UI shell forwards the authenticated profile in two headers:
//!
//! | Header | Value |
//! |--------|-------|
//! | `X-Profile-Id` | profile id |
//! | `X-Profile-Role` | role label, raw UTF-8 or percent-encoded (`Qu%E1%BA%A3n%20l%C3%BD`) |
//!
//! No role header means "not logged in".

use axum::extract::FromRequestParts;
use http::HeaderMap;
use http::request::Parts;
use shared::AppError;
use shared::models::{Profile, Role};

use crate::security_log;

pub const PROFILE_ID_HEADER: &str = "x-profile-id";
pub const PROFILE_ROLE_HEADER: &str = "x-profile-role";

/// Profile required; rejects with 401 when absent
#[derive(Debug, Clone)]
pub struct CurrentProfile(pub Profile);

/// Profile if one was sent
#[derive(Debug, Clone)]
pub struct MaybeProfile(pub Option<Profile>);

impl MaybeProfile {
    pub fn profile(&self) -> Option<&Profile> {
        self.0.as_ref()
    }
}

fn header_text(headers: &HeaderMap, name: &str) -> Result<Option<String>, AppError> {
    let Some(value) = headers.get(name) else {
        return Ok(None);
    };
    let raw = std::str::from_utf8(value.as_bytes())
        .map_err(|_| AppError::invalid_request(format!("{} is not valid UTF-8", name)))?;
    let decoded = urlencoding::decode(raw)
        .map_err(|_| AppError::invalid_request(format!("{} is not valid UTF-8", name)))?;
    let text = decoded.trim();
    Ok((!text.is_empty()).then(|| text.to_string()))
}

/// Profile carried by the request headers
pub(crate) fn profile_from_headers(headers: &HeaderMap) -> Result<Option<Profile>, AppError> {
    let Some(role) = header_text(headers, PROFILE_ROLE_HEADER)? else {
        return Ok(None);
    };
    let role: Role = role.parse()?;
    let id = header_text(headers, PROFILE_ID_HEADER)?
        .ok_or_else(|| AppError::validation("X-Profile-Id is required with X-Profile-Role"))?;
    Ok(Some(Profile::new(id, role)))
}

impl<S: Send + Sync> FromRequestParts<S> for MaybeProfile {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        profile_from_headers(&parts.headers).map(MaybeProfile)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentProfile {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match profile_from_headers(&parts.headers)? {
            Some(profile) => Ok(CurrentProfile(profile)),
            None => {
                security_log!("WARN", "profile_missing", uri = format!("{:?}", parts.uri));
                Err(AppError::not_authenticated())
            }
        }
    }
}
