//! Guest Notification API Handlers

use axum::extract::{Path, State};
use shared::error::AppResult;
use shared::{AppError, ApiResponse, ErrorCode};

use crate::core::ServerState;
use crate::notifications::{FeedView, GuestSessions};

/// Run a session operation on the blocking pool (it writes the local store)
async fn with_sessions<R, F>(state: &ServerState, f: F) -> AppResult<R>
where
    R: Send + 'static,
    F: FnOnce(&GuestSessions) -> R + Send + 'static,
{
    let sessions = state.sessions.clone();
    tokio::task::spawn_blocking(move || f(sessions.as_ref()))
        .await
        .map_err(|e| {
            tracing::error!("spawn_blocking join error: {e}");
            AppError::internal(format!("Task join failed: {}", e))
        })
}

/// Fetch the feed and store it as the guest's current snapshot
async fn load_feed(state: &ServerState, guest_id: &str) -> AppResult<FeedView> {
    let feed = state
        .feed
        .fetch(Some(guest_id))
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::GuestIdRequired))?;
    let guest_id = guest_id.to_string();
    with_sessions(state, move |sessions| sessions.replace_feed(&guest_id, feed)).await
}

/// Fetch first if this device holds no snapshot for the guest
async fn ensure_feed(state: &ServerState, guest_id: &str) -> AppResult<()> {
    if !state.sessions.has_feed(guest_id) {
        load_feed(state, guest_id).await?;
    }
    Ok(())
}

fn guest_id(raw: &str) -> AppResult<&str> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(AppError::new(ErrorCode::GuestIdRequired));
    }
    Ok(id)
}

/// GET /api/guests/{guest_id}/notifications
pub async fn list(
    State(state): State<ServerState>,
    Path(raw_guest_id): Path<String>,
) -> AppResult<ApiResponse<FeedView>> {
    let guest_id = guest_id(&raw_guest_id)?;
    let view = load_feed(&state, guest_id).await?;
    Ok(ApiResponse::success(view))
}

/// POST /api/guests/{guest_id}/notifications/{id}/read
///
/// Only guests the backend returned a feed for get a session (and a store
/// entry); an unknown device state triggers a fetch first.
pub async fn mark_one(
    State(state): State<ServerState>,
    Path((raw_guest_id, id)): Path<(String, String)>,
) -> AppResult<ApiResponse<FeedView>> {
    let guest_id = guest_id(&raw_guest_id)?.to_string();
    ensure_feed(&state, &guest_id).await?;
    let view = with_sessions(&state, move |sessions| sessions.mark_one_as_read(&guest_id, &id)).await?;
    Ok(ApiResponse::success(view))
}

/// POST /api/guests/{guest_id}/notifications/read-all
///
/// Acknowledges the feed last shown to the guest; fetches it first if this
/// device never did.
pub async fn mark_all(
    State(state): State<ServerState>,
    Path(raw_guest_id): Path<String>,
) -> AppResult<ApiResponse<FeedView>> {
    let guest_id = guest_id(&raw_guest_id)?.to_string();
    ensure_feed(&state, &guest_id).await?;
    let view = with_sessions(&state, move |sessions| sessions.mark_all_as_read(&guest_id)).await?;
    Ok(ApiResponse::success(view))
}
