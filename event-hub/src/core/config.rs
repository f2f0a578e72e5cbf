use std::path::PathBuf;

use guest_client::ClientConfig;

use crate::access::UnmatchedRoutePolicy;
use crate::notifications::DEFAULT_SESSION_CAPACITY;

/// Hub 配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (`store/`, `logs/`) |
/// | HTTP_PORT | 4100 | HTTP 端口 (仅监听 127.0.0.1) |
/// | BACKEND_URL | http://localhost:54321 | 后端地址 |
/// | BACKEND_API_KEY | (空) | 后端 anon key |
/// | BACKEND_TOKEN | (无) | 用户访问令牌 |
/// | REQUEST_TIMEOUT_MS | 15000 | 后端请求超时(毫秒) |
/// | NAV_TABLE_PATH | (无) | 替换内置菜单表的 JSON 文件 |
/// | UNMATCHED_ROUTE_POLICY | allow | 未匹配路由: allow / deny (无效值按 deny) |
/// | GUEST_SESSION_CAPACITY | 256 | 内存中缓存的客人会话上限 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_TO_FILE | false | 同时写入 `WORK_DIR/logs` |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// BACKEND_URL=https://project.example.co HTTP_PORT=4200 cargo run -p event-hub
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    pub http_port: u16,
    pub backend_url: String,
    pub backend_api_key: String,
    pub backend_token: Option<String>,
    /// 后端请求超时 (毫秒)
    pub request_timeout_ms: u64,
    pub nav_table_path: Option<String>,
    pub unmatched_route_policy: UnmatchedRoutePolicy,
    pub guest_session_capacity: usize,
    pub log_level: String,
    pub log_to_file: bool,
    /// 运行环境: development | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置，未设置的使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4100),
            backend_url: std::env::var("BACKEND_URL")
                .unwrap_or_else(|_| "http://localhost:54321".into()),
            backend_api_key: std::env::var("BACKEND_API_KEY").unwrap_or_default(),
            backend_token: std::env::var("BACKEND_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(15000),
            nav_table_path: std::env::var("NAV_TABLE_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty()),
            unmatched_route_policy: parse_route_policy(
                std::env::var("UNMATCHED_ROUTE_POLICY").ok().as_deref(),
            ),
            guest_session_capacity: std::env::var("GUEST_SESSION_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(DEFAULT_SESSION_CAPACITY),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_to_file: std::env::var("LOG_TO_FILE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 覆盖工作目录和端口，常用于测试
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 本地键值存储目录
    pub fn store_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("store")
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 后端客户端配置
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(&self.backend_url)
            .with_api_key(&self.backend_api_key)
            .with_timeout_ms(self.request_timeout_ms);
        match &self.backend_token {
            Some(token) => config.with_token(token),
            None => config,
        }
    }
}

/// 未设置时 allow；无法识别的值按 deny 处理
fn parse_route_policy(raw: Option<&str>) -> UnmatchedRoutePolicy {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => UnmatchedRoutePolicy::default(),
        Some(value) => value.parse().unwrap_or_else(|e| {
            tracing::warn!(value = %value, error = %e, "Invalid UNMATCHED_ROUTE_POLICY, denying unmatched routes");
            UnmatchedRoutePolicy::Deny
        }),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_overrides() {
        let config = Config::with_overrides("/tmp/hub", 4999);
        assert_eq!(config.work_dir, "/tmp/hub");
        assert_eq!(config.http_port, 4999);
        assert_eq!(config.store_dir(), PathBuf::from("/tmp/hub/store"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/hub/logs"));
    }

    #[test]
    fn test_route_policy_fails_closed_on_typo() {
        assert_eq!(parse_route_policy(None), UnmatchedRoutePolicy::Allow);
        assert_eq!(parse_route_policy(Some("  ")), UnmatchedRoutePolicy::Allow);
        assert_eq!(parse_route_policy(Some("allow")), UnmatchedRoutePolicy::Allow);
        assert_eq!(parse_route_policy(Some("DENY")), UnmatchedRoutePolicy::Deny);
        assert_eq!(parse_route_policy(Some("dney")), UnmatchedRoutePolicy::Deny);
    }

    #[test]
    fn test_client_config() {
        let mut config = Config::with_overrides("/tmp/hub", 4999);
        config.backend_url = "http://backend.test".into();
        config.backend_token = Some("jwt".into());
        config.request_timeout_ms = 500;

        let client = config.client_config();
        assert_eq!(client.base_url, "http://backend.test");
        assert_eq!(client.token.as_deref(), Some("jwt"));
        assert_eq!(client.timeout_ms, 500);
    }
}
