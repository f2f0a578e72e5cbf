//! Event Hub - 活动管理端本地服务
//!
//! # 架构概述
//!
//! UI 外壳通过本地 HTTP 调用 Hub，Hub 负责两块有状态逻辑：
//!
//! - **访问控制** (`access`): 角色 → 菜单、路由校验、默认落地页、后端角色权限覆盖
//! - **通知已读** (`notifications`): 客人通知列表 (最多 50 条) 与本设备上的已读集合
//!
//! # 模块结构
//!
//! ```text
//! event-hub/src/
//! ├── core/           # 配置、状态、服务器
//! ├── access/         # 菜单表、解析、权限合并、守卫
//! ├── notifications/  # 通知列表、已读跟踪
//! ├── storage/        # 本地键值存储
//! ├── api/            # HTTP 路由和处理器
//! └── utils/          # 日志
//! ```

pub mod access;
pub mod api;
pub mod core;
pub mod notifications;
pub mod storage;
pub mod utils;

pub use access::{AccessService, NavTable, UnmatchedRoutePolicy};
pub use core::{Config, Server, ServerState};
pub use notifications::{GuestSessions, NotificationFeed, ReadTracker};
pub use storage::{FileStore, LocalStore, MemoryStore};

pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 加载 `.env`、读取配置并初始化日志
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();

    let log_dir = config.log_to_file.then(|| config.log_dir());
    let log_dir = log_dir.as_deref().and_then(|p| p.to_str());
    init_logger_with_file(&config.log_level, config.is_production(), log_dir)?;

    tracing::info!(
        http_port = config.http_port,
        backend_url = %config.backend_url,
        unmatched_route_policy = ?config.unmatched_route_policy,
        "Configuration loaded"
    );

    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    ______                 __     __  __      __
   / ____/   _____  ____  / /_   / / / /_  __/ /_
  / __/ | | / / _ \/ __ \/ __/  / /_/ / / / / __ \
 / /___ | |/ /  __/ / / / /_   / __  / /_/ / /_/ /
/_____/ |___/\___/_/ /_/\__/  /_/ /_/\__,_/_.___/
    "#
    );
}
