//! Booking Server - 旅行社预订管理后台
//!
//! # 架构概述
//!
//! 本模块是预订后台的主入口，提供以下核心功能：
//!
//! - **预订聚合** (`api/bookings`): 主行 + 子记录 + 支付的组合读写
//! - **数据库** (`db`): Postgres 连接池 (sqlx) 与迁移
//! - **目录管理** (`api/*`): 车辆、酒店、潜水、面包车目的地、行程、套餐、二维码
//! - **事务邮件** (`services/mailer`): SMTP 确认邮件，带退避重试
//!
//! # 模块结构
//!
//! ```text
//! booking-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (models + repository)
//! ├── services/      # 邮件服务
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
///
/// 必须在读取 [`Config`] 之前调用。
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // .env 不存在不算错误
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ____              __   _
  / __ )____  ____  / /__(_)___  ____ _
 / __  / __ \/ __ \/ //_/ / __ \/ __ `/
/ /_/ / /_/ / /_/ / ,< / / / / / /_/ /
\____/\____/\____/_/|_/_/_/ /_/\__, /
   _____                      /____/
  / ___/___  ______   _____  _____
  \__ \/ _ \/ ___/ | / / _ \/ ___/
 ___/ /  __/ /   | |/ /  __/ /
/____/\___/_/    |___/\___/_/
    "#
    );
}
