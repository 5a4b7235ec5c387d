use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use sqlx::PgPool;

use crate::core::Config;
use crate::db::DbService;
use crate::services::Mailer;

/// 数据库可选列探测标志
///
/// 线上数据库可能尚未执行新增可选列的迁移。第一次因缺列失败后
/// 记录在这里，后续请求直接使用缩减列集，避免重复探测失败。
///
/// 进程级缓存，整个服务器共享一份。
#[derive(Debug)]
pub struct SchemaFlags {
    /// bookings.package_only_id 列是否存在
    package_only_id: AtomicBool,
    /// diving_bookings.diving_type 列是否存在
    diving_type: AtomicBool,
}

impl SchemaFlags {
    /// 创建标志，初始假定所有可选列都存在
    pub fn new() -> Self {
        Self {
            package_only_id: AtomicBool::new(true),
            diving_type: AtomicBool::new(true),
        }
    }

    /// bookings.package_only_id 是否可用
    pub fn supports_package_only_id(&self) -> bool {
        self.package_only_id.load(Ordering::Relaxed)
    }

    /// 标记 bookings.package_only_id 缺失
    pub fn mark_package_only_id_missing(&self) {
        self.package_only_id.store(false, Ordering::Relaxed);
    }

    /// diving_bookings.diving_type 是否可用
    pub fn supports_diving_type(&self) -> bool {
        self.diving_type.load(Ordering::Relaxed)
    }

    /// 标记 diving_bookings.diving_type 缺失
    pub fn mark_diving_type_missing(&self) {
        self.diving_type.store(false, Ordering::Relaxed);
    }
}

impl Default for SchemaFlags {
    fn default() -> Self {
        Self::new()
    }
}

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | PgPool | Postgres 连接池 |
/// | schema | Arc<SchemaFlags> | 可选列探测标志 |
/// | mailer | Option<Arc<Mailer>> | SMTP 邮件服务 (未配置时为 None) |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// Postgres 连接池
    pub db: PgPool,
    /// 可选列探测标志
    pub schema: Arc<SchemaFlags>,
    /// SMTP 邮件服务
    pub mailer: Option<Arc<Mailer>>,
    /// 启动时间 (健康检查 uptime)
    pub started_at: Instant,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 数据库连接池 + 迁移
    /// 2. 邮件服务 (SMTP 未配置时跳过)
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        let db_service = DbService::new(config)
            .await
            .expect("Failed to initialize database");

        let mailer = match Mailer::from_config(config) {
            Some(m) => {
                tracing::info!(host = %m.host(), "SMTP mailer configured");
                Some(Arc::new(m))
            }
            None => {
                tracing::warn!("SMTP not configured, transactional email disabled");
                None
            }
        };

        Self {
            config: config.clone(),
            db: db_service.pool,
            schema: Arc::new(SchemaFlags::new()),
            mailer,
            started_at: Instant::now(),
        }
    }

    /// 获取数据库连接池
    pub fn get_db(&self) -> PgPool {
        self.db.clone()
    }

    /// 运行时间 (秒)
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_flags_default_to_present() {
        let flags = SchemaFlags::new();
        assert!(flags.supports_package_only_id());
        assert!(flags.supports_diving_type());
    }

    #[test]
    fn test_schema_flags_stay_cleared() {
        let flags = SchemaFlags::new();
        flags.mark_package_only_id_missing();
        assert!(!flags.supports_package_only_id());
        // diving_type flag is independent
        assert!(flags.supports_diving_type());

        flags.mark_diving_type_missing();
        assert!(!flags.supports_diving_type());
    }
}
