/// 服务器配置 - 预订后台的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_URL | postgres://localhost/bookings | Postgres 连接串 |
/// | PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | DB_MAX_CONNECTIONS | 5 | 连接池大小 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (无) | 日志文件目录，不设置则仅输出到终端 |
/// | SMTP_HOST | (无) | SMTP 服务器，不设置则禁用邮件 |
/// | SMTP_PORT | 587 | SMTP 端口 |
/// | EMAIL_USER | (无) | SMTP 用户名 |
/// | EMAIL_PASS | (无) | SMTP 密码 |
/// | EMAIL_FROM | EMAIL_USER | 发件人地址 |
///
/// # 示例
///
/// ```ignore
/// DATABASE_URL=postgres://app@db/bookings PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres 连接串
    pub database_url: String,
    /// HTTP API 服务端口
    pub port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 连接池最大连接数
    pub db_max_connections: u32,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 日志级别
    pub log_level: String,
    /// 日志文件目录 (可选)
    pub log_dir: Option<String>,

    // === 邮件配置 ===
    /// SMTP 服务器地址 (未设置时禁用邮件发送)
    pub smtp_host: Option<String>,
    /// SMTP 端口
    pub smtp_port: u16,
    /// SMTP 用户名
    pub email_user: Option<String>,
    /// SMTP 密码
    pub email_pass: Option<String>,
    /// 发件人地址 (默认与 EMAIL_USER 相同)
    pub email_from: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let email_user = std::env::var("EMAIL_USER").ok();
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/bookings".into()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),

            smtp_host: std::env::var("SMTP_HOST").ok(),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            email_from: std::env::var("EMAIL_FROM").ok().or_else(|| email_user.clone()),
            email_user,
            email_pass: std::env::var("EMAIL_PASS").ok(),
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
