use thiserror::Error;

/// 服务器启动/运行期错误
///
/// 请求处理链路使用 [`shared::error::AppError`]，这里只覆盖
/// 启动阶段 (绑定端口、数据库初始化) 的失败。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("内部服务器错误: {0}")]
    Internal(String),
}

/// 服务器层 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
