//! 服务模块
//!
//! - [`Mailer`] - SMTP 事务邮件 (带有界退避重试)

pub mod mailer;

pub use mailer::Mailer;
