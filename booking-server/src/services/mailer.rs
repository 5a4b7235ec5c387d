//! SMTP mailer
//!
//! Transactional email over an SMTP relay. Sends are best-effort from the
//! caller's point of view: booking creation never fails because the relay is
//! down. Each send gets a bounded exponential-backoff retry (3 attempts,
//! doubling delay) since relay hiccups are the one transient failure this
//! server retries at all.

use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::core::Config;
use crate::utils::{AppError, AppResult, ErrorCode};

const MAX_ATTEMPTS: u32 = 3;
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

/// SMTP mailer built from env configuration
#[derive(Clone)]
pub struct Mailer {
    smtp_host: String,
    smtp_port: u16,
    username: String,
    password: String,
    from_email: String,
}

impl fmt::Debug for Mailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mailer")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("from_email", &self.from_email)
            .finish_non_exhaustive()
    }
}

impl Mailer {
    /// Build a mailer from config; returns `None` when SMTP is not configured
    pub fn from_config(config: &Config) -> Option<Self> {
        let smtp_host = config.smtp_host.clone()?;
        let username = config.email_user.clone()?;
        let password = config.email_pass.clone()?;
        let from_email = config.email_from.clone().unwrap_or_else(|| username.clone());

        Some(Self {
            smtp_host,
            smtp_port: config.smtp_port,
            username,
            password,
            from_email,
        })
    }

    /// SMTP relay host (for startup logging)
    pub fn host(&self) -> &str {
        &self.smtp_host
    }

    /// Build SMTP transport for sending emails.
    ///
    /// Creates a new transport for each email to avoid connection pooling issues.
    fn build_transport(&self) -> AppResult<SmtpTransport> {
        let transport = SmtpTransport::relay(&self.smtp_host)
            .map_err(|e| {
                AppError::with_message(ErrorCode::EmailSendFailed, "SMTP relay error")
                    .with_detail(e.to_string())
            })?
            .port(self.smtp_port)
            .credentials(Credentials::new(self.username.clone(), self.password.clone()))
            .build();
        Ok(transport)
    }

    /// Send a booking confirmation to the customer
    pub async fn send_booking_confirmation(
        &self,
        to: &str,
        booking_id: &str,
        first_name: &str,
        check_in: Option<NaiveDate>,
    ) -> AppResult<()> {
        let when = check_in
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "your scheduled date".to_string());

        let body = format!(
            "Hi {first_name},\n\n\
             Your booking {booking_id} has been received and is now on record.\n\
             We are expecting you on {when}.\n\n\
             Please keep your booking id for any follow-up.\n\n\
             Salamat, and see you soon!\n"
        );

        let email = Message::builder()
            .from(self.from_email.parse().map_err(|e| {
                AppError::with_message(ErrorCode::EmailSendFailed, "Invalid from address")
                    .with_detail(format!("{e}"))
            })?)
            .to(to.parse().map_err(|e| {
                AppError::with_message(ErrorCode::EmailSendFailed, "Invalid to address")
                    .with_detail(format!("{e}"))
            })?)
            .subject(format!("Booking {booking_id} received"))
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| {
                AppError::with_message(ErrorCode::EmailSendFailed, "Failed to build email")
                    .with_detail(e.to_string())
            })?;

        self.send_with_retry(email, "booking_confirmation").await
    }

    /// Send with bounded exponential backoff
    async fn send_with_retry(&self, email: Message, kind: &str) -> AppResult<()> {
        let mut delay = INITIAL_BACKOFF;
        let mut last_error = String::new();

        for attempt in 1..=MAX_ATTEMPTS {
            let mailer = self.build_transport()?;
            let message = email.clone();

            let result = tokio::task::spawn_blocking(move || mailer.send(&message))
                .await
                .map_err(|e| AppError::internal(format!("Email task failed: {e}")))?;

            match result {
                Ok(_) => {
                    if attempt > 1 {
                        tracing::info!(kind, attempt, "Email sent after retry");
                    }
                    return Ok(());
                }
                Err(e) => {
                    last_error = e.to_string();
                    tracing::warn!(kind, attempt, error = %last_error, "Email send failed");
                    if attempt < MAX_ATTEMPTS {
                        tokio::time::sleep(delay).await;
                        delay *= 2;
                    }
                }
            }
        }

        Err(AppError::new(ErrorCode::EmailSendFailed).with_detail(last_error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_smtp() -> Config {
        Config {
            database_url: "postgres://localhost/bookings".into(),
            port: 3000,
            environment: "development".into(),
            db_max_connections: 5,
            request_timeout_ms: 30000,
            log_level: "info".into(),
            log_dir: None,
            smtp_host: Some("smtp.example.com".into()),
            smtp_port: 587,
            email_user: Some("bookings@example.com".into()),
            email_pass: Some("secret".into()),
            email_from: None,
        }
    }

    #[test]
    fn test_from_config_requires_full_smtp_config() {
        assert!(Mailer::from_config(&config_with_smtp()).is_some());

        let mut config = config_with_smtp();
        config.smtp_host = None;
        assert!(Mailer::from_config(&config).is_none());

        let mut config = config_with_smtp();
        config.email_pass = None;
        assert!(Mailer::from_config(&config).is_none());
    }

    #[test]
    fn test_from_defaults_to_user() {
        let mailer = Mailer::from_config(&config_with_smtp()).unwrap();
        assert_eq!(mailer.from_email, "bookings@example.com");

        let mut config = config_with_smtp();
        config.email_from = Some("Tours <noreply@example.com>".into());
        let mailer = Mailer::from_config(&config).unwrap();
        assert_eq!(mailer.from_email, "Tours <noreply@example.com>");
    }
}
