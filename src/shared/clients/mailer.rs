use async_trait::async_trait;
use thiserror::Error;

/// 발송할 메일
/// Outgoing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingMail {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum MailError {
    #[error("mail transport failed: {0}")]
    Transport(String),
}

/// 메일 발송 인터페이스
/// Mail transport used by the auth and support flows
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError>;
}

/// 메일을 tracing 로그로만 남기는 기본 구현
/// Default transport: records outgoing mail in the log
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        tracing::info!(
            to = %mail.to,
            subject = %mail.subject,
            body_len = mail.body.len(),
            "outgoing mail"
        );
        tracing::debug!(to = %mail.to, body = %mail.body, "outgoing mail body");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_mailer_always_succeeds() {
        let mailer = LogMailer;
        let mail = OutgoingMail::new("a@b.co", "Hi", "body");
        assert!(mailer.send(mail).await.is_ok());
    }
}
