//! Outbound email through the Resend HTTP API.
//!
//! Delivery is best effort. Both messages for a registration are issued
//! concurrently and the handler waits for both to settle before responding,
//! so the process is never torn down with a send still in flight. A failed
//! send is logged and nothing else; the registration already happened.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

use tracing::error;

use crate::{config::Config, registration::Registration, templates};

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Email request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Provider rejected message: {status} {body}")]
    Provider { status: StatusCode, body: String },
}

/// One message, already fully rendered. Field names follow the Resend
/// `POST /emails` payload.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), EmailError>;
}

pub struct ResendMailer {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ResendMailer {
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, EmailError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), EmailError> {
        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EmailError::Provider {
                status: response.status(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        Ok(())
    }
}

/// Sends the attendee confirmation and the admin alert for a freshly stored
/// registration. Each send is independent; one failing never blocks the other.
pub async fn dispatch_registration_emails(
    mailer: &dyn Mailer,
    config: &Config,
    registration: &Registration,
    total: u64,
) {
    let confirmation = templates::confirmation_email(config, registration);
    let alert = templates::admin_alert_email(config, registration, total);

    let (confirmation_sent, alert_sent) =
        tokio::join!(mailer.send(&confirmation), mailer.send(&alert));

    log_failure("attendee confirmation", confirmation_sent);
    log_failure("admin alert", alert_sent);
}

// A registration is successful once it is persisted, whatever the provider
// said. Failures only ever reach the logs.
fn log_failure(context: &str, result: Result<(), EmailError>) {
    if let Err(err) = result {
        error!("Email error ({context}): {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn outbound() -> OutboundEmail {
        OutboundEmail {
            from: "LICENCIA P <noreply@bukoflow.com>".to_string(),
            to: "ana@example.com".to_string(),
            reply_to: None,
            subject: "Tu acceso".to_string(),
            html: "<p>hola</p>".to_string(),
            text: "hola".to_string(),
        }
    }

    #[tokio::test]
    async fn posts_to_emails_endpoint_with_bearer_auth() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mailer = ResendMailer::new("test-key", &server.uri()).unwrap();
        mailer.send(&outbound()).await.unwrap();
    }

    #[tokio::test]
    async fn provider_rejection_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(422).set_body_string("invalid recipient"))
            .mount(&server)
            .await;

        let mailer = ResendMailer::new("test-key", &server.uri()).unwrap();
        let result = mailer.send(&outbound()).await;

        match result {
            Err(EmailError::Provider { status, body }) => {
                assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
                assert_eq!(body, "invalid recipient");
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[test]
    fn reply_to_is_omitted_when_absent() {
        let json = serde_json::to_value(outbound()).unwrap();
        assert!(json.get("reply_to").is_none());
    }
}
