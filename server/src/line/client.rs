//! LINE Messaging API client.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, instrument};

use super::types::{MessagingError, OutboundMessage, PushRequest, ReplyRequest};
use crate::config::Config;

/// Outbound half of the messaging platform.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Push a text message to a user.
    async fn push_text(&self, to: &str, text: &str) -> Result<(), MessagingError>;

    /// Answer a webhook event through its reply token.
    async fn reply_text(&self, reply_token: &str, text: &str) -> Result<(), MessagingError>;
}

/// HTTP client for the LINE Messaging API.
#[derive(Clone)]
pub struct LineClient {
    http: reqwest::Client,
    api_base: String,
    access_token: String,
}

impl LineClient {
    /// Create a client from configuration. `http` should already carry the
    /// outbound timeout.
    #[must_use]
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            api_base: config.line_api_base.trim_end_matches('/').to_string(),
            access_token: config.line_channel_access_token.clone(),
        }
    }

    async fn post<T: Serialize + Sync>(&self, path: &str, body: &T) -> Result<(), MessagingError> {
        let response = self
            .http
            .post(format!("{}{path}", self.api_base))
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(MessagingError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl Messenger for LineClient {
    #[instrument(skip(self, text))]
    async fn push_text(&self, to: &str, text: &str) -> Result<(), MessagingError> {
        let body = PushRequest {
            to: to.to_string(),
            messages: vec![OutboundMessage::text(text)],
        };
        self.post("/v2/bot/message/push", &body).await?;
        debug!("Push message accepted");
        Ok(())
    }

    #[instrument(skip(self, reply_token, text))]
    async fn reply_text(&self, reply_token: &str, text: &str) -> Result<(), MessagingError> {
        let body = ReplyRequest {
            reply_token: reply_token.to_string(),
            messages: vec![OutboundMessage::text(text)],
        };
        self.post("/v2/bot/message/reply", &body).await?;
        debug!("Reply message accepted");
        Ok(())
    }
}
