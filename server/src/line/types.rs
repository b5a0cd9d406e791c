//! LINE Messaging API wire types.
//!
//! Only the parts of the webhook payload the bot reads are modelled; unknown
//! event and message types decode into catch-all variants.

use serde::{Deserialize, Serialize};

/// Errors from calling the LINE Messaging API.
#[derive(Debug, thiserror::Error)]
pub enum MessagingError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LINE API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
}

// ============================================================================
// Outbound
// ============================================================================

/// A message object. The bot only ever sends text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutboundMessage {
    Text { text: String },
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// Body of `POST /v2/bot/message/push`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PushRequest {
    pub to: String,
    pub messages: Vec<OutboundMessage>,
}

/// Body of `POST /v2/bot/message/reply`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub reply_token: String,
    pub messages: Vec<OutboundMessage>,
}

// ============================================================================
// Inbound webhook
// ============================================================================

/// Top-level webhook request body.
#[derive(Debug, Deserialize, Serialize)]
pub struct WebhookRequest {
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WebhookEvent {
    Message {
        #[serde(rename = "replyToken", default)]
        reply_token: String,
        #[serde(default)]
        source: Option<MessageSource>,
        message: InboundMessage,
    },
    #[serde(other)]
    Other,
}

/// Who sent the event.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSource {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InboundMessage {
    Text { text: String },
    #[serde(other)]
    Other,
}
