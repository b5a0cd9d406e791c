//! Inbound webhook handler.
//!
//! Verifies the LINE signature and answers text messages with canned replies.
//! The `id` command reveals the sender's user id, which is how the push
//! recipient gets configured the first time.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, error, warn};

use super::signing::{verify_signature, SIGNATURE_HEADER};
use super::types::{InboundMessage, MessagingError, WebhookEvent, WebhookRequest};
use crate::api::AppState;

/// Reply to the `test` command.
pub const TEST_REPLY: &str = "テスト成功！Botは正常に動作しています。";

/// Reply for anything the bot does not understand.
pub const HELP_REPLY: &str = "使い方:\n・id → あなたのユーザーIDを表示\n・test → 動作確認\n・地震 → 監視状況を表示";

/// Keywords that ask about the monitoring status.
const STATUS_KEYWORDS: [&str; 2] = ["地震", "earthquake"];

/// Errors from the webhook endpoint.
#[derive(Debug, thiserror::Error)]
pub enum CallbackError {
    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid payload")]
    InvalidPayload(#[source] serde_json::Error),

    #[error("Reply failed: {0}")]
    Reply(#[from] MessagingError),
}

impl IntoResponse for CallbackError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidSignature => {
                warn!("Rejected webhook with invalid signature");
                StatusCode::BAD_REQUEST
            }
            Self::InvalidPayload(err) => {
                warn!(error = %err, "Rejected undecodable webhook body");
                StatusCode::BAD_REQUEST
            }
            Self::Reply(err) => {
                error!(error = %err, "Failed to send webhook reply");
                StatusCode::BAD_GATEWAY
            }
        };

        (status, self.to_string()).into_response()
    }
}

/// Pick the canned reply for an incoming text.
pub fn reply_for(text: &str, user_id: Option<&str>, min_magnitude: f64) -> String {
    let normalized = text.trim().to_lowercase();

    match normalized.as_str() {
        "id" => format!("あなたのユーザーID: {}", user_id.unwrap_or("unknown")),
        "test" => TEST_REPLY.to_string(),
        _ if STATUS_KEYWORDS.iter().any(|kw| normalized.contains(kw)) => format!(
            "地震速報を監視中です。M{min_magnitude}以上の地震を検知したら通知します。"
        ),
        _ => HELP_REPLY.to_string(),
    }
}

/// POST /callback
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, CallbackError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(CallbackError::InvalidSignature)?;

    if !verify_signature(&state.config.line_channel_secret, &body, signature) {
        return Err(CallbackError::InvalidSignature);
    }

    let request: WebhookRequest =
        serde_json::from_slice(&body).map_err(CallbackError::InvalidPayload)?;

    for event in request.events {
        let WebhookEvent::Message {
            reply_token,
            source,
            message: InboundMessage::Text { text },
        } = event
        else {
            continue;
        };

        let user_id = source.and_then(|s| s.user_id);
        let reply = reply_for(&text, user_id.as_deref(), state.config.min_magnitude);
        debug!(user_id = ?user_id, "Replying to text message");
        state.messenger.reply_text(&reply_token, &reply).await?;
    }

    Ok("OK")
}
