//! Quake Dispatch
//!
//! One fetch → compare → format → send → persist cycle per call. The last-seen
//! id is only written after the push has been accepted, so a failed send never
//! advances the cursor.

use std::sync::Arc;

use axum::extract::State;
use tracing::{error, info, instrument, warn};

use crate::api::AppState;
use crate::line::Messenger;
use crate::quake::{format_message, EventSource};
use crate::state::LastSeenStore;

/// Body returned when no recipient is configured.
pub const NOT_CONFIGURED_BODY: &str =
    "TARGET_USER_ID not set. Send \"id\" to the bot to get your user ID.";

/// Result of a single dispatch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No recipient configured; nothing was fetched.
    NotConfigured,
    /// The feed had no qualifying events (or could not be reached).
    NoEvents,
    /// The newest event was already notified.
    Duplicate,
    /// A new event was pushed and recorded.
    Sent,
    /// The push failed; the cursor was left alone.
    Failed(String),
}

impl DispatchOutcome {
    /// Plain-text response body for `/checkquake`.
    pub fn body(&self) -> String {
        match self {
            Self::NotConfigured => NOT_CONFIGURED_BODY.to_string(),
            Self::NoEvents => "no quake".to_string(),
            Self::Duplicate => "already sent".to_string(),
            Self::Sent => "sent".to_string(),
            Self::Failed(reason) => format!("error: {reason}"),
        }
    }
}

/// Runs dispatch cycles against injected collaborators.
#[derive(Clone)]
pub struct Dispatcher {
    source: Arc<dyn EventSource>,
    store: Arc<dyn LastSeenStore>,
    messenger: Arc<dyn Messenger>,
    recipient: Option<String>,
}

impl Dispatcher {
    pub fn new(
        source: Arc<dyn EventSource>,
        store: Arc<dyn LastSeenStore>,
        messenger: Arc<dyn Messenger>,
        recipient: Option<String>,
    ) -> Self {
        Self {
            source,
            store,
            messenger,
            recipient,
        }
    }

    /// Execute one cycle. Never panics and never returns an error: every
    /// failure is folded into the outcome.
    #[instrument(skip(self))]
    pub async fn run_cycle(&self) -> DispatchOutcome {
        let Some(recipient) = self.recipient.as_deref() else {
            warn!("Dispatch skipped: no recipient configured");
            return DispatchOutcome::NotConfigured;
        };

        let events = match self.source.fetch_recent().await {
            Ok(events) => events,
            Err(e) => {
                warn!(error = %e, "Quake feed fetch failed");
                Vec::new()
            }
        };

        // Newest by origin time; ties go to the earliest position.
        let Some(latest) = events
            .iter()
            .rev()
            .max_by_key(|event| event.occurred_at_ms)
        else {
            return DispatchOutcome::NoEvents;
        };

        let last_sent = match self.store.load().await {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Failed to load last sent id, treating as empty");
                String::new()
            }
        };

        if latest.id == last_sent {
            return DispatchOutcome::Duplicate;
        }

        let message = format_message(latest);
        if let Err(e) = self.messenger.push_text(recipient, &message).await {
            error!(event_id = %latest.id, error = %e, "Failed to push quake alert");
            return DispatchOutcome::Failed(e.to_string());
        }

        if let Err(e) = self.store.save(&latest.id).await {
            warn!(event_id = %latest.id, error = %e, "Failed to save last sent id");
        }

        info!(event_id = %latest.id, "Quake alert sent");
        DispatchOutcome::Sent
    }
}

/// GET /checkquake
pub async fn check_quake(State(state): State<AppState>) -> String {
    state.dispatcher.run_cycle().await.body()
}
