//! LINE Messaging Platform
//!
//! Push/reply client, webhook signature checks and the inbound message
//! handler.

pub mod callback;
pub mod client;
pub mod signing;
pub mod types;

pub use client::{LineClient, Messenger};
pub use types::MessagingError;
