//! Quake Bot Server
//!
//! Polls the USGS earthquake feed when triggered by an external scheduler and
//! pushes new events to a single LINE user. A webhook endpoint answers a few
//! text commands, including one that reveals the sender's LINE user id.

pub mod api;
pub mod config;
pub mod dispatch;
pub mod line;
pub mod quake;
pub mod state;
