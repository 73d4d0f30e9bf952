//! Watches a homework review API and reports status changes to a Telegram chat.
//!
//! The binary in `main.rs` wires these modules together; `tests/` drives them
//! directly against mocked HTTP endpoints.

pub mod config;
pub mod errors;
pub mod jobs;
pub mod logging;
pub mod models;
pub mod notification;
pub mod practicum;
