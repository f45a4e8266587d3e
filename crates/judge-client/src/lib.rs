//! Judge0-compatible HTTP adapter for the [`JudgeClient`] port.
//!
//! [`JudgeClient`]: algoarena_core::domain::JudgeClient

pub mod client;
pub mod config;
pub mod languages;
pub mod poll;
mod protocol;

pub use client::Judge0Client;
pub use config::JudgeConfig;
pub use languages::judge0_language_id;
pub use poll::PollPolicy;
