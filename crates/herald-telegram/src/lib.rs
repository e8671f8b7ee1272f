//! `herald-telegram` — Telegram messaging gateway adapter.

pub mod error;
pub mod gateway;
pub mod send;

pub use error::TelegramError;
pub use gateway::TelegramGateway;
