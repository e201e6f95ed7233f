//! Telegram notification system for currency rate changes.
//!
//! This crate provides:
//! - JSON-document persistence for rate history and subscribers
//! - Wall-clock slot scheduling for the notification cadence
//! - Rate-change detection and subscriber fan-out
//! - Inbound command parsing and routing

pub mod command;
pub mod history;
pub mod message;
pub mod notifier;
pub mod schedule;
pub mod store;
pub mod subscribers;
pub mod telegram;

pub use command::{Action, Command, CommandRouter};
pub use history::{stats_last_24h, HistoryStore};
pub use notifier::Notifier;
pub use schedule::{next_slot, sleep_until_next_slot, SLOT_MINUTES};
pub use store::{JsonDocument, StoreError};
pub use subscribers::SubscriberStore;
pub use telegram::{Outbound, TelegramBot, TelegramError};
