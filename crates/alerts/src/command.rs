//! Inbound command parsing and routing.

use crate::history::{stats_last_24h, HistoryStore};
use crate::message;
use crate::subscribers::SubscriberStore;
use chrono::{DateTime, Utc};
use ratewatch_core::CurrencyPair;
use ratewatch_feeds::{FeedError, RateSource};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

/// Parsed inbound text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Rate query, already resolved to a pair.
    Rate(CurrencyPair),
    /// Subscriber report, admin only.
    AdminStats,
    /// First-contact greeting.
    Start,
    /// Slash command we do not recognize.
    Unknown,
    /// Plain text, no command marker.
    Text,
}

impl Command {
    /// Parse one inbound message. `reference` fills in the rate query's
    /// shorthand forms.
    pub fn parse(text: &str, reference: &CurrencyPair) -> Self {
        let text = text.trim();
        let lower = text.to_lowercase();

        if lower.starts_with("/stats") {
            return Command::AdminStats;
        }
        if lower.starts_with("/rate") || matches!(lower.as_str(), "rate" | "/usd" | "usd") {
            return Command::Rate(parse_rate_args(text, reference));
        }
        if lower.starts_with("/start") {
            return Command::Start;
        }
        if text.starts_with('/') {
            return Command::Unknown;
        }
        Command::Text
    }
}

/// Accepted argument shapes: none, `BASE/COUNTER`, `BASE COUNTER`. Anything
/// else falls back to the reference pair.
fn parse_rate_args(text: &str, reference: &CurrencyPair) -> CurrencyPair {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() == 1 {
        return reference.clone();
    }
    if let Some((base, counter)) = parts[1].split_once('/') {
        return CurrencyPair::new(base, counter);
    }
    if parts.len() >= 3 {
        return CurrencyPair::new(parts[1], parts[2]);
    }
    reference.clone()
}

/// Routed outcome for one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send this reply back to the sender.
    Reply(String),
    /// Send this user-facing error back to the sender.
    ReplyError(String),
    /// Nothing to send.
    None,
}

/// Interpreter for inbound messages.
///
/// Every inbound message upserts the sender into the registry before any
/// routing decision is made.
pub struct CommandRouter {
    feed: Arc<dyn RateSource>,
    history: Arc<Mutex<HistoryStore>>,
    subscribers: Arc<Mutex<SubscriberStore>>,
    reference: CurrencyPair,
    admin_chat_id: i64,
}

impl CommandRouter {
    /// Create a new router.
    pub fn new(
        feed: Arc<dyn RateSource>,
        history: Arc<Mutex<HistoryStore>>,
        subscribers: Arc<Mutex<SubscriberStore>>,
        reference: CurrencyPair,
        admin_chat_id: i64,
    ) -> Self {
        Self {
            feed,
            history,
            subscribers,
            reference,
            admin_chat_id,
        }
    }

    /// Route one inbound message to a reply.
    pub async fn handle(
        &self,
        chat_id: i64,
        first_name: &str,
        username: Option<&str>,
        text: &str,
        now: DateTime<Utc>,
    ) -> Action {
        self.subscribers
            .lock()
            .await
            .upsert(chat_id, first_name, username, now);

        match Command::parse(text, &self.reference) {
            Command::AdminStats if chat_id == self.admin_chat_id => {
                let subscribers = self.subscribers.lock().await.all();
                Action::Reply(message::format_subscriber_report(&subscribers))
            }
            Command::Rate(pair) => self.rate_reply(&pair, now).await,
            Command::Start => Action::Reply(message::format_welcome(&self.reference)),
            // An unauthorized /stats gets the same treatment as any unknown
            // slash command.
            Command::AdminStats | Command::Unknown => {
                Action::Reply(message::format_help(&self.reference))
            }
            Command::Text => Action::None,
        }
    }

    async fn rate_reply(&self, pair: &CurrencyPair, now: DateTime<Utc>) -> Action {
        let quote = match self.feed.quote(pair).await {
            Ok(quote) => quote,
            Err(err) => {
                warn!(pair = %pair, error = %err, "on-demand rate query failed");
                return Action::ReplyError(user_error(&err, pair));
            }
        };

        if *pair == self.reference {
            // On-demand reference queries count toward history just like
            // scheduled ticks.
            let window = self.history.lock().await.record(quote.rate, now);
            let stats = stats_last_24h(&window);
            Action::Reply(message::format_reference_update(
                pair,
                quote.rate,
                None,
                stats.as_ref(),
                now,
            ))
        } else {
            Action::Reply(message::format_pair_quote(pair, &quote, now))
        }
    }
}

/// User-facing error text; internals stay in the logs.
fn user_error(err: &FeedError, pair: &CurrencyPair) -> String {
    match err {
        FeedError::PairNotFound(_) | FeedError::ZeroRate(_) => {
            format!("❌ Pair {pair} is not available. Try e.g. /rate usd/bdt")
        }
        FeedError::Upstream(_) | FeedError::Parse(_) => {
            "❌ The rate service is unavailable right now. Try again later.".to_string()
        }
    }
}
