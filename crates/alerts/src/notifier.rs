//! Scheduled rate-change notifications.

use crate::history::{stats_last_24h, HistoryStore};
use crate::message;
use crate::schedule::sleep_until_next_slot;
use crate::subscribers::SubscriberStore;
use crate::telegram::Outbound;
use chrono::{DateTime, Utc};
use ratewatch_core::CurrencyPair;
use ratewatch_feeds::RateSource;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Scheduled notification engine.
///
/// Alternates between sleeping for the next slot and processing one tick.
/// Subscribers hear about a tick only when the rate moved since the last
/// broadcast; the very first successful tick always sends.
pub struct Notifier {
    feed: Arc<dyn RateSource>,
    outbound: Arc<dyn Outbound>,
    history: Arc<Mutex<HistoryStore>>,
    subscribers: Arc<Mutex<SubscriberStore>>,
    reference: CurrencyPair,
    /// Rate delivered in the last broadcast; `None` until the first
    /// successful tick of this process.
    last_rate: Option<f64>,
}

impl Notifier {
    /// Create a new notifier.
    pub fn new(
        feed: Arc<dyn RateSource>,
        outbound: Arc<dyn Outbound>,
        history: Arc<Mutex<HistoryStore>>,
        subscribers: Arc<Mutex<SubscriberStore>>,
        reference: CurrencyPair,
    ) -> Self {
        Self {
            feed,
            outbound,
            history,
            subscribers,
            reference,
            last_rate: None,
        }
    }

    /// Run the slot loop forever. A failed tick is skipped until the next
    /// slot; nothing here terminates on a caught error.
    pub async fn run(mut self) {
        info!(reference = %self.reference, "notification loop started");
        loop {
            sleep_until_next_slot().await;
            self.tick(Utc::now()).await;
        }
    }

    /// Process one slot tick. Returns how many notifications were delivered.
    pub async fn tick(&mut self, now: DateTime<Utc>) -> u32 {
        let quote = match self.feed.quote(&self.reference).await {
            Ok(quote) => quote,
            Err(err) => {
                warn!(error = %err, "scheduled rate check failed, skipping tick");
                return 0;
            }
        };

        let window = self.history.lock().await.record(quote.rate, now);
        let stats = stats_last_24h(&window);

        if self.last_rate == Some(quote.rate) {
            info!(rate = quote.rate, "rate unchanged, suppressing broadcast");
            return 0;
        }

        let text = message::format_reference_update(
            &self.reference,
            quote.rate,
            self.last_rate,
            stats.as_ref(),
            now,
        );

        let subscribers = self.subscribers.lock().await.all();
        let mut sent = 0u32;
        for sub in &subscribers {
            match self.outbound.send(sub.chat_id, &text).await {
                Ok(()) => sent += 1,
                Err(err) => {
                    error!(chat_id = sub.chat_id, error = %err, "failed to deliver notification");
                }
            }
        }

        self.last_rate = Some(quote.rate);
        info!(
            rate = quote.rate,
            sent,
            subscribers = subscribers.len(),
            "broadcast complete"
        );
        sent
    }
}
