//! Subscriber registry with upsert-on-contact semantics.

use crate::store::JsonDocument;
use chrono::{DateTime, Utc};
use ratewatch_core::Subscriber;
use std::path::PathBuf;
use tracing::{info, warn};

/// Registry of chats receiving scheduled notifications, persisted as one
/// JSON document in registration order. There is no unsubscribe path.
pub struct SubscriberStore {
    doc: JsonDocument<Vec<Subscriber>>,
}

impl SubscriberStore {
    /// Bind to a registry document path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            doc: JsonDocument::new(path.into()),
        }
    }

    /// Register or refresh a chat. New chats keep their first-contact
    /// timestamp forever; existing ones only update the display fields.
    pub fn upsert(&mut self, chat_id: i64, first_name: &str, username: Option<&str>, now: DateTime<Utc>) {
        let mut subscribers = self.doc.load();
        if let Some(existing) = subscribers.iter_mut().find(|s| s.chat_id == chat_id) {
            existing.first_name = first_name.to_string();
            existing.username = username.map(str::to_string);
        } else {
            info!(chat_id, "new subscriber registered");
            subscribers.push(Subscriber {
                chat_id,
                first_name: first_name.to_string(),
                username: username.map(str::to_string),
                created_at: now,
            });
        }
        if let Err(err) = self.doc.save(&subscribers) {
            warn!(error = %err, "failed to persist subscriber registry");
        }
    }

    /// All subscribers in registration order.
    pub fn all(&self) -> Vec<Subscriber> {
        self.doc.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn ts(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 2, 9, minute, 0).unwrap()
    }

    fn store(dir: &tempfile::TempDir) -> SubscriberStore {
        SubscriberStore::new(dir.path().join("subscribers.json"))
    }

    #[test]
    fn test_upsert_registers_new_chat() {
        let dir = tempfile::tempdir().unwrap();
        let mut subscribers = store(&dir);
        subscribers.upsert(42, "Alex", Some("alex"), ts(0));

        let all = subscribers.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].chat_id, 42);
        assert_eq!(all[0].first_name, "Alex");
        assert_eq!(all[0].username.as_deref(), Some("alex"));
        assert_eq!(all[0].created_at, ts(0));
    }

    #[test]
    fn test_upsert_updates_display_fields_and_keeps_created_at() {
        let dir = tempfile::tempdir().unwrap();
        let mut subscribers = store(&dir);
        subscribers.upsert(42, "Alex", Some("alex"), ts(0));
        subscribers.upsert(42, "Alexandra", None, ts(30));

        let all = subscribers.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].first_name, "Alexandra");
        assert_eq!(all[0].username, None);
        assert_eq!(all[0].created_at, ts(0));
    }

    #[test]
    fn test_registration_order_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let mut subscribers = store(&dir);
        subscribers.upsert(1, "A", None, ts(0));
        subscribers.upsert(2, "B", None, ts(1));
        subscribers.upsert(3, "C", None, ts(2));
        subscribers.upsert(1, "A2", None, ts(3));

        let ids: Vec<i64> = subscribers.all().iter().map(|s| s.chat_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_registry_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        store(&dir).upsert(42, "Alex", None, ts(0));

        let all = store(&dir).all();
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn test_corrupt_registry_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subscribers.json");
        std::fs::write(&path, "\"nope").unwrap();

        let subscribers = SubscriberStore::new(path);
        assert_eq!(subscribers.all(), Vec::new());
    }
}
