//! Subscriber registry entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered chat that receives scheduled rate notifications.
///
/// Unique by `chat_id`. Re-registration refreshes the display fields but
/// keeps `created_at` and the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    /// Chat id on the messaging transport.
    pub chat_id: i64,
    /// Display name from the most recent interaction.
    pub first_name: String,
    /// Optional @handle from the most recent interaction.
    pub username: Option<String>,
    /// First time this chat interacted with the bot.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_subscriber_roundtrip() {
        let sub = Subscriber {
            chat_id: 852271924,
            first_name: "Alex".to_string(),
            username: None,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        };
        let json = serde_json::to_string(&sub).unwrap();
        let back: Subscriber = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sub);
    }
}
