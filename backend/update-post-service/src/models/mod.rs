/// Data models for update-post-service
///
/// This module defines:
/// - Post: the user-authored record as it travels over the wire
/// - PostKey: the composite key addressing a stored post
/// - PostChanges: the two fields an update is allowed to write
use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};

/// A post as stored in the `posts` table and exchanged with API clients.
///
/// Field names are PascalCase on the wire to match the stored attribute names.
/// Timestamps keep the offset they arrived with. Note that `==` on
/// `DateTime` compares instants, so two posts differing only in offset are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Post {
    pub user_id: String,
    pub message_id: String,
    #[serde(with = "rfc3339_nano")]
    pub created_timestamp: DateTime<FixedOffset>,
    pub message: String,
    #[serde(with = "rfc3339_nano")]
    pub updated_timestamp: DateTime<FixedOffset>,
}

impl Post {
    /// Composite key of the stored record.
    pub fn key(&self) -> PostKey {
        PostKey {
            user_id: self.user_id.clone(),
            message_id: self.message_id.clone(),
            created_timestamp: self.created_timestamp,
        }
    }

    /// The mutable fields carried by this post.
    pub fn changes(&self) -> PostChanges {
        PostChanges {
            message: self.message.clone(),
            updated_timestamp: self.updated_timestamp,
        }
    }
}

/// (UserId, MessageId, CreatedTimestamp). Never modified by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostKey {
    pub user_id: String,
    pub message_id: String,
    pub created_timestamp: DateTime<FixedOffset>,
}

/// Fields written by a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    pub message: String,
    pub updated_timestamp: DateTime<FixedOffset>,
}

/// Render a timestamp the way post records store and echo them: RFC3339 with
/// nanosecond precision and trailing fractional zeros trimmed. The original
/// offset is kept, with `Z` for a zero offset.
///
/// `2023-01-01T00:00:00Z`, `2023-01-01T00:00:00.5Z`, `2023-01-01T02:00:00+02:00`
pub fn format_store_timestamp(ts: &DateTime<FixedOffset>) -> String {
    let raw = ts.to_rfc3339_opts(SecondsFormat::Nanos, true);
    match raw.split_once('.') {
        Some((seconds, rest)) => {
            let zone_start = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            let (fraction, zone) = rest.split_at(zone_start);
            let digits = fraction.trim_end_matches('0');
            if digits.is_empty() {
                format!("{}{}", seconds, zone)
            } else {
                format!("{}.{}{}", seconds, digits, zone)
            }
        }
        None => raw,
    }
}

/// Serde adapter writing timestamps with [`format_store_timestamp`].
pub mod rfc3339_nano {
    use super::format_store_timestamp;
    use chrono::{DateTime, FixedOffset};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_store_timestamp(ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw).map_err(D::Error::custom)
    }
}
