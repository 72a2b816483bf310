//! Stored timestamps and their ISO-8601 normalization.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A timestamp as the document store happens to hold it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredTimestamp {
    /// Native `{seconds, nanoseconds}` pair.
    Native {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
    /// Milliseconds since the Unix epoch.
    Millis(i64),
    /// RFC 3339 text.
    Text(String),
}

impl StoredTimestamp {
    /// Native representation of `at`.
    pub fn native(at: DateTime<Utc>) -> Self {
        Self::Native {
            seconds: at.timestamp(),
            nanoseconds: at.timestamp_subsec_nanos(),
        }
    }

    /// Interpret the stored value, if it is a valid instant.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Native {
                seconds,
                nanoseconds,
            } => Utc.timestamp_opt(*seconds, *nanoseconds).single(),
            Self::Millis(millis) => Utc.timestamp_millis_opt(*millis).single(),
            Self::Text(text) => DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|at| at.with_timezone(&Utc)),
        }
    }
}

/// Render a stored timestamp as ISO-8601, falling back to `now` when it is
/// missing or unreadable.
pub fn iso_or_now(stored: Option<&StoredTimestamp>, now: DateTime<Utc>) -> String {
    stored
        .and_then(StoredTimestamp::to_datetime)
        .unwrap_or(now)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
