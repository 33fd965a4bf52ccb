use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Serialize, Serializer};

use crate::error::EncodingErrorKind;

/// TIMESTAMP field of a message.
///
/// Decoding always yields `Text`, the literal substring from the wire
/// (fractional seconds and offset untouched). `Epoch` is a convenience for
/// building messages and is rendered as `YYYY-MM-DDTHH:MM:SSZ` in UTC.
///
/// Equality goes by wire form, so `Epoch(0)` equals
/// `Text("1970-01-01T00:00:00Z")`.
#[derive(Clone, Debug)]
pub enum Timestamp {
    Text(String),
    Epoch(i64),
}

impl Timestamp {
    /// Wire form of the timestamp.
    pub fn render(&self) -> Result<Cow<'_, str>, EncodingErrorKind> {
        self.wire().map_err(EncodingErrorKind::TimestampOutOfRange)
    }

    // Err carries epoch seconds chrono cannot represent
    fn wire(&self) -> Result<Cow<'_, str>, i64> {
        match self {
            Timestamp::Text(text) => Ok(Cow::Borrowed(text)),
            Timestamp::Epoch(secs) => DateTime::from_timestamp(*secs, 0)
                .map(|dt| Cow::Owned(dt.to_rfc3339_opts(SecondsFormat::Secs, true)))
                .ok_or(*secs),
        }
    }

    /// Interpret the timestamp as a calendar instant. Returns `None` when the
    /// text is syntactically fine but not a real date (e.g. month 13).
    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Timestamp::Text(text) => DateTime::parse_from_rfc3339(text).ok(),
            Timestamp::Epoch(secs) => {
                DateTime::from_timestamp(*secs, 0).map(|dt| dt.fixed_offset())
            }
        }
    }
}

impl From<&str> for Timestamp {
    fn from(text: &str) -> Self {
        Timestamp::Text(text.to_owned())
    }
}

impl From<String> for Timestamp {
    fn from(text: String) -> Self {
        Timestamp::Text(text)
    }
}

impl From<i64> for Timestamp {
    fn from(secs: i64) -> Self {
        Timestamp::Epoch(secs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.wire() {
            Ok(text) => f.write_str(&text),
            Err(secs) => write!(f, "{secs}"),
        }
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.wire() == other.wire()
    }
}

impl Eq for Timestamp {}

impl Hash for Timestamp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.wire().hash(state);
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match self {
            Timestamp::Text(text) => ser.serialize_str(text),
            Timestamp::Epoch(secs) => ser.serialize_i64(*secs),
        }
    }
}
