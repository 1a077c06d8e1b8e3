//! The parsed transcript record.
//!
//! This module provides [`Message`], one entry of a chat transcript. Every
//! analytic in the crate reads a `&[Message]`; nothing mutates it after the
//! parser has produced it.
//!
//! # Overview
//!
//! A message consists of:
//! - **Parsed**: `timestamp`, `sender`, `text`
//! - **Derived** (computed once in [`Message::new`]): `year`, `month`,
//!   `month_name`, `day`, `hour`, `weekday`, `date`
//!
//! # Examples
//!
//! ```
//! use chatstats::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
//!     .unwrap()
//!     .and_hms_opt(9, 5, 0)
//!     .unwrap();
//! let msg = Message::new(ts, "Alice", "hello");
//!
//! assert_eq!(msg.sender(), "Alice");
//! assert_eq!(msg.month_name(), "Jan");
//! assert_eq!(msg.weekday_name(), "Tuesday");
//! assert_eq!(msg.hour(), 9);
//! ```
//!
//! ## Serialization
//!
//! Derived fields are written out so table consumers don't recompute them,
//! and ignored on input:
//!
//! ```
//! use chatstats::Message;
//!
//! let json = r#"{"timestamp":"2024-03-09T21:15:00","sender":"Bob","text":"hi"}"#;
//! let msg: Message = serde_json::from_str(json)?;
//! assert_eq!(msg.weekday_name(), "Saturday");
//!
//! let out = serde_json::to_string(&msg)?;
//! assert!(out.contains(r#""month":"Mar""#));
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize, Serializer};

/// Sender assigned to lines that carry no `"<sender>: "` prefix.
///
/// Joins, leaves, subject changes, missed calls and the encryption notice all
/// land here. A participant whose display name is literally
/// `group_notification` cannot be told apart from these lines.
pub const GROUP_NOTIFICATION: &str = "group_notification";

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Weekdays in the order every weekday-keyed table uses.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name of a weekday (`"Monday"`).
pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_monday() as usize]
}

/// Three-letter English month abbreviation for a 1-based month (`"Jan"`).
///
/// Out-of-range months map to an empty string.
pub fn month_abbr(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_ABBR.get(i as usize))
        .copied()
        .unwrap_or("")
}

/// One parsed transcript entry.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `NaiveDateTime` | Leading stamp of the entry (no zone) |
/// | `sender` | `String` | Author, or [`GROUP_NOTIFICATION`] |
/// | `text` | `String` | Body, newlines preserved |
/// | `year`, `month`, `day`, `hour` | integers | From `timestamp` |
/// | `month_name` | `&str` | `"Jan"` .. `"Dec"` |
/// | `weekday` | `Weekday` | Serialized as `"Monday"` .. |
/// | `date` | `NaiveDate` | Calendar day |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawMessage")]
pub struct Message {
    timestamp: NaiveDateTime,
    sender: String,
    text: String,
    year: i32,
    #[serde(rename = "month")]
    #[serde(skip_deserializing)]
    month_name: &'static str,
    #[serde(skip)]
    month: u32,
    day: u32,
    hour: u32,
    #[serde(serialize_with = "serialize_weekday")]
    weekday: Weekday,
    date: NaiveDate,
}

/// Input shape for deserialization; derived fields are recomputed.
#[derive(Deserialize)]
struct RawMessage {
    timestamp: NaiveDateTime,
    sender: String,
    text: String,
}

impl From<RawMessage> for Message {
    fn from(raw: RawMessage) -> Self {
        Message::new(raw.timestamp, raw.sender, raw.text)
    }
}

fn serialize_weekday<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(weekday_name(*day))
}

impl Message {
    /// Creates a record and computes its derived calendar fields.
    pub fn new(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let date = timestamp.date();
        Self {
            timestamp,
            sender: sender.into(),
            text: text.into(),
            year: date.year(),
            month_name: month_abbr(date.month()),
            month: date.month(),
            day: date.day(),
            hour: timestamp.hour(),
            weekday: date.weekday(),
            date,
        }
    }

    /// Creates a system-line record with the [`GROUP_NOTIFICATION`] sender.
    pub fn notification(timestamp: NaiveDateTime, text: impl Into<String>) -> Self {
        Self::new(timestamp, GROUP_NOTIFICATION, text)
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the entry's timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message body.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Three-letter month name (`"Jan"`).
    pub fn month_name(&self) -> &'static str {
        self.month_name
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Hour of day, 0-23.
    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Full weekday name (`"Monday"`).
    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }

    /// Calendar day of the entry.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    // =========================================================================
    // Utility methods
    // =========================================================================

    /// Returns `true` for system lines (sender is [`GROUP_NOTIFICATION`]).
    pub fn is_notification(&self) -> bool {
        self.sender == GROUP_NOTIFICATION
    }

    /// Returns `true` if the body is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Number of whitespace-separated words in the raw body.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
