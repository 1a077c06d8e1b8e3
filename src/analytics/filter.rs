//! Scope a structured log by participant and date.
//!
//! This module provides [`Participant`] (the per-analytic sender scope),
//! [`DateRange`] (an inclusive calendar-day post-filter) and [`FilterConfig`],
//! which bundles both.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Participant | [`with_participant`](FilterConfig::with_participant) | `Overall` or an exact sender |
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages on or before date |
//!
//! # Examples
//!
//! ```
//! use chatstats::analytics::filter::{Participant, filter_participant};
//!
//! let messages = chatstats::parse(
//!     "1/2/24, 9:00 - Alice: Hello\n1/2/24, 9:01 - Bob: Hi\n1/2/24, 9:02 - Alice: Bye",
//! )?;
//!
//! let alice: Participant = "Alice".parse().unwrap();
//! assert_eq!(filter_participant(&messages, &alice).len(), 2);
//! assert_eq!(filter_participant(&messages, &Participant::Overall).len(), 3);
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```
//!
//! # Behavior Notes
//!
//! - Sender matching is exact and case-sensitive
//! - Unknown participants select nothing; that is not an error
//! - The date range produces a new log; the participant only scopes a view

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::error::ChatstatsError;

/// Name that selects every record.
pub const OVERALL: &str = "Overall";

/// Whose messages an analytic looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Participant {
    /// No restriction.
    #[default]
    Overall,
    /// Exactly this sender.
    Named(String),
}

impl Participant {
    /// Returns `true` if `msg` is in scope.
    pub fn matches(&self, msg: &Message) -> bool {
        match self {
            Participant::Overall => true,
            Participant::Named(name) => msg.sender() == name,
        }
    }

    /// Iterates the records in scope, in log order.
    pub fn select<'a>(
        &'a self,
        records: &'a [Message],
    ) -> impl Iterator<Item = &'a Message> + 'a {
        records.iter().filter(move |msg| self.matches(msg))
    }

    pub fn is_overall(&self) -> bool {
        matches!(self, Participant::Overall)
    }

    /// Display name (`"Overall"` or the sender).
    pub fn as_str(&self) -> &str {
        match self {
            Participant::Overall => OVERALL,
            Participant::Named(name) => name,
        }
    }
}

impl FromStr for Participant {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Participant::from(s.to_string()))
    }
}

impl From<String> for Participant {
    fn from(s: String) -> Self {
        if s == OVERALL {
            Participant::Overall
        } else {
            Participant::Named(s)
        }
    }
}

impl From<Participant> for String {
    fn from(p: Participant) -> Self {
        match p {
            Participant::Overall => OVERALL.to_string(),
            Participant::Named(name) => name,
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed view of the records in scope for `participant`.
///
/// Filtering by [`Participant::Overall`] returns every record; filtering the
/// result again by the same participant changes nothing.
pub fn filter_participant<'a>(
    records: &'a [Message],
    participant: &Participant,
) -> Vec<&'a Message> {
    records.iter().filter(|msg| participant.matches(msg)).collect()
}

/// Inclusive calendar-day bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included.
    pub from: Option<NaiveDate>,
    /// Last day included.
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Creates an unbounded range.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatstatsError> {
        self.from = Some(parse_date(date_str)?);
        Ok(self)
    }

    /// Sets the end date (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatstatsError> {
        self.to = Some(parse_date(date_str)?);
        Ok(self)
    }

    /// Returns `true` if any bound is set.
    pub fn is_active(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    /// Returns `true` if `date` is within the bounds.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Parse a date string in YYYY-MM-DD format.
fn parse_date(date_str: &str) -> Result<NaiveDate, ChatstatsError> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|_| ChatstatsError::invalid_date(date_str))
}

/// Returns a new log holding the records inside `range`, in log order.
pub fn apply_date_range(records: &[Message], range: &DateRange) -> Vec<Message> {
    if !range.is_active() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|msg| range.contains(msg.date()))
        .cloned()
        .collect()
}

/// Participant scope plus date range.
///
/// # Examples
///
/// ```
/// use chatstats::analytics::filter::FilterConfig;
///
/// # fn main() -> chatstats::Result<()> {
/// let config = FilterConfig::new()
///     .with_participant("Alice")
///     .with_date_from("2024-06-01")?
///     .with_date_to("2024-12-31")?;
///
/// assert!(config.is_active());
/// assert_eq!(config.participant.as_str(), "Alice");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Whose messages the per-participant tables describe.
    pub participant: Participant,

    /// Calendar bounds applied to the whole log first.
    pub range: DateRange,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all messages pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the participant scope. `"Overall"` means everyone.
    #[must_use]
    pub fn with_participant(mut self, participant: impl Into<String>) -> Self {
        self.participant = Participant::from(participant.into());
        self
    }

    /// Sets the start date filter (inclusive).
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatstatsError> {
        self.range = self.range.with_date_from(date_str)?;
        Ok(self)
    }

    /// Sets the end date filter (inclusive).
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatstatsError> {
        self.range = self.range.with_date_to(date_str)?;
        Ok(self)
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.range.is_active() || !self.participant.is_overall()
    }
}
