//! Response latency: how long it takes someone to answer.
//!
//! A record's latency is the gap to the record before it, in minutes, after
//! system lines and bot accounts have been removed and the log sorted by
//! timestamp. The gap is *undefined* when:
//!
//! - the record is the first one,
//! - the previous record has the same sender (a continuation, not a reply),
//! - the previous record is on another calendar day,
//! - the gap is at least the configured cap (a conversational break).
//!
//! Undefined latencies never drop a record; [`NullPolicy`] decides how they
//! appear in output tables. Group means skip undefined values.
//!
//! # Example
//!
//! ```
//! use chatstats::analytics::latency::{mean_by_sender, response_times};
//! use chatstats::config::{LatencyConfig, NullPolicy};
//!
//! let log = chatstats::parse(
//!     "1/2/24, 9:00 - Alice: hello\n1/2/24, 9:05 - Bob: hi there\n1/2/24, 9:05 - Bob: how are you",
//! )?;
//! let times = response_times(&log, &[], &LatencyConfig::default());
//!
//! assert_eq!(times[1].latency_minutes, Some(5.0));
//! assert_eq!(times[2].latency_minutes, None);
//!
//! let means = mean_by_sender(&times, NullPolicy::Zero);
//! assert_eq!(means[1].group, "Bob");
//! assert_eq!(means[1].mean_minutes, 5.0);
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::Message;
use crate::config::{LatencyConfig, NullPolicy};
use crate::message::{WEEK, weekday_name};

/// A record with its reply latency attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseTime {
    pub timestamp: NaiveDateTime,
    pub sender: String,
    pub date: NaiveDate,
    #[serde(serialize_with = "serialize_weekday")]
    pub weekday: Weekday,
    /// Minutes since the previous record, if this counts as a reply
    pub latency_minutes: Option<f64>,
}

fn serialize_weekday<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(weekday_name(*day))
}

impl ResponseTime {
    /// Latency as an output table shows it.
    pub fn reported_minutes(&self, policy: NullPolicy) -> Option<f64> {
        match (self.latency_minutes, policy) {
            (Some(minutes), _) => Some(minutes),
            (None, NullPolicy::Zero) => Some(0.0),
            (None, NullPolicy::Omit) => None,
        }
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday, Weekday::Sat | Weekday::Sun)
    }
}

/// Mean latency of one group (sender, weekday, or weekday/weekend).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencyMean {
    pub group: String,
    /// Mean over defined latencies; 0 when none are defined
    pub mean_minutes: f64,
    /// Defined latencies that went into the mean
    pub responses: usize,
}

/// Computes per-record latencies.
///
/// System lines and `excluded` senders are dropped first, then the remaining
/// records are stably sorted by timestamp.
pub fn response_times(
    records: &[Message],
    excluded: &[String],
    config: &LatencyConfig,
) -> Vec<ResponseTime> {
    let mut humans: Vec<&Message> = records
        .iter()
        .filter(|m| !m.is_notification() && !excluded.iter().any(|s| s == m.sender()))
        .collect();
    humans.sort_by_key(|m| m.timestamp());

    let mut out = Vec::with_capacity(humans.len());
    let mut prev: Option<&Message> = None;
    for msg in humans {
        let latency_minutes = prev.and_then(|p| {
            if p.sender() == msg.sender() || p.date() != msg.date() {
                return None;
            }
            let minutes = (msg.timestamp() - p.timestamp()).num_seconds() as f64 / 60.0;
            (minutes < config.cap_minutes).then_some(minutes)
        });
        out.push(ResponseTime {
            timestamp: msg.timestamp(),
            sender: msg.sender().to_string(),
            date: msg.date(),
            weekday: msg.weekday(),
            latency_minutes,
        });
        prev = Some(msg);
    }

    debug!(
        records = out.len(),
        defined = out.iter().filter(|r| r.latency_minutes.is_some()).count(),
        cap = config.cap_minutes,
        "computed response times"
    );
    out
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    defined: usize,
}

impl Accumulator {
    fn add(&mut self, latency: Option<f64>) {
        if let Some(minutes) = latency {
            self.sum += minutes;
            self.defined += 1;
        }
    }

    fn finish(self, group: String, policy: NullPolicy) -> Option<LatencyMean> {
        match (self.defined, policy) {
            (0, NullPolicy::Omit) => None,
            (0, NullPolicy::Zero) => Some(LatencyMean {
                group,
                mean_minutes: 0.0,
                responses: 0,
            }),
            (n, _) => Some(LatencyMean {
                group,
                mean_minutes: self.sum / n as f64,
                responses: n,
            }),
        }
    }
}

/// Mean latency per sender, alphabetical.
pub fn mean_by_sender(times: &[ResponseTime], policy: NullPolicy) -> Vec<LatencyMean> {
    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();
    for t in times {
        groups.entry(t.sender.as_str()).or_default().add(t.latency_minutes);
    }
    groups
        .into_iter()
        .filter_map(|(sender, acc)| acc.finish(sender.to_string(), policy))
        .collect()
}

/// Mean latency per weekday, Monday-first. Weekdays without records are absent.
pub fn mean_by_weekday(times: &[ResponseTime], policy: NullPolicy) -> Vec<LatencyMean> {
    WEEK.iter()
        .filter_map(|&day| {
            let mut rows = times.iter().filter(|t| t.weekday == day).peekable();
            rows.peek()?;
            let mut acc = Accumulator::default();
            rows.for_each(|t| acc.add(t.latency_minutes));
            acc.finish(weekday_name(day).to_string(), policy)
        })
        .collect()
}

/// Mean latency on weekdays vs. weekends (`"Weekday"` row first).
pub fn weekend_vs_weekday(times: &[ResponseTime], policy: NullPolicy) -> Vec<LatencyMean> {
    [("Weekday", false), ("Weekend", true)]
        .into_iter()
        .filter_map(|(label, weekend)| {
            let mut rows = times.iter().filter(|t| t.is_weekend() == weekend).peekable();
            rows.peek()?;
            let mut acc = Accumulator::default();
            rows.for_each(|t| acc.add(t.latency_minutes));
            acc.finish(label.to_string(), policy)
        })
        .collect()
}
