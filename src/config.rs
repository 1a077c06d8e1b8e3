//! Configuration types for parsing and analysis.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ParserConfig`] - transcript timestamp conventions
//! - [`Markers`] - media / deleted-message sentinel bodies
//! - [`LatencyConfig`] - response-latency cap and null reporting policy
//! - [`AnalysisConfig`] - everything the analytics need, in one place
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::{AnalysisConfig, NullPolicy};
//!
//! let config = AnalysisConfig::new()
//!     .with_excluded_sender("Meta AI")
//!     .with_latency_cap(120.0)
//!     .with_null_policy(NullPolicy::Omit)
//!     .with_top_words(30);
//!
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ChatstatsError;

/// Order of the first two numeric fields of a `N/N/YY` stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// `M/D/YY`, the convention of US-locale exports.
    MonthFirst,
    /// `D/M/YY`, used by most other locales.
    DayFirst,
    /// Day-first when any stamp's first field exceeds 12, month-first otherwise.
    #[default]
    Auto,
}

/// Configuration for transcript parsing.
///
/// # Example
///
/// ```rust
/// use chatstats::config::{DateOrder, ParserConfig};
///
/// let config = ParserConfig::new().with_date_order(DateOrder::DayFirst);
/// assert_eq!(config.date_order, DateOrder::DayFirst);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// How to read `N/N/YY` stamps (default: auto-detect)
    pub date_order: DateOrder,
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the date order.
    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }
}

/// Exact bodies that mark media placeholders and deleted messages.
///
/// Bodies are compared after trimming surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Placeholder WhatsApp writes instead of an attachment
    pub media: String,
    /// Bodies that replace a deleted message
    pub deleted: Vec<String>,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            media: "<Media omitted>".to_string(),
            deleted: vec![
                "This message was deleted".to_string(),
                "You deleted this message".to_string(),
            ],
        }
    }
}

/// How an undefined latency appears in output tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    /// Undefined latencies are reported as `0`.
    #[default]
    Zero,
    /// Undefined latencies are reported as missing.
    Omit,
}

/// Configuration for the response-latency analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    /// Gaps of at least this many minutes are not replies (default: 240)
    pub cap_minutes: f64,
    /// Output treatment of undefined latencies (default: zero)
    pub null_policy: NullPolicy,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            cap_minutes: 240.0,
            null_policy: NullPolicy::Zero,
        }
    }
}

impl LatencyConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum gap, in minutes, that still counts as a reply.
    #[must_use]
    pub fn with_cap_minutes(mut self, cap: f64) -> Self {
        self.cap_minutes = cap;
        self
    }

    /// Sets the null reporting policy.
    #[must_use]
    pub fn with_null_policy(mut self, policy: NullPolicy) -> Self {
        self.null_policy = policy;
        self
    }
}

/// Configuration shared by every analytic.
///
/// Loadable from JSON (see [`AnalysisConfig::from_json_str`]); missing keys
/// fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Media / deleted sentinels
    pub markers: Markers,

    /// Bot or system accounts left out of ranking and latency
    pub excluded_senders: Vec<String>,

    /// Response-latency settings
    pub latency: LatencyConfig,

    /// Rows in the most-common-words table (default: 20)
    pub top_words: usize,

    /// Rows in the emoji table (default: 10)
    pub top_emoji: usize,

    /// Rows in the word-cloud frequency table (default: 150)
    pub word_cloud_words: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            markers: Markers::default(),
            excluded_senders: Vec::new(),
            latency: LatencyConfig::default(),
            top_words: 20,
            top_emoji: 10,
            word_cloud_words: 150,
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a bot/system account to exclude from ranking and latency.
    #[must_use]
    pub fn with_excluded_sender(mut self, sender: impl Into<String>) -> Self {
        self.excluded_senders.push(sender.into());
        self
    }

    /// Sets the media placeholder body.
    #[must_use]
    pub fn with_media_marker(mut self, marker: impl Into<String>) -> Self {
        self.markers.media = marker.into();
        self
    }

    /// Sets the latency cap in minutes.
    #[must_use]
    pub fn with_latency_cap(mut self, cap: f64) -> Self {
        self.latency.cap_minutes = cap;
        self
    }

    /// Sets the null reporting policy for latencies.
    #[must_use]
    pub fn with_null_policy(mut self, policy: NullPolicy) -> Self {
        self.latency.null_policy = policy;
        self
    }

    /// Sets the number of rows in the most-common-words table.
    #[must_use]
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.top_words = n;
        self
    }

    /// Sets the number of rows in the emoji table.
    #[must_use]
    pub fn with_top_emoji(mut self, n: usize) -> Self {
        self.top_emoji = n;
        self
    }

    /// Sets the number of rows in the word-cloud table.
    #[must_use]
    pub fn with_word_cloud_words(mut self, n: usize) -> Self {
        self.word_cloud_words = n;
        self
    }

    /// Returns `true` if `sender` is a configured bot/system account.
    pub fn is_excluded(&self, sender: &str) -> bool {
        self.excluded_senders.iter().any(|s| s == sender)
    }

    /// Checks that values are usable.
    pub fn validate(&self) -> Result<(), ChatstatsError> {
        let cap = self.latency.cap_minutes;
        if !cap.is_finite() || cap <= 0.0 {
            return Err(ChatstatsError::invalid_config(format!(
                "latency cap must be a positive number of minutes, got {cap}"
            )));
        }
        if self.markers.media.trim().is_empty() {
            return Err(ChatstatsError::invalid_config(
                "media marker must not be empty",
            ));
        }
        Ok(())
    }

    /// Parses a configuration from JSON and validates it.
    #[cfg(feature = "json-output")]
    pub fn from_json_str(json: &str) -> Result<Self, ChatstatsError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    #[cfg(feature = "json-output")]
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self, ChatstatsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
