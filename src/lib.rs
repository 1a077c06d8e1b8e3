//! # Chatstats
//!
//! A Rust library for turning exported WhatsApp chat transcripts into
//! structured records and descriptive analytics.
//!
//! ## Overview
//!
//! A transcript is a loosely delimited text blob: one entry per timestamp
//! prefix, multi-line bodies, system notifications without a sender, media
//! placeholders and deleted-message markers. Chatstats parses it into an
//! ordered `Vec<Message>` and computes:
//!
//! - **Summary** counts: messages, words, media, links, deletions
//! - **Timelines**: daily, monthly (`"2024-Jan"`), hourly, per weekday and a
//!   dense weekday x hour heatmap
//! - **Vocabulary**: most common words, word-cloud frequencies, top emoji
//! - **Participants**: most / least active, shared links
//! - **Response latency** per sender, per weekday, weekday vs. weekend
//!
//! ## Quick Start
//!
//! ```rust
//! use chatstats::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let log = parse(
//!         "1/2/24, 9:00 - Alice: hello\n\
//!          1/2/24, 9:05 - Bob: hi there\n\
//!          1/2/24, 9:05 - Bob: how are you",
//!     )?;
//!
//!     let stats = summary(&Participant::Overall, &log, &Markers::default());
//!     assert_eq!(stats.messages, 3);
//!
//!     let times = response_times(&log, &[], &LatencyConfig::default());
//!     assert_eq!(times[1].latency_minutes, Some(5.0));
//!     assert_eq!(times[2].latency_minutes, None);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`TranscriptParser`](parser::TranscriptParser), [`parse`]
//! - [`message`] - [`Message`], [`GROUP_NOTIFICATION`](message::GROUP_NOTIFICATION)
//! - [`classify`] - message kinds, [`Stopwords`](classify::Stopwords), the cleaned corpus
//! - [`analytics`] - every aggregation, plus participant and date filters
//! - [`session`] - [`AnalysisSession`](session::AnalysisSession), parse-once cache
//! - [`report`] - [`AnalysisReport`](report::AnalysisReport), all tables at once
//! - [`output`] / [`format`] - JSON and CSV writers
//! - [`config`] - parser and analysis configuration
//! - [`error`] - [`ChatstatsError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

pub mod analytics;
#[cfg(feature = "cli")]
pub mod cli;
pub mod classify;
pub mod config;
pub mod emoji;
pub mod error;
pub mod format;
pub mod message;
pub mod output;
pub mod parser;
pub mod report;
pub mod session;

// Re-export the main types at the crate root for convenience
pub use error::{ChatstatsError, Result};
pub use message::Message;
pub use parser::parse;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatstats::prelude::*;
/// ```
pub mod prelude {
    // Core message type
    pub use crate::Message;
    pub use crate::message::GROUP_NOTIFICATION;

    // Error types
    pub use crate::error::{ChatstatsError, Result};

    // Parsing
    pub use crate::parser::{TranscriptParser, parse};
    pub use crate::session::AnalysisSession;

    // Configuration
    pub use crate::config::{
        AnalysisConfig, DateOrder, LatencyConfig, Markers, NullPolicy, ParserConfig,
    };

    // Cleaning
    pub use crate::classify::{MessageKind, Stopwords, clean_corpus, clean_text};

    // Analytics
    pub use crate::analytics::{
        DateRange, FilterConfig, Participant, SortOrder, activity_heatmap, daily_timeline,
        extract_links, filter_participant, hourly_distribution, mean_by_sender, mean_by_weekday,
        monthly_timeline, participant_ranking, response_times, summary, top_emoji, top_words,
        weekend_vs_weekday, word_cloud_frequencies,
    };

    // Reports
    pub use crate::format::{OutputFormat, write_report};
    pub use crate::report::{AnalysisReport, analyze};
}
