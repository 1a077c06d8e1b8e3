//! Command-line interface definition using clap.
//!
//! [`Args`] holds the raw flags; the `*_config` methods turn them into the
//! library's configuration types so `main` only wires things together.
//!
//! ```rust
//! use chatstats::cli::Args;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatstats", "chat.txt", "-u", "Alice", "--latency-cap", "60"]);
//! let config = args.analysis_config()?;
//!
//! assert_eq!(args.user, "Alice");
//! assert_eq!(config.latency.cap_minutes, 60.0);
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::analytics::FilterConfig;
use crate::classify::Stopwords;
use crate::config::{AnalysisConfig, DateOrder, NullPolicy, ParserConfig};
use crate::error::ChatstatsError;
use crate::format::OutputFormat;

/// Analyze a WhatsApp chat export: activity timelines, vocabulary,
/// emoji, participants and response times.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstats")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstats chat.txt
    chatstats chat.txt -u Alice -o alice.json
    chatstats chat.txt -f csv -o tables/ --after 2024-01-01
    chatstats chat.txt --stopwords stop_hinglish.txt --exclude \"Meta AI\"
    chatstats chat.txt --list-participants")]
pub struct Args {
    /// Path to the exported transcript (.txt)
    pub input: PathBuf,

    /// Output file (json) or directory (csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Participant to analyze, or "Overall" for everyone
    #[arg(short, long, value_name = "USER", default_value = "Overall")]
    pub user: String,

    /// Keep messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Stopword list: whitespace-separated words, '#' comments
    #[arg(long, value_name = "FILE")]
    pub stopwords: Option<PathBuf>,

    /// JSON analysis configuration; flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Bot or system account to leave out of ranking and latency (repeatable)
    #[arg(long = "exclude", value_name = "SENDER")]
    pub exclude: Vec<String>,

    /// Gaps of at least this many minutes are not replies
    #[arg(long, value_name = "MIN")]
    pub latency_cap: Option<f64>,

    /// How undefined latencies appear in tables
    #[arg(long, value_enum)]
    pub null_policy: Option<NullPolicy>,

    /// Order of day and month in timestamps
    #[arg(long, value_enum, default_value = "auto")]
    pub date_order: DateOrder,

    /// Rows in the most-common-words table
    #[arg(long, value_name = "N")]
    pub top_words: Option<usize>,

    /// Rows in the emoji table
    #[arg(long, value_name = "N")]
    pub top_emoji: Option<usize>,

    /// Print the participant list and exit
    #[arg(long)]
    pub list_participants: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Transcript parser settings.
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::new().with_date_order(self.date_order)
    }

    /// Analysis settings: `--config` file first, then flag overrides.
    pub fn analysis_config(&self) -> Result<AnalysisConfig, ChatstatsError> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_json_file(path)?,
            None => AnalysisConfig::default(),
        };

        for sender in &self.exclude {
            if !config.is_excluded(sender) {
                config = config.with_excluded_sender(sender.clone());
            }
        }
        if let Some(cap) = self.latency_cap {
            config = config.with_latency_cap(cap);
        }
        if let Some(policy) = self.null_policy {
            config = config.with_null_policy(policy);
        }
        if let Some(n) = self.top_words {
            config = config.with_top_words(n);
        }
        if let Some(n) = self.top_emoji {
            config = config.with_top_emoji(n);
        }

        config.validate()?;
        Ok(config)
    }

    /// Participant and date range.
    pub fn filter_config(&self) -> Result<FilterConfig, ChatstatsError> {
        let mut filter = FilterConfig::new().with_participant(self.user.clone());
        if let Some(after) = &self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(before) = &self.before {
            filter = filter.with_date_to(before)?;
        }
        Ok(filter)
    }

    /// Loads `--stopwords`, or an empty set.
    pub fn stopwords(&self) -> Result<Stopwords, ChatstatsError> {
        match &self.stopwords {
            Some(path) => Stopwords::load(path),
            None => Ok(Stopwords::new()),
        }
    }

    /// `--output`, or the format's default path.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.format.default_output()))
    }
}
