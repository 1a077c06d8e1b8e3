//! Report writers.
//!
//! - [`write_json`] / [`to_json`] - the whole [`AnalysisReport`] as one
//!   pretty-printed document - requires `json-output` feature
//! - [`write_csv_dir`] / [`to_csv`] - one CSV file per table in a directory -
//!   requires `csv-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatstats::Result<()> {
//! use chatstats::analytics::FilterConfig;
//! use chatstats::classify::Stopwords;
//! use chatstats::config::AnalysisConfig;
//! use chatstats::output::{write_csv_dir, write_json};
//! use chatstats::report::analyze;
//!
//! let log = chatstats::parse("1/2/24, 9:00 - Alice: hi\n1/2/24, 9:01 - Bob: hey")?;
//! let report = analyze(&log, &FilterConfig::new(), &AnalysisConfig::default(), &Stopwords::new());
//!
//! write_json(&report, "report.json")?;
//! let files = write_csv_dir(&report, "report_tables")?;
//! assert_eq!(files.len(), 15);
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```
//!
//! [`AnalysisReport`]: crate::report::AnalysisReport

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{CSV_TABLES, to_csv, write_csv_dir};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
