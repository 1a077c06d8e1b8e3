//! Output format types.
//!
//! These types don't depend on CLI frameworks; with the `cli` feature
//! [`OutputFormat`] also implements `clap::ValueEnum`.
//!
//! # Example
//!
//! ```rust
//! use chatstats::format::OutputFormat;
//!
//! let format: OutputFormat = "csv".parse().unwrap();
//! assert_eq!(format, OutputFormat::Csv);
//! assert!(format.is_directory());
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChatstatsError;
use crate::report::AnalysisReport;

/// How a report is written.
///
/// - [`Json`](OutputFormat::Json) - one document with every table
/// - [`Csv`](OutputFormat::Csv) - a directory with one file per table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Pretty-printed JSON (default)
    #[default]
    Json,

    /// One CSV file per table
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    /// Returns `true` if the output path names a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self, OutputFormat::Csv)
    }

    /// Default output path for this format.
    pub fn default_output(&self) -> &'static str {
        match self {
            OutputFormat::Json => "chat_report.json",
            OutputFormat::Csv => "chat_report",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["json", "csv"]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes `report` to `path` in `format`.
///
/// For [`OutputFormat::Csv`], `path` is a directory that is created if
/// missing.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_report(
    report: &AnalysisReport,
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<(), ChatstatsError> {
    let path = path.as_ref();
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::output::write_json(report, path),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::output::write_csv_dir(report, path).map(|_| ()),
        #[allow(unreachable_patterns)]
        _ => Err(ChatstatsError::invalid_config(format!(
            "output format {} requires the '{}-output' feature to be enabled",
            format,
            format.extension()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("CSV").unwrap(), OutputFormat::Csv);
        assert!(OutputFormat::from_str("jsonl").is_err());
    }

    #[test]
    fn test_format_display_and_paths() {
        assert_eq!(OutputFormat::Csv.to_string(), "CSV");
        assert_eq!(OutputFormat::Json.extension(), "json");
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
        assert_eq!(OutputFormat::Json.default_output(), "chat_report.json");
        assert!(!OutputFormat::Json.is_directory());
    }

    #[test]
    fn test_format_serde() {
        let json = serde_json::to_string(&OutputFormat::Csv).unwrap();
        assert_eq!(json, "\"csv\"");
        let parsed: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(parsed, OutputFormat::Json);
    }

    #[cfg(all(feature = "csv-output", feature = "json-output"))]
    #[test]
    fn test_write_report_both_formats() {
        use crate::analytics::FilterConfig;
        use crate::classify::Stopwords;
        use crate::config::AnalysisConfig;

        let log = crate::parse("1/2/24, 9:00 - Alice: hi").unwrap();
        let report = crate::report::analyze(
            &log,
            &FilterConfig::new(),
            &AnalysisConfig::default(),
            &Stopwords::new(),
        );
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("r.json");
        write_report(&report, &json_path, OutputFormat::Json).unwrap();
        assert!(json_path.is_file());

        let csv_dir = dir.path().join("tables");
        write_report(&report, &csv_dir, OutputFormat::Csv).unwrap();
        assert!(csv_dir.join("summary.csv").is_file());
    }
}
