//! CSV output writer.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ChatstatsError;
use crate::report::AnalysisReport;

/// File stems written by [`write_csv_dir`], in write order.
pub const CSV_TABLES: [&str; 15] = [
    "summary",
    "daily",
    "monthly",
    "hourly",
    "heatmap",
    "weekday",
    "words",
    "word_cloud",
    "emoji",
    "participants",
    "links",
    "response_times",
    "latency_by_sender",
    "latency_by_weekday",
    "latency_weekend",
];

/// Writes every table of `report` as `<dir>/<table>.csv`.
///
/// # Format
/// - Delimiter: `,`
/// - Header row from the row type's field names
/// - Empty tables produce an empty file
/// - Undefined latencies (`omit` policy) are empty cells
///
/// Returns the written paths in [`CSV_TABLES`] order.
pub fn write_csv_dir(
    report: &AnalysisReport,
    dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, ChatstatsError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let [
        summary,
        daily,
        monthly,
        hourly,
        heatmap,
        weekday,
        words,
        word_cloud,
        emoji,
        participants,
        links,
        response_times,
        by_sender,
        by_weekday,
        weekend,
    ] = CSV_TABLES;

    Ok(vec![
        write_table(dir, summary, &[report.summary])?,
        write_table(dir, daily, &report.daily)?,
        write_table(dir, monthly, &report.monthly)?,
        write_table(dir, hourly, &report.hourly)?,
        write_table(dir, heatmap, &report.heatmap)?,
        write_table(dir, weekday, &report.weekday)?,
        write_table(dir, words, &report.top_words)?,
        write_table(dir, word_cloud, &report.word_cloud)?,
        write_table(dir, emoji, &report.emoji)?,
        write_table(dir, participants, &report.participants)?,
        write_table(dir, links, &report.links)?,
        write_table(dir, response_times, &report.response_times)?,
        write_table(dir, by_sender, &report.latency_by_sender)?,
        write_table(dir, by_weekday, &report.latency_by_weekday)?,
        write_table(dir, weekend, &report.latency_weekend)?,
    ])
}

fn write_table<T: Serialize>(
    dir: &Path,
    name: &str,
    rows: &[T],
) -> Result<PathBuf, ChatstatsError> {
    let path = dir.join(format!("{name}.csv"));
    let mut writer = csv::WriterBuilder::new().from_path(&path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(path)
}

/// Converts one table to a CSV string.
///
/// Same format as the files of [`write_csv_dir`].
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<String, ChatstatsError> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::FilterConfig;
    use crate::classify::Stopwords;
    use crate::config::{AnalysisConfig, NullPolicy};
    use crate::report::analyze;

    fn report(policy: NullPolicy) -> AnalysisReport {
        let log = crate::parse(
            "1/2/24, 9:00 - Alice: hello, world\n1/2/24, 9:02 - Bob: hi\n1/2/24, 9:03 - Bob: again",
        )
        .unwrap();
        let config = AnalysisConfig::default().with_null_policy(policy);
        analyze(&log, &FilterConfig::new(), &config, &Stopwords::new())
    }

    #[test]
    fn test_write_csv_dir_writes_every_table() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("tables");
        let files = write_csv_dir(&report(NullPolicy::Zero), &out).unwrap();

        assert_eq!(files.len(), CSV_TABLES.len());
        for name in CSV_TABLES {
            assert!(out.join(format!("{name}.csv")).exists(), "{name}.csv missing");
        }

        let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
        assert!(summary.starts_with("messages,words,media,links,deleted\n"));
        assert!(summary.contains("3,4,0,0,0"));

        let heatmap = fs::read_to_string(out.join("heatmap.csv")).unwrap();
        assert_eq!(heatmap.lines().count(), 1 + 168);
    }

    #[test]
    fn test_null_policy_in_csv() {
        let zero = to_csv(&report(NullPolicy::Zero).response_times).unwrap();
        assert!(zero.starts_with("timestamp,sender,date,weekday,latency_minutes\n"));
        assert!(zero.contains("2024-01-02T09:00:00,Alice,2024-01-02,Tuesday,0.0"));
        assert!(zero.contains("Bob,2024-01-02,Tuesday,2.0"));

        let omit = to_csv(&report(NullPolicy::Omit).response_times).unwrap();
        assert!(omit.contains("2024-01-02T09:00:00,Alice,2024-01-02,Tuesday,\n"));
    }

    #[test]
    fn test_to_csv_quotes_commas() {
        let csv = to_csv(&report(NullPolicy::Zero).top_words).unwrap();
        assert!(csv.starts_with("word,count\n"));
        assert!(csv.contains("\"hello,\",1"));
    }

    #[test]
    fn test_empty_table_is_empty() {
        assert_eq!(to_csv(&report(NullPolicy::Zero).links).unwrap(), "");
    }
}
