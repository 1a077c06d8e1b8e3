//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::ChatstatsError;
use crate::report::AnalysisReport;

/// Writes the report to a JSON file.
///
/// # Format
/// ```json
/// {
///   "participant": "Overall",
///   "summary": {"messages": 3, "words": 4, ...},
///   "daily": [{"date": "2024-01-02", "messages": 3}],
///   ...
/// }
/// ```
pub fn write_json(
    report: &AnalysisReport,
    output_path: impl AsRef<Path>,
) -> Result<(), ChatstatsError> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Converts the report to a pretty-printed JSON string.
///
/// Same format as `write_json`, but returns a String instead of writing to file.
pub fn to_json(report: &AnalysisReport) -> Result<String, ChatstatsError> {
    Ok(serde_json::to_string_pretty(report)?)
}
