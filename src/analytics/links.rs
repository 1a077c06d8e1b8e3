//! Shared-link extraction.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::Message;
use crate::analytics::filter::Participant;

static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bhttps?://[^\s<>"]+"#).expect("link pattern is valid")
});

/// Punctuation that usually closes a sentence rather than a URL.
const TRAILING: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '}', '\'', '*', '_'];

/// One link occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRow {
    pub date: NaiveDate,
    pub url: String,
}

/// Every URL in every body in scope, one row per occurrence, log order.
///
/// # Example
///
/// ```
/// use chatstats::analytics::{Participant, extract_links};
///
/// let log = chatstats::parse(
///     "1/2/24, 9:00 - Alice: docs at https://a.io/x, mirror http://b.io.",
/// )?;
/// let links = extract_links(&Participant::Overall, &log);
///
/// let urls: Vec<_> = links.iter().map(|l| l.url.as_str()).collect();
/// assert_eq!(urls, ["https://a.io/x", "http://b.io"]);
/// # Ok::<(), chatstats::ChatstatsError>(())
/// ```
pub fn extract_links(participant: &Participant, records: &[Message]) -> Vec<LinkRow> {
    participant
        .select(records)
        .flat_map(|msg| {
            LINK.find_iter(msg.text()).filter_map(move |m| {
                let url = m.as_str().trim_end_matches(TRAILING);
                let has_host = url.split_once("://").is_some_and(|(_, rest)| !rest.is_empty());
                has_host.then(|| LinkRow {
                    date: msg.date(),
                    url: url.to_string(),
                })
            })
        })
        .collect()
}
