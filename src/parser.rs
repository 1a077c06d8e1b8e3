//! WhatsApp transcript parser.
//!
//! Turns the raw text of an exported chat into an ordered `Vec<Message>`.
//!
//! Supported stamp layouts:
//! - Android 24h: `1/15/24, 10:30 - Sender: Message`
//! - Android 12h: `1/15/24, 10:30 PM - Sender: Message` (space, U+00A0 or U+202F before the meridiem)
//! - iOS: `[1/15/24, 10:30:45 AM] Sender: Message`
//!
//! Day-first exports (`15/01/2024, 10:30 - ...`) are handled through
//! [`DateOrder`].
//!
//! # Example
//!
//! ```rust
//! use chatstats::parser::TranscriptParser;
//!
//! let raw = "1/2/24, 9:00 - Alice: hello\n\
//!            1/2/24, 9:05 - Bob: hi there\n\
//!            still Bob\n\
//!            1/2/24, 9:06 - Alice added Carol";
//!
//! let messages = TranscriptParser::new().parse_str(raw)?;
//! assert_eq!(messages.len(), 3);
//! assert_eq!(messages[1].text(), "hi there\nstill Bob");
//! assert!(messages[2].is_notification());
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::{Captures, Regex};
use tracing::{debug, info, warn};

use crate::config::{DateOrder, ParserConfig};
use crate::error::{ChatstatsError, ParseErrorKind};
use crate::message::Message;

/// Stamp prefix at the start of a line, including its delimiter.
static STAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\[?(?P<date>\d{1,2}/\d{1,2}/\d{2,4}),?\s(?P<time>\d{1,2}:\d{2}(?::\d{2})?)(?:[ \x{00A0}\x{202F}]?(?P<meridiem>[AaPp]\.?\s?[Mm]\.?))?(?:\]\s?|\s-\s)",
    )
    .expect("stamp pattern is valid")
});

/// Invisible marks some exports put in front of a stamp.
const LEADING_MARKS: [char; 3] = ['\u{200E}', '\u{200F}', '\u{FEFF}'];

/// Parser for WhatsApp TXT exports.
///
/// Parsing is a pure function of the input text: the same transcript always
/// yields the same records.
#[derive(Debug, Clone, Default)]
pub struct TranscriptParser {
    config: ParserConfig,
}

impl TranscriptParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Reads and parses a transcript file.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    pub fn parse(&self, path: &Path) -> Result<Vec<Message>, ChatstatsError> {
        let bytes = fs::read(path)?;
        self.parse_bytes(&bytes).map_err(|e| e.with_path(path))
    }

    /// Parses raw transcript bytes, substituting invalid UTF-8.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Vec<Message>, ChatstatsError> {
        let content = String::from_utf8_lossy(bytes);
        self.parse_str(&content)
    }

    /// Parses a transcript held in memory.
    pub fn parse_str(&self, content: &str) -> Result<Vec<Message>, ChatstatsError> {
        let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
        let order = match self.config.date_order {
            DateOrder::Auto => detect_date_order(content),
            fixed => fixed,
        };

        let mut state = State::AwaitingTimestamp;
        let mut messages: Vec<Message> = Vec::new();
        let mut preamble = 0usize;

        for (idx, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim_start_matches(LEADING_MARKS);

            let Some(caps) = STAMP.captures(line) else {
                match &mut state {
                    State::AwaitingTimestamp => preamble += 1,
                    State::Accumulating(entry) => entry.push_line(raw_line),
                }
                continue;
            };

            let timestamp = parse_stamp(&caps, order).ok_or_else(|| {
                ChatstatsError::transcript_parse(
                    ParseErrorKind::InvalidTimestamp {
                        line: idx + 1,
                        stamp: caps[0].trim_end_matches([' ', '-', ']']).trim().to_string(),
                    },
                    None,
                )
            })?;

            let payload = &line[caps[0].len()..];
            let next = State::Accumulating(Entry::new(timestamp, payload));
            if let State::Accumulating(done) = std::mem::replace(&mut state, next) {
                messages.push(done.finish());
            }
        }

        if let State::Accumulating(done) = state {
            messages.push(done.finish());
        }

        if messages.is_empty() {
            return Err(ChatstatsError::transcript_parse(
                ParseErrorKind::NoTimestamps,
                None,
            ));
        }

        if preamble > 0 {
            debug!(lines = preamble, "discarded lines before the first timestamp");
        }

        let out_of_order = messages
            .windows(2)
            .filter(|pair| pair[1].timestamp() < pair[0].timestamp())
            .count();
        if out_of_order > 0 {
            warn!(
                count = out_of_order,
                "transcript timestamps go backwards; keeping source order"
            );
        }

        info!(messages = messages.len(), ?order, "parsed transcript");
        Ok(messages)
    }
}

/// Parses a transcript with the default configuration.
///
/// ```rust
/// let messages = chatstats::parse("12/31/23, 11:59 PM - Alice: happy new year")?;
/// assert_eq!(messages[0].hour(), 23);
/// # Ok::<(), chatstats::ChatstatsError>(())
/// ```
pub fn parse(content: &str) -> Result<Vec<Message>, ChatstatsError> {
    TranscriptParser::new().parse_str(content)
}

// ============================================================================
// State machine
// ============================================================================

enum State {
    AwaitingTimestamp,
    Accumulating(Entry),
}

/// An entry whose payload is still being collected.
struct Entry {
    timestamp: NaiveDateTime,
    payload: String,
}

impl Entry {
    fn new(timestamp: NaiveDateTime, first_line: &str) -> Self {
        Self {
            timestamp,
            payload: first_line.to_string(),
        }
    }

    fn push_line(&mut self, line: &str) {
        self.payload.push('\n');
        self.payload.push_str(line);
    }

    fn finish(mut self) -> Message {
        let end = self.payload.trim_end_matches(['\n', '\r']).len();
        self.payload.truncate(end);

        match split_sender(&self.payload) {
            Some((sender, text)) => Message::new(self.timestamp, sender, text),
            None => Message::notification(self.timestamp, self.payload),
        }
    }
}

/// Splits `"<sender>: <text>"` at the leftmost colon on the first line that
/// is followed by whitespace.
///
/// Returns `None` for payloads without such a colon, or with an empty sender.
fn split_sender(payload: &str) -> Option<(&str, &str)> {
    let first_line = payload.split('\n').next().unwrap_or_default();

    for (i, _) in first_line.match_indices(':') {
        let rest = &payload[i + 1..];
        let text = match rest.chars().next() {
            // A trailing colon is part of a system line such as "changed the subject to:"
            None => return None,
            Some(c) if c.is_whitespace() => &rest[c.len_utf8()..],
            Some(_) => continue,
        };
        let sender = payload[..i].trim();
        if sender.is_empty() {
            return None;
        }
        return Some((sender, text));
    }

    None
}

// ============================================================================
// Timestamps
// ============================================================================

/// Picks day-first if any stamp has a first field above 12.
fn detect_date_order(content: &str) -> DateOrder {
    let mut month_first_evidence = false;

    for line in content.lines() {
        let Some(caps) = STAMP.captures(line.trim_start_matches(LEADING_MARKS)) else {
            continue;
        };
        let mut fields = caps["date"].split('/').map(|f| f.parse::<u32>().unwrap_or(0));
        let first = fields.next().unwrap_or(0);
        let second = fields.next().unwrap_or(0);

        if first > 12 {
            return DateOrder::DayFirst;
        }
        if second > 12 {
            month_first_evidence = true;
        }
    }

    if !month_first_evidence {
        debug!("date order is ambiguous; assuming month-first");
    }
    DateOrder::MonthFirst
}

/// chrono formats to try for a stamp, most specific first.
fn date_parse_formats(order: DateOrder, meridiem: bool) -> &'static [&'static str] {
    match (order, meridiem) {
        (DateOrder::DayFirst, true) => &[
            "%d/%m/%y, %I:%M:%S %p",
            "%d/%m/%y, %I:%M %p",
            "%d/%m/%Y, %I:%M:%S %p",
            "%d/%m/%Y, %I:%M %p",
        ],
        (DateOrder::DayFirst, false) => &[
            "%d/%m/%y, %H:%M:%S",
            "%d/%m/%y, %H:%M",
            "%d/%m/%Y, %H:%M:%S",
            "%d/%m/%Y, %H:%M",
        ],
        (_, true) => &[
            "%m/%d/%y, %I:%M:%S %p",
            "%m/%d/%y, %I:%M %p",
            "%m/%d/%Y, %I:%M:%S %p",
            "%m/%d/%Y, %I:%M %p",
        ],
        (_, false) => &[
            "%m/%d/%y, %H:%M:%S",
            "%m/%d/%y, %H:%M",
            "%m/%d/%Y, %H:%M:%S",
            "%m/%d/%Y, %H:%M",
        ],
    }
}

fn parse_stamp(caps: &Captures<'_>, order: DateOrder) -> Option<NaiveDateTime> {
    let meridiem = caps.name("meridiem").map(|m| {
        m.as_str()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_ascii_uppercase()
    });

    let stamp = match &meridiem {
        Some(m) => format!("{}, {} {}", &caps["date"], &caps["time"], m),
        None => format!("{}, {}", &caps["date"], &caps["time"]),
    };

    date_parse_formats(order, meridiem.is_some())
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&stamp, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::GROUP_NOTIFICATION;
    use chrono::{NaiveDate, Timelike};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_basic_24h() {
        let raw = "1/2/24, 9:00 - Alice: hello\n1/2/24, 9:05 - Bob: hi there";
        let messages = parse(raw).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].timestamp(), at(2024, 1, 2, 9, 0));
        assert_eq!(messages[0].sender(), "Alice");
        assert_eq!(messages[0].text(), "hello");
        assert_eq!(messages[1].sender(), "Bob");
        assert_eq!(messages[1].text(), "hi there");
    }

    #[test]
    fn test_parse_12h_with_narrow_nbsp() {
        let raw = "1/2/24, 9:00\u{202F}PM - Alice: evening\n1/2/24, 12:15\u{202F}AM - Bob: late";
        let messages = parse(raw).unwrap();
        assert_eq!(messages[0].timestamp(), at(2024, 1, 2, 21, 0));
        assert_eq!(messages[1].hour(), 0);
        assert_eq!(messages[1].timestamp().minute(), 15);
    }

    #[test]
    fn test_parse_lowercase_dotted_meridiem() {
        let messages = parse("3/4/2024, 7:45 p.m. - Alice: dinner?").unwrap();
        assert_eq!(messages[0].timestamp(), at(2024, 3, 4, 19, 45));
        assert_eq!(messages[0].text(), "dinner?");
    }

    #[test]
    fn test_parse_ios_bracketed() {
        let raw = "[1/15/24, 10:30:45 AM] Alice: Hello\n[1/15/24, 10:31:00 AM] Bob: Hi";
        let messages = parse(raw).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender(), "Alice");
        assert_eq!(messages[0].timestamp().second(), 45);
    }

    #[test]
    fn test_multiline_accumulates() {
        let raw = "1/2/24, 9:00 - Alice: line one\nline two\n\nline four\n1/2/24, 9:01 - Bob: ok\n\n";
        let messages = parse(raw).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text(), "line one\nline two\n\nline four");
        assert_eq!(messages[1].text(), "ok");
    }

    #[test]
    fn test_trailing_record_kept() {
        let raw = "1/2/24, 9:00 - Alice: first\n1/2/24, 9:01 - Bob: last\nwith tail";
        let messages = parse(raw).unwrap();
        assert_eq!(messages.last().unwrap().text(), "last\nwith tail");
    }

    #[test]
    fn test_notification_without_delimiter() {
        let messages = parse("1/2/24, 9:10 - Alice added Bob").unwrap();
        assert_eq!(messages[0].sender(), GROUP_NOTIFICATION);
        assert_eq!(messages[0].text(), "Alice added Bob");
    }

    #[test]
    fn test_sender_with_colon_uses_first_delimiter() {
        let messages = parse("1/2/24, 9:10 - Team:Ops: deploy at 10: ok?").unwrap();
        assert_eq!(messages[0].sender(), "Team:Ops");
        assert_eq!(messages[0].text(), "deploy at 10: ok?");
    }

    #[test]
    fn test_colon_on_later_line_is_not_a_sender() {
        let messages = parse("1/2/24, 9:10 - Alice changed the group name\nNote: hi").unwrap();
        assert!(messages[0].is_notification());
        assert_eq!(messages[0].text(), "Alice changed the group name\nNote: hi");
    }

    #[test]
    fn test_sender_colon_at_end_of_first_line() {
        let messages = parse("1/2/24, 9:10 - Alice:\nmultiline body").unwrap();
        assert_eq!(messages[0].sender(), "Alice");
        assert_eq!(messages[0].text(), "multiline body");
    }

    #[test]
    fn test_preamble_lines_discarded() {
        let raw = "Chat export\n-----\n1/2/24, 9:00 - Alice: hello";
        let messages = parse(raw).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text(), "hello");
    }

    #[test]
    fn test_no_timestamps_is_error() {
        let err = parse("just some text\nwith no stamps").unwrap_err();
        assert_eq!(err.parse_kind(), Some(&ParseErrorKind::NoTimestamps));

        assert!(parse("").unwrap_err().is_parse());
    }

    #[test]
    fn test_invalid_date_is_error() {
        let raw = "1/2/24, 9:00 - Alice: ok\n2/30/24, 9:00 - Bob: no such day";
        let err = parse(raw).unwrap_err();
        assert!(matches!(
            err.parse_kind(),
            Some(ParseErrorKind::InvalidTimestamp { line: 2, .. })
        ));
    }

    #[test]
    fn test_invalid_hour_is_error() {
        let err = parse("1/2/24, 25:00 - Alice: too late").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_auto_detects_day_first() {
        let raw = "15/01/2024, 10:30 - Alice: hi\n02/03/2024, 10:31 - Bob: hey";
        let messages = parse(raw).unwrap();
        assert_eq!(messages[0].date(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(messages[1].date(), NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }

    #[test]
    fn test_explicit_month_first_rejects_day_first_input() {
        let parser = TranscriptParser::with_config(
            ParserConfig::new().with_date_order(DateOrder::MonthFirst),
        );
        assert!(parser.parse_str("15/01/2024, 10:30 - Alice: hi").is_err());
    }

    #[test]
    fn test_parse_bytes_tolerates_invalid_utf8() {
        let mut bytes = b"1/2/24, 9:00 - Alice: caf".to_vec();
        bytes.push(0xFF);
        let messages = TranscriptParser::new().parse_bytes(&bytes).unwrap();
        assert!(messages[0].text().starts_with("caf"));
        assert!(messages[0].text().contains('\u{FFFD}'));
    }

    #[test]
    fn test_bom_and_lrm_marks() {
        let raw = "\u{FEFF}1/2/24, 9:00 - Alice: hi\n\u{200E}1/2/24, 9:01 - Bob: yo";
        let messages = parse(raw).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].sender(), "Bob");
    }

    #[test]
    fn test_crlf_line_endings() {
        let raw = "1/2/24, 9:00 - Alice: hi\r\nsecond\r\n1/2/24, 9:01 - Bob: yo\r\n";
        let messages = parse(raw).unwrap();
        assert_eq!(messages[0].text(), "hi\nsecond");
        assert_eq!(messages[1].text(), "yo");
    }

    #[test]
    fn test_split_sender_edge_cases() {
        assert_eq!(split_sender("Alice: hi"), Some(("Alice", "hi")));
        assert_eq!(split_sender("Alice:"), None);
        assert_eq!(split_sender("Alice: "), Some(("Alice", "")));
        assert_eq!(split_sender("Alice:\nsecond"), Some(("Alice", "second")));
        assert_eq!(split_sender(": hi"), None);
        assert_eq!(split_sender("http://x.y no sender"), None);
        assert_eq!(split_sender(""), None);
    }

    #[test]
    fn test_trailing_colon_line_is_notification() {
        let raw = "1/2/24, 9:00 - Alice: hi\n1/2/24, 9:10 - Alice changed the subject to:";
        let messages = parse(raw).unwrap();
        assert_eq!(messages.len(), 2);
        assert!(messages[1].is_notification());
        assert_eq!(messages[1].text(), "Alice changed the subject to:");
    }
}
