//! Message classification and text cleaning.
//!
//! Word statistics only look at real text: notifications, media placeholders,
//! deleted-message markers and empty bodies are classified out first, then
//! each remaining body is stripped of URLs, long digit runs (phone-number
//! mentions) and HTML-like tags, tokenized on whitespace, and filtered
//! against punctuation and a caller-supplied stopword set.
//!
//! # Example
//!
//! ```rust
//! use chatstats::classify::{Stopwords, clean_corpus};
//! use chatstats::config::Markers;
//!
//! let messages = chatstats::parse(
//!     "1/2/24, 9:00 - Alice: See https://example.com NOW !\n\
//!      1/2/24, 9:01 - Bob: <Media omitted>",
//! )?;
//! let stopwords = Stopwords::from_text("see\n");
//!
//! let tokens: Vec<String> = clean_corpus(&messages, &stopwords, &Markers::default()).collect();
//! assert_eq!(tokens, vec!["now"]);
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::Markers;
use crate::error::ChatstatsError;
use crate::message::Message;

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+").expect("url pattern is valid"));

static LONG_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@?\d{10,}").expect("number pattern is valid"));

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<>]*>").expect("tag pattern is valid"));

/// Non-ASCII punctuation common in chat text.
const EXTRA_PUNCTUATION: &[char] = &[
    '…', '–', '—', '‘', '’', '“', '”', '«', '»', '¿', '¡', '·', '•', '„', '‹', '›', '、', '。',
    '，', '！', '？',
];

/// What a message is, for the purpose of text statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// System line (`group_notification` sender)
    Notification,
    /// Media placeholder body
    Media,
    /// Deleted-message marker
    Deleted,
    /// Empty body or the literal `null`
    Empty,
    /// Everything else
    Text,
}

impl Markers {
    /// Classifies a message. Checks run in the order of [`MessageKind`].
    pub fn classify(&self, msg: &Message) -> MessageKind {
        let body = msg.text().trim();
        if msg.is_notification() {
            MessageKind::Notification
        } else if self.is_media(body) {
            MessageKind::Media
        } else if self.is_deleted(body) {
            MessageKind::Deleted
        } else if body.is_empty() || body == "null" {
            MessageKind::Empty
        } else {
            MessageKind::Text
        }
    }

    /// Returns `true` if the (trimmed) body is the media placeholder.
    pub fn is_media(&self, body: &str) -> bool {
        body.trim() == self.media
    }

    /// Returns `true` if the (trimmed) body is a deleted-message marker.
    pub fn is_deleted(&self, body: &str) -> bool {
        let body = body.trim();
        self.deleted.iter().any(|d| d == body)
    }
}

/// An immutable, case-folded stopword set.
///
/// Load it once and pass it by reference; nothing in the crate mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from individual words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Parses a word list: whitespace-separated entries, `#` starts a comment.
    pub fn from_text(text: &str) -> Self {
        Self::from_words(
            text.lines()
                .map(|line| line.split('#').next().unwrap_or_default())
                .flat_map(str::split_whitespace),
        )
    }

    /// Reads a word list file. Invalid UTF-8 is replaced, not rejected.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChatstatsError> {
        let bytes = fs::read(path)?;
        Ok(Self::from_text(&String::from_utf8_lossy(&bytes)))
    }

    /// Returns `true` if the case-folded `word` is a stopword.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Returns `true` if every char of `token` is punctuation.
pub fn is_punctuation(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_punctuation() || EXTRA_PUNCTUATION.contains(&c))
}

/// Cleans one body into lower-cased tokens.
pub fn clean_tokens(text: &str, stopwords: &Stopwords) -> Vec<String> {
    let text = URL.replace_all(text, " ");
    let text = LONG_NUMBER.replace_all(&text, " ");
    let mut text = text.into_owned();
    // Removing an inner tag can expose an outer one.
    while TAG.is_match(&text) {
        text = TAG.replace_all(&text, " ").into_owned();
    }

    text.split_whitespace()
        .filter(|token| !is_punctuation(token))
        .map(str::to_lowercase)
        .filter(|token| !stopwords.contains(token))
        .collect()
}

/// Cleans one body into a single space-separated string.
pub fn clean_text(text: &str, stopwords: &Stopwords) -> String {
    clean_tokens(text, stopwords).join(" ")
}

/// Lazily yields the cleaned tokens of every [`MessageKind::Text`] record.
pub fn clean_corpus<'a, I>(
    records: I,
    stopwords: &'a Stopwords,
    markers: &'a Markers,
) -> impl Iterator<Item = String> + 'a
where
    I: IntoIterator<Item = &'a Message>,
    I::IntoIter: 'a,
{
    records
        .into_iter()
        .filter(move |msg| markers.classify(msg) == MessageKind::Text)
        .flat_map(move |msg| clean_tokens(msg.text(), stopwords))
}
