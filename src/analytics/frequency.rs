//! Word and emoji frequency tables.
//!
//! Counts are ordered by descending frequency; equal counts keep the order in
//! which the items were first seen in the log.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use crate::Message;
use crate::analytics::filter::Participant;
use crate::classify::{MessageKind, Stopwords, clean_corpus};
use crate::config::Markers;
use crate::emoji::{emoji_chars, is_emoji_token};

/// One row of a word-frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// One row of the emoji table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmojiCount {
    pub emoji: String,
    pub count: usize,
}

/// Stable frequency count: first-seen order, then a stable sort by count.
fn ranked<T, I>(items: I) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut index: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<(T, usize)> = Vec::new();
    for item in items {
        match index.get(&item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn word_rows<I: IntoIterator<Item = String>>(tokens: I, limit: usize) -> Vec<WordCount> {
    let mut rows = ranked(tokens);
    rows.truncate(limit);
    rows.into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect()
}

/// Most common cleaned words, emoji-only tokens excluded.
///
/// # Example
///
/// ```
/// use chatstats::analytics::{Participant, top_words};
/// use chatstats::classify::Stopwords;
/// use chatstats::config::Markers;
///
/// let log = chatstats::parse(
///     "1/2/24, 9:00 - Alice: pizza tonight? 🍕\n1/2/24, 9:01 - Bob: pizza yes!",
/// )?;
/// let words = top_words(&Participant::Overall, &log, &Stopwords::new(), &Markers::default(), 20);
///
/// assert_eq!(words[0].word, "pizza");
/// assert_eq!(words[0].count, 2);
/// assert!(words.iter().all(|w| w.word != "🍕"));
/// # Ok::<(), chatstats::ChatstatsError>(())
/// ```
pub fn top_words(
    participant: &Participant,
    records: &[Message],
    stopwords: &Stopwords,
    markers: &Markers,
    limit: usize,
) -> Vec<WordCount> {
    let tokens = clean_corpus(participant.select(records), stopwords, markers)
        .filter(|token| !is_emoji_token(token));
    word_rows(tokens, limit)
}

/// Token frequencies for a word-cloud renderer. Emoji tokens are kept.
pub fn word_cloud_frequencies(
    participant: &Participant,
    records: &[Message],
    stopwords: &Stopwords,
    markers: &Markers,
    max_words: usize,
) -> Vec<WordCount> {
    word_rows(clean_corpus(participant.select(records), stopwords, markers), max_words)
}

/// Most frequent emoji over raw bodies.
///
/// Notifications, media placeholders and deleted markers are skipped. Each
/// emoji code point counts separately, so a skin-toned thumb adds one to the
/// thumb and one to the tone.
pub fn top_emoji(
    participant: &Participant,
    records: &[Message],
    markers: &Markers,
    limit: usize,
) -> Vec<EmojiCount> {
    let emoji = participant
        .select(records)
        .filter(|msg| {
            !matches!(
                markers.classify(msg),
                MessageKind::Notification | MessageKind::Media | MessageKind::Deleted
            )
        })
        .flat_map(|msg| emoji_chars(msg.text()));

    let mut rows = ranked(emoji);
    rows.truncate(limit);
    rows.into_iter()
        .map(|(c, count)| EmojiCount {
            emoji: c.to_string(),
            count,
        })
        .collect()
}
