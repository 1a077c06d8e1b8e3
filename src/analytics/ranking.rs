//! Most / least active participants.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Message;

/// Direction of a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most active first.
    #[default]
    Descending,
    /// Least active first.
    Ascending,
}

/// One participant's share of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantCount {
    pub sender: String,
    pub messages: usize,
    /// Percent of all ranked messages, two decimals
    pub share: f64,
}

fn is_ranked(msg: &Message, excluded: &[String]) -> bool {
    !msg.is_notification() && !excluded.iter().any(|s| s == msg.sender())
}

/// Per-sender message counts over the whole log.
///
/// System lines and `excluded` accounts are left out. Equal counts keep the
/// order in which senders first appear.
pub fn participant_ranking(
    records: &[Message],
    excluded: &[String],
    order: SortOrder,
) -> Vec<ParticipantCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for msg in records.iter().filter(|m| is_ranked(m, excluded)) {
        match index.get(msg.sender()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(msg.sender(), counts.len());
                counts.push((msg.sender(), 1));
            }
        }
    }

    match order {
        SortOrder::Descending => counts.sort_by(|a, b| b.1.cmp(&a.1)),
        SortOrder::Ascending => counts.sort_by(|a, b| a.1.cmp(&b.1)),
    }

    let total: usize = counts.iter().map(|(_, n)| n).sum();
    counts
        .into_iter()
        .map(|(sender, messages)| ParticipantCount {
            sender: sender.to_string(),
            messages,
            share: (messages as f64 * 100.0 / total as f64 * 100.0).round() / 100.0,
        })
        .collect()
}

/// Sorted unique human senders, for a participant picker.
pub fn participants(records: &[Message], excluded: &[String]) -> Vec<String> {
    let mut names: Vec<String> = records
        .iter()
        .filter(|m| is_ranked(m, excluded))
        .map(|m| m.sender().to_string())
        .collect();
    names.sort();
    names.dedup();
    names
}
