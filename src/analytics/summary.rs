//! Headline counts for a participant.

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::analytics::filter::Participant;
use crate::config::Markers;

/// Top-of-dashboard statistics.
///
/// Word counts are taken over raw bodies, so a media placeholder contributes
/// its literal words (`"<Media omitted>"` is two).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Records in scope
    pub messages: usize,
    /// Whitespace-separated words across all bodies
    pub words: usize,
    /// Media placeholders
    pub media: usize,
    /// Messages containing `http` (one per message)
    pub links: usize,
    /// Deleted-message markers
    pub deleted: usize,
}

/// Computes [`SummaryStats`] for `participant`.
///
/// # Example
///
/// ```
/// use chatstats::analytics::{Participant, summary};
/// use chatstats::config::Markers;
///
/// let log = chatstats::parse(
///     "1/2/24, 9:00 - Alice: see http://a.io and https://b.io\n\
///      1/2/24, 9:01 - Bob: <Media omitted>",
/// )?;
/// let stats = summary(&Participant::Overall, &log, &Markers::default());
///
/// assert_eq!(stats.messages, 2);
/// assert_eq!(stats.links, 1);
/// assert_eq!(stats.media, 1);
/// # Ok::<(), chatstats::ChatstatsError>(())
/// ```
pub fn summary(participant: &Participant, records: &[Message], markers: &Markers) -> SummaryStats {
    participant
        .select(records)
        .fold(SummaryStats::default(), |mut stats, msg| {
            stats.messages += 1;
            stats.words += msg.word_count();
            if markers.is_media(msg.text()) {
                stats.media += 1;
            }
            if markers.is_deleted(msg.text()) {
                stats.deleted += 1;
            }
            if msg.text().contains("http") {
                stats.links += 1;
            }
            stats
        })
}
