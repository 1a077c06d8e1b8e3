//! Aggregations over a parsed log.
//!
//! Every function borrows `&[Message]` and returns plain, serializable rows;
//! none of them mutates the log or fails on an empty selection.
//!
//! - [`filter`] - [`Participant`], [`DateRange`], [`FilterConfig`]
//! - [`summary`](mod@summary) - headline counts
//! - [`timeline`] - daily, monthly, hourly, weekday and heatmap tables
//! - [`frequency`] - word, word-cloud and emoji tables
//! - [`ranking`] - most / least active participants
//! - [`links`] - shared URLs
//! - [`latency`] - response times and their means
//!
//! [`Message`]: crate::Message

pub mod filter;
pub mod frequency;
pub mod latency;
pub mod links;
pub mod ranking;
pub mod summary;
pub mod timeline;

pub use filter::{DateRange, FilterConfig, Participant, apply_date_range, filter_participant};
pub use frequency::{EmojiCount, WordCount, top_emoji, top_words, word_cloud_frequencies};
pub use latency::{
    LatencyMean, ResponseTime, mean_by_sender, mean_by_weekday, response_times,
    weekend_vs_weekday,
};
pub use links::{LinkRow, extract_links};
pub use ranking::{ParticipantCount, SortOrder, participant_ranking, participants};
pub use summary::{SummaryStats, summary};
pub use timeline::{
    ActivityHeatmap, DailyCount, HeatmapCell, HourCount, HourlyDistribution, MonthlyCount,
    WeekdayCount, activity_heatmap, busiest_day, busiest_month, daily_timeline,
    hourly_distribution, monthly_timeline, weekday_activity,
};
