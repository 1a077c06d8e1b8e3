//! One-shot analysis: every table for one participant and date range.
//!
//! # Example
//!
//! ```rust
//! use chatstats::analytics::FilterConfig;
//! use chatstats::classify::Stopwords;
//! use chatstats::config::AnalysisConfig;
//! use chatstats::report::analyze;
//!
//! let log = chatstats::parse(
//!     "1/2/24, 9:00 - Alice: lunch?\n1/2/24, 9:03 - Bob: yes 🍕\n1/2/24, 9:04 - Bob: <Media omitted>",
//! )?;
//! let report = analyze(&log, &FilterConfig::new(), &AnalysisConfig::default(), &Stopwords::new());
//!
//! assert_eq!(report.summary.messages, 3);
//! assert_eq!(report.summary.media, 1);
//! assert_eq!(report.heatmap.len(), 168);
//! assert_eq!(report.emoji[0].emoji, "🍕");
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```

use serde::Serialize;
use tracing::info;

use crate::Message;
use crate::analytics::{
    self, DailyCount, DateRange, EmojiCount, FilterConfig, HeatmapCell, HourCount, LatencyMean,
    LinkRow, MonthlyCount, ParticipantCount, ResponseTime, SortOrder, SummaryStats, WeekdayCount,
    WordCount,
};
use crate::classify::Stopwords;
use crate::config::AnalysisConfig;

/// All dashboard tables.
///
/// Latencies in `response_times` already follow the configured null policy:
/// under `zero` an undefined latency reads `0`, under `omit` it is `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// `"Overall"` or the selected sender
    pub participant: String,
    pub range: DateRange,

    pub summary: SummaryStats,
    pub daily: Vec<DailyCount>,
    pub monthly: Vec<MonthlyCount>,
    pub hourly: Vec<HourCount>,
    pub heatmap: Vec<HeatmapCell>,
    pub weekday: Vec<WeekdayCount>,
    pub busiest_day: Option<WeekdayCount>,
    pub busiest_month: Option<MonthlyCount>,

    pub top_words: Vec<WordCount>,
    pub word_cloud: Vec<WordCount>,
    pub emoji: Vec<EmojiCount>,

    /// Whole-log ranking, most active first
    pub participants: Vec<ParticipantCount>,
    pub links: Vec<LinkRow>,

    pub response_times: Vec<ResponseTime>,
    /// Every sender, regardless of the participant filter
    pub latency_by_sender: Vec<LatencyMean>,
    pub latency_by_weekday: Vec<LatencyMean>,
    pub latency_weekend: Vec<LatencyMean>,
}

/// Runs every analytic over `records`.
///
/// The date range is applied first and produces the log every table reads.
/// Participant-scoped tables then look at the selected sender only; the
/// ranking and per-sender latency means always cover everyone.
pub fn analyze(
    records: &[Message],
    filter: &FilterConfig,
    config: &AnalysisConfig,
    stopwords: &Stopwords,
) -> AnalysisReport {
    let log = analytics::apply_date_range(records, &filter.range);
    let who = &filter.participant;
    let markers = &config.markers;
    let policy = config.latency.null_policy;

    let times = analytics::response_times(&log, &config.excluded_senders, &config.latency);
    let scoped_times: Vec<ResponseTime> = times
        .iter()
        .filter(|t| who.is_overall() || t.sender == who.as_str())
        .cloned()
        .collect();

    let report = AnalysisReport {
        participant: who.to_string(),
        range: filter.range,
        summary: analytics::summary(who, &log, markers),
        daily: analytics::daily_timeline(who, &log),
        monthly: analytics::monthly_timeline(who, &log),
        hourly: analytics::hourly_distribution(who, &log).rows().collect(),
        heatmap: analytics::activity_heatmap(who, &log).cells().collect(),
        weekday: analytics::weekday_activity(who, &log),
        busiest_day: analytics::busiest_day(who, &log),
        busiest_month: analytics::busiest_month(who, &log),
        top_words: analytics::top_words(who, &log, stopwords, markers, config.top_words),
        word_cloud: analytics::word_cloud_frequencies(
            who,
            &log,
            stopwords,
            markers,
            config.word_cloud_words,
        ),
        emoji: analytics::top_emoji(who, &log, markers, config.top_emoji),
        participants: analytics::participant_ranking(
            &log,
            &config.excluded_senders,
            SortOrder::Descending,
        ),
        links: analytics::extract_links(who, &log),
        latency_by_sender: analytics::mean_by_sender(&times, policy),
        latency_by_weekday: analytics::mean_by_weekday(&scoped_times, policy),
        latency_weekend: analytics::weekend_vs_weekday(&scoped_times, policy),
        response_times: scoped_times
            .into_iter()
            .map(|t| ResponseTime {
                latency_minutes: t.reported_minutes(policy),
                ..t
            })
            .collect(),
    };

    info!(
        participant = %report.participant,
        messages = report.summary.messages,
        days = report.daily.len(),
        "analysis complete"
    );
    report
}
