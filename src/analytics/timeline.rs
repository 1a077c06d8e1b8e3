//! Temporal histograms: per day, per month, per hour, per weekday and the
//! weekday x hour heatmap.
//!
//! Every function scopes the log by [`Participant`] first. Series keyed by
//! date are chronological; weekday-keyed tables are Monday-first.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Weekday};
use serde::Serialize;

use crate::Message;
use crate::analytics::filter::Participant;
use crate::message::{WEEK, month_abbr, weekday_name};

/// Messages on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub messages: usize,
}

/// Messages in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub year: i32,
    /// 1-based month
    pub month: u32,
    /// `"YYYY-Mon"`, e.g. `"2024-Jan"`
    pub label: String,
    pub messages: usize,
}

/// Messages on one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekdayCount {
    pub weekday: &'static str,
    pub messages: usize,
}

/// One cell of the heatmap, for flat table output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    pub weekday: &'static str,
    pub hour: u32,
    pub messages: usize,
}

/// One row of the hour-of-day histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourCount {
    pub hour: u32,
    pub messages: usize,
}

/// Counts per hour of day, always 24 buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HourlyDistribution {
    counts: [usize; 24],
}

impl HourlyDistribution {
    /// Messages sent during `hour` (0-23); other values give 0.
    pub fn count(&self, hour: u32) -> usize {
        self.counts.get(hour as usize).copied().unwrap_or(0)
    }

    /// Bucket rows, hour 0 first.
    pub fn rows(&self) -> impl Iterator<Item = HourCount> + '_ {
        (0u32..).zip(self.counts).map(|(hour, messages)| HourCount { hour, messages })
    }

    /// Hour with the most messages, earliest on ties. `None` when empty.
    pub fn peak_hour(&self) -> Option<u32> {
        let max = self.counts.iter().copied().max().filter(|&m| m > 0)?;
        self.counts.iter().position(|&c| c == max).map(|h| h as u32)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Dense weekday x hour matrix (7 x 24), Monday-first, zeros filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ActivityHeatmap {
    cells: [[usize; 24]; 7],
}

impl ActivityHeatmap {
    /// Number of cells; always 168.
    pub const CELLS: usize = 7 * 24;

    /// Messages on `weekday` during `hour`.
    pub fn get(&self, weekday: Weekday, hour: u32) -> usize {
        self.cells[weekday.num_days_from_monday() as usize]
            .get(hour as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Row for one weekday, hour 0 first.
    pub fn row(&self, weekday: Weekday) -> &[usize; 24] {
        &self.cells[weekday.num_days_from_monday() as usize]
    }

    /// All 168 cells, Monday 00h first.
    pub fn cells(&self) -> impl Iterator<Item = HeatmapCell> + '_ {
        WEEK.iter().flat_map(move |&day| {
            (0u32..24).map(move |hour| HeatmapCell {
                weekday: weekday_name(day),
                hour,
                messages: self.get(day, hour),
            })
        })
    }

    pub fn total(&self) -> usize {
        self.cells.iter().flatten().sum()
    }
}

/// Messages per calendar day, chronological. Days without messages are absent.
pub fn daily_timeline(participant: &Participant, records: &[Message]) -> Vec<DailyCount> {
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for msg in participant.select(records) {
        *days.entry(msg.date()).or_default() += 1;
    }
    days.into_iter()
        .map(|(date, messages)| DailyCount { date, messages })
        .collect()
}

/// Messages per `(year, month)`, chronological, labelled `"YYYY-Mon"`.
///
/// # Example
///
/// ```
/// use chatstats::analytics::{Participant, monthly_timeline};
///
/// let log = chatstats::parse(
///     "12/31/23, 23:59 - Alice: bye 2023\n1/1/24, 0:01 - Bob: hi 2024\n1/3/24, 8:00 - Bob: again",
/// )?;
/// let months = monthly_timeline(&Participant::Overall, &log);
///
/// let labels: Vec<_> = months.iter().map(|m| m.label.as_str()).collect();
/// assert_eq!(labels, ["2023-Dec", "2024-Jan"]);
/// assert_eq!(months[1].messages, 2);
/// # Ok::<(), chatstats::ChatstatsError>(())
/// ```
pub fn monthly_timeline(participant: &Participant, records: &[Message]) -> Vec<MonthlyCount> {
    let mut months: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for msg in participant.select(records) {
        *months.entry((msg.year(), msg.month())).or_default() += 1;
    }
    months
        .into_iter()
        .map(|((year, month), messages)| MonthlyCount {
            year,
            month,
            label: format!("{year}-{}", month_abbr(month)),
            messages,
        })
        .collect()
}

/// Messages per hour of day.
pub fn hourly_distribution(participant: &Participant, records: &[Message]) -> HourlyDistribution {
    let mut dist = HourlyDistribution::default();
    for msg in participant.select(records) {
        dist.counts[msg.hour() as usize] += 1;
    }
    dist
}

/// Weekday x hour matrix.
pub fn activity_heatmap(participant: &Participant, records: &[Message]) -> ActivityHeatmap {
    let mut map = ActivityHeatmap::default();
    for msg in participant.select(records) {
        map.cells[msg.weekday().num_days_from_monday() as usize][msg.hour() as usize] += 1;
    }
    map
}

/// Messages per weekday, seven rows, Monday-first.
pub fn weekday_activity(participant: &Participant, records: &[Message]) -> Vec<WeekdayCount> {
    let mut counts = [0usize; 7];
    for msg in participant.select(records) {
        counts[msg.weekday().num_days_from_monday() as usize] += 1;
    }
    WEEK.iter()
        .zip(counts)
        .map(|(&day, messages)| WeekdayCount {
            weekday: weekday_name(day),
            messages,
        })
        .collect()
}

/// Weekday with the most messages (earliest in the week on ties).
pub fn busiest_day(participant: &Participant, records: &[Message]) -> Option<WeekdayCount> {
    weekday_activity(participant, records)
        .into_iter()
        .filter(|row| row.messages > 0)
        .fold(None, |best: Option<WeekdayCount>, row| match best {
            Some(b) if b.messages >= row.messages => Some(b),
            _ => Some(row),
        })
}

/// Month with the most messages (earliest on ties).
pub fn busiest_month(participant: &Participant, records: &[Message]) -> Option<MonthlyCount> {
    monthly_timeline(participant, records)
        .into_iter()
        .fold(None, |best: Option<MonthlyCount>, row| match best {
            Some(b) if b.messages >= row.messages => Some(b),
            _ => Some(row),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, sender: &str) -> Message {
        let ts = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 30, 0)
            .unwrap();
        Message::new(ts, sender, "x")
    }

    fn log() -> Vec<Message> {
        vec![
            at(2024, 1, 1, 9, "Alice"),  // Monday
            at(2024, 1, 1, 9, "Bob"),    // Monday
            at(2024, 1, 6, 23, "Alice"), // Saturday
            at(2024, 2, 5, 0, "Bob"),    // Monday
        ]
    }

    #[test]
    fn test_daily_timeline_chronological() {
        let days = daily_timeline(&Participant::Overall, &log());
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(days[0].messages, 2);
        assert!(days.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_monthly_labels() {
        let months = monthly_timeline(&Participant::Overall, &log());
        let labels: Vec<_> = months.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["2024-Jan", "2024-Feb"]);
        assert_eq!(months[0].messages, 3);
    }

    #[test]
    fn test_hourly_distribution() {
        let dist = hourly_distribution(&Participant::Overall, &log());
        assert_eq!(dist.count(9), 2);
        assert_eq!(dist.count(23), 1);
        assert_eq!(dist.count(0), 1);
        assert_eq!(dist.count(24), 0);
        assert_eq!(dist.rows().count(), 24);
        assert_eq!(dist.peak_hour(), Some(9));
        assert_eq!(dist.total(), 4);
    }

    #[test]
    fn test_heatmap_is_dense() {
        let map = activity_heatmap(&Participant::Overall, &log());
        assert_eq!(map.cells().count(), ActivityHeatmap::CELLS);
        assert_eq!(map.get(Weekday::Mon, 9), 2);
        assert_eq!(map.get(Weekday::Sat, 23), 1);
        assert_eq!(map.get(Weekday::Sun, 12), 0);
        assert_eq!(map.total(), 4);

        let first = map.cells().next().unwrap();
        assert_eq!((first.weekday, first.hour), ("Monday", 0));
    }

    #[test]
    fn test_heatmap_empty_input() {
        let map = activity_heatmap(&Participant::Overall, &[]);
        assert_eq!(map.cells().count(), 168);
        assert!(map.cells().all(|c| c.messages == 0));
    }

    #[test]
    fn test_weekday_activity_and_busiest() {
        let rows = weekday_activity(&Participant::Overall, &log());
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0], WeekdayCount { weekday: "Monday", messages: 3 });
        assert_eq!(rows[5].messages, 1);

        let busiest = busiest_day(&Participant::Named("Alice".into()), &log()).unwrap();
        assert_eq!(busiest.weekday, "Monday");
        assert_eq!(busiest_month(&Participant::Overall, &log()).unwrap().label, "2024-Jan");
        assert!(busiest_day(&Participant::Named("Nobody".into()), &log()).is_none());
    }
}
