//! Property-based tests for chatstats.
//!
//! These tests generate random chat logs to find edge cases.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use chatstats::analytics::{DateRange, apply_date_range};
use chatstats::prelude::*;

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

/// One entry as (sender, text, minutes since the previous entry)
fn arb_entry() -> impl Strategy<Value = (String, String, i64)> {
    (
        prop::sample::select(vec![
            "Alice".to_string(),
            "Bob".to_string(),
            "Иван".to_string(),
            "Team:Ops".to_string(),
            "Meta AI".to_string(),
            GROUP_NOTIFICATION.to_string(),
        ]),
        prop::sample::select(vec![
            "Hello".to_string(),
            "pizza tonight? 🍕".to_string(),
            "How are you?".to_string(),
            "<Media omitted>".to_string(),
            "This message was deleted".to_string(),
            "see https://example.com/a, ok".to_string(),
            "Привет мир 😂😂".to_string(),
            "first line\nsecond line".to_string(),
            "null".to_string(),
            "!!! ...".to_string(),
        ]),
        // Mostly quick replies, sometimes hours or days apart
        prop_oneof![4 => 0i64..20, 1 => 200i64..3000],
    )
}

/// A chronologically ordered log.
fn arb_log(max_len: usize) -> impl Strategy<Value = Vec<Message>> {
    prop::collection::vec(arb_entry(), 0..max_len).prop_map(|entries| {
        let mut ts = start();
        entries
            .into_iter()
            .map(|(sender, text, gap)| {
                ts += Duration::minutes(gap);
                if sender == GROUP_NOTIFICATION {
                    Message::notification(ts, "Alice added Bob")
                } else {
                    Message::new(ts, sender, text)
                }
            })
            .collect()
    })
}

fn render(log: &[Message]) -> String {
    log.iter()
        .map(|m| {
            let stamp = m.timestamp().format("%-m/%-d/%y, %H:%M");
            if m.is_notification() {
                format!("{} - {}\n", stamp, m.text())
            } else {
                format!("{} - {}: {}\n", stamp, m.sender(), m.text())
            }
        })
        .collect()
}

fn arb_participant() -> impl Strategy<Value = Participant> {
    prop::sample::select(vec!["Overall", "Alice", "Bob", "Nobody"])
        .prop_map(|name| Participant::from(name.to_string()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // PARSER PROPERTIES
    // ============================================

    /// Rendering a log and parsing it back yields the same records
    #[test]
    fn rendered_log_parses_back(log in arb_log(30)) {
        prop_assume!(!log.is_empty());
        let parsed = parse(&render(&log)).unwrap();
        prop_assert_eq!(parsed, log);
    }

    /// Parsing is deterministic
    #[test]
    fn parse_is_pure(log in arb_log(20)) {
        prop_assume!(!log.is_empty());
        let raw = render(&log);
        prop_assert_eq!(parse(&raw).unwrap(), parse(&raw).unwrap());
    }

    // ============================================
    // FILTER PROPERTIES
    // ============================================

    /// "Overall" keeps every record
    #[test]
    fn overall_is_passthrough(log in arb_log(30)) {
        prop_assert_eq!(filter_participant(&log, &Participant::Overall).len(), log.len());
    }

    /// Filtering by the same participant twice changes nothing
    #[test]
    fn participant_filter_is_idempotent(log in arb_log(30), who in arb_participant()) {
        let once: Vec<Message> = filter_participant(&log, &who).into_iter().cloned().collect();
        let twice: Vec<Message> = filter_participant(&once, &who).into_iter().cloned().collect();
        prop_assert_eq!(once, twice);
    }

    /// Date ranges are idempotent and only keep in-range days
    #[test]
    fn date_range_is_idempotent(log in arb_log(30), from in 0i64..5, span in 0i64..5) {
        let day = start().date() + Duration::days(from);
        let range = DateRange {
            from: Some(day),
            to: Some(day + Duration::days(span)),
        };
        let once = apply_date_range(&log, &range);
        prop_assert!(once.iter().all(|m| range.contains(m.date())));
        prop_assert_eq!(apply_date_range(&once, &range), once);
    }

    // ============================================
    // AGGREGATION PROPERTIES
    // ============================================

    /// Ranked senders plus system and excluded lines account for every record
    #[test]
    fn ranking_accounts_for_every_record(log in arb_log(40)) {
        let excluded = vec!["Meta AI".to_string()];
        let ranking = participant_ranking(&log, &excluded, SortOrder::Descending);
        let ranked: usize = ranking.iter().map(|r| r.messages).sum();
        let skipped = log
            .iter()
            .filter(|m| m.is_notification() || m.sender() == "Meta AI")
            .count();
        prop_assert_eq!(ranked + skipped, log.len());
        prop_assert!(ranking.windows(2).all(|w| w[0].messages >= w[1].messages));
    }

    /// Timelines and the heatmap agree with the summary count
    #[test]
    fn timelines_agree_with_summary(log in arb_log(40), who in arb_participant()) {
        let total = summary(&who, &log, &Markers::default()).messages;

        let heatmap = activity_heatmap(&who, &log);
        prop_assert_eq!(heatmap.cells().count(), 168);
        prop_assert_eq!(heatmap.total(), total);

        let daily: usize = daily_timeline(&who, &log).iter().map(|d| d.messages).sum();
        let monthly: usize = monthly_timeline(&who, &log).iter().map(|m| m.messages).sum();
        prop_assert_eq!(daily, total);
        prop_assert_eq!(monthly, total);
        prop_assert_eq!(hourly_distribution(&who, &log).total(), total);
    }

    /// Top words are sorted, truncated and free of emoji
    #[test]
    fn top_words_sorted_and_bounded(log in arb_log(40), limit in 0usize..8) {
        let words =
            top_words(&Participant::Overall, &log, &Stopwords::new(), &Markers::default(), limit);
        prop_assert!(words.len() <= limit);
        prop_assert!(words.windows(2).all(|w| w[0].count >= w[1].count));
        prop_assert!(words.iter().all(|w| w.word != "😂" && w.word != "🍕"));
    }

    // ============================================
    // LATENCY PROPERTIES
    // ============================================

    /// A latency is defined only for a same-day reply by a different sender under the cap
    #[test]
    fn latency_null_rules(log in arb_log(40), cap in 1.0f64..300.0) {
        let config = LatencyConfig::default().with_cap_minutes(cap);
        let times = response_times(&log, &[], &config);
        let humans = log.iter().filter(|m| !m.is_notification()).count();
        prop_assert_eq!(times.len(), humans);

        if let Some(first) = times.first() {
            prop_assert_eq!(first.latency_minutes, None);
        }
        for pair in times.windows(2) {
            let (prev, cur) = (&pair[0], &pair[1]);
            match cur.latency_minutes {
                Some(minutes) => {
                    prop_assert!(prev.sender != cur.sender);
                    prop_assert_eq!(prev.date, cur.date);
                    prop_assert!((0.0..cap).contains(&minutes));
                }
                None => {
                    let gap = (cur.timestamp - prev.timestamp).num_seconds() as f64 / 60.0;
                    prop_assert!(prev.sender == cur.sender || prev.date != cur.date || gap >= cap);
                }
            }
        }
    }

    /// Omit never reports a group without defined latencies; Zero reports every group
    #[test]
    fn null_policy_on_means(log in arb_log(40)) {
        let times = response_times(&log, &[], &LatencyConfig::default());
        let omit = mean_by_sender(&times, NullPolicy::Omit);
        let zero = mean_by_sender(&times, NullPolicy::Zero);

        prop_assert!(omit.iter().all(|m| m.responses > 0));
        prop_assert!(omit.len() <= zero.len());
        for mean in zero.iter().filter(|m| m.responses == 0) {
            prop_assert_eq!(mean.mean_minutes, 0.0);
        }
        prop_assert!(weekend_vs_weekday(&times, NullPolicy::Zero).len() <= 2);
        prop_assert!(mean_by_weekday(&times, NullPolicy::Zero).len() <= 7);
    }

    // ============================================
    // CLEANING PROPERTIES
    // ============================================

    /// Cleaning a cleaned string is a no-op
    #[test]
    fn clean_text_is_idempotent(text in "[a-zA-Z0-9 !?.,<>/:@#😂]{0,60}") {
        let stop = Stopwords::from_words(["the", "a"]);
        let once = clean_text(&text, &stop);
        prop_assert_eq!(clean_text(&once, &stop), once);
    }

    /// The cleaned corpus never yields URLs, punctuation or stopwords
    #[test]
    fn corpus_has_no_noise(log in arb_log(30)) {
        let stop = Stopwords::from_words(["ok", "hello"]);
        for token in clean_corpus(&log, &stop, &Markers::default()) {
            prop_assert!(!token.starts_with("http"));
            prop_assert!(!chatstats::classify::is_punctuation(&token));
            prop_assert!(!stop.contains(&token));
        }
    }
}

// ============================================
// NON-PROPTEST EDGE CASE TESTS
// ============================================

#[cfg(test)]
mod edge_cases {
    use super::*;

    #[test]
    fn empty_log_aggregates_to_empty_tables() {
        let log: Vec<Message> = vec![];
        assert!(participant_ranking(&log, &[], SortOrder::Descending).is_empty());
        assert!(response_times(&log, &[], &LatencyConfig::default()).is_empty());
        assert!(daily_timeline(&Participant::Overall, &log).is_empty());
        assert_eq!(activity_heatmap(&Participant::Overall, &log).cells().count(), 168);
    }

    #[test]
    fn gap_equal_to_cap_is_not_a_reply() {
        let t = start();
        let log = vec![
            Message::new(t, "Alice", "hi"),
            Message::new(t + Duration::minutes(240), "Bob", "sorry, late"),
        ];
        let times = response_times(&log, &[], &LatencyConfig::default());
        assert_eq!(times[1].latency_minutes, None);
    }
}
