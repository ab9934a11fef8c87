//! Single-pass aggregation of a match event sequence.
//!
//! [`aggregate`] is a pure function of its input: accumulation state is local
//! to the call and the returned [`MatchSummary`] is never mutated afterwards.
//! Every count is a commutative sum, so input order does not affect the
//! result (the one order-sensitive value, a player's last observed team, is
//! deliberate and documented on [`PlayerTally`]).

use serde::Serialize;
use std::collections::BTreeMap;

use crate::event::Event;
use crate::utility::{mean, stddev};

/// Width of a timeline bucket in match minutes.
pub const BUCKET_MINUTES: u32 = 5;

/// Pass outcome recorded when the source omits one, matching the convention
/// of the event data format (a completed pass carries no outcome object).
const DEFAULT_PASS_OUTCOME: &str = "Complete";

/// Per-player tally with team attribution.
///
/// `team` is the team observed on the player's most recent event; later
/// events overwrite earlier ones. This reproduces the source data semantics
/// exactly, quirks included, rather than inferring a primary team.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PlayerTally {
    pub count: u64,
    pub team: Option<String>,
}

/// Pass length and outcome statistics.
///
/// `mean_length` and `stddev_length` are omitted (not 0.0) when no pass in
/// the input carried a length.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PassSummary {
    pub total: u64,
    pub measured: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stddev_length: Option<f64>,
    pub outcome_counts: BTreeMap<String, u64>,
}

/// Aggregated statistics for one match event document.
///
/// Ordered maps keep report and export output deterministic.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MatchSummary {
    pub total_events: usize,
    pub event_type_counts: BTreeMap<String, u64>,
    pub team_event_counts: BTreeMap<String, u64>,
    pub team_possession_counts: BTreeMap<String, u64>,
    pub team_event_breakdown: BTreeMap<String, BTreeMap<String, u64>>,
    pub player_event_counts: BTreeMap<String, PlayerTally>,
    pub play_pattern_counts: BTreeMap<String, u64>,
    pub period_counts: BTreeMap<i64, u64>,
    pub timeline: BTreeMap<u32, BTreeMap<String, u64>>,
    pub max_minute: u32,
    pub max_period: i64,
    pub passes: PassSummary,
}

impl MatchSummary {
    /// Team names, in lexical order.
    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.team_event_counts.keys().map(String::as_str)
    }

    /// Event types sorted by descending count, ties broken by name.
    pub fn top_event_types(&self, n: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .event_type_counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }

    /// Players sorted by descending event count, ties broken by name.
    pub fn top_players(&self, n: usize) -> Vec<(&str, &PlayerTally)> {
        let mut entries: Vec<(&str, &PlayerTally)> = self
            .player_event_counts
            .iter()
            .map(|(name, tally)| (name.as_str(), tally))
            .collect();
        entries.sort_by(|a, b| b.1.count.cmp(&a.1.count).then(a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }

    /// One team's event types sorted by descending count, ties broken by name.
    pub fn top_team_events(&self, team: &str, n: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .team_event_breakdown
            .get(team)
            .into_iter()
            .flat_map(|types| types.iter())
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }

    /// Count of one event type for one team, 0 when never observed.
    pub fn team_type_count(&self, team: &str, event_type: &str) -> u64 {
        self.team_event_breakdown
            .get(team)
            .and_then(|types| types.get(event_type))
            .copied()
            .unwrap_or(0)
    }
}

/// Aggregates a complete event sequence into a [`MatchSummary`].
///
/// Each event contributes independently to each sub-aggregation it has the
/// fields for; a missing or malformed field skips that sub-aggregation only
/// and never drops the event or aborts the pass.
pub fn aggregate(events: &[Event]) -> MatchSummary {
    let mut summary = MatchSummary {
        total_events: events.len(),
        ..Default::default()
    };
    let mut pass_lengths = Vec::new();

    for event in events {
        let type_name = event.type_name();
        let team_name = event.team_name();

        if let Some(name) = type_name {
            *summary.event_type_counts.entry(name.to_string()).or_default() += 1;
        }

        if let Some(team) = team_name {
            *summary.team_event_counts.entry(team.to_string()).or_default() += 1;

            if let Some(name) = type_name {
                *summary
                    .team_event_breakdown
                    .entry(team.to_string())
                    .or_default()
                    .entry(name.to_string())
                    .or_default() += 1;
            }
        }

        if let Some(team) = event.possession_team_name() {
            *summary
                .team_possession_counts
                .entry(team.to_string())
                .or_default() += 1;
        }

        if let Some(player) = event.player_name() {
            let tally = summary
                .player_event_counts
                .entry(player.to_string())
                .or_default();
            tally.count += 1;
            if let Some(team) = team_name {
                // last write wins, see PlayerTally
                tally.team = Some(team.to_string());
            }
        }

        if let Some(pattern) = event.play_pattern_name() {
            *summary
                .play_pattern_counts
                .entry(pattern.to_string())
                .or_default() += 1;
        }

        if let Some(period) = event.period {
            *summary.period_counts.entry(period).or_default() += 1;
            summary.max_period = summary.max_period.max(period);
        }

        if let Some(minute) = event.minute {
            summary.max_minute = summary.max_minute.max(minute);

            if let Some(team) = team_name {
                let bucket = minute / BUCKET_MINUTES * BUCKET_MINUTES;
                *summary
                    .timeline
                    .entry(bucket)
                    .or_default()
                    .entry(team.to_string())
                    .or_default() += 1;
            }
        }

        if type_name == Some("Pass") {
            summary.passes.total += 1;

            let detail = event.pass_detail.as_ref();
            if let Some(length) = detail.and_then(|p| p.length) {
                pass_lengths.push(length);
            }
            if let Some(detail) = detail {
                let outcome = detail
                    .outcome
                    .as_ref()
                    .and_then(|o| o.name.as_deref())
                    .unwrap_or(DEFAULT_PASS_OUTCOME);
                *summary
                    .passes
                    .outcome_counts
                    .entry(outcome.to_string())
                    .or_default() += 1;
            }
        }
    }

    summary.passes.measured = pass_lengths.len() as u64;
    if !pass_lengths.is_empty() {
        let avg = mean(&pass_lengths);
        summary.passes.mean_length = Some(avg);
        summary.passes.stddev_length = Some(stddev(&pass_lengths, avg));
    }

    summary
}
