//! Derived per-team ratio metrics.
//!
//! Every ratio with a zero denominator is omitted (`None`), never 0.0, NaN,
//! or an error: omission distinguishes "no data" from a genuine zero value.

use serde::Serialize;

use crate::aggregate::MatchSummary;

/// Derived metrics for one team, computed from raw breakdown counts.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TeamMetrics {
    pub team: String,
    /// Passes per possession event, percent. Omitted when the team has no
    /// possession events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_rate: Option<f64>,
    /// Shots per possession event, percent. Same guard as `pass_rate`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shot_rate: Option<f64>,
    /// Shots per pass, percent. Omitted when the team has no passes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shot_conversion: Option<f64>,
    pub tackles: u64,
    pub interceptions: u64,
    pub clearances: u64,
    pub fouls_committed: u64,
    /// Tackles + interceptions + clearances.
    pub defensive_actions: u64,
}

/// Percentage ratio, `None` when the denominator is zero.
fn ratio_pct(part: u64, total: u64) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(part as f64 / total as f64 * 100.0)
    }
}

/// Computes derived metrics for one team from an aggregated summary.
///
/// A team that never appears in the breakdown gets all-zero raw counts and
/// all ratios omitted.
pub fn team_metrics(summary: &MatchSummary, team: &str) -> TeamMetrics {
    let passes = summary.team_type_count(team, "Pass");
    let shots = summary.team_type_count(team, "Shot");
    let possession = summary
        .team_possession_counts
        .get(team)
        .copied()
        .unwrap_or(0);

    let tackles = summary.team_type_count(team, "Tackle");
    let interceptions = summary.team_type_count(team, "Interception");
    let clearances = summary.team_type_count(team, "Clearance");
    let fouls_committed = summary.team_type_count(team, "Foul Committed");

    TeamMetrics {
        team: team.to_string(),
        pass_rate: ratio_pct(passes, possession),
        shot_rate: ratio_pct(shots, possession),
        shot_conversion: ratio_pct(shots, passes),
        tackles,
        interceptions,
        clearances,
        fouls_committed,
        defensive_actions: tackles + interceptions + clearances,
    }
}

/// Metrics for every team in the summary, in lexical team order.
pub fn all_team_metrics(summary: &MatchSummary) -> Vec<TeamMetrics> {
    summary
        .teams()
        .map(|team| team_metrics(summary, team))
        .collect()
}
