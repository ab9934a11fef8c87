//! Sectioned text report rendering.
//!
//! Renders a [`MatchSummary`] and its derived metrics into a plain-text
//! report. Writing to a generic `io::Write` keeps the same code usable for
//! stdout and for the `--report` file output.

use anyhow::Result;
use std::io::Write;

use crate::aggregate::{BUCKET_MINUTES, MatchSummary};
use crate::metrics::all_team_metrics;

const RULE: &str = "======================================================================";

/// Event types tracked in the per-team performance section, in display order.
const KEY_EVENT_TYPES: &[&str] = &[
    "Pass",
    "Shot",
    "Foul Committed",
    "Tackle",
    "Interception",
    "Clearance",
    "Dribble",
    "Corner Awarded",
    "Aerial",
    "Possession Lost",
    "Pressure",
    "Dispossessed",
    "Own Goal",
    "Goal",
    "Blocked Pass",
];

/// Percentage of a count against a total, 0.0 when the total is zero.
pub fn pct(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

fn section<W: Write>(out: &mut W, title: &str) -> Result<()> {
    writeln!(out, "\n{RULE}")?;
    writeln!(out, "{title}")?;
    writeln!(out, "{RULE}")?;
    Ok(())
}

/// Writes the full sectioned report for one match.
///
/// `top` bounds the event-type and player listings.
pub fn write_report<W: Write>(out: &mut W, summary: &MatchSummary, top: usize) -> Result<()> {
    let total = summary.total_events as u64;

    section(out, "MATCH EVENT ANALYSIS")?;
    writeln!(out, "\nTotal Events: {}", summary.total_events)?;
    writeln!(out, "Unique Event Types: {}", summary.event_type_counts.len())?;
    writeln!(
        out,
        "Teams: {}",
        summary.teams().collect::<Vec<_>>().join(", ")
    )?;
    writeln!(out, "Total Players: {}", summary.player_event_counts.len())?;
    writeln!(
        out,
        "Match Duration: {} minutes across {} periods",
        summary.max_minute, summary.max_period
    )?;

    section(out, "EVENT TYPES")?;
    writeln!(out)?;
    for (i, (name, count)) in summary.top_event_types(top).iter().enumerate() {
        let p = pct(*count, total);
        let bar = "#".repeat((p / 2.0) as usize);
        writeln!(out, "  {:2}. {name:25} {count:5} ({p:5.1}%) {bar}", i + 1)?;
    }

    section(out, "TEAM STATISTICS")?;
    for team in summary.teams() {
        let events = summary.team_event_counts[team];
        let possession = summary
            .team_possession_counts
            .get(team)
            .copied()
            .unwrap_or(0);
        writeln!(out, "\n{team}:")?;
        writeln!(
            out,
            "  Events: {events} ({:.1}% of total)",
            pct(events, total)
        )?;
        writeln!(
            out,
            "  Possession Events: {possession} ({:.1}%)",
            pct(possession, total)
        )?;
    }

    section(out, "TEAM PERFORMANCE METRICS")?;
    for team in summary.teams() {
        writeln!(out, "\n{team}:")?;
        for metric in KEY_EVENT_TYPES {
            let count = summary.team_type_count(team, metric);
            if count > 0 {
                writeln!(out, "  {metric:25} {count:4}")?;
            }
        }
    }

    section(out, "MOST COMMON EVENTS BY TEAM")?;
    for team in summary.teams() {
        let team_total = summary.team_event_counts[team];
        writeln!(out, "\n{team} - Top 5 Events:")?;
        for (name, count) in summary.top_team_events(team, 5) {
            writeln!(
                out,
                "  {name:25} {count:4} ({:.1}% of team events)",
                pct(count, team_total)
            )?;
        }
    }

    section(out, "TOP PLAYERS BY EVENT CONTRIBUTION")?;
    writeln!(out)?;
    for (i, (player, tally)) in summary.top_players(top).iter().enumerate() {
        let team = tally.team.as_deref().unwrap_or("Unknown");
        writeln!(
            out,
            "  {:2}. {player:35} ({team:15}) - {:4} events",
            i + 1,
            tally.count
        )?;
    }

    write_timeline(out, summary)?;

    section(out, "PLAY PATTERNS")?;
    writeln!(out)?;
    for (pattern, count) in &summary.play_pattern_counts {
        writeln!(out, "  {pattern:25} {count:5} ({:5.1}%)", pct(*count, total))?;
    }

    section(out, "POSSESSION EFFICIENCY")?;
    for m in all_team_metrics(summary) {
        writeln!(out, "\n{}:", m.team)?;
        match m.pass_rate {
            Some(rate) => writeln!(out, "  Pass Rate: {rate:.1}% (passes per possession event)")?,
            None => writeln!(out, "  Pass Rate: n/a (no possession events)")?,
        }
        match m.shot_rate {
            Some(rate) => writeln!(out, "  Shot Rate: {rate:.1}% (shots per possession event)")?,
            None => writeln!(out, "  Shot Rate: n/a (no possession events)")?,
        }
        match m.shot_conversion {
            Some(rate) => writeln!(out, "  Shot Conversion: {rate:.2}% (shots per pass)")?,
            None => writeln!(out, "  Shot Conversion: n/a (no passes)")?,
        }
    }

    section(out, "DEFENSIVE PERFORMANCE")?;
    for m in all_team_metrics(summary) {
        writeln!(out, "\n{}:", m.team)?;
        writeln!(out, "  Tackles: {}", m.tackles)?;
        writeln!(out, "  Interceptions: {}", m.interceptions)?;
        writeln!(out, "  Clearances: {}", m.clearances)?;
        writeln!(out, "  Fouls Committed: {}", m.fouls_committed)?;
        writeln!(out, "  Total Defensive Actions: {}", m.defensive_actions)?;
    }

    section(out, "PASSING")?;
    writeln!(out, "\nTotal Passes: {}", summary.passes.total)?;
    if let (Some(avg), Some(sd)) = (summary.passes.mean_length, summary.passes.stddev_length) {
        writeln!(
            out,
            "Pass Length: mean {avg:.1}m, stddev {sd:.1}m ({} measured)",
            summary.passes.measured
        )?;
    }
    for (outcome, count) in &summary.passes.outcome_counts {
        writeln!(
            out,
            "  {outcome:25} {count:5} ({:5.1}%)",
            pct(*count, summary.passes.total)
        )?;
    }

    section(out, "MATCH SUMMARY STATISTICS")?;
    writeln!(out)?;
    let type_total = |name: &str| summary.event_type_counts.get(name).copied().unwrap_or(0);
    let summary_rows: &[(&str, u64)] = &[
        ("Total Events", total),
        ("Total Teams", summary.team_event_counts.len() as u64),
        ("Total Players", summary.player_event_counts.len() as u64),
        ("Unique Event Types", summary.event_type_counts.len() as u64),
        ("Match Duration (minutes)", summary.max_minute as u64),
        ("Number of Periods", summary.max_period.max(0) as u64),
        ("Total Passes", type_total("Pass")),
        ("Total Shots", type_total("Shot")),
        ("Total Fouls", type_total("Foul Committed")),
        ("Total Tackles", type_total("Tackle")),
        ("Total Interceptions", type_total("Interception")),
    ];
    for (label, value) in summary_rows {
        writeln!(out, "  {label:30} {value:6}")?;
    }

    writeln!(out, "\n{RULE}")?;
    Ok(())
}

/// Writes the 5-minute-interval timeline table, one column per team.
fn write_timeline<W: Write>(out: &mut W, summary: &MatchSummary) -> Result<()> {
    section(
        out,
        "MATCH TIMELINE (events by 5-minute interval, per team)",
    )?;

    let teams: Vec<&str> = summary.teams().collect();

    write!(out, "\n Time  | ")?;
    for team in &teams {
        write!(out, "{team:12} | ")?;
    }
    writeln!(out)?;
    writeln!(out, "{}", "-".repeat(teams.len() * 15 + 9))?;

    for (bucket, counts) in &summary.timeline {
        write!(out, "{bucket:3}-{:3} | ", bucket + BUCKET_MINUTES)?;
        for team in &teams {
            let count = counts.get(*team).copied().unwrap_or(0);
            write!(out, "{count:12} | ")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
