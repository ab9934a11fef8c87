//! Output persistence for processed events and aggregated statistics.
//!
//! Supports a flattened per-event CSV, a summary-statistics JSON document,
//! and a plain-text report file.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

use crate::aggregate::MatchSummary;
use crate::event::Event;
use crate::report::write_report;

/// One flattened event row for the CSV export.
#[derive(Debug, Serialize)]
struct EventRow<'a> {
    index: Option<u64>,
    period: Option<i64>,
    minute: Option<u32>,
    second: Option<u32>,
    event_type: Option<&'a str>,
    team_name: Option<&'a str>,
    possession_team_name: Option<&'a str>,
    play_pattern_name: Option<&'a str>,
    duration: Option<f64>,
}

impl<'a> From<&'a Event> for EventRow<'a> {
    fn from(event: &'a Event) -> Self {
        EventRow {
            index: event.index,
            period: event.period,
            minute: event.minute,
            second: event.second,
            event_type: event.type_name(),
            team_name: event.team_name(),
            possession_team_name: event.possession_team_name(),
            play_pattern_name: event.play_pattern_name(),
            duration: event.duration,
        }
    }
}

/// Summary JSON document: the aggregated mappings plus a generation stamp.
#[derive(Serialize)]
struct SummaryDocument<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    summary: &'a MatchSummary,
}

/// Writes one flattened row per event to a CSV file, headers included.
pub fn export_csv(path: &Path, events: &[Event]) -> Result<()> {
    debug!(path = %path.display(), rows = events.len(), "Writing processed event CSV");

    let mut writer = WriterBuilder::new().from_path(path)?;
    for event in events {
        writer.serialize(EventRow::from(event))?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = events.len(), "Processed event CSV written");
    Ok(())
}

/// Writes the aggregated summary as pretty-printed JSON.
pub fn write_summary_json(path: &Path, summary: &MatchSummary) -> Result<()> {
    let document = SummaryDocument {
        generated_at: Utc::now(),
        summary,
    };
    serde_json::to_writer_pretty(File::create(path)?, &document)?;

    info!(path = %path.display(), "Summary statistics written");
    Ok(())
}

/// Writes the sectioned text report to a file.
pub fn write_report_file(path: &Path, summary: &MatchSummary, top: usize) -> Result<()> {
    let mut file = File::create(path)?;
    write_report(&mut file, summary, top)?;

    info!(path = %path.display(), "Report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::event::Named;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    fn sample_events() -> Vec<Event> {
        vec![
            Event {
                index: Some(1),
                period: Some(1),
                minute: Some(3),
                second: Some(12),
                duration: Some(0.8),
                kind: Some(Named {
                    name: Some("Pass".to_string()),
                }),
                team: Some(Named {
                    name: Some("A".to_string()),
                }),
                ..Default::default()
            },
            Event {
                minute: Some(10),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_export_csv_writes_header_and_rows() {
        let path = temp_path("match_analyzer_test_export.csv");
        let _ = fs::remove_file(&path);

        export_csv(&path, &sample_events()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        // 1 header + 2 data rows
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("event_type"));
        assert!(lines[1].contains("Pass"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_export_csv_missing_fields_become_empty_cells() {
        let path = temp_path("match_analyzer_test_export_empty.csv");
        let _ = fs::remove_file(&path);

        export_csv(&path, &sample_events()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let bare_row = content.lines().nth(2).unwrap();
        assert!(bare_row.contains(",10,"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_summary_json_round_trips() {
        let path = temp_path("match_analyzer_test_summary.json");
        let _ = fs::remove_file(&path);

        let summary = aggregate(&sample_events());
        write_summary_json(&path, &summary).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["total_events"], 2);
        assert_eq!(value["event_type_counts"]["Pass"], 1);
        assert!(value["generated_at"].is_string());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_report_file() {
        let path = temp_path("match_analyzer_test_report.txt");
        let _ = fs::remove_file(&path);

        let summary = aggregate(&sample_events());
        write_report_file(&path, &summary, 20).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("MATCH EVENT ANALYSIS"));

        fs::remove_file(&path).unwrap();
    }
}
