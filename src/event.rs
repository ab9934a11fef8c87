//! Input data model for match event records.
//!
//! Every field is optional and leniently decoded: a field that is absent, or
//! present but not of the expected shape, decodes to `None` instead of
//! failing the record. Only a malformed document (not a JSON array of
//! objects) is a hard error, handled in [`crate::parser`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes a field as `Some(T)` when it matches the expected shape and
/// `None` otherwise, so one bad field never drops the whole event.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// A nested `{"name": ...}` object used for event type, team, possession
/// team, player, play pattern, and pass outcome.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Named {
    pub name: Option<String>,
}

/// Pass detail attached to "Pass" events.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PassDetail {
    #[serde(default, deserialize_with = "lenient")]
    pub length: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub outcome: Option<Named>,
}

/// One recorded in-match occurrence (pass, shot, foul, ...).
///
/// Fields that only feed the CSV export (`index`, `second`, `duration`) are
/// carried through untouched by aggregation.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Event {
    #[serde(default, deserialize_with = "lenient")]
    pub index: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub period: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub minute: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub second: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub duration: Option<f64>,
    #[serde(default, rename = "type", deserialize_with = "lenient")]
    pub kind: Option<Named>,
    #[serde(default, deserialize_with = "lenient")]
    pub team: Option<Named>,
    #[serde(default, deserialize_with = "lenient")]
    pub possession_team: Option<Named>,
    #[serde(default, deserialize_with = "lenient")]
    pub player: Option<Named>,
    #[serde(default, deserialize_with = "lenient")]
    pub play_pattern: Option<Named>,
    #[serde(default, rename = "pass", deserialize_with = "lenient")]
    pub pass_detail: Option<PassDetail>,
}

impl Event {
    /// Event type name, when present.
    pub fn type_name(&self) -> Option<&str> {
        self.kind.as_ref().and_then(|n| n.name.as_deref())
    }

    /// Acting team name, when present.
    pub fn team_name(&self) -> Option<&str> {
        self.team.as_ref().and_then(|n| n.name.as_deref())
    }

    /// Possession team name, when present.
    pub fn possession_team_name(&self) -> Option<&str> {
        self.possession_team.as_ref().and_then(|n| n.name.as_deref())
    }

    /// Acting player name, when present.
    pub fn player_name(&self) -> Option<&str> {
        self.player.as_ref().and_then(|n| n.name.as_deref())
    }

    /// Play pattern name, when present.
    pub fn play_pattern_name(&self) -> Option<&str> {
        self.play_pattern.as_ref().and_then(|n| n.name.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_event_decodes() {
        let json = r#"{
            "index": 12,
            "period": 1,
            "minute": 37,
            "second": 14,
            "duration": 1.25,
            "type": {"name": "Pass"},
            "team": {"name": "Barcelona"},
            "possession_team": {"name": "Barcelona"},
            "player": {"name": "Sergio Busquets"},
            "play_pattern": {"name": "Regular Play"},
            "pass": {"length": 18.5, "outcome": {"name": "Incomplete"}}
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.type_name(), Some("Pass"));
        assert_eq!(event.team_name(), Some("Barcelona"));
        assert_eq!(event.player_name(), Some("Sergio Busquets"));
        assert_eq!(event.minute, Some(37));
        let pass = event.pass_detail.unwrap();
        assert_eq!(pass.length, Some(18.5));
        assert_eq!(pass.outcome.unwrap().name.as_deref(), Some("Incomplete"));
    }

    #[test]
    fn test_missing_fields_decode_to_none() {
        let event: Event = serde_json::from_str(r#"{"minute": 10}"#).unwrap();
        assert_eq!(event.minute, Some(10));
        assert!(event.kind.is_none());
        assert!(event.team.is_none());
        assert!(event.player.is_none());
    }

    #[test]
    fn test_malformed_field_is_skipped_not_fatal() {
        // "type" is a string instead of an object; "minute" is a string
        let json = r#"{"type": "Pass", "minute": "7", "team": {"name": "A"}}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.kind.is_none());
        assert!(event.minute.is_none());
        assert_eq!(event.team_name(), Some("A"));
    }

    #[test]
    fn test_named_with_non_string_name_is_skipped() {
        let json = r#"{"team": {"name": 5}}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.team.is_none());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r#"{"location": [60.5, 40.0], "under_pressure": true}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event, Event::default());
    }
}
