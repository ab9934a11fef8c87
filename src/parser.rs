//! JSON parser for match event documents.

use anyhow::{Context, Result};

use crate::event::Event;

/// Decodes a JSON array of event objects from raw bytes.
///
/// # Errors
///
/// Returns an error if the document is not a JSON array of objects. Malformed
/// fields inside an object are tolerated and decode to `None` (see
/// [`crate::event`]); a malformed document is the one fatal parse condition.
pub fn parse_events(bytes: &[u8]) -> Result<Vec<Event>> {
    serde_json::from_slice(bytes).context("event document is not a JSON array of event objects")
}
