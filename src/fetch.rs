//! Source loading for event documents, from a local file path or an HTTP URL.

use anyhow::{Context, Result};
use tracing::debug;

/// Fetches a document over HTTP with a blocking client.
pub fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let resp = reqwest::blocking::get(url)?.error_for_status()?;
    Ok(resp.bytes()?.to_vec())
}

/// Loads event data from a local file path or fetches it over HTTP.
///
/// # Errors
///
/// Returns an error when the source cannot be read; this is the fatal
/// "input unavailable" condition that aborts a run.
pub fn load_source(source: &str) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http") {
        fetch_bytes(source)?
    } else {
        std::fs::read(source).with_context(|| format!("failed to read event file '{source}'"))?
    };
    debug!(source, bytes = bytes.len(), "Source loaded");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_load_source_reads_local_file() {
        let path = format!("{}/match_analyzer_fetch_test.json", env::temp_dir().display());
        fs::write(&path, b"[]").unwrap();

        let bytes = load_source(&path).unwrap();
        assert_eq!(bytes, b"[]");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_source_missing_file_is_fatal() {
        let result = load_source("/nonexistent/events.json");
        assert!(result.is_err());
    }
}
