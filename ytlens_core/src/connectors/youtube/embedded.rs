//! Locates the JSON blobs YouTube inlines into its HTML pages.
//!
//! This is the only place that knows how those variables are spelled in the markup.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ConnectorError;

static INITIAL_DATA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"var ytInitialData\s*=\s*\{").expect("ytInitialData regex"));

// Appears both as `var x = {...}` and as a bare assignment inside other statements.
static PLAYER_RESPONSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"ytInitialPlayerResponse\s*=\s*\{").expect("ytInitialPlayerResponse regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddedVariable {
    /// `ytInitialData`: search results and the watch-next column.
    InitialData,
    /// `ytInitialPlayerResponse`: video details and caption tracks.
    PlayerResponse,
}

impl EmbeddedVariable {
    pub fn name(self) -> &'static str {
        match self {
            EmbeddedVariable::InitialData => "ytInitialData",
            EmbeddedVariable::PlayerResponse => "ytInitialPlayerResponse",
        }
    }

    fn marker(self) -> &'static Regex {
        match self {
            EmbeddedVariable::InitialData => &*INITIAL_DATA_RE,
            EmbeddedVariable::PlayerResponse => &*PLAYER_RESPONSE_RE,
        }
    }
}

/// Finds `variable` in `html` and parses the object literal assigned to it.
///
/// The object is read as a single JSON value starting at its opening brace, so a `};`
/// inside a string literal does not cut it short. A missing assignment and an
/// unparseable object are both [`ConnectorError::ExtractionFailed`].
pub fn extract_embedded_json(html: &str, variable: EmbeddedVariable) -> Result<Value, ConnectorError> {
    let Some(found) = variable.marker().find(html) else {
        tracing::debug!(variable = variable.name(), "embedded variable not found");
        return Err(ConnectorError::ExtractionFailed);
    };

    // The match ends just past `{`; step back onto it.
    let body = &html[found.end() - 1..];
    let mut de = serde_json::Deserializer::from_str(body);
    match Value::deserialize(&mut de) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err(ConnectorError::ExtractionFailed),
        Err(e) => {
            tracing::debug!(variable = variable.name(), error = %e, "embedded variable is not valid JSON");
            Err(ConnectorError::ExtractionFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_initial_data_from_script_tag() {
        let html = r#"<html><script nonce="x">var ytInitialData = {"contents":{"a":[1,2]}};</script></html>"#;
        let value = extract_embedded_json(html, EmbeddedVariable::InitialData).unwrap();
        assert_eq!(value["contents"]["a"][1], 2);
    }

    #[test]
    fn player_response_without_var_keyword() {
        let html = r#"<script>window["x"]=1;ytInitialPlayerResponse = {"videoDetails":{"title":"T"}};var meta = 1;</script>"#;
        let value = extract_embedded_json(html, EmbeddedVariable::PlayerResponse).unwrap();
        assert_eq!(value["videoDetails"]["title"], "T");
    }

    #[test]
    fn terminator_inside_string_does_not_truncate() {
        let html = r#"var ytInitialData = {"title":"semi};colon","n":1};</script>"#;
        let value = extract_embedded_json(html, EmbeddedVariable::InitialData).unwrap();
        assert_eq!(value["title"], "semi};colon");
        assert_eq!(value["n"], 1);
    }

    #[test]
    fn absent_variable_fails_extraction() {
        let err = extract_embedded_json("<html><body>nothing</body></html>", EmbeddedVariable::InitialData)
            .unwrap_err();
        assert!(matches!(err, ConnectorError::ExtractionFailed));
    }

    #[test]
    fn malformed_json_fails_extraction() {
        let html = r#"var ytInitialData = {"contents": [1, 2,};</script>"#;
        let err = extract_embedded_json(html, EmbeddedVariable::InitialData).unwrap_err();
        assert!(matches!(err, ConnectorError::ExtractionFailed));
    }
}
