// src/error.rs
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// The caller's video reference did not resolve to a video identifier.
    #[error("invalid YouTube video ID or URL: {0}")]
    InvalidInput(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Tool not found")]
    ToolNotFound,

    #[error("Method not found")]
    MethodNotFound,

    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16 },

    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("could not extract video data from page")]
    ExtractionFailed,

    #[error("video data not found")]
    VideoDataNotFound,

    #[error("no transcript available for this video")]
    NoTranscript,

    #[error("caption track URL not found")]
    CaptionUrlMissing,

    #[error("could not parse caption track: {0}")]
    CaptionFormat(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl ConnectorError {
    pub fn code_str(&self) -> &'static str {
        match self {
            ConnectorError::InvalidInput(_) => "invalid_input",
            ConnectorError::InvalidParams(_) => "invalid_params",
            ConnectorError::ToolNotFound => "tool_not_found",
            ConnectorError::MethodNotFound => "method_not_found",
            ConnectorError::HttpStatus { .. } | ConnectorError::HttpRequest(_) => "upstream_error",
            ConnectorError::ExtractionFailed | ConnectorError::CaptionFormat(_) => {
                "extraction_failed"
            }
            ConnectorError::VideoDataNotFound => "not_found",
            ConnectorError::NoTranscript | ConnectorError::CaptionUrlMissing => "no_transcript",
            ConnectorError::SerdeJson(_) => "parse_error",
            ConnectorError::Io(_) | ConnectorError::Other(_) => "internal_error",
        }
    }

    pub fn to_jsonrpc_error(&self) -> serde_json::Value {
        let (code, message) = match self {
            ConnectorError::ToolNotFound => (-32602, "Tool not found".to_string()),
            ConnectorError::MethodNotFound => (-32601, "Method not found".to_string()),
            ConnectorError::InvalidParams(msg) => (-32602, msg.to_string()),
            ConnectorError::InvalidInput(_) => (-32602, self.to_string()),
            ConnectorError::SerdeJson(e) => (-32602, format!("Invalid params: {}", e)),
            err => (-32603, err.to_string()),
        };

        json!({
            "code": code,
            "message": message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_distinguish_structural_failures() {
        assert_eq!(
            ConnectorError::ExtractionFailed.to_string(),
            "could not extract video data from page"
        );
        assert_eq!(
            ConnectorError::NoTranscript.to_string(),
            "no transcript available for this video"
        );
        assert_ne!(
            ConnectorError::VideoDataNotFound.to_string(),
            ConnectorError::NoTranscript.to_string()
        );
        assert_eq!(
            ConnectorError::HttpStatus { status: 429 }.to_string(),
            "HTTP error! status: 429"
        );
    }

    #[test]
    fn invalid_input_echoes_offending_value() {
        let err = ConnectorError::InvalidInput("not a video".into());
        assert!(err.to_string().ends_with("not a video"));
        assert_eq!(err.code_str(), "invalid_input");
        assert_eq!(err.to_jsonrpc_error()["code"], -32602);
    }
}
