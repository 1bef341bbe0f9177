//! Normalizes free-form video references into canonical 11-character identifiers.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConnectorError;

static VIDEO_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("video id regex"));

/// A URL shape that carries a video identifier right after a fixed marker.
#[derive(Debug)]
pub struct VideoUrlPattern {
    pub id: &'static str,
    pub pattern: Regex,
    pub description: &'static str,
}

fn url_pattern(id: &'static str, pattern: &str, description: &'static str) -> VideoUrlPattern {
    VideoUrlPattern {
        id,
        pattern: Regex::new(pattern).expect("video url regex"),
        description,
    }
}

/// Checked in order; the first pattern that captures an identifier wins.
pub static VIDEO_URL_PATTERNS: Lazy<Vec<VideoUrlPattern>> = Lazy::new(|| {
    vec![
        url_pattern(
            "watch_short_embed",
            r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([A-Za-z0-9_-]{11})",
            "youtube.com/watch?v=, youtu.be/ or youtube.com/embed/",
        ),
        url_pattern(
            "mobile",
            r"m\.youtube\.com/watch\?v=([A-Za-z0-9_-]{11})",
            "m.youtube.com/watch?v=",
        ),
        url_pattern(
            "music",
            r"music\.youtube\.com/watch\?v=([A-Za-z0-9_-]{11})",
            "music.youtube.com/watch?v=",
        ),
        // Kept for inputs the narrower shapes above were never meant to reject
        // (/v/, /e/, extra query parameters before v=).
        url_pattern(
            "combined",
            r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
            "any youtube.com or youtu.be URL with an identifier segment",
        ),
    ]
});

/// Canonical YouTube video identifier: exactly 11 characters of `[A-Za-z0-9_-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Accepts only a bare identifier; URLs go through [`resolve_video_id`].
    pub fn parse(raw: &str) -> Option<Self> {
        VIDEO_ID_RE.is_match(raw).then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn watch_url(&self) -> String {
        format!("https://youtube.com/watch?v={}", self.0)
    }

    pub fn thumbnail_url(&self) -> String {
        format!("https://i.ytimg.com/vi/{}/maxresdefault.jpg", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VideoId {
    type Error = ConnectorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if VIDEO_ID_RE.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(ConnectorError::InvalidInput(value))
        }
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

/// Resolve a bare identifier or any supported URL shape. `None` means the input
/// carries no recognizable identifier.
pub fn resolve_video_id(input: &str) -> Option<VideoId> {
    if let Some(id) = VideoId::parse(input) {
        return Some(id);
    }

    VIDEO_URL_PATTERNS.iter().find_map(|p| {
        let captured = p.pattern.captures(input)?.get(1)?.as_str();
        let id = VideoId::parse(captured)?;
        tracing::trace!(pattern = p.id, video_id = %id, "resolved video id from url");
        Some(id)
    })
}

/// Like [`resolve_video_id`], but reports an unresolvable input as a user error.
pub fn require_video_id(input: &str) -> Result<VideoId, ConnectorError> {
    resolve_video_id(input).ok_or_else(|| ConnectorError::InvalidInput(input.to_string()))
}
