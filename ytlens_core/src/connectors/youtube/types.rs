use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Channel reference. Both fields are empty strings when the page omits them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Channel {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    pub video_id: String,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
    pub description: String,
    pub channel: Channel,
    pub view_count: String,
    pub published_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub view_count: String,
    pub publish_date: String,
    pub channel: Channel,
    pub thumbnail_url: String,
    pub url: String,
}

/// One caption cue. `time` is seconds with exactly two decimals, e.g. `"2.50"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptEntry {
    pub time: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptChannel {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptVideoInfo {
    pub title: String,
    pub channel: TranscriptChannel,
    /// Length in seconds exactly as the player response spells it.
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptResult {
    pub transcript: Vec<TranscriptEntry>,
    pub video_info: TranscriptVideoInfo,
}
