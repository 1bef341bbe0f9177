// src/connectors/youtube/mod.rs

use async_trait::async_trait;
use rmcp::model::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;

use crate::config::YouTubeConfig;
use crate::error::ConnectorError;
use crate::utils::{error_result, input_schema, pretty_json_result};
use crate::Connector;

pub mod embedded;
pub mod fetch;
pub mod path;
pub mod search;
pub mod transcript;
pub mod types;
pub mod video_id;
pub mod video_info;

pub use embedded::{extract_embedded_json, EmbeddedVariable};
pub use fetch::{HttpFetcher, PageFetcher};
pub use types::{
    Channel, SearchResultItem, TranscriptChannel, TranscriptEntry, TranscriptResult,
    TranscriptVideoInfo, VideoInfo,
};
pub use video_id::{require_video_id, resolve_video_id, VideoId};

pub const TOOL_SEARCH: &str = "search";
pub const TOOL_VIDEO_INFO: &str = "get-video-info";
pub const TOOL_TRANSCRIPT: &str = "get-transcript";

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchInput {
    /// Search query string
    pub query: String,
    /// Maximum number of results to return (1-10)
    #[serde(default = "default_limit")]
    #[schemars(default = "default_limit", range(min = 1, max = 10))]
    pub limit: u8,
}

fn default_limit() -> u8 {
    5
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct VideoInput {
    /// YouTube video ID (e.g. 'dQw4w9WgXcQ') or any youtube.com / youtu.be video URL
    #[serde(alias = "url", alias = "video_id")]
    pub input: String,
}

impl SearchInput {
    fn validate(&self) -> Result<(), ConnectorError> {
        if self.query.trim().is_empty() {
            return Err(ConnectorError::InvalidParams(
                "query must not be empty".to_string(),
            ));
        }
        if !(search::MIN_LIMIT..=search::MAX_LIMIT).contains(&self.limit) {
            return Err(ConnectorError::InvalidParams(format!(
                "limit must be between {} and {}, got {}",
                search::MIN_LIMIT,
                search::MAX_LIMIT,
                self.limit
            )));
        }
        Ok(())
    }
}

impl VideoInput {
    fn validate(&self) -> Result<(), ConnectorError> {
        if self.input.trim().is_empty() {
            return Err(ConnectorError::InvalidParams(
                "input must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Search, video details and transcripts read from YouTube's own page payloads.
#[derive(Clone)]
pub struct YouTubeConnector {
    fetcher: Arc<dyn PageFetcher>,
    base_url: String,
}

impl YouTubeConnector {
    pub fn new(config: &YouTubeConfig) -> Result<Self, ConnectorError> {
        let fetcher = HttpFetcher::new(config)?;
        Ok(Self::with_fetcher(Arc::new(fetcher), config.base_url.clone()))
    }

    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn results_page(&self) -> String {
        format!("{}/results", self.base_url)
    }

    fn watch_page(&self, id: &VideoId) -> String {
        format!("{}/watch?v={}", self.base_url, id)
    }

    pub async fn search(
        &self,
        query: &str,
        limit: u8,
    ) -> Result<Vec<SearchResultItem>, ConnectorError> {
        let url = format!(
            "{}?search_query={}",
            self.results_page(),
            urlencoding::encode(query)
        );
        let html = self
            .fetcher
            .fetch_text(&url, Some(&self.results_page()))
            .await?;
        let data = extract_embedded_json(&html, EmbeddedVariable::InitialData)?;
        let results = search::project_search(&data, usize::from(limit));
        tracing::debug!(query, found = results.len(), "search projected");
        Ok(results)
    }

    pub async fn video_info(&self, input: &str) -> Result<VideoInfo, ConnectorError> {
        let id = require_video_id(input)?;
        let html = self
            .fetcher
            .fetch_text(&self.watch_page(&id), Some(&self.results_page()))
            .await?;
        let data = extract_embedded_json(&html, EmbeddedVariable::InitialData)?;
        video_info::project_video_info(&data, &id)
    }

    pub async fn transcript(&self, input: &str) -> Result<TranscriptResult, ConnectorError> {
        let id = require_video_id(input)?;
        let watch_page = self.watch_page(&id);
        let html = self
            .fetcher
            .fetch_text(&watch_page, Some(&self.results_page()))
            .await?;
        let player = extract_embedded_json(&html, EmbeddedVariable::PlayerResponse)?;
        transcript::project_transcript(&player, self.fetcher.as_ref(), Some(&watch_page)).await
    }

    async fn dispatch(&self, name: &str, args: Value) -> Result<CallToolResult, ConnectorError> {
        match name {
            TOOL_SEARCH => {
                let input: SearchInput = serde_json::from_value(args)
                    .map_err(|e| ConnectorError::InvalidParams(e.to_string()))?;
                input.validate()?;
                let results = self.search(input.query.trim(), input.limit).await?;
                pretty_json_result(&results)
            }
            TOOL_VIDEO_INFO => {
                let input: VideoInput = serde_json::from_value(args)
                    .map_err(|e| ConnectorError::InvalidParams(e.to_string()))?;
                input.validate()?;
                let info = self.video_info(input.input.trim()).await?;
                pretty_json_result(&info)
            }
            TOOL_TRANSCRIPT => {
                let input: VideoInput = serde_json::from_value(args)
                    .map_err(|e| ConnectorError::InvalidParams(e.to_string()))?;
                input.validate()?;
                let transcript = self.transcript(input.input.trim()).await?;
                pretty_json_result(&transcript)
            }
            _ => Err(ConnectorError::ToolNotFound),
        }
    }
}

#[async_trait]
impl Connector for YouTubeConnector {
    fn name(&self) -> &'static str {
        "youtube"
    }

    fn description(&self) -> &'static str {
        "Search YouTube, read video details and fetch transcripts without the Data API."
    }

    async fn capabilities(&self) -> ServerCapabilities {
        ServerCapabilities::builder().enable_tools().build()
    }

    async fn list_tools(&self) -> Result<ListToolsResult, ConnectorError> {
        let tools = vec![
            Tool {
                name: Cow::Borrowed(TOOL_SEARCH),
                title: None,
                description: Some(Cow::Borrowed(
                    "Search YouTube videos. Returns up to `limit` (1-10, default 5) results with id, title, url, thumbnail, description snippet, channel, view count and publish time.",
                )),
                input_schema: input_schema::<SearchInput>()?,
                output_schema: None,
                annotations: None,
                icons: None,
            },
            Tool {
                name: Cow::Borrowed(TOOL_VIDEO_INFO),
                title: None,
                description: Some(Cow::Borrowed(
                    "Given a YouTube video ID or URL, returns title, description, view count, publish date, channel, thumbnail and watch URL.",
                )),
                input_schema: input_schema::<VideoInput>()?,
                output_schema: None,
                annotations: None,
                icons: None,
            },
            Tool {
                name: Cow::Borrowed(TOOL_TRANSCRIPT),
                title: None,
                description: Some(Cow::Borrowed(
                    "Given a YouTube video ID or URL, returns the timed transcript (English track when available, otherwise the first track) plus title, channel and duration.",
                )),
                input_schema: input_schema::<VideoInput>()?,
                output_schema: None,
                annotations: None,
                icons: None,
            },
        ];

        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult, ConnectorError> {
        let name = request.name.as_ref();
        let args = Value::Object(request.arguments.unwrap_or_default());
        tracing::info!(tool = name, "youtube tool call");

        match self.dispatch(name, args).await {
            Ok(result) => Ok(result),
            Err(ConnectorError::ToolNotFound) => Err(ConnectorError::ToolNotFound),
            Err(e) => {
                tracing::warn!(tool = name, code = e.code_str(), error = %e, "youtube tool failed");
                Ok(error_result(&e))
            }
        }
    }
}
