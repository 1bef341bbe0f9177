#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use ytlens_core::connectors::youtube::{PageFetcher, YouTubeConnector};
use ytlens_core::ConnectorError;

pub const BASE_URL: &str = "https://www.youtube.com";

/// Serves canned bodies by URL prefix and records every request.
#[derive(Default)]
pub struct StubFetcher {
    routes: Vec<(String, Result<String, u16>)>,
    pub requests: Mutex<Vec<(String, Option<String>)>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, prefix: &str, body: impl Into<String>) -> Self {
        self.routes.push((prefix.to_string(), Ok(body.into())));
        self
    }

    pub fn status(mut self, prefix: &str, status: u16) -> Self {
        self.routes.push((prefix.to_string(), Err(status)));
        self
    }

    pub fn requested(&self) -> Vec<(String, Option<String>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch_text(&self, url: &str, referer: Option<&str>) -> Result<String, ConnectorError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), referer.map(str::to_string)));
        match self.routes.iter().find(|(prefix, _)| url.starts_with(prefix.as_str())) {
            Some((_, Ok(body))) => Ok(body.clone()),
            Some((_, Err(status))) => Err(ConnectorError::HttpStatus { status: *status }),
            None => Err(ConnectorError::HttpStatus { status: 404 }),
        }
    }
}

pub fn connector(stub: StubFetcher) -> (YouTubeConnector, Arc<StubFetcher>) {
    let stub = Arc::new(stub);
    (YouTubeConnector::with_fetcher(stub.clone(), BASE_URL), stub)
}

pub fn html_with(variable: &str, data: &Value) -> String {
    format!(
        "<!DOCTYPE html><html><head></head><body><script nonce=\"abc\">var {} = {};</script></body></html>",
        variable, data
    )
}

pub fn search_page(items: Vec<Value>) -> String {
    let data = serde_json::json!({
        "contents": {"twoColumnSearchResultsRenderer": {"primaryContents": {
            "sectionListRenderer": {"contents": [
                {"itemSectionRenderer": {"contents": items}},
                {"continuationItemRenderer": {}}
            ]}
        }}}
    });
    html_with("ytInitialData", &data)
}

pub fn video_renderer(id: &str, title: &str) -> Value {
    serde_json::json!({"videoRenderer": {
        "videoId": id,
        "title": {"runs": [{"text": title}]},
        "ownerText": {"runs": [{
            "text": "Some Channel",
            "navigationEndpoint": {"commandMetadata": {"webCommandMetadata": {"url": "/@somechannel"}}}
        }]},
        "viewCountText": {"simpleText": "12 views"},
        "publishedTimeText": {"simpleText": "1 day ago"}
    }})
}
