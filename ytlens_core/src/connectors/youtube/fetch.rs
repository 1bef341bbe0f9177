use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use reqwest::Client;
use std::time::Duration;

use crate::config::YouTubeConfig;
use crate::error::ConnectorError;

/// Retrieves page and caption bodies for the projectors.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url` and return the body. A non-2xx status is [`ConnectorError::HttpStatus`].
    async fn fetch_text(&self, url: &str, referer: Option<&str>) -> Result<String, ConnectorError>;
}

/// reqwest-backed fetcher that presents itself as a desktop browser.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &YouTubeConfig) -> Result<Self, ConnectorError> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(browser_headers(&config.accept_language)?)
            .cookie_store(true);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build().map_err(ConnectorError::HttpRequest)?,
        })
    }
}

fn browser_headers(accept_language: &str) -> Result<HeaderMap, ConnectorError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(accept_language)
            .map_err(|e| ConnectorError::Other(format!("Invalid Accept-Language: {}", e)))?,
    );
    headers.insert(
        "sec-ch-ua",
        HeaderValue::from_static(
            "\"Chromium\";v=\"124\", \"Google Chrome\";v=\"124\", \"Not-A.Brand\";v=\"99\"",
        ),
    );
    headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
    headers.insert("sec-ch-ua-platform", HeaderValue::from_static("\"Windows\""));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("same-origin"));
    headers.insert("sec-fetch-user", HeaderValue::from_static("?1"));
    headers.insert("upgrade-insecure-requests", HeaderValue::from_static("1"));
    Ok(headers)
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str, referer: Option<&str>) -> Result<String, ConnectorError> {
        tracing::debug!(url, ?referer, "fetching");

        let mut request = self.client.get(url);
        if let Some(referer) = referer {
            request = request.header(REFERER, referer);
        }

        let response = request.send().await.map_err(ConnectorError::HttpRequest)?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "upstream returned error status");
            return Err(ConnectorError::HttpStatus {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(ConnectorError::HttpRequest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_default_config() {
        assert!(HttpFetcher::new(&YouTubeConfig::default()).is_ok());
    }

    #[test]
    fn rejects_unencodable_accept_language() {
        let headers = browser_headers("en\nUS");
        assert!(headers.is_err());
    }

    #[test]
    fn sends_fetch_metadata_hints() {
        let headers = browser_headers("en-US,en;q=0.9").unwrap();
        assert_eq!(headers[ACCEPT_LANGUAGE], "en-US,en;q=0.9");
        assert_eq!(headers["sec-fetch-mode"], "navigate");
        assert!(headers.contains_key("sec-ch-ua"));
    }
}
