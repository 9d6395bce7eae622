//! HTTP implementation of the feed fetch capability.

use crate::core::error::RatesError;
use crate::core::feed::FeedFetcher;
use async_trait::async_trait;
use tracing::debug;

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, RatesError> {
        let client = reqwest::Client::builder()
            .user_agent("ecbfx/0.2")
            .build()
            .map_err(|e| RatesError::Connection(e.to_string()))?;
        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl FeedFetcher for HttpFetcher {
    async fn fetch_url(&self, url: &str) -> Result<Vec<u8>, RatesError> {
        debug!("Requesting feed from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RatesError::Connection(format!("request error: {e} for URL: {url}")))?;

        if !response.status().is_success() {
            return Err(RatesError::Connection(format!(
                "HTTP error: {} for URL: {}",
                response.status(),
                url
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RatesError::Connection(format!("body read error: {e}")))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_successful_fetch() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eurofxref-daily.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<feed/>"))
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = format!("{}/eurofxref-daily.xml", mock_server.uri());
        let bytes = fetcher.fetch_url(&url).await.unwrap();
        assert_eq!(bytes, b"<feed/>");
    }

    #[tokio::test]
    async fn test_http_error_maps_to_connection() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eurofxref-daily.xml"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = format!("{}/eurofxref-daily.xml", mock_server.uri());
        let err = fetcher.fetch_url(&url).await.unwrap_err();
        assert!(matches!(err, RatesError::Connection(_)));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_unreachable_host_maps_to_connection() {
        let fetcher = HttpFetcher::new().unwrap();
        // Reserved port on localhost with nothing listening
        let err = fetcher
            .fetch_url("http://127.0.0.1:9/eurofxref-daily.xml")
            .await
            .unwrap_err();
        assert!(matches!(err, RatesError::Connection(_)));
    }
}
