//! HTTP fetcher implementation
//!
//! This module owns all outbound HTTP for the pipeline:
//! - Building the shared client with user agent and timeouts
//! - Fetching page bodies as text
//! - Fetching PDF resources as raw bytes

use crate::config::HttpConfig;
use crate::HarvestError;
use reqwest::Client;
use std::time::Duration;

/// Builds the shared HTTP client from configuration
///
/// The request timeout bounds every individual page or PDF fetch; a hanging
/// remote host can stall one worker slot for at most that long.
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns the response body as text
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// * `Ok(String)` - The body of a 2xx response
/// * `Err(HarvestError)` - Network failure or non-success status
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, HarvestError> {
    let response = client.get(url).send().await?;
    let status = response.status();

    if !status.is_success() {
        return Err(HarvestError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response.text().await?)
}

/// Fetches a URL and returns the response body as raw bytes
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - The body of a 2xx response
/// * `Err(HarvestError)` - Network failure or non-success status
pub async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>, HarvestError> {
    let response = client.get(url).send().await?;
    let status = response.status();

    if !status.is_success() {
        return Err(HarvestError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response.bytes().await?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_config() -> HttpConfig {
        HttpConfig {
            user_agent: "mailharvest-test/0.1".to_string(),
            request_timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }

    #[test]
    fn test_build_http_client() {
        let config = create_test_config();
        assert!(build_http_client(&config).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_page_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = build_http_client(&create_test_config()).unwrap();
        let result = fetch_page(&client, &format!("{}/missing", server.uri())).await;

        match result {
            Err(HarvestError::HttpStatus { status, .. }) => assert_eq!(status, 500),
            other => panic!("expected HttpStatus error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_fetch_bytes_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/blob"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
            .mount(&server)
            .await;

        let client = build_http_client(&create_test_config()).unwrap();
        let bytes = fetch_bytes(&client, &format!("{}/blob", server.uri()))
            .await
            .expect("fetch succeeds");

        assert_eq!(bytes, vec![1, 2, 3]);
    }
}
