//! HTTP client abstraction for testability

use std::time::Duration;

use super::types::{ProviderError, DEFAULT_TIMEOUT_SECS};

/// Trait for HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request and returns the response body.
    fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError>;
}

/// Real HTTP client implementation using reqwest.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with the default timeout.
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a new ReqwestClient with custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                ProviderError::HttpError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    // Tile URLs carry the API key, so reqwest errors are stripped of their URL
    fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        let response = self.client.get(url).send().map_err(|e| {
            ProviderError::HttpError(format!("Request failed: {}", e.without_url()))
        })?;

        // Check HTTP status
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::HttpError(format!("HTTP {}", status)));
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| {
                ProviderError::HttpError(format!("Failed to read response: {}", e.without_url()))
            })
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock HTTP client for testing. Records every requested URL.
    pub struct MockHttpClient {
        pub response: Result<Vec<u8>, ProviderError>,
        pub requests: Mutex<Vec<String>>,
    }

    impl MockHttpClient {
        pub fn new(response: Result<Vec<u8>, ProviderError>) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn requested_urls(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl HttpClient for MockHttpClient {
        fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
            self.requests.lock().unwrap().push(url.to_string());
            self.response.clone()
        }
    }

    #[test]
    fn test_mock_client_success() {
        let mock = MockHttpClient::new(Ok(vec![1, 2, 3, 4]));

        let result = mock.get("http://example.com");
        assert_eq!(result.unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(mock.requested_urls(), vec!["http://example.com"]);
    }

    #[test]
    fn test_mock_client_error() {
        let mock = MockHttpClient::new(Err(ProviderError::HttpError("Test error".to_string())));

        let result = mock.get("http://example.com");
        assert!(result.is_err());
    }

    #[test]
    fn test_reqwest_client_builds() {
        assert!(ReqwestClient::with_timeout(5).is_ok());
    }

    #[test]
    fn test_request_error_omits_url() {
        let client = ReqwestClient::with_timeout(2).unwrap();

        // Nothing listens on port 1
        let result = client.get("http://127.0.0.1:1/16/1/1/png?style=s&size=512&apiKey=SUPERSECRET");

        match result {
            Err(ProviderError::HttpError(msg)) => {
                assert!(msg.starts_with("Request failed"), "unexpected error: {}", msg);
                assert!(!msg.contains("SUPERSECRET"), "key leaked: {}", msg);
                assert!(!msg.contains("127.0.0.1"), "url leaked: {}", msg);
            }
            other => panic!("Expected HttpError, got {:?}", other),
        }
    }
}
