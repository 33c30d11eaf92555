//! Page fetcher
//!
//! A single blocking GET per page. No retries, no caching.

use crate::{BrefError, HttpConfig, Result};
use reqwest::StatusCode;

/// Blocking HTTP client for stats pages
pub struct PageFetcher {
    client: reqwest::blocking::Client,
}

impl PageFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BrefError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(PageFetcher { client })
    }

    /// Use a preconfigured client (proxies, extra headers)
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        PageFetcher { client }
    }

    /// Fetch `url` and return the response body as text.
    ///
    /// The URL must be absolute (include the scheme).
    pub fn fetch(&self, url: &str) -> Result<String> {
        log::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| BrefError::Request {
                url: url.to_string(),
                source,
            })?;

        check_status(response.status(), url)?;

        response.text().map_err(|source| BrefError::Request {
            url: url.to_string(),
            source,
        })
    }
}

/// Map a response status onto the fetcher's error taxonomy
pub fn check_status(status: StatusCode, url: &str) -> Result<()> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::NOT_FOUND => Err(BrefError::PageNotFound {
            status: status.as_u16(),
            url: url.to_string(),
        }),
        other => Err(BrefError::UnexpectedStatus {
            status: other.as_u16(),
            url: url.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{local_fetcher as fetcher, serve_once};
    use std::net::TcpListener;

    #[test]
    fn test_new_from_config() {
        let config = HttpConfig {
            user_agent: "bref-test".to_string(),
            timeout_secs: 5,
        };
        assert!(PageFetcher::new(&config).is_ok());
    }

    #[test]
    fn test_fetch_ok_returns_body() {
        let (url, handle) = serve_once("200 OK", "<table></table>");
        let html = fetcher().fetch(&url).unwrap();
        handle.join().unwrap();
        assert_eq!(html, "<table></table>");
    }

    #[test]
    fn test_fetch_404_is_page_not_found() {
        let (url, handle) = serve_once("404 Not Found", "");
        let err = fetcher().fetch(&url).unwrap_err();
        handle.join().unwrap();
        assert!(matches!(err, BrefError::PageNotFound { status: 404, .. }));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_fetch_other_status_is_unexpected() {
        let (url, handle) = serve_once("500 Internal Server Error", "oops");
        let err = fetcher().fetch(&url).unwrap_err();
        handle.join().unwrap();
        assert!(matches!(err, BrefError::UnexpectedStatus { status: 500, .. }));
        assert!(err.is_page_error());
    }

    #[test]
    fn test_connection_refused_is_request_error() {
        // Grab a free port, then close it so nothing is listening
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let err = fetcher().fetch(&format!("http://{}/", addr)).unwrap_err();
        assert!(matches!(err, BrefError::Request { .. }));
    }

    #[test]
    fn test_relative_url_is_request_error() {
        let err = fetcher().fetch("/leagues/NBA_2025.html").unwrap_err();
        assert!(matches!(err, BrefError::Request { .. }));
    }

    #[test]
    fn test_check_status() {
        assert!(check_status(StatusCode::OK, "u").is_ok());
        assert!(matches!(
            check_status(StatusCode::NOT_FOUND, "u"),
            Err(BrefError::PageNotFound { status: 404, .. })
        ));
        assert!(matches!(
            check_status(StatusCode::MOVED_PERMANENTLY, "u"),
            Err(BrefError::UnexpectedStatus { status: 301, .. })
        ));
        assert!(matches!(
            check_status(StatusCode::NO_CONTENT, "u"),
            Err(BrefError::UnexpectedStatus { status: 204, .. })
        ));
    }
}
