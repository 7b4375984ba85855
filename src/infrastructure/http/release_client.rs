use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::common::error::ChronosError;
use crate::common::result::{ChronosResult, OptionExt};

/// GitHub API endpoint for the newest published release
pub const LATEST_RELEASE_URL: &str =
    "https://api.github.com/repos/amenophis1er/chronos/releases/latest";

/// Page users are pointed at when an update exists
pub const RELEASES_PAGE_URL: &str = "https://github.com/amenophis1er/chronos/releases/latest";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the latest released version comes from
#[cfg_attr(test, mockall::automock)]
pub trait ReleaseSource {
    /// Tag name of the latest release, e.g. `v1.4.0`
    fn latest_version(&self) -> ChronosResult<String>;
}

#[derive(Debug, Deserialize)]
struct ReleaseResponse {
    tag_name: Option<String>,
}

/// Release lookup through the GitHub REST API
pub struct GitHubReleaseClient {
    url: String,
    user_agent: String,
    client: Client,
}

impl GitHubReleaseClient {
    pub fn new() -> ChronosResult<Self> {
        Self::with_url(LATEST_RELEASE_URL)
    }

    pub fn with_url(url: impl Into<String>) -> ChronosResult<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            url: url.into(),
            user_agent: format!("chronos/{}", env!("CARGO_PKG_VERSION")),
            client,
        })
    }
}

impl ReleaseSource for GitHubReleaseClient {
    fn latest_version(&self) -> ChronosResult<String> {
        debug!("Fetching latest release from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .header(USER_AGENT, &self.user_agent)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(ChronosError::network_error(
                format!("GitHub API returned {}: {}", status, body.trim()),
                Some(self.url.clone()),
            ));
        }

        parse_release(&body)
    }
}

fn parse_release(body: &str) -> ChronosResult<String> {
    let release: ReleaseResponse = serde_json::from_str(body)?;
    release
        .tag_name
        .ok_or_validation_error("tag_name", format!("Invalid response from GitHub API: {}", body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_release_tag() {
        let body = r#"{"tag_name": "v1.4.0", "name": "1.4.0"}"#;
        assert_eq!(parse_release(body).unwrap(), "v1.4.0");
    }

    #[test]
    fn test_parse_release_without_tag() {
        let err = parse_release(r#"{"message": "Not Found"}"#).unwrap_err();
        assert!(matches!(err, ChronosError::ValidationError { ref field, .. } if field == "tag_name"));
    }

    #[test]
    fn test_parse_release_invalid_json() {
        assert!(matches!(
            parse_release("rate limited"),
            Err(ChronosError::SerializationError { .. })
        ));
    }
}
