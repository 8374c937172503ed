//! HTTP client for the NodePing API.

use super::{Check, CheckResult, CheckSource, ConnectError, SourceError};

use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

/// Public NodePing API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.nodeping.com/api/1";

/// NodePing API client authenticated with a single token.
#[derive(Debug, Clone)]
pub struct NodePingClient {
    http: reqwest::Client,
    api_url: Url,
    token: String,
}

impl NodePingClient {
    /// Build a client without touching the network.
    ///
    /// An empty token is refused here rather than discovered on the first request.
    pub fn new(api_url: &str, token: &str, timeout: Duration) -> Result<Self, ConnectError> {
        if token.is_empty() {
            return Err(ConnectError::MissingToken);
        }

        let invalid_url = |reason: String| ConnectError::InvalidUrl {
            url: api_url.to_string(),
            reason,
        };
        let parsed = Url::parse(api_url).map_err(|e| invalid_url(e.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid_url("cannot be used as a base URL".to_string()));
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            api_url: parsed,
            token: token.to_string(),
        })
    }

    /// Build a client and make sure the API accepts its token.
    pub async fn connect(
        api_url: &str,
        token: &str,
        timeout: Duration,
    ) -> Result<Self, ConnectError> {
        let client = Self::new(api_url, token, timeout)?;
        client
            .verify_access()
            .await
            .map_err(ConnectError::Verification)?;
        Ok(client)
    }

    /// API URL with the given path segments appended, each one escaped.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn request(&self, url: Url) -> Result<Response, SourceError> {
        let response = self
            .http
            .get(url.clone())
            .basic_auth(&self.token, None::<&str>)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Cannot make request to {}: {}", url, e);
                SourceError::Unavailable {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            })?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(SourceError::Auth {
                url: url.to_string(),
            }),
            status => Err(SourceError::Unavailable {
                url: url.to_string(),
                reason: format!("got status code {}", status.as_u16()),
            }),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, SourceError> {
        let response = self.request(url).await?;
        let url = response.url().to_string();

        let body = response.bytes().await.map_err(|e| SourceError::Unavailable {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        serde_json::from_slice(&body).map_err(|e| {
            tracing::error!("Can't decode body received from {}: {}", url, e);
            SourceError::Decode {
                url,
                reason: e.to_string(),
            }
        })
    }
}

impl CheckSource for NodePingClient {
    async fn list_checks(&self) -> Result<HashMap<String, Check>, SourceError> {
        self.get_json(self.endpoint(&["checks"])).await
    }

    async fn latest_result(&self, check_id: &str) -> Result<CheckResult, SourceError> {
        let mut url = self.endpoint(&["results", check_id]);
        url.query_pairs_mut().append_pair("limit", "1");

        let results: Vec<CheckResult> = self.get_json(url).await?;

        results
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::EmptyResult(check_id.to_string()))
    }

    async fn verify_access(&self) -> Result<(), SourceError> {
        self.request(self.endpoint(&["info", "probe"])).await.map(|_| ())
    }
}
