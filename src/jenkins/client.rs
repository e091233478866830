use log::debug;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::Token;
use crate::error::{RelayError, Result};

/// Default user for Jenkins API token authentication.
pub const DEFAULT_USER: &str = "jenkins";

/// Jenkins JSON API client.
///
/// Every request carries HTTP Basic credentials built from a fixed user and
/// an API token. Operations are single-attempt; failures surface as
/// [`RelayError`] and are never swallowed here.
pub struct JenkinsClient {
    client: Client,
    base_url: Url,
    user: String,
    token: Token,
}

impl JenkinsClient {
    pub fn new(base_url: &str, user: &str, token: Token) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("cirelay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RelayError::Config(format!("Failed to create HTTP client: {e}")))?;

        let base_url = Url::parse(base_url)
            .map_err(|e| RelayError::Config(format!("Invalid Jenkins URL: {e}")))?;

        if base_url.cannot_be_a_base() {
            return Err(RelayError::Config(format!(
                "Invalid Jenkins URL: {base_url}"
            )));
        }

        Ok(Self {
            client,
            base_url,
            user: user.to_string(),
            token,
        })
    }

    /// Builds `{base}/{segments..}?{query}`. Segments are percent-encoded,
    /// so a job called `Nightly Build` becomes `Nightly%20Build`.
    pub(super) fn endpoint<I>(&self, segments: I, query: Option<&str>) -> Result<Url>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RelayError::Config(format!("Invalid Jenkins URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        url.set_query(query);
        Ok(url)
    }

    /// Builds `{base}/job/{job}/{rest..}`.
    pub(super) fn job_endpoint(&self, job: &str, rest: &[&str], query: Option<&str>) -> Result<Url> {
        let segments = ["job", job].into_iter().chain(rest.iter().copied());
        self.endpoint(segments, query)
    }

    async fn send(&self, method: Method, url: Url) -> Result<Response> {
        debug!("{method} {url}");

        let response = self
            .client
            .request(method, url)
            .basic_auth(&self.user, Some(self.token.as_str()))
            .send()
            .await?;

        debug!("Jenkins responded with status {}", response.status());
        Ok(response)
    }

    /// GETs `url` and decodes the body, requiring a 200 response.
    pub(super) async fn get_json<T>(&self, url: Url, what: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(Method::GET, url).await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(RelayError::status(status));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| RelayError::ApiShape(format!("unexpected format for '{what}': {e}")))
    }

    /// GETs `url` and returns the raw response, leaving status handling to the caller.
    pub(super) async fn get(&self, url: Url) -> Result<Response> {
        self.send(Method::GET, url).await
    }

    /// POSTs to `url`, accepting 200 and 201.
    pub(super) async fn post(&self, url: Url) -> Result<()> {
        let response = self.send(Method::POST, url).await?;
        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            return Err(RelayError::status(status));
        }
        Ok(())
    }
}
