//! HTTP client for the platform REST API.
//!
//! The bearer token is read from the [`SessionStore`] on every request, so
//! signing in or out takes effect without rebuilding the client. Requests
//! made while signed out carry no `Authorization` header at all.

use std::time::Duration;

use reqwest::header::RETRY_AFTER;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::error::{AgoraError, Result};
use crate::paging::Page;
use crate::state::SessionStore;

use super::error::ApiError;
use super::models::{Poll, Profile};
use super::query::{ListQuery, PollType};

/// Body of `POST /communities/{id}/polls`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPoll {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub poll_type: PollType,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closes_at: Option<jiff::Timestamp>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
    session: SessionStore,
}

impl ApiClient {
    /// Configures HTTP client with 10s connect timeout and 30s total timeout.
    pub fn new(base: Url, session: SessionStore) -> Result<Self> {
        if base.cannot_be_a_base() {
            return Err(AgoraError::Config(format!(
                "API URL '{base}' cannot be used as a base URL"
            )));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("agora/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base,
            session,
        })
    }

    pub fn from_config(config: &Config, session: SessionStore) -> Result<Self> {
        Self::new(config.api_url()?, session)
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Absolute URL for `segments` below the API base.
    pub fn endpoint<S: AsRef<str>>(&self, segments: &[S]) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                AgoraError::Config(format!("API URL '{}' cannot be a base", self.base))
            })?;
            path.pop_if_empty();
            path.extend(segments.iter().map(|s| s.as_ref()));
        }
        Ok(url)
    }

    /// URL for one page of the list described by `filters`.
    pub fn list_url<F: ListQuery>(&self, filters: &F, page: u32, page_size: u32) -> Result<Url> {
        if page == 0 {
            return Err(AgoraError::InvalidPage(page));
        }
        let mut url = self.endpoint(&filters.path_segments())?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &page.to_string());
            query.append_pair("page_size", &page_size.to_string());
            for (key, value) in filters.params(self.is_authenticated()) {
                query.append_pair(key, &value);
            }
        }
        Ok(url)
    }

    pub async fn fetch_page<F, T>(&self, filters: &F, page: u32, page_size: u32) -> Result<Page<T>>
    where
        F: ListQuery,
        T: DeserializeOwned,
    {
        let url = self.list_url(filters, page, page_size)?;
        tracing::debug!("GET {}", url);
        let response = self.authorize(self.http.get(url)).send().await?;
        decode(response).await
    }

    /// `GET /me`
    pub async fn fetch_profile(&self) -> Result<Profile> {
        if !self.is_authenticated() {
            return Err(AgoraError::Auth("not signed in".to_string()));
        }
        let url = self.endpoint(&["me"])?;
        let response = self.authorize(self.http.get(url)).send().await?;
        decode(response).await
    }

    /// `POST /communities/{id}/polls`
    pub async fn create_poll(&self, community_id: &str, poll: &NewPoll) -> Result<Poll> {
        let url = self.endpoint(&["communities", community_id, "polls"])?;
        tracing::debug!("POST {}", url);
        let response = self
            .authorize(self.http.post(url))
            .json(poll)
            .send()
            .await?;
        decode(response).await
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            // bearer_auth marks the header value as sensitive
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    let body = response.text().await.unwrap_or_default();
    let error = ApiError::from_body(status, &body).with_retry_after(retry_after);
    tracing::warn!("API request failed: {}", error);
    Err(error.into())
}
