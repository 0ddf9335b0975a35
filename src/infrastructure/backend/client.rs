//! HTTP implementation of [`SearchBackend`] on top of `reqwest`

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::SearchBackend;
use crate::config::BackendConfig;
use crate::domain::{BackendError, SearchPage, SuggestionList};
use crate::shared::{retry_with_backoff, RetryPolicy};

/// Client for `GET /api/search` and `GET /api/suggestions`
#[derive(Clone)]
pub struct HttpSearchBackend {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl HttpSearchBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        url::Url::parse(&config.base_url)
            .map_err(|e| BackendError::InvalidBaseUrl(format!("{}: {}", config.base_url, e)))?;

        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: config.retry_policy(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        params: &[(&str, String)],
    ) -> Result<T, BackendError> {
        let target = format!("{}{}", self.base_url, endpoint);
        let url = target.as_str();
        let client = &self.client;

        let result = retry_with_backoff(&self.retry, endpoint, BackendError::is_transient, move || async move {
            debug!(url, "Calling search backend");
            let response = client.get(url).query(params).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(BackendError::Status(status.as_u16()));
            }
            Ok(response.json::<T>().await?)
        })
        .await;

        let outcome = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!("backend_requests_total", "endpoint" => endpoint, "outcome" => outcome)
            .increment(1);

        result
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search(&self, query: &str, page: u32, size: u32) -> Result<SearchPage, BackendError> {
        let params = [
            ("q", query.to_string()),
            ("page", page.to_string()),
            ("size", size.to_string()),
        ];
        self.get_json("/api/search", &params).await
    }

    async fn suggestions(&self, term: &str) -> Result<Vec<String>, BackendError> {
        let params = [("q", term.to_string())];
        let list: SuggestionList = self.get_json("/api/suggestions", &params).await?;
        Ok(list.suggestions)
    }
}
