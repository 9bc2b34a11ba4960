//! CORE (core.ac.uk) paper search client.
//!
//! Partial-failure policy: a missing key or a failed call degrades to an
//! empty result set so the caller can report "no papers" instead of an
//! error. Only an empty query is rejected outright.

use crate::research::types::{Paper, SortKey};
use anyhow::{bail, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE: &str = "https://api.core.ac.uk/v3/search/works";

/// Query used for the /random_ideas trending fetch.
const TRENDING_QUERY: &str =
    "machine learning OR artificial intelligence OR deep learning OR data science OR quantum computing";

#[derive(Clone)]
pub struct CoreClient {
    http: Client,
    base: String,
    key: Option<String>,
}

impl CoreClient {
    pub fn new(key: Option<String>, base: Option<String>) -> Self {
        let http = Client::builder()
            .user_agent(concat!("paperscout/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()
            .expect("reqwest client");
        Self { http, base: base.unwrap_or_else(|| DEFAULT_BASE.to_string()), key }
    }

    pub async fn search(&self, query: &str, limit: usize, sort: SortKey) -> Result<Vec<Paper>> {
        let query = query.trim();
        if query.is_empty() {
            bail!("search query cannot be empty");
        }
        let key = match &self.key {
            Some(k) => k.clone(),
            None => {
                debug!("CORE_API_KEY not set; returning no results");
                return Ok(vec![]);
            }
        };

        crate::metrics::inc_backend_call("core", "attempt");
        let limit = limit.max(1).to_string();
        let resp = match self
            .http
            .get(&self.base)
            .bearer_auth(key)
            .query(&[
                ("q", query),
                ("limit", limit.as_str()),
                ("sort", sort.as_str()),
                ("language", "en"),
            ])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "CORE search request failed");
                crate::metrics::inc_backend_call("core", "error");
                return Ok(vec![]);
            }
        };

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let mut preview = body.trim().to_string();
            preview.truncate(200);
            warn!(%status, body = %preview, "CORE search returned non-success");
            crate::metrics::inc_backend_call("core", "error");
            return Ok(vec![]);
        }

        let payload: serde_json::Value = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "CORE search returned malformed JSON");
                crate::metrics::inc_backend_call("core", "error");
                return Ok(vec![]);
            }
        };

        crate::metrics::inc_backend_call("core", "ok");
        let hits = payload
            .get("results")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();
        Ok(hits.iter().map(Paper::from_core_hit).collect())
    }

    /// Trending fetch backing /random_ideas: fixed broad query, five hits.
    pub async fn trending(&self) -> Result<Vec<Paper>> {
        self.search(TRENDING_QUERY, 5, SortKey::Relevance).await
    }
}
