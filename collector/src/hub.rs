//! Hub API client. Two endpoint shapes feed the same record type: the
//! trending feed wraps models in repo entries, the list endpoint returns a
//! flat array. Upstream failures collapse to an empty list at this boundary
//! and never abort a run.

use anyhow::{anyhow, Result};
use hubcore::ModelRecord;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://huggingface.co";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Trending,
    Downloads,
    Likes,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Trending => "trending",
            SortKey::Downloads => "downloads",
            SortKey::Likes => "likes",
        }
    }
}

pub struct HubClient {
    client: reqwest::Client,
    base_url: String,
}

impl HubClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("hub-trend-collector/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client, base_url: base_url.into() })
    }

    /// Fetch one ranked view. Network errors, non-2xx statuses, and malformed
    /// payloads are logged and yield an empty list; the run continues with
    /// whatever the other views returned.
    pub async fn fetch_ranked(&self, sort: SortKey, limit: usize) -> Vec<ModelRecord> {
        let result = match sort {
            SortKey::Trending => self.fetch_trending(limit).await,
            _ => self.fetch_sorted(sort, limit).await,
        };
        match result {
            Ok(records) => {
                tracing::info!(sort = sort.as_str(), count = records.len(), "fetched ranked view");
                records
            }
            Err(err) => {
                tracing::warn!(sort = sort.as_str(), %err, "fetch failed, continuing with empty view");
                Vec::new()
            }
        }
    }

    async fn fetch_trending(&self, limit: usize) -> Result<Vec<ModelRecord>> {
        let url = format!("{}/api/trending", self.base_url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("{url}: status {}", response.status()));
        }
        let payload: TrendingResponse = response.json().await?;
        Ok(map_trending(payload, limit))
    }

    async fn fetch_sorted(&self, sort: SortKey, limit: usize) -> Result<Vec<ModelRecord>> {
        let url = format!("{}/api/models", self.base_url);
        let limit_param = limit.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("sort", sort.as_str()),
                ("direction", "-1"),
                ("limit", limit_param.as_str()),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(anyhow!("{url}: status {}", response.status()));
        }
        let payload: Vec<HubModel> = response.json().await?;
        Ok(payload
            .into_iter()
            .filter_map(|model| model.into_record(sort.as_str()))
            .take(limit)
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct TrendingResponse {
    #[serde(default, rename = "recentlyTrending")]
    recently_trending: Vec<TrendingEntry>,
}

#[derive(Debug, Deserialize)]
struct TrendingEntry {
    #[serde(default, rename = "repoType")]
    repo_type: Option<String>,
    #[serde(default, rename = "repoData")]
    repo_data: Option<HubModel>,
}

/// Superset of the fields both endpoints may carry. Everything is optional;
/// records without an id are dropped.
#[derive(Debug, Deserialize)]
struct HubModel {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    pipeline_tag: Option<String>,
    #[serde(default)]
    downloads: Option<u64>,
    #[serde(default)]
    likes: Option<u64>,
    #[serde(default, rename = "numParameters")]
    num_parameters: Option<u64>,
    #[serde(default)]
    safetensors: Option<Safetensors>,
    #[serde(default, rename = "lastModified")]
    last_modified: Option<String>,
    #[serde(default, rename = "createdAt")]
    created_at: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Safetensors {
    #[serde(default)]
    total: Option<u64>,
}

impl HubModel {
    fn into_record(self, source: &str) -> Option<ModelRecord> {
        let id = self.id.filter(|id| !id.is_empty())?;
        // the list endpoint reports parameter counts under safetensors.total,
        // the trending feed inlines numParameters
        let num_parameters = self
            .safetensors
            .as_ref()
            .and_then(|s| s.total)
            .or(self.num_parameters);
        Some(ModelRecord {
            id,
            author: self.author,
            pipeline_tag: self.pipeline_tag,
            downloads: self.downloads.unwrap_or(0),
            likes: self.likes.unwrap_or(0),
            num_parameters,
            tags: self.tags,
            last_modified: self.last_modified,
            created_at: self.created_at,
            source: Some(source.to_string()),
            tech_category: None,
            size_category: None,
        })
    }
}

fn map_trending(payload: TrendingResponse, limit: usize) -> Vec<ModelRecord> {
    payload
        .recently_trending
        .into_iter()
        .filter(|entry| entry.repo_type.as_deref() == Some("model"))
        .filter_map(|entry| entry.repo_data)
        .filter_map(|model| model.into_record("trending"))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trending_keeps_only_model_repos() {
        let payload: TrendingResponse = serde_json::from_value(json!({
            "recentlyTrending": [
                {"repoType": "model", "repoData": {"id": "acme/foo", "downloads": 10}},
                {"repoType": "dataset", "repoData": {"id": "acme/data"}},
                {"repoType": "model", "repoData": {"id": "beta/bar", "likes": 3}},
            ]
        }))
        .unwrap();
        let records = map_trending(payload, 10);
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["acme/foo", "beta/bar"]);
        assert_eq!(records[0].source.as_deref(), Some("trending"));
    }

    #[test]
    fn trending_respects_the_limit() {
        let payload: TrendingResponse = serde_json::from_value(json!({
            "recentlyTrending": [
                {"repoType": "model", "repoData": {"id": "a/1"}},
                {"repoType": "model", "repoData": {"id": "a/2"}},
                {"repoType": "model", "repoData": {"id": "a/3"}},
            ]
        }))
        .unwrap();
        assert_eq!(map_trending(payload, 2).len(), 2);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let model: HubModel = serde_json::from_value(json!({"id": "acme/foo"})).unwrap();
        let record = model.into_record("downloads").unwrap();
        assert_eq!(record.downloads, 0);
        assert_eq!(record.likes, 0);
        assert!(record.author.is_none());
        assert!(record.num_parameters.is_none());
        assert!(record.tags.is_empty());
    }

    #[test]
    fn safetensors_total_wins_over_inline_parameter_count() {
        let model: HubModel = serde_json::from_value(json!({
            "id": "acme/foo",
            "numParameters": 1u64,
            "safetensors": {"total": 7_000_000_000u64}
        }))
        .unwrap();
        let record = model.into_record("likes").unwrap();
        assert_eq!(record.num_parameters, Some(7_000_000_000));
    }

    #[test]
    fn records_without_an_id_are_dropped() {
        let model: HubModel = serde_json::from_value(json!({"downloads": 5})).unwrap();
        assert!(model.into_record("downloads").is_none());
        let empty: HubModel = serde_json::from_value(json!({"id": ""})).unwrap();
        assert!(empty.into_record("downloads").is_none());
    }

    #[test]
    fn malformed_trending_payload_is_a_parse_error_not_a_panic() {
        let malformed = serde_json::from_value::<TrendingResponse>(json!({
            "recentlyTrending": "nope"
        }));
        assert!(malformed.is_err());
    }
}
