use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod aggregate;
pub mod classify;
pub mod keywords;
pub mod persist;

/// Sentinel author used when neither the author field nor the id prefix is
/// usable. Never ranked as an organization.
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// One model entry fetched from the hub, normalized across the ranked list
/// endpoints. Missing upstream fields fall back to serde defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Globally unique, `<author>/<name>` or bare `<name>`. Dedup key.
    pub id: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub pipeline_tag: Option<String>,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub num_parameters: Option<u64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Ranked view this record was first seen in ("trending" | "downloads" | "likes").
    #[serde(default)]
    pub source: Option<String>,
    /// Set during classification, not by the upstream API.
    #[serde(default)]
    pub tech_category: Option<String>,
    #[serde(default)]
    pub size_category: Option<String>,
}

impl ModelRecord {
    /// The display name: everything after the last `/` of the id.
    pub fn name(&self) -> &str {
        self.id.rsplit_once('/').map(|(_, name)| name).unwrap_or(&self.id)
    }

    /// The author field, falling back to the id prefix, then the sentinel.
    pub fn resolved_author(&self) -> &str {
        if let Some(author) = self.author.as_deref() {
            if !author.is_empty() {
                return author;
            }
        }
        match self.id.split_once('/') {
            Some((owner, _)) if !owner.is_empty() => owner,
            _ => UNKNOWN_AUTHOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgCount {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: u64,
}

/// Aggregate distributions over the deduplicated union of the ranked views.
/// The ranked fields are ordered sequences because rank survives JSON, maps
/// would not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub tech_distribution: BTreeMap<String, u64>,
    #[serde(default)]
    pub size_distribution: BTreeMap<String, u64>,
    #[serde(default)]
    pub top_organizations: Vec<OrgCount>,
    #[serde(default)]
    pub tech_keywords: Vec<KeywordCount>,
}

/// The persisted result of one collection run. Written once, never mutated,
/// superseded by the next run (same-day reruns overwrite the dated file).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Calendar date key, YYYY-MM-DD.
    pub date: String,
    /// RFC3339 collection instant.
    pub timestamp: String,
    #[serde(default)]
    pub trending_models: Vec<ModelRecord>,
    #[serde(default)]
    pub most_downloaded: Vec<ModelRecord>,
    #[serde(default)]
    pub most_liked: Vec<ModelRecord>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub by_category: BTreeMap<String, Vec<ModelRecord>>,
    #[serde(default)]
    pub statistics: Statistics,
}

/// Human-abbreviated count: values below one million get a K suffix, the
/// rest an M suffix. The boundary sits exactly at 1,000,000.
pub fn abbreviate_count(value: u64) -> String {
    if value < 1_000_000 {
        format!("{:.1}K", value as f64 / 1_000.0)
    } else {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_strips_owner_prefix() {
        let record = ModelRecord { id: "acme/foo".into(), ..Default::default() };
        assert_eq!(record.name(), "foo");
        let bare = ModelRecord { id: "foo".into(), ..Default::default() };
        assert_eq!(bare.name(), "foo");
    }

    #[test]
    fn author_falls_back_to_id_prefix_then_sentinel() {
        let explicit = ModelRecord {
            id: "acme/foo".into(),
            author: Some("acme-labs".into()),
            ..Default::default()
        };
        assert_eq!(explicit.resolved_author(), "acme-labs");

        let derived = ModelRecord { id: "acme/foo".into(), ..Default::default() };
        assert_eq!(derived.resolved_author(), "acme");

        let bare = ModelRecord { id: "foo".into(), ..Default::default() };
        assert_eq!(bare.resolved_author(), UNKNOWN_AUTHOR);
    }

    #[test]
    fn abbreviation_boundary_is_one_million() {
        assert_eq!(abbreviate_count(500), "0.5K");
        assert_eq!(abbreviate_count(999), "1.0K");
        assert_eq!(abbreviate_count(1_500), "1.5K");
        assert_eq!(abbreviate_count(1_000_000), "1.0M");
        assert_eq!(abbreviate_count(2_500_000), "2.5M");
        // everything below the boundary keeps the K suffix
        assert!(abbreviate_count(999_999).ends_with('K'));
        assert!(abbreviate_count(1_000_001).ends_with('M'));
    }
}
