//! Merge and aggregation over the ranked views: first-seen-wins dedup by id,
//! then the four distributions. All computations tolerate an empty input and
//! yield empty mappings.

use crate::classify::OTHER_CATEGORY;
use crate::keywords::KeywordVocab;
use crate::{KeywordCount, ModelRecord, OrgCount, Statistics, UNKNOWN_AUTHOR};
use std::collections::{BTreeMap, HashMap, HashSet};

pub const TOP_ORGANIZATIONS: usize = 20;
pub const TOP_KEYWORDS: usize = 50;
pub const MIN_KEYWORD_COUNT: u64 = 2;

/// Concatenate ranked lists and deduplicate by id. The first occurrence wins
/// wholesale; later duplicates are dropped, so relative first-seen order is
/// preserved.
pub fn merge(lists: Vec<Vec<ModelRecord>>) -> Vec<ModelRecord> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::new();
    for list in lists {
        for record in list {
            if seen.insert(record.id.clone()) {
                merged.push(record);
            }
        }
    }
    merged
}

/// Distributions over an already-deduplicated record set. The "unknown"
/// author sentinel is counted as absent, never as an organization.
pub fn aggregate(records: &[ModelRecord], vocab: &KeywordVocab) -> Statistics {
    let mut tech_distribution: BTreeMap<String, u64> = BTreeMap::new();
    let mut size_distribution: BTreeMap<String, u64> = BTreeMap::new();
    // Counts kept in first-seen order; a stable sort later preserves that
    // order among equal counts.
    let mut orgs: Vec<(String, u64)> = Vec::new();
    let mut org_index: HashMap<String, usize> = HashMap::new();
    let mut keywords: Vec<(String, u64)> = Vec::new();
    let mut keyword_index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let category = record.tech_category.as_deref().unwrap_or(OTHER_CATEGORY);
        *tech_distribution.entry(category.to_string()).or_insert(0) += 1;

        let bucket = record.size_category.as_deref().unwrap_or("unknown");
        *size_distribution.entry(bucket.to_string()).or_insert(0) += 1;

        let author = record.resolved_author();
        if author != UNKNOWN_AUTHOR {
            match org_index.get(author) {
                Some(&i) => orgs[i].1 += 1,
                None => {
                    org_index.insert(author.to_string(), orgs.len());
                    orgs.push((author.to_string(), 1));
                }
            }
        }

        for keyword in vocab.extract(record) {
            match keyword_index.get(&keyword) {
                Some(&i) => keywords[i].1 += 1,
                None => {
                    keyword_index.insert(keyword.clone(), keywords.len());
                    keywords.push((keyword, 1));
                }
            }
        }
    }

    orgs.sort_by(|a, b| b.1.cmp(&a.1));
    orgs.truncate(TOP_ORGANIZATIONS);

    keywords.retain(|(_, count)| *count >= MIN_KEYWORD_COUNT);
    keywords.sort_by(|a, b| b.1.cmp(&a.1));
    keywords.truncate(TOP_KEYWORDS);

    Statistics {
        tech_distribution,
        size_distribution,
        top_organizations: orgs
            .into_iter()
            .map(|(name, count)| OrgCount { name, count })
            .collect(),
        tech_keywords: keywords
            .into_iter()
            .map(|(keyword, count)| KeywordCount { keyword, count })
            .collect(),
    }
}

/// Group the union by category, keeping the first `cap` records per category
/// in merged order.
pub fn group_by_category(records: &[ModelRecord], cap: usize) -> BTreeMap<String, Vec<ModelRecord>> {
    let mut groups: BTreeMap<String, Vec<ModelRecord>> = BTreeMap::new();
    for record in records {
        let category = record
            .tech_category
            .clone()
            .unwrap_or_else(|| OTHER_CATEGORY.to_string());
        let bucket = groups.entry(category).or_default();
        if bucket.len() < cap {
            bucket.push(record.clone());
        }
    }
    groups
}
