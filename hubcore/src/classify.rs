//! Fixed classification tables: pipeline tag → technology category and
//! parameter count → size bucket. Both are immutable configuration passed
//! explicitly into the pipeline rather than consulted as globals.

use crate::ModelRecord;

/// Fallback category for absent or unmapped pipeline tags.
pub const OTHER_CATEGORY: &str = "Other";

/// Ordered category table; a pipeline tag matches at most one category and
/// the first matching entry wins.
pub struct CategoryMap {
    entries: Vec<(&'static str, &'static [&'static str])>,
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self {
            entries: vec![
                ("Language Models", &["text-generation", "text2text-generation", "conversational"]),
                ("Multimodal", &["image-text-to-text", "any-to-any", "visual-question-answering"]),
                ("Image Generation", &["text-to-image", "image-to-image", "unconditional-image-generation"]),
                ("Video Generation", &["text-to-video", "image-to-video", "video-to-video"]),
                ("Speech Synthesis", &["text-to-speech", "text-to-audio"]),
                ("Speech Recognition", &["automatic-speech-recognition", "audio-to-audio"]),
                ("Document Understanding", &["image-to-text", "document-question-answering"]),
                ("Embeddings", &["feature-extraction", "sentence-similarity"]),
                ("Image Understanding", &["image-classification", "object-detection", "image-segmentation"]),
            ],
        }
    }
}

impl CategoryMap {
    pub fn category_for(&self, pipeline_tag: Option<&str>) -> &'static str {
        let tag = match pipeline_tag {
            Some(tag) => tag,
            None => return OTHER_CATEGORY,
        };
        for (name, tags) in &self.entries {
            if tags.contains(&tag) {
                return name;
            }
        }
        OTHER_CATEGORY
    }

    /// All category names, the fallback last.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.entries.iter().map(|(name, _)| *name).collect();
        names.push(OTHER_CATEGORY);
        names
    }
}

/// Ordered (upper bound, label) pairs over the parameter count. Contiguous
/// and exhaustive: every count lands in exactly one bucket.
pub struct SizeBuckets {
    bounds: Vec<(u64, &'static str)>,
    top: &'static str,
    unknown: &'static str,
}

impl Default for SizeBuckets {
    fn default() -> Self {
        Self {
            bounds: vec![
                (1_000_000_000, "tiny (<1B)"),
                (7_000_000_000, "small (1B-7B)"),
                (32_000_000_000, "medium (7B-32B)"),
                (128_000_000_000, "large (32B-128B)"),
            ],
            top: "huge (>128B)",
            unknown: "unknown",
        }
    }
}

impl SizeBuckets {
    pub fn bucket_for(&self, num_parameters: Option<u64>) -> &'static str {
        let count = match num_parameters {
            Some(count) => count,
            None => return self.unknown,
        };
        for (bound, label) in &self.bounds {
            if count < *bound {
                return label;
            }
        }
        self.top
    }

    pub fn unknown_label(&self) -> &'static str {
        self.unknown
    }
}

/// Fill the derived category fields on a fetched record.
pub fn classify(record: &mut ModelRecord, categories: &CategoryMap, sizes: &SizeBuckets) {
    record.tech_category = Some(categories.category_for(record.pipeline_tag.as_deref()).to_string());
    record.size_category = Some(sizes.bucket_for(record.num_parameters).to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_map_to_their_category() {
        let map = CategoryMap::default();
        assert_eq!(map.category_for(Some("text-generation")), "Language Models");
        assert_eq!(map.category_for(Some("text-to-image")), "Image Generation");
        assert_eq!(map.category_for(Some("automatic-speech-recognition")), "Speech Recognition");
    }

    #[test]
    fn unmapped_and_absent_tags_fall_through_to_other() {
        let map = CategoryMap::default();
        assert_eq!(map.category_for(Some("reinforcement-learning")), OTHER_CATEGORY);
        assert_eq!(map.category_for(None), OTHER_CATEGORY);
    }

    #[test]
    fn buckets_are_exhaustive_and_exclusive() {
        let buckets = SizeBuckets::default();
        assert_eq!(buckets.bucket_for(Some(0)), "tiny (<1B)");
        assert_eq!(buckets.bucket_for(Some(999_999_999)), "tiny (<1B)");
        assert_eq!(buckets.bucket_for(Some(1_000_000_000)), "small (1B-7B)");
        assert_eq!(buckets.bucket_for(Some(7_000_000_000)), "medium (7B-32B)");
        assert_eq!(buckets.bucket_for(Some(32_000_000_000)), "large (32B-128B)");
        assert_eq!(buckets.bucket_for(Some(128_000_000_000)), "huge (>128B)");
        assert_eq!(buckets.bucket_for(None), "unknown");
    }

    #[test]
    fn classify_fills_both_derived_fields() {
        let mut record = ModelRecord {
            id: "acme/foo-7b".into(),
            pipeline_tag: Some("text-generation".into()),
            num_parameters: Some(7_000_000_000),
            ..Default::default()
        };
        classify(&mut record, &CategoryMap::default(), &SizeBuckets::default());
        assert_eq!(record.tech_category.as_deref(), Some("Language Models"));
        assert_eq!(record.size_category.as_deref(), Some("medium (7B-32B)"));
    }
}
