use hubcore::aggregate::{aggregate, group_by_category, merge, TOP_ORGANIZATIONS};
use hubcore::classify::{classify, CategoryMap, SizeBuckets, OTHER_CATEGORY};
use hubcore::keywords::KeywordVocab;
use hubcore::{ModelRecord, UNKNOWN_AUTHOR};

fn record(id: &str, downloads: u64) -> ModelRecord {
    ModelRecord { id: id.into(), downloads, ..Default::default() }
}

fn classified(id: &str, tag: Option<&str>, params: Option<u64>) -> ModelRecord {
    let mut rec = ModelRecord {
        id: id.into(),
        pipeline_tag: tag.map(|t| t.to_string()),
        num_parameters: params,
        ..Default::default()
    };
    classify(&mut rec, &CategoryMap::default(), &SizeBuckets::default());
    rec
}

#[test]
fn merge_drops_later_duplicates_wholesale() {
    let first = vec![record("acme/foo", 100), record("acme/bar", 50)];
    let second = vec![record("acme/foo", 999), record("beta/baz", 10)];
    let merged = merge(vec![first, second]);

    let ids: Vec<&str> = merged.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["acme/foo", "acme/bar", "beta/baz"]);
    // the survivor carries the fields of the first list it appeared in
    assert_eq!(merged[0].downloads, 100);
}

#[test]
fn merge_never_yields_duplicate_ids() {
    let lists = vec![
        vec![record("a/1", 1), record("a/2", 2), record("a/1", 3)],
        vec![record("a/2", 4), record("a/3", 5)],
        vec![record("a/3", 6)],
    ];
    let merged = merge(lists);
    let mut ids: Vec<&str> = merged.iter().map(|m| m.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), merged.len());
}

#[test]
fn tech_distribution_sums_to_union_size() {
    let records = vec![
        classified("a/gen1", Some("text-generation"), None),
        classified("a/gen2", Some("text2text-generation"), None),
        classified("b/img", Some("text-to-image"), None),
        classified("b/mystery", Some("never-heard-of-it"), None),
        classified("c/untagged", None, None),
    ];
    let stats = aggregate(&records, &KeywordVocab::default());

    let total: u64 = stats.tech_distribution.values().sum();
    assert_eq!(total, records.len() as u64);
    assert_eq!(stats.tech_distribution.get("Language Models"), Some(&2));
    assert_eq!(stats.tech_distribution.get(OTHER_CATEGORY), Some(&2));

    let known = CategoryMap::default().names();
    for key in stats.tech_distribution.keys() {
        assert!(known.contains(&key.as_str()), "unexpected category {key}");
    }
}

#[test]
fn size_distribution_covers_every_record_once() {
    let records = vec![
        classified("a/t", Some("text-generation"), Some(500_000_000)),
        classified("a/s", Some("text-generation"), Some(3_000_000_000)),
        classified("a/u", Some("text-generation"), None),
    ];
    let stats = aggregate(&records, &KeywordVocab::default());
    let total: u64 = stats.size_distribution.values().sum();
    assert_eq!(total, records.len() as u64);
    assert_eq!(stats.size_distribution.get("unknown"), Some(&1));
}

#[test]
fn top_organizations_capped_sorted_and_sentinel_free() {
    let mut records = Vec::new();
    // 25 distinct single-model orgs plus one org with three models
    for i in 0..25 {
        records.push(record(&format!("org{i}/model"), 0));
    }
    for i in 0..3 {
        records.push(record(&format!("busy/model{i}"), 0));
    }
    // sentinel-authored record must not rank
    records.push(ModelRecord { id: "lonely".into(), ..Default::default() });
    assert_eq!(records.last().unwrap().resolved_author(), UNKNOWN_AUTHOR);

    let stats = aggregate(&records, &KeywordVocab::default());
    let orgs = &stats.top_organizations;

    assert!(orgs.len() <= TOP_ORGANIZATIONS);
    assert_eq!(orgs[0].name, "busy");
    assert_eq!(orgs[0].count, 3);
    for pair in orgs.windows(2) {
        assert!(pair[0].count >= pair[1].count);
    }
    assert!(orgs.iter().all(|o| o.name != UNKNOWN_AUTHOR));
}

#[test]
fn organization_ties_keep_first_seen_order() {
    let records = vec![record("zeta/one", 0), record("alpha/one", 0)];
    let stats = aggregate(&records, &KeywordVocab::default());
    let names: Vec<&str> = stats.top_organizations.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha"]);
}

#[test]
fn keywords_below_min_count_are_dropped() {
    let records = vec![
        record("a/llama-chat", 0),
        record("b/llama-base", 0),
        record("c/whisper-tiny", 0),
    ];
    let stats = aggregate(&records, &KeywordVocab::default());
    let llama = stats.tech_keywords.iter().find(|k| k.keyword == "llama");
    assert_eq!(llama.map(|k| k.count), Some(2));
    // "whisper" appears once, below the threshold of two
    assert!(stats.tech_keywords.iter().all(|k| k.keyword != "whisper"));
}

#[test]
fn empty_input_yields_empty_statistics() {
    let stats = aggregate(&[], &KeywordVocab::default());
    assert!(stats.tech_distribution.is_empty());
    assert!(stats.size_distribution.is_empty());
    assert!(stats.top_organizations.is_empty());
    assert!(stats.tech_keywords.is_empty());
}

#[test]
fn category_groups_respect_the_cap_and_merged_order() {
    let records = vec![
        classified("a/one", Some("text-generation"), None),
        classified("a/two", Some("text-generation"), None),
        classified("a/three", Some("text-generation"), None),
        classified("b/pic", Some("text-to-image"), None),
    ];
    let groups = group_by_category(&records, 2);
    let language = &groups["Language Models"];
    assert_eq!(language.len(), 2);
    assert_eq!(language[0].id, "a/one");
    assert_eq!(groups["Image Generation"].len(), 1);
}
