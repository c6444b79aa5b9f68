//! Multi-day trend data: pivot archived snapshots into one row per date and
//! one column per category.

use hubcore::Snapshot;
use std::collections::BTreeSet;

pub struct TrendTable {
    /// Ascending snapshot dates, one row each.
    pub dates: Vec<String>,
    /// Union of every category observed across the history.
    pub categories: Vec<String>,
    /// rows[i][j] = count of categories[j] on dates[i]; 0 where a category
    /// was absent on that date.
    pub rows: Vec<Vec<u64>>,
}

pub fn pivot_categories(history: &[Snapshot]) -> TrendTable {
    let mut union: BTreeSet<String> = BTreeSet::new();
    for snapshot in history {
        union.extend(snapshot.statistics.tech_distribution.keys().cloned());
    }
    let categories: Vec<String> = union.into_iter().collect();

    let mut dates = Vec::with_capacity(history.len());
    let mut rows = Vec::with_capacity(history.len());
    for snapshot in history {
        dates.push(snapshot.date.clone());
        rows.push(
            categories
                .iter()
                .map(|category| {
                    snapshot
                        .statistics
                        .tech_distribution
                        .get(category)
                        .copied()
                        .unwrap_or(0)
                })
                .collect(),
        );
    }
    TrendTable { dates, categories, rows }
}
