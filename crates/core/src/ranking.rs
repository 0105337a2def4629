//! Ranking of picker items against the current query.

use std::collections::BTreeSet;

use itertools::Itertools;

use crate::scoring::score_query;

/// One item that survived ranking, with the data needed to render it.
///
/// Scores are only comparable within a single call to [`rank`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub item: String,
    pub score: i64,
    pub original_index: usize,
    pub matched_positions: BTreeSet<usize>,
}

/// Ranks `items` against `query`.
///
/// A blank query keeps every item in input order with no highlighted
/// positions. Otherwise non-matching items are dropped and the rest are
/// sorted by descending score, ties keeping their input order.
pub fn rank<S: AsRef<str>>(items: &[S], query: &str) -> Vec<RankedEntry> {
    if query.trim().is_empty() {
        return items
            .iter()
            .enumerate()
            .map(|(original_index, item)| RankedEntry {
                item: item.as_ref().to_string(),
                score: 0,
                original_index,
                matched_positions: BTreeSet::new(),
            })
            .collect();
    }

    items
        .iter()
        .enumerate()
        .filter_map(|(original_index, item)| {
            let item = item.as_ref();
            score_query(query, item).map(|m| RankedEntry {
                item: item.to_string(),
                score: m.score,
                original_index,
                matched_positions: m.positions,
            })
        })
        .sorted_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.original_index.cmp(&b.original_index))
        })
        .collect()
}
