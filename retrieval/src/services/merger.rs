//! Merge the two retrieval legs into one deduplicated, ranked list.
//!
//! Baseline rows establish the identity map; similarity rows either join
//! an existing row (carrying their score in and filling gaps) or append.
//! Rows with no detectable identity get a synthetic key so they are never
//! dropped and never coalesced.

use crate::models::ResultRow;
use std::cmp::Ordering;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum RowKey {
    Field(String),
    Synthetic(Uuid),
}

fn key_for(row: &ResultRow) -> RowKey {
    row.identity()
        .map(RowKey::Field)
        .unwrap_or_else(|| RowKey::Synthetic(Uuid::new_v4()))
}

pub fn merge_results(baseline: &[ResultRow], similarity: &[ResultRow]) -> Vec<ResultRow> {
    let mut order: Vec<RowKey> = Vec::new();
    let mut by_key: HashMap<RowKey, ResultRow> = HashMap::new();

    for row in baseline {
        let mut row = row.clone();
        row.score = None;
        insert_or_absorb(&mut order, &mut by_key, row);
    }
    for row in similarity {
        insert_or_absorb(&mut order, &mut by_key, row.clone());
    }

    let mut merged: Vec<ResultRow> = order
        .into_iter()
        .filter_map(|key| by_key.remove(&key))
        .collect();
    rank_merged(&mut merged);
    merged
}

fn insert_or_absorb(
    order: &mut Vec<RowKey>,
    by_key: &mut HashMap<RowKey, ResultRow>,
    row: ResultRow,
) {
    let key = key_for(&row);
    match by_key.get_mut(&key) {
        Some(existing) => existing.absorb(&row),
        None => {
            order.push(key.clone());
            by_key.insert(key, row);
        }
    }
}

/// Scored rows first in ascending score order, null scores last. The
/// ascending direction matches the behavior downstream consumers were
/// built against.
pub fn rank_merged(rows: &mut [ResultRow]) {
    rows.sort_by(|a, b| match (a.score, b.score) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
