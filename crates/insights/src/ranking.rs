//! Largest-first ordering of waste tallies.

use serde::Serialize;
use std::collections::BTreeMap;

/// One bucket of a ranked tally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    /// Category or reason
    pub key: String,
    /// Items in the bucket
    pub count: usize,
    /// `count` relative to the largest bucket, in `0.0..=1.0`
    pub share_of_max: f64,
}

/// Sort buckets by count descending, then key ascending.
pub fn rank(tally: &BTreeMap<String, usize>) -> Vec<RankedEntry> {
    let max = tally.values().copied().max().unwrap_or(0);

    let mut entries: Vec<RankedEntry> = tally
        .iter()
        .map(|(key, count)| RankedEntry {
            key: key.clone(),
            count: *count,
            share_of_max: if max > 0 {
                *count as f64 / max as f64
            } else {
                0.0
            },
        })
        .collect();

    // BTreeMap iteration is already key-ordered; a stable sort keeps that for ties
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_orders_by_count_then_key() {
        let tally: BTreeMap<String, usize> = [("Dairy", 2), ("Bakery", 5), ("Produce", 2)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        let ranked = rank(&tally);
        let keys: Vec<&str> = ranked.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["Bakery", "Dairy", "Produce"]);
        assert_eq!(ranked[0].share_of_max, 1.0);
        assert_eq!(ranked[1].share_of_max, 0.4);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank(&BTreeMap::new()).is_empty());
    }
}
