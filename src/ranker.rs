//! Keyword frequency ranking within one scope.
//!
//! Ranking is scope-relative: "trust" is common inside a trust-themed group
//! and rare corpus-wide, so the caller ranks within each partition, never
//! across them.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use crate::matrix::KeywordMatrix;
use crate::types::Keyword;

/// Frequency statistics and final position for one keyword.
#[derive(Clone, Debug, PartialEq)]
pub struct KeywordStats {
    /// The keyword.
    pub keyword: Keyword,
    /// Number of matrix rows containing the keyword.
    pub variable_support: usize,
    /// Number of distinct waves containing the keyword.
    pub wave_support: usize,
    /// Fraction of rows NOT containing the keyword.
    pub missing_fraction: f64,
    /// Final position in the column order, 0 = first.
    pub rank: usize,
}

/// Compute the total column order for one matrix.
///
/// Keywords appearing in more variables rank earlier (broad terms lead the
/// label), equal-frequency keywords break ties lexically, and keywords in
/// `pinned_last` always rank after all others. The ordering key is integer
/// counts; `missing_fraction` is derived for reporting only.
pub fn rank_keywords(matrix: &KeywordMatrix, pinned_last: &BTreeSet<Keyword>) -> Vec<KeywordStats> {
    let mut variable_support: BTreeMap<&str, usize> = BTreeMap::new();
    let mut waves: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for (_, row) in matrix.rows() {
        for keyword in &row.keywords {
            *variable_support.entry(keyword.as_str()).or_insert(0) += 1;
            waves
                .entry(keyword.as_str())
                .or_default()
                .insert(row.wave_id.as_str());
        }
    }

    let total = matrix.variable_count();
    let mut stats: Vec<KeywordStats> = variable_support
        .into_iter()
        .map(|(keyword, support)| KeywordStats {
            keyword: keyword.to_string(),
            variable_support: support,
            wave_support: waves.get(keyword).map_or(0, |seen| seen.len()),
            missing_fraction: if total == 0 {
                0.0
            } else {
                1.0 - (support as f64 / total as f64)
            },
            rank: 0,
        })
        .collect();

    stats.sort_by(|a, b| {
        let key = |entry: &KeywordStats| {
            (
                pinned_last.contains(&entry.keyword),
                Reverse(entry.variable_support),
            )
        };
        key(a).cmp(&key(b)).then_with(|| a.keyword.cmp(&b.keyword))
    });
    for (position, entry) in stats.iter_mut().enumerate() {
        entry.rank = position;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TokenizedVariable;
    use crate::matrix::build_matrix;

    fn matrix(rows: &[(&str, &str, &[&str])]) -> KeywordMatrix {
        let variables: Vec<TokenizedVariable> = rows
            .iter()
            .map(|(wave, name, keywords)| TokenizedVariable {
                variable_id: format!("{wave}::{name}"),
                wave_id: wave.to_string(),
                group_tag: "trust".to_string(),
                keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
            })
            .collect();
        build_matrix("trust", &variables, 1).matrix
    }

    fn ordered(stats: &[KeywordStats]) -> Vec<&str> {
        stats.iter().map(|entry| entry.keyword.as_str()).collect()
    }

    #[test]
    fn more_common_keywords_rank_earlier() {
        let matrix = matrix(&[
            ("w1", "v1", &["trust", "parliament"]),
            ("w2", "v2", &["trust", "commission"]),
            ("w3", "v3", &["trust", "commission"]),
        ]);
        let stats = rank_keywords(&matrix, &BTreeSet::new());
        assert_eq!(ordered(&stats), vec!["trust", "commission", "parliament"]);
        assert_eq!(stats[0].rank, 0);
        assert_eq!(stats[0].variable_support, 3);
        assert_eq!(stats[2].rank, 2);
    }

    #[test]
    fn equal_support_breaks_ties_lexically() {
        let matrix = matrix(&[
            ("w1", "v1", &["zebra", "apple"]),
            ("w2", "v2", &["zebra", "apple"]),
        ]);
        let stats = rank_keywords(&matrix, &BTreeSet::new());
        assert_eq!(ordered(&stats), vec!["apple", "zebra"]);
    }

    #[test]
    fn pinned_keywords_rank_last_regardless_of_frequency() {
        let matrix = matrix(&[
            ("w1", "v1", &["cat", "trust"]),
            ("w2", "v2", &["cat", "trust"]),
            ("w3", "v3", &["cat"]),
        ]);
        let pinned: BTreeSet<Keyword> = ["cat".to_string()].into_iter().collect();
        let stats = rank_keywords(&matrix, &pinned);
        // "cat" is the most common keyword yet still ranks last.
        assert_eq!(ordered(&stats), vec!["trust", "cat"]);
        assert_eq!(stats[1].variable_support, 3);
    }

    #[test]
    fn missing_fraction_complements_coverage() {
        let matrix = matrix(&[
            ("w1", "v1", &["trust"]),
            ("w2", "v2", &["trust"]),
            ("w3", "v3", &["trust"]),
            ("w4", "v4", &["media"]),
        ]);
        let stats = rank_keywords(&matrix, &BTreeSet::new());
        let trust = stats.iter().find(|entry| entry.keyword == "trust").unwrap();
        let media = stats.iter().find(|entry| entry.keyword == "media").unwrap();
        assert_eq!(trust.missing_fraction, 0.25);
        assert_eq!(media.missing_fraction, 0.75);
        assert_eq!(trust.wave_support, 3);
        assert_eq!(media.wave_support, 1);
    }

    #[test]
    fn empty_matrix_yields_no_stats() {
        let stats = rank_keywords(&KeywordMatrix::default(), &BTreeSet::new());
        assert!(stats.is_empty());
    }
}
