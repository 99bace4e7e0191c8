//! Sparse variable-by-keyword presence matrix with wave-support filtering.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use tracing::debug;

use crate::data::{Exclusion, ExclusionReason, KeywordDrop, TokenizedVariable};
use crate::types::{Keyword, VariableId, WaveId};

/// One matrix row: the owning wave plus the variable's keywords.
#[derive(Clone, Debug)]
pub struct MatrixRow {
    /// Wave the variable belongs to.
    pub wave_id: WaveId,
    /// Keywords present for this variable.
    pub keywords: BTreeSet<Keyword>,
}

/// Sparse presence matrix over variables and keywords.
///
/// Absence of a (variable, keyword) pair is a true missing marker, not a
/// zero: the ranker's missing-fraction computation depends on telling
/// "absent" apart from "present". Row order follows insertion order.
#[derive(Clone, Debug, Default)]
pub struct KeywordMatrix {
    rows: IndexMap<VariableId, MatrixRow>,
}

impl KeywordMatrix {
    /// Number of variable rows.
    pub fn variable_count(&self) -> usize {
        self.rows.len()
    }

    /// True when no variable survived filtering.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows in insertion order.
    pub fn rows(&self) -> impl Iterator<Item = (&VariableId, &MatrixRow)> {
        self.rows.iter()
    }

    /// Presence indicator for one (variable, keyword) pair.
    pub fn contains(&self, variable_id: &str, keyword: &str) -> bool {
        self.rows
            .get(variable_id)
            .map(|row| row.keywords.contains(keyword))
            .unwrap_or(false)
    }

    /// Distinct keywords across all rows, sorted.
    pub fn keywords(&self) -> BTreeSet<&Keyword> {
        self.rows.values().flat_map(|row| &row.keywords).collect()
    }
}

/// Result of support filtering: the surviving matrix plus audit rows.
#[derive(Clone, Debug)]
pub struct MatrixBuild {
    /// Rows for variables whose every keyword met the threshold.
    pub matrix: KeywordMatrix,
    /// Keywords removed for insufficient distinct-wave support.
    pub drops: Vec<KeywordDrop>,
    /// Variables excluded because one of their keywords was dropped.
    pub exclusions: Vec<Exclusion>,
}

/// Build the presence matrix for one partition.
///
/// A keyword is dropped when it occurs in fewer than `min_wave_support`
/// distinct waves. The drop is all-or-nothing per variable: a label missing
/// one of its informative keywords is not safely comparable across waves,
/// so the whole variable is excluded rather than published incomplete.
pub fn build_matrix(
    group_tag: &str,
    variables: &[TokenizedVariable],
    min_wave_support: usize,
) -> MatrixBuild {
    let mut waves_per_keyword: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for variable in variables {
        for keyword in &variable.keywords {
            waves_per_keyword
                .entry(keyword.as_str())
                .or_default()
                .insert(variable.wave_id.as_str());
        }
    }

    let mut dropped: BTreeSet<&str> = BTreeSet::new();
    let mut drops = Vec::new();
    for (keyword, waves) in &waves_per_keyword {
        if waves.len() < min_wave_support {
            dropped.insert(keyword);
            drops.push(KeywordDrop {
                group_tag: group_tag.to_string(),
                keyword: keyword.to_string(),
                wave_support: waves.len(),
                min_wave_support,
            });
        }
    }

    let mut matrix = KeywordMatrix::default();
    let mut exclusions = Vec::new();
    for variable in variables {
        let offending: Vec<Keyword> = variable
            .keywords
            .iter()
            .filter(|keyword| dropped.contains(keyword.as_str()))
            .cloned()
            .collect();
        if offending.is_empty() {
            matrix.rows.insert(
                variable.variable_id.clone(),
                MatrixRow {
                    wave_id: variable.wave_id.clone(),
                    keywords: variable.keywords.clone(),
                },
            );
        } else {
            exclusions.push(Exclusion {
                variable_id: variable.variable_id.clone(),
                group_tag: Some(variable.group_tag.clone()),
                reason: ExclusionReason::InsufficientSupport {
                    keywords: offending,
                    min_wave_support,
                },
            });
        }
    }

    debug!(
        group = %group_tag,
        variables = variables.len(),
        kept = matrix.variable_count(),
        dropped_keywords = drops.len(),
        excluded_variables = exclusions.len(),
        "support filtering complete"
    );

    MatrixBuild {
        matrix,
        drops,
        exclusions,
    }
}
