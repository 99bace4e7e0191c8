//! Group-tag assignment and deterministic corpus partitioning.
//!
//! Keyword frequency is only meaningful among variables measuring related
//! concepts, so the standardization stages run once per group partition.
//! Partitioning here is pure and deterministic: same records, same
//! partitions, same order.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::data::{TokenizedVariable, VariableRecord};
use crate::types::{GroupTag, WaveId};

/// Lookup from (wave id, normalized original label) to group tag.
///
/// Produced by the upstream classification table. Keys are case-sensitive
/// and already cleaned of parenthetical annotations.
#[derive(Clone, Debug, Default)]
pub struct GroupLookup {
    entries: IndexMap<(WaveId, String), GroupTag>,
}

impl GroupLookup {
    /// Empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a lookup from (wave id, label, group tag) triples.
    ///
    /// Later duplicates of the same key overwrite earlier ones, matching
    /// last-wins semantics of the upstream table loader.
    pub fn from_entries<I, W, L, G>(entries: I) -> Self
    where
        I: IntoIterator<Item = (W, L, G)>,
        W: Into<WaveId>,
        L: Into<String>,
        G: Into<GroupTag>,
    {
        let mut lookup = Self::new();
        for (wave_id, label, tag) in entries {
            lookup.insert(wave_id, label, tag);
        }
        lookup
    }

    /// Register one (wave id, label) to group-tag mapping.
    pub fn insert(
        &mut self,
        wave_id: impl Into<WaveId>,
        label: impl Into<String>,
        tag: impl Into<GroupTag>,
    ) {
        self.entries
            .insert((wave_id.into(), label.into()), tag.into());
    }

    /// Group tag for one (wave id, normalized label) pair, if registered.
    pub fn group_for(&self, wave_id: &str, label: &str) -> Option<&GroupTag> {
        self.entries.get(&(wave_id.to_string(), label.to_string()))
    }

    /// Number of registered mappings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no mapping is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fill missing group tags from the lookup, in place.
///
/// Records that already carry a tag keep it; the lookup only supplies
/// absent ones. Records the lookup does not cover stay untagged and are
/// excluded later with an audit entry.
pub fn apply_group_tags(records: &mut [VariableRecord], lookup: &GroupLookup) {
    for record in records.iter_mut() {
        if record.group_tag.is_none() {
            record.group_tag = lookup
                .group_for(&record.wave_id, &record.normalized_label)
                .cloned();
        }
    }
}

/// Partition tokenized variables by group tag.
///
/// Input order is preserved within each partition; the sorted map keys give
/// a deterministic partition order for reassembly. Every variable lands in
/// exactly one partition.
pub fn partition_by_group(
    variables: Vec<TokenizedVariable>,
) -> BTreeMap<GroupTag, Vec<TokenizedVariable>> {
    let mut partitions: BTreeMap<GroupTag, Vec<TokenizedVariable>> = BTreeMap::new();
    for variable in variables {
        partitions
            .entry(variable.group_tag.clone())
            .or_default()
            .push(variable);
    }
    partitions
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn record(wave: &str, name: &str, label: &str, tag: Option<&str>) -> VariableRecord {
        VariableRecord {
            wave_id: wave.to_string(),
            variable_name: name.to_string(),
            raw_label: label.to_uppercase(),
            normalized_label: label.to_string(),
            group_tag: tag.map(|tag| tag.to_string()),
            value_range_text: None,
        }
    }

    fn tokenized(wave: &str, name: &str, group: &str) -> TokenizedVariable {
        TokenizedVariable {
            variable_id: format!("{wave}::{name}"),
            wave_id: wave.to_string(),
            group_tag: group.to_string(),
            keywords: BTreeSet::new(),
        }
    }

    #[test]
    fn lookup_fills_only_missing_tags() {
        let lookup = GroupLookup::from_entries([
            ("w1", "trust_parliament", "trust"),
            ("w1", "life_satisfaction", "life satisfaction"),
        ]);
        let mut records = vec![
            record("w1", "v1", "trust_parliament", None),
            record("w1", "v2", "life_satisfaction", Some("pre-assigned")),
            record("w2", "v3", "trust_parliament", None),
        ];
        apply_group_tags(&mut records, &lookup);

        assert_eq!(records[0].group_tag.as_deref(), Some("trust"));
        assert_eq!(records[1].group_tag.as_deref(), Some("pre-assigned"));
        // Lookup keys are wave-qualified; w2 has no entry.
        assert_eq!(records[2].group_tag, None);
    }

    #[test]
    fn last_duplicate_entry_wins() {
        let lookup = GroupLookup::from_entries([
            ("w1", "trust_parliament", "first"),
            ("w1", "trust_parliament", "second"),
        ]);
        assert_eq!(lookup.len(), 1);
        assert_eq!(
            lookup.group_for("w1", "trust_parliament").map(String::as_str),
            Some("second")
        );
    }

    #[test]
    fn partitions_are_sorted_and_order_preserving() {
        let variables = vec![
            tokenized("w1", "v1", "trust"),
            tokenized("w1", "v2", "attitudes"),
            tokenized("w2", "v3", "trust"),
        ];
        let partitions = partition_by_group(variables);

        let groups: Vec<&String> = partitions.keys().collect();
        assert_eq!(groups, vec!["attitudes", "trust"]);
        let trust: Vec<&str> = partitions["trust"]
            .iter()
            .map(|variable| variable.variable_id.as_str())
            .collect();
        assert_eq!(trust, vec!["w1::v1", "w2::v3"]);
    }

    #[test]
    fn every_variable_lands_in_exactly_one_partition() {
        let variables = vec![
            tokenized("w1", "v1", "trust"),
            tokenized("w1", "v2", "attitudes"),
            tokenized("w2", "v3", "trust"),
            tokenized("w3", "v4", "media"),
        ];
        let total = variables.len();
        let partitions = partition_by_group(variables);
        let count: usize = partitions.values().map(Vec::len).sum();
        assert_eq!(count, total);
    }
}
