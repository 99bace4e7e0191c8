use std::collections::HashMap;

use crate::data::PipelineOutput;
use crate::dictionary::{LabelRule, RuleSet, RuleUsage};
use crate::types::GroupTag;

/// Aggregate coverage metrics for per-group output-row counts.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupCoverage {
    pub total: usize,
    pub groups: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub max_share: f64,
    pub min_share: f64,
    pub ratio: f64,
    pub per_group: Vec<GroupShare>,
}

/// Per-group share of the standardized-label table.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupShare {
    pub group: GroupTag,
    pub count: usize,
    pub share: f64,
}

/// Count standardized-label rows per group.
pub fn rows_per_group(output: &PipelineOutput) -> HashMap<GroupTag, usize> {
    let mut counts: HashMap<GroupTag, usize> = HashMap::new();
    for row in &output.labels {
        *counts.entry(row.group_tag.clone()).or_insert(0) += 1;
    }
    counts
}

/// Compute coverage metrics from per-group row counts.
pub fn group_coverage(counts: &HashMap<GroupTag, usize>) -> Option<GroupCoverage> {
    if counts.is_empty() {
        return None;
    }
    let total: usize = counts.values().sum();
    let groups = counts.len();
    let min = *counts.values().min().expect("counts non-empty");
    let max = *counts.values().max().expect("counts non-empty");
    let mean = total as f64 / groups as f64;
    let max_share = if total == 0 {
        0.0
    } else {
        max as f64 / total as f64
    };
    let min_share = if total == 0 {
        0.0
    } else {
        min as f64 / total as f64
    };
    let ratio = if min == 0 {
        f64::INFINITY
    } else {
        max as f64 / min as f64
    };
    let mut per_group: Vec<GroupShare> = counts
        .iter()
        .map(|(group, count)| GroupShare {
            group: group.clone(),
            count: *count,
            share: if total == 0 {
                0.0
            } else {
                *count as f64 / total as f64
            },
        })
        .collect();
    per_group.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.group.cmp(&b.group)));
    Some(GroupCoverage {
        total,
        groups,
        min,
        max,
        mean,
        max_share,
        min_share,
        ratio,
        per_group,
    })
}

/// One dictionary rule that never fired during a run.
#[derive(Clone, Debug, PartialEq)]
pub struct UnusedRule {
    pub index: usize,
    pub rule: LabelRule,
}

/// List the rules that never fired during a run.
///
/// Hand-curated rule tables rot silently; a rule that fires on no label in
/// the whole corpus is either obsolete or mistyped and should be reviewed.
pub fn unused_rules(rules: &RuleSet, usage: &RuleUsage) -> Vec<UnusedRule> {
    let table: Vec<&LabelRule> = rules.rules().collect();
    usage
        .never_fired()
        .filter_map(|index| {
            table.get(index).map(|rule| UnusedRule {
                index,
                rule: (*rule).clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_coverage_reports_balance() {
        let mut counts = HashMap::new();
        counts.insert("trust".to_string(), 2);
        counts.insert("attitudes".to_string(), 2);
        let coverage = group_coverage(&counts).expect("coverage");
        assert_eq!(coverage.total, 4);
        assert_eq!(coverage.groups, 2);
        assert_eq!(coverage.min, 2);
        assert_eq!(coverage.max, 2);
        assert!((coverage.max_share - 0.5).abs() < 1e-6);
        assert!((coverage.ratio - 1.0).abs() < 1e-6);
        assert!(
            coverage
                .per_group
                .iter()
                .all(|entry| (entry.share - 0.5).abs() < 1e-6)
        );
    }

    #[test]
    fn group_coverage_reports_imbalance() {
        let mut counts = HashMap::new();
        counts.insert("trust".to_string(), 4);
        counts.insert("attitudes".to_string(), 2);
        counts.insert("media".to_string(), 2);
        let coverage = group_coverage(&counts).expect("coverage");
        assert_eq!(coverage.total, 8);
        assert_eq!(coverage.groups, 3);
        assert!((coverage.max_share - 0.5).abs() < 1e-6);
        assert!((coverage.ratio - 2.0).abs() < 1e-6);
        assert_eq!(coverage.per_group[0].group, "trust");
        assert_eq!(coverage.per_group[0].count, 4);
    }

    #[test]
    fn empty_counts_yield_no_coverage() {
        assert_eq!(group_coverage(&HashMap::new()), None);
    }

    #[test]
    fn rows_per_group_counts_label_rows() {
        let output = PipelineOutput {
            labels: vec![
                crate::data::StandardizedLabel {
                    variable_id: "w1::v1".to_string(),
                    var_label_std: "trust_parliament".to_string(),
                    group_tag: "trust".to_string(),
                },
                crate::data::StandardizedLabel {
                    variable_id: "w2::v2".to_string(),
                    var_label_std: "trust_commission".to_string(),
                    group_tag: "trust".to_string(),
                },
            ],
            scales: Vec::new(),
            audit: crate::data::AuditLog::default(),
            rule_usage: RuleUsage::default(),
        };
        let counts = rows_per_group(&output);
        assert_eq!(counts.get("trust"), Some(&2));
    }

    #[test]
    fn unused_rules_lists_silent_entries() {
        let rules = crate::dictionary::RuleSet::compile(vec![
            LabelRule::new("left_right", "left-right"),
            LabelRule::new("never_in_any_label", "x"),
        ])
        .expect("rules compile");
        let mut usage = RuleUsage::for_rules(&rules);
        rules.apply_tracked("d1_left_right_scale", &mut usage);

        let unused = unused_rules(&rules, &usage);
        assert_eq!(unused.len(), 1);
        assert_eq!(unused[0].index, 1);
        assert_eq!(unused[0].rule.pattern, "never_in_any_label");
    }
}
