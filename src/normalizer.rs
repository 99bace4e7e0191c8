//! Label rewriting: question-prefix stripping plus the ordered rule table.
//!
//! Input labels are already lower-cased and underscore-delimited by the
//! upstream extractor; this module only rewrites further.

use std::sync::LazyLock;

use regex::Regex;

use crate::dictionary::{RuleSet, RuleUsage};
use crate::utils::collapse_and_trim;

/// Question-number prefix shapes, tried in priority order.
///
/// Numbering conventions vary across waves (`q12_`, `qa5_`, `d10_`, `v215_`),
/// so the specific shapes rank before the generic letter-digits catch-all.
/// First match wins and at most one prefix is stripped per label.
static PREFIX_SHAPES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^q[a-z]?\d+[a-z]?_",
        r"^d\d+[a-z]?_",
        r"^v\d+_",
        r"^[a-z]\d+[a-z]?_",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("prefix shapes compile"))
    .collect()
});

/// Strip one leading question-number prefix, if any shape matches.
pub fn strip_question_prefix(label: &str) -> &str {
    for shape in PREFIX_SHAPES.iter() {
        if let Some(found) = shape.find(label) {
            return &label[found.end()..];
        }
    }
    label
}

/// Normalize one label: strip a prefix, run the rule table in order, then
/// collapse separator runs and trim boundary separators.
pub fn normalize(label: &str, rules: &RuleSet) -> String {
    collapse_and_trim(rules.apply(strip_question_prefix(label)))
}

/// [`normalize`], recording which rules fired into `usage`.
pub fn normalize_tracked(label: &str, rules: &RuleSet, usage: &mut RuleUsage) -> String {
    collapse_and_trim(rules.apply_tracked(strip_question_prefix(label), usage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::LabelRule;

    #[test]
    fn strips_each_prefix_shape() {
        assert_eq!(strip_question_prefix("q12_trust"), "trust");
        assert_eq!(strip_question_prefix("qa5_eu_membership"), "eu_membership");
        assert_eq!(strip_question_prefix("q1a_media_use"), "media_use");
        assert_eq!(strip_question_prefix("d10_left_right"), "left_right");
        assert_eq!(strip_question_prefix("v215_eu_budget"), "eu_budget");
        assert_eq!(strip_question_prefix("p6_news"), "news");
    }

    #[test]
    fn strips_at_most_one_prefix() {
        assert_eq!(strip_question_prefix("q1_q2_trust"), "q2_trust");
    }

    #[test]
    fn unprefixed_labels_pass_through() {
        assert_eq!(strip_question_prefix("trust_parliament"), "trust_parliament");
        assert_eq!(strip_question_prefix("weight_q12"), "weight_q12");
    }

    #[test]
    fn normalize_strips_then_rewrites() {
        let rules = RuleSet::builtin();
        assert_eq!(normalize("d1_left_right_scale", &rules), "left-right_scale");
    }

    #[test]
    fn normalize_cleans_separator_runs_left_by_rules() {
        let rules =
            RuleSet::compile(vec![LabelRule::new("(^|_)filler(_|$)", "${1}${2}")]).unwrap();
        assert_eq!(normalize("trust_filler_parliament", &rules), "trust_parliament");
    }

    #[test]
    fn normalize_is_deterministic() {
        let rules = RuleSet::builtin();
        let first = normalize("qa5_trust_in_nat_parl", &rules);
        let second = normalize("qa5_trust_in_nat_parl", &rules);
        assert_eq!(first, second);
        assert_eq!(first, "trust_in_national_parliament");
    }
}
