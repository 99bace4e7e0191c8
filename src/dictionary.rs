//! Ordered label-rewrite dictionary.
//!
//! Rule order is data, not code: later rules may depend on the output of
//! earlier ones (abbreviation expansion must run before multi-token joins),
//! so the table is applied strictly in list order, each rule feeding the
//! next. Duplicate patterns are allowed; list position decides precedence.

use std::borrow::Cow;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::HarmonizerError;
use crate::types::{Pattern, Replacement};

/// One ordered rewrite rule: a regex pattern and its replacement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRule {
    /// Regex applied to the whole label; plain substrings are valid patterns.
    pub pattern: Pattern,
    /// Replacement text; may reference capture groups (`${1}`).
    pub replacement: Replacement,
    /// Optional curation stage tag (`abbrev`, `join`, `merge`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
}

impl LabelRule {
    /// Build a rule without a stage tag.
    pub fn new(pattern: impl Into<Pattern>, replacement: impl Into<Replacement>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
            stage: None,
        }
    }

    /// Attach a curation stage tag.
    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }
}

#[derive(Debug)]
struct CompiledRule {
    regex: Regex,
    rule: LabelRule,
}

/// An ordered, compiled rule table. Immutable after compilation.
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Compile an ordered rule list, failing on the first invalid pattern.
    pub fn compile(rules: Vec<LabelRule>) -> Result<Self, HarmonizerError> {
        let mut compiled = Vec::with_capacity(rules.len());
        for (index, rule) in rules.into_iter().enumerate() {
            let regex = Regex::new(&rule.pattern).map_err(|err| HarmonizerError::Dictionary {
                index,
                pattern: rule.pattern.clone(),
                reason: err.to_string(),
            })?;
            compiled.push(CompiledRule { regex, rule });
        }
        Ok(Self { rules: compiled })
    }

    /// Compile the built-in curated rule table.
    pub fn builtin() -> Self {
        Self::compile(builtin_label_rules()).expect("built-in label rules compile")
    }

    /// Number of rules in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the table holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate the source rules in apply order.
    pub fn rules(&self) -> impl Iterator<Item = &LabelRule> {
        self.rules.iter().map(|compiled| &compiled.rule)
    }

    /// Apply every rule in order; unmatched input passes through unchanged.
    pub fn apply(&self, label: &str) -> String {
        self.rewrite(label, None)
    }

    /// Apply every rule in order, recording which rules fired.
    pub fn apply_tracked(&self, label: &str, usage: &mut RuleUsage) -> String {
        self.rewrite(label, Some(usage))
    }

    fn rewrite(&self, label: &str, mut usage: Option<&mut RuleUsage>) -> String {
        let mut current = label.to_string();
        for (index, compiled) in self.rules.iter().enumerate() {
            match compiled
                .regex
                .replace_all(&current, compiled.rule.replacement.as_str())
            {
                Cow::Borrowed(_) => {}
                Cow::Owned(next) => {
                    if let Some(usage) = usage.as_deref_mut() {
                        usage.record(index);
                    }
                    current = next;
                }
            }
        }
        current
    }
}

/// Per-rule fire counts for one run.
///
/// Hand-curated rule tables rot silently: a rule that never fires across the
/// whole corpus is either obsolete or mistyped. Counts are collected outside
/// the `RuleSet` so the compiled table stays immutable and shareable.
#[derive(Clone, Debug, Default)]
pub struct RuleUsage {
    counts: Vec<u64>,
}

impl RuleUsage {
    /// Zeroed counters sized for `rules`.
    pub fn for_rules(rules: &RuleSet) -> Self {
        Self {
            counts: vec![0; rules.len()],
        }
    }

    fn record(&mut self, index: usize) {
        if let Some(count) = self.counts.get_mut(index) {
            *count += 1;
        }
    }

    /// Labels the rule at `index` rewrote during this run.
    pub fn count(&self, index: usize) -> u64 {
        self.counts.get(index).copied().unwrap_or(0)
    }

    /// Indices of rules that never fired.
    pub fn never_fired(&self) -> impl Iterator<Item = usize> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count == 0)
            .map(|(index, _)| index)
    }
}

/// The built-in curated rule table, in apply order.
///
/// Three stages, order-dependent: abbreviation expansion first (so joins see
/// full words), then multi-token entity joins, then near-synonym merges.
/// Token-bounded patterns use `(^|_)`/`(_|$)` because `\b` treats the
/// underscore separator as a word character.
pub fn builtin_label_rules() -> Vec<LabelRule> {
    let abbrev: &[(&str, &str)] = &[
        // spelling and abbreviation expansions
        ("(^|_)satisf(_|$)", "${1}satisfaction${2}"),
        ("(^|_)governm(_|$)", "${1}government${2}"),
        ("(^|_)govnmt(_|$)", "${1}government${2}"),
        ("(^|_)parliamt(_|$)", "${1}parliament${2}"),
        ("(^|_)parl(_|$)", "${1}parliament${2}"),
        ("(^|_)environm(_|$)", "${1}environment${2}"),
        ("(^|_)unemploymt(_|$)", "${1}unemployment${2}"),
        ("(^|_)unempl(_|$)", "${1}unemployment${2}"),
        ("(^|_)natl(_|$)", "${1}national${2}"),
        ("(^|_)nat(_|$)", "${1}national${2}"),
        ("(^|_)impt(_|$)", "${1}important${2}"),
        ("(^|_)infos?(_|$)", "${1}information${2}"),
        ("(^|_)membershp(_|$)", "${1}membership${2}"),
        ("(^|_)currncy(_|$)", "${1}currency${2}"),
        ("(^|_)pers(_|$)", "${1}personal${2}"),
        ("(^|_)polit(_|$)", "${1}political${2}"),
        ("(^|_)situatn(_|$)", "${1}situation${2}"),
        // British spellings unified; substring-safe inside longer words
        ("organisation", "organization"),
        ("globalisation", "globalization"),
        ("harmonisation", "harmonization"),
        ("programme", "program"),
    ];
    let join: &[(&str, &str)] = &[
        // multi-token entities become one keyword via the joiner
        ("national_government", "national-government"),
        ("european_commission", "european-commission"),
        ("european_parliament", "european-parliament"),
        ("european_union", "european-union"),
        ("european_community", "european-community"),
        ("council_of_ministers", "council-of-ministers"),
        ("court_of_justice", "court-of-justice"),
        ("united_nations", "united-nations"),
        ("united_kingdom", "united-kingdom"),
        ("northern_ireland", "northern-ireland"),
        ("trade_unions?", "trade-unions"),
        ("political_parties", "political-parties"),
        ("mass_media", "mass-media"),
        ("member_states?", "member-states"),
        ("single_currency", "single-currency"),
        ("left_right", "left-right"),
    ];
    let merge: &[(&str, &str)] = &[
        // differently-worded questions about the same concept collapse to
        // one canonical compound
        ("quality_of_life", "quality-of-life"),
        ("life_quality", "quality-of-life"),
        ("standard_of_living", "standard-of-living"),
        ("living_standards?", "standard-of-living"),
        ("cost_of_living", "cost-of-living"),
        ("great_britain", "united-kingdom"),
        ("common_market", "european-community"),
    ];

    let mut rules = Vec::with_capacity(abbrev.len() + join.len() + merge.len());
    for (pattern, replacement) in abbrev {
        rules.push(LabelRule::new(*pattern, *replacement).with_stage("abbrev"));
    }
    for (pattern, replacement) in join {
        rules.push(LabelRule::new(*pattern, *replacement).with_stage("join"));
    }
    for (pattern, replacement) in merge {
        rules.push(LabelRule::new(*pattern, *replacement).with_stage("merge"));
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rules_compile() {
        let rules = RuleSet::builtin();
        assert!(!rules.is_empty());
        assert_eq!(rules.len(), builtin_label_rules().len());
    }

    #[test]
    fn rules_apply_in_list_order() {
        // The second rule only fires because the first ran before it.
        let rules = RuleSet::compile(vec![
            LabelRule::new("(^|_)nat(_|$)", "${1}national${2}"),
            LabelRule::new("national_government", "national-government"),
        ])
        .unwrap();
        assert_eq!(
            rules.apply("trust_nat_government"),
            "trust_national-government"
        );
    }

    #[test]
    fn reversed_order_changes_the_result() {
        let rules = RuleSet::compile(vec![
            LabelRule::new("national_government", "national-government"),
            LabelRule::new("(^|_)nat(_|$)", "${1}national${2}"),
        ])
        .unwrap();
        // The join never sees the expanded form.
        assert_eq!(
            rules.apply("trust_nat_government"),
            "trust_national_government"
        );
    }

    #[test]
    fn unmatched_input_passes_through() {
        let rules = RuleSet::builtin();
        assert_eq!(rules.apply("zzz_qqq"), "zzz_qqq");
    }

    #[test]
    fn invalid_pattern_reports_index_and_pattern() {
        let err = RuleSet::compile(vec![
            LabelRule::new("fine", "fine"),
            LabelRule::new("(unclosed", "x"),
        ])
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("rule 1"), "got: {message}");
        assert!(message.contains("(unclosed"), "got: {message}");
    }

    #[test]
    fn usage_tracks_fired_rules_only() {
        let rules = RuleSet::compile(vec![
            LabelRule::new("left_right", "left-right"),
            LabelRule::new("never_matches_anything", "x"),
        ])
        .unwrap();
        let mut usage = RuleUsage::for_rules(&rules);
        let out = rules.apply_tracked("d1_left_right_scale", &mut usage);
        assert_eq!(out, "d1_left-right_scale");
        assert_eq!(usage.count(0), 1);
        assert_eq!(usage.count(1), 0);
        assert_eq!(usage.never_fired().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn builtin_expands_then_joins() {
        let rules = RuleSet::builtin();
        assert_eq!(
            rules.apply("trust_nat_government"),
            "trust_national-government"
        );
        assert_eq!(rules.apply("life_satisf"), "life_satisfaction");
        assert_eq!(rules.apply("common_market_membershp"), "european-community_membership");
    }

    #[test]
    fn builtin_merges_synonym_phrasings() {
        let rules = RuleSet::builtin();
        assert_eq!(rules.apply("life_quality"), "quality-of-life");
        assert_eq!(rules.apply("quality_of_life"), "quality-of-life");
        assert_eq!(rules.apply("living_standard"), "standard-of-living");
        assert_eq!(rules.apply("living_standards"), "standard-of-living");
    }
}
