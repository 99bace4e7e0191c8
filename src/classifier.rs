//! Value-scale classification from response-category text.
//!
//! Each variable's `value_range_text` describes its observed answer
//! categories ("tend to trust, tend not to trust"). Classification maps that
//! free text to one of a fixed set of response-scale archetypes by substring
//! dictionary lookup, with one priority special case and an explicit
//! unresolved tag when nothing matches.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::classifier as tags;
use crate::errors::HarmonizerError;

/// Canonical response-scale archetypes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueScaleTag {
    /// Mentioned / not mentioned item battery.
    MentionedNotMentioned,
    /// Tend to trust / tend not to trust.
    TrustNoTrust,
    /// Decision by national government vs. jointly within the EU.
    NationalGovernmentEu,
    /// Plain yes / no.
    YesNo,
    /// Positive, negative, neutral, in that category order.
    PositiveNegativeNeutral,
    /// Positive, neutral, negative, the reordered variant.
    PositiveNeutralNegative,
    /// Four-point ordinal scale (satisfaction, agreement, intensity).
    FourPointOrdinal,
    /// No dictionary rule matched; explicit unknown, never a guessed default.
    Unresolved,
}

impl ValueScaleTag {
    /// Stable machine-readable tag string.
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::MentionedNotMentioned => tags::TAG_MENTIONED,
            Self::TrustNoTrust => tags::TAG_TRUST,
            Self::NationalGovernmentEu => tags::TAG_NATIONAL_GOVERNMENT_EU,
            Self::YesNo => tags::TAG_YES_NO,
            Self::PositiveNegativeNeutral => tags::TAG_POSITIVE_NEGATIVE_NEUTRAL,
            Self::PositiveNeutralNegative => tags::TAG_POSITIVE_NEUTRAL_NEGATIVE,
            Self::FourPointOrdinal => tags::TAG_FOUR_POINT_ORDINAL,
            Self::Unresolved => tags::TAG_UNRESOLVED,
        }
    }

    /// Parse a tag string back to its variant.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            tags::TAG_MENTIONED => Some(Self::MentionedNotMentioned),
            tags::TAG_TRUST => Some(Self::TrustNoTrust),
            tags::TAG_NATIONAL_GOVERNMENT_EU => Some(Self::NationalGovernmentEu),
            tags::TAG_YES_NO => Some(Self::YesNo),
            tags::TAG_POSITIVE_NEGATIVE_NEUTRAL => Some(Self::PositiveNegativeNeutral),
            tags::TAG_POSITIVE_NEUTRAL_NEGATIVE => Some(Self::PositiveNeutralNegative),
            tags::TAG_FOUR_POINT_ORDINAL => Some(Self::FourPointOrdinal),
            tags::TAG_UNRESOLVED => Some(Self::Unresolved),
            _ => None,
        }
    }
}

impl fmt::Display for ValueScaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// One value-dictionary rule: a category-text fragment and the tag string
/// it classifies to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRule {
    /// Substring matched against the lower-cased category text.
    pub pattern: String,
    /// Tag string the fragment classifies to; must name a known archetype.
    pub replacement: String,
}

impl ValueRule {
    /// Build a rule.
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// Compiled value dictionary: lower-cased fragments with parsed tags.
#[derive(Debug)]
pub struct ValueDictionary {
    rules: Vec<(String, ValueScaleTag)>,
}

impl ValueDictionary {
    /// Compile a rule list, rejecting replacements that name no archetype.
    pub fn compile(rules: Vec<ValueRule>) -> Result<Self, HarmonizerError> {
        let mut compiled = Vec::with_capacity(rules.len());
        for (index, rule) in rules.into_iter().enumerate() {
            let tag = ValueScaleTag::from_tag(&rule.replacement).ok_or_else(|| {
                HarmonizerError::UnknownScaleTag {
                    index,
                    tag: rule.replacement.clone(),
                }
            })?;
            compiled.push((rule.pattern.to_lowercase(), tag));
        }
        Ok(Self { rules: compiled })
    }

    /// Compile the built-in dictionary.
    pub fn builtin() -> Self {
        Self::compile(builtin_value_rules()).expect("built-in value rules compile")
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the dictionary holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Classify one category text.
    ///
    /// The "not mentioned" fragment takes precedence over every other rule:
    /// item batteries embed the stem question in their category text, which
    /// would otherwise match topical fragments first. When no rule matches,
    /// the result is `Unresolved`.
    pub fn classify(&self, value_range_text: &str) -> ValueScaleTag {
        let text = value_range_text.to_lowercase();
        if text.contains(tags::NOT_MENTIONED_PATTERN) {
            return ValueScaleTag::MentionedNotMentioned;
        }
        for (pattern, tag) in &self.rules {
            if text.contains(pattern) {
                return *tag;
            }
        }
        ValueScaleTag::Unresolved
    }
}

/// The built-in value dictionary.
///
/// Fragments come from observed category texts; the list is unordered by
/// contract, so no rule may depend on another having run first.
pub fn builtin_value_rules() -> Vec<ValueRule> {
    [
        ("not mentioned", tags::TAG_MENTIONED),
        ("mentioned", tags::TAG_MENTIONED),
        ("tend to trust", tags::TAG_TRUST),
        ("tend not to trust", tags::TAG_TRUST),
        ("national government", tags::TAG_NATIONAL_GOVERNMENT_EU),
        ("jointly within", tags::TAG_NATIONAL_GOVERNMENT_EU),
        ("yes, no", tags::TAG_YES_NO),
        ("yes / no", tags::TAG_YES_NO),
        ("good thing, bad thing", tags::TAG_POSITIVE_NEGATIVE_NEUTRAL),
        ("good thing, neither", tags::TAG_POSITIVE_NEUTRAL_NEGATIVE),
        ("very satisfied", tags::TAG_FOUR_POINT_ORDINAL),
        ("a great deal", tags::TAG_FOUR_POINT_ORDINAL),
        ("agree strongly", tags::TAG_FOUR_POINT_ORDINAL),
        ("very important", tags::TAG_FOUR_POINT_ORDINAL),
    ]
    .iter()
    .map(|(pattern, replacement)| ValueRule::new(*pattern, *replacement))
    .collect()
}
