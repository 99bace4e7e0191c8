use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::classifier::ValueScaleTag;
use crate::constants::audit;
use crate::constants::separators::ID_SEPARATOR;

pub use crate::types::{GroupTag, Keyword, ReasonTag, VariableId, VariableName, WaveId};

/// One metadata row per (wave, variable), produced by the upstream extractor.
///
/// Immutable input: the pipeline derives new tables from these records and
/// never mutates the source fields.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariableRecord {
    /// Wave/archive identifier the variable belongs to.
    pub wave_id: WaveId,
    /// Original short variable code as authored in the source file.
    pub variable_name: VariableName,
    /// Original free-text label as authored in the source file.
    pub raw_label: String,
    /// Pre-cleaned label from the upstream normalizer: lower-cased,
    /// underscore-delimited tokens.
    pub normalized_label: String,
    /// Variable-group classification from the group lookup, when assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_tag: Option<GroupTag>,
    /// Textual description of the variable's response categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_range_text: Option<String>,
}

impl VariableRecord {
    /// Globally unique identifier: wave id joined with the variable name.
    pub fn variable_id(&self) -> VariableId {
        format!("{}{}{}", self.wave_id, ID_SEPARATOR, self.variable_name)
    }

    /// Names of required fields that are empty on this record.
    ///
    /// A record reporting any missing field is excluded as malformed.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.wave_id.trim().is_empty() {
            missing.push("wave_id");
        }
        if self.variable_name.trim().is_empty() {
            missing.push("variable_name");
        }
        if self.normalized_label.trim().is_empty() {
            missing.push("normalized_label");
        }
        missing
    }
}

/// A variable's deduplicated keyword set, ready for matrix construction.
#[derive(Clone, Debug)]
pub struct TokenizedVariable {
    /// Owning variable.
    pub variable_id: VariableId,
    /// Wave the variable belongs to, used for wave-support counting.
    pub wave_id: WaveId,
    /// Group partition this variable standardizes within.
    pub group_tag: GroupTag,
    /// Deduplicated keywords extracted from the normalized label.
    pub keywords: BTreeSet<Keyword>,
}

/// One output row of the standardized-label table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StandardizedLabel {
    /// Owning variable.
    pub variable_id: VariableId,
    /// Canonical cross-wave-comparable label.
    pub var_label_std: String,
    /// Group the label was standardized within.
    pub group_tag: GroupTag,
}

/// One output row of the value-scale table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValueScaleRow {
    /// Owning variable.
    pub variable_id: VariableId,
    /// Classified response-scale archetype, `Unresolved` when no rule fired.
    pub values_type: ValueScaleTag,
}

/// Why a variable was excluded from the standardized-label output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// A required field was empty; the record never entered the pipeline.
    MalformedRecord {
        /// Names of the empty required fields.
        missing_fields: Vec<String>,
    },
    /// The label matched a structural pattern (weight, id, region code).
    StructuralVariable {
        /// The pattern that matched.
        matched_pattern: String,
    },
    /// No group tag was assigned; frequency statistics across unrelated
    /// concepts would be meaningless.
    MissingGroupTag,
    /// Stopword and numeric filtering removed every token of the label.
    EmptyKeywordSet,
    /// At least one keyword fell below the wave-support threshold, so the
    /// whole label is dropped rather than published incomplete.
    InsufficientSupport {
        /// The keywords that failed the threshold.
        keywords: Vec<Keyword>,
        /// The threshold in force for this run.
        min_wave_support: usize,
    },
}

impl ExclusionReason {
    /// Stable machine-readable tag for this reason.
    pub fn tag(&self) -> ReasonTag {
        match self {
            Self::MalformedRecord { .. } => audit::REASON_MALFORMED,
            Self::StructuralVariable { .. } => audit::REASON_STRUCTURAL,
            Self::MissingGroupTag => audit::REASON_MISSING_GROUP,
            Self::EmptyKeywordSet => audit::REASON_EMPTY_KEYWORDS,
            Self::InsufficientSupport { .. } => audit::REASON_INSUFFICIENT_SUPPORT,
        }
    }
}

/// One excluded variable with its attributable reason.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Exclusion {
    /// The excluded variable.
    pub variable_id: VariableId,
    /// Group tag of the source record, when it had one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_tag: Option<GroupTag>,
    /// Why the variable was dropped.
    pub reason: ExclusionReason,
}

/// A token that matched more than one special-case reading.
///
/// The row it belongs to is still standardized under the documented
/// priority; the flag records that the resolution was a policy, not a fact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AmbiguityRow {
    /// Variable whose label contained the ambiguous token.
    pub variable_id: VariableId,
    /// The token as it appeared in the label.
    pub token: String,
    /// The reading the fixed priority selected.
    pub resolved_to: String,
    /// The reading the fixed priority discarded.
    pub alternate_reading: String,
    /// Stable tag for the ambiguity class.
    pub tag: ReasonTag,
}

/// One keyword removed by support filtering, with the counts that removed it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KeywordDrop {
    /// Partition the keyword was dropped from.
    pub group_tag: GroupTag,
    /// The dropped keyword.
    pub keyword: Keyword,
    /// Distinct waves the keyword occurred in within the partition.
    pub wave_support: usize,
    /// The threshold in force for this run.
    pub min_wave_support: usize,
}

/// Every filtering decision of one pipeline run, attributable row by row.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AuditLog {
    /// Variables excluded from the standardized-label table, with reasons.
    pub exclusions: Vec<Exclusion>,
    /// Ambiguous-token flags for rows that were still standardized.
    pub ambiguities: Vec<AmbiguityRow>,
    /// Keywords removed by support filtering, per partition.
    pub keyword_drops: Vec<KeywordDrop>,
}

impl AuditLog {
    /// True when the run excluded nothing and flagged nothing.
    pub fn is_empty(&self) -> bool {
        self.exclusions.is_empty() && self.ambiguities.is_empty() && self.keyword_drops.is_empty()
    }

    /// Exclusions carrying the given reason tag.
    pub fn exclusions_with_tag(&self, tag: ReasonTag) -> impl Iterator<Item = &Exclusion> {
        self.exclusions
            .iter()
            .filter(move |exclusion| exclusion.reason.tag() == tag)
    }
}

/// Complete result of one pipeline run.
#[derive(Clone, Debug, Serialize)]
pub struct PipelineOutput {
    /// Standardized-label table, sorted by (group tag, variable id).
    pub labels: Vec<StandardizedLabel>,
    /// Value-scale table, sorted by variable id.
    pub scales: Vec<ValueScaleRow>,
    /// Filtering and ambiguity audit for this run.
    pub audit: AuditLog,
    /// Per-rule fire counts for rule-rot reporting.
    #[serde(skip)]
    pub rule_usage: crate::dictionary::RuleUsage,
}
