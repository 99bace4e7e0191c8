/// Identifier for one survey wave (archive edition).
/// Example: `za4411`
pub type WaveId = String;
/// Original short variable code within one wave.
/// Example: `v225`
pub type VariableName = String;
/// Globally unique variable identifier, wave id joined with variable name.
/// Example: `za4411::v225`
pub type VariableId = String;
/// Normalized keyword extracted from a label, used as a matching unit.
/// Examples: `trust`, `left-right`, `european-commission`
pub type Keyword = String;
/// Variable-group classification assigned by the upstream lookup table.
/// Examples: `trust`, `protocol`, `life satisfaction`
pub type GroupTag = String;
/// Regex source text for a dictionary rule pattern.
/// Example: `(^|_)satisf(_|$)`
pub type Pattern = String;
/// Replacement text for a dictionary rule, may reference capture groups.
/// Example: `${1}satisfaction${2}`
pub type Replacement = String;
/// Stable machine-readable tag naming an audit reason.
/// Examples: `insufficient_support`, `missing_group_tag`
pub type ReasonTag = &'static str;
