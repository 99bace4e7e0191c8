#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Value-scale classification from response-category text.
pub mod classifier;
/// Pipeline configuration types.
pub mod config;
/// Centralized constants used across the pipeline stages.
pub mod constants;
/// EU country-code table and the ambiguous don't-know marker.
pub mod countries;
/// Record, output-row, and audit types.
pub mod data;
/// Ordered label-rewrite dictionary and rule-usage tracking.
pub mod dictionary;
/// Reusable example runners shared by downstream crates.
pub mod example_apps;
/// Group lookup, tag assignment, and corpus partitioning.
pub mod grouping;
/// Sparse keyword presence matrix and wave-support filtering.
pub mod matrix;
/// Aggregate metrics helpers.
pub mod metrics;
/// Question-prefix stripping and rule application.
pub mod normalizer;
/// End-to-end standardization pipeline.
pub mod pipeline;
/// Keyword frequency ranking.
pub mod ranker;
/// Stopword list and filtering.
pub mod stopwords;
/// Standardized-label assembly.
pub mod synthesizer;
/// Label splitting and keyword extraction.
pub mod tokenizer;
/// Shared type aliases.
pub mod types;
/// Label-string helpers.
pub mod utils;

mod errors;

pub use classifier::{builtin_value_rules, ValueDictionary, ValueRule, ValueScaleTag};
pub use config::PipelineConfig;
pub use data::{
    AmbiguityRow, AuditLog, Exclusion, ExclusionReason, KeywordDrop, PipelineOutput,
    StandardizedLabel, TokenizedVariable, ValueScaleRow, VariableRecord,
};
pub use dictionary::{builtin_label_rules, LabelRule, RuleSet, RuleUsage};
pub use errors::HarmonizerError;
pub use grouping::GroupLookup;
pub use matrix::{build_matrix, KeywordMatrix, MatrixBuild, MatrixRow};
pub use pipeline::Pipeline;
pub use ranker::{rank_keywords, KeywordStats};
pub use stopwords::StopwordFilter;
pub use synthesizer::synthesize;
pub use tokenizer::{tokenize, AmbiguousToken, TokenizedLabel};
pub use types::{
    GroupTag, Keyword, Pattern, ReasonTag, Replacement, VariableId, VariableName, WaveId,
};
