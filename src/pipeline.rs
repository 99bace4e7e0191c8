//! End-to-end standardization: pre-filters, per-group execution, reassembly.

use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;
use tracing::{debug, warn};

use crate::classifier::ValueDictionary;
use crate::config::PipelineConfig;
use crate::constants::{audit, structural};
use crate::data::{
    AmbiguityRow, AuditLog, Exclusion, ExclusionReason, KeywordDrop, PipelineOutput,
    StandardizedLabel, TokenizedVariable, ValueScaleRow, VariableRecord,
};
use crate::dictionary::{RuleSet, RuleUsage};
use crate::errors::HarmonizerError;
use crate::grouping::partition_by_group;
use crate::matrix::build_matrix;
use crate::normalizer;
use crate::ranker::rank_keywords;
use crate::stopwords::StopwordFilter;
use crate::synthesizer::synthesize;
use crate::tokenizer;

static STRUCTURAL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    structural::PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).expect("structural patterns compile"))
        .collect()
});

/// First structural pattern matching the label, if any.
fn structural_match(label: &str) -> Option<&'static str> {
    STRUCTURAL_PATTERNS
        .iter()
        .zip(structural::PATTERNS)
        .find(|(regex, _)| regex.is_match(label))
        .map(|(_, pattern)| *pattern)
}

struct PartitionOutput {
    labels: Vec<StandardizedLabel>,
    drops: Vec<KeywordDrop>,
    exclusions: Vec<Exclusion>,
}

/// The standardization pipeline: configuration plus compiled dictionaries.
///
/// A pipeline is immutable once built and can be reused across runs; every
/// run rebuilds all derived tables from its input, so no state leaks
/// between runs or between group partitions.
pub struct Pipeline {
    config: PipelineConfig,
    rules: RuleSet,
    values: ValueDictionary,
    stopwords: StopwordFilter,
}

impl Pipeline {
    /// Build a pipeline with the built-in dictionaries.
    pub fn new(config: PipelineConfig) -> Result<Self, HarmonizerError> {
        Self::with_dictionaries(config, RuleSet::builtin(), ValueDictionary::builtin())
    }

    /// Build a pipeline with caller-supplied dictionaries.
    pub fn with_dictionaries(
        config: PipelineConfig,
        rules: RuleSet,
        values: ValueDictionary,
    ) -> Result<Self, HarmonizerError> {
        config.validate()?;
        let stopwords = StopwordFilter::standard(&config.protected_stopwords);
        Ok(Self {
            config,
            rules,
            values,
            stopwords,
        })
    }

    /// The configuration in force.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The compiled label rule table.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Run the full pipeline over one batch of records.
    ///
    /// Per-record problems become audit rows, never errors: a malformed or
    /// filtered record is skipped and attributed, and the batch always
    /// completes. Group partitions run independently; a partition that
    /// loses all its variables to filtering contributes zero rows without
    /// affecting the others.
    pub fn run(&self, records: &[VariableRecord]) -> PipelineOutput {
        let mut audit_log = AuditLog::default();
        let mut usage = RuleUsage::for_rules(&self.rules);
        let mut scales = Vec::new();
        let mut standardizable: Vec<(TokenizedVariable, Vec<AmbiguityRow>)> = Vec::new();

        for record in records {
            let variable_id = record.variable_id();

            let missing = record.missing_fields();
            if !missing.is_empty() {
                warn!(
                    variable_id = %variable_id,
                    fields = ?missing,
                    "skipping malformed record"
                );
                audit_log.exclusions.push(Exclusion {
                    variable_id,
                    group_tag: record.group_tag.clone(),
                    reason: ExclusionReason::MalformedRecord {
                        missing_fields: missing.iter().map(|field| field.to_string()).collect(),
                    },
                });
                continue;
            }

            // Scale classification is independent of standardization: every
            // well-formed record with category text gets a row, even when
            // the label side is filtered out below.
            if let Some(text) = &record.value_range_text {
                scales.push(ValueScaleRow {
                    variable_id: variable_id.clone(),
                    values_type: self.values.classify(text),
                });
            }

            if let Some(pattern) = structural_match(&record.normalized_label) {
                audit_log.exclusions.push(Exclusion {
                    variable_id,
                    group_tag: record.group_tag.clone(),
                    reason: ExclusionReason::StructuralVariable {
                        matched_pattern: pattern.to_string(),
                    },
                });
                continue;
            }

            let normalized =
                normalizer::normalize_tracked(&record.normalized_label, &self.rules, &mut usage);
            let tokenized = tokenizer::tokenize(&normalized, &self.stopwords);

            let Some(group_tag) = record.group_tag.clone() else {
                audit_log.exclusions.push(Exclusion {
                    variable_id,
                    group_tag: None,
                    reason: ExclusionReason::MissingGroupTag,
                });
                continue;
            };

            if tokenized.is_empty() {
                audit_log.exclusions.push(Exclusion {
                    variable_id,
                    group_tag: Some(group_tag),
                    reason: ExclusionReason::EmptyKeywordSet,
                });
                continue;
            }

            let flags = tokenized
                .ambiguities
                .into_iter()
                .map(|flag| AmbiguityRow {
                    variable_id: variable_id.clone(),
                    token: flag.token,
                    resolved_to: flag.resolved_to,
                    alternate_reading: flag.alternate_reading,
                    tag: audit::AMBIGUITY_COUNTRY_DONT_KNOW,
                })
                .collect();
            standardizable.push((
                TokenizedVariable {
                    variable_id,
                    wave_id: record.wave_id.clone(),
                    group_tag,
                    keywords: tokenized.keywords,
                },
                flags,
            ));
        }

        let mut grouped = Vec::with_capacity(standardizable.len());
        for (variable, flags) in standardizable {
            audit_log.ambiguities.extend(flags);
            grouped.push(variable);
        }

        let partitions = partition_by_group(grouped);
        debug!(
            records = records.len(),
            partitions = partitions.len(),
            "standardizing partitions"
        );

        // Partitions share no state and emit disjoint variable ids, so they
        // run in parallel; the final sort keeps the reassembled table stable
        // regardless of completion order.
        let partition_outputs: Vec<PartitionOutput> = partitions
            .into_par_iter()
            .map(|(group_tag, variables)| {
                let build = build_matrix(&group_tag, &variables, self.config.min_wave_support);
                let order = rank_keywords(&build.matrix, &self.config.pinned_last_keywords);
                let labels = synthesize(&build.matrix, &order)
                    .into_iter()
                    .map(|(variable_id, var_label_std)| StandardizedLabel {
                        variable_id,
                        var_label_std,
                        group_tag: group_tag.clone(),
                    })
                    .collect();
                PartitionOutput {
                    labels,
                    drops: build.drops,
                    exclusions: build.exclusions,
                }
            })
            .collect();

        let mut labels = Vec::new();
        for output in partition_outputs {
            labels.extend(output.labels);
            audit_log.keyword_drops.extend(output.drops);
            audit_log.exclusions.extend(output.exclusions);
        }
        labels.sort_by(|a, b| {
            (a.group_tag.as_str(), a.variable_id.as_str())
                .cmp(&(b.group_tag.as_str(), b.variable_id.as_str()))
        });
        scales.sort_by(|a, b| a.variable_id.cmp(&b.variable_id));

        debug!(
            labels = labels.len(),
            scales = scales.len(),
            exclusions = audit_log.exclusions.len(),
            ambiguities = audit_log.ambiguities.len(),
            "pipeline run complete"
        );

        PipelineOutput {
            labels,
            scales,
            audit: audit_log,
            rule_usage: usage,
        }
    }
}
