use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::defaults;
use crate::errors::HarmonizerError;
use crate::types::Keyword;

/// Top-level pipeline configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Minimum number of distinct waves a keyword must occur in to survive
    /// support filtering. A variable loses its whole label when any of its
    /// keywords falls below this threshold.
    pub min_wave_support: usize,
    /// Keywords ordered after all others regardless of computed frequency.
    ///
    /// These are structural suffix qualifiers (category-count markers), not
    /// topical keywords, so frequency ranking must not pull them forward.
    pub pinned_last_keywords: BTreeSet<Keyword>,
    /// Stopword-list entries that are kept despite being generic stopwords.
    ///
    /// Survey vocabulary like "working" (working conditions) and "right"
    /// (left-right placement) appears in general stopword lists but is
    /// domain-significant here.
    pub protected_stopwords: BTreeSet<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_wave_support: defaults::MIN_WAVE_SUPPORT,
            pinned_last_keywords: defaults::PINNED_LAST_KEYWORDS
                .iter()
                .map(|keyword| keyword.to_string())
                .collect(),
            protected_stopwords: defaults::PROTECTED_STOPWORDS
                .iter()
                .map(|word| word.to_string())
                .collect(),
        }
    }
}

impl PipelineConfig {
    /// Validate configured values before a run.
    pub fn validate(&self) -> Result<(), HarmonizerError> {
        if self.min_wave_support == 0 {
            return Err(HarmonizerError::Configuration(
                "min_wave_support must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
