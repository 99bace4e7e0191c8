/// Constants used by label splitting and reassembly.
pub mod separators {
    /// Token separator in normalized and standardized labels.
    pub const SEPARATOR: char = '_';
    /// Non-splitting joiner binding multi-word concepts into one keyword.
    pub const JOINER: char = '-';
    /// Separator between wave id and variable name in a variable id.
    pub const ID_SEPARATOR: &str = "::";
}

/// Default values for the pipeline configuration surface.
pub mod defaults {
    /// Minimum number of distinct waves a keyword must appear in to survive
    /// support filtering. The curated runs used 5 and 10 at different stages.
    pub const MIN_WAVE_SUPPORT: usize = 5;
    /// Keywords forced to the end of the column order regardless of
    /// frequency. "cat" is the category-count suffix marker left behind by
    /// labels like "eu membership 4 cat" once the digits are filtered.
    pub const PINNED_LAST_KEYWORDS: &[&str] = &["cat"];
    /// Stopword-list entries that are domain-significant survey vocabulary
    /// and must never be filtered.
    pub const PROTECTED_STOPWORDS: &[&str] = &["working", "right", "other"];
}

/// Patterns identifying structurally irrelevant variables.
///
/// Matched against the normalized label before any standardization work;
/// a match excludes the variable with a `structural_variable` audit entry.
pub mod structural {
    /// Ordered pattern list; the first matching pattern is reported.
    pub const PATTERNS: &[&str] = &[
        "(^|_)weight(ing)?(_|$)",
        "(^|_)id(_|$)",
        "(^|_)serial(_|$)",
        "(^|_)region(s)?(_|$)",
        "(^|_)nuts(_|$)",
        "(^|_)interviewer(_|$)",
    ];
}

/// Stable reason tags attached to audit rows.
pub mod audit {
    use crate::types::ReasonTag;

    /// Record was missing a required field and never entered the pipeline.
    pub const REASON_MALFORMED: ReasonTag = "malformed_record";
    /// Label matched a structural pattern (weight, id, region code).
    pub const REASON_STRUCTURAL: ReasonTag = "structural_variable";
    /// Record carried no group tag and cannot be safely standardized.
    pub const REASON_MISSING_GROUP: ReasonTag = "missing_group_tag";
    /// Every token of the label was removed by stopword/numeric filtering.
    pub const REASON_EMPTY_KEYWORDS: ReasonTag = "empty_keyword_set";
    /// One of the variable's keywords fell below the wave-support threshold.
    pub const REASON_INSUFFICIENT_SUPPORT: ReasonTag = "insufficient_support";
    /// Token reads both as a country code and as the don't-know marker.
    pub const AMBIGUITY_COUNTRY_DONT_KNOW: ReasonTag = "country_code_dont_know";
}

/// Canonical tag strings for value-scale classification results.
pub mod classifier {
    /// Mentioned / not mentioned item battery.
    pub const TAG_MENTIONED: &str = "mentioned_not_mentioned";
    /// Tend to trust / tend not to trust.
    pub const TAG_TRUST: &str = "trust_no_trust";
    /// Decision by national government vs. jointly within the EU.
    pub const TAG_NATIONAL_GOVERNMENT_EU: &str = "national_government_eu";
    /// Plain yes / no.
    pub const TAG_YES_NO: &str = "yes_no";
    /// Positive, negative, neutral, in that category order.
    pub const TAG_POSITIVE_NEGATIVE_NEUTRAL: &str = "positive_negative_neutral";
    /// Positive, neutral, negative: the reordered variant used by some waves.
    pub const TAG_POSITIVE_NEUTRAL_NEGATIVE: &str = "positive_neutral_negative";
    /// Four-point ordinal scale (satisfaction, agreement, intensity).
    pub const TAG_FOUR_POINT_ORDINAL: &str = "four_point_ordinal";
    /// No dictionary rule matched the category text.
    pub const TAG_UNRESOLVED: &str = "unresolved";

    /// Priority pattern: any category text containing this fragment is the
    /// mentioned/not-mentioned type, regardless of other dictionary rules.
    pub const NOT_MENTIONED_PATTERN: &str = "not mentioned";
}
