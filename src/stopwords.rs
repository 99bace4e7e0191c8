//! Stopword filtering with a protected survey-vocabulary allow-list.

use std::collections::{BTreeSet, HashSet};

/// Standard English stopword list used for keyword filtering.
///
/// Deliberately includes "working", "right", and "other": general stopword
/// lists carry them, which is exactly why the protected allow-list exists.
/// In survey labels they are topical vocabulary (working conditions,
/// left-right placement, "other" response categories).
pub const ENGLISH_STOPWORDS: &[&str] = &[
    // articles, pronouns
    "a", "an", "the", "i", "me", "my", "we", "our", "ours", "you", "your", "yours", "he", "him",
    "his", "she", "her", "hers", "it", "its", "they", "them", "their", "theirs", "this", "that",
    "these", "those", "itself", "themselves", "oneself",
    // question words
    "what", "which", "who", "whom", "whose", "why", "when", "where", "how",
    // prepositions
    "about", "above", "across", "after", "against", "along", "among", "around", "at", "before",
    "behind", "below", "between", "by", "down", "during", "for", "from", "in", "inside", "into",
    "near", "of", "off", "on", "onto", "out", "over", "per", "through", "to", "towards", "under",
    "until", "up", "upon", "via", "with", "within", "without",
    // conjunctions
    "and", "as", "because", "but", "if", "nor", "or", "since", "so", "than", "though", "unless",
    "while", "whether",
    // auxiliary and light verbs
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "doing", "would", "should", "could", "can", "may", "might", "must",
    "will", "shall", "get", "gets", "got", "make", "makes", "made", "go", "goes", "going",
    "take", "takes", "say", "says", "said", "see", "seen", "working",
    // quantifiers, determiners, common adverbs
    "all", "any", "both", "each", "either", "every", "few", "more", "most", "much", "neither",
    "no", "none", "not", "one", "other", "others", "same", "several", "some", "such", "very",
    "too", "only", "own", "then", "there", "here", "now", "again", "also", "another", "back",
    "even", "ever", "just", "least", "less", "many", "often", "once", "rather", "right", "still",
    "well", "yet", "etc",
];

/// Stopword filter honoring a protected allow-list.
///
/// Lookup is exact (the corpus is already lower-cased upstream). Protected
/// words are removed from the effective set at construction, so filtering
/// stays a single `HashSet` probe per token.
#[derive(Clone, Debug)]
pub struct StopwordFilter {
    words: HashSet<String>,
}

impl StopwordFilter {
    /// Build a filter from any word list minus the protected allow-list.
    pub fn new<I, S>(words: I, protected: &BTreeSet<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| word.as_ref().to_string())
            .filter(|word| !protected.contains(word))
            .collect();
        Self { words }
    }

    /// Build the standard English filter minus the protected allow-list.
    pub fn standard(protected: &BTreeSet<String>) -> Self {
        Self::new(ENGLISH_STOPWORDS.iter().copied(), protected)
    }

    /// True when `token` should be removed.
    pub fn is_stopword(&self, token: &str) -> bool {
        self.words.contains(token)
    }
}
