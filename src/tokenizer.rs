//! Keyword extraction: split, filter, and resolve country codes.

use std::collections::BTreeSet;

use crate::countries;
use crate::stopwords::StopwordFilter;
use crate::types::Keyword;
use crate::utils::{is_numeric_token, split_label};

/// A token that matched more than one special-case reading.
///
/// Resolution follows a fixed priority; the flag records that a policy was
/// applied, so reviewers can find every affected label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmbiguousToken {
    /// The token as it appeared in the label.
    pub token: String,
    /// The reading the fixed priority selected.
    pub resolved_to: String,
    /// The reading the fixed priority discarded.
    pub alternate_reading: String,
}

/// Keyword set for one label, plus any ambiguity flags raised on the way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenizedLabel {
    /// Deduplicated keywords; repeated tokens within one label count once.
    pub keywords: BTreeSet<Keyword>,
    /// Tokens whose resolution was a priority decision, not a fact.
    pub ambiguities: Vec<AmbiguousToken>,
}

impl TokenizedLabel {
    /// True when filtering removed every token of the label.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

/// Extract the keyword set of one normalized label.
///
/// Splits on the separator and plain spaces (never on the joiner), drops
/// stopwords and purely numeric tokens, then resolves two-letter EU country
/// codes to country names. The "dk" code collides with the don't-know marker
/// abbreviation; country resolution wins and the occurrence is flagged.
pub fn tokenize(label: &str, stopwords: &StopwordFilter) -> TokenizedLabel {
    let mut out = TokenizedLabel::default();
    for token in split_label(label) {
        if stopwords.is_stopword(token) || is_numeric_token(token) {
            continue;
        }
        let keyword = match countries::country_name(token) {
            Some(country) => {
                if token == countries::DONT_KNOW_CODE {
                    out.ambiguities.push(AmbiguousToken {
                        token: token.to_string(),
                        resolved_to: country.to_string(),
                        alternate_reading: countries::DONT_KNOW_READING.to_string(),
                    });
                }
                country
            }
            None => token,
        };
        // Two fixed post-substitutions: the one two-word country name joins
        // into a single keyword, and the historic "ec" abbreviation expands
        // to its compound form.
        let keyword = match keyword {
            "united kingdom" => "united-kingdom",
            "ec" => "european-community",
            other => other,
        };
        out.keywords.insert(keyword.to_string());
    }
    out
}
