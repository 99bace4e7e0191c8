//! Label-string helpers shared by the tokenizer and synthesizer.

use crate::constants::separators::SEPARATOR;

/// Collapse runs of the separator into one and trim boundary separators.
///
/// This is the final cleanup step of label synthesis: absent keywords leave
/// empty slots behind, which show up as doubled or dangling separators.
/// Idempotent: re-applying to its own output is a no-op.
pub fn collapse_and_trim<T: AsRef<str>>(label: T) -> String {
    let mut collapsed = String::new();
    let mut seen_separator = false;
    for ch in label.as_ref().chars() {
        if ch == SEPARATOR {
            if !seen_separator {
                collapsed.push(SEPARATOR);
                seen_separator = true;
            }
        } else {
            collapsed.push(ch);
            seen_separator = false;
        }
    }
    collapsed
        .trim_matches(SEPARATOR)
        .to_string()
}

/// Split a label into candidate tokens on the separator and plain spaces.
///
/// The joiner character never splits, so multi-word concepts bound by the
/// normalizer stay intact.
pub fn split_label(label: &str) -> impl Iterator<Item = &str> {
    label
        .split([SEPARATOR, ' '])
        .filter(|token| !token.is_empty())
}

/// True when a token consists solely of ASCII digits.
pub fn is_numeric_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|ch| ch.is_ascii_digit())
}
