//! Final label assembly from the ordered matrix columns.

use crate::constants::separators::SEPARATOR;
use crate::matrix::KeywordMatrix;
use crate::ranker::KeywordStats;
use crate::types::VariableId;
use crate::utils::collapse_and_trim;

/// Concatenate each row's present keywords in column order.
///
/// Absent keywords contribute empty slots; the collapse and trim pass
/// removes the separator runs they leave behind, so the result is stable
/// under re-collapsing.
///
/// Known limitation: frequency ordering has no concept hierarchy, so a
/// subordinate term can precede its head ("internet_trust" rather than
/// "trust_internet") when it is the more common keyword in scope. Such rows
/// are manual-review cases, not defects to reorder heuristically.
pub fn synthesize(matrix: &KeywordMatrix, order: &[KeywordStats]) -> Vec<(VariableId, String)> {
    let separator = SEPARATOR.to_string();
    matrix
        .rows()
        .map(|(variable_id, row)| {
            let slots: Vec<&str> = order
                .iter()
                .map(|stats| {
                    if row.keywords.contains(&stats.keyword) {
                        stats.keyword.as_str()
                    } else {
                        ""
                    }
                })
                .collect();
            let label = collapse_and_trim(slots.join(&separator));
            (variable_id.clone(), label)
        })
        .collect()
}
