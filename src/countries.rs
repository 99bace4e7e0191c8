//! EU member-state two-letter codes as they appear in survey labels.

/// Two-letter code to lower-cased country name, EU-15 membership.
///
/// "gb" maps to the only two-word name in the table; the tokenizer joins it
/// after resolution so it stays one keyword.
pub const EU_COUNTRY_CODES: &[(&str, &str)] = &[
    ("be", "belgium"),
    ("dk", "denmark"),
    ("de", "germany"),
    ("gr", "greece"),
    ("es", "spain"),
    ("fr", "france"),
    ("ie", "ireland"),
    ("it", "italy"),
    ("lu", "luxembourg"),
    ("nl", "netherlands"),
    ("at", "austria"),
    ("pt", "portugal"),
    ("fi", "finland"),
    ("se", "sweden"),
    ("gb", "united kingdom"),
];

/// The code that doubles as the don't-know marker abbreviation in labels.
///
/// There is no signal in a bare label to tell Denmark from "don't know";
/// resolution picks the country by fixed priority and the occurrence is
/// flagged, never silently guessed.
pub const DONT_KNOW_CODE: &str = "dk";

/// Human-readable description of the discarded "dk" reading.
pub const DONT_KNOW_READING: &str = "dont know marker";

/// Country name for a two-letter code, if it is in the table.
pub fn country_name(code: &str) -> Option<&'static str> {
    EU_COUNTRY_CODES
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, name)| *name)
}
