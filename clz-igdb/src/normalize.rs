/// Edition marker CLZ appends to budget re-releases. Matched after lower-casing.
const GREATEST_HITS: &str = "(greatest hits)";

/// Canonical search term for a display title.
///
/// Lower-cases, removes every `(greatest hits)` marker and trims surrounding
/// whitespace. Punctuation and diacritics are left alone.
pub fn normalize_title(title: &str) -> String {
    let mut term = title.to_lowercase();
    // Removing one marker can splice together another, e.g. "(greatest (greatest hits)hits)".
    while let Some(pos) = term.find(GREATEST_HITS) {
        term.replace_range(pos..pos + GREATEST_HITS.len(), "");
    }
    term.trim().to_string()
}
