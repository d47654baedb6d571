/// Number of characters sent to fact-check search when no override is configured.
pub const DEFAULT_QUERY_CHARS: usize = 100;

/// Derives a search query from the analysed text: the trimmed text cut to at
/// most `max_chars` characters. Never splits a code point.
pub fn derive_query(text: &str, max_chars: usize) -> &str {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((byte_index, _)) => trimmed[..byte_index].trim_end(),
        None => trimmed,
    }
}
