/// Converts a display string into a lowercase, hyphen-separated, URL-safe slug.
///
/// Non-ASCII text is transliterated first (`"Алиса"` becomes `"alisa"`), then
/// every run of characters that is not an ASCII letter or digit collapses into
/// a single `-`, with leading and trailing separators trimmed.
pub fn slugify(text: &str) -> String {
    ::slug::slugify(text)
}
