//! Suggestion-link normalization.
//!
//! The sheet's suggestion columns hold either a full URL or free text
//! ("Panela elétrica"). Free text becomes a search-engine query link so the
//! rendered registry is always navigable.

/// Fixed search endpoint for non-URL suggestions.
const SEARCH_ENDPOINT: &str = "https://www.google.com/search?q=";

/// Turn a raw suggestion value into a navigable link.
///
/// - Empty or whitespace-only input yields `""`.
/// - An absolute `http://` / `https://` URL is returned unchanged (trimmed).
/// - Anything else is percent-encoded onto [`SEARCH_ENDPOINT`].
///
/// Total over strings: no side effects, no failure modes.
pub fn normalize(raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        return String::new();
    }

    if value.starts_with("http://") || value.starts_with("https://") {
        return value.to_string();
    }

    format!("{SEARCH_ENDPOINT}{}", urlencoding::encode(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  "), "");
        assert_eq!(normalize("\t\n"), "");
    }

    #[test]
    fn test_absolute_urls_pass_through() {
        assert_eq!(normalize("https://a.co/x"), "https://a.co/x");
        assert_eq!(normalize("http://a.co/x"), "http://a.co/x");
        // Surrounding whitespace is trimmed, the URL itself untouched.
        assert_eq!(normalize("  https://a.co/x  "), "https://a.co/x");
    }

    #[test]
    fn test_free_text_becomes_search_query() {
        let link = normalize("Panela elétrica");
        assert_eq!(
            link,
            "https://www.google.com/search?q=Panela%20el%C3%A9trica"
        );
    }

    #[test]
    fn test_scheme_must_be_a_prefix() {
        // "http" buried mid-text is still free text, not a URL.
        let link = normalize("loja http exemplo");
        assert!(link.starts_with(SEARCH_ENDPOINT));
    }
}
