use once_cell::sync::Lazy;
use regex::Regex;

/// A whole query made of exactly one word: letters, digits or underscore.
static SINGLE_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<query>\w+)\s*$").expect("single word pattern is valid")
});

/// Trim surrounding whitespace and lower-case.
pub fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

/// The single word in `query`, or `None` when the query is empty, holds
/// several words, or contains anything outside the word-character class.
///
/// Hyphens are not word characters, so `online-accounts` is rejected.
pub fn single_word(query: &str) -> Option<&str> {
    SINGLE_WORD
        .captures(query)
        .and_then(|caps| caps.name("query"))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  WiFi \n"), "wifi");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("Date & Time"), "date & time");
    }

    #[test]
    fn single_word_accepts_one_word() {
        assert_eq!(single_word("network"), Some("network"));
        assert_eq!(single_word("  display\t"), Some("display"));
        assert_eq!(single_word("snake_case_9"), Some("snake_case_9"));
    }

    #[test]
    fn single_word_rejects_other_shapes() {
        assert_eq!(single_word(""), None);
        assert_eq!(single_word("   "), None);
        assert_eq!(single_word("two words"), None);
        assert_eq!(single_word("online-accounts"), None);
        assert_eq!(single_word("wifi!"), None);
        assert_eq!(single_word("date&time"), None);
    }

    proptest! {
        #[test]
        fn words_with_inner_whitespace_never_match(
            left in "[a-z]{1,8}",
            gap in "[ \t]{1,3}",
            right in "[a-z]{1,8}",
        ) {
            let query = format!("{left}{gap}{right}");
            prop_assert_eq!(single_word(&query), None);
        }

        #[test]
        fn punctuation_never_matches(
            word in "[a-z]{0,6}",
            punct in "[-!?.,&/:;+]",
        ) {
            let query = format!("{word}{punct}");
            prop_assert_eq!(single_word(&query), None);
        }
    }
}
