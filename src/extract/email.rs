//! Email address pattern matching
//!
//! A pure scanning layer: no I/O, no deduplication. Duplicate matches are
//! preserved so that aggregation (set union) stays the job of the callers.

use once_cell::sync::Lazy;
use regex::Regex;

/// Address grammar: local part of letters/digits/`._%+-`, a domain of
/// letters/digits/`.-`, and a TLD of at least two letters.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
        .expect("email pattern is a valid regex")
});

/// Finds every non-overlapping email address match in the given text
///
/// Case is preserved as found; no normalization is applied. Empty input
/// yields an empty vector. There are no error conditions: text without
/// addresses simply produces no matches.
///
/// # Arguments
///
/// * `text` - The text to scan
///
/// # Returns
///
/// All matches in order of appearance, duplicates included
pub fn find_emails(text: &str) -> Vec<String> {
    EMAIL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_address() {
        let found = find_emails("contact alice@example.com for details");
        assert_eq!(found, vec!["alice@example.com"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(find_emails("").is_empty());
    }

    #[test]
    fn test_no_matches() {
        assert!(find_emails("nothing to see here").is_empty());
    }

    #[test]
    fn test_duplicates_preserved() {
        let found = find_emails("bob@example.org and again bob@example.org");
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_local_part_special_characters() {
        let found = find_emails("first.last+tag%x_y-z@sub.example.co");
        assert_eq!(found, vec!["first.last+tag%x_y-z@sub.example.co"]);
    }

    #[test]
    fn test_case_preserved() {
        let found = find_emails("Alice.Smith@Example.COM");
        assert_eq!(found, vec!["Alice.Smith@Example.COM"]);
    }

    #[test]
    fn test_single_letter_tld_rejected() {
        assert!(find_emails("bad@example.c").is_empty());
    }

    #[test]
    fn test_multiple_addresses_in_order() {
        let found = find_emails("a@x.org then b@y.net");
        assert_eq!(found, vec!["a@x.org", "b@y.net"]);
    }

    #[test]
    fn test_deterministic() {
        let text = "alice@example.com bob@example.org alice@example.com";
        assert_eq!(find_emails(text), find_emails(text));
    }

    #[test]
    fn test_address_embedded_in_surrounding_text() {
        let found = find_emails("mailto:carol@example.net?subject=hi");
        assert_eq!(found, vec!["carol@example.net"]);
    }
}
