// ABOUTME: Naming and whitespace utilities shared across decoration.
// ABOUTME: Provides whitespace normalization and class-name/camel-case conversion.

use once_cell::sync::Lazy;
use regex::Regex;

// Runs of anything that cannot appear in a class name
static NON_ALNUM_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9a-z]+").unwrap());

/// Collapses runs of whitespace into single spaces and trims the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Converts arbitrary text to a CSS class name.
///
/// Lowercases the input, collapses every run of non-alphanumeric characters
/// into a single dash, and strips leading/trailing dashes. Block names and
/// config keys both go through this.
pub fn to_class_name(s: &str) -> String {
    let lowered = s.to_lowercase();
    let dashed = NON_ALNUM_RUN.replace_all(&lowered, "-");
    dashed.trim_matches('-').to_string()
}

/// Converts text to a camelCase identifier via its class-name form.
pub fn to_camel_case(s: &str) -> String {
    let class = to_class_name(s);
    let mut out = String::with_capacity(class.len());
    let mut upper_next = false;
    for c in class.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  hello   world  "), "hello world");
        assert_eq!(normalize_whitespace("no\textra\nspaces"), "no extra spaces");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_to_class_name_basic() {
        assert_eq!(to_class_name("Hero Banner"), "hero-banner");
        assert_eq!(to_class_name("cards"), "cards");
    }

    #[test]
    fn test_to_class_name_collapses_punctuation() {
        assert_eq!(to_class_name("FAQ & Answers!"), "faq-answers");
        assert_eq!(to_class_name("  --weird--  "), "weird");
    }

    #[test]
    fn test_to_class_name_empty() {
        assert_eq!(to_class_name(""), "");
        assert_eq!(to_class_name("!!!"), "");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("Background Image"), "backgroundImage");
        assert_eq!(to_camel_case("cta-link"), "ctaLink");
        assert_eq!(to_camel_case("title"), "title");
    }
}
