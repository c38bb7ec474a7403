//! Comparison-only text normalization.
//!
//! Display text is never rewritten; these helpers produce a comparison key.

use unicode_normalization::UnicodeNormalization;

/// NFKC fold, trim, and lowercase.
pub fn normalize_text(s: &str) -> String {
    let folded: String = s.nfkc().collect();
    folded.trim().to_lowercase()
}

/// Returns `true` if two strings are equal after normalization.
pub fn texts_equal(a: &str, b: &str) -> bool {
    normalize_text(a) == normalize_text(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_folds_case() {
        assert_eq!(normalize_text("  No Real Solutions "), "no real solutions");
        assert!(texts_equal("X = 3", "x = 3"));
    }

    #[test]
    fn nfkc_folds_compatibility_forms() {
        // Fullwidth digits and parentheses fold to ASCII.
        assert!(texts_equal("（３, ２）", "(3, 2)"));
        // Superscript two folds to a plain digit.
        assert_eq!(normalize_text("x²"), "x2");
    }

    #[test]
    fn distinct_texts_stay_distinct() {
        assert!(!texts_equal("(3, 2)", "(2, 3)"));
        assert!(!texts_equal("x = -2", "x = 2"));
    }
}
