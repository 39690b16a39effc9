//! Keyword and query normalization
//!
//! One pure function shared by index building and query matching, so
//! both sides agree on what a keyword looks like. The policy is
//! variant-uniform: Unicode lowercasing is a no-op on Bengali script,
//! and Banglish gets the same Latin lowercasing as English. No
//! transliteration happens here; cross-script coverage comes from the
//! catalog enumerating keywords in every script it wants matched.

/// Punctuation stripped before matching: Latin sentence punctuation
/// plus the Bengali danda. None of these carry meaning in short
/// catalog queries.
const STRIPPED_PUNCTUATION: &[char] = &['.', ',', '?', '!', '।'];

/// Normalize text for keyword matching
///
/// Trims, collapses internal whitespace runs to a single space,
/// lowercases, and strips the fixed punctuation set. Idempotent:
/// `normalize(normalize(s)) == normalize(s)` for all `s`.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect();

    stripped
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_collapses_whitespace() {
        assert_eq!(normalize("  internet   package \t offer "), "internet package offer");
    }

    #[test]
    fn test_lowercases_latin_only_semantics() {
        assert_eq!(normalize("Net Pack KINBO"), "net pack kinbo");
        // Bengali has no case; the text passes through unchanged
        assert_eq!(normalize("ইন্টারনেট প্যাকেজ"), "ইন্টারনেট প্যাকেজ");
    }

    #[test]
    fn test_strips_punctuation() {
        assert_eq!(normalize("balance?"), "balance");
        assert_eq!(normalize("recharge, please."), "recharge please");
        assert_eq!(normalize("ব্যালেন্স দেখাও।"), "ব্যালেন্স দেখাও");
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("?!."), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "  What IS my Balance?  ",
            "ইন্টারনেট প্যাকেজ কিনবো।",
            "net pack, kinte chai!",
            "",
            "   ",
            "MiXeD কেস text?",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }
}
