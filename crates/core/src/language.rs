//! Language variant definitions
//!
//! The catalog carries every human-readable string in three variants:
//! English, Bengali, and Banglish (Bengali written in Latin script).
//! Banglish is a variant, not a script of its own; it shares the Latin
//! script with English and is matched through explicitly enumerated
//! keywords rather than transliteration.

use serde::{Deserialize, Serialize};

/// Supported language variants of catalog text and keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LanguageVariant {
    #[default]
    English,
    Bengali,
    Banglish,
}

impl LanguageVariant {
    /// Short code used in config files and document payloads
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Bengali => "bn",
            Self::Banglish => "banglish",
        }
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Bengali => "Bengali",
            Self::Banglish => "Banglish",
        }
    }

    /// Script this variant is written in
    pub fn script(&self) -> Script {
        match self {
            Self::Bengali => Script::Bengali,
            Self::English | Self::Banglish => Script::Latin,
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" | "eng" | "english" => Some(Self::English),
            "bn" | "ben" | "bengali" | "bangla" => Some(Self::Bengali),
            "banglish" | "bn-latn" | "romanized" => Some(Self::Banglish),
            _ => None,
        }
    }

    /// All supported variants, in catalog field order
    pub fn all() -> &'static [LanguageVariant] {
        &[Self::English, Self::Bengali, Self::Banglish]
    }
}

impl std::fmt::Display for LanguageVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Script systems appearing in catalog text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Script {
    Latin,
    Bengali,
}

impl Script {
    /// Get Unicode range for this script (first block only)
    pub fn unicode_range(&self) -> (u32, u32) {
        match self {
            Self::Latin => (0x0000, 0x007F),
            Self::Bengali => (0x0980, 0x09FF),
        }
    }

    /// Check if a character belongs to this script
    pub fn contains_char(&self, c: char) -> bool {
        let code = c as u32;
        let (start, end) = self.unicode_range();
        code >= start && code <= end
    }

    /// Detect script from text (returns most frequent script)
    pub fn detect(text: &str) -> Option<Self> {
        let mut latin = 0usize;
        let mut bengali = 0usize;

        for c in text.chars() {
            if !c.is_alphabetic() {
                continue;
            }
            if Self::Bengali.contains_char(c) {
                bengali += 1;
            } else if Self::Latin.contains_char(c) {
                latin += 1;
            }
        }

        match (latin, bengali) {
            (0, 0) => None,
            (l, b) if b > l => Some(Self::Bengali),
            _ => Some(Self::Latin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_code() {
        assert_eq!(LanguageVariant::English.code(), "en");
        assert_eq!(LanguageVariant::Bengali.code(), "bn");
        assert_eq!(LanguageVariant::Banglish.code(), "banglish");
    }

    #[test]
    fn test_variant_script() {
        assert_eq!(LanguageVariant::Bengali.script(), Script::Bengali);
        assert_eq!(LanguageVariant::Banglish.script(), Script::Latin);
        assert_eq!(LanguageVariant::English.script(), Script::Latin);
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!(
            LanguageVariant::from_str_loose("bangla"),
            Some(LanguageVariant::Bengali)
        );
        assert_eq!(
            LanguageVariant::from_str_loose("EN"),
            Some(LanguageVariant::English)
        );
        assert_eq!(
            LanguageVariant::from_str_loose("banglish"),
            Some(LanguageVariant::Banglish)
        );
        assert_eq!(LanguageVariant::from_str_loose("unknown"), None);
    }

    #[test]
    fn test_script_detect() {
        assert_eq!(Script::detect("how do I recharge"), Some(Script::Latin));
        assert_eq!(Script::detect("ইন্টারনেট প্যাকেজ"), Some(Script::Bengali));
        assert_eq!(Script::detect("আমার ব্যালেন্স check"), Some(Script::Bengali));
        assert_eq!(Script::detect("123 !?"), None);
    }

    #[test]
    fn test_all_variants() {
        assert_eq!(LanguageVariant::all().len(), 3);
    }
}
