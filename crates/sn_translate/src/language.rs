//! Language helpers: the languages offered to clients and a rough detector.

use std::collections::BTreeMap;

pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("bs", "Bosnian"),
    ("hr", "Croatian"),
    ("sr", "Serbian"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
];

const ENGLISH_WORDS: &[&str] = &["the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by"];
const SPANISH_WORDS: &[&str] = &["el", "la", "y", "o", "pero", "en", "de", "con", "por", "para"];
const FRENCH_WORDS: &[&str] = &["le", "la", "et", "ou", "mais", "dans", "de", "avec", "par", "pour"];

pub fn supported_languages() -> BTreeMap<&'static str, &'static str> {
    SUPPORTED_LANGUAGES.iter().copied().collect()
}

/// Counts how many distinct stop words from each list appear in the text and
/// returns the language with strictly the most hits. Ties and texts without
/// any hit are reported as English.
pub fn detect_language(text: &str) -> &'static str {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let count = |list: &[&str]| list.iter().filter(|w| words.contains(w)).count();
    let english = count(ENGLISH_WORDS);
    let spanish = count(SPANISH_WORDS);
    let french = count(FRENCH_WORDS);

    if spanish > english && spanish > french {
        "es"
    } else if french > english && french > spanish {
        "fr"
    } else {
        "en"
    }
}
