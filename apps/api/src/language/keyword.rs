//! Keyword language classifier.
//!
//! Algorithm:
//! 1. Lower-case the text.
//! 2. score_pt = number of PT_KEYWORDS found as substrings
//!    score_en = number of EN_KEYWORDS found as substrings
//! 3. Any Portuguese diacritic → score_pt += DIACRITIC_BONUS
//! 4. (opt-in) any English auxiliary verb as a whole word → score_en += AUXILIARY_BONUS
//! 5. Higher score wins; ties (including 0–0) are `Auto`.
//!
//! Substring matching over-counts: "usual" contains "sua".

use once_cell::sync::Lazy;
use regex::Regex;

use super::{LanguageClassifier, LanguageTag};

const PT_KEYWORDS: &[&str] = &[
    "você",
    "qual",
    "como",
    "quando",
    "onde",
    "porque",
    "por que",
    "fale",
    "sobre",
    "experiência",
    "trabalho",
    "empresa",
    "tempo",
    "anos",
    "projeto",
    "não",
    "está",
    "seu",
    "sua",
];

const EN_KEYWORDS: &[&str] = &[
    "what",
    "how",
    "when",
    "where",
    "why",
    "tell",
    "about",
    "experience",
    "work",
    "company",
    "time",
    "years",
    "project",
    "have",
    "you",
    "your",
    "can",
    "did",
    "been",
];

const PT_DIACRITICS: &[char] = &[
    'ã', 'õ', 'ç', 'á', 'é', 'í', 'ó', 'ú', 'â', 'ê', 'î', 'ô', 'û',
];

pub const DIACRITIC_BONUS: u32 = 3;
pub const AUXILIARY_BONUS: u32 = 2;

static EN_AUXILIARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(is|are|was|were|do|does|did|has|have|had|will|would|could|should|can)\b")
        .expect("auxiliary verb pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageScores {
    pub pt: u32,
    pub en: u32,
}

impl LanguageScores {
    pub fn verdict(&self) -> LanguageTag {
        use std::cmp::Ordering;
        match self.pt.cmp(&self.en) {
            Ordering::Greater => LanguageTag::Pt,
            Ordering::Less => LanguageTag::En,
            Ordering::Equal => LanguageTag::Auto,
        }
    }
}

/// Pure-Rust keyword classifier. Deterministic, no I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordLanguageClassifier {
    english_auxiliary_bonus: bool,
}

impl KeywordLanguageClassifier {
    pub fn new(english_auxiliary_bonus: bool) -> Self {
        Self {
            english_auxiliary_bonus,
        }
    }

    pub fn score(&self, text: &str) -> LanguageScores {
        let lower = text.to_lowercase();

        let mut pt = count_hits(&lower, PT_KEYWORDS);
        let mut en = count_hits(&lower, EN_KEYWORDS);

        if lower.chars().any(|c| PT_DIACRITICS.contains(&c)) {
            pt += DIACRITIC_BONUS;
        }

        if self.english_auxiliary_bonus && EN_AUXILIARY.is_match(&lower) {
            en += AUXILIARY_BONUS;
        }

        LanguageScores { pt, en }
    }
}

impl LanguageClassifier for KeywordLanguageClassifier {
    fn classify(&self, text: &str) -> LanguageTag {
        self.score(text).verdict()
    }
}

fn count_hits(haystack: &str, keywords: &[&str]) -> u32 {
    keywords.iter().filter(|kw| haystack.contains(*kw)).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> LanguageTag {
        KeywordLanguageClassifier::default().classify(text)
    }

    #[test]
    fn test_portuguese_question() {
        assert_eq!(classify("Qual foi seu maior desafio?"), LanguageTag::Pt);
    }

    #[test]
    fn test_english_question() {
        assert_eq!(classify("What was your biggest challenge?"), LanguageTag::En);
    }

    #[test]
    fn test_english_only_sentences() {
        for text in [
            "Tell me about your experience at the company",
            "How many years have you been working here?",
            "Why did you leave?",
        ] {
            assert_eq!(classify(text), LanguageTag::En, "{text}");
        }
    }

    #[test]
    fn test_empty_is_auto() {
        assert_eq!(classify(""), LanguageTag::Auto);
    }

    #[test]
    fn test_no_hits_is_auto() {
        assert_eq!(classify("ok"), LanguageTag::Auto);
    }

    #[test]
    fn test_diacritic_adds_bonus() {
        let classifier = KeywordLanguageClassifier::default();
        let plain = classifier.score("about the role");
        let accented = classifier.score("about the role, ação");
        assert_eq!(accented.pt, plain.pt + DIACRITIC_BONUS);
        assert_eq!(plain.verdict(), LanguageTag::En);
        assert_eq!(accented.verdict(), LanguageTag::Pt);
    }

    #[test]
    fn test_diacritic_is_case_insensitive() {
        assert_eq!(classify("AÇÃO"), LanguageTag::Pt);
    }

    #[test]
    fn test_full_portuguese_sentence_scores() {
        let scores =
            KeywordLanguageClassifier::default().score("Fale sobre sua experiência na empresa");
        assert_eq!(scores.pt, 5 + DIACRITIC_BONUS);
        assert_eq!(scores.en, 0);
    }

    #[test]
    fn test_deterministic() {
        let text = "Como você lidou com prazos apertados?";
        assert_eq!(classify(text), classify(text));
    }

    #[test]
    fn test_auxiliary_bonus_breaks_tie() {
        let text = "Is it done?";
        assert_eq!(classify(text), LanguageTag::Auto);
        assert_eq!(
            KeywordLanguageClassifier::new(true).classify(text),
            LanguageTag::En
        );
    }

    #[test]
    fn test_auxiliary_bonus_requires_whole_word() {
        let scores = KeywordLanguageClassifier::new(true).score("this island");
        assert_eq!(scores.en, 0);
    }
}
