//! Review language filtering

use whatlang::Lang;

/// Reviews are scored only when written in this language
pub const TARGET_LANGUAGE: Lang = Lang::Eng;

/// Guesses the language of a piece of text
pub trait LanguageDetector {
    /// `None` when the text is too short or ambiguous to call
    fn detect(&self, text: &str) -> Option<Lang>;
}

/// Trigram/script based detector from the whatlang crate
///
/// Only reliable guesses count as a detection.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhatlangDetector;

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Option<Lang> {
        whatlang::detect(text)
            .filter(|info| info.is_reliable())
            .map(|info| info.lang())
    }
}

/// Whether a review passes the language filter
///
/// Text whose language cannot be determined is kept.
pub fn is_accepted(detector: &dyn LanguageDetector, text: &str) -> bool {
    match detector.detect(text) {
        Some(lang) => lang == TARGET_LANGUAGE,
        None => true,
    }
}

/// Reviews that pass the language filter, in their original order
pub fn accepted_reviews(detector: &dyn LanguageDetector, reviews: Vec<String>) -> Vec<String> {
    reviews
        .into_iter()
        .filter(|review| is_accepted(detector, review))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Calls anything containing "hola" Spanish and anything under 4 chars undetermined
    struct Fixed;

    impl LanguageDetector for Fixed {
        fn detect(&self, text: &str) -> Option<Lang> {
            if text.len() < 4 {
                None
            } else if text.contains("hola") {
                Some(Lang::Spa)
            } else {
                Some(Lang::Eng)
            }
        }
    }

    #[test]
    fn test_filter_keeps_english_and_undetermined() {
        let reviews = vec![
            "Solid build quality".to_string(),
            "hola, muy bueno".to_string(),
            "A+".to_string(),
        ];
        assert_eq!(
            accepted_reviews(&Fixed, reviews),
            vec!["Solid build quality".to_string(), "A+".to_string()]
        );
    }

    #[test]
    fn test_whatlang_english() {
        let text = "The sound quality of these headphones is excellent and the battery \
                    easily lasts through a full day of meetings and music.";
        assert!(matches!(WhatlangDetector.detect(text), Some(Lang::Eng) | None));
        assert!(is_accepted(&WhatlangDetector, text));
    }

    #[test]
    fn test_whatlang_rejects_japanese() {
        let text = "この商品はとても良いです。音質もきれいで、バッテリーも長持ちします。また買いたいと思います。";
        assert_eq!(WhatlangDetector.detect(text), Some(Lang::Jpn));
        assert!(!is_accepted(&WhatlangDetector, text));
    }

    #[test]
    fn test_whatlang_fails_open_on_empty() {
        assert!(is_accepted(&WhatlangDetector, ""));
    }
}
