//! Review sentiment scoring
//!
//! Compound polarity comes from VADER: the full valence lexicon (emoticons
//! and slang included) plus its booster, negation, capitalization, "but"
//! and punctuation rules, normalized into [-1, 1].

use vader_sentiment::SentimentIntensityAnalyzer;

/// Scores the polarity of a text
pub trait SentimentAnalyzer {
    /// Compound polarity in [-1, 1]; 0.0 for neutral or empty text
    fn compound(&self, text: &str) -> f64;
}

/// VADER compound scorer backed by the `vader_sentiment` lexicon
pub struct VaderAnalyzer {
    inner: SentimentIntensityAnalyzer<'static>,
}

impl VaderAnalyzer {
    pub fn new() -> Self {
        Self {
            inner: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer for VaderAnalyzer {
    fn compound(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        let scores = self.inner.polarity_scores(text);
        scores
            .get("compound")
            .copied()
            .filter(|c| c.is_finite())
            .map_or(0.0, |c| c.clamp(-1.0, 1.0))
    }
}
