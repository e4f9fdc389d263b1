//! Satisfaction scoring for a single product detail page

use scraper::Html;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{FetchConfig, RetryPolicy};
use crate::extract;
use crate::fetch::{fetch_page, HttpSession, Transport};
use crate::language::{self, LanguageDetector, WhatlangDetector};
use crate::sentiment::{SentimentAnalyzer, VaderAnalyzer};

/// Weight of the star rating in the composite score
pub const STAR_WEIGHT: f64 = 0.7;
/// Weight of the review sentiment in the composite score
pub const REVIEW_WEIGHT: f64 = 0.3;

/// Scores computed for one product page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Satisfaction {
    pub detail_url: String,
    /// Effective star rating in [0, 5], after the listing fallback
    pub star_rating: f64,
    /// Review sentiment mapped onto [0, 5]
    pub customer_review_score: f64,
    /// `0.7 * star_rating + 0.3 * customer_review_score`
    pub composite_score: f64,
    /// Reviews that survived the language filter
    pub reviews_used: usize,
}

/// Map an average compound sentiment in [-1, 1] onto [0, 5]
pub fn customer_review_score(average_compound: f64) -> f64 {
    2.5 * average_compound + 2.5
}

pub fn composite_score(star_rating: f64, customer_review_score: f64) -> f64 {
    STAR_WEIGHT * star_rating + REVIEW_WEIGHT * customer_review_score
}

/// Use the listing rating when the detail page yielded exactly zero
pub fn effective_rating(page_rating: f64, fallback_rating: f64) -> f64 {
    if page_rating == 0.0 && fallback_rating > 0.0 {
        fallback_rating
    } else {
        page_rating
    }
}

/// Fetches a detail page and turns its rating and reviews into a score
pub struct SatisfactionScorer {
    transport: Box<dyn Transport>,
    retry: RetryPolicy,
    detector: Box<dyn LanguageDetector>,
    analyzer: Box<dyn SentimentAnalyzer>,
}

impl SatisfactionScorer {
    /// Scorer with its own HTTP session and the default text analysis
    pub fn new(config: &FetchConfig) -> Self {
        Self {
            transport: Box::new(HttpSession::new(config)),
            retry: config.retry,
            detector: Box::new(WhatlangDetector),
            analyzer: Box::new(VaderAnalyzer::new()),
        }
    }

    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_detector(mut self, detector: Box<dyn LanguageDetector>) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_analyzer(mut self, analyzer: Box<dyn SentimentAnalyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Score a product page; `None` when it cannot be fetched or has no usable reviews
    pub fn score(&self, detail_url: &str, fallback_rating: f64) -> Option<Satisfaction> {
        let page = match fetch_page(self.transport.as_ref(), detail_url, &self.retry) {
            Ok(page) => page,
            Err(e) => {
                warn!(url = detail_url, error = %e, "could not fetch product page; skipping");
                return None;
            }
        };
        self.assess(detail_url, &page.html, fallback_rating)
    }

    /// Score already-fetched detail page HTML
    pub fn assess(&self, detail_url: &str, html: &str, fallback_rating: f64) -> Option<Satisfaction> {
        let document = Html::parse_document(html);

        let page_rating = extract::detail_rating(&document);
        let star_rating = effective_rating(page_rating, fallback_rating);
        if star_rating != page_rating {
            debug!(url = detail_url, fallback_rating, "using listing rating");
        }

        let reviews = language::accepted_reviews(
            self.detector.as_ref(),
            extract::review_texts(&document),
        );
        if reviews.is_empty() {
            warn!(url = detail_url, "no reviews found; skipping this product");
            return None;
        }

        let total: f64 = reviews
            .iter()
            .map(|review| self.analyzer.compound(review))
            .sum();
        let average_compound = total / reviews.len() as f64;

        let customer_review_score = customer_review_score(average_compound);
        let composite_score = composite_score(star_rating, customer_review_score);
        info!(
            url = detail_url,
            star_rating,
            customer_review_score,
            composite_score,
            reviews = reviews.len(),
            "scored product"
        );

        Some(Satisfaction {
            detail_url: detail_url.to_string(),
            star_rating,
            customer_review_score,
            composite_score,
            reviews_used: reviews.len(),
        })
    }
}
