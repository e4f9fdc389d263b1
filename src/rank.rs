//! End-to-end ranking: discover, shortlist, score, re-rank

use std::thread;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::RankConfig;
use crate::discover::{ResultDiscovery, SearchCandidate, SearchRequest};
use crate::score::{Satisfaction, SatisfactionScorer};

/// A ranked product, as handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductAssessment {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Star_Rating")]
    pub star_rating: f64,
    #[serde(rename = "Customer_Review_Score")]
    pub customer_review_score: f64,
    #[serde(rename = "Composite_Satisfaction_Score")]
    pub composite_satisfaction_score: f64,
    /// 1-based position after re-ranking
    #[serde(rename = "Rank")]
    pub rank: usize,
}

impl ProductAssessment {
    fn new(candidate: &SearchCandidate, satisfaction: Satisfaction) -> Self {
        Self {
            url: satisfaction.detail_url,
            price: candidate.price,
            star_rating: satisfaction.star_rating,
            customer_review_score: satisfaction.customer_review_score,
            composite_satisfaction_score: satisfaction.composite_score,
            rank: 0,
        }
    }
}

/// What a ranking run produced
#[derive(Debug, Clone, PartialEq)]
pub enum RankOutcome {
    Ranked(Vec<ProductAssessment>),
    /// Discovery returned nothing within the price range
    NoCandidates,
    /// Every shortlisted product was skipped by the scorer
    NoneScored,
}

impl RankOutcome {
    /// User-facing explanation for an empty outcome
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            RankOutcome::Ranked(_) => None,
            RankOutcome::NoCandidates => {
                Some("No products found within the specified price range.")
            }
            RankOutcome::NoneScored => {
                Some("None of the top-rated products had usable reviews.")
            }
        }
    }
}

/// Candidates with the highest listing rating first; ties keep listing order
pub fn shortlist(mut candidates: Vec<SearchCandidate>, limit: usize) -> Vec<SearchCandidate> {
    candidates.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    candidates.truncate(limit);
    candidates
}

/// Sort by composite score, keep the best `limit`, and number them from 1
pub fn assign_ranks(mut assessments: Vec<ProductAssessment>, limit: usize) -> Vec<ProductAssessment> {
    assessments.sort_by(|a, b| {
        b.composite_satisfaction_score
            .total_cmp(&a.composite_satisfaction_score)
    });
    assessments.truncate(limit);
    for (index, assessment) in assessments.iter_mut().enumerate() {
        assessment.rank = index + 1;
    }
    assessments
}

/// Run the full pipeline for one search
///
/// Detail pages are scored one at a time with a pacing pause between them.
pub fn rank_products(
    discovery: &ResultDiscovery,
    scorer: &SatisfactionScorer,
    request: &SearchRequest,
    config: &RankConfig,
) -> RankOutcome {
    let candidates = discovery.discover(&request.query, request.range.min, request.range.max);
    if candidates.is_empty() {
        return empty_outcome(RankOutcome::NoCandidates, request);
    }

    let shortlisted = shortlist(candidates, config.shortlist);
    info!(count = shortlisted.len(), "scoring top products by listing rating");

    let mut assessments = Vec::with_capacity(shortlisted.len());
    for (index, candidate) in shortlisted.iter().enumerate() {
        if index > 0 {
            thread::sleep(config.pacing());
        }
        match scorer.score(&candidate.detail_url, candidate.rating) {
            Some(satisfaction) => assessments.push(ProductAssessment::new(candidate, satisfaction)),
            None => warn!(url = %candidate.detail_url, "skipping URL due to errors"),
        }
    }

    if assessments.is_empty() {
        return empty_outcome(RankOutcome::NoneScored, request);
    }
    RankOutcome::Ranked(assign_ranks(assessments, config.top))
}

/// Log why a run produced nothing before handing the outcome back
fn empty_outcome(outcome: RankOutcome, request: &SearchRequest) -> RankOutcome {
    if let Some(reason) = outcome.reason() {
        warn!(query = %request.query, "{}", reason);
    }
    outcome
}
