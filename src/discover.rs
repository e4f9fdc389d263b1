//! Search listing discovery: query the retailer and collect priced candidates

use scraper::Html;
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::FetchConfig;
use crate::error::{Result, ShopscoreError};
use crate::extract;
use crate::fetch::{fetch_page, HttpSession, Transport};

/// Upper bound used when the caller leaves the maximum price blank
pub const UNBOUNDED_MAX_PRICE: f64 = 1e8;

/// A listing item that passed the price filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchCandidate {
    /// Star rating shown on the listing, 0.0 when absent
    pub rating: f64,
    /// Absolute product detail URL
    pub detail_url: String,
    pub price: f64,
}

/// Inclusive price bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

/// A validated search as entered by a user
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub range: PriceRange,
}

impl SearchRequest {
    /// Validate user input; a missing bound means 0 / unbounded
    pub fn new(query: &str, min_price: Option<f64>, max_price: Option<f64>) -> Result<Self> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ShopscoreError::InvalidInput(
                "Please enter a search query.".into(),
            ));
        }

        let min = min_price.unwrap_or(0.0);
        let max = max_price.unwrap_or(UNBOUNDED_MAX_PRICE);
        for bound in [min, max] {
            if !bound.is_finite() || bound < 0.0 {
                return Err(ShopscoreError::InvalidInput(
                    "Please enter valid numeric values for prices.".into(),
                ));
            }
        }
        if min > max {
            return Err(ShopscoreError::InvalidInput(format!(
                "Minimum price {} is above maximum price {}.",
                min, max
            )));
        }

        Ok(Self {
            query: query.to_string(),
            range: PriceRange { min, max },
        })
    }
}

/// Queries the search endpoint and parses its result listing
pub struct ResultDiscovery {
    transport: Box<dyn Transport>,
    config: FetchConfig,
}

impl ResultDiscovery {
    /// Discovery with its own HTTP session
    pub fn new(config: &FetchConfig) -> Self {
        Self {
            transport: Box::new(HttpSession::new(config)),
            config: config.clone(),
        }
    }

    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Search results URL for a query
    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/s?k={}&ref=nb_sb_noss",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(query)
        )
    }

    /// Candidates within `[min_price, max_price]`, in listing order
    ///
    /// Network failures yield an empty list.
    pub fn discover(&self, query: &str, min_price: f64, max_price: f64) -> Vec<SearchCandidate> {
        let url = self.search_url(query);
        let page = match fetch_page(self.transport.as_ref(), &url, &self.config.retry) {
            Ok(page) => page,
            Err(e) => {
                warn!(%url, error = %e, "error fetching search results");
                return Vec::new();
            }
        };

        let range = PriceRange {
            min: min_price,
            max: max_price,
        };
        let candidates = self.parse_listing(&page.html, range);
        info!(query, count = candidates.len(), "total products returned");
        candidates
    }

    /// Extract candidates from listing HTML; malformed items are skipped
    pub fn parse_listing(&self, html: &str, range: PriceRange) -> Vec<SearchCandidate> {
        let base = match Url::parse(&self.config.base_url) {
            Ok(base) => base,
            Err(e) => {
                warn!(base_url = %self.config.base_url, error = %e, "invalid base URL");
                return Vec::new();
            }
        };
        let document = Html::parse_document(html);
        let items: Vec<_> = document.select(&extract::RESULT_ITEM).collect();
        info!(count = items.len(), "found product items");

        let mut candidates = Vec::new();
        for item in items {
            let Some(href) = extract::item_link(item) else {
                continue;
            };
            let detail_url = match base.join(href) {
                Ok(url) => url.to_string(),
                Err(e) => {
                    debug!(href, error = %e, "skipping product (bad link)");
                    continue;
                }
            };

            let rating = extract::item_rating(item);
            let Some(price) = extract::item_price(item, &self.config.currency_symbol) else {
                debug!(url = %detail_url, "skipping product (missing price)");
                continue;
            };
            debug!(url = %detail_url, price, rating, "product found");

            if !range.contains(price) {
                debug!(price, min = range.min, max = range.max, "skipping due to price filter");
                continue;
            }

            candidates.push(SearchCandidate {
                rating,
                detail_url,
                price,
            });
        }
        candidates
    }
}
