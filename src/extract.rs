//! Field extraction from retail listing and detail pages
//!
//! Every field is read through an ordered list of strategies, tried until one
//! yields a value. A strategy that finds nothing is not an error: callers pick a
//! default (0.0 for ratings) or skip the item (prices, links).

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("Invalid selector {css:?}: {e:?}"))
}

/// Result item container on the search listing
pub static RESULT_ITEM: Lazy<Selector> =
    Lazy::new(|| selector(r#"div[data-component-type="s-search-result"]"#));

static ITEM_LINK: Lazy<Selector> = Lazy::new(|| selector("a.a-link-normal"));
static ICON_ALT: Lazy<Selector> = Lazy::new(|| selector("span.a-icon-alt"));
static PRICE_CONTAINER: Lazy<Selector> = Lazy::new(|| selector("span.a-price"));
static PRICE_WHOLE: Lazy<Selector> = Lazy::new(|| selector("span.a-price-whole"));
static PRICE_FRACTION: Lazy<Selector> = Lazy::new(|| selector("span.a-price-fraction"));
static PRICE_OFFSCREEN: Lazy<Selector> = Lazy::new(|| selector("span.a-offscreen"));
static RATING_OUT_OF: Lazy<Selector> =
    Lazy::new(|| selector(r#"span[data-hook="rating-out-of-text"]"#));
static REVIEW_TEXT: Lazy<Selector> = Lazy::new(|| selector("div.review-text-content"));

/// Precompiled regex for collapsing whitespace
static WHITESPACE_RE: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Ways of reading a price from a result item, in preference order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceStrategy {
    /// `a-price-whole` and `a-price-fraction` joined as `whole.fraction`
    WholeAndFraction,
    /// The single screen-reader price string, e.g. `₹1,299.00`
    Offscreen,
}

pub const PRICE_STRATEGIES: [PriceStrategy; 2] =
    [PriceStrategy::WholeAndFraction, PriceStrategy::Offscreen];

impl PriceStrategy {
    pub fn apply(self, item: ElementRef<'_>, currency_symbol: &str) -> Option<f64> {
        match self {
            PriceStrategy::WholeAndFraction => {
                let container = item.select(&PRICE_CONTAINER).next()?;
                let whole = container.select(&PRICE_WHOLE).next()?;
                // the whole part carries its own trailing decimal point on most layouts
                let whole = compact_text(whole);
                let mut price_text = whole.trim_end_matches('.').to_string();
                if let Some(fraction) = container.select(&PRICE_FRACTION).next() {
                    price_text.push('.');
                    price_text.push_str(&compact_text(fraction));
                }
                parse_price(&price_text, currency_symbol)
            }
            PriceStrategy::Offscreen => {
                let element = item.select(&PRICE_OFFSCREEN).next()?;
                parse_price(&text_of(element), currency_symbol)
            }
        }
    }
}

/// Elements that may carry a product's overall rating, in preference order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingSource {
    /// `span[data-hook="rating-out-of-text"]`, e.g. "4.3 out of 5"
    OutOfText,
    /// Generic star icon alt text, e.g. "4.3 out of 5 stars"
    IconAlt,
}

pub const DETAIL_RATING_SOURCES: [RatingSource; 2] = [RatingSource::OutOfText, RatingSource::IconAlt];

impl RatingSource {
    fn selector(self) -> &'static Selector {
        match self {
            RatingSource::OutOfText => &RATING_OUT_OF,
            RatingSource::IconAlt => &ICON_ALT,
        }
    }
}

/// Text content of an element with whitespace collapsed
pub fn text_of(element: ElementRef<'_>) -> String {
    let text = element.text().collect::<Vec<_>>().join(" ");
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}

/// Text content with all whitespace removed, for numeric fragments
fn compact_text(element: ElementRef<'_>) -> String {
    element.text().flat_map(str::chars).filter(|c| !c.is_whitespace()).collect()
}

/// Parse the leading whitespace-delimited token as a non-negative number
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let token = text.split_whitespace().next()?;
    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

/// Parse a price after stripping the currency symbol and thousands separators
pub fn parse_price(text: &str, currency_symbol: &str) -> Option<f64> {
    let mut cleaned = text.replace(',', "");
    if !currency_symbol.is_empty() {
        cleaned = cleaned.replace(currency_symbol, "");
    }
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

/// Product link href of a result item
pub fn item_link<'a>(item: ElementRef<'a>) -> Option<&'a str> {
    item.select(&ITEM_LINK)
        .next()
        .and_then(|link| link.value().attr("href"))
        .filter(|href| !href.trim().is_empty())
}

/// Star rating shown on a result item, 0.0 when missing or unparsable
pub fn item_rating(item: ElementRef<'_>) -> f64 {
    item.select(&ICON_ALT)
        .next()
        .and_then(|span| parse_leading_number(&text_of(span)))
        .unwrap_or(0.0)
}

/// Price of a result item from the first strategy that yields one
pub fn item_price(item: ElementRef<'_>, currency_symbol: &str) -> Option<f64> {
    PRICE_STRATEGIES
        .iter()
        .find_map(|strategy| strategy.apply(item, currency_symbol))
}

/// Overall rating on a detail page, 0.0 when missing or unparsable
///
/// The first rating element present wins, even when its text does not parse.
pub fn detail_rating(document: &Html) -> f64 {
    DETAIL_RATING_SOURCES
        .iter()
        .find_map(|source| document.select(source.selector()).next())
        .and_then(|element| parse_leading_number(&text_of(element)))
        .unwrap_or(0.0)
}

/// Review bodies on a detail page, in page order
///
/// Blank bodies are kept as empty strings; they reach the language filter
/// like any other review.
pub fn review_texts(document: &Html) -> Vec<String> {
    document.select(&REVIEW_TEXT).map(text_of).collect()
}
