//! Shared fixtures for integration tests: a scripted transport and HTML builders

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use shopscore::config::{FetchConfig, RankConfig, RetryPolicy};
use shopscore::fetch::{FetchedPage, Transport};
use shopscore::{Result, ShopscoreError};

pub const BASE_URL: &str = "https://shop.test";

pub const ENGLISH_REVIEW: &str =
    "Excellent sound quality and the battery lasts all day, very happy with this purchase.";

/// One scripted answer to a GET
#[derive(Clone)]
pub enum Reply {
    Page(u16, String),
    ConnectionReset,
}

/// Serves queued replies per URL and records every request
///
/// A URL with no queued reply fails like an unreachable host.
#[derive(Clone, Default)]
pub struct Scripted {
    routes: Rc<RefCell<HashMap<String, VecDeque<Reply>>>>,
    log: Rc<RefCell<Vec<String>>>,
}

impl Scripted {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, url: &str, reply: Reply) -> &Self {
        self.routes
            .borrow_mut()
            .entry(url.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn ok(&self, url: &str, html: &str) -> &Self {
        self.reply(url, Reply::Page(200, html.to_string()))
    }

    pub fn requests(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn requests_to(&self, url: &str) -> usize {
        self.log.borrow().iter().filter(|u| u.as_str() == url).count()
    }
}

impl Transport for Scripted {
    fn get(&self, url: &str) -> Result<FetchedPage> {
        self.log.borrow_mut().push(url.to_string());
        let reply = self
            .routes
            .borrow_mut()
            .get_mut(url)
            .and_then(|queue| queue.pop_front());
        match reply {
            Some(Reply::Page(status, html)) => Ok(FetchedPage {
                url: url.to_string(),
                status,
                html: if status == 200 { html } else { String::new() },
            }),
            Some(Reply::ConnectionReset) | None => Err(ShopscoreError::IoError(
                std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset"),
            )),
        }
    }
}

pub fn fetch_config() -> FetchConfig {
    FetchConfig {
        base_url: BASE_URL.to_string(),
        retry: RetryPolicy::immediate(2),
        ..FetchConfig::default()
    }
}

pub fn rank_config() -> RankConfig {
    RankConfig {
        pacing_secs: 0.0,
        ..RankConfig::default()
    }
}

pub fn search_url(query: &str) -> String {
    format!("{}/s?k={}&ref=nb_sb_noss", BASE_URL, query)
}

pub fn detail_url(id: &str) -> String {
    format!("{}/dp/{}", BASE_URL, id)
}

/// One search result card
pub fn listing_item(id: &str, rating: f64, price: f64) -> String {
    format!(
        r#"<div data-component-type="s-search-result" data-asin="{id}">
             <h2><a class="a-link-normal s-link-style" href="/dp/{id}"><span>Product {id}</span></a></h2>
             <i class="a-icon a-icon-star-small"><span class="a-icon-alt">{rating:.1} out of 5 stars</span></i>
             <span class="a-price"><span class="a-offscreen">₹{price:.2}</span>
               <span class="a-price-whole">{whole}<span class="a-price-decimal">.</span></span><span class="a-price-fraction">00</span>
             </span>
           </div>"#,
        whole = format_thousands(price as u64),
    )
}

pub fn listing_page(items: &[String]) -> String {
    format!(
        r#"<html><body><div class="s-main-slot s-result-list">{}</div></body></html>"#,
        items.concat()
    )
}

/// Product detail page; `rating` of None omits every rating element
pub fn detail_page(rating: Option<f64>, reviews: &[&str]) -> String {
    let rating = rating
        .map(|r| format!(r#"<span data-hook="rating-out-of-text">{:.1} out of 5</span>"#, r))
        .unwrap_or_default();
    let reviews: String = reviews
        .iter()
        .map(|text| {
            format!(
                r#"<div data-hook="review"><div class="a-expander-content review-text-content"><span>{}</span></div></div>"#,
                text
            )
        })
        .collect();
    format!(
        r#"<html><body><div id="averageCustomerReviews">{}</div><div id="cm-cr-dp-review-list">{}</div></body></html>"#,
        rating, reviews
    )
}

fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
