//! Search and score commands

use colored::Colorize;

use shopscore::config::Config;
use shopscore::discover::{ResultDiscovery, SearchRequest};
use shopscore::error::Result;
use shopscore::rank::{rank_products, ProductAssessment, RankOutcome};
use shopscore::score::SatisfactionScorer;

use crate::utils::{format_score, truncate_str};

/// Run the full search-and-rank pipeline
pub fn cmd_search(
    query: &str,
    min_price: Option<f64>,
    max_price: Option<f64>,
    json: bool,
) -> Result<()> {
    let request = SearchRequest::new(query, min_price, max_price)?;
    let config = Config::load()?;

    // each stage owns its own session
    let discovery = ResultDiscovery::new(&config.fetch);
    let scorer = SatisfactionScorer::new(&config.fetch);

    let outcome = rank_products(&discovery, &scorer, &request, &config.rank);

    let products = match &outcome {
        RankOutcome::Ranked(products) => products.as_slice(),
        _ => &[][..],
    };

    if json {
        println!("{}", serde_json::to_string_pretty(products)?);
        return Ok(());
    }

    if let Some(reason) = outcome.reason() {
        println!("{}", reason.yellow());
        return Ok(());
    }

    print_table(&request, products);
    Ok(())
}

fn print_table(request: &SearchRequest, products: &[ProductAssessment]) {
    println!(
        "\n{} {}\n",
        "Top picks for".bold(),
        format!("\"{}\"", request.query).cyan()
    );
    println!(
        "  {:<4} {:>10} {:>6} {:>7} {:>9}  {}",
        "Rank", "Price", "Stars", "Reviews", "Composite", "URL"
    );
    for product in products {
        println!(
            "  {:<4} {:>10.2} {:>6} {:>7} {:>9}  {}",
            format!("#{}", product.rank).green(),
            product.price,
            format_score(product.star_rating),
            format_score(product.customer_review_score),
            format_score(product.composite_satisfaction_score).bold(),
            truncate_str(&product.url, 80).dimmed()
        );
    }
    println!();
}

/// Score a single product page
pub fn cmd_score(url: &str, fallback_rating: f64, json: bool) -> Result<()> {
    let config = Config::load()?;
    let scorer = SatisfactionScorer::new(&config.fetch);

    let Some(satisfaction) = scorer.score(url, fallback_rating) else {
        if json {
            println!("null");
        } else {
            println!("{}", "Could not score this product (page unavailable or no reviews found).".yellow());
        }
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&satisfaction)?);
        return Ok(());
    }

    println!("\n{}", truncate_str(&satisfaction.detail_url, 100).cyan());
    println!("  Star rating:           {}", format_score(satisfaction.star_rating));
    println!(
        "  Customer review score: {}  ({} reviews)",
        format_score(satisfaction.customer_review_score),
        satisfaction.reviews_used
    );
    println!(
        "  Composite score:       {}\n",
        format_score(satisfaction.composite_score).bold()
    );
    Ok(())
}
