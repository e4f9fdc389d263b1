use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "shopscore")]
#[command(author, version, about = "Rank shopping results by rating and review sentiment", long_about = None)]
#[command(after_help = r#"Examples:
  shopscore search "wireless earbuds"                          Top 5 products at any price
  shopscore search "air fryer" --min-price 3000 --max-price 8000
  shopscore search "trimmer" --json | jq '.[0].URL'            Best match as JSON
  shopscore score "https://www.amazon.in/dp/B0..."             Score a single product page
  shopscore config > ~/.config/shopscore/config.toml           Start a config file
"#)]
pub struct Cli {
    /// Show per-item extraction details (same as RUST_LOG=shopscore=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search, score the top-rated results, and print the best matches
    #[command(after_help = r#"Examples:
  shopscore search "bluetooth speaker"
  shopscore search "bluetooth speaker" --max-price 2500
  shopscore search "office chair" --min-price 5000 --json
"#)]
    Search {
        /// What to search for
        #[arg(value_name = "QUERY")]
        query: String,

        /// Lowest acceptable price (inclusive), default 0
        #[arg(long)]
        min_price: Option<f64>,

        /// Highest acceptable price (inclusive), default unbounded
        #[arg(long)]
        max_price: Option<f64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score a single product detail page
    Score {
        /// Product detail URL
        #[arg(value_name = "URL")]
        url: String,

        /// Star rating to use when the page shows none
        #[arg(long, default_value_t = 0.0)]
        fallback_rating: f64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = Cli::parse_from([
            "shopscore", "search", "air fryer", "--min-price", "3000", "--json", "-v",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Search { query, min_price, max_price, json } => {
                assert_eq!(query, "air fryer");
                assert_eq!(min_price, Some(3000.0));
                assert_eq!(max_price, None);
                assert!(json);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_parse_score_default_fallback() {
        let cli = Cli::parse_from(["shopscore", "score", "https://www.amazon.in/dp/B0"]);
        match cli.command {
            Commands::Score { url, fallback_rating, json } => {
                assert_eq!(url, "https://www.amazon.in/dp/B0");
                assert_eq!(fallback_rating, 0.0);
                assert!(!json);
            }
            _ => panic!("expected score"),
        }
    }
}
