use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopscoreError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] ureq::Error),

    #[error("Unexpected HTTP status {0}")]
    StatusError(u16),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ShopscoreError {
    /// Get an actionable hint for how to resolve this error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ShopscoreError::HttpError(_) => Some(
                "Check your internet connection, or retry in a few seconds"
            ),
            ShopscoreError::StatusError(503) => Some(
                "The retailer is rate limiting requests; wait a minute before searching again"
            ),
            ShopscoreError::TomlError(_) | ShopscoreError::ConfigError(_) => Some(
                "Run `shopscore config` to print a valid configuration to start from"
            ),
            ShopscoreError::InvalidInput(_) => Some(
                "Example: shopscore search \"wireless earbuds\" --min-price 500 --max-price 3000"
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ShopscoreError>;
