use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, ShopscoreError};

/// Global shopscore configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP session settings shared by discovery and scoring
    #[serde(default)]
    pub fetch: FetchConfig,

    /// How many products are shortlisted, scored and reported
    #[serde(default)]
    pub rank: RankConfig,
}

/// Browser-like session settings injected into both pipeline stages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    pub accept_language: String,
    pub accept_encoding: String,
    pub referer: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Retailer origin; search URLs and relative product links resolve against it
    pub base_url: String,

    /// Currency symbol stripped from price text before parsing
    pub currency_symbol: String,

    pub retry: RetryPolicy,
}

/// Fixed-backoff retry budget for a single page fetch
///
/// An attempt is retried when it fails at the transport level or the server
/// answers 503. `max_attempts` counts the first attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Delay between attempts in seconds
    pub backoff_secs: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Candidates (by listing rating) sent to the scorer
    pub shortlist: usize,
    /// Assessments reported after re-ranking
    pub top: usize,
    /// Pause between detail-page scores, in seconds
    pub pacing_secs: f64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                         AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/98.0.4758.102 Safari/537.36"
                .to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            accept_encoding: "gzip, deflate".to_string(),
            referer: "https://www.google.com/".to_string(),
            timeout_secs: 10,
            base_url: "https://www.amazon.in".to_string(),
            currency_symbol: "₹".to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff_secs: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Policy with no delay between attempts, for tests and local fixtures
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff_secs: 0.0,
        }
    }

    pub fn backoff(&self) -> Duration {
        secs_to_duration(self.backoff_secs)
    }
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            shortlist: 10,
            top: 5,
            pacing_secs: 1.0,
        }
    }
}

impl RankConfig {
    pub fn pacing(&self) -> Duration {
        secs_to_duration(self.pacing_secs)
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Header pairs sent with every request
    pub fn headers(&self) -> [(&'static str, &str); 4] {
        [
            ("User-Agent", self.user_agent.as_str()),
            ("Accept-Language", self.accept_language.as_str()),
            ("Accept-Encoding", self.accept_encoding.as_str()),
            ("Referer", self.referer.as_str()),
        ]
    }
}

/// Negative or NaN values from a hand-edited file collapse to zero
fn secs_to_duration(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::from_secs_f64(secs)
    } else {
        Duration::ZERO
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ShopscoreError::ConfigError(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        if self.fetch.retry.max_attempts == 0 {
            return Err(ShopscoreError::ConfigError(
                "fetch.retry.max_attempts must be at least 1".into(),
            ));
        }
        if self.rank.top == 0 || self.rank.shortlist == 0 {
            return Err(ShopscoreError::ConfigError(
                "rank.shortlist and rank.top must be at least 1".into(),
            ));
        }
        url::Url::parse(&self.fetch.base_url)?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Supports SHOPSCORE_CONFIG environment variable override
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("SHOPSCORE_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", "shopscore").ok_or_else(|| {
            ShopscoreError::ConfigError("Could not determine config directory".into())
        })?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.fetch.timeout(), Duration::from_secs(10));
        assert_eq!(config.fetch.retry.max_attempts, 2);
        assert_eq!(config.fetch.retry.backoff(), Duration::from_secs(2));
        assert_eq!(config.rank.shortlist, 10);
        assert_eq!(config.rank.top, 5);
        assert_eq!(config.rank.pacing(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [fetch]
            base_url = "https://www.amazon.com"
            currency_symbol = "$"

            [rank]
            top = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.fetch.base_url, "https://www.amazon.com");
        assert_eq!(config.fetch.referer, "https://www.google.com/");
        assert_eq!(config.rank.top, 3);
        assert_eq!(config.rank.shortlist, 10);
    }

    #[test]
    fn test_rejects_zero_attempts() {
        let err = Config::from_toml("[fetch.retry]\nmax_attempts = 0\n").unwrap_err();
        assert!(matches!(err, ShopscoreError::ConfigError(_)));
    }

    #[test]
    fn test_toml_roundtrip_through_printer() {
        let printed = Config::default().to_toml().unwrap();
        let parsed = Config::from_toml(&printed).unwrap();
        assert_eq!(parsed.rank, RankConfig::default());
        assert_eq!(parsed.fetch.retry, RetryPolicy::default());
    }

    #[test]
    fn test_negative_durations_collapse() {
        let policy = RetryPolicy {
            max_attempts: 2,
            backoff_secs: -1.0,
        };
        assert_eq!(policy.backoff(), Duration::ZERO);
    }
}
