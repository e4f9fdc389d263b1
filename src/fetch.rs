use std::thread;

use tracing::{debug, warn};

use crate::config::{FetchConfig, RetryPolicy};
use crate::error::{Result, ShopscoreError};

/// Largest body we are willing to buffer; retail detail pages run to several MB
const MAX_BODY_BYTES: u64 = 32 * 1024 * 1024;

const STATUS_OK: u16 = 200;
const STATUS_SERVICE_UNAVAILABLE: u16 = 503;

/// A page as returned by one GET request
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL that was requested
    pub url: String,
    pub status: u16,
    /// Response body; empty for non-200 responses
    pub html: String,
}

/// Something that can perform a single GET request
///
/// Transport errors (connect, timeout, TLS) come back as `Err`; any HTTP
/// status, including 5xx, comes back as `Ok` so the retry policy can see it.
pub trait Transport {
    fn get(&self, url: &str) -> Result<FetchedPage>;
}

/// Browser-like HTTP session backed by a ureq agent
///
/// Every component builds its own session, so no connection state is shared
/// between discovery and scoring.
pub struct HttpSession {
    agent: ureq::Agent,
    config: FetchConfig,
}

impl HttpSession {
    pub fn new(config: &FetchConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout()))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            config: config.clone(),
        }
    }
}

impl Transport for HttpSession {
    fn get(&self, url: &str) -> Result<FetchedPage> {
        let mut request = self.agent.get(url);
        for (key, value) in self.config.headers() {
            request = request.header(key, value);
        }

        let mut response = request.call()?;
        let status = response.status().as_u16();
        let html = if status == STATUS_OK {
            response
                .body_mut()
                .with_config()
                .limit(MAX_BODY_BYTES)
                .read_to_string()?
        } else {
            String::new()
        };

        Ok(FetchedPage {
            url: url.to_string(),
            status,
            html,
        })
    }
}

/// Fetch a page, retrying transport failures and 503s with a fixed backoff
///
/// Returns the 200 response, or the last error once the attempt budget is
/// spent. Any other status is returned as `StatusError` without retrying.
pub fn fetch_page(transport: &dyn Transport, url: &str, policy: &RetryPolicy) -> Result<FetchedPage> {
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        debug!(url, attempt, attempts, "HTTP GET");
        match transport.get(url) {
            Ok(page) if page.status == STATUS_OK => return Ok(page),
            Ok(page) if page.status == STATUS_SERVICE_UNAVAILABLE && attempt < attempts => {
                warn!(url, attempt, "received 503, retrying after backoff");
            }
            Ok(page) => return Err(ShopscoreError::StatusError(page.status)),
            Err(e) if attempt < attempts => {
                warn!(url, attempt, error = %e, "request failed, retrying after backoff");
            }
            Err(e) => return Err(e),
        }

        thread::sleep(policy.backoff());
        attempt += 1;
    }
}
