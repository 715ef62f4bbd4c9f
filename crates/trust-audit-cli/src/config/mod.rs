//! Configuration loading and resolution.

use std::path::PathBuf;
use std::time::Duration;

use trust_audit::normalize_base_url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_OUTPUT: &str = "audit_report.json";

/// Upper bound on a single page fetch.
pub const PAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Page paths audited on every run; the empty path is the home page.
pub const AUDITED_PAGES: &[&str] = &["", "screener", "macro"];

/// Tickers cross-checked against the market-data provider.
pub const AUDITED_TICKERS: &[&str] = &["AAPL", "NVDA", "MU", "TSLA", "PLTR"];

/// Environment variable overriding the market-data endpoint.
pub const MARKET_DATA_URL_ENV: &str = "TRUST_AUDIT_MARKET_DATA_URL";

/// Yahoo's v10 quote-summary root. Requests need a session cookie and a
/// `crumb` parameter; the provider negotiates both when this endpoint is
/// used. Overrides via [`MARKET_DATA_URL_ENV`] get plain unauthenticated GETs.
pub const DEFAULT_MARKET_DATA_URL: &str =
    "https://query1.finance.yahoo.com/v10/finance/quoteSummary";

/// Fully resolved settings for one audit run.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Normalised base URL, no trailing slash.
    pub base_url: String,
    pub output: PathBuf,
    pub pages: Vec<String>,
    pub tickers: Vec<String>,
    pub page_timeout: Duration,
    pub market_data_url: String,
}

impl AuditConfig {
    /// Build the configuration from CLI flags and the environment.
    ///
    /// The base URL is only normalised; a malformed one shows up as failed
    /// page fetches in the report.
    pub fn resolve(url: &str, output: &str) -> Self {
        Self {
            base_url: normalize_base_url(url),
            output: PathBuf::from(output),
            pages: AUDITED_PAGES.iter().map(|p| p.to_string()).collect(),
            tickers: AUDITED_TICKERS.iter().map(|t| t.to_string()).collect(),
            page_timeout: PAGE_TIMEOUT,
            market_data_url: resolve_market_data_url(None),
        }
    }
}

/// Resolve the market-data endpoint: explicit value, then env, then default.
pub fn resolve_market_data_url(explicit: Option<&str>) -> String {
    if let Some(url) = explicit {
        return url.trim_end_matches('/').to_string();
    }

    if let Ok(env_url) = std::env::var(MARKET_DATA_URL_ENV) {
        if !env_url.trim().is_empty() {
            return env_url.trim().trim_end_matches('/').to_string();
        }
    }

    DEFAULT_MARKET_DATA_URL.to_string()
}

/// Whether `market_data_url` is live Yahoo and needs the crumb handshake.
pub fn needs_crumb_session(market_data_url: &str) -> bool {
    market_data_url == DEFAULT_MARKET_DATA_URL
}

/// Report label for a page path.
pub fn page_name(path: &str) -> String {
    if path.is_empty() {
        "home".to_string()
    } else {
        path.to_string()
    }
}
