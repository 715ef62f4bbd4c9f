//! Market-data lookups used as ground truth for displayed metrics.
//!
//! The provider is a black box keyed by ticker. [`YahooFinanceProvider`]
//! reads Yahoo's quote-summary endpoint, where every number arrives as a
//! `{ "raw": 1.23, "fmt": "1.23" }` object.
//!
//! The live v10 endpoint answers 401 "Invalid Crumb" unless the request
//! carries a session cookie plus the matching `crumb` query parameter. A
//! provider built with [`YahooFinanceProvider::with_crumb_session`] performs
//! that handshake once, on first lookup, and reuses the crumb afterwards.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::OnceCell;

use trust_audit::ReferenceMetrics;

pub const YAHOO_SOURCE: &str = "Yahoo Finance";

const QUOTE_MODULES: &str = "price,financialData,summaryDetail,defaultKeyStatistics";

/// Any response from this host sets Yahoo's session cookie (usually a 404).
pub const YAHOO_COOKIE_URL: &str = "https://fc.yahoo.com";

/// Returns the crumb as plain text for the current session cookie.
pub const YAHOO_CRUMB_URL: &str = "https://query2.finance.yahoo.com/v1/test/getcrumb";

/// Yahoo rejects the handshake from non-browser user agents.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                                  AppleWebKit/537.36 (KHTML, like Gecko) \
                                  Chrome/131.0.0.0 Safari/537.36";

#[derive(thiserror::Error, Debug)]
pub enum MarketDataError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request for {ticker} failed: {source}")]
    Request {
        ticker: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("provider returned HTTP {status} for {ticker}")]
    Status { ticker: String, status: u16 },

    #[error("provider error for {ticker}: {description}")]
    Api { ticker: String, description: String },

    #[error("no quote data for {0}")]
    NoResult(String),

    #[error("malformed provider response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A source of reference financial metrics.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Provenance label recorded with every result.
    fn source(&self) -> &str;

    /// Single attempt; no retry, no rate limiting.
    async fn lookup(&self, ticker: &str) -> Result<ReferenceMetrics, MarketDataError>;
}

/// Endpoints for Yahoo's cookie/crumb handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrumbSession {
    pub cookie_url: String,
    pub crumb_url: String,
}

impl Default for CrumbSession {
    fn default() -> Self {
        Self {
            cookie_url: YAHOO_COOKIE_URL.to_string(),
            crumb_url: YAHOO_CRUMB_URL.to_string(),
        }
    }
}

/// Yahoo Finance quote-summary client.
pub struct YahooFinanceProvider {
    client: reqwest::Client,
    base_url: String,
    session: Option<CrumbSession>,
    /// Filled on first lookup; `None` inside means the handshake failed.
    crumb: OnceCell<Option<String>>,
}

impl YahooFinanceProvider {
    /// `base_url` is the quote-summary root; the ticker is appended as a path segment.
    ///
    /// No crumb is requested; use [`Self::with_crumb_session`] for the live endpoint.
    pub fn new(base_url: impl Into<String>) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .cookie_store(true)
            .build()
            .map_err(MarketDataError::Client)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            session: None,
            crumb: OnceCell::new(),
        })
    }

    /// Negotiate a crumb through `session` before the first lookup.
    pub fn with_crumb_session(mut self, session: CrumbSession) -> Self {
        self.session = Some(session);
        self
    }

    async fn crumb(&self) -> Option<&str> {
        let session = self.session.as_ref()?;
        self.crumb
            .get_or_init(|| fetch_crumb(&self.client, session))
            .await
            .as_deref()
    }
}

/// Run the handshake. Failures are logged and the lookups go ahead without a crumb.
async fn fetch_crumb(client: &reqwest::Client, session: &CrumbSession) -> Option<String> {
    if let Err(e) = client.get(&session.cookie_url).send().await {
        tracing::warn!(url = %session.cookie_url, error = %e, "session cookie request failed");
    }

    let resp = match client.get(&session.crumb_url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::warn!(url = %session.crumb_url, error = %e, "crumb request failed");
            return None;
        }
    };
    let status = resp.status();
    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "crumb request rejected");
        return None;
    }

    match resp.text().await {
        Ok(text) if !text.trim().is_empty() => {
            tracing::debug!("crumb negotiated");
            Some(text.trim().to_string())
        }
        Ok(_) => {
            tracing::warn!("crumb response was empty");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to read crumb");
            None
        }
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceProvider {
    fn source(&self) -> &str {
        YAHOO_SOURCE
    }

    async fn lookup(&self, ticker: &str) -> Result<ReferenceMetrics, MarketDataError> {
        let url = format!("{}/{}", self.base_url, ticker);
        let request_err = |source: reqwest::Error| MarketDataError::Request {
            ticker: ticker.to_string(),
            source,
        };

        let mut query = vec![("modules", QUOTE_MODULES)];
        if let Some(crumb) = self.crumb().await {
            query.push(("crumb", crumb));
        }

        let resp = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(request_err)?;
        let status = resp.status();
        let text = resp.text().await.map_err(request_err)?;

        tracing::debug!(ticker, status = status.as_u16(), "quote summary response");

        let body: Value = match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(_) if !status.is_success() => {
                return Err(MarketDataError::Status {
                    ticker: ticker.to_string(),
                    status: status.as_u16(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(description) = api_error(&body) {
            return Err(MarketDataError::Api {
                ticker: ticker.to_string(),
                description,
            });
        }
        if !status.is_success() {
            return Err(MarketDataError::Status {
                ticker: ticker.to_string(),
                status: status.as_u16(),
            });
        }

        parse_quote_summary(ticker, &body, self.source())
    }
}

/// Error description from a `quoteSummary.error` object, if present.
fn api_error(body: &Value) -> Option<String> {
    let err = body.get("quoteSummary")?.get("error")?;
    if err.is_null() {
        return None;
    }
    let description = err
        .get("description")
        .and_then(Value::as_str)
        .or_else(|| err.get("code").and_then(Value::as_str))
        .unwrap_or("unknown error");
    Some(description.to_string())
}

/// Pull reference metrics out of a quote-summary body.
pub fn parse_quote_summary(
    ticker: &str,
    body: &Value,
    source: &str,
) -> Result<ReferenceMetrics, MarketDataError> {
    let result = body
        .get("quoteSummary")
        .and_then(|q| q.get("result"))
        .and_then(|r| r.get(0))
        .ok_or_else(|| MarketDataError::NoResult(ticker.to_string()))?;

    Ok(ReferenceMetrics {
        verified_pe: first_number(
            result,
            &[
                ("summaryDetail", "forwardPE"),
                ("defaultKeyStatistics", "forwardPE"),
                ("summaryDetail", "trailingPE"),
            ],
        ),
        verified_growth: first_number(result, &[("financialData", "revenueGrowth")]),
        verified_market_cap: first_number(
            result,
            &[("price", "marketCap"), ("summaryDetail", "marketCap")],
        ),
        verified_price: first_number(
            result,
            &[
                ("financialData", "currentPrice"),
                ("price", "regularMarketPrice"),
            ],
        ),
        source: source.to_string(),
        timestamp: Utc::now(),
    })
}

/// First `module.key` that holds a number, in preference order.
fn first_number(result: &Value, candidates: &[(&str, &str)]) -> Option<f64> {
    candidates.iter().find_map(|(module, key)| {
        let v = result.get(module)?.get(key)?;
        v.get("raw").and_then(Value::as_f64).or_else(|| v.as_f64())
    })
}
