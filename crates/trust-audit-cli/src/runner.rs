//! Sequential audit runner.
//!
//! Pages are fetched one at a time, each checked for trust markers before
//! the next request goes out; tickers are validated afterwards, also one at
//! a time. Every per-item failure is recorded in the report and the run
//! always produces one.

use trust_audit::trust::{detect_trust_markers_in_html, extract_title, has_app_error, has_content};
use trust_audit::{
    page_url, AuditReport, AuditReportBuilder, PageLoad, PageObservation, PageOutcome,
    TickerValidation, TrustCheck,
};

use crate::config::{page_name, AuditConfig};
use crate::fetch::{elapsed_ms, FetchedPage, PageFetcher};
use crate::market::MarketDataProvider;

/// Drives one audit run against a deployment.
pub struct Auditor {
    config: AuditConfig,
    fetcher: PageFetcher,
    provider: Box<dyn MarketDataProvider>,
}

impl Auditor {
    pub fn new(
        config: AuditConfig,
        fetcher: PageFetcher,
        provider: Box<dyn MarketDataProvider>,
    ) -> Self {
        Self {
            config,
            fetcher,
            provider,
        }
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Run every page and ticker check and assemble the scored report.
    pub async fn run(&self) -> AuditReport {
        let mut builder = AuditReportBuilder::new(self.config.base_url.clone());

        tracing::info!("Auditing {} pages", self.config.pages.len());
        for path in &self.config.pages {
            let page = self.audit_page(path).await;
            builder.record_page(page);
        }

        tracing::info!("Validating {} tickers", self.config.tickers.len());
        for ticker in &self.config.tickers {
            let validation = self.validate_ticker(ticker).await;
            builder.record_validation(validation);
        }

        builder.finish()
    }

    /// Fetch one page and evaluate its trust markers.
    pub async fn audit_page(&self, path: &str) -> PageObservation {
        let url = page_url(&self.config.base_url, path);
        let name = page_name(path);

        let outcome = match self.fetcher.fetch(&url).await {
            Ok(fetched) => {
                let load = observe_page(&fetched);
                tracing::info!(
                    page = %name,
                    status = load.status,
                    load_time_ms = load.load_time_ms,
                    "page loaded"
                );
                match &load.trust {
                    TrustCheck::Checked { signals } => tracing::info!(
                        page = %name,
                        timestamps = signals.has_timestamps,
                        sources = signals.has_source_badges,
                        "trust markers checked"
                    ),
                    TrustCheck::Failed { reason } => {
                        tracing::warn!(page = %name, %reason, "trust markers not checked")
                    }
                }
                PageOutcome::Loaded(load)
            }
            Err(e) => {
                tracing::warn!(page = %name, error = %e, "page fetch failed");
                PageOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        PageObservation { name, url, outcome }
    }

    /// Look up one ticker with the market-data provider.
    pub async fn validate_ticker(&self, ticker: &str) -> TickerValidation {
        tracing::info!(ticker, source = self.provider.source(), "fetching reference data");
        match self.provider.lookup(ticker).await {
            Ok(metrics) => {
                tracing::info!(
                    ticker,
                    pe = ?metrics.verified_pe,
                    growth = ?metrics.verified_growth,
                    "reference data verified"
                );
                TickerValidation::verified(ticker, metrics)
            }
            Err(e) => {
                tracing::warn!(ticker, error = %e, "reference lookup failed");
                TickerValidation::failed(ticker, e.to_string())
            }
        }
    }
}

/// Reduce a fetched page to its observation.
pub fn observe_page(fetched: &FetchedPage) -> PageLoad {
    PageLoad {
        status: fetched.status,
        load_time_ms: elapsed_ms(fetched.elapsed),
        has_content: has_content(&fetched.body),
        title: extract_title(&fetched.body),
        app_error: has_app_error(&fetched.body),
        trust: check_trust(fetched),
    }
}

/// Every 200 response is checked, blank bodies included; other statuses are not.
pub fn check_trust(fetched: &FetchedPage) -> TrustCheck {
    if fetched.status != 200 {
        return TrustCheck::Failed {
            reason: format!("HTTP status {}", fetched.status),
        };
    }
    TrustCheck::Checked {
        signals: detect_trust_markers_in_html(&fetched.body),
    }
}
