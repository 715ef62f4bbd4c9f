//! `trust-audit audit` — run the full audit and write the report.

use anyhow::{Context, Result};
use chrono::Utc;

use trust_audit::AuditReport;

use crate::config::{needs_crumb_session, AuditConfig};
use crate::console;
use crate::fetch::PageFetcher;
use crate::market::{CrumbSession, YahooFinanceProvider};
use crate::runner::Auditor;

/// Resolve configuration, run the audit, print the summary, and save the report.
pub async fn run(url: &str, output: &str) -> Result<AuditReport> {
    let config = AuditConfig::resolve(url, output);
    let fetcher = PageFetcher::new(config.page_timeout)?;
    let mut provider = YahooFinanceProvider::new(config.market_data_url.clone())?;
    if needs_crumb_session(&config.market_data_url) {
        provider = provider.with_crumb_session(CrumbSession::default());
    }
    run_with(Auditor::new(config, fetcher, Box::new(provider))).await
}

/// Run a pre-built auditor. The report file is always written.
pub async fn run_with(auditor: Auditor) -> Result<AuditReport> {
    let config = auditor.config().clone();
    print!(
        "{}",
        console::render_header(&config.base_url, &Utc::now().to_rfc3339())
    );

    let report = auditor.run().await;
    print!("{}", console::render_summary(&report));

    report
        .save(&config.output)
        .with_context(|| format!("failed to write report: {}", config.output.display()))?;
    println!("\nReport saved to {}", config.output.display());
    println!("\nAudit complete!");

    Ok(report)
}
