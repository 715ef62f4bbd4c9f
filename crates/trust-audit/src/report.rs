//! Report assembly and JSON persistence.
//!
//! [`AuditReportBuilder`] is owned by the caller running the audit. Each
//! stage appends an immutable record; trust signals from checked pages are
//! merged last-write-wins per flag. Since every check reports all five
//! flags, the merged value equals the most recently checked page.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::recommend::generate_recommendations;
use crate::scoring::calculate_scores;
use crate::types::{AuditReport, AuditResult, PageObservation, TickerValidation, TrustSignals};

/// Caller-owned accumulator for one audit run.
#[derive(Debug, Clone)]
pub struct AuditReportBuilder {
    timestamp: DateTime<Utc>,
    base_url: String,
    pages: Vec<PageObservation>,
    trust: Option<TrustSignals>,
    validations: Vec<TickerValidation>,
}

impl AuditReportBuilder {
    /// Start a run against `base_url`, stamped with the current time.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timestamp(base_url, Utc::now())
    }

    pub fn with_timestamp(base_url: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            base_url: base_url.into(),
            pages: Vec::new(),
            trust: None,
            validations: Vec::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Record a page and merge its trust signals, if it was checked.
    pub fn record_page(&mut self, page: PageObservation) -> &mut Self {
        if let Some(signals) = page.trust_signals() {
            self.trust = Some(*signals);
        }
        self.pages.push(page);
        self
    }

    pub fn record_validation(&mut self, validation: TickerValidation) -> &mut Self {
        self.validations.push(validation);
        self
    }

    pub fn pages(&self) -> &[PageObservation] {
        &self.pages
    }

    /// Merged trust signals so far.
    pub fn trust(&self) -> Option<&TrustSignals> {
        self.trust.as_ref()
    }

    /// Score the collected observations and produce the final report.
    pub fn finish(self) -> AuditReport {
        let scores = calculate_scores(&self.pages, self.trust.as_ref());
        let recommendations = generate_recommendations(&scores);
        AuditReport {
            timestamp: self.timestamp,
            base_url: self.base_url,
            pages: self.pages,
            trust_ui: self.trust,
            data_validation: self.validations,
            scores,
            recommendations,
        }
    }
}

impl AuditReport {
    /// Write the report as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> AuditResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::debug!("report written to {}", path.display());
        Ok(())
    }

    /// Read a report previously written by [`AuditReport::save`].
    pub fn load(path: &Path) -> AuditResult<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

/// Strip surrounding whitespace and trailing slashes from a base URL.
///
/// Never rejects: an unusable URL fails each page fetch instead, and those
/// failures land in the report.
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// URL for a page path under `base_url`. The empty path is the base itself.
pub fn page_url(base_url: &str, path: &str) -> String {
    format!("{base_url}/{path}").trim_end_matches('/').to_string()
}
