//! Core data types for audit observations, scores, and reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One audited page: where it lives and what happened when we fetched it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageObservation {
    /// Short page label (`home`, `screener`, ...).
    pub name: String,
    pub url: String,
    #[serde(flatten)]
    pub outcome: PageOutcome,
}

impl PageObservation {
    /// Load time in milliseconds, if the fetch produced one.
    pub fn load_time_ms(&self) -> Option<f64> {
        match &self.outcome {
            PageOutcome::Loaded(load) => Some(load.load_time_ms),
            PageOutcome::Failed { .. } => None,
        }
    }

    /// Trust signals, if this page was fetched and checked.
    pub fn trust_signals(&self) -> Option<&TrustSignals> {
        match &self.outcome {
            PageOutcome::Loaded(PageLoad {
                trust: TrustCheck::Checked { signals },
                ..
            }) => Some(signals),
            _ => None,
        }
    }
}

/// Result of fetching a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageOutcome {
    Loaded(PageLoad),
    /// Network-level failure. No partial data is kept.
    Failed { error: String },
}

/// A page that answered, whatever its status code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLoad {
    pub status: u16,
    /// Wall-clock time for the request, rounded to 0.01 ms.
    pub load_time_ms: f64,
    /// Body is longer than [`crate::trust::CONTENT_MIN_CHARS`] characters.
    pub has_content: bool,
    pub title: Option<String>,
    /// Body carries a framework crash page ("Application error", "Internal Server Error").
    pub app_error: bool,
    pub trust: TrustCheck,
}

/// Per-page trust-marker evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrustCheck {
    Checked { signals: TrustSignals },
    Failed { reason: String },
}

/// Presence flags for the five trust markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustSignals {
    pub has_timestamps: bool,
    pub has_source_badges: bool,
    pub has_delayed_marker: bool,
    pub has_disclaimer: bool,
    /// Collected for the report only; never scored.
    pub has_demo_badge: bool,
}

impl TrustSignals {
    /// The four flags that feed the `trust_ui` score.
    pub fn scored_flags(&self) -> [bool; 4] {
        [
            self.has_timestamps,
            self.has_source_badges,
            self.has_delayed_marker,
            self.has_disclaimer,
        ]
    }
}

/// Reference metrics for one ticker, as reported by the market-data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceMetrics {
    pub verified_pe: Option<f64>,
    pub verified_growth: Option<f64>,
    pub verified_market_cap: Option<f64>,
    pub verified_price: Option<f64>,
    /// Provenance label, e.g. "Yahoo Finance".
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

/// Validation record for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerValidation {
    pub ticker: String,
    #[serde(flatten)]
    pub outcome: TickerOutcome,
}

impl TickerValidation {
    pub fn verified(ticker: impl Into<String>, metrics: ReferenceMetrics) -> Self {
        Self {
            ticker: ticker.into(),
            outcome: TickerOutcome::Verified(metrics),
        }
    }

    pub fn failed(ticker: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            outcome: TickerOutcome::Failed {
                error: error.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TickerOutcome {
    Verified(ReferenceMetrics),
    Failed { error: String },
}

/// The three audit scores, each in `[0, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub page_load: f64,
    pub trust_ui: f64,
    pub data_accuracy: f64,
}

impl Scores {
    /// Metric names paired with values, in report order.
    pub fn entries(&self) -> [(&'static str, f64); 3] {
        [
            ("page_load", self.page_load),
            ("trust_ui", self.trust_ui),
            ("data_accuracy", self.data_accuracy),
        ]
    }
}

/// Recommendation priority tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    P0,
    P1,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::P0 => f.write_str("P0"),
            Priority::P1 => f.write_str("P1"),
        }
    }
}

/// A prioritized remediation suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: String,
    pub issue: String,
    pub fix: String,
}

/// Everything one audit run produced. This is the persisted JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub timestamp: DateTime<Utc>,
    pub base_url: String,
    pub pages: Vec<PageObservation>,
    /// Merged trust signals; `None` when no page could be checked.
    pub trust_ui: Option<TrustSignals>,
    pub data_validation: Vec<TickerValidation>,
    pub scores: Scores,
    pub recommendations: Vec<Recommendation>,
}

/// Errors that can occur in the audit library.
#[derive(thiserror::Error, Debug)]
pub enum AuditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type.
pub type AuditResult<T> = Result<T, AuditError>;
