//! trust-audit — core library for auditing deployed finance UIs.
//!
//! Detects trust markers in page text, scores page timings and trust
//! coverage, maps low scores to prioritized recommendations, and persists
//! the resulting report as JSON.

pub mod recommend;
pub mod report;
pub mod scoring;
pub mod trust;
pub mod types;

pub use recommend::generate_recommendations;
pub use report::{normalize_base_url, page_url, AuditReportBuilder};
pub use scoring::calculate_scores;
pub use trust::{detect_trust_markers, detect_trust_markers_in_html, extract_title};
pub use types::*;
