//! trust-audit CLI — audits a deployed finance UI for load times, trust
//! markers, and market-data provenance.

pub mod command;
pub mod config;
pub mod console;
pub mod fetch;
pub mod market;
pub mod runner;

pub use config::AuditConfig;
pub use fetch::{FetchError, PageFetcher};
pub use market::{CrumbSession, MarketDataError, MarketDataProvider, YahooFinanceProvider};
pub use runner::Auditor;
