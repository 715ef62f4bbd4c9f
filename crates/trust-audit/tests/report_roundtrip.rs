//! Persistence tests: a saved report reloads with identical contents.

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use trust_audit::*;

fn sample_report() -> AuditReport {
    let at = Utc.with_ymd_and_hms(2026, 10, 19, 14, 30, 0).unwrap();
    let mut builder = AuditReportBuilder::with_timestamp("http://localhost:3000", at);

    builder
        .record_page(PageObservation {
            name: "home".to_string(),
            url: "http://localhost:3000".to_string(),
            outcome: PageOutcome::Loaded(PageLoad {
                status: 200,
                load_time_ms: 1234.56,
                has_content: true,
                title: Some("Legendary Investor".to_string()),
                app_error: false,
                trust: TrustCheck::Checked {
                    signals: TrustSignals {
                        has_timestamps: true,
                        has_source_badges: false,
                        has_delayed_marker: true,
                        has_disclaimer: false,
                        has_demo_badge: true,
                    },
                },
            }),
        })
        .record_page(PageObservation {
            name: "screener".to_string(),
            url: "http://localhost:3000/screener".to_string(),
            outcome: PageOutcome::Loaded(PageLoad {
                status: 500,
                load_time_ms: 2718.28,
                has_content: false,
                title: None,
                app_error: true,
                trust: TrustCheck::Failed {
                    reason: "HTTP status 500".to_string(),
                },
            }),
        })
        .record_page(PageObservation {
            name: "macro".to_string(),
            url: "http://localhost:3000/macro".to_string(),
            outcome: PageOutcome::Failed {
                error: "connection refused".to_string(),
            },
        })
        .record_validation(TickerValidation::verified(
            "AAPL",
            ReferenceMetrics {
                verified_pe: Some(28.41),
                verified_growth: Some(0.061),
                verified_market_cap: Some(3.45e12),
                verified_price: Some(227.52),
                source: "Yahoo Finance".to_string(),
                timestamp: at,
            },
        ))
        .record_validation(TickerValidation::verified(
            "PLTR",
            ReferenceMetrics {
                verified_pe: None,
                verified_growth: Some(0.27),
                verified_market_cap: None,
                verified_price: Some(41.3),
                source: "Yahoo Finance".to_string(),
                timestamp: at,
            },
        ))
        .record_validation(TickerValidation::failed("MU", "HTTP status 404"));

    builder.finish()
}

#[test]
fn report_survives_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("audit_report.json");

    let report = sample_report();
    report.save(&path).unwrap();
    let loaded = AuditReport::load(&path).unwrap();

    assert_eq!(loaded, report);
    assert_eq!(loaded.scores.page_load.to_bits(), report.scores.page_load.to_bits());
    assert_eq!(loaded.scores.trust_ui.to_bits(), report.scores.trust_ui.to_bits());
    assert_eq!(loaded.scores.data_accuracy, 1.0);
}

#[test]
fn report_uses_fixed_top_level_keys() {
    let value = serde_json::to_value(sample_report()).unwrap();
    let obj = value.as_object().unwrap();
    for key in [
        "timestamp",
        "base_url",
        "pages",
        "trust_ui",
        "data_validation",
        "scores",
        "recommendations",
    ] {
        assert!(obj.contains_key(key), "missing {key}");
    }

    let scores = value["scores"].as_object().unwrap();
    assert!(scores.contains_key("page_load"));
    assert!(scores.contains_key("trust_ui"));
    assert!(scores.contains_key("data_accuracy"));

    assert_eq!(value["pages"][0]["load_time_ms"], 1234.56);
    assert_eq!(value["pages"][0]["trust"]["status"], "checked");
    assert_eq!(value["pages"][1]["trust"]["status"], "failed");
    assert_eq!(value["pages"][2]["error"], "connection refused");
    assert_eq!(value["data_validation"][0]["source"], "Yahoo Finance");
    assert_eq!(value["data_validation"][2]["error"], "HTTP status 404");
    assert_eq!(value["recommendations"][0]["priority"], "P0");
}

#[test]
fn merged_trust_comes_from_last_checked_page() {
    let report = sample_report();
    let trust = report.trust_ui.unwrap();
    assert!(trust.has_timestamps);
    assert!(trust.has_delayed_marker);
    assert_eq!(report.scores.trust_ui, 5.0);
}

#[test]
fn save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("out").join("report.json");
    sample_report().save(&path).unwrap();
    assert!(path.exists());
}
