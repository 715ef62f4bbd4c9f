//! Human-readable console report. Informational only, not machine-parseable.

use std::fmt::Write;

use trust_audit::{AuditReport, PageOutcome, TrustCheck};

const RULE_WIDTH: usize = 60;
const BAR_WIDTH: usize = 10;

/// Recommendations shown in the summary.
pub const TOP_RECOMMENDATIONS: usize = 3;

/// Banner printed before the run starts.
pub fn render_header(base_url: &str, timestamp: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{rule}\nTRUST AUDIT\nBase URL: {base_url}\nTimestamp: {timestamp}\n{rule}\n")
}

/// Score bars, top recommendations, and the page table.
pub fn render_summary(report: &AuditReport) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "\n{rule}\nAUDIT REPORT SUMMARY\n{rule}");

    let _ = writeln!(out, "\nSCORES");
    for (metric, score) in report.scores.entries() {
        let _ = writeln!(out, "  {metric:20} [{}] {score:.1}/10", score_bar(score));
    }

    let _ = writeln!(out, "\nTOP RECOMMENDATIONS");
    if report.recommendations.is_empty() {
        let _ = writeln!(out, "  none");
    }
    for (i, rec) in report
        .recommendations
        .iter()
        .take(TOP_RECOMMENDATIONS)
        .enumerate()
    {
        let _ = writeln!(
            out,
            "\n  {}. [{}] {}: {}\n     Fix: {}",
            i + 1,
            rec.priority,
            rec.category,
            rec.issue,
            rec.fix
        );
    }

    let _ = writeln!(out, "\nPAGE AUDIT");
    let _ = writeln!(
        out,
        "  {:20} {:8} {:12} {:12} {:12}",
        "Page", "Status", "Load (ms)", "Timestamps", "Sources"
    );
    let _ = writeln!(out, "  {}", "-".repeat(68));
    for page in &report.pages {
        let (status, load, timestamps, sources) = match &page.outcome {
            PageOutcome::Loaded(load) => {
                let (ts, src) = match &load.trust {
                    TrustCheck::Checked { signals } => (
                        mark(signals.has_timestamps),
                        mark(signals.has_source_badges),
                    ),
                    TrustCheck::Failed { .. } => ("n/a", "n/a"),
                };
                (
                    load.status.to_string(),
                    format!("{:.2}", load.load_time_ms),
                    ts,
                    src,
                )
            }
            PageOutcome::Failed { .. } => ("error".to_string(), "N/A".to_string(), "n/a", "n/a"),
        };
        let _ = writeln!(
            out,
            "  {:20} {:8} {:12} {:12} {:12}",
            page.name, status, load, timestamps, sources
        );
    }

    let failed_tickers = report
        .data_validation
        .iter()
        .filter(|v| matches!(v.outcome, trust_audit::TickerOutcome::Failed { .. }))
        .count();
    let _ = writeln!(
        out,
        "\nDATA VALIDATION\n  {} verified, {} failed",
        report.data_validation.len() - failed_tickers,
        failed_tickers
    );

    out
}

/// Ten-cell bar, one filled cell per whole point.
pub fn score_bar(score: f64) -> String {
    let filled = (score.clamp(0.0, 10.0) as usize).min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn mark(present: bool) -> &'static str {
    if present {
        "yes"
    } else {
        "no"
    }
}
