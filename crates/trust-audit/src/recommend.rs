//! Recommendation generator: maps low scores to prioritized fixes.
//!
//! Rules are evaluated in a fixed order (data accuracy, trust UI,
//! performance) and each fires independently, so the output order never
//! depends on how bad a score is.

use crate::types::{Priority, Recommendation, Scores};

pub const DATA_ACCURACY_THRESHOLD: f64 = 5.0;
pub const TRUST_UI_THRESHOLD: f64 = 5.0;
pub const PAGE_LOAD_THRESHOLD: f64 = 7.0;

struct Rule {
    score: fn(&Scores) -> f64,
    threshold: f64,
    priority: Priority,
    category: &'static str,
    issue: &'static str,
    fix: &'static str,
}

const RULES: [Rule; 3] = [
    Rule {
        score: |s| s.data_accuracy,
        threshold: DATA_ACCURACY_THRESHOLD,
        priority: Priority::P0,
        category: "Data Accuracy",
        issue: "Critical metric errors",
        fix: "Fix data formulas and update to real-time sources",
    },
    Rule {
        score: |s| s.trust_ui,
        threshold: TRUST_UI_THRESHOLD,
        priority: Priority::P0,
        category: "Trust UI",
        issue: "Missing data timestamps",
        fix: "Add a last-updated indicator to all data components",
    },
    Rule {
        score: |s| s.page_load,
        threshold: PAGE_LOAD_THRESHOLD,
        priority: Priority::P1,
        category: "Performance",
        issue: "Slow page loads",
        fix: "Optimize API calls and add caching",
    },
];

/// Emit one recommendation per score strictly below its threshold.
pub fn generate_recommendations(scores: &Scores) -> Vec<Recommendation> {
    RULES
        .iter()
        .filter(|rule| (rule.score)(scores) < rule.threshold)
        .map(|rule| Recommendation {
            priority: rule.priority,
            category: rule.category.to_string(),
            issue: rule.issue.to_string(),
            fix: rule.fix.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(data_accuracy: f64, trust_ui: f64, page_load: f64) -> Scores {
        Scores {
            page_load,
            trust_ui,
            data_accuracy,
        }
    }

    fn categories(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.category.as_str()).collect()
    }

    #[test]
    fn test_healthy_scores_emit_nothing() {
        assert!(generate_recommendations(&scores(10.0, 10.0, 10.0)).is_empty());
    }

    #[test]
    fn test_threshold_values_do_not_fire() {
        assert!(generate_recommendations(&scores(5.0, 5.0, 7.0)).is_empty());
    }

    #[test]
    fn test_all_low_emits_in_fixed_order() {
        let recs = generate_recommendations(&scores(0.0, 0.0, 0.0));
        assert_eq!(
            categories(&recs),
            vec!["Data Accuracy", "Trust UI", "Performance"]
        );
        assert_eq!(recs[0].priority, Priority::P0);
        assert_eq!(recs[1].priority, Priority::P0);
        assert_eq!(recs[2].priority, Priority::P1);
    }

    #[test]
    fn test_unverified_data_and_missing_trust() {
        let recs = generate_recommendations(&scores(1.0, 0.0, 10.0));
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].category, "Data Accuracy");
        assert_eq!(recs[0].priority, Priority::P0);
        assert_eq!(recs[0].issue, "Critical metric errors");
        assert_eq!(recs[1].category, "Trust UI");
        assert_eq!(recs[1].priority, Priority::P0);
        assert_eq!(recs[1].issue, "Missing data timestamps");
    }

    #[test]
    fn test_each_rule_toggles_exactly_one_recommendation() {
        let healthy = scores(10.0, 10.0, 10.0);
        let lowered: [(Scores, &str, Priority); 3] = [
            (scores(4.9, 10.0, 10.0), "Data Accuracy", Priority::P0),
            (scores(10.0, 4.9, 10.0), "Trust UI", Priority::P0),
            (scores(10.0, 10.0, 6.9), "Performance", Priority::P1),
        ];
        for (low, category, priority) in lowered {
            let recs = generate_recommendations(&low);
            assert_eq!(recs.len(), 1, "{category}");
            assert_eq!(recs[0].category, category);
            assert_eq!(recs[0].priority, priority);
        }
        assert!(generate_recommendations(&healthy).is_empty());
    }

    #[test]
    fn test_fix_text_for_performance() {
        let recs = generate_recommendations(&scores(10.0, 10.0, 2.0));
        assert_eq!(recs[0].fix, "Optimize API calls and add caching");
        assert_eq!(recs[0].issue, "Slow page loads");
    }
}
