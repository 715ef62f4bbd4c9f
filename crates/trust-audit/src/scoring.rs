//! Scoring engine: reduces page observations and trust signals to [`Scores`].

use crate::types::{PageObservation, Scores, TrustSignals};

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

/// Mean load time assumed when no page produced a timing.
pub const DEFAULT_MEAN_LOAD_MS: f64 = 5000.0;

/// A mean load at or under this earns a perfect `page_load` score.
pub const TARGET_LOAD_MS: f64 = 1000.0;

/// Each additional step over the target costs one point.
pub const LOAD_MS_PER_POINT: f64 = 400.0;

/// `data_accuracy` until ticker validations are compared against the app's own figures.
pub const UNVERIFIED_DATA_ACCURACY: f64 = 1.0;

/// Compute all three scores from the collected observations.
pub fn calculate_scores(pages: &[PageObservation], trust: Option<&TrustSignals>) -> Scores {
    Scores {
        page_load: page_load_score(pages),
        trust_ui: trust_ui_score(trust),
        data_accuracy: UNVERIFIED_DATA_ACCURACY,
    }
}

/// Arithmetic mean of the load times that were recorded.
pub fn mean_load_time_ms(pages: &[PageObservation]) -> Option<f64> {
    let times: Vec<f64> = pages.iter().filter_map(|p| p.load_time_ms()).collect();
    if times.is_empty() {
        return None;
    }
    Some(times.iter().sum::<f64>() / times.len() as f64)
}

pub fn page_load_score(pages: &[PageObservation]) -> f64 {
    load_time_to_score(mean_load_time_ms(pages).unwrap_or(DEFAULT_MEAN_LOAD_MS))
}

/// Linear map from mean load time to score, saturating at both ends.
pub fn load_time_to_score(mean_ms: f64) -> f64 {
    (MAX_SCORE - (mean_ms - TARGET_LOAD_MS) / LOAD_MS_PER_POINT).clamp(MIN_SCORE, MAX_SCORE)
}

pub fn trust_ui_score(trust: Option<&TrustSignals>) -> f64 {
    let Some(signals) = trust else {
        return MIN_SCORE;
    };
    let flags = signals.scored_flags();
    let present = flags.iter().filter(|&&f| f).count();
    present as f64 / flags.len() as f64 * MAX_SCORE
}
