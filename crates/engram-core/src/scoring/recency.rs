use chrono::{DateTime, Utc};

/// Exponential recency decay over days since creation.
///
/// 1.0 at age zero, monotonically decreasing with age. `half_life_days` is
/// the characteristic time of the decay; timestamps in the future score 1.0.
pub fn recency_score(created_at: DateTime<Utc>, now: DateTime<Utc>, half_life_days: f64) -> f64 {
    if half_life_days <= 0.0 {
        return 0.0;
    }
    let age_days = (now - created_at).num_seconds().max(0) as f64 / 86_400.0;
    (-age_days / half_life_days).exp()
}
