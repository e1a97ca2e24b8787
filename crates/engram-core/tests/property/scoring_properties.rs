use chrono::{Duration, Utc};
use engram_core::scoring::{cosine_similarity, recency_score};
use proptest::prelude::*;

proptest! {
    #[test]
    fn cosine_is_bounded(
        a in proptest::collection::vec(-10.0f32..10.0, 1..64),
        b in proptest::collection::vec(-10.0f32..10.0, 1..64),
    ) {
        let sim = cosine_similarity(&a, &b);
        prop_assert!((-1.0..=1.0).contains(&sim), "out of bounds: {sim}");
    }

    #[test]
    fn cosine_is_symmetric(
        a in proptest::collection::vec(-10.0f32..10.0, 1..32),
        b in proptest::collection::vec(-10.0f32..10.0, 1..32),
    ) {
        prop_assert!((cosine_similarity(&a, &b) - cosine_similarity(&b, &a)).abs() < 1e-12);
    }

    #[test]
    fn self_similarity_is_one_for_nonzero(
        a in proptest::collection::vec(0.1f32..10.0, 1..32),
    ) {
        let sim = cosine_similarity(&a, &a);
        prop_assert!((sim - 1.0).abs() < 1e-6, "self similarity {sim}");
    }

    #[test]
    fn recency_is_monotone_in_age(
        age_a in 0i64..3650,
        age_b in 0i64..3650,
        half_life in 1.0f64..365.0,
    ) {
        let now = Utc::now();
        let score_a = recency_score(now - Duration::days(age_a), now, half_life);
        let score_b = recency_score(now - Duration::days(age_b), now, half_life);
        if age_a < age_b {
            prop_assert!(score_a >= score_b);
        }
        prop_assert!((0.0..=1.0).contains(&score_a));
    }
}
