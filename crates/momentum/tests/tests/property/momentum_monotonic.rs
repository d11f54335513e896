//! Property tests: momentum rises with engagement and decays with age.

use momentum_detector::momentum_score;
use proptest::prelude::*;

proptest! {
    #[test]
    fn more_engagement_means_more_momentum(
        predictive in 0.01f64..100.0,
        weighted in 0.0f64..10_000.0,
        delta in 0.1f64..1_000.0,
        age in 0.0f64..1_000.0,
        gravity in 0.1f64..3.0,
    ) {
        let base = momentum_score(predictive, weighted, age, gravity);
        let more = momentum_score(predictive, weighted + delta, age, gravity);
        prop_assert!(more > base, "{more} <= {base}");
    }

    #[test]
    fn older_content_has_less_momentum(
        predictive in 0.01f64..100.0,
        weighted in 0.0f64..10_000.0,
        age in 0.0f64..1_000.0,
        delta in 0.1f64..1_000.0,
        gravity in 0.1f64..3.0,
    ) {
        let fresh = momentum_score(predictive, weighted, age, gravity);
        let older = momentum_score(predictive, weighted, age + delta, gravity);
        prop_assert!(older < fresh, "{older} >= {fresh}");
    }

    #[test]
    fn momentum_is_positive_and_finite(
        predictive in 0.01f64..100.0,
        weighted in 0.0f64..1e6,
        age in 0.0f64..10_000.0,
        gravity in 0.0f64..3.0,
    ) {
        let m = momentum_score(predictive, weighted, age, gravity);
        prop_assert!(m.is_finite());
        prop_assert!(m > 0.0);
    }
}
