use factlens_broker::{synthesize, EvidenceTally, VerdictLabel};
use factlens_signals::{MlLabel, MlPrediction};
use proptest::prelude::*;

fn arbitrary_prediction() -> impl Strategy<Value = MlPrediction> {
    (prop_oneof![Just(MlLabel::Fake), Just(MlLabel::Real)], 0.0f64..=1.0)
        .prop_map(|(label, confidence)| MlPrediction::new(label, confidence))
}

proptest! {
    #[test]
    fn prop_confidence_stays_in_unit_interval(
        ml in arbitrary_prediction(),
        false_count in 0usize..50,
        true_count in 0usize..50,
        has_evidence in any::<bool>(),
    ) {
        let verdict = synthesize(&ml, EvidenceTally::new(false_count, true_count), has_evidence);
        prop_assert!((0.0..=1.0).contains(&verdict.confidence));
        prop_assert!(!verdict.reasoning.is_empty());
    }

    #[test]
    fn prop_consensus_never_exceeds_cap(
        ml in arbitrary_prediction(),
        false_count in 0usize..1000,
        true_count in 0usize..1000,
    ) {
        prop_assume!(false_count != true_count);
        let verdict = synthesize(&ml, EvidenceTally::new(false_count, true_count), true);
        prop_assert!(verdict.confidence <= 0.95);
        prop_assert!(verdict.confidence >= 0.80);
        let expected = if false_count > true_count { VerdictLabel::Fake } else { VerdictLabel::Real };
        prop_assert_eq!(verdict.label, expected);
    }

    #[test]
    fn prop_more_false_ratings_never_lower_confidence(
        ml in arbitrary_prediction(),
        true_count in 0usize..20,
        extra in 1usize..20,
    ) {
        let false_count = true_count + extra;
        let fewer = synthesize(&ml, EvidenceTally::new(false_count, true_count), true);
        let more = synthesize(&ml, EvidenceTally::new(false_count + 1, true_count), true);
        prop_assert!(more.confidence >= fewer.confidence);
    }

    #[test]
    fn prop_without_evidence_tally_is_ignored(
        ml in arbitrary_prediction(),
        false_count in 0usize..50,
        true_count in 0usize..50,
    ) {
        let baseline = synthesize(&ml, EvidenceTally::default(), false);
        let noisy = synthesize(&ml, EvidenceTally::new(false_count, true_count), false);
        prop_assert_eq!(baseline, noisy);
    }

    #[test]
    fn prop_model_only_confidence_is_passed_through(ml in arbitrary_prediction()) {
        let verdict = synthesize(&ml, EvidenceTally::default(), false);
        prop_assert_eq!(verdict.confidence, ml.confidence());
        if verdict.label != VerdictLabel::Uncertain {
            prop_assert_eq!(verdict.label, VerdictLabel::from(ml.label()));
        }
    }

    #[test]
    fn prop_synthesis_is_deterministic(
        ml in arbitrary_prediction(),
        false_count in 0usize..10,
        true_count in 0usize..10,
        has_evidence in any::<bool>(),
    ) {
        let tally = EvidenceTally::new(false_count, true_count);
        prop_assert_eq!(synthesize(&ml, tally, has_evidence), synthesize(&ml, tally, has_evidence));
    }
}
