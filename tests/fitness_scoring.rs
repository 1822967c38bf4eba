use quizseq::catalog::{Catalog, Item};
use quizseq::config::EvalConfig;
use quizseq::engines::fitness::{score_genres, FitnessEvaluator};
use quizseq::engines::generation::Sequence;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn six_item_catalog() -> Arc<Catalog> {
    let items = vec![
        Item::new(1, "A"),
        Item::new(2, "A"),
        Item::new(3, "B"),
        Item::new(4, "B"),
        Item::new(5, "C"),
        Item::new(6, "C"),
    ];
    Arc::new(Catalog::new(items).unwrap())
}

#[test]
fn test_grouped_order_loses_to_round_robin() {
    let config = EvalConfig {
        close_range: 2,
        ..Default::default()
    };
    let evaluator = FitnessEvaluator::new(six_item_catalog(), config);

    let grouped = evaluator.evaluate(&Sequence::identity(6));
    let round_robin = evaluator.evaluate(&Sequence::from_positions(vec![0, 2, 4, 1, 3, 5]));

    // AA, BB and CC are each an adjacent repeat.
    assert_eq!(grouped.penalty, 3);
    assert_eq!(grouped.close_penalty, 3);
    assert_eq!(round_robin.penalty, 0);
    assert!(grouped.total > round_robin.total);
    // 3 * 1000 + 3 * 500 + (15 - 3) * 0.1
    assert!((grouped.total - 4501.2).abs() < 1e-9);
    // (15 - 9) * 0.1
    assert!((round_robin.total - 0.6).abs() < 1e-9);
}

#[test]
fn test_repeated_evaluation_is_bit_identical() {
    let catalog = six_item_catalog();
    let config = EvalConfig::default();
    let cached = FitnessEvaluator::new(Arc::clone(&catalog), config.clone());
    let fresh = FitnessEvaluator::new(Arc::clone(&catalog), config);

    let mut rng = StdRng::seed_from_u64(77);
    for _ in 0..50 {
        let sequence = Sequence::random(catalog.len(), &mut rng);
        let a = cached.evaluate(&sequence);
        let b = cached.evaluate(&sequence.clone());
        let c = fresh.evaluate(&sequence);

        assert_eq!(a, b);
        assert_eq!(a.total.to_bits(), c.total.to_bits());
        assert!(a.total >= 0.0);
    }
}

#[test]
fn test_separate_evaluators_do_not_share_cache() {
    let catalog = six_item_catalog();
    let narrow = FitnessEvaluator::new(
        Arc::clone(&catalog),
        EvalConfig {
            close_range: 2,
            ..Default::default()
        },
    );
    let wide = FitnessEvaluator::new(Arc::clone(&catalog), EvalConfig::default());
    let sequence = Sequence::from_positions(vec![0, 2, 1, 4, 3, 5]);

    // A, B, A, C, B, C: no adjacent repeats but near repeats in a wide window.
    assert_eq!(narrow.evaluate(&sequence).close_penalty, 0);
    assert_eq!(wide.evaluate(&sequence).close_penalty, 3);
    assert_eq!(narrow.cache_stats().entries, 1);
    assert_eq!(wide.cache_stats().entries, 1);
}

#[test]
fn test_scoring_kernel_accepts_any_label_type() {
    let config = EvalConfig::default();
    let as_strings = score_genres(&["rock", "jazz", "rock"], &config);
    let as_numbers = score_genres(&[1u8, 2, 1], &config);
    assert_eq!(as_strings, as_numbers);
}
