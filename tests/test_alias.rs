extern crate hetwalk;

use hetwalk::AliasTable;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_alias_construction_contract() -> Result<(), String> {
    let table = AliasTable::from_probabilities(&[0.1, 0.3, 0.6])?;
    assert_eq!(table.len(), 3);
    // No column may keep less acceptance mass than the smallest scaled
    // probability, 3 * 0.1.
    let min_threshold = table
        .thresholds()
        .iter()
        .cloned()
        .fold(f64::INFINITY, f64::min);
    assert!(min_threshold >= 0.3 - 1e-9);
    assert!(table
        .thresholds()
        .iter()
        .all(|threshold| (0.0..=1.0).contains(threshold)));
    assert!(table.aliases().iter().all(|alias| *alias < table.len()));
    Ok(())
}

#[test]
fn test_alias_empirical_frequencies() -> Result<(), String> {
    let probabilities = [0.1, 0.3, 0.6];
    let table = AliasTable::from_probabilities(&probabilities)?;
    let mut rng = SmallRng::seed_from_u64(42);
    let samples = 100_000;
    let mut counts = [0usize; 3];
    for _ in 0..samples {
        counts[table.sample(&mut rng)] += 1;
    }
    for (count, probability) in counts.iter().zip(probabilities.iter()) {
        let frequency = *count as f64 / samples as f64;
        assert!(
            (frequency - probability).abs() < 0.01,
            "Expected frequency {} within 0.01 of {}.",
            frequency,
            probability
        );
    }
    Ok(())
}

#[test]
fn test_alias_uniform_distribution() -> Result<(), String> {
    // A uniform distribution scales every column to exactly one.
    let table = AliasTable::from_weights(&[2.0, 2.0, 2.0, 2.0])?;
    assert!(table.thresholds().iter().all(|threshold| *threshold == 1.0));
    Ok(())
}

#[test]
fn test_alias_rebuilding_is_bit_identical() -> Result<(), String> {
    let weights = [0.7, 1.3, 0.1, 4.2, 2.0];
    assert_eq!(
        AliasTable::from_weights(&weights)?,
        AliasTable::from_weights(&weights)?
    );
    Ok(())
}

#[test]
fn test_alias_rejects_degenerate_inputs() {
    assert!(AliasTable::from_probabilities(&[]).is_err());
    assert!(AliasTable::from_probabilities(&[0.5, -0.5, 1.0]).is_err());
    assert!(AliasTable::from_probabilities(&[0.1, 0.2]).is_err());
    assert!(AliasTable::from_probabilities(&[f64::NAN, 1.0]).is_err());
    assert!(AliasTable::from_weights(&[0.0, 0.0]).is_err());
    assert!(AliasTable::from_weights(&[]).is_err());
}
