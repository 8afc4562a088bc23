extern crate hetwalk;

use hetwalk::test_utilities::*;
use hetwalk::{TransitionParameters, WalksParameters};

#[test]
fn test_seeded_walks_are_reproducible() -> Result<(), String> {
    let mut graph = load_random_graph(50, 400, 0x5eed);
    graph.preprocess_transitions(TransitionParameters::homogeneous(2.0, 0.5)?)?;
    let parameters = WalksParameters::new(16)?
        .set_iterations(Some(3))?
        .set_random_state(Some(0x1234));
    let first = graph.walk(&parameters)?;
    let second = graph.walk(&parameters)?;
    assert_eq!(first, second);

    // A different random state yields different walks.
    let other_parameters = WalksParameters::new(16)?
        .set_iterations(Some(3))?
        .set_random_state(Some(0x4321));
    assert_ne!(first, graph.walk(&other_parameters)?);
    Ok(())
}

#[test]
fn test_transitions_rebuild_bit_identical() -> Result<(), String> {
    let mut graph = load_random_graph(40, 300, 77);
    let parameters = TransitionParameters::heterogeneous(0.5, 4.0, 0.3)?;
    graph.preprocess_transitions(parameters.clone())?;
    let first = graph
        .get_walk_transitions()
        .ok_or_else(|| "Missing transitions".to_string())?
        .clone();
    graph.preprocess_transitions(parameters)?;
    let second = graph
        .get_walk_transitions()
        .ok_or_else(|| "Missing transitions".to_string())?;
    assert_eq!(&first, second);
    Ok(())
}

#[test]
fn test_consistent_hash_tracks_graph_identity() -> Result<(), String> {
    let first = load_random_graph(30, 200, 1);
    let second = load_random_graph(30, 200, 1);
    assert_eq!(first.consistent_hash(), second.consistent_hash());

    let different_edges = load_random_graph(30, 200, 2);
    assert_ne!(first.consistent_hash(), different_edges.consistent_hash());

    // Building the transition tables is part of the identity.
    let mut preprocessed = load_random_graph(30, 200, 1);
    preprocessed.preprocess_transitions(TransitionParameters::homogeneous(1.0, 1.0)?)?;
    assert_ne!(first.consistent_hash(), preprocessed.consistent_hash());
    let hash_with_tables = preprocessed.consistent_hash();

    // Different parameters change the tables, hence the digest.
    preprocessed.preprocess_transitions(TransitionParameters::homogeneous(2.0, 1.0)?)?;
    assert_ne!(hash_with_tables, preprocessed.consistent_hash());

    // Dropping the tables restores the bare digest.
    preprocessed.drop_walk_transitions();
    assert_eq!(first.consistent_hash(), preprocessed.consistent_hash());
    Ok(())
}

#[test]
fn test_consistent_hash_is_weight_sensitive() -> Result<(), String> {
    let mut builder = hetwalk::GraphBuilder::new(None, Some(false));
    builder.add_edge("a".to_string(), "b".to_string(), Some(1.0))?;
    let light = builder.build()?;
    let mut builder = hetwalk::GraphBuilder::new(None, Some(false));
    builder.add_edge("a".to_string(), "b".to_string(), Some(2.0))?;
    let heavy = builder.build()?;
    assert_ne!(light.consistent_hash(), heavy.consistent_hash());
    Ok(())
}
