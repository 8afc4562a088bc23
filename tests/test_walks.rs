extern crate hetwalk;

use hetwalk::test_utilities::*;
use hetwalk::{GraphBuilder, TransitionParameters, WalksParameters};
use std::sync::atomic::AtomicBool;

#[test]
fn test_walks_require_preprocessing() -> Result<(), String> {
    let graph = load_triangle();
    let parameters = WalksParameters::new(4)?;
    assert!(graph.walk(&parameters).is_err());
    Ok(())
}

#[test]
fn test_walks_parameters_validation() -> Result<(), String> {
    assert!(WalksParameters::new(1).is_err());
    assert!(WalksParameters::new(0).is_err());
    assert!(WalksParameters::new(2)?.set_iterations(Some(0)).is_err());
    let parameters = WalksParameters::new(2)?
        .set_iterations(Some(3))?
        .set_random_state(Some(7))
        .set_verbose(Some(false));
    assert_eq!(*parameters.iterations(), 3);
    assert_eq!(*parameters.random_state(), 7);
    Ok(())
}

#[test]
fn test_triangle_walks_are_complete_and_follow_edges() -> Result<(), String> {
    let mut graph = load_triangle();
    let report = graph.preprocess_transitions(TransitionParameters::homogeneous(1.0, 1.0)?)?;
    assert_eq!(*report.skipped_nodes(), 0);
    assert_eq!(*report.skipped_edges(), 0);
    validate_transitions_invariants(&graph)?;

    let parameters = WalksParameters::new(6)?
        .set_iterations(Some(4))?
        .set_random_state(Some(31));
    let walks = graph.walk(&parameters)?;
    assert!(walks.is_complete());
    assert_eq!(walks.len(), 4 * graph.get_nodes_number());
    for walk in walks.iter() {
        assert_eq!(walk.len(), 6);
        for step in walk.windows(2) {
            assert!(graph.has_edge(step[0], step[1]));
        }
    }
    Ok(())
}

#[test]
fn test_triangle_return_frequency() -> Result<(), String> {
    // With p = q = 1 and uniform weights every step is uniform over the two
    // neighbours, so the second step returns to the start half of the time.
    let mut graph = load_triangle();
    graph.preprocess_transitions(TransitionParameters::homogeneous(1.0, 1.0)?)?;
    let a = graph.get_node_id_from_node_name("a")?;
    let parameters = WalksParameters::new(4)?
        .set_iterations(Some(10_000))?
        .set_random_state(Some(0xcafe));
    let walks = graph.walk_from(&[a], &parameters)?;
    assert_eq!(walks.len(), 10_000);
    let returns = walks.iter().filter(|walk| walk[2] == a).count();
    let frequency = returns as f64 / walks.len() as f64;
    assert!(
        (frequency - 0.5).abs() < 0.02,
        "Expected a return frequency of 0.5, got {}.",
        frequency
    );
    Ok(())
}

#[test]
fn test_path_graph_has_no_traps() -> Result<(), String> {
    let mut graph = load_path(3);
    assert!(!graph.has_traps());
    graph.preprocess_transitions(TransitionParameters::homogeneous(1.0, 1.0)?)?;
    let parameters = WalksParameters::new(5)?.set_random_state(Some(5));
    let walks = graph.walk(&parameters)?;
    assert!(walks.is_complete());
    assert!(walks.iter().all(|walk| walk.len() == 5));
    Ok(())
}

#[test]
fn test_isolated_node_truncates_its_walk() -> Result<(), String> {
    // Same path graph with the second edge removed: node 2 becomes
    // unreachable and walks started from it stop immediately.
    let mut builder = GraphBuilder::new(None, Some(false));
    for node in 0..3 {
        builder.add_node(node.to_string(), None)?;
    }
    builder.add_edge("0".to_string(), "1".to_string(), None)?;
    let mut graph = builder.build()?;
    assert!(graph.has_traps());

    graph.preprocess_transitions(TransitionParameters::homogeneous(1.0, 1.0)?)?;
    let parameters = WalksParameters::new(5)?.set_random_state(Some(5));
    let walks = graph.walk(&parameters)?;
    assert!(!walks.is_complete());
    let trapped = graph.get_node_id_from_node_name("2")?;
    let trapped_walks = graph.walk_from(&[trapped], &parameters)?;
    assert_eq!(trapped_walks.to_vec(), vec![vec![trapped]]);
    // The other walks keep bouncing on the surviving edge.
    assert!(walks
        .iter()
        .filter(|walk| walk[0] != trapped)
        .all(|walk| walk.len() == 5));
    Ok(())
}

#[test]
fn test_directed_chain_walk_is_deterministic() -> Result<(), String> {
    let mut builder = GraphBuilder::new(None, Some(true));
    builder.add_edge("0".to_string(), "1".to_string(), None)?;
    builder.add_edge("1".to_string(), "2".to_string(), None)?;
    let mut graph = builder.build()?;
    graph.preprocess_transitions(TransitionParameters::homogeneous(1.0, 1.0)?)?;
    let zero = graph.get_node_id_from_node_name("0")?;
    let one = graph.get_node_id_from_node_name("1")?;
    let two = graph.get_node_id_from_node_name("2")?;
    let parameters = WalksParameters::new(5)?.set_random_state(Some(9));
    let walks = graph.walk_from(&[zero], &parameters)?;
    assert_eq!(walks.to_vec(), vec![vec![zero, one, two]]);
    Ok(())
}

#[test]
fn test_self_loop_walks() -> Result<(), String> {
    let mut builder = GraphBuilder::new(None, Some(false));
    builder.add_edge("a".to_string(), "a".to_string(), None)?;
    let mut graph = builder.build()?;
    graph.preprocess_transitions(TransitionParameters::homogeneous(4.0, 0.25)?)?;
    let parameters = WalksParameters::new(4)?.set_random_state(Some(3));
    let walks = graph.walk(&parameters)?;
    assert!(walks.is_complete());
    assert_eq!(walks.to_vec(), vec![vec![0, 0, 0, 0]]);
    Ok(())
}

#[test]
fn test_walks_reject_unknown_starts() -> Result<(), String> {
    let mut graph = load_triangle();
    graph.preprocess_transitions(TransitionParameters::homogeneous(1.0, 1.0)?)?;
    let parameters = WalksParameters::new(4)?;
    assert!(graph.walk_from(&[99], &parameters).is_err());
    assert!(graph.walk_from(&[], &parameters).is_err());
    Ok(())
}

#[test]
fn test_walks_cancellation() -> Result<(), String> {
    let mut graph = load_triangle();
    graph.preprocess_transitions(TransitionParameters::homogeneous(1.0, 1.0)?)?;
    let parameters = WalksParameters::new(4)?.set_iterations(Some(100))?;
    let interrupt = AtomicBool::new(true);
    let starts: Vec<usize> = (0..graph.get_nodes_number()).collect();
    assert!(graph
        .walk_with_interrupt(&starts, &parameters, Some(&interrupt))
        .is_err());
    let untripped = AtomicBool::new(false);
    assert!(graph
        .walk_with_interrupt(&starts, &parameters, Some(&untripped))
        .is_ok());
    Ok(())
}

#[test]
fn test_transition_parameters_validation() {
    assert!(TransitionParameters::homogeneous(0.0, 1.0).is_err());
    assert!(TransitionParameters::homogeneous(1.0, -2.0).is_err());
    assert!(TransitionParameters::homogeneous(f64::NAN, 1.0).is_err());
    assert!(TransitionParameters::heterogeneous(1.0, 1.0, -0.1).is_err());
    assert!(TransitionParameters::heterogeneous(1.0, 1.0, f64::INFINITY).is_err());
    assert!(TransitionParameters::homogeneous(0.5, 2.0).is_ok());
    assert!(TransitionParameters::heterogeneous(0.5, 2.0, 0.0).is_ok());
}
