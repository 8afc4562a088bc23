extern crate hetwalk;

use hetwalk::test_utilities::*;
use hetwalk::{TransitionParameters, WalksParameters};

#[test]
fn test_default_suite_on_canonical_graphs() -> Result<(), String> {
    default_test_suite(&mut load_triangle())?;
    default_test_suite(&mut load_square())?;
    default_test_suite(&mut load_path(6))?;
    default_test_suite(&mut load_hetero_star())?;
    Ok(())
}

#[test]
fn test_default_suite_on_random_graphs() -> Result<(), String> {
    for random_state in 0..5 {
        default_test_suite(&mut load_random_graph(60, 400, random_state))?;
    }
    Ok(())
}

#[test]
fn test_biased_walks_on_random_heterogeneous_graph() -> Result<(), String> {
    let mut graph = load_random_graph(80, 600, 0x7777);
    let report =
        graph.preprocess_transitions(TransitionParameters::heterogeneous(4.0, 0.25, 0.7)?)?;
    assert!(*report.threads() >= 1);
    validate_transitions_invariants(&graph)?;
    let parameters = WalksParameters::new(20)?
        .set_iterations(Some(2))?
        .set_random_state(Some(0x31337));
    let walks = graph.walk(&parameters)?;
    assert_eq!(walks.len(), 2 * graph.get_nodes_number());
    for walk in walks.iter() {
        assert!(!walk.is_empty() && walk.len() <= 20);
        for step in walk.windows(2) {
            assert!(graph.has_edge(step[0], step[1]));
        }
    }
    Ok(())
}
