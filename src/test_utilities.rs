//! Canonical graphs and invariant batteries shared by the test suite.
use super::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Load the triangle graph, three nodes all connected with unit weights.
pub fn load_triangle() -> Graph {
    let mut builder = GraphBuilder::new(Some("triangle".to_string()), Some(false));
    for (src, dst) in &[("a", "b"), ("b", "c"), ("a", "c")] {
        builder
            .add_edge(src.to_string(), dst.to_string(), None)
            .unwrap();
    }
    builder.build().unwrap()
}

/// Load a path graph with the given number of nodes, labelled by position.
pub fn load_path(nodes_number: usize) -> Graph {
    let mut builder = GraphBuilder::new(Some("path".to_string()), Some(false));
    for node in 0..nodes_number {
        builder.add_node(node.to_string(), None).unwrap();
    }
    for node in 0..nodes_number.saturating_sub(1) {
        builder
            .add_edge(node.to_string(), (node + 1).to_string(), None)
            .unwrap();
    }
    builder.build().unwrap()
}

/// Load the square graph, a cycle over four nodes with unit weights.
pub fn load_square() -> Graph {
    let mut builder = GraphBuilder::new(Some("square".to_string()), Some(false));
    for (src, dst) in &[("0", "1"), ("1", "2"), ("2", "3"), ("0", "3")] {
        builder
            .add_edge(src.to_string(), dst.to_string(), None)
            .unwrap();
    }
    builder.build().unwrap()
}

/// Load the heterogeneous star: the gene `g0` connected to two genes, two
/// proteins and one disease, with node types from the first character.
pub fn load_hetero_star() -> Graph {
    let mut builder = GraphBuilder::new(Some("hetero star".to_string()), Some(false));
    builder.set_node_types_from_first_character(true);
    for leaf in &["g1", "g2", "p1", "p2", "d1"] {
        builder
            .add_edge("g0".to_string(), leaf.to_string(), None)
            .unwrap();
    }
    builder.build().unwrap()
}

/// Load a random undirected graph with roughly the requested number of edges.
///
/// Node names carry one of three leading characters so that the graph can
/// also be used in heterogeneous mode.
pub fn load_random_graph(nodes_number: usize, edges_number: usize, random_state: u64) -> Graph {
    let prefixes = ["g", "p", "d"];
    let mut rng = SmallRng::seed_from_u64(random_state);
    let mut builder = GraphBuilder::new(Some("random".to_string()), Some(false));
    builder.set_ignore_duplicated_edges(true);
    builder.set_node_types_from_first_character(true);
    let node_name = |node: usize| format!("{}{}", prefixes[node % prefixes.len()], node);
    for _ in 0..edges_number {
        let src = rng.gen_range(0, nodes_number);
        let dst = rng.gen_range(0, nodes_number);
        let weight = rng.gen_range(1, 10) as WeightT;
        builder
            .add_edge(node_name(src), node_name(dst), Some(weight))
            .unwrap();
    }
    builder.build().unwrap()
}

/// Check every structural invariant the graph contract promises.
pub fn validate_graph_invariants(graph: &Graph) -> Result<()> {
    // Neighbour slices are strictly increasing.
    for node in 0..graph.get_nodes_number() {
        let neighbours = graph.get_node_neighbours(node);
        if neighbours.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(format!(
                "The neighbours of node {} are not strictly increasing: {:?}.",
                node, neighbours
            ));
        }
        if neighbours.len() != graph.get_node_degree(node) {
            return Err(format!("The degree of node {} is inconsistent.", node));
        }
    }
    // Undirected symmetry with equal weights.
    if !graph.is_directed() {
        for (src, dst) in graph.iter_edges() {
            if graph.get_edge_weight(src, dst) != graph.get_edge_weight(dst, src) {
                return Err(format!(
                    "The undirected edge between {} and {} is not symmetric.",
                    src, dst
                ));
            }
        }
    }
    // Edge enumeration is sorted and consistent with the lookups.
    let edges: Vec<(NodeT, NodeT)> = graph.iter_edges().collect();
    if edges.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err("The edge enumeration is not strictly sorted.".to_string());
    }
    if edges.len() != graph.get_edges_number() {
        return Err("The edge enumeration does not cover every edge.".to_string());
    }
    for (src, dst) in edges {
        if !graph.has_edge(src, dst) || graph.get_edge_weight(src, dst).is_none() {
            return Err(format!(
                "The enumerated edge ({}, {}) is not retrievable.",
                src, dst
            ));
        }
    }
    Ok(())
}

/// Check the invariants of every built alias table.
pub fn validate_transitions_invariants(graph: &Graph) -> Result<()> {
    let transitions = graph
        .get_walk_transitions()
        .ok_or_else(|| "The transitions were not preprocessed.".to_string())?;
    let node_tables = transitions.node_alias_tables();
    let edge_tables = transitions.edge_alias_tables();
    if node_tables.len() != graph.get_nodes_number() {
        return Err("There is not one node alias slot per node.".to_string());
    }
    if edge_tables.len() != graph.get_edges_number() {
        return Err("There is not one edge alias slot per edge.".to_string());
    }
    for table in node_tables.iter().chain(edge_tables.iter()).flatten() {
        let outcomes = table.len();
        if table.aliases().iter().any(|alias| *alias >= outcomes) {
            return Err("An alias index escapes the table.".to_string());
        }
        if table
            .thresholds()
            .iter()
            .any(|threshold| !(0.0..=1.0).contains(threshold))
        {
            return Err("An acceptance threshold escapes [0, 1].".to_string());
        }
    }
    Ok(())
}

/// Run the default battery of checks on the given graph.
///
/// The graph is preprocessed with unbiased homogeneous transitions, walked,
/// and every invariant of the store, the tables and the walks is verified.
pub fn default_test_suite(graph: &mut Graph) -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    validate_graph_invariants(graph)?;

    graph.preprocess_transitions(TransitionParameters::homogeneous(1.0, 1.0)?)?;
    validate_transitions_invariants(graph)?;

    let parameters = WalksParameters::new(8)?
        .set_iterations(Some(2))?
        .set_random_state(Some(0x2565));
    let walks = graph.walk(&parameters)?;
    if walks.len() != 2 * graph.get_nodes_number() {
        return Err("One walk per node per iteration was expected.".to_string());
    }
    for walk in walks.iter() {
        if walk.is_empty() || walk.len() > 8 {
            return Err(format!("The walk length {} is out of range.", walk.len()));
        }
        for step in walk.windows(2) {
            if !graph.has_edge(step[0], step[1]) {
                return Err(format!(
                    "The walk step ({}, {}) does not follow an edge.",
                    step[0], step[1]
                ));
            }
        }
    }
    let is_complete = !graph.has_traps()
        && graph
            .get_walk_transitions()
            .map_or(false, |transitions| transitions.is_complete());
    if is_complete {
        if !walks.is_complete() {
            return Err("A trap-free graph must yield complete walks.".to_string());
        }
        if walks.iter().any(|walk| walk.len() != 8) {
            return Err("Every complete walk must have the requested length.".to_string());
        }
    }

    // Determinism of walks and of the digest.
    if graph.walk(&parameters)? != walks {
        return Err("Walking twice with the same state diverged.".to_string());
    }
    if graph.consistent_hash() != graph.consistent_hash() {
        return Err("The consistent hash is not stable.".to_string());
    }
    Ok(())
}
