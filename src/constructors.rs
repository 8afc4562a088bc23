//! Normalization of raw edge lists into the CSR representation.
use super::*;
use itertools::Itertools;
use log::info;
use std::time::Instant;

/// Validate the given edge weight.
///
/// A weight must be finite and strictly positive: a non-positive weight can
/// never be sampled by the walker and would break the invariant tying
/// positive weights to adjacency.
///
/// # Arguments
///
/// * `weight`: WeightT - The edge weight to validate.
pub(crate) fn validate_weight(weight: WeightT) -> Result<WeightT> {
    if !weight.is_finite() || weight <= 0.0 {
        Err(format!(
            "The weight {} is not a strictly positive finite number.",
            weight
        ))
    } else {
        Ok(weight)
    }
}

/// Derive the node type name of the given node name as its first character.
///
/// This is the conventional encoding used by heterogeneous biomedical edge
/// lists, where e.g. `g42` is a gene and `d7` a disease.
///
/// # Arguments
///
/// * `node_name`: &str - The node name whose type is to be derived.
pub(crate) fn node_type_from_first_character(node_name: &str) -> Result<String> {
    node_name
        .chars()
        .next()
        .map(|character| character.to_string())
        .ok_or_else(|| "Cannot derive the node type of an empty node name.".to_string())
}

/// Return new graph object built from the given string edge list.
///
/// The edge list is normalized to the internal invariants: node names are
/// mapped to dense IDs, undirected graphs are symmetrized by storing every
/// edge as two directed records (self-loops are stored once), neighbour
/// slices end up sorted by node ID, and duplicated directed records are
/// either rejected or skipped.
///
/// # Arguments
///
/// * `string_edges`: Vec<(String, String, WeightT)> - Edge list with weights.
/// * `string_nodes`: Option<Vec<(String, Option<String>)>> - Optional node list
///   with optional node type names. When provided, edges referring to nodes
///   outside the list are an error.
/// * `directed`: bool - Whether to build the graph as directed.
/// * `ignore_duplicated_edges`: bool - Whether to skip duplicated directed
///   records instead of failing. Duplicates never accumulate weight.
/// * `node_types_from_first_character`: bool - Whether to derive missing node
///   types from the first character of the node name.
/// * `name`: String - The name of the graph.
pub(crate) fn build_graph_from_strings(
    string_edges: Vec<(String, String, WeightT)>,
    string_nodes: Option<Vec<(String, Option<String>)>>,
    directed: bool,
    ignore_duplicated_edges: bool,
    node_types_from_first_character: bool,
    name: String,
) -> Result<Graph> {
    let start_time = Instant::now();
    let mut nodes: Vocabulary<NodeT> = Vocabulary::new();
    let mut node_type_names: Vec<Option<String>> = Vec::new();
    let nodes_list_was_provided = string_nodes.is_some();

    if let Some(string_nodes) = string_nodes {
        for (node_name, node_type_name) in string_nodes {
            let (_, already_present) = nodes.insert(&node_name)?;
            if already_present {
                return Err(format!(
                    "The node {} appears multiple times in the given node list.",
                    node_name
                ));
            }
            node_type_names.push(node_type_name);
        }
    }

    // Map the edge list onto dense node IDs, validating the weights.
    let mut edges: Vec<(NodeT, NodeT, WeightT)> = Vec::with_capacity(
        string_edges.len() * if directed { 1 } else { 2 },
    );
    for (src_name, dst_name, weight) in &string_edges {
        let weight = validate_weight(*weight).map_err(|msg| {
            format!(
                "Error while handling the edge ({}, {}): {}",
                src_name, dst_name, msg
            )
        })?;
        let (src, dst) = if nodes_list_was_provided {
            let resolve = |node_name: &str| -> Result<NodeT> {
                nodes.get(node_name).copied().ok_or_else(|| {
                    format!(
                        concat!(
                            "In the edge list was found the edge ({} => {}) ",
                            "containing nodes that do not appear in the given node list."
                        ),
                        src_name, dst_name
                    )
                })
            };
            (resolve(src_name)?, resolve(dst_name)?)
        } else {
            let (src, _) = nodes.insert(src_name)?;
            let (dst, _) = nodes.insert(dst_name)?;
            node_type_names.resize(nodes.len(), None);
            (src, dst)
        };
        edges.push((src, dst, weight));
        if !directed && src != dst {
            edges.push((dst, src, weight));
        }
    }
    node_type_names.resize(nodes.len(), None);

    // Sorting fixes both the neighbour slice ordering contract and the
    // deterministic edge enumeration order. The weight tiebreaker keeps
    // deduplication symmetric when both orientations of an undirected edge
    // were provided with diverging weights.
    edges.sort_unstable_by(|(src_a, dst_a, weight_a), (src_b, dst_b, weight_b)| {
        (src_a, dst_a).cmp(&(src_b, dst_b)).then(
            weight_a
                .partial_cmp(weight_b)
                .unwrap_or(std::cmp::Ordering::Equal),
        )
    });

    if let Some(((src, dst, _), _)) = edges
        .iter()
        .tuple_windows()
        .find(|((src_a, dst_a, _), (src_b, dst_b, _))| src_a == src_b && dst_a == dst_b)
    {
        if !ignore_duplicated_edges {
            return Err(format!(
                concat!(
                    "The directed edge ({} => {}) is duplicated in the edge list. ",
                    "On undirected graphs, providing both orientations of an edge ",
                    "also counts as a duplicate. Consider enabling the parameter ",
                    "to ignore duplicated edges."
                ),
                nodes.unchecked_translate(*src),
                nodes.unchecked_translate(*dst)
            ));
        }
        edges.dedup_by(|(src_a, dst_a, _), (src_b, dst_b, _)| src_a == src_b && dst_a == dst_b);
    }

    let nodes_number = nodes.len();
    let edges_number = edges.len();

    let mut outbounds = vec![0 as EdgeT; nodes_number];
    let mut sources = Vec::with_capacity(edges_number);
    let mut destinations = Vec::with_capacity(edges_number);
    let mut weights = Vec::with_capacity(edges_number);
    for (src, dst, weight) in edges {
        outbounds[src] += 1;
        sources.push(src);
        destinations.push(dst);
        weights.push(weight);
    }
    for node in 1..nodes_number {
        outbounds[node] += outbounds[node - 1];
    }

    let node_types = parse_node_types(
        &nodes,
        node_type_names,
        node_types_from_first_character,
    )?;

    let not_trap_nodes: Vec<NodeT> = (0..nodes_number)
        .filter(|node| {
            let min_edge = if *node == 0 { 0 } else { outbounds[node - 1] };
            outbounds[*node] > min_edge
        })
        .collect();
    let has_traps = not_trap_nodes.len() != nodes_number;

    info!(
        "Built graph {} with {} nodes and {} directed edges in {:?}.",
        name,
        nodes_number,
        edges_number,
        start_time.elapsed()
    );

    Ok(Graph {
        directed,
        has_traps,
        name,
        nodes,
        node_types,
        sources,
        destinations,
        weights,
        outbounds,
        not_trap_nodes,
        transitions: None,
    })
}

/// Assemble the node type vocabulary, if any node types were requested.
///
/// Explicitly provided type names win over the first-character derivation;
/// the derivation fills the gaps when enabled. A node left without a type
/// while others have one is an error.
///
/// # Arguments
///
/// * `nodes`: &Vocabulary<NodeT> - The node vocabulary.
/// * `node_type_names`: Vec<Option<String>> - Explicit type name of each node.
/// * `from_first_character`: bool - Whether to derive missing types from names.
fn parse_node_types(
    nodes: &Vocabulary<NodeT>,
    mut node_type_names: Vec<Option<String>>,
    from_first_character: bool,
) -> Result<Option<NodeTypeVocabulary>> {
    if from_first_character {
        for (node, node_type_name) in node_type_names.iter_mut().enumerate() {
            if node_type_name.is_none() {
                *node_type_name =
                    Some(node_type_from_first_character(nodes.unchecked_translate(node))?);
            }
        }
    }
    if node_type_names.iter().all(|node_type| node_type.is_none()) {
        return Ok(None);
    }
    let complete_names = node_type_names
        .into_iter()
        .enumerate()
        .map(|(node, node_type_name)| {
            node_type_name.ok_or_else(|| {
                format!(
                    "The node {} has no node type, but other nodes of the graph do.",
                    nodes.unchecked_translate(node)
                )
            })
        })
        .collect::<Result<Vec<String>>>()?;
    Ok(Some(NodeTypeVocabulary::from_type_names(complete_names)?))
}
