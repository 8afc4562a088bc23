//! A graph representation optimized for executing random walks on huge graphs.
use super::*;
use counter::Counter;
use rayon::prelude::*;
use std::collections::HashMap;

/// A graph representation optimized for executing random walks on huge graphs.
///
/// The adjacency is stored in a CSR-like layout: `outbounds` holds the
/// cumulative degree of every node, while `sources`, `destinations` and
/// `weights` hold one entry per directed edge, sorted by source and then by
/// destination. Every undirected edge is stored as two directed records with
/// equal weight.
///
/// Instances should be created through [`GraphBuilder`](crate::GraphBuilder).
#[derive(Clone, Debug, PartialEq)]
pub struct Graph {
    // properties
    pub(crate) directed: bool,
    pub(crate) has_traps: bool,
    pub(crate) name: String,
    // graph structs
    pub(crate) nodes: Vocabulary<NodeT>,
    pub(crate) node_types: Option<NodeTypeVocabulary>,
    pub(crate) sources: Vec<NodeT>,
    pub(crate) destinations: Vec<NodeT>,
    pub(crate) weights: Vec<WeightT>,
    // helper structs
    pub(crate) outbounds: Vec<EdgeT>,
    pub(crate) not_trap_nodes: Vec<NodeT>,
    // derived artifacts
    pub(crate) transitions: Option<WalkTransitions>,
}

/// # Graph utility methods
impl Graph {
    /// Returns number of nodes in the graph.
    pub fn get_nodes_number(&self) -> usize {
        self.nodes.len()
    }

    /// Returns number of directed edge records in the graph.
    pub fn get_edges_number(&self) -> usize {
        self.sources.len()
    }

    /// Returns number of node types in the graph.
    pub fn get_node_types_number(&self) -> usize {
        if let Some(nts) = &self.node_types {
            nts.len()
        } else {
            0
        }
    }

    /// Returns the name of the graph.
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Returns boolean representing if graph was built as directed.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Returns boolean representing if graph has node types.
    pub fn has_node_types(&self) -> bool {
        self.node_types.is_some()
    }

    /// Returns boolean representing if at least one node has no outbound edges.
    pub fn has_traps(&self) -> bool {
        self.has_traps
    }

    /// Return range of outbound edges IDs for given node.
    ///
    /// # Arguments
    ///
    /// * `node`: NodeT - Node for which we need to compute the outbounds range.
    pub(crate) fn get_min_max_edge(&self, node: NodeT) -> (EdgeT, EdgeT) {
        let min_edge: EdgeT = if node == 0 {
            0
        } else {
            self.outbounds[node - 1]
        };
        let max_edge: EdgeT = self.outbounds[node];
        (min_edge, max_edge)
    }

    /// Returns the number of outbound neighbours of given node.
    ///
    /// # Arguments
    ///
    /// * `node`: NodeT - Integer ID of the node.
    pub fn get_node_degree(&self, node: NodeT) -> usize {
        let (min_edge, max_edge) = self.get_min_max_edge(node);
        max_edge - min_edge
    }

    /// Returns the degree of every node in the graph.
    pub fn get_node_degrees(&self) -> Vec<usize> {
        (0..self.get_nodes_number())
            .into_par_iter()
            .map(|node| self.get_node_degree(node))
            .collect()
    }

    /// Returns boolean representing if given node is a trap.
    ///
    /// # Arguments
    ///
    /// * `node`: NodeT - Integer ID of the node.
    pub fn is_node_trap(&self, node: NodeT) -> bool {
        self.get_node_degree(node) == 0
    }

    /// Returns slice of neighbours of given node, sorted by node ID.
    ///
    /// # Arguments
    ///
    /// * `node`: NodeT - Integer ID of the node, panics when out of range.
    pub fn get_node_neighbours(&self, node: NodeT) -> &[NodeT] {
        let (min_edge, max_edge) = self.get_min_max_edge(node);
        &self.destinations[min_edge..max_edge]
    }

    /// Returns the edge ID of the directed edge between the given nodes, if any.
    ///
    /// The lookup is a binary search over the sorted neighbour slice of the
    /// source node.
    ///
    /// # Arguments
    ///
    /// * `src`: NodeT - The source node of the edge.
    /// * `dst`: NodeT - The destination node of the edge.
    pub fn get_edge_id(&self, src: NodeT, dst: NodeT) -> Option<EdgeT> {
        let (min_edge, max_edge) = self.get_min_max_edge(src);
        self.destinations[min_edge..max_edge]
            .binary_search(&dst)
            .ok()
            .map(|position| min_edge + position)
    }

    /// Returns boolean representing if the directed edge between the given nodes exists.
    ///
    /// # Arguments
    ///
    /// * `src`: NodeT - The source node of the edge.
    /// * `dst`: NodeT - The destination node of the edge.
    pub fn has_edge(&self, src: NodeT, dst: NodeT) -> bool {
        self.get_edge_id(src, dst).is_some()
    }

    /// Returns the weight of the directed edge between the given nodes.
    ///
    /// Returns None when the edge does not exist, which is the uniform
    /// convention for absent edges across the crate.
    ///
    /// # Arguments
    ///
    /// * `src`: NodeT - The source node of the edge.
    /// * `dst`: NodeT - The destination node of the edge.
    pub fn get_edge_weight(&self, src: NodeT, dst: NodeT) -> Option<WeightT> {
        self.get_edge_id(src, dst).map(|edge_id| self.weights[edge_id])
    }

    /// Returns iterator over every directed edge record exactly once,
    /// sorted by source and then destination node ID.
    pub fn iter_edges(&self) -> impl Iterator<Item = (NodeT, NodeT)> + '_ {
        self.sources
            .iter()
            .copied()
            .zip(self.destinations.iter().copied())
    }

    /// Returns parallel iterator over the directed edge records with their weights.
    pub fn par_iter_weighted_edges(
        &self,
    ) -> impl ParallelIterator<Item = (NodeT, NodeT, WeightT)> + '_ {
        self.sources
            .par_iter()
            .copied()
            .zip(self.destinations.par_iter().copied())
            .zip(self.weights.par_iter().copied())
            .map(|((src, dst), weight)| (src, dst, weight))
    }

    /// Returns node type of given node.
    ///
    /// # Arguments
    ///
    /// * `node`: NodeT - node whose node type is to be returned.
    pub fn get_node_type_id(&self, node: NodeT) -> Result<NodeTypeT> {
        if let Some(nts) = &self.node_types {
            return if node < nts.ids.len() {
                Ok(nts.ids[node])
            } else {
                Err(format!(
                    "The node ID {} is too big for the node types vector which has length {}.",
                    node,
                    nts.ids.len()
                ))
            };
        }
        Err(String::from(
            "Node types are not defined for current graph instance.",
        ))
    }

    /// Returns node type of given node, assuming node types are available.
    pub(crate) fn get_unchecked_node_type_id(&self, node: NodeT) -> NodeTypeT {
        self.node_types.as_ref().map(|nts| nts.ids[node]).unwrap_or(0)
    }

    /// Returns the name of the given node type.
    ///
    /// # Arguments
    ///
    /// * `node_type`: NodeTypeT - node type whose name is to be returned.
    pub fn get_node_type_name(&self, node_type: NodeTypeT) -> Result<&str> {
        if let Some(nts) = &self.node_types {
            nts.vocabulary.translate(node_type)
        } else {
            Err(String::from(
                "Node types are not defined for current graph instance.",
            ))
        }
    }

    /// Returns node type counts.
    pub fn get_node_type_counts(&self) -> Result<HashMap<NodeTypeT, usize>> {
        if let Some(nts) = &self.node_types {
            Ok(Counter::init(nts.ids.clone()).into_map())
        } else {
            Err(String::from(
                "Node types are not defined for current graph instance.",
            ))
        }
    }

    /// Returns the node ID curresponding to the given node name.
    ///
    /// # Arguments
    ///
    /// * `node_name`: &str - The node name whose ID is to be returned.
    pub fn get_node_id_from_node_name(&self, node_name: &str) -> Result<NodeT> {
        self.nodes.get(node_name).copied().ok_or_else(|| {
            format!(
                "The node name {} does not exist in the current graph instance.",
                node_name
            )
        })
    }

    /// Returns the node name curresponding to the given node ID.
    ///
    /// # Arguments
    ///
    /// * `node`: NodeT - The node ID whose name is to be returned.
    pub fn get_node_name_from_node_id(&self, node: NodeT) -> Result<&str> {
        self.nodes.translate(node)
    }

    /// Return mapping from node names to node IDs.
    pub fn get_nodes_mapping(&self) -> HashMap<String, NodeT> {
        self.nodes.to_map()
    }

    /// Return the reverse node mapping, where position equals node ID.
    pub fn get_nodes_reverse_mapping(&self) -> &[String] {
        self.nodes.reverse_map()
    }

    /// Returns number of nodes that have at least one outbound edge.
    pub fn get_not_trap_nodes_number(&self) -> usize {
        self.not_trap_nodes.len()
    }

    /// Return mapping from not trap nodes to a dense range of values.
    ///
    /// This is the mapping consumers can use to compact the walk space when
    /// the graph contains traps.
    pub fn get_dense_nodes_mapping(&self) -> HashMap<NodeT, NodeT> {
        self.not_trap_nodes
            .iter()
            .enumerate()
            .map(|(dense_id, node)| (*node, dense_id))
            .collect()
    }
}
