//! Incremental construction of graphs from edge and node lists.
use super::*;

/// Incremental builder normalizing raw edge lists into a [`Graph`].
///
/// # Examples
///
/// ```rust
/// # use hetwalk::GraphBuilder;
/// let mut builder = GraphBuilder::new(Some("triangle".to_string()), Some(false));
/// builder.add_edge("a".to_string(), "b".to_string(), None).unwrap();
/// builder.add_edge("b".to_string(), "c".to_string(), None).unwrap();
/// builder.add_edge("a".to_string(), "c".to_string(), None).unwrap();
/// let graph = builder.build().unwrap();
/// assert_eq!(graph.get_nodes_number(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct GraphBuilder {
    pub(crate) edges: Vec<(String, String, WeightT)>,
    pub(crate) nodes: Vec<(String, Option<String>)>,

    pub(crate) directed: bool,
    pub(crate) ignore_duplicated_edges: bool,
    pub(crate) node_types_from_first_character: bool,
    pub(crate) name: String,

    pub(crate) default_weight: WeightT,
}

impl GraphBuilder {
    pub fn new(name: Option<String>, directed: Option<bool>) -> Self {
        Self {
            directed: directed.unwrap_or(false),
            name: name.unwrap_or_else(|| "Graph".to_string()),

            ignore_duplicated_edges: false,
            node_types_from_first_character: false,

            nodes: Vec::new(),
            edges: Vec::new(),

            default_weight: 1.0,
        }
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn set_directed(&mut self, is_directed: bool) {
        self.directed = is_directed;
    }

    /// Set the weight assigned to edges added without one.
    pub fn set_default_weight(&mut self, default_weight: WeightT) {
        self.default_weight = default_weight;
    }

    /// Set whether duplicated directed edge records are skipped instead of
    /// failing the build. Duplicates never accumulate weight.
    pub fn set_ignore_duplicated_edges(&mut self, ignore_duplicated_edges: bool) {
        self.ignore_duplicated_edges = ignore_duplicated_edges;
    }

    /// Set whether node types missing from the node list are derived from
    /// the first character of the node name.
    pub fn set_node_types_from_first_character(&mut self, enabled: bool) {
        self.node_types_from_first_character = enabled;
    }

    /// Add a new edge to the graph.
    ///
    /// # Arguments
    ///
    /// * `src`: String - The source node name.
    /// * `dst`: String - The destination node name.
    /// * `weight`: Option<WeightT> - The edge weight, defaulting to the
    ///   builder default weight.
    pub fn add_edge(&mut self, src: String, dst: String, weight: Option<WeightT>) -> Result<()> {
        let weight = weight.unwrap_or(self.default_weight);
        constructors::validate_weight(weight)?;
        self.edges.push((src, dst, weight));
        Ok(())
    }

    /// Add a new node to the graph, with an optional node type name.
    ///
    /// Providing a node list makes the build reject edges whose nodes do not
    /// appear in it.
    ///
    /// # Arguments
    ///
    /// * `name`: String - The node name.
    /// * `node_type`: Option<String> - The node type name, if known.
    pub fn add_node(&mut self, name: String, node_type: Option<String>) -> Result<()> {
        if name.is_empty() {
            return Err("The node name cannot be an empty string.".to_string());
        }
        self.nodes.push((name, node_type));
        Ok(())
    }

    /// Consume the accumulated lists and build the graph.
    pub fn build(&mut self) -> Result<Graph> {
        let nodes = core::mem::replace(&mut self.nodes, Vec::new());
        let edges = core::mem::replace(&mut self.edges, Vec::new());

        constructors::build_graph_from_strings(
            edges,
            if nodes.is_empty() { None } else { Some(nodes) },
            self.directed,
            self.ignore_duplicated_edges,
            self.node_types_from_first_character,
            self.name.clone(),
        )
    }
}
