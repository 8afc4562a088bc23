//! Precomputation of the biased transition distributions of the walker.
use super::*;
use derive_getters::Getters;
use log::info;
use num_traits::Zero;
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// How the walker mixes node types, resolved once at construction so that
/// the per-step sampling code stays monomorphic.
#[derive(Clone, Debug, PartialEq)]
pub enum TransitionMode {
    /// Classic second-order bias: only the edge weights and the p/q
    /// adjustments shape the distribution.
    Homogeneous,
    /// Type-aware bias: every off-type present among the neighbours of the
    /// current node receives a total relative mass of `gamma`, the on-type
    /// receives a total relative mass of one, and the per-neighbour factors
    /// divide each mass by the count of neighbours of that type.
    Heterogeneous { gamma: f64 },
}

/// Parameters shaping the transition distributions.
///
/// `p` divides the unnormalized weight of returning to the previous node,
/// `q` divides the weight of moving to a node not adjacent to it.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionParameters {
    pub(crate) p: f64,
    pub(crate) q: f64,
    pub(crate) mode: TransitionMode,
}

impl TransitionParameters {
    /// Return homogeneous transition parameters.
    ///
    /// # Arguments
    ///
    /// * `p`: f64 - Return bias divisor, must be strictly positive.
    /// * `q`: f64 - In-out bias divisor, must be strictly positive.
    pub fn homogeneous(p: f64, q: f64) -> Result<TransitionParameters> {
        validate_bias(p, "p")?;
        validate_bias(q, "q")?;
        Ok(TransitionParameters {
            p,
            q,
            mode: TransitionMode::Homogeneous,
        })
    }

    /// Return heterogeneous transition parameters.
    ///
    /// # Arguments
    ///
    /// * `p`: f64 - Return bias divisor, must be strictly positive.
    /// * `q`: f64 - In-out bias divisor, must be strictly positive.
    /// * `gamma`: f64 - Relative mass assigned to each off-type present
    ///   among the neighbours of the current node, must be non-negative.
    pub fn heterogeneous(p: f64, q: f64, gamma: f64) -> Result<TransitionParameters> {
        validate_bias(p, "p")?;
        validate_bias(q, "q")?;
        if !gamma.is_finite() || gamma < 0.0 {
            return Err(format!(
                "The gamma parameter must be a non-negative finite number, got {}.",
                gamma
            ));
        }
        Ok(TransitionParameters {
            p,
            q,
            mode: TransitionMode::Heterogeneous { gamma },
        })
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    pub fn q(&self) -> f64 {
        self.q
    }

    pub fn mode(&self) -> &TransitionMode {
        &self.mode
    }
}

fn validate_bias(value: f64, parameter_name: &str) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(format!(
            "The {} parameter must be a strictly positive finite number, got {}.",
            parameter_name, value
        ));
    }
    Ok(())
}

/// Structured diagnostics of a transition precomputation run.
#[derive(Clone, Debug, Getters)]
pub struct TransitionsReport {
    /// Nodes for which no first-step table could be built, either because
    /// they have no outbound edges or because their distribution
    /// degenerated to zero mass. Walks reaching them are truncated.
    skipped_nodes: usize,
    /// Directed edges for which no second-order table could be built.
    skipped_edges: usize,
    /// Wall time of the precomputation.
    elapsed: Duration,
    /// Number of logical cores available to the preprocessing pool.
    threads: usize,
}

/// The alias tables encoding the walker transition distributions.
///
/// One table per node holds the first-step distribution over its neighbour
/// slice; one table per directed edge `(u, v)` holds the second-order
/// distribution over the neighbours of `v` given the walker arrived from
/// `u`. Both are stored contiguously, indexed by node id and edge id.
#[derive(Clone, Debug, PartialEq)]
pub struct WalkTransitions {
    pub(crate) parameters: TransitionParameters,
    pub(crate) node_aliases: Vec<Option<AliasTable>>,
    pub(crate) edge_aliases: Vec<Option<AliasTable>>,
    pub(crate) skipped_nodes: usize,
    pub(crate) skipped_edges: usize,
}

impl WalkTransitions {
    /// Return the parameters the tables were built with.
    pub fn parameters(&self) -> &TransitionParameters {
        &self.parameters
    }

    /// Return the first-step alias tables, indexed by node ID.
    pub fn node_alias_tables(&self) -> &[Option<AliasTable>] {
        &self.node_aliases
    }

    /// Return the second-order alias tables, indexed by edge ID.
    pub fn edge_alias_tables(&self) -> &[Option<AliasTable>] {
        &self.edge_aliases
    }

    /// Returns whether every node and edge received a table, which is the
    /// condition for walks to be emitted as a dense rectangular matrix.
    pub fn is_complete(&self) -> bool {
        self.skipped_nodes == 0 && self.skipped_edges == 0
    }
}

/// # Transition tables preprocessing.
impl Graph {
    /// Precompute the alias tables for the walker transition distributions.
    ///
    /// The tables are stored on the graph instance and are required by all
    /// the walk methods. Nodes whose distribution degenerates to zero mass
    /// are skipped and behave as traps during the walks; their count is
    /// reported instead of aborting the whole preprocessing.
    ///
    /// # Arguments
    ///
    /// * `parameters`: TransitionParameters - The transition biases to encode.
    ///
    /// # Raises
    ///
    /// * If the heterogeneous mode is requested on a graph without node types.
    pub fn preprocess_transitions(
        &mut self,
        parameters: TransitionParameters,
    ) -> Result<TransitionsReport> {
        let start_time = Instant::now();
        let graph: &Graph = &*self;
        if let TransitionMode::Heterogeneous { .. } = parameters.mode {
            if graph.node_types.is_none() {
                return Err(concat!(
                    "The heterogeneous transition mode requires node types, ",
                    "but the current graph instance does not have any. ",
                    "Either provide node types at build time or derive them ",
                    "from the first character of the node names."
                )
                .to_string());
            }
        }

        // Per-node type factors, aligned with the neighbour slices. In the
        // homogeneous mode no factor vector is materialized at all.
        let factors: Option<Vec<Vec<f64>>> = match parameters.mode {
            TransitionMode::Homogeneous => None,
            TransitionMode::Heterogeneous { gamma } => Some(
                (0..graph.get_nodes_number())
                    .into_par_iter()
                    .map(|node| graph.node_type_factors(node, gamma))
                    .collect(),
            ),
        };

        let node_aliases: Vec<Option<AliasTable>> = (0..graph.get_nodes_number())
            .into_par_iter()
            .map(|node| {
                let (min_edge, max_edge) = graph.get_min_max_edge(node);
                if min_edge == max_edge {
                    return None;
                }
                let weights: Vec<f64> = graph.weights[min_edge..max_edge]
                    .iter()
                    .enumerate()
                    .map(|(position, weight)| {
                        *weight as f64
                            * factors
                                .as_ref()
                                .map_or(1.0, |factors| factors[node][position])
                    })
                    .collect();
                // A distribution degenerated to zero mass marks the node as
                // a trap rather than aborting the whole preprocessing.
                if weights.iter().all(|weight| weight.is_zero()) {
                    return None;
                }
                AliasTable::from_weights(&weights).ok()
            })
            .collect();

        let edge_aliases: Vec<Option<AliasTable>> = (0..graph.get_edges_number())
            .into_par_iter()
            .map(|edge_id| {
                let src = graph.sources[edge_id];
                let dst = graph.destinations[edge_id];
                if node_aliases[dst].is_none() {
                    return None;
                }
                let (min_edge, max_edge) = graph.get_min_max_edge(dst);
                let weights: Vec<f64> = (min_edge..max_edge)
                    .enumerate()
                    .map(|(position, neighbour_edge_id)| {
                        let neighbour = graph.destinations[neighbour_edge_id];
                        let mut weight = graph.weights[neighbour_edge_id] as f64
                            * factors
                                .as_ref()
                                .map_or(1.0, |factors| factors[dst][position]);
                        if neighbour == src {
                            weight /= parameters.p;
                        } else if !graph.has_edge(neighbour, src) {
                            weight /= parameters.q;
                        }
                        weight
                    })
                    .collect();
                AliasTable::from_weights(&weights).ok()
            })
            .collect();

        let skipped_nodes = node_aliases.iter().filter(|table| table.is_none()).count();
        let skipped_edges = edge_aliases.iter().filter(|table| table.is_none()).count();
        let report = TransitionsReport {
            skipped_nodes,
            skipped_edges,
            elapsed: start_time.elapsed(),
            threads: num_cpus::get(),
        };
        info!(
            "Computed transition tables for {} nodes and {} edges ({} nodes skipped) in {:?}.",
            self.get_nodes_number(),
            self.get_edges_number(),
            skipped_nodes,
            report.elapsed
        );
        self.transitions = Some(WalkTransitions {
            parameters,
            node_aliases,
            edge_aliases,
            skipped_nodes,
            skipped_edges,
        });
        Ok(report)
    }

    /// Return the transition tables, if they were preprocessed.
    pub fn get_walk_transitions(&self) -> Option<&WalkTransitions> {
        self.transitions.as_ref()
    }

    /// Drop the transition tables, freeing their memory.
    pub fn drop_walk_transitions(&mut self) {
        self.transitions = None;
    }

    /// Compute the per-neighbour type factors of the given node.
    ///
    /// Every off-type present among the neighbours carries a total relative
    /// mass of `gamma`, the on-type a total relative mass of one; dividing
    /// each mass by the count of neighbours of that type yields the factor
    /// each single neighbour is scaled by. With `gamma = 0` only on-type
    /// neighbours keep a nonzero factor.
    ///
    /// # Arguments
    ///
    /// * `node`: NodeT - The node whose neighbour factors are to be computed.
    /// * `gamma`: f64 - The off-type relative mass.
    fn node_type_factors(&self, node: NodeT, gamma: f64) -> Vec<f64> {
        let own_type = self.get_unchecked_node_type_id(node);
        let neighbours = self.get_node_neighbours(node);
        let mut type_counts = vec![0 as NodeT; self.get_node_types_number()];
        for neighbour in neighbours {
            type_counts[NodeTypeT::to_usize(self.get_unchecked_node_type_id(*neighbour))] += 1;
        }
        neighbours
            .iter()
            .map(|neighbour| {
                let neighbour_type = self.get_unchecked_node_type_id(*neighbour);
                let count = type_counts[NodeTypeT::to_usize(neighbour_type)] as f64;
                if neighbour_type == own_type {
                    1.0 / count
                } else {
                    gamma / count
                }
            })
            .collect()
    }
}
