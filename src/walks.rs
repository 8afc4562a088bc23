//! Generation of biased second-order random walks.
use super::*;
use derive_getters::Getters;
use indicatif::ParallelProgressIterator;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// Parameters of a batch of random walks.
#[derive(Clone, Debug, PartialEq, Getters)]
pub struct WalksParameters {
    /// Number of nodes of each complete walk, including the start.
    walk_length: usize,
    /// Number of walks started from every start node.
    iterations: usize,
    /// Random state reproducing the walks.
    random_state: u64,
    /// Whether to show a loading bar while walking.
    verbose: bool,
}

impl WalksParameters {
    /// Return new walks parameters with the given walk length.
    ///
    /// # Arguments
    ///
    /// * `walk_length`: usize - Number of nodes per walk, at least two.
    pub fn new(walk_length: usize) -> Result<WalksParameters> {
        if walk_length < 2 {
            return Err(format!(
                "The walk length must be at least two nodes, got {}.",
                walk_length
            ));
        }
        Ok(WalksParameters {
            walk_length,
            iterations: 1,
            random_state: 42,
            verbose: false,
        })
    }

    /// Set the number of walks started from every start node.
    ///
    /// # Arguments
    ///
    /// * `iterations`: Option<usize> - Number of iterations, at least one.
    pub fn set_iterations(mut self, iterations: Option<usize>) -> Result<WalksParameters> {
        if let Some(iterations) = iterations {
            if iterations == 0 {
                return Err("The number of iterations must be at least one.".to_string());
            }
            self.iterations = iterations;
        }
        Ok(self)
    }

    /// Set the random state reproducing the walks.
    ///
    /// # Arguments
    ///
    /// * `random_state`: Option<u64> - The random state to use.
    pub fn set_random_state(mut self, random_state: Option<u64>) -> WalksParameters {
        if let Some(random_state) = random_state {
            self.random_state = random_state;
        }
        self
    }

    /// Set whether to show a loading bar while walking.
    ///
    /// # Arguments
    ///
    /// * `verbose`: Option<bool> - Whether to show the loading bar.
    pub fn set_verbose(mut self, verbose: Option<bool>) -> WalksParameters {
        if let Some(verbose) = verbose {
            self.verbose = verbose;
        }
        self
    }
}

/// The walks generated from a graph.
///
/// On graphs without traps every walk has exactly the requested length and
/// the walks form a dense rectangular matrix, stored row-major. When traps
/// exist, or when preprocessing had to skip degenerate nodes, every walk
/// keeps its own length.
#[derive(Clone, Debug, PartialEq)]
pub enum Walks {
    Complete {
        ids: Vec<NodeT>,
        walk_length: usize,
    },
    Ragged(Vec<Vec<NodeT>>),
}

impl Walks {
    /// Returns the number of walks.
    pub fn len(&self) -> usize {
        match self {
            Walks::Complete { ids, walk_length } => ids.len() / walk_length,
            Walks::Ragged(walks) => walks.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether the walks form a dense rectangular matrix.
    pub fn is_complete(&self) -> bool {
        matches!(self, Walks::Complete { .. })
    }

    /// Returns iterator over the single walks.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &[NodeT]> + '_> {
        match self {
            Walks::Complete { ids, walk_length } => Box::new(ids.chunks_exact(*walk_length)),
            Walks::Ragged(walks) => Box::new(walks.iter().map(|walk| walk.as_slice())),
        }
    }

    /// Returns the walks as a vector of vectors of node IDs.
    pub fn to_vec(&self) -> Vec<Vec<NodeT>> {
        self.iter().map(|walk| walk.to_vec()).collect()
    }
}

/// # Random walks.
impl Graph {
    /// Return walks started from every node of the graph.
    ///
    /// # Arguments
    ///
    /// * `parameters`: &WalksParameters - The walks parameters.
    ///
    /// # Raises
    ///
    /// * If the transition tables were not preprocessed.
    pub fn walk(&self, parameters: &WalksParameters) -> Result<Walks> {
        let starts: Vec<NodeT> = (0..self.get_nodes_number()).collect();
        self.walk_from(&starts, parameters)
    }

    /// Return walks started from the given nodes.
    ///
    /// # Arguments
    ///
    /// * `starts`: &[NodeT] - The nodes to start the walks from.
    /// * `parameters`: &WalksParameters - The walks parameters.
    ///
    /// # Raises
    ///
    /// * If the transition tables were not preprocessed.
    /// * If any of the given start nodes does not exist in the graph.
    pub fn walk_from(&self, starts: &[NodeT], parameters: &WalksParameters) -> Result<Walks> {
        self.walk_with_interrupt(starts, parameters, None)
    }

    /// Return parallel iterator over the walks started from every node,
    /// without materializing them.
    ///
    /// This is the streaming entry point consumers should prefer when the
    /// full walk tensor would not fit in memory; the walks are yielded in
    /// canonical (iteration, shuffled slot) order.
    ///
    /// # Arguments
    ///
    /// * `parameters`: &WalksParameters - The walks parameters.
    ///
    /// # Raises
    ///
    /// * If the transition tables were not preprocessed.
    pub fn par_iter_walks<'a>(
        &'a self,
        parameters: &WalksParameters,
    ) -> Result<impl IndexedParallelIterator<Item = Vec<NodeT>> + 'a> {
        let starts: Vec<NodeT> = (0..self.get_nodes_number()).collect();
        let transitions = self.validate_walk_request(&starts)?;
        let walk_length = parameters.walk_length;
        let random_state = parameters.random_state;
        let start_sequence = self.shuffled_start_sequence(&starts, parameters);
        Ok(start_sequence
            .into_par_iter()
            .enumerate()
            .map(move |(walk_index, start)| {
                let mut rng = SmallRng::seed_from_u64(task_seed(random_state, walk_index as u64));
                self.single_walk(transitions, start, walk_length, &mut rng)
            }))
    }

    /// Return walks started from the given nodes, stopping early when the
    /// given flag is raised.
    ///
    /// The flag is checked between walks, never within one: a partial walk
    /// is not a meaningful output. On cancellation the partial batch is
    /// discarded and an error is returned.
    ///
    /// # Arguments
    ///
    /// * `starts`: &[NodeT] - The nodes to start the walks from.
    /// * `parameters`: &WalksParameters - The walks parameters.
    /// * `interrupt`: Option<&AtomicBool> - Flag tripping the cancellation.
    pub fn walk_with_interrupt(
        &self,
        starts: &[NodeT],
        parameters: &WalksParameters,
        interrupt: Option<&AtomicBool>,
    ) -> Result<Walks> {
        let transitions = self.validate_walk_request(starts)?;
        let walk_length = parameters.walk_length;
        let random_state = parameters.random_state;
        let start_sequence = self.shuffled_start_sequence(starts, parameters);

        let total_walks = start_sequence.len();
        let pb = get_loading_bar(parameters.verbose, "Computing random walks", total_walks);

        // Every walk owns an RNG seeded from its canonical (iteration, slot)
        // position, so the output does not depend on the number of workers.
        let walks: Result<Vec<Vec<NodeT>>> = start_sequence
            .into_par_iter()
            .enumerate()
            .progress_with(pb)
            .map(|(walk_index, start)| {
                if let Some(interrupt) = interrupt {
                    if interrupt.load(Ordering::Relaxed) {
                        return Err("The random walks computation was cancelled.".to_string());
                    }
                }
                let mut rng = SmallRng::seed_from_u64(task_seed(random_state, walk_index as u64));
                Ok(self.single_walk(transitions, start, walk_length, &mut rng))
            })
            .collect();
        let walks = walks?;

        if !self.has_traps && transitions.is_complete() {
            let mut ids = Vec::with_capacity(total_walks * walk_length);
            for walk in walks {
                debug_assert_eq!(walk.len(), walk_length);
                ids.extend(walk);
            }
            Ok(Walks::Complete { ids, walk_length })
        } else {
            Ok(Walks::Ragged(walks))
        }
    }

    /// Check that the graph and the request allow walking, returning the
    /// preprocessed transition tables.
    fn validate_walk_request(&self, starts: &[NodeT]) -> Result<&WalkTransitions> {
        let transitions = self.transitions.as_ref().ok_or_else(|| {
            concat!(
                "The graph was not preprocessed for random walks. ",
                "Call the method preprocess_transitions before walking."
            )
            .to_string()
        })?;
        if starts.is_empty() {
            return Err("The list of start nodes is empty.".to_string());
        }
        if let Some(start) = starts
            .iter()
            .find(|start| **start >= self.get_nodes_number())
        {
            return Err(format!(
                "The start node ID {} does not exist in the graph, which has {} nodes.",
                start,
                self.get_nodes_number()
            ));
        }
        Ok(transitions)
    }

    /// Return the flattened start sequence of the whole batch: one shuffled
    /// copy of the start list per iteration.
    ///
    /// Exposing the starts in varied positions balances the load across
    /// workers and varies the windowing position of every node downstream.
    fn shuffled_start_sequence(
        &self,
        starts: &[NodeT],
        parameters: &WalksParameters,
    ) -> Vec<NodeT> {
        let mut start_sequence = Vec::with_capacity(parameters.iterations * starts.len());
        for iteration in 0..parameters.iterations {
            let mut order = starts.to_vec();
            let mut iteration_rng = SmallRng::seed_from_u64(task_seed(
                parameters.random_state,
                u64::max_value() - iteration as u64,
            ));
            order.shuffle(&mut iteration_rng);
            start_sequence.extend(order);
        }
        start_sequence
    }

    /// Execute a single walk from the given start node.
    ///
    /// The first step samples the per-node table of the start; every later
    /// step samples the per-edge table of the edge the walker just
    /// traversed. A node without outbound edges, or whose table was skipped
    /// during preprocessing, truncates the walk.
    fn single_walk(
        &self,
        transitions: &WalkTransitions,
        start: NodeT,
        walk_length: usize,
        rng: &mut SmallRng,
    ) -> Vec<NodeT> {
        let mut walk = Vec::with_capacity(walk_length);
        walk.push(start);

        let table = match &transitions.node_aliases[start] {
            Some(table) => table,
            None => return walk,
        };
        let (min_edge, _) = self.get_min_max_edge(start);
        walk.push(self.destinations[min_edge + table.sample(rng)]);

        while walk.len() < walk_length {
            let cur = walk[walk.len() - 1];
            let prev = walk[walk.len() - 2];
            // The edge (prev, cur) was just traversed, so the lookup can
            // only fail on a corrupted graph.
            let edge_id = match self.get_edge_id(prev, cur) {
                Some(edge_id) => edge_id,
                None => break,
            };
            let table = match &transitions.edge_aliases[edge_id] {
                Some(table) => table,
                None => break,
            };
            let (min_edge, _) = self.get_min_max_edge(cur);
            walk.push(self.destinations[min_edge + table.sample(rng)]);
        }
        walk
    }
}
