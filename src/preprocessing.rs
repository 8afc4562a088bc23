//! Extraction of training corpora from the walks.
use super::*;
use hashbrown::HashMap;
use rayon::prelude::*;

/// Return training windows for Word2Vec-family models.
///
/// Every returned tuple pairs the context node IDs surrounding a position
/// with the central node ID at that position. Only positions with a full
/// window on both sides are emitted, so sequences shorter than
/// `window_size * 2 + 1` produce nothing.
///
/// # Arguments
///
/// * `sequences`: impl ParallelIterator<Item = Vec<NodeT>> - The sequences to window over.
/// * `window_size`: usize - Radius of the window around each central node.
pub fn word2vec<'a>(
    sequences: impl ParallelIterator<Item = Vec<NodeT>> + 'a,
    window_size: usize,
) -> impl ParallelIterator<Item = (Vec<NodeT>, NodeT)> + 'a {
    sequences.flat_map_iter(move |sequence| {
        let upper_bound = sequence.len().saturating_sub(window_size);
        (window_size..upper_bound.max(window_size)).map(move |i| {
            (
                (i - window_size..i)
                    .chain(i + 1..window_size + i + 1)
                    .map(|j| sequence[j])
                    .collect(),
                sequence[i],
            )
        })
    })
}

/// # Preprocessing for ML algorithms on graph.
impl Graph {
    /// Return training windows for Node2Vec models over the graph walks.
    ///
    /// # Arguments
    ///
    /// * `walks_parameters`: &WalksParameters - The walks parameters.
    /// * `window_size`: usize - Radius of the window around each central node.
    ///
    /// # Raises
    ///
    /// * If the transition tables were not preprocessed.
    /// * If the window size is zero.
    pub fn node2vec(
        &self,
        walks_parameters: &WalksParameters,
        window_size: usize,
    ) -> Result<Vec<(Vec<NodeT>, NodeT)>> {
        validate_window_size(window_size)?;
        Ok(word2vec(self.par_iter_walks(walks_parameters)?, window_size).collect())
    }

    /// Return the co-occurrence triples observed over the graph walks.
    ///
    /// The three returned vectors have equal length and hold, per observed
    /// pair, the central node ID, the context node ID and the number of
    /// times the context appeared within the symmetric window of the
    /// central node. Pairs of a node with itself are not counted. The
    /// triples are sorted by central and then context node ID, so equal
    /// inputs yield byte-identical outputs.
    ///
    /// # Arguments
    ///
    /// * `walks_parameters`: &WalksParameters - The walks parameters.
    /// * `window_size`: usize - Radius of the symmetric window.
    ///
    /// # Raises
    ///
    /// * If the transition tables were not preprocessed.
    /// * If the window size is zero.
    pub fn cooccurence_matrix(
        &self,
        walks_parameters: &WalksParameters,
        window_size: usize,
    ) -> Result<(Vec<NodeT>, Vec<NodeT>, Vec<u64>)> {
        validate_window_size(window_size)?;
        // The walks are consumed as a stream: worker-local maps sidestep
        // both the contention of a shared accumulator and the memory of a
        // materialized walk tensor.
        let matrix: HashMap<(NodeT, NodeT), u64> = self
            .par_iter_walks(walks_parameters)?
            .fold(HashMap::new, |mut local: HashMap<(NodeT, NodeT), u64>, sequence| {
                for (position, central) in sequence.iter().copied().enumerate() {
                    let upper_bound = (position + window_size + 1).min(sequence.len());
                    for context in sequence[position + 1..upper_bound].iter().copied() {
                        if central == context {
                            continue;
                        }
                        *local.entry((central, context)).or_insert(0) += 1;
                        *local.entry((context, central)).or_insert(0) += 1;
                    }
                }
                local
            })
            .reduce(HashMap::new, |mut merged, local| {
                for (pair, count) in local {
                    *merged.entry(pair).or_insert(0) += count;
                }
                merged
            });

        let mut triples: Vec<((NodeT, NodeT), u64)> = matrix.into_iter().collect();
        triples.par_sort_unstable_by_key(|(pair, _)| *pair);

        let mut central_ids = Vec::with_capacity(triples.len());
        let mut context_ids = Vec::with_capacity(triples.len());
        let mut frequencies = Vec::with_capacity(triples.len());
        for ((central, context), count) in triples {
            central_ids.push(central);
            context_ids.push(context);
            frequencies.push(count);
        }
        Ok((central_ids, context_ids, frequencies))
    }
}

fn validate_window_size(window_size: usize) -> Result<()> {
    if window_size == 0 {
        return Err("The window size must be at least one.".to_string());
    }
    Ok(())
}
