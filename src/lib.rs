//! Biased second-order random walks over large, possibly heterogeneous graphs.
//!
//! The crate is organized as a strict two-phase pipeline: a graph is built
//! once from an edge list into an immutable CSR store, the transition
//! distributions of the walker are precomputed into alias tables, and walks
//! are then sampled from those tables, in parallel, any number of times.
//! Downstream consumers turn the walk stream into co-occurrence corpora for
//! embedding models.
#![warn(unused_macros)]

mod alias;
mod builder;
mod constructors;
mod graph;
mod hash;
mod preprocessing;
pub mod test_utilities;
mod transition;
mod types;
mod utils;
mod vocabulary;
mod walks;

pub use self::alias::AliasTable;
pub use self::builder::GraphBuilder;
pub use self::graph::Graph;
pub use self::preprocessing::word2vec;
pub use self::transition::{
    TransitionMode, TransitionParameters, TransitionsReport, WalkTransitions,
};
pub use self::types::*;
pub use self::vocabulary::{NodeTypeVocabulary, Vocabulary};
pub use self::walks::{Walks, WalksParameters};
pub(crate) use self::utils::*;
