//! Stable digest of a graph and its derived artifacts.
use super::*;
use xxhash_rust::xxh3::Xxh3;

const FIELD_SEPARATOR: [u8; 1] = [0xff];

/// # Consistent hashing.
impl Graph {
    /// Return a stable digest of the graph identity.
    ///
    /// The digest covers the directedness, the node mapping, the node
    /// types, every directed edge with its weight bits and, when built, the
    /// transition parameters and alias tables. Callers can key caches of
    /// derived artifacts on it: two identically-built graphs hash equal,
    /// while any difference in edges, weights, types, transition mode or
    /// built tables changes the digest.
    pub fn consistent_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.update(&[self.directed as u8]);

        for node_name in self.nodes.reverse_map() {
            hasher.update(node_name.as_bytes());
            hasher.update(&FIELD_SEPARATOR);
        }

        if let Some(node_types) = &self.node_types {
            for type_id in &node_types.ids {
                hasher.update(&type_id.to_le_bytes());
            }
            for type_name in node_types.vocabulary.reverse_map() {
                hasher.update(type_name.as_bytes());
                hasher.update(&FIELD_SEPARATOR);
            }
        }

        for (edge_id, (src, dst)) in self.iter_edges().enumerate() {
            hasher.update(&(src as u64).to_le_bytes());
            hasher.update(&(dst as u64).to_le_bytes());
            hasher.update(&self.weights[edge_id].to_bits().to_le_bytes());
        }

        if let Some(transitions) = &self.transitions {
            hasher.update(&transitions.parameters.p.to_bits().to_le_bytes());
            hasher.update(&transitions.parameters.q.to_bits().to_le_bytes());
            match transitions.parameters.mode {
                TransitionMode::Homogeneous => hasher.update(&[0u8]),
                TransitionMode::Heterogeneous { gamma } => {
                    hasher.update(&[1u8]);
                    hasher.update(&gamma.to_bits().to_le_bytes());
                }
            }
            for tables in &[&transitions.node_aliases, &transitions.edge_aliases] {
                for table in tables.iter() {
                    match table {
                        Some(table) => {
                            for alias in table.aliases() {
                                hasher.update(&(*alias as u64).to_le_bytes());
                            }
                            for threshold in table.thresholds() {
                                hasher.update(&threshold.to_bits().to_le_bytes());
                            }
                        }
                        None => hasher.update(&FIELD_SEPARATOR),
                    }
                }
            }
        }

        hasher.digest()
    }
}
