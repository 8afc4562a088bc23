//! Bidirectional mappings between string identifiers and dense numeric ids.
use super::*;
use hashbrown::HashMap;

/// A bidirectional dictionary mapping terms to dense numeric ids.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vocabulary<IndexT: ToFromUsize> {
    pub(crate) map: HashMap<String, IndexT>,
    pub(crate) reverse_map: Vec<String>,
}

impl<IndexT: ToFromUsize + Copy + Eq> Vocabulary<IndexT> {
    pub fn new() -> Vocabulary<IndexT> {
        Vocabulary {
            map: HashMap::new(),
            reverse_map: Vec::new(),
        }
    }

    /// Insert the given term, returning its id and whether it was already present.
    ///
    /// # Arguments
    ///
    /// * `value`: &str - The term to insert.
    pub fn insert(&mut self, value: &str) -> Result<(IndexT, bool)> {
        if value.is_empty() {
            return Err("The provided term is an empty string.".to_string());
        }
        if let Some(index) = self.map.get(value) {
            return Ok((*index, true));
        }
        let index = IndexT::from_usize(self.reverse_map.len());
        self.map.insert(value.to_string(), index);
        self.reverse_map.push(value.to_string());
        Ok((index, false))
    }

    /// Return the id associated with the given term, if any.
    pub fn get(&self, value: &str) -> Option<&IndexT> {
        self.map.get(value)
    }

    /// Return the term associated with the given id.
    ///
    /// # Arguments
    ///
    /// * `index`: IndexT - The id whose term is to be returned.
    pub fn translate(&self, index: IndexT) -> Result<&str> {
        self.reverse_map
            .get(IndexT::to_usize(index))
            .map(|term| term.as_str())
            .ok_or_else(|| {
                format!(
                    "The index {} is not present in the vocabulary, which has {} terms.",
                    IndexT::to_usize(index),
                    self.reverse_map.len()
                )
            })
    }

    /// Return the term associated with the given id, panicking on unknown ids.
    pub(crate) fn unchecked_translate(&self, index: IndexT) -> &str {
        &self.reverse_map[IndexT::to_usize(index)]
    }

    pub fn contains_key(&self, value: &str) -> bool {
        self.map.contains_key(value)
    }

    pub fn len(&self) -> usize {
        self.reverse_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reverse_map.is_empty()
    }

    /// Return the forward map as a standard hash map.
    pub fn to_map(&self) -> std::collections::HashMap<String, IndexT> {
        self.map
            .iter()
            .map(|(term, index)| (term.clone(), *index))
            .collect()
    }

    /// Return the reverse map, where position equals id.
    pub fn reverse_map(&self) -> &[String] {
        &self.reverse_map
    }
}

/// Node types of a graph: one small-cardinality tag per node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeTypeVocabulary {
    /// Node type id of each node, indexed by node id.
    pub(crate) ids: Vec<NodeTypeT>,
    /// Mapping between node type names and node type ids.
    pub(crate) vocabulary: Vocabulary<NodeTypeT>,
    /// Number of nodes of each node type, indexed by node type id.
    pub(crate) counts: Vec<NodeT>,
}

impl NodeTypeVocabulary {
    /// Build the vocabulary from the type name of every node, in node id order.
    ///
    /// # Arguments
    ///
    /// * `node_type_names`: Vec<String> - Type name of each node.
    pub(crate) fn from_type_names(node_type_names: Vec<String>) -> Result<NodeTypeVocabulary> {
        let mut vocabulary = Vocabulary::new();
        let mut ids = Vec::with_capacity(node_type_names.len());
        for type_name in node_type_names {
            let (type_id, _) = vocabulary.insert(&type_name)?;
            ids.push(type_id);
        }
        let mut counts = vec![0 as NodeT; vocabulary.len()];
        for type_id in &ids {
            counts[NodeTypeT::to_usize(*type_id)] += 1;
        }
        Ok(NodeTypeVocabulary {
            ids,
            vocabulary,
            counts,
        })
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_roundtrip() {
        let mut vocabulary: Vocabulary<NodeT> = Vocabulary::new();
        let (first, was_present) = vocabulary.insert("g0").unwrap();
        assert!(!was_present);
        assert_eq!(first, 0);
        let (again, was_present) = vocabulary.insert("g0").unwrap();
        assert!(was_present);
        assert_eq!(again, first);
        let (second, _) = vocabulary.insert("p1").unwrap();
        assert_eq!(second, 1);
        assert_eq!(vocabulary.translate(0).unwrap(), "g0");
        assert_eq!(vocabulary.translate(1).unwrap(), "p1");
        assert!(vocabulary.translate(2).is_err());
        assert!(vocabulary.insert("").is_err());
    }

    #[test]
    fn test_node_type_counts() {
        let types = NodeTypeVocabulary::from_type_names(vec![
            "g".to_string(),
            "g".to_string(),
            "p".to_string(),
        ])
        .unwrap();
        assert_eq!(types.len(), 2);
        assert_eq!(types.counts, vec![2, 1]);
        assert_eq!(types.ids, vec![0, 0, 1]);
    }
}
