//! The append-only node/relationship accumulator.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use super::edges::{Relationship, RelationshipType};
use super::nodes::{Node, NodeType};
use super::{EdgeCategory, NodeCategory};

/// Nodes and relationships collected by one analysis run.
#[derive(Debug, Clone, Default)]
pub struct ArchitectureGraph {
    nodes: Vec<Node>,
    node_index: HashMap<String, usize>,
    relationships: Vec<Relationship>,
    seen_relationships: HashSet<Relationship>,
}

impl ArchitectureGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node unless one with the same id exists.
    ///
    /// Returns `true` if the node was inserted. An existing node is never
    /// replaced.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.node_index.contains_key(&node.id) {
            return false;
        }
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    /// Add a relationship unless an identical one exists.
    pub fn add_relationship(&mut self, relationship: Relationship) -> bool {
        if self.seen_relationships.contains(&relationship) {
            return false;
        }
        self.seen_relationships.insert(relationship.clone());
        self.relationships.push(relationship);
        true
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Relationships in insertion order.
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.relationships.is_empty()
    }

    /// Append everything from `other`, keeping existing nodes on id clashes.
    pub fn merge(&mut self, other: ArchitectureGraph) {
        for node in other.nodes {
            self.add_node(node);
        }
        for rel in other.relationships {
            self.add_relationship(rel);
        }
    }

    /// Relationships whose endpoints are not in the node set.
    pub fn dangling_relationships(&self) -> Vec<&Relationship> {
        self.relationships
            .iter()
            .filter(|r| !self.contains_node(&r.from_id) || !self.contains_node(&r.to_id))
            .collect()
    }

    /// Counts per node and relationship type.
    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats {
            total_nodes: self.nodes.len(),
            total_relationships: self.relationships.len(),
            ..GraphStats::default()
        };
        for node in &self.nodes {
            *stats.nodes_by_type.entry(node.node_type).or_insert(0) += 1;
        }
        for rel in &self.relationships {
            *stats.relationships_by_type.entry(rel.rel_type).or_insert(0) += 1;
        }
        stats
    }
}

/// Summary counts of a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_relationships: usize,
    pub nodes_by_type: BTreeMap<NodeType, usize>,
    pub relationships_by_type: BTreeMap<RelationshipType, usize>,
}

impl GraphStats {
    pub fn nodes_of(&self, node_type: NodeType) -> usize {
        self.nodes_by_type.get(&node_type).copied().unwrap_or(0)
    }

    pub fn relationships_of(&self, rel_type: RelationshipType) -> usize {
        self.relationships_by_type.get(&rel_type).copied().unwrap_or(0)
    }

    pub fn nodes_in(&self, category: NodeCategory) -> usize {
        self.nodes_by_type
            .iter()
            .filter(|(t, _)| t.category() == category)
            .map(|(_, n)| n)
            .sum()
    }

    pub fn relationships_in(&self, category: EdgeCategory) -> usize {
        self.relationships_by_type
            .iter()
            .filter(|(t, _)| t.category() == category)
            .map(|(_, n)| n)
            .sum()
    }
}

impl fmt::Display for GraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} nodes, {} relationships",
            self.total_nodes, self.total_relationships
        )?;
        for (node_type, count) in &self.nodes_by_type {
            writeln!(f, "  {:<26} {}", node_type.type_name(), count)?;
        }
        for (rel_type, count) in &self.relationships_by_type {
            writeln!(f, "  {:<34} {}", rel_type.relation_name(), count)?;
        }
        Ok(())
    }
}
