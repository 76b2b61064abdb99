//! # atlas_graph
//!
//! The authoring-level node-graph IR ([`Graph`]) that [`atlas_vm`]'s
//! compiler lowers into bytecode. Pure data — no behavior beyond field
//! access.
//!
//! The entry point indicates where a future graph evaluator should begin;
//! the current compiler emits nodes in their stored sequence regardless of
//! `entry` or `edges`. `edges` are retained for a future evaluator and are
//! advisory only.

use serde::{Deserialize, Serialize};

/// A node identifier within a [`Graph`].
pub type NodeId = u32;

/// The kind of operation a [`Node`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    /// Pushes `constant_value` onto the VM stack.
    Constant,
    /// Pops two values, pushes their sum.
    Add,
    /// Pops two values, pushes their difference.
    Sub,
    /// Pops two values, pushes their product.
    Mul,
    /// Pops two values, pushes their quotient (0 on division by zero).
    Div,
    /// Pops two values, pushes `1` if the first is less than the second.
    CompareLT,
    /// Conditionally jumps based on the top of stack.
    Branch,
    /// Emits an event tagged with `constant_value`.
    Event,
}

/// A single node in a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// The node's identifier, unique within its graph.
    pub id: NodeId,
    /// The node's operation kind.
    pub node_type: NodeType,
    /// The constant payload (meaningful only for `Constant` and `Event`
    /// nodes; ignored otherwise).
    pub constant_value: i64,
}

/// A directed edge between two nodes. Currently advisory — execution order
/// follows node order in [`Graph::nodes`], not the edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// The source node id.
    pub from: NodeId,
    /// The destination node id.
    pub to: NodeId,
}

/// An in-memory node graph: the authoring-level representation a
/// [`atlas_vm::GraphCompiler`] lowers to bytecode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    /// Nodes in stored (compilation) order.
    pub nodes: Vec<Node>,
    /// Advisory edges; reserved for a future evaluator.
    pub edges: Vec<Edge>,
    /// The designated entry node id. Reserved; the compiler does not
    /// currently consult it.
    pub entry: NodeId,
}

impl Graph {
    /// Creates an empty graph with `entry` defaulted to `0`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_graph_is_empty() {
        let graph = Graph::new();
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
        assert_eq!(graph.entry, 0);
    }

    #[test]
    fn node_serialization_roundtrip() {
        let node = Node {
            id: 3,
            node_type: NodeType::Mul,
            constant_value: 0,
        };
        let bytes = rmp_serde::to_vec(&node).unwrap();
        let restored: Node = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(node, restored);
    }
}
