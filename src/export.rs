// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only export of a derived connectivity graph as a [`petgraph`] value, for callers that
//! want to run their own graph algorithms (layout, shortest path, community detection) over the
//! policy's connectivity structure rather than the bespoke [`Graph`](crate::graph::Graph)
//! adjacency map.

use petgraph::graph::{NodeIndex, UnGraph};

use crate::derived::GraphKind;
use crate::graph::Graph;
use crate::ids::EntityId;
use crate::policy::Policy;

/// A snapshot of one derived graph, indexed by the same entity identifiers the policy uses.
///
/// This is the opaque serialization hook the export adapter consumes: the core owes a faithful
/// graph value, nothing about on-disk format.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphSnapshot<T: EntityId> {
    pub kind: GraphKind,
    pub graph: UnGraph<T, ()>,
}

impl<T: EntityId> GraphSnapshot<T> {
    fn from_graph(kind: GraphKind, source: &Graph<T>) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut index_of = std::collections::BTreeMap::new();
        for node in source.nodes() {
            let idx: NodeIndex = graph.add_node(node.clone());
            index_of.insert(node.clone(), idx);
        }
        for node in source.nodes() {
            for neighbor in source.neighbors(node) {
                if node <= neighbor {
                    graph.update_edge(index_of[node], index_of[neighbor], ());
                }
            }
        }
        Self { kind, graph }
    }
}

impl<T: EntityId> Policy<T> {
    /// Export `which` derived graph as a `petgraph` undirected graph over the same identifiers.
    pub fn export_graph(&self, which: GraphKind) -> GraphSnapshot<T> {
        GraphSnapshot::from_graph(which, self.graph(which))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_preserves_nodes_and_edges() {
        let mut policy: Policy<&str> = Policy::new();
        policy.add_permission("p1");
        policy.add_permission("p2");
        policy.seed_permission_edge(&"p1", &"p2").unwrap();

        let snapshot = policy.export_graph(GraphKind::Permission);
        assert_eq!(snapshot.graph.node_count(), 2);
        assert_eq!(snapshot.graph.edge_count(), 1);
    }
}
