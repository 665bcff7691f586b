// SPDX-License-Identifier: MIT OR Apache-2.0

//! Owns the three derived connectivity graphs and the handful of node-level operations that
//! don't require cross-graph bookkeeping. The edge-update rules of §3.3 (what makes `G_D` and
//! `G_R` edges appear or disappear as a function of the assignment relations) live in
//! [`crate::policy`] alongside the relation updates they're inseparable from.

use crate::graph::Graph;
use crate::ids::EntityId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GraphKind {
    Role,
    Demarcation,
    Permission,
}

#[derive(Clone, Debug, Default)]
pub struct DerivedGraphs<T: EntityId> {
    /// Nodes are permissions. Edges are externally supplied via
    /// [`Policy::seed_permission_edge`](crate::Policy::seed_permission_edge); the core itself
    /// only ever adds isolated permission nodes.
    pub gp: Graph<T>,
    /// Nodes are demarcations. Edges are a deterministic function of `DP`/`PD` and `G_P`.
    pub gd: Graph<T>,
    /// Nodes are roles. Edges are a deterministic function of `RD`/`DR` and `G_D`.
    pub gr: Graph<T>,
}

impl<T: EntityId> DerivedGraphs<T> {
    pub fn new() -> Self {
        Self {
            gp: Graph::new(),
            gd: Graph::new(),
            gr: Graph::new(),
        }
    }

    pub fn graph(&self, which: GraphKind) -> &Graph<T> {
        match which {
            GraphKind::Role => &self.gr,
            GraphKind::Demarcation => &self.gd,
            GraphKind::Permission => &self.gp,
        }
    }
}
