// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error taxonomy for policy mutations.
//!
//! Mirrors the error-kind shape of `p2panda-auth`'s `GroupMembershipError`: one `thiserror` enum
//! carrying just enough structured data (offending entity, witness) to build a deterministic,
//! human-readable message without the caller needing to reach back into the policy state.

use std::fmt;

use thiserror::Error;

use crate::ids::EntityId;
use crate::registry::EntityKind;

/// A concrete witness demonstrating why a mutation was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Witness<T: EntityId> {
    /// Invariant 1: `E(s,i)` would not induce a connected subgraph of `G_R`.
    Roles {
        subject: T,
        interval: T,
        roles: Vec<T>,
    },
    /// Invariant 2: `RD[r]` would not induce a connected subgraph of `G_D`.
    Demarcations { role: T, demarcations: Vec<T> },
    /// Invariant 3: `DP[d]` would not induce a connected subgraph of `G_P`.
    Permissions { demarcation: T, permissions: Vec<T> },
}

impl<T: EntityId> fmt::Display for Witness<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Witness::Roles {
                subject,
                interval,
                roles,
            } => write!(
                f,
                "subject {subject:?} during interval {interval:?} would hold the disconnected role set {roles:?}"
            ),
            Witness::Demarcations { role, demarcations } => write!(
                f,
                "role {role:?} would hold the disconnected demarcation set {demarcations:?}"
            ),
            Witness::Permissions {
                demarcation,
                permissions,
            } => write!(
                f,
                "demarcation {demarcation:?} would grant the disconnected permission set {permissions:?}"
            ),
        }
    }
}

/// All possible errors that can occur when mutating a [`Policy`](crate::Policy).
#[derive(Debug, Error)]
pub enum PolicyError<T: EntityId> {
    /// One of invariants 1-3 (§3.4) would be violated by the proposed mutation.
    #[error("invariant {invariant} would be violated: {witness}")]
    ConnectivityViolation { invariant: u8, witness: Witness<T> },

    /// The operation referenced an id that is not in the registry.
    #[error("unknown {kind:?}: {id:?}")]
    UnknownEntity { kind: EntityKind, id: T },

    /// Adding an entity that already exists with different semantic state.
    ///
    /// Unreachable from the current eleven add operations (each carries no state beyond the id
    /// itself, so a re-add can never differ from the existing state); kept for completeness of
    /// the error taxonomy per spec.
    #[error("{kind:?} {id:?} already exists")]
    DuplicateEntity { kind: EntityKind, id: T },

    /// Retracting a relation that is not currently present.
    #[error("relation between {from:?} and {to:?} is not present")]
    RelationMissing { from: T, to: T },
}
