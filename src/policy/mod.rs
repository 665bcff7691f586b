// SPDX-License-Identifier: MIT OR Apache-2.0

//! The policy core: entity construction and the thirteen mutation operations, each of which
//! either commits in full or leaves the policy exactly as it was.
//!
//! Every mutating method below follows the same shape: clone the current `(registry, derived)`
//! pair, run the operation's checks-then-updates against the clone, and only swap the clone into
//! `self` once it has returned `Ok`. A rejected mutation therefore never has any observable
//! effect, satisfying the all-or-nothing requirement without hand-tracked undo lists.

mod assign;
mod remove;
mod retract;

use tracing::{debug, trace, warn};

use crate::derived::{DerivedGraphs, GraphKind};
use crate::error::PolicyError;
use crate::graph::Graph;
use crate::ids::EntityId;
use crate::registry::{EntityKind, Registry};

/// A time-scoped role-based access-control policy.
///
/// `T` is the opaque identifier type shared by every interval, subject, role, demarcation and
/// permission; see [`EntityId`].
#[derive(Clone, Debug, Default)]
pub struct Policy<T: EntityId> {
    registry: Registry<T>,
    derived: DerivedGraphs<T>,
}

impl<T: EntityId> Policy<T> {
    /// An empty policy: no entities, no relations, no derived edges.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            derived: DerivedGraphs::new(),
        }
    }

    /// Direct read access to the entity/relation store, for callers that want to inspect state
    /// without going through a dedicated accessor.
    pub fn registry(&self) -> &Registry<T> {
        &self.registry
    }

    /// The derived graph of `which` kind, for inspection or export.
    pub fn graph(&self, which: GraphKind) -> &Graph<T> {
        self.derived.graph(which)
    }

    // -- construction ------------------------------------------------------------------------

    /// Register a new interval. Returns `true` if it was newly added.
    pub fn add_interval(&mut self, i: T) -> bool {
        let added = self.registry.add_interval(i.clone());
        if added {
            trace!(interval = ?i, "added interval");
        }
        added
    }

    /// Register a new subject. Returns `true` if it was newly added.
    pub fn add_subject(&mut self, s: T) -> bool {
        let added = self.registry.add_subject(s.clone());
        if added {
            trace!(subject = ?s, "added subject");
        }
        added
    }

    /// Register a new role, as an isolated node of `G_R`. Returns `true` if it was newly added.
    pub fn add_role(&mut self, r: T) -> bool {
        let added = self.registry.add_role(r.clone());
        if added {
            self.derived.gr.add_node(r.clone());
            trace!(role = ?r, "added role");
        }
        added
    }

    /// Register a new demarcation, as an isolated node of `G_D`. Returns `true` if it was newly
    /// added.
    pub fn add_demarcation(&mut self, d: T) -> bool {
        let added = self.registry.add_demarcation(d.clone());
        if added {
            self.derived.gd.add_node(d.clone());
            trace!(demarcation = ?d, "added demarcation");
        }
        added
    }

    /// Register a new permission, as an isolated node of `G_P`. Returns `true` if it was newly
    /// added.
    pub fn add_permission(&mut self, p: T) -> bool {
        let added = self.registry.add_permission(p.clone());
        if added {
            self.derived.gp.add_node(p.clone());
            trace!(permission = ?p, "added permission");
        }
        added
    }

    /// Declare an edge of `G_P` between two existing permissions.
    ///
    /// `G_P` is the one derived graph this crate never computes on its own: its edges encode an
    /// externally supplied notion of permission proximity (e.g. two permissions that operate on
    /// the same resource). Callers seed it once up front, or incrementally as new proximity facts
    /// become known; every other derived edge in `G_D`/`G_R` follows deterministically from this
    /// seed plus the assignment relations.
    pub fn seed_permission_edge(&mut self, p1: &T, p2: &T) -> Result<(), PolicyError<T>> {
        self.ensure_permission(p1)?;
        self.ensure_permission(p2)?;
        self.derived.gp.add_edge(p1.clone(), p2.clone());
        debug!(p1 = ?p1, p2 = ?p2, "seeded permission edge");
        Ok(())
    }

    // -- assignment ----------------------------------------------------------------------------

    pub fn assign_permission_to_demarcation(&mut self, p: &T, d: &T) -> Result<(), PolicyError<T>> {
        self.ensure_permission(p)?;
        self.ensure_demarcation(d)?;
        self.commit(|registry, derived| assign::permission_to_demarcation(registry, derived, p, d))
    }

    pub fn assign_demarcation_to_role(&mut self, d: &T, r: &T) -> Result<(), PolicyError<T>> {
        self.ensure_demarcation(d)?;
        self.ensure_role(r)?;
        self.commit(|registry, derived| assign::demarcation_to_role(registry, derived, d, r))
    }

    pub fn assign_role_to_interval(&mut self, r: &T, i: &T) -> Result<(), PolicyError<T>> {
        self.ensure_role(r)?;
        self.ensure_interval(i)?;
        self.commit(|registry, derived| assign::role_to_interval(registry, derived, r, i))
    }

    pub fn assign_role_to_subject(&mut self, r: &T, s: &T) -> Result<(), PolicyError<T>> {
        self.ensure_role(r)?;
        self.ensure_subject(s)?;
        self.commit(|registry, derived| assign::role_to_subject(registry, derived, r, s))
    }

    // -- retraction ------------------------------------------------------------------------

    pub fn retract_role_from_interval(&mut self, r: &T, i: &T) -> Result<(), PolicyError<T>> {
        self.ensure_role(r)?;
        self.ensure_interval(i)?;
        self.commit(|registry, derived| retract::role_from_interval(registry, &*derived, r, i))
    }

    pub fn retract_role_from_subject(&mut self, r: &T, s: &T) -> Result<(), PolicyError<T>> {
        self.ensure_role(r)?;
        self.ensure_subject(s)?;
        self.commit(|registry, derived| retract::role_from_subject(registry, &*derived, r, s))
    }

    pub fn retract_demarcation_from_role(&mut self, d: &T, r: &T) -> Result<(), PolicyError<T>> {
        self.ensure_demarcation(d)?;
        self.ensure_role(r)?;
        self.commit(|registry, derived| retract::demarcation_from_role(registry, derived, d, r))
    }

    pub fn retract_permission_from_demarcation(&mut self, p: &T, d: &T) -> Result<(), PolicyError<T>> {
        self.ensure_permission(p)?;
        self.ensure_demarcation(d)?;
        self.commit(|registry, derived| retract::permission_from_demarcation(registry, derived, p, d))
    }

    // -- removal -------------------------------------------------------------------------------

    pub fn remove_interval(&mut self, i: &T) -> Result<(), PolicyError<T>> {
        self.ensure_interval(i)?;
        self.commit(|registry, _derived| remove::interval(registry, i))
    }

    pub fn remove_subject(&mut self, s: &T) -> Result<(), PolicyError<T>> {
        self.ensure_subject(s)?;
        self.commit(|registry, _derived| remove::subject(registry, s))
    }

    pub fn remove_role(&mut self, r: &T) -> Result<(), PolicyError<T>> {
        self.ensure_role(r)?;
        self.commit(|registry, derived| remove::role(registry, derived, r))
    }

    pub fn remove_demarcation(&mut self, d: &T) -> Result<(), PolicyError<T>> {
        self.ensure_demarcation(d)?;
        self.commit(|registry, derived| remove::demarcation(registry, derived, d))
    }

    /// Remove a permission entirely. Not named by the distilled operation set but implemented by
    /// direct analogy to [`Policy::remove_demarcation`] one layer down the hierarchy.
    pub fn remove_permission(&mut self, p: &T) -> Result<(), PolicyError<T>> {
        self.ensure_permission(p)?;
        self.commit(|registry, derived| remove::permission(registry, derived, p))
    }

    // -- internals -----------------------------------------------------------------------------

    /// Run `op` against a clone of the current state; only adopt the clone if `op` succeeds.
    fn commit<F>(&mut self, op: F) -> Result<(), PolicyError<T>>
    where
        F: FnOnce(&mut Registry<T>, &mut DerivedGraphs<T>) -> Result<(), PolicyError<T>>,
    {
        let mut registry = self.registry.clone();
        let mut derived = self.derived.clone();
        match op(&mut registry, &mut derived) {
            Ok(()) => {
                self.registry = registry;
                self.derived = derived;
                Ok(())
            }
            Err(err) => {
                warn!(%err, "mutation rejected");
                Err(err)
            }
        }
    }

    fn ensure_interval(&self, i: &T) -> Result<(), PolicyError<T>> {
        self.ensure(self.registry.has_interval(i), EntityKind::Interval, i)
    }
    fn ensure_subject(&self, s: &T) -> Result<(), PolicyError<T>> {
        self.ensure(self.registry.has_subject(s), EntityKind::Subject, s)
    }
    fn ensure_role(&self, r: &T) -> Result<(), PolicyError<T>> {
        self.ensure(self.registry.has_role(r), EntityKind::Role, r)
    }
    fn ensure_demarcation(&self, d: &T) -> Result<(), PolicyError<T>> {
        self.ensure(self.registry.has_demarcation(d), EntityKind::Demarcation, d)
    }
    fn ensure_permission(&self, p: &T) -> Result<(), PolicyError<T>> {
        self.ensure(self.registry.has_permission(p), EntityKind::Permission, p)
    }

    fn ensure(&self, present: bool, kind: EntityKind, id: &T) -> Result<(), PolicyError<T>> {
        if present {
            Ok(())
        } else {
            Err(PolicyError::UnknownEntity {
                kind,
                id: id.clone(),
            })
        }
    }
}
