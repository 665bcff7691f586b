// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generic interfaces required by `scoped-rbac` data-types.

use std::fmt::Debug;
use std::hash::Hash as StdHash;

/// Marker trait for an opaque entity identifier.
///
/// Every interval, subject, role, demarcation and permission in a [`Policy`](crate::Policy) is
/// addressed by a value implementing this trait. `Ord` is required (stronger than plain
/// hashability) so that registry and graph iteration order is deterministic: witnesses attached
/// to a [`PolicyError`](crate::PolicyError) are reproducible run to run, as required of a
/// connectivity checker whose error messages golden-output tests may assert against.
pub trait EntityId: Clone + Debug + Eq + StdHash + Ord {}

impl EntityId for String {}
impl EntityId for &'static str {}
impl EntityId for u32 {}
impl EntityId for u64 {}
impl EntityId for usize {}
