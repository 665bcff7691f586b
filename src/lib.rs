// SPDX-License-Identifier: MIT OR Apache-2.0

//! `scoped-rbac` verifies and maintains a time-scoped role-based access-control policy.
//!
//! A [`Policy`] relates five kinds of entity — intervals, subjects, roles, demarcations and
//! permissions — through eight bidirectional assignment relations, and maintains three derived
//! connectivity graphs (`G_P`, `G_D`, `G_R`) as a function of those relations. Every mutation is
//! checked against four connectivity invariants before being applied; a mutation that would break
//! one is rejected with a [`PolicyError`] carrying a concrete witness, and has no effect on the
//! policy.
//!
//! ```
//! use scoped_rbac::Policy;
//!
//! let mut policy: Policy<&str> = Policy::new();
//! policy.add_permission("read-files");
//! policy.add_demarcation("file-access");
//! policy.add_role("auditor");
//! policy.add_subject("alice");
//! policy.add_interval("q1-2026");
//!
//! policy.assign_permission_to_demarcation(&"read-files", &"file-access").unwrap();
//! policy.assign_demarcation_to_role(&"file-access", &"auditor").unwrap();
//! policy.assign_role_to_interval(&"auditor", &"q1-2026").unwrap();
//! policy.assign_role_to_subject(&"auditor", &"alice").unwrap();
//! ```

pub mod checker;
pub mod derived;
mod export;
pub mod graph;
pub mod ids;
mod error;
mod policy;
pub mod registry;

pub use derived::GraphKind;
pub use error::{PolicyError, Witness};
pub use export::GraphSnapshot;
pub use ids::EntityId;
pub use policy::Policy;
pub use registry::EntityKind;
