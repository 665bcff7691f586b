// SPDX-License-Identifier: MIT OR Apache-2.0

//! The four `assign_*` operations: extend an assignment relation by one pair, rejecting the
//! mutation if it would break invariant 1, 2 or 3.

use crate::checker::support_exists;
use crate::derived::DerivedGraphs;
use crate::error::{PolicyError, Witness};
use crate::ids::EntityId;
use crate::registry::Registry;

pub fn permission_to_demarcation<T: EntityId>(
    registry: &mut Registry<T>,
    derived: &mut DerivedGraphs<T>,
    p: &T,
    d: &T,
) -> Result<(), PolicyError<T>> {
    if registry.dp(d).contains(p) {
        return Ok(());
    }

    let existing = registry.dp(d).clone();
    if !support_exists(&derived.gp, p, existing.iter()) && !existing.is_empty() {
        return Err(PolicyError::ConnectivityViolation {
            invariant: 3,
            witness: Witness::Permissions {
                demarcation: d.clone(),
                permissions: existing.into_iter().collect(),
            },
        });
    }

    let mut candidates = registry.pd(p).clone();
    for q in derived.gp.neighbors(p).cloned().collect::<Vec<_>>() {
        candidates.extend(registry.pd(&q).iter().cloned());
    }
    candidates.remove(d);

    let mut newly_linked = Vec::new();
    for d2 in candidates {
        if !derived.gd.has_edge(d, &d2) {
            newly_linked.push(d2.clone());
        }
        derived.gd.add_edge(d.clone(), d2);
    }

    for d2 in &newly_linked {
        for r1 in registry.dr(d).clone() {
            for r2 in registry.dr(d2).clone() {
                derived.gr.add_edge(r1.clone(), r2.clone());
            }
        }
    }

    registry.link_dp(d.clone(), p.clone());
    Ok(())
}

pub fn demarcation_to_role<T: EntityId>(
    registry: &mut Registry<T>,
    derived: &mut DerivedGraphs<T>,
    d: &T,
    r: &T,
) -> Result<(), PolicyError<T>> {
    if registry.rd(r).contains(d) {
        return Ok(());
    }

    let existing = registry.rd(r).clone();
    if !existing.is_empty() && !support_exists(&derived.gd, d, existing.iter()) {
        return Err(PolicyError::ConnectivityViolation {
            invariant: 2,
            witness: Witness::Demarcations {
                role: r.clone(),
                demarcations: existing.into_iter().collect(),
            },
        });
    }

    let mut candidates = registry.dr(d).clone();
    for d2 in derived.gd.neighbors(d).cloned().collect::<Vec<_>>() {
        candidates.extend(registry.dr(&d2).iter().cloned());
    }
    candidates.remove(r);

    for r2 in candidates {
        derived.gr.add_edge(r.clone(), r2);
    }

    registry.link_rd(r.clone(), d.clone());
    Ok(())
}

pub fn role_to_interval<T: EntityId>(
    registry: &mut Registry<T>,
    derived: &mut DerivedGraphs<T>,
    r: &T,
    i: &T,
) -> Result<(), PolicyError<T>> {
    if registry.ri(r).contains(i) {
        return Ok(());
    }

    for s in registry.rs(r).clone() {
        let mut candidate = registry.enabled_roles(&s, i);
        candidate.insert(r.clone());
        if !derived.gr.induced_is_connected(candidate.iter()) {
            return Err(PolicyError::ConnectivityViolation {
                invariant: 1,
                witness: Witness::Roles {
                    subject: s,
                    interval: i.clone(),
                    roles: candidate.into_iter().collect(),
                },
            });
        }
    }

    registry.link_ir(i.clone(), r.clone());
    Ok(())
}

pub fn role_to_subject<T: EntityId>(
    registry: &mut Registry<T>,
    derived: &mut DerivedGraphs<T>,
    r: &T,
    s: &T,
) -> Result<(), PolicyError<T>> {
    if registry.sr(s).contains(r) {
        return Ok(());
    }

    for i in registry.ri(r).clone() {
        let mut candidate = registry.enabled_roles(s, &i);
        candidate.insert(r.clone());
        if !derived.gr.induced_is_connected(candidate.iter()) {
            return Err(PolicyError::ConnectivityViolation {
                invariant: 1,
                witness: Witness::Roles {
                    subject: s.clone(),
                    interval: i,
                    roles: candidate.into_iter().collect(),
                },
            });
        }
    }

    registry.link_sr(s.clone(), r.clone());
    Ok(())
}
