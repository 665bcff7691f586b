// SPDX-License-Identifier: MIT OR Apache-2.0

//! The five `remove_*` operations: delete an entity outright, together with every relation and
//! derived-graph edge that depended on it.
//!
//! Unlike `retract_*`, which removes one pair from a relation, these remove an entire node from
//! the registry and (for demarcations and permissions) from the graph that node anchors. Any
//! derived edge whose sole support ran through the removed node is cut as part of the same
//! mutation.

use std::collections::BTreeSet;

use crate::checker::sets_linked;
use crate::derived::DerivedGraphs;
use crate::error::{PolicyError, Witness};
use crate::ids::EntityId;
use crate::registry::Registry;

pub fn interval<T: EntityId>(registry: &mut Registry<T>, i: &T) -> Result<(), PolicyError<T>> {
    registry.remove_interval(i);
    Ok(())
}

pub fn subject<T: EntityId>(registry: &mut Registry<T>, s: &T) -> Result<(), PolicyError<T>> {
    registry.remove_subject(s);
    Ok(())
}

pub fn role<T: EntityId>(
    registry: &mut Registry<T>,
    derived: &mut DerivedGraphs<T>,
    r: &T,
) -> Result<(), PolicyError<T>> {
    for i in registry.ri(r).clone() {
        for s in registry.rs(r).clone() {
            let mut candidate = registry.enabled_roles(&s, &i);
            candidate.remove(r);
            if !derived.gr.induced_is_connected(candidate.iter()) {
                return Err(PolicyError::ConnectivityViolation {
                    invariant: 1,
                    witness: Witness::Roles {
                        subject: s,
                        interval: i,
                        roles: candidate.into_iter().collect(),
                    },
                });
            }
        }
    }

    derived.gr.remove_node(r);
    registry.remove_role(r);
    Ok(())
}

pub fn demarcation<T: EntityId>(
    registry: &mut Registry<T>,
    derived: &mut DerivedGraphs<T>,
    d: &T,
) -> Result<(), PolicyError<T>> {
    for r in registry.dr(d).clone() {
        let mut rd_minus: BTreeSet<T> = registry.rd(&r).clone();
        rd_minus.remove(d);
        if !derived.gd.induced_is_connected(rd_minus.iter()) {
            return Err(PolicyError::ConnectivityViolation {
                invariant: 2,
                witness: Witness::Demarcations {
                    role: r,
                    demarcations: rd_minus.into_iter().collect(),
                },
            });
        }
    }

    let roles: Vec<T> = registry.dr(d).iter().cloned().collect();
    for idx in 0..roles.len() {
        for jdx in (idx + 1)..roles.len() {
            let r1 = &roles[idx];
            let r2 = &roles[jdx];
            if !derived.gr.has_edge(r1, r2) {
                continue;
            }
            let mut rd1: BTreeSet<T> = registry.rd(r1).clone();
            rd1.remove(d);
            let mut rd2: BTreeSet<T> = registry.rd(r2).clone();
            rd2.remove(d);
            if !sets_linked(&derived.gd, rd1.iter(), rd2.iter()) {
                derived.gr.remove_edge(r1, r2);
            }
        }
    }

    derived.gd.remove_node(d);

    for r in registry.dr(d).clone() {
        for i in registry.ri(&r).clone() {
            for s in registry.rs(&r).clone() {
                let mut candidate = registry.enabled_roles(&s, &i);
                candidate.remove(&r);
                if !derived.gr.induced_is_connected(candidate.iter()) {
                    return Err(PolicyError::ConnectivityViolation {
                        invariant: 1,
                        witness: Witness::Roles {
                            subject: s,
                            interval: i,
                            roles: candidate.into_iter().collect(),
                        },
                    });
                }
            }
        }
    }

    registry.remove_demarcation(d);
    Ok(())
}

pub fn permission<T: EntityId>(
    registry: &mut Registry<T>,
    derived: &mut DerivedGraphs<T>,
    p: &T,
) -> Result<(), PolicyError<T>> {
    let affected: BTreeSet<T> = registry.pd(p).clone();

    for d in &affected {
        let mut dp_minus: BTreeSet<T> = registry.dp(d).clone();
        dp_minus.remove(p);
        if !derived.gp.induced_is_connected(dp_minus.iter()) {
            return Err(PolicyError::ConnectivityViolation {
                invariant: 3,
                witness: Witness::Permissions {
                    demarcation: d.clone(),
                    permissions: dp_minus.into_iter().collect(),
                },
            });
        }
    }

    let mut cut_edges = Vec::new();
    for d1 in &affected {
        for d2 in derived.gd.neighbors(d1).cloned().collect::<Vec<_>>() {
            let pair = if *d1 <= d2 {
                (d1.clone(), d2.clone())
            } else {
                (d2.clone(), d1.clone())
            };
            if cut_edges.contains(&pair) {
                continue;
            }

            let dp1: BTreeSet<T> = if affected.contains(&pair.0) {
                let mut s = registry.dp(&pair.0).clone();
                s.remove(p);
                s
            } else {
                registry.dp(&pair.0).clone()
            };
            let dp2: BTreeSet<T> = if affected.contains(&pair.1) {
                let mut s = registry.dp(&pair.1).clone();
                s.remove(p);
                s
            } else {
                registry.dp(&pair.1).clone()
            };

            if !sets_linked(&derived.gp, dp1.iter(), dp2.iter()) {
                cut_edges.push(pair);
            }
        }
    }
    for (d1, d2) in &cut_edges {
        derived.gd.remove_edge(d1, d2);
    }

    for (d1, d2) in &cut_edges {
        for r1 in registry.dr(d1).clone() {
            for r2 in registry.dr(d2).clone() {
                if derived.gr.has_edge(&r1, &r2)
                    && !sets_linked(&derived.gd, registry.rd(&r1).iter(), registry.rd(&r2).iter())
                {
                    derived.gr.remove_edge(&r1, &r2);
                }
            }
        }
    }

    for d in &affected {
        for r in registry.dr(d).clone() {
            for i in registry.ri(&r).clone() {
                for s in registry.rs(&r).clone() {
                    let mut candidate = registry.enabled_roles(&s, &i);
                    candidate.remove(&r);
                    if !derived.gr.induced_is_connected(candidate.iter()) {
                        return Err(PolicyError::ConnectivityViolation {
                            invariant: 1,
                            witness: Witness::Roles {
                                subject: s,
                                interval: i,
                                roles: candidate.into_iter().collect(),
                            },
                        });
                    }
                }
            }
        }
    }

    derived.gp.remove_node(p);
    registry.remove_permission(p);
    Ok(())
}
