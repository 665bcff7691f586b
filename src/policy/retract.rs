// SPDX-License-Identifier: MIT OR Apache-2.0

//! The four `retract_*` operations: remove a single pair from an assignment relation, rejecting
//! the mutation if it would break invariant 1, 2 or 3, and otherwise cascading the `G_D`/`G_R`
//! edge updates the removed pair may have been the sole support for.

use crate::checker::sets_linked;
use crate::derived::DerivedGraphs;
use crate::error::{PolicyError, Witness};
use crate::ids::EntityId;
use crate::registry::Registry;

pub fn role_from_interval<T: EntityId>(
    registry: &mut Registry<T>,
    derived: &DerivedGraphs<T>,
    r: &T,
    i: &T,
) -> Result<(), PolicyError<T>> {
    if !registry.ri(r).contains(i) {
        return Err(PolicyError::RelationMissing {
            from: r.clone(),
            to: i.clone(),
        });
    }

    for s in registry.rs(r).clone() {
        let mut candidate = registry.enabled_roles(&s, i);
        candidate.remove(r);
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

    registry.unlink_ir(i, r);
    Ok(())
}

pub fn role_from_subject<T: EntityId>(
    registry: &mut Registry<T>,
    derived: &DerivedGraphs<T>,
    r: &T,
    s: &T,
) -> Result<(), PolicyError<T>> {
    if !registry.sr(s).contains(r) {
        return Err(PolicyError::RelationMissing {
            from: r.clone(),
            to: s.clone(),
        });
    }

    for i in registry.ri(r).clone() {
        let mut candidate = registry.enabled_roles(s, &i);
        candidate.remove(r);
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

    registry.unlink_sr(s, r);
    Ok(())
}

pub fn demarcation_from_role<T: EntityId>(
    registry: &mut Registry<T>,
    derived: &mut DerivedGraphs<T>,
    d: &T,
    r: &T,
) -> Result<(), PolicyError<T>> {
    if !registry.rd(r).contains(d) {
        return Err(PolicyError::RelationMissing {
            from: d.clone(),
            to: r.clone(),
        });
    }

    let mut rd_minus: std::collections::BTreeSet<T> = registry.rd(r).clone();
    rd_minus.remove(d);
    if !derived.gd.induced_is_connected(rd_minus.iter()) {
        return Err(PolicyError::ConnectivityViolation {
            invariant: 2,
            witness: Witness::Demarcations {
                role: r.clone(),
                demarcations: rd_minus.into_iter().collect(),
            },
        });
    }

    for r2 in registry.dr(d).clone() {
        if &r2 == r {
            continue;
        }
        if derived.gr.has_edge(r, &r2) && !sets_linked(&derived.gd, rd_minus.iter(), registry.rd(&r2).iter()) {
            derived.gr.remove_edge(r, &r2);
        }
    }

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

    registry.unlink_rd(r, d);
    Ok(())
}

pub fn permission_from_demarcation<T: EntityId>(
    registry: &mut Registry<T>,
    derived: &mut DerivedGraphs<T>,
    p: &T,
    d: &T,
) -> Result<(), PolicyError<T>> {
    if !registry.dp(d).contains(p) {
        return Err(PolicyError::RelationMissing {
            from: p.clone(),
            to: d.clone(),
        });
    }

    let mut dp_minus: std::collections::BTreeSet<T> = registry.dp(d).clone();
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

    let mut cut_demarcations = Vec::new();
    for d2 in registry.pd(p).clone() {
        if &d2 == d {
            continue;
        }
        if derived.gd.has_edge(d, &d2) && !sets_linked(&derived.gp, dp_minus.iter(), registry.dp(&d2).iter()) {
            derived.gd.remove_edge(d, &d2);
            cut_demarcations.push(d2);
        }
    }

    for d2 in &cut_demarcations {
        for r1 in registry.dr(d).clone() {
            for r2 in registry.dr(d2).clone() {
                if derived.gr.has_edge(&r1, &r2)
                    && !sets_linked(&derived.gd, registry.rd(&r1).iter(), registry.rd(&r2).iter())
                {
                    derived.gr.remove_edge(&r1, &r2);
                }
            }
        }
    }

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

    registry.unlink_dp(d, p);
    Ok(())
}
