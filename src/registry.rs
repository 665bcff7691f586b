// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entity storage: the five entity sets and eight bidirectional assignment relations.
//!
//! Instance-owned by [`Policy`](crate::Policy) rather than held as shared or global-like state —
//! one `Policy` value exclusively owns one `Registry`.

use std::collections::BTreeSet;

use crate::ids::EntityId;

type Relation<T> = std::collections::BTreeMap<T, BTreeSet<T>>;

/// Which kind of entity an identifier refers to, used only for error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Interval,
    Subject,
    Role,
    Demarcation,
    Permission,
}

#[derive(Clone, Debug)]
pub struct Registry<T: EntityId> {
    intervals: BTreeSet<T>,
    subjects: BTreeSet<T>,
    roles: BTreeSet<T>,
    demarcations: BTreeSet<T>,
    permissions: BTreeSet<T>,

    /// `IR[i] ⊆ R` — roles enabled during an interval.
    ir: Relation<T>,
    /// `RI[r] ⊆ I` — intervals during which a role is enabled.
    ri: Relation<T>,
    /// `SR[s] ⊆ R` — roles a subject holds.
    sr: Relation<T>,
    /// `RS[r] ⊆ S` — subjects holding a role.
    rs: Relation<T>,
    /// `RD[r] ⊆ D` — demarcations a role includes.
    rd: Relation<T>,
    /// `DR[d] ⊆ R` — roles including a demarcation.
    dr: Relation<T>,
    /// `DP[d] ⊆ P` — permissions a demarcation grants.
    dp: Relation<T>,
    /// `PD[p] ⊆ D` — demarcations granting a permission.
    pd: Relation<T>,

    /// Never mutated; returned by reference for lookups against an unregistered id so callers
    /// can treat "unknown" and "known but empty" uniformly without allocating on every miss.
    empty_set: BTreeSet<T>,
}

impl<T: EntityId> Default for Registry<T> {
    fn default() -> Self {
        Self {
            intervals: BTreeSet::new(),
            subjects: BTreeSet::new(),
            roles: BTreeSet::new(),
            demarcations: BTreeSet::new(),
            permissions: BTreeSet::new(),
            ir: Relation::new(),
            ri: Relation::new(),
            sr: Relation::new(),
            rs: Relation::new(),
            rd: Relation::new(),
            dr: Relation::new(),
            dp: Relation::new(),
            pd: Relation::new(),
            empty_set: BTreeSet::new(),
        }
    }
}

impl<T: EntityId> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    // -- existence -----------------------------------------------------------------------

    pub fn has_interval(&self, i: &T) -> bool {
        self.intervals.contains(i)
    }
    pub fn has_subject(&self, s: &T) -> bool {
        self.subjects.contains(s)
    }
    pub fn has_role(&self, r: &T) -> bool {
        self.roles.contains(r)
    }
    pub fn has_demarcation(&self, d: &T) -> bool {
        self.demarcations.contains(d)
    }
    pub fn has_permission(&self, p: &T) -> bool {
        self.permissions.contains(p)
    }

    pub fn intervals(&self) -> impl Iterator<Item = &T> {
        self.intervals.iter()
    }
    pub fn subjects(&self) -> impl Iterator<Item = &T> {
        self.subjects.iter()
    }
    pub fn roles(&self) -> impl Iterator<Item = &T> {
        self.roles.iter()
    }
    pub fn demarcations(&self) -> impl Iterator<Item = &T> {
        self.demarcations.iter()
    }
    pub fn permissions(&self) -> impl Iterator<Item = &T> {
        self.permissions.iter()
    }

    // -- additions -------------------------------------------------------------------------

    /// Returns `true` if the entity was newly inserted, `false` if it already existed (no-op).
    pub fn add_interval(&mut self, i: T) -> bool {
        if self.intervals.insert(i.clone()) {
            self.ir.entry(i).or_default();
            true
        } else {
            false
        }
    }

    pub fn add_subject(&mut self, s: T) -> bool {
        if self.subjects.insert(s.clone()) {
            self.sr.entry(s).or_default();
            true
        } else {
            false
        }
    }

    pub fn add_role(&mut self, r: T) -> bool {
        if self.roles.insert(r.clone()) {
            self.ri.entry(r.clone()).or_default();
            self.rs.entry(r.clone()).or_default();
            self.rd.entry(r).or_default();
            true
        } else {
            false
        }
    }

    pub fn add_demarcation(&mut self, d: T) -> bool {
        if self.demarcations.insert(d.clone()) {
            self.dr.entry(d.clone()).or_default();
            self.dp.entry(d).or_default();
            true
        } else {
            false
        }
    }

    pub fn add_permission(&mut self, p: T) -> bool {
        if self.permissions.insert(p.clone()) {
            self.pd.entry(p).or_default();
            true
        } else {
            false
        }
    }

    // -- relation lookups --------------------------------------------------------------------

    pub fn ir(&self, i: &T) -> &BTreeSet<T> {
        self.ir.get(i).unwrap_or(&self.empty_set)
    }
    pub fn ri(&self, r: &T) -> &BTreeSet<T> {
        self.ri.get(r).unwrap_or(&self.empty_set)
    }
    pub fn sr(&self, s: &T) -> &BTreeSet<T> {
        self.sr.get(s).unwrap_or(&self.empty_set)
    }
    pub fn rs(&self, r: &T) -> &BTreeSet<T> {
        self.rs.get(r).unwrap_or(&self.empty_set)
    }
    pub fn rd(&self, r: &T) -> &BTreeSet<T> {
        self.rd.get(r).unwrap_or(&self.empty_set)
    }
    pub fn dr(&self, d: &T) -> &BTreeSet<T> {
        self.dr.get(d).unwrap_or(&self.empty_set)
    }
    pub fn dp(&self, d: &T) -> &BTreeSet<T> {
        self.dp.get(d).unwrap_or(&self.empty_set)
    }
    pub fn pd(&self, p: &T) -> &BTreeSet<T> {
        self.pd.get(p).unwrap_or(&self.empty_set)
    }

    /// `E(s,i) = SR[s] ∩ IR[i]` — the enabled role set for a subject during an interval.
    pub fn enabled_roles(&self, s: &T, i: &T) -> BTreeSet<T> {
        self.sr(s).intersection(self.ir(i)).cloned().collect()
    }

    // -- relation mutation (both directions kept consistent) ---------------------------------

    pub fn link_ir(&mut self, i: T, r: T) {
        self.ir.entry(i.clone()).or_default().insert(r.clone());
        self.ri.entry(r).or_default().insert(i);
    }
    pub fn unlink_ir(&mut self, i: &T, r: &T) {
        if let Some(s) = self.ir.get_mut(i) {
            s.remove(r);
        }
        if let Some(s) = self.ri.get_mut(r) {
            s.remove(i);
        }
    }

    pub fn link_sr(&mut self, s: T, r: T) {
        self.sr.entry(s.clone()).or_default().insert(r.clone());
        self.rs.entry(r).or_default().insert(s);
    }
    pub fn unlink_sr(&mut self, s: &T, r: &T) {
        if let Some(set) = self.sr.get_mut(s) {
            set.remove(r);
        }
        if let Some(set) = self.rs.get_mut(r) {
            set.remove(s);
        }
    }

    pub fn link_rd(&mut self, r: T, d: T) {
        self.rd.entry(r.clone()).or_default().insert(d.clone());
        self.dr.entry(d).or_default().insert(r);
    }
    pub fn unlink_rd(&mut self, r: &T, d: &T) {
        if let Some(set) = self.rd.get_mut(r) {
            set.remove(d);
        }
        if let Some(set) = self.dr.get_mut(d) {
            set.remove(r);
        }
    }

    pub fn link_dp(&mut self, d: T, p: T) {
        self.dp.entry(d.clone()).or_default().insert(p.clone());
        self.pd.entry(p).or_default().insert(d);
    }
    pub fn unlink_dp(&mut self, d: &T, p: &T) {
        if let Some(set) = self.dp.get_mut(d) {
            set.remove(p);
        }
        if let Some(set) = self.pd.get_mut(p) {
            set.remove(d);
        }
    }

    // -- removals (entity + all incident relations) ------------------------------------------

    pub fn remove_interval(&mut self, i: &T) {
        if let Some(roles) = self.ir.remove(i) {
            for r in &roles {
                if let Some(set) = self.ri.get_mut(r) {
                    set.remove(i);
                }
            }
        }
        self.intervals.remove(i);
    }

    pub fn remove_subject(&mut self, s: &T) {
        if let Some(roles) = self.sr.remove(s) {
            for r in &roles {
                if let Some(set) = self.rs.get_mut(r) {
                    set.remove(s);
                }
            }
        }
        self.subjects.remove(s);
    }

    pub fn remove_role(&mut self, r: &T) {
        if let Some(intervals) = self.ri.remove(r) {
            for i in &intervals {
                if let Some(set) = self.ir.get_mut(i) {
                    set.remove(r);
                }
            }
        }
        if let Some(subjects) = self.rs.remove(r) {
            for s in &subjects {
                if let Some(set) = self.sr.get_mut(s) {
                    set.remove(r);
                }
            }
        }
        if let Some(demarcations) = self.rd.remove(r) {
            for d in &demarcations {
                if let Some(set) = self.dr.get_mut(d) {
                    set.remove(r);
                }
            }
        }
        self.roles.remove(r);
    }

    pub fn remove_demarcation(&mut self, d: &T) {
        if let Some(roles) = self.dr.remove(d) {
            for r in &roles {
                if let Some(set) = self.rd.get_mut(r) {
                    set.remove(d);
                }
            }
        }
        if let Some(permissions) = self.dp.remove(d) {
            for p in &permissions {
                if let Some(set) = self.pd.get_mut(p) {
                    set.remove(d);
                }
            }
        }
        self.demarcations.remove(d);
    }

    pub fn remove_permission(&mut self, p: &T) {
        if let Some(demarcations) = self.pd.remove(p) {
            for d in &demarcations {
                if let Some(set) = self.dp.get_mut(d) {
                    set.remove(p);
                }
            }
        }
        self.permissions.remove(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bidirectional_consistency_on_link_and_unlink() {
        let mut reg: Registry<&str> = Registry::new();
        reg.add_role("r1");
        reg.add_subject("s1");
        reg.link_sr("s1", "r1");
        assert!(reg.sr(&"s1").contains("r1"));
        assert!(reg.rs(&"r1").contains("s1"));
        reg.unlink_sr(&"s1", &"r1");
        assert!(!reg.sr(&"s1").contains("r1"));
        assert!(!reg.rs(&"r1").contains("s1"));
    }

    #[test]
    fn add_is_idempotent() {
        let mut reg: Registry<&str> = Registry::new();
        assert!(reg.add_role("r1"));
        assert!(!reg.add_role("r1"));
        assert_eq!(reg.roles().count(), 1);
    }

    #[test]
    fn enabled_roles_is_intersection() {
        let mut reg: Registry<&str> = Registry::new();
        reg.add_role("r1");
        reg.add_role("r2");
        reg.add_subject("s1");
        reg.add_interval("i1");
        reg.link_sr("s1", "r1");
        reg.link_sr("s1", "r2");
        reg.link_ir("i1", "r1");
        let enabled = reg.enabled_roles(&"s1", &"i1");
        assert_eq!(enabled, BTreeSet::from(["r1"]));
    }
}
