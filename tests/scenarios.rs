// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end scenarios against the policy core, fixed inputs reused across several assertions.

use scoped_rbac::{EntityKind, Policy, PolicyError};

/// Builds the scenario-A policy: permissions `p1..p6` with a fixed `G_P` topology, one interval,
/// three subjects, four demarcations, five roles, and the full assignment graph from the
/// scenario description.
fn basic_policy() -> Policy<&'static str> {
    let mut policy = Policy::new();

    for p in ["p1", "p2", "p3", "p4", "p5", "p6"] {
        policy.add_permission(p);
    }
    policy.seed_permission_edge(&"p1", &"p2").unwrap();
    policy.seed_permission_edge(&"p1", &"p3").unwrap();
    policy.seed_permission_edge(&"p3", &"p4").unwrap();
    policy.seed_permission_edge(&"p4", &"p5").unwrap();
    policy.seed_permission_edge(&"p2", &"p6").unwrap();

    policy.add_interval("i1");
    for s in ["s1", "s2", "s3"] {
        policy.add_subject(s);
    }
    for d in ["d1", "d2", "d3", "d4"] {
        policy.add_demarcation(d);
    }
    for r in ["r1", "r2", "r3", "r4", "r5"] {
        policy.add_role(r);
    }

    for (p, d) in [
        ("p1", "d1"),
        ("p2", "d2"),
        ("p3", "d3"),
        ("p4", "d3"),
        ("p4", "d4"),
        ("p5", "d4"),
    ] {
        policy.assign_permission_to_demarcation(&p, &d).unwrap();
    }

    for (d, r) in [
        ("d1", "r1"),
        ("d2", "r2"),
        ("d1", "r3"),
        ("d2", "r3"),
        ("d3", "r3"),
        ("d3", "r4"),
        ("d4", "r5"),
    ] {
        policy.assign_demarcation_to_role(&d, &r).unwrap();
    }

    for (r, s) in [
        ("r1", "s1"),
        ("r2", "s1"),
        ("r1", "s2"),
        ("r4", "s2"),
        ("r5", "s2"),
        ("r1", "s3"),
        ("r2", "s3"),
        ("r4", "s3"),
    ] {
        policy.assign_role_to_subject(&r, &s).unwrap();
    }

    for r in ["r1", "r2", "r3", "r4", "r5"] {
        policy.assign_role_to_interval(&r, &"i1").unwrap();
    }

    policy
}

#[test]
fn scenario_a_basic_build_succeeds() {
    let policy = basic_policy();
    assert_eq!(policy.registry().permissions().count(), 6);
    assert_eq!(policy.registry().demarcations().count(), 4);
    assert_eq!(policy.registry().roles().count(), 5);

    for s in ["s1", "s2", "s3"] {
        let enabled = policy.registry().enabled_roles(&s, &"i1");
        assert!(policy
            .graph(scoped_rbac::GraphKind::Role)
            .induced_is_connected(enabled.iter()));
    }
}

#[test]
fn scenario_b_removing_d2_is_admissible() {
    let mut policy = basic_policy();
    assert!(policy.remove_demarcation(&"d2").is_ok());
    assert!(!policy.registry().has_demarcation(&"d2"));
}

#[test]
fn scenario_c_removing_d1_is_rejected() {
    let mut policy = basic_policy();
    // d1 bridges d2 and d3 in G_D (via the p1-p2 and p1-p3 permission edges); removing it
    // strands role r3, whose remaining demarcations {d2, d3} are no longer linked without it.
    let err = policy.remove_demarcation(&"d1").unwrap_err();
    assert!(matches!(err, PolicyError::ConnectivityViolation { .. }));
    // Rejected mutation must leave no trace.
    assert!(policy.registry().has_demarcation(&"d1"));
}

#[test]
fn scenario_d_removing_r1_is_rejected_but_r5_succeeds() {
    let mut policy = basic_policy();
    let err = policy.remove_role(&"r1").unwrap_err();
    assert!(matches!(
        err,
        PolicyError::ConnectivityViolation { invariant: 1, .. }
    ));
    assert!(policy.registry().has_role(&"r1"));

    assert!(policy.remove_role(&"r5").is_ok());
    assert!(!policy.registry().has_role(&"r5"));
}

#[test]
fn scenario_e_assigning_r6_to_i1_is_rejected() {
    let mut policy = basic_policy();
    policy.add_role("r6");
    policy.add_subject("s4");
    policy.add_demarcation("d6");

    policy.assign_permission_to_demarcation(&"p6", &"d6").unwrap();
    policy.assign_demarcation_to_role(&"d6", &"r6").unwrap();
    policy.assign_role_to_subject(&"r5", &"s4").unwrap();
    policy.assign_role_to_subject(&"r6", &"s4").unwrap();

    let err = policy.assign_role_to_interval(&"r6", &"i1").unwrap_err();
    assert!(matches!(
        err,
        PolicyError::ConnectivityViolation { invariant: 1, .. }
    ));
    assert!(!policy.registry().ri(&"r6").contains("i1"));
}

#[test]
fn scenario_f_assigning_p6_to_d4_is_rejected() {
    let mut policy = basic_policy();
    let err = policy
        .assign_permission_to_demarcation(&"p6", &"d4")
        .unwrap_err();
    assert!(matches!(
        err,
        PolicyError::ConnectivityViolation { invariant: 3, .. }
    ));
    assert!(!policy.registry().dp(&"d4").contains("p6"));
}

#[test]
fn unknown_entity_is_reported() {
    let mut policy: Policy<&str> = Policy::new();
    let err = policy.assign_role_to_interval(&"ghost", &"also-ghost").unwrap_err();
    assert!(matches!(
        err,
        PolicyError::UnknownEntity {
            kind: EntityKind::Role,
            ..
        }
    ));
}

#[test]
fn retracting_an_absent_relation_is_an_error() {
    let mut policy = basic_policy();
    let err = policy.retract_role_from_subject(&"r3", &"s1").unwrap_err();
    assert!(matches!(err, PolicyError::RelationMissing { .. }));
}

#[test]
fn remove_permission_cascades_like_remove_demarcation() {
    let mut policy = basic_policy();
    // p5 is the sole permission of d4 alongside p4; removing it must keep d4 <-> {p4} coherent.
    assert!(policy.remove_permission(&"p5").is_ok());
    assert!(!policy.registry().has_permission(&"p5"));
    assert!(policy.registry().dp(&"d4").contains("p4"));
}
