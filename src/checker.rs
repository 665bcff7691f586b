// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure predicates over `(registry, derived graphs)`. None of these functions mutate anything;
//! every admissibility decision in [`crate::policy`] decomposes into calls here first.

use crate::graph::Graph;
use crate::ids::EntityId;
use crate::registry::Registry;

/// `induced_is_connected(G, V′)` — does the subgraph of `graph` induced by `vertices` form a
/// single connected component? Delegates straight to [`Graph::induced_is_connected`]; kept as a
/// free function here so every invariant check in this module reads at the same altitude.
pub fn induced_is_connected<'a, T, I>(graph: &Graph<T>, vertices: I) -> bool
where
    T: EntityId + 'a,
    I: IntoIterator<Item = &'a T>,
{
    graph.induced_is_connected(vertices)
}

/// `role_set_connected(s, i, G_R)` — invariant 1 evaluated for one `(subject, interval)` pair.
pub fn role_set_connected<T: EntityId>(registry: &Registry<T>, gr: &Graph<T>, s: &T, i: &T) -> bool {
    let enabled = registry.enabled_roles(s, i);
    gr.induced_is_connected(enabled.iter())
}

/// `support_exists(G, x, Y)` — is there a `y ∈ Y` with `x = y` or `(x, y) ∈ G`?
///
/// This is the per-element form of invariants 2 and 3: "the newly assigned demarcation/permission
/// is adjacent to (or equal to) something already in the target set".
pub fn support_exists<'a, T, I>(graph: &Graph<T>, x: &T, ys: I) -> bool
where
    T: EntityId + 'a,
    I: IntoIterator<Item = &'a T>,
{
    ys.into_iter().any(|y| y == x || graph.has_edge(x, y))
}

/// `sets_linked(G, A, B)` — is there some `a ∈ A`, `b ∈ B` with `a = b` or `(a, b) ∈ G`?
///
/// Used by the retraction rules to decide whether a `G_D`/`G_R` edge that existed "thanks to"
/// the entity now being retracted still has some other justification.
pub fn sets_linked<'a, T, A, B>(graph: &Graph<T>, a: A, b: B) -> bool
where
    T: EntityId + 'a,
    A: IntoIterator<Item = &'a T>,
    B: IntoIterator<Item = &'a T> + Clone,
{
    a.into_iter().any(|x| support_exists(graph, x, b.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn support_exists_matches_equal_or_adjacent() {
        let mut g = Graph::new();
        g.add_edge("p1", "p2");
        g.add_node("p3");
        assert!(support_exists(&g, &"p1", ["p2", "p3"].iter()));
        assert!(support_exists(&g, &"p3", ["p3"].iter()));
        assert!(!support_exists(&g, &"p1", ["p3"].iter()));
    }

    #[test]
    fn sets_linked_requires_one_crossing_pair() {
        let mut g = Graph::new();
        g.add_edge("a", "x");
        assert!(sets_linked(&g, ["a", "b"].iter(), ["x", "y"].iter()));
        assert!(!sets_linked(&g, ["b"].iter(), ["y"].iter()));
    }
}
