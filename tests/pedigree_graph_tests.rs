//! End-to-end tests for the pedigree graph: attach/detach round trips,
//! parent replacement, traversal reachability, the cycle guard, and
//! rebuilding a graph from its serialized attach list.

use lineage::{NodeId, PedigreeError, PedigreeGraph, Sex, TraversalOrder, Vertical};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Member {
    name: String,
}

fn member(name: &str) -> Member {
    Member {
        name: name.to_owned(),
    }
}

/// Two generations: (mother, father) -> union -> {daughter, son}.
fn family() -> (PedigreeGraph<Member>, NodeId, NodeId, NodeId, NodeId, NodeId) {
    let mut graph = PedigreeGraph::new();
    let mother = graph.add_member(member("mother"), Sex::Female);
    let father = graph.add_member(member("father"), Sex::Male);
    let union = graph
        .add_union(member("union"), mother, father)
        .unwrap();
    let daughter = graph.add_member(member("daughter"), Sex::Female);
    let son = graph.add_member(member("son"), Sex::Male);
    graph.attach_child(union, daughter).unwrap();
    graph.attach_child(union, son).unwrap();
    (graph, mother, father, union, daughter, son)
}

#[test]
fn family_wiring_is_consistent() {
    let (graph, mother, father, union, daughter, son) = family();

    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.partners(union), Some((mother, father)));
    assert_eq!(graph.mother_of(union), Some(mother));
    assert_eq!(graph.father_of(union), Some(father));
    assert_eq!(graph.partner_of(union, mother), Some(father));
    assert!(graph.contains_partner(union, father));
    assert_eq!(graph.parents_of(daughter), Some(union));
    assert_eq!(graph.children(union).collect::<Vec<_>>(), vec![daughter, son]);
    assert_eq!(graph.siblings(daughter).collect::<Vec<_>>(), vec![son]);
    assert!(graph.validate_invariants());
}

#[test]
fn second_attach_to_a_parented_child_is_rejected() {
    let (mut graph, _, _, _, daughter, _) = family();
    let stranger = graph.add_member(member("stranger"), Sex::Unknown);

    assert_eq!(
        graph.attach_child(stranger, daughter),
        Err(PedigreeError::AlreadyHasParents { child: daughter })
    );
    assert!(graph.validate_invariants());
}

#[test]
fn detach_then_reattach_elsewhere() {
    let (mut graph, _, _, union, daughter, _) = family();
    let foster = graph.add_member(member("foster"), Sex::Unknown);

    assert!(graph.detach_child(daughter));
    assert_eq!(graph.parents_of(daughter), None);
    assert!(!graph.children(union).any(|child| child == daughter));

    graph.attach_child(foster, daughter).unwrap();
    assert_eq!(graph.parents_of(daughter), Some(foster));
    assert!(graph.validate_invariants());
}

#[test]
fn replace_parents_is_atomic_on_missing_target() {
    let (mut graph, _, _, union, daughter, _) = family();
    let ghost = graph.add_member(member("ghost"), Sex::Unknown);
    graph.remove_node(ghost);

    assert_eq!(
        graph.replace_parents(daughter, ghost),
        Err(PedigreeError::MissingNode(ghost))
    );
    // The failed call must not have detached the child.
    assert_eq!(graph.parents_of(daughter), Some(union));
    assert!(graph.validate_invariants());
}

#[test]
fn removing_a_union_orphans_its_children() {
    let (mut graph, mother, _, union, daughter, son) = family();

    graph.remove_node(union);

    assert!(!graph.contains(union));
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.parents_of(daughter), None);
    assert_eq!(graph.parents_of(son), None);
    assert_eq!(graph.unions_of(mother).count(), 0);
    assert!(graph.validate_invariants());
}

#[test]
fn remove_vertical_twice_leaves_the_graph_unchanged() {
    let (mut graph, _, _, _, daughter, _) = family();
    let edge = graph.incoming_vertical(daughter).unwrap();

    graph.remove_vertical(edge);
    let count_after_first = graph.edge_count();
    graph.remove_vertical(edge);

    assert_eq!(graph.edge_count(), count_after_first);
    assert_eq!(graph.parents_of(daughter), None);
    assert!(graph.validate_invariants());
}

#[test]
fn descendants_reach_every_generation_below() {
    let (mut graph, mother, _, _, daughter, _) = family();
    let spouse = graph.add_member(member("spouse"), Sex::Male);
    let union2 = graph
        .add_union(member("union2"), daughter, spouse)
        .unwrap();
    let grandchild = graph.add_member(member("grandchild"), Sex::Unknown);
    graph.attach_child(union2, grandchild).unwrap();

    let down: Vec<NodeId> = graph.descendants(mother, TraversalOrder::Bfs).collect();
    assert!(down.contains(&daughter));
    assert!(down.contains(&grandchild));
    assert!(!down.contains(&mother));

    let up: Vec<NodeId> = graph.ancestors(grandchild, TraversalOrder::Dfs).collect();
    assert!(up.contains(&daughter));
    assert!(up.contains(&spouse));
    assert!(up.contains(&mother));
}

#[test]
fn raw_edge_write_is_caught_by_the_cycle_guard() {
    let (mut graph, mother, _, _, daughter, _) = family();
    assert_eq!(graph.check_acyclic(), Ok(()));

    // Redirect the daughter's incoming vertical back onto the mother,
    // making the mother a descendant of her own union.
    let edge = graph.incoming_vertical(daughter).unwrap();
    graph.vertical_mut(edge).unwrap().set_child(Some(mother));

    assert_eq!(graph.check_acyclic(), Err(PedigreeError::CycleDetected));
}

#[test]
fn vertical_parent_lookups_surface_detached_endpoints() {
    let (mut graph, mother, _, _, daughter, _) = family();
    let edge = graph.incoming_vertical(daughter).unwrap();

    assert_eq!(graph.vertical_mother(edge), Ok(Some(mother)));

    graph.vertical_mut(edge).unwrap().set_parents(None);
    assert_eq!(graph.vertical_father(edge), Err(PedigreeError::NullParents));

    graph.remove_vertical(edge);
    assert_eq!(
        graph.vertical_mother(edge),
        Err(PedigreeError::MissingEdge(edge))
    );
}

#[test]
fn attach_list_rebuilds_an_equivalent_graph() {
    let (graph, _, _, _, _, _) = family();

    // Serialize the live edges, then replay them onto a graph holding the
    // same members.
    let edges: Vec<Vertical> = graph
        .attach_list()
        .into_iter()
        .map(|(parents, child)| Vertical::new(parents, child))
        .collect();
    let encoded = serde_json::to_string(&edges).unwrap();
    let decoded: Vec<Vertical> = serde_json::from_str(&encoded).unwrap();

    let mut rebuilt = PedigreeGraph::new();
    let mother = rebuilt.add_member(member("mother"), Sex::Female);
    let father = rebuilt.add_member(member("father"), Sex::Male);
    rebuilt
        .add_union(member("union"), mother, father)
        .unwrap();
    rebuilt.add_member(member("daughter"), Sex::Female);
    rebuilt.add_member(member("son"), Sex::Male);

    for vertical in decoded {
        let parents = vertical.parents().unwrap();
        let child = vertical.child().unwrap();
        rebuilt.attach_child(parents, child).unwrap();
    }

    assert_eq!(rebuilt.edge_count(), graph.edge_count());
    assert_eq!(rebuilt.attach_list(), graph.attach_list());
    assert!(rebuilt.validate_invariants());
}

#[test]
fn node_ids_are_recycled_after_removal() {
    let (mut graph, _, _, _, daughter, _) = family();
    graph.remove_node(daughter);
    let replacement = graph.add_member(member("replacement"), Sex::Female);

    assert_eq!(replacement.index(), daughter.index());
    assert_eq!(graph.get(replacement).map(|m| m.name.as_str()), Some("replacement"));
}
