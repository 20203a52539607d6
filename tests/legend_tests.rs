//! Legend integration tests: annotating graph nodes with gene cases,
//! pruning cases after node removal, and round-tripping the legend
//! configuration through JSON.

use lineage::{GeneLegend, LegendConfig, NodeId, PedigreeGraph, Sex, TraversalOrder};

fn affected_family() -> (PedigreeGraph<&'static str>, NodeId, NodeId, NodeId) {
    let mut graph = PedigreeGraph::new();
    let mother = graph.add_member("mother", Sex::Female);
    let father = graph.add_member("father", Sex::Male);
    let union = graph.add_union("union", mother, father).unwrap();
    let child = graph.add_member("child", Sex::Female);
    graph.attach_child(union, child).unwrap();
    (graph, mother, father, child)
}

#[test]
fn cases_follow_the_graph_nodes() {
    let (graph, mother, _, child) = affected_family();
    let mut legend = GeneLegend::new(LegendConfig::new("candidate", "Candidate Genes"));

    legend.add_case("BRCA1", mother);
    legend.add_case("BRCA1", child);

    let carriers: Vec<NodeId> = legend.registry().nodes_with("BRCA1").collect();
    assert_eq!(carriers, vec![mother, child]);
    assert!(carriers.iter().all(|&node| graph.contains(node)));
}

#[test]
fn annotating_every_descendant_of_a_carrier() {
    let (graph, mother, _, child) = affected_family();
    let mut legend = GeneLegend::new(LegendConfig::new("causal", "Confirmed Causal Genes"));

    legend.add_case("PAX6", mother);
    for node in graph.descendants(mother, TraversalOrder::Bfs) {
        // Union nodes carry no genotype of their own.
        if graph.partners(node).is_none() {
            legend.add_case("PAX6", node);
        }
    }

    assert_eq!(legend.registry().case_count("PAX6"), 2);
    assert!(legend.registry().nodes_with("PAX6").any(|node| node == child));
}

#[test]
fn node_removal_prunes_registered_cases() {
    let (mut graph, mother, _, child) = affected_family();
    let mut legend = GeneLegend::new(LegendConfig::new("carrier", "Carrier Genes"));
    legend.add_case("CFTR", mother);
    legend.add_case("CFTR", child);
    legend.add_case("HBB", child);

    graph.remove_node(child);
    legend.registry_mut().retain_nodes(|node| graph.contains(node));

    assert_eq!(legend.registry().case_count("CFTR"), 1);
    assert!(!legend.registry().contains_gene("HBB"));
    assert!(legend.registry().nodes_with("CFTR").eq([mother]));
}

#[test]
fn config_round_trips_through_json() {
    let config = LegendConfig::new("candidate", "Candidate Genes")
        .with_palette(["#aadd66", "#99cc55", "#88bb44"]);

    let encoded = serde_json::to_string(&config).unwrap();
    let decoded: LegendConfig = serde_json::from_str(&encoded).unwrap();

    assert_eq!(decoded, config);
    assert!(decoded.visible);
    assert_eq!(decoded.palette.len(), 3);
}

#[test]
fn empty_legend_reports_itself_hideable() {
    let (_, mother, _, _) = affected_family();
    let mut legend = GeneLegend::new(LegendConfig::new("candidate", "Candidate Genes"));

    assert!(legend.is_empty());
    legend.add_case("BRCA1", mother);
    legend.remove_case("BRCA1", mother);
    assert!(legend.is_empty());
}
