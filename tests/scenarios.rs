use std::collections::HashSet;

use relationship_graph::config::LayoutConfig;
use relationship_graph::data::parse_graph_data;
use relationship_graph::graph::interaction::DIMMED_NODE;
use relationship_graph::graph::selection::{connected_entities, detail_sections};
use relationship_graph::graph::{
	GraphData, InteractionController, InteractionEvent, NodeKind, Selection, Simulation,
	VisibleTypes, filter_visible, search,
};
use relationship_graph::shortcuts::Shortcut;
use relationship_graph::state::{UiState, ViewMode};

fn dataset() -> GraphData {
	parse_graph_data(include_str!("../public/data/graphData.json")).unwrap()
}

#[test]
fn filter_search_layout_drag_and_select() {
	let data = dataset();
	assert_eq!(data.nodes.len(), 7);

	let mut types = VisibleTypes::default();
	types.toggle(NodeKind::Methods);
	let visible = filter_visible(&data, types);
	assert!(visible.nodes.iter().all(|n| n.kind() != NodeKind::Methods));
	assert!(visible.links.iter().all(|l| visible.node(&l.source).is_some() && visible.node(&l.target).is_some()));
	assert_eq!(visible.links.len(), 5);

	let matches = search(&data.nodes, "LISTENING");
	let expected: HashSet<String> = ["p1", "i1", "pr1", "m1"].iter().map(|s| s.to_string()).collect();
	assert_eq!(matches, expected);

	let config = LayoutConfig::default();
	let mut sim = Simulation::new(&visible.nodes, &visible.links, 800.0, 600.0, config.clone());
	sim.run_until_idle(1_000);
	assert!(!sim.is_running());
	assert!(sim.positions().all(|(_, b)| b.x.is_finite() && b.y.is_finite()));

	let mut controller = InteractionController::new(visible.links.clone(), config.drag_alpha_target);
	let (x, y) = sim.position("p1").unwrap();
	let grabbed = sim.node_at(x, y).unwrap().to_owned();

	// A drag moves the node and is not a click.
	controller.pointer_down(&mut sim, x, y);
	assert_eq!(controller.dragged(), Some(grabbed.as_str()));
	assert!(sim.is_running());
	controller.pointer_move(&mut sim, x + 40.0, y + 25.0);
	assert_eq!(controller.pointer_up(&mut sim), None);
	assert_eq!(sim.body(&grabbed).unwrap().fx, None);

	// A press without movement selects.
	let (x, y) = sim.position(&grabbed).unwrap();
	let clicked = sim.node_at(x, y).unwrap().to_owned();
	controller.pointer_down(&mut sim, x, y);
	let event = controller.pointer_up(&mut sim);
	assert_eq!(event, Some(InteractionEvent::NodeSelected(clicked.clone())));

	let mut selection = Selection::default();
	selection.select(Some(&clicked));
	let node = selection.node(&data).unwrap();
	assert!(!detail_sections(node).is_empty());
	let connected = connected_entities(&data, &clicked);
	assert!(!connected.is_empty());
	assert!(connected.iter().all(|c| c.node.id != clicked));
}

#[test]
fn no_search_matches_dims_nothing() {
	let data = dataset();
	let matches = search(&data.nodes, "zzzz");
	assert!(matches.is_empty());
	let controller = InteractionController::new(data.links.clone(), 0.3);
	for node in &data.nodes {
		assert_eq!(controller.node_opacity(&node.id, &matches), 1.0);
	}

	let some = search(&data.nodes, "co-design");
	assert!(some.contains("m2"));
	assert_eq!(controller.node_opacity("i1", &some), DIMMED_NODE);
}

#[test]
fn hiding_every_type_leaves_an_empty_scene() {
	let data = dataset();
	let mut types = VisibleTypes::default();
	for kind in NodeKind::ALL {
		types.set(kind, false);
	}
	let visible = filter_visible(&data, types);
	assert!(visible.nodes.is_empty() && visible.links.is_empty());
	let mut sim = Simulation::new(&visible.nodes, &visible.links, 800.0, 600.0, LayoutConfig::default());
	sim.run_until_idle(1_000);
	assert_eq!(sim.node_at(400.0, 300.0), None);
}

#[test]
fn switching_views_keeps_search_and_selection() {
	let mut ui = UiState {
		search_term: "walk".into(),
		..UiState::default()
	};
	ui.selection.select(Some("m1"));
	ui.apply(Shortcut::ToggleViewMode);
	assert_eq!(ui.view_mode, ViewMode::Table);
	ui.apply(Shortcut::ToggleViewMode);
	assert_eq!(ui.view_mode, ViewMode::Map);
	assert_eq!(ui.search_term, "walk");
	assert_eq!(ui.selection.id(), Some("m1"));
}
