use std::collections::HashSet;

use log::info;

use crate::config::LayoutConfig;
use crate::graph::interaction::{InteractionController, InteractionEvent};
use crate::graph::layout::Simulation;
use crate::graph::model::{GraphData, Link, Node};

/// Everything the map needs between frames: the simulation for the current
/// visible set, the pointer controller and the search highlight.
pub struct MapState {
	pub sim: Simulation,
	pub controller: InteractionController,
	nodes: Vec<Node>,
	links: Vec<Link>,
	highlighted: HashSet<String>,
	pub width: f64,
	pub height: f64,
}

impl MapState {
	pub fn new(
		data: &GraphData,
		highlighted: HashSet<String>,
		width: f64,
		height: f64,
		config: LayoutConfig,
	) -> Self {
		let drag_alpha_target = config.drag_alpha_target;
		let sim = Simulation::new(&data.nodes, &data.links, width, height, config);
		info!(
			"layout started: {} nodes, {} links in {width}x{height}",
			sim.node_count(),
			sim.link_count()
		);
		Self {
			sim,
			controller: InteractionController::new(data.links.clone(), drag_alpha_target),
			nodes: data.nodes.clone(),
			links: data.links.clone(),
			highlighted,
			width,
			height,
		}
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn links(&self) -> &[Link] {
		&self.links
	}

	pub fn highlighted(&self) -> &HashSet<String> {
		&self.highlighted
	}

	pub fn set_highlighted(&mut self, highlighted: HashSet<String>) {
		self.highlighted = highlighted;
	}

	/// One animation frame of physics. False once the layout has cooled or
	/// been torn down.
	pub fn advance(&mut self) -> bool {
		self.sim.tick()
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.sim.set_center(width, height);
	}

	/// Returns true when the press started a drag or pan.
	pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
		self.controller.pointer_down(&mut self.sim, x, y);
		self.controller.in_gesture()
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
		self.controller.pointer_move(&mut self.sim, x, y)
	}

	pub fn pointer_up(&mut self) -> Option<InteractionEvent> {
		self.controller.pointer_up(&mut self.sim)
	}

	pub fn hover_at(&mut self, x: f64, y: f64) {
		self.controller.hover_at(&self.sim, x, y);
	}

	pub fn pointer_leave(&mut self) {
		self.controller.pointer_leave();
	}

	/// Wheel zoom about the pointer; returns the new scale.
	pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) -> f64 {
		self.controller.wheel(x, y, delta_y);
		self.controller.transform().k
	}

	/// Button zoom about the viewport centre; returns the new scale.
	pub fn zoom_by(&mut self, factor: f64) -> f64 {
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		let transform = self.controller.transform_mut();
		transform.zoom_at(cx, cy, factor);
		transform.k
	}

	/// Releases any pin and stops the simulation for good.
	pub fn teardown(&mut self) {
		self.controller.cancel(&mut self.sim);
		self.sim.stop();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn data() -> GraphData {
		crate::data::parse_graph_data(
			r#"{
				"nodes": [
					{"id": "a", "type": "People", "name": "Ada"},
					{"id": "b", "type": "Methods", "name": "Bricolage"}
				],
				"links": [{"source": "a", "target": "b", "relationship": "applies"}]
			}"#,
		)
		.unwrap()
	}

	#[test]
	fn teardown_stops_all_further_ticks() {
		let mut state = MapState::new(&data(), HashSet::new(), 800.0, 600.0, LayoutConfig::default());
		assert!(state.advance());
		state.teardown();
		let before: Vec<_> = state.sim.positions().map(|(_, b)| *b).collect();
		for _ in 0..10 {
			assert!(!state.advance());
		}
		let after: Vec<_> = state.sim.positions().map(|(_, b)| *b).collect();
		assert_eq!(before, after);
	}

	#[test]
	fn teardown_mid_drag_releases_pin() {
		let mut state = MapState::new(&data(), HashSet::new(), 0.0, 0.0, LayoutConfig::default());
		state.sim.pin("a", 0.0, 0.0);
		state.sim.release("a");
		state.sim.pin("b", 1000.0, 0.0);
		state.sim.release("b");
		assert!(state.pointer_down(0.0, 0.0));
		assert_eq!(state.sim.body("a").unwrap().fx, Some(0.0));
		state.teardown();
		assert_eq!(state.sim.body("a").unwrap().fx, None);
		assert!(state.sim.is_stopped());
	}

	#[test]
	fn button_zoom_keeps_center_fixed() {
		let mut state = MapState::new(&data(), HashSet::new(), 800.0, 600.0, LayoutConfig::default());
		let k = state.zoom_by(1.5);
		assert_eq!(k, 1.5);
		let t = state.controller.transform();
		let (gx, gy) = t.screen_to_graph(400.0, 300.0);
		assert!((gx - 400.0).abs() < 1e-9 && (gy - 300.0).abs() < 1e-9);
	}
}
