//! Pointer state machine layered on top of the layout simulator.

use std::collections::HashSet;

use log::debug;

use super::layout::Simulation;
use super::model::Link;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 4.0;

/// Opacity of nodes outside the current focus.
pub const DIMMED_NODE: f64 = 0.3;
/// Resting link opacity.
pub const LINK_BASE: f64 = 0.6;
/// Link opacity while another node is hovered.
pub const DIMMED_LINK: f64 = 0.2;
/// Label scale of the hovered node.
pub const HOVER_SCALE: f64 = 1.15;

/// Pan and zoom applied to the whole scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

impl ViewTransform {
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Scales by `factor` keeping the screen point `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}

	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.x += dx;
		self.y += dy;
	}

	/// Zoom as a whole percentage, for the readout.
	pub fn percent(&self) -> u32 {
		(self.k * 100.0).round() as u32
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum PointerState {
	#[default]
	Idle,
	Hovering {
		node: String,
		neighbors: HashSet<String>,
	},
	Dragging {
		node: String,
		/// Pointer offset from the node centre in graph units.
		grab: (f64, f64),
		moved: bool,
	},
	Panning {
		last: (f64, f64),
	},
}

/// What a finished gesture means to the rest of the application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractionEvent {
	NodeSelected(String),
}

/// One-hop neighbors of `id` among `links`.
pub fn neighbors_of(links: &[Link], id: &str) -> HashSet<String> {
	links
		.iter()
		.filter_map(|l| l.other_end(id))
		.filter(|other| *other != id)
		.map(str::to_owned)
		.collect()
}

pub struct InteractionController {
	state: PointerState,
	transform: ViewTransform,
	links: Vec<Link>,
	drag_alpha_target: f64,
}

impl InteractionController {
	pub fn new(links: Vec<Link>, drag_alpha_target: f64) -> Self {
		Self {
			state: PointerState::Idle,
			transform: ViewTransform::default(),
			links,
			drag_alpha_target,
		}
	}

	pub fn state(&self) -> &PointerState {
		&self.state
	}

	pub fn transform(&self) -> ViewTransform {
		self.transform
	}

	pub fn transform_mut(&mut self) -> &mut ViewTransform {
		&mut self.transform
	}

	/// True while a drag or pan owns the pointer.
	pub fn in_gesture(&self) -> bool {
		matches!(
			self.state,
			PointerState::Dragging { .. } | PointerState::Panning { .. }
		)
	}

	pub fn hovered(&self) -> Option<&str> {
		match &self.state {
			PointerState::Hovering { node, .. } => Some(node),
			_ => None,
		}
	}

	pub fn dragged(&self) -> Option<&str> {
		match &self.state {
			PointerState::Dragging { node, .. } => Some(node),
			_ => None,
		}
	}

	/// Starts a drag when the press lands on a node, a pan otherwise.
	pub fn pointer_down(&mut self, sim: &mut Simulation, sx: f64, sy: f64) {
		let (gx, gy) = self.transform.screen_to_graph(sx, sy);
		let hit = sim
			.node_at(gx, gy)
			.and_then(|id| sim.position(id).map(|p| (id.to_owned(), p)));

		self.state = match hit {
			Some((node, (x, y))) => {
				sim.pin(&node, x, y);
				sim.set_alpha_target(self.drag_alpha_target);
				sim.restart();
				debug!("drag start on {node}");
				PointerState::Dragging {
					node,
					grab: (gx - x, gy - y),
					moved: false,
				}
			}
			None => PointerState::Panning { last: (sx, sy) },
		};
	}

	/// Follows the pointer during a drag or pan. Returns false outside a
	/// gesture.
	pub fn pointer_move(&mut self, sim: &mut Simulation, sx: f64, sy: f64) -> bool {
		match &mut self.state {
			PointerState::Dragging { node, grab, moved } => {
				let (gx, gy) = self.transform.screen_to_graph(sx, sy);
				sim.pin(node, gx - grab.0, gy - grab.1);
				*moved = true;
				true
			}
			PointerState::Panning { last } => {
				let (dx, dy) = (sx - last.0, sy - last.1);
				*last = (sx, sy);
				self.transform.pan_by(dx, dy);
				true
			}
			_ => false,
		}
	}

	/// Ends the current gesture. A press that never moved is a click.
	pub fn pointer_up(&mut self, sim: &mut Simulation) -> Option<InteractionEvent> {
		match std::mem::take(&mut self.state) {
			PointerState::Dragging { node, moved, .. } => {
				sim.release(&node);
				sim.set_alpha_target(0.0);
				if moved {
					debug!("drag end on {node}");
					None
				} else {
					Some(InteractionEvent::NodeSelected(node))
				}
			}
			PointerState::Hovering { node, neighbors } => {
				self.state = PointerState::Hovering { node, neighbors };
				None
			}
			_ => None,
		}
	}

	/// Updates hover from the pointer position. Ignored during gestures.
	pub fn hover_at(&mut self, sim: &Simulation, sx: f64, sy: f64) {
		if self.in_gesture() {
			return;
		}
		let (gx, gy) = self.transform.screen_to_graph(sx, sy);
		let hit = sim.node_at(gx, gy).map(str::to_owned);
		self.set_hover(hit);
	}

	pub fn set_hover(&mut self, node: Option<String>) {
		if self.in_gesture() || self.hovered() == node.as_deref() {
			return;
		}
		self.state = match node {
			Some(node) => {
				let neighbors = neighbors_of(&self.links, &node);
				PointerState::Hovering { node, neighbors }
			}
			None => PointerState::Idle,
		};
	}

	/// The pointer left the scene: hover effects end, gestures continue.
	pub fn pointer_leave(&mut self) {
		if matches!(self.state, PointerState::Hovering { .. }) {
			self.state = PointerState::Idle;
		}
	}

	/// Releases any pin held by an unfinished drag.
	pub fn cancel(&mut self, sim: &mut Simulation) {
		if let PointerState::Dragging { node, .. } = std::mem::take(&mut self.state) {
			sim.release(&node);
			sim.set_alpha_target(0.0);
		}
	}

	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		self.transform.zoom_at(sx, sy, factor);
	}

	/// Node opacity. The search highlight set is the baseline; an active
	/// hover overrides it with its own neighborhood.
	pub fn node_opacity(&self, id: &str, highlighted: &HashSet<String>) -> f64 {
		if let PointerState::Hovering { node, neighbors } = &self.state {
			return if node == id || neighbors.contains(id) {
				1.0
			} else {
				DIMMED_NODE
			};
		}
		if highlighted.is_empty() || highlighted.contains(id) {
			1.0
		} else {
			DIMMED_NODE
		}
	}

	pub fn link_opacity(&self, link: &Link) -> f64 {
		match &self.state {
			PointerState::Hovering { node, .. } if link.touches(node) => 1.0,
			PointerState::Hovering { .. } => DIMMED_LINK,
			_ => LINK_BASE,
		}
	}

	pub fn label_scale(&self, id: &str) -> f64 {
		if self.hovered() == Some(id) {
			HOVER_SCALE
		} else {
			1.0
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::LayoutConfig;
	use crate::graph::model::{Node, Relationship};

	fn nodes(ids: &[&str]) -> Vec<Node> {
		ids.iter()
			.map(|id| {
				serde_json::from_value(serde_json::json!({
					"id": id,
					"name": id,
					"type": "Methods",
				}))
				.unwrap()
			})
			.collect()
	}

	fn link(source: &str, target: &str) -> Link {
		Link {
			source: source.into(),
			target: target.into(),
			relationship: Relationship::Default,
			strength: 1.0,
		}
	}

	fn setup() -> (Simulation, InteractionController) {
		let links = vec![link("A", "B"), link("B", "C")];
		let mut sim = Simulation::new(
			&nodes(&["A", "B", "C"]),
			&links,
			0.0,
			0.0,
			LayoutConfig::default(),
		);
		sim.pin("A", -1000.0, 0.0);
		sim.release("A");
		sim.pin("B", 0.0, 0.0);
		sim.release("B");
		sim.pin("C", 1000.0, 0.0);
		sim.release("C");
		(sim, InteractionController::new(links, 0.3))
	}

	#[test]
	fn hover_computes_one_hop_neighbors() {
		let links = vec![link("A", "B"), link("B", "C")];
		assert_eq!(
			neighbors_of(&links, "B"),
			HashSet::from(["A".to_string(), "C".to_string()])
		);
		assert_eq!(neighbors_of(&links, "A"), HashSet::from(["B".to_string()]));
	}

	#[test]
	fn drag_pins_then_releases_at_pointer() {
		let (mut sim, mut ctl) = setup();
		ctl.pointer_down(&mut sim, 0.0, 0.0);
		assert_eq!(ctl.dragged(), Some("B"));
		assert!(sim.is_running());

		ctl.pointer_move(&mut sim, 100.0, 200.0);
		assert_eq!(sim.body("B").unwrap().fx, Some(100.0));

		assert_eq!(ctl.pointer_up(&mut sim), None);
		let body = sim.body("B").unwrap();
		assert_eq!((body.fx, body.fy), (None, None));
		assert!((body.x - 100.0).abs() < 1e-9);
		assert!((body.y - 200.0).abs() < 1e-9);
		assert_eq!(*ctl.state(), PointerState::Idle);
	}

	#[test]
	fn press_without_motion_selects() {
		let (mut sim, mut ctl) = setup();
		ctl.pointer_down(&mut sim, 1000.0, 10.0);
		assert_eq!(
			ctl.pointer_up(&mut sim),
			Some(InteractionEvent::NodeSelected("C".into()))
		);
		assert_eq!(sim.body("C").unwrap().fx, None);
	}

	#[test]
	fn background_drag_pans_the_view() {
		let (mut sim, mut ctl) = setup();
		ctl.pointer_down(&mut sim, 500.0, 500.0);
		assert!(ctl.in_gesture());
		ctl.pointer_move(&mut sim, 520.0, 490.0);
		assert_eq!(ctl.pointer_up(&mut sim), None);
		assert_eq!(ctl.transform(), ViewTransform { x: 20.0, y: -10.0, k: 1.0 });
	}

	#[test]
	fn zoom_is_clamped() {
		let mut t = ViewTransform::default();
		for _ in 0..100 {
			t.zoom_at(10.0, 10.0, 1.5);
		}
		assert_eq!(t.k, MAX_ZOOM);
		for _ in 0..100 {
			t.zoom_at(10.0, 10.0, 0.67);
		}
		assert_eq!(t.k, MIN_ZOOM);
	}

	#[test]
	fn search_dims_non_matches_and_hover_overrides() {
		let (sim, mut ctl) = setup();
		let highlighted = HashSet::from(["A".to_string()]);
		assert_eq!(ctl.node_opacity("A", &highlighted), 1.0);
		assert_eq!(ctl.node_opacity("C", &highlighted), DIMMED_NODE);
		assert_eq!(ctl.node_opacity("C", &HashSet::new()), 1.0);

		ctl.hover_at(&sim, 1000.0, 0.0);
		assert_eq!(ctl.hovered(), Some("C"));
		assert_eq!(ctl.label_scale("C"), HOVER_SCALE);
		assert_eq!(ctl.node_opacity("C", &highlighted), 1.0);
		assert_eq!(ctl.node_opacity("B", &highlighted), 1.0);
		assert_eq!(ctl.node_opacity("A", &highlighted), DIMMED_NODE);
		assert_eq!(ctl.link_opacity(&link("B", "C")), 1.0);
		assert_eq!(ctl.link_opacity(&link("A", "B")), DIMMED_LINK);

		ctl.pointer_leave();
		assert_eq!(ctl.node_opacity("C", &highlighted), DIMMED_NODE);
		assert_eq!(ctl.link_opacity(&link("A", "B")), LINK_BASE);
		assert_eq!(ctl.label_scale("C"), 1.0);
	}

	#[test]
	fn hover_is_ignored_while_dragging() {
		let (mut sim, mut ctl) = setup();
		ctl.pointer_down(&mut sim, 0.0, 0.0);
		ctl.hover_at(&sim, 1000.0, 0.0);
		assert_eq!(ctl.hovered(), None);
		ctl.cancel(&mut sim);
		assert_eq!(sim.body("B").unwrap().fx, None);
	}
}
