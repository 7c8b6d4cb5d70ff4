//! Force-directed layout.
//!
//! Positions live in a table parallel to the visible node list, keyed by node
//! id, so entity records stay immutable. Each [`Simulation::tick`] applies
//! four forces (link springs, many-body repulsion, centering, collision) and
//! then integrates velocities. The temperature `alpha` decays toward
//! `alpha_target`; once it drops below `alpha_min` the simulation goes idle
//! until something re-heats it.

use std::collections::HashMap;
use std::f64::consts::PI;

use log::debug;

use super::model::{Link, Node};
use crate::config::LayoutConfig;

/// Live physical state of one node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Pinned position while dragged.
	pub fx: Option<f64>,
	pub fy: Option<f64>,
}

#[derive(Clone, Debug)]
struct Spring {
	source: usize,
	target: usize,
	distance: f64,
	strength: f64,
	bias: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunState {
	Running,
	Idle,
	Stopped,
}

/// Linear congruential generator used to separate coincident points
/// reproducibly.
#[derive(Clone, Debug)]
struct Lcg(u32);

impl Lcg {
	fn next(&mut self) -> f64 {
		self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
		self.0 as f64 / 4_294_967_296.0
	}

	fn jiggle(&mut self) -> f64 {
		(self.next() - 0.5) * 1e-6
	}
}

pub struct Simulation {
	config: LayoutConfig,
	ids: Vec<String>,
	index: HashMap<String, usize>,
	bodies: Vec<Body>,
	springs: Vec<Spring>,
	center: (f64, f64),
	alpha: f64,
	alpha_target: f64,
	state: RunState,
	rng: Lcg,
	ticks: u64,
}

impl Simulation {
	/// Builds a fresh simulation for the visible set. Links whose endpoints
	/// are not among `nodes` are skipped.
	pub fn new(nodes: &[Node], links: &[Link], width: f64, height: f64, config: LayoutConfig) -> Self {
		let initial_angle = PI * (3.0 - 5f64.sqrt());
		let mut ids = Vec::with_capacity(nodes.len());
		let mut index = HashMap::with_capacity(nodes.len());
		let mut bodies = Vec::with_capacity(nodes.len());

		for (i, node) in nodes.iter().enumerate() {
			let radius = config.initial_radius * (0.5 + i as f64).sqrt();
			let angle = i as f64 * initial_angle;
			bodies.push(Body {
				x: radius * angle.cos(),
				y: radius * angle.sin(),
				..Body::default()
			});
			index.insert(node.id.clone(), i);
			ids.push(node.id.clone());
		}

		let mut degree = vec![0usize; bodies.len()];
		let mut resolved = Vec::with_capacity(links.len());
		for link in links {
			match (index.get(&link.source), index.get(&link.target)) {
				(Some(&source), Some(&target)) => {
					degree[source] += 1;
					degree[target] += 1;
					resolved.push((source, target, link.relationship));
				}
				_ => debug!("skipping link {} -> {}: endpoint not visible", link.source, link.target),
			}
		}

		let springs = resolved
			.into_iter()
			.map(|(source, target, relationship)| {
				let (ds, dt) = (degree[source] as f64, degree[target] as f64);
				Spring {
					source,
					target,
					distance: config.link_distances.for_relationship(relationship),
					strength: 1.0 / ds.min(dt),
					bias: ds / (ds + dt),
				}
			})
			.collect();

		let rng = Lcg(config.seed);
		Self {
			config,
			ids,
			index,
			bodies,
			springs,
			center: (width / 2.0, height / 2.0),
			alpha: 1.0,
			alpha_target: 0.0,
			state: RunState::Running,
			rng,
			ticks: 0,
		}
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn ticks(&self) -> u64 {
		self.ticks
	}

	/// True while the simulation still advances on [`tick`](Self::tick).
	pub fn is_running(&self) -> bool {
		self.state == RunState::Running
	}

	pub fn is_stopped(&self) -> bool {
		self.state == RunState::Stopped
	}

	pub fn node_count(&self) -> usize {
		self.bodies.len()
	}

	pub fn link_count(&self) -> usize {
		self.springs.len()
	}

	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	/// Wakes an idle simulation. A stopped one stays stopped.
	pub fn restart(&mut self) {
		if self.state == RunState::Idle {
			debug!("simulation re-heated at alpha {:.4}", self.alpha);
			self.state = RunState::Running;
		}
	}

	/// Ends the simulation for good. Later ticks are no-ops.
	pub fn stop(&mut self) {
		if self.state != RunState::Stopped {
			debug!("simulation stopped after {} ticks", self.ticks);
			self.state = RunState::Stopped;
		}
	}

	/// Moves the centering target, e.g. after a viewport resize.
	pub fn set_center(&mut self, width: f64, height: f64) {
		self.center = (width / 2.0, height / 2.0);
	}

	pub fn body(&self, id: &str) -> Option<&Body> {
		self.index.get(id).map(|&i| &self.bodies[i])
	}

	pub fn position(&self, id: &str) -> Option<(f64, f64)> {
		self.body(id).map(|b| (b.x, b.y))
	}

	/// Every visible node with its body, in draw order.
	pub fn positions(&self) -> impl Iterator<Item = (&str, &Body)> {
		self.ids.iter().map(String::as_str).zip(self.bodies.iter())
	}

	/// Pins a node at `(x, y)`; it stays there until released.
	pub fn pin(&mut self, id: &str, x: f64, y: f64) -> bool {
		let Some(&i) = self.index.get(id) else {
			return false;
		};
		let body = &mut self.bodies[i];
		body.fx = Some(x);
		body.fy = Some(y);
		body.x = x;
		body.y = y;
		true
	}

	/// Hands a pinned node back to the forces.
	pub fn release(&mut self, id: &str) -> bool {
		let Some(&i) = self.index.get(id) else {
			return false;
		};
		let body = &mut self.bodies[i];
		body.fx = None;
		body.fy = None;
		true
	}

	/// Topmost node whose label box contains the graph-space point.
	pub fn node_at(&self, x: f64, y: f64) -> Option<&str> {
		let (hw, hh) = (self.config.label_half_width, self.config.label_half_height);
		self.ids
			.iter()
			.zip(self.bodies.iter())
			.rev()
			.find(|(_, b)| (b.x - x).abs() <= hw && (b.y - y).abs() <= hh)
			.map(|(id, _)| id.as_str())
	}

	/// Advances one step. Returns false when nothing moved because the
	/// simulation is idle or stopped.
	pub fn tick(&mut self) -> bool {
		if self.state != RunState::Running {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;

		self.apply_links();
		self.apply_charge();
		self.apply_center();
		self.apply_collision();
		self.integrate();

		self.ticks += 1;
		if self.alpha < self.config.alpha_min {
			debug!("simulation cooled after {} ticks", self.ticks);
			self.state = RunState::Idle;
		}
		true
	}

	/// Ticks until idle or until `max_ticks` steps have run.
	pub fn run_until_idle(&mut self, max_ticks: usize) -> usize {
		let mut steps = 0;
		while steps < max_ticks && self.tick() {
			steps += 1;
		}
		steps
	}

	fn apply_links(&mut self) {
		let alpha = self.alpha;
		for spring in &self.springs {
			let (s, t) = (self.bodies[spring.source], self.bodies[spring.target]);
			let mut x = t.x + t.vx - s.x - s.vx;
			let mut y = t.y + t.vy - s.y - s.vy;
			if x == 0.0 {
				x = self.rng.jiggle();
			}
			if y == 0.0 {
				y = self.rng.jiggle();
			}
			let mut l = (x * x + y * y).sqrt();
			l = (l - spring.distance) / l * alpha * spring.strength;
			x *= l;
			y *= l;

			let b = spring.bias;
			let target = &mut self.bodies[spring.target];
			target.vx -= x * b;
			target.vy -= y * b;
			let source = &mut self.bodies[spring.source];
			source.vx += x * (1.0 - b);
			source.vy += y * (1.0 - b);
		}
	}

	fn apply_charge(&mut self) {
		let strength = self.config.charge_strength * self.alpha;
		let min2 = self.config.charge_distance_min2;
		let n = self.bodies.len();
		for i in 0..n {
			let (xi, yi) = (self.bodies[i].x, self.bodies[i].y);
			let (mut dvx, mut dvy) = (0.0, 0.0);
			for j in 0..n {
				if i == j {
					continue;
				}
				let mut x = self.bodies[j].x - xi;
				let mut y = self.bodies[j].y - yi;
				let mut l = x * x + y * y;
				if x == 0.0 {
					x = self.rng.jiggle();
					l += x * x;
				}
				if y == 0.0 {
					y = self.rng.jiggle();
					l += y * y;
				}
				if l < min2 {
					l = (min2 * l).sqrt();
				}
				dvx += x * strength / l;
				dvy += y * strength / l;
			}
			self.bodies[i].vx += dvx;
			self.bodies[i].vy += dvy;
		}
	}

	fn apply_center(&mut self) {
		let n = self.bodies.len();
		if n == 0 {
			return;
		}
		let (sx, sy) = self
			.bodies
			.iter()
			.fold((0.0, 0.0), |(sx, sy), b| (sx + b.x, sy + b.y));
		let k = self.config.center_strength;
		let shift_x = (sx / n as f64 - self.center.0) * k;
		let shift_y = (sy / n as f64 - self.center.1) * k;
		for body in &mut self.bodies {
			body.x -= shift_x;
			body.y -= shift_y;
		}
	}

	fn apply_collision(&mut self) {
		let r = self.config.collision_radius;
		if r <= 0.0 {
			return;
		}
		let strength = self.config.collision_strength;
		let reach = r + r;
		// Equal radii split every correction evenly.
		let share = 0.5;
		let n = self.bodies.len();
		for i in 0..n {
			let xi = self.bodies[i].x + self.bodies[i].vx;
			let yi = self.bodies[i].y + self.bodies[i].vy;
			for j in (i + 1)..n {
				let other = self.bodies[j];
				let mut x = xi - (other.x + other.vx);
				let mut y = yi - (other.y + other.vy);
				let mut l = x * x + y * y;
				if l >= reach * reach {
					continue;
				}
				if x == 0.0 {
					x = self.rng.jiggle();
					l += x * x;
				}
				if y == 0.0 {
					y = self.rng.jiggle();
					l += y * y;
				}
				let d = l.sqrt();
				let push = (reach - d) / d * strength;
				x *= push;
				y *= push;
				self.bodies[i].vx += x * share;
				self.bodies[i].vy += y * share;
				self.bodies[j].vx -= x * (1.0 - share);
				self.bodies[j].vy -= y * (1.0 - share);
			}
		}
	}

	fn integrate(&mut self) {
		let keep = 1.0 - self.config.velocity_decay;
		for body in &mut self.bodies {
			match body.fx {
				Some(fx) => {
					body.x = fx;
					body.vx = 0.0;
				}
				None => {
					body.vx *= keep;
					body.x += body.vx;
				}
			}
			match body.fy {
				Some(fy) => {
					body.y = fy;
					body.vy = 0.0;
				}
				None => {
					body.vy *= keep;
					body.y += body.vy;
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::model::Relationship;

	fn nodes(ids: &[&str]) -> Vec<Node> {
		ids.iter()
			.map(|id| {
				serde_json::from_value(serde_json::json!({
					"id": id,
					"name": id,
					"type": "People",
				}))
				.unwrap()
			})
			.collect()
	}

	fn link(source: &str, target: &str, relationship: Relationship) -> Link {
		Link {
			source: source.into(),
			target: target.into(),
			relationship,
			strength: 1.0,
		}
	}

	fn distance(sim: &Simulation, a: &str, b: &str) -> f64 {
		let (ax, ay) = sim.position(a).unwrap();
		let (bx, by) = sim.position(b).unwrap();
		((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
	}

	#[test]
	fn cools_to_idle_after_about_three_hundred_ticks() {
		let mut sim = Simulation::new(
			&nodes(&["a", "b", "c"]),
			&[link("a", "b", Relationship::Leads)],
			800.0,
			600.0,
			LayoutConfig::default(),
		);
		let steps = sim.run_until_idle(1_000);
		assert!((295..=305).contains(&steps), "took {steps} ticks");
		assert!(!sim.is_running());
		assert!(!sim.tick());
	}

	#[test]
	fn spring_settles_at_relationship_rest_length() {
		let config = LayoutConfig {
			charge_strength: 0.0,
			collision_radius: 0.0,
			..LayoutConfig::default()
		};
		let mut sim = Simulation::new(
			&nodes(&["a", "b"]),
			&[link("a", "b", Relationship::Supports)],
			0.0,
			0.0,
			config,
		);
		sim.run_until_idle(1_000);
		assert!((distance(&sim, "a", "b") - 220.0).abs() < 2.0);
	}

	#[test]
	fn collision_keeps_unlinked_nodes_apart() {
		let mut sim = Simulation::new(
			&nodes(&["a", "b", "c", "d"]),
			&[],
			1000.0,
			700.0,
			LayoutConfig::default(),
		);
		sim.run_until_idle(1_000);
		assert!(distance(&sim, "a", "b") > 200.0);
		assert!(distance(&sim, "c", "d") > 200.0);
	}

	#[test]
	fn centroid_is_pulled_to_viewport_center() {
		let mut sim = Simulation::new(
			&nodes(&["a", "b", "c"]),
			&[link("a", "b", Relationship::Leads), link("b", "c", Relationship::Applies)],
			1000.0,
			700.0,
			LayoutConfig::default(),
		);
		sim.run_until_idle(1_000);
		let (sx, sy) = sim
			.positions()
			.fold((0.0, 0.0), |(sx, sy), (_, b)| (sx + b.x, sy + b.y));
		assert!((sx / 3.0 - 500.0).abs() < 5.0);
		assert!((sy / 3.0 - 350.0).abs() < 5.0);
	}

	#[test]
	fn pinned_node_holds_position_until_released() {
		let mut sim = Simulation::new(
			&nodes(&["x", "y"]),
			&[link("x", "y", Relationship::Develops)],
			800.0,
			600.0,
			LayoutConfig::default(),
		);
		assert!(sim.pin("x", 100.0, 200.0));
		for _ in 0..10 {
			sim.tick();
		}
		assert_eq!(sim.position("x"), Some((100.0, 200.0)));
		assert!(sim.release("x"));
		let body = sim.body("x").unwrap();
		assert_eq!((body.fx, body.fy), (None, None));
	}

	#[test]
	fn links_to_hidden_nodes_are_skipped() {
		let sim = Simulation::new(
			&nodes(&["a", "b"]),
			&[link("a", "b", Relationship::Leads), link("b", "gone", Relationship::Leads)],
			800.0,
			600.0,
			LayoutConfig::default(),
		);
		assert_eq!(sim.link_count(), 1);
	}

	#[test]
	fn stopped_simulation_never_moves_again() {
		let mut sim = Simulation::new(&nodes(&["a", "b"]), &[], 800.0, 600.0, LayoutConfig::default());
		sim.tick();
		let before: Vec<Body> = sim.positions().map(|(_, b)| *b).collect();
		sim.stop();
		sim.restart();
		assert!(!sim.tick());
		let after: Vec<Body> = sim.positions().map(|(_, b)| *b).collect();
		assert_eq!(before, after);
	}

	#[test]
	fn drag_target_reheats_idle_simulation() {
		let mut sim = Simulation::new(&nodes(&["a", "b"]), &[], 800.0, 600.0, LayoutConfig::default());
		sim.run_until_idle(1_000);
		assert!(!sim.is_running());
		sim.set_alpha_target(0.3);
		sim.restart();
		for _ in 0..100 {
			assert!(sim.tick());
		}
		assert!(sim.alpha() > 0.2);
	}

	#[test]
	fn hit_test_prefers_topmost_label() {
		let mut sim = Simulation::new(&nodes(&["a", "b"]), &[], 0.0, 0.0, LayoutConfig::default());
		sim.pin("a", 0.0, 0.0);
		sim.pin("b", 50.0, 0.0);
		assert_eq!(sim.node_at(20.0, 10.0), Some("b"));
		assert_eq!(sim.node_at(-120.0, 0.0), Some("a"));
		assert_eq!(sim.node_at(0.0, 500.0), None);
	}
}
