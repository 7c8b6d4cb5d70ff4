//! Compile-time settings for the viewer and its layout engine.

use crate::graph::model::Relationship;

/// Application-level settings.
#[derive(Clone, Debug)]
pub struct AppConfig {
	/// Path of the static dataset fetched at start-up.
	pub data_url: &'static str,
	/// Heading shown in the toolbar.
	pub title: &'static str,
	/// Browser tab title.
	pub document_title: &'static str,
	/// External feedback form opened by the floating button.
	pub feedback_url: &'static str,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			data_url: "/data/graphData.json",
			title: "VOICE Knowledge Platform",
			document_title: "VOICE Prototype V1",
			feedback_url: "https://forms.gle/3MvF5N2VCE85YuuAA",
		}
	}
}

/// Rest length of a link, per relationship kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkDistances {
	/// `leads`
	pub leads: f64,
	/// `develops`
	pub develops: f64,
	/// `applies`
	pub applies: f64,
	/// `supports`
	pub supports: f64,
	/// Anything else.
	pub fallback: f64,
}

impl LinkDistances {
	/// Target separation for a link of the given kind.
	pub fn for_relationship(&self, relationship: Relationship) -> f64 {
		match relationship {
			Relationship::Leads => self.leads,
			Relationship::Develops => self.develops,
			Relationship::Applies => self.applies,
			Relationship::Supports => self.supports,
			Relationship::Default => self.fallback,
		}
	}
}

impl Default for LinkDistances {
	fn default() -> Self {
		Self {
			leads: 150.0,
			develops: 180.0,
			applies: 200.0,
			supports: 220.0,
			fallback: 180.0,
		}
	}
}

/// Physics constants of the force simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	pub link_distances: LinkDistances,
	/// Many-body strength; negative values repel.
	pub charge_strength: f64,
	/// Squared distance below which repulsion stops growing.
	pub charge_distance_min2: f64,
	pub center_strength: f64,
	pub collision_radius: f64,
	pub collision_strength: f64,
	pub alpha_min: f64,
	pub alpha_decay: f64,
	/// Target temperature while a node is dragged.
	pub drag_alpha_target: f64,
	/// Fraction of velocity lost each tick.
	pub velocity_decay: f64,
	pub initial_radius: f64,
	/// Half extents of the label box used for hit-testing.
	pub label_half_width: f64,
	pub label_half_height: f64,
	/// Seed of the jiggle generator.
	pub seed: u32,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		let alpha_min = 0.001;
		Self {
			link_distances: LinkDistances::default(),
			charge_strength: -300.0,
			charge_distance_min2: 1.0,
			center_strength: 1.0,
			collision_radius: 140.0,
			collision_strength: 1.0,
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			drag_alpha_target: 0.3,
			velocity_decay: 0.4,
			initial_radius: 10.0,
			label_half_width: 130.0,
			label_half_height: 90.0,
			seed: 1,
		}
	}
}
