//! The detail surface: which node is selected and what to show for it.

use super::model::{
	EMPTY_FIELD, GraphData, Node, NodeDetails, Relationship, TextField, present, present_str,
};

/// Currently selected node. Independent of the active view mode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
	selected: Option<String>,
}

impl Selection {
	/// Selects a node, or closes the panel with `None`.
	pub fn select(&mut self, id: Option<&str>) {
		self.selected = id.map(str::to_owned);
	}

	pub fn clear(&mut self) {
		self.selected = None;
	}

	pub fn id(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	pub fn is_open(&self) -> bool {
		self.selected.is_some()
	}

	/// The selected record, if it still exists in `data`.
	pub fn node<'a>(&self, data: &'a GraphData) -> Option<&'a Node> {
		self.id().and_then(|id| data.node(id))
	}
}

/// A node reached through one link of the selected node.
#[derive(Clone, Debug, PartialEq)]
pub struct Connection<'a> {
	pub node: &'a Node,
	pub relationship: Relationship,
}

/// Directly connected nodes of `id`, one entry per link, in link order.
/// Endpoints missing from the dataset are skipped.
pub fn connected_entities<'a>(data: &'a GraphData, id: &str) -> Vec<Connection<'a>> {
	data.links
		.iter()
		.filter_map(|link| {
			let other = link.other_end(id)?;
			let node = data.node(other)?;
			Some(Connection {
				node,
				relationship: link.relationship,
			})
		})
		.collect()
}

/// How a detail section renders.
#[derive(Clone, Debug, PartialEq)]
pub enum SectionBody {
	Text(String),
	/// Boxed text that keeps its line breaks.
	Preformatted(String),
	/// Short value shown as a pill.
	Tag(String),
	Link { href: String, label: &'static str },
	List(Vec<String>),
	/// No value; rendered as "/".
	Empty,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetailSection {
	pub title: &'static str,
	pub body: SectionBody,
}

fn text(title: &'static str, field: &Option<TextField>) -> DetailSection {
	section(title, present(field).map(|s| SectionBody::Text(s.into_owned())))
}

fn boxed(title: &'static str, field: &Option<TextField>) -> DetailSection {
	section(
		title,
		present(field).map(|s| SectionBody::Preformatted(s.into_owned())),
	)
}

fn tag(title: &'static str, field: &Option<TextField>) -> DetailSection {
	section(title, present(field).map(|s| SectionBody::Tag(s.into_owned())))
}

fn link(title: &'static str, href: &Option<String>, label: &'static str) -> DetailSection {
	section(
		title,
		present_str(href).map(|href| SectionBody::Link {
			href: href.to_owned(),
			label,
		}),
	)
}

fn list(title: &'static str, items: &Option<Vec<String>>) -> Option<DetailSection> {
	let items: Vec<String> = items
		.iter()
		.flatten()
		.map(|s| s.trim())
		.filter(|s| !s.is_empty() && *s != EMPTY_FIELD)
		.map(str::to_owned)
		.collect();
	(!items.is_empty()).then(|| DetailSection {
		title,
		body: SectionBody::List(items),
	})
}

fn section(title: &'static str, body: Option<SectionBody>) -> DetailSection {
	DetailSection {
		title,
		body: body.unwrap_or(SectionBody::Empty),
	}
}

/// Titled sections for the detail panel. Every field the type defines gets
/// a section; absent values become [`SectionBody::Empty`]. Optional lists
/// only appear when they have entries.
pub fn detail_sections(node: &Node) -> Vec<DetailSection> {
	let mut sections = match &node.details {
		NodeDetails::People(p) => vec![
			text("Biography", &p.bio),
			boxed("Institutional Connections", &p.connections),
			link("Website", &p.website, "Visit Website"),
		],
		NodeDetails::Institutions(i) => vec![
			text("Description", &i.bio),
			link("Website", &i.website, "Visit Website"),
		],
		NodeDetails::Projects(p) => vec![
			text("Description", &p.description),
			tag("Budget", &p.budget),
			text("Methods", &p.methods),
			text("Involved Institutions", &p.involved_institutions),
			link("Website", &p.website, "Visit Website"),
		],
		NodeDetails::Methods(m) => vec![
			text("Description", &m.description),
			tag("Category", &m.category),
			boxed("Steps", &m.steps),
			text("What challenges might you encounter?", &m.challenges),
			text("What conditions / materials are needed?", &m.conditions),
			link("Links", &m.links, "View Publication"),
		],
	};
	let extras = match &node.details {
		NodeDetails::People(p) => list("Publications", &p.publications),
		NodeDetails::Institutions(i) => list("Publications", &i.publications),
		NodeDetails::Projects(p) => list("Publications", &p.publications),
		NodeDetails::Methods(m) => list("Templates", &m.templates),
	};
	sections.extend(extras);
	sections
}

/// Truncated card summary: the first entry of the field, cut at `max` chars.
pub fn summary(field: Option<&TextField>, max: usize) -> Option<String> {
	let field = field.filter(|f| !f.is_blank())?;
	let first = field.first();
	let cut: String = first.chars().take(max).collect();
	Some(format!("{cut}..."))
}

/// Which screen edge a resizable panel is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelSide {
	Left,
	Right,
}

/// Width of a side panel as a percentage of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelWidth(f64);

impl PanelWidth {
	pub const MIN: f64 = 20.0;
	pub const MAX: f64 = 80.0;
	pub const STEP: f64 = 5.0;

	pub fn new(percent: f64) -> Self {
		Self(percent.clamp(Self::MIN, Self::MAX))
	}

	pub fn percent(self) -> f64 {
		self.0
	}

	/// Grows (`+1`) or shrinks (`-1`) by one keyboard step.
	pub fn step(self, direction: i8) -> Self {
		Self::new(self.0 + Self::STEP * f64::from(direction.signum()))
	}

	/// Width implied by dragging the panel's inner edge to `pointer_x`.
	pub fn from_pointer(pointer_x: f64, viewport_width: f64, side: PanelSide) -> Self {
		if viewport_width <= 0.0 {
			return Self::default();
		}
		let edge = match side {
			PanelSide::Left => pointer_x,
			PanelSide::Right => viewport_width - pointer_x,
		};
		Self::new(edge * 100.0 / viewport_width)
	}
}

impl Default for PanelWidth {
	fn default() -> Self {
		Self(50.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::model::Link;

	fn data() -> GraphData {
		let nodes = serde_json::from_value(serde_json::json!([
			{"id": "p", "type": "People", "name": "Ada", "bio": "Researcher", "website": ""},
			{"id": "m", "type": "Methods", "name": "Walkshop", "category": "/", "steps": "1. go\n2. look",
			 "links": "https://example.org/paper", "templates": ["t1", " "]},
			{"id": "i", "type": "Institutions", "name": "Lab"},
		]))
		.unwrap();
		let link = |s: &str, t: &str, r| Link {
			source: s.into(),
			target: t.into(),
			relationship: r,
			strength: 1.0,
		};
		GraphData {
			nodes,
			links: vec![
				link("p", "m", Relationship::Develops),
				link("i", "p", Relationship::Supports),
				link("p", "ghost", Relationship::Leads),
			],
		}
	}

	#[test]
	fn connections_resolve_both_directions_and_skip_unknown() {
		let data = data();
		let names: Vec<&str> = connected_entities(&data, "p")
			.iter()
			.map(|c| c.node.name.as_str())
			.collect();
		assert_eq!(names, vec!["Walkshop", "Lab"]);
	}

	#[test]
	fn person_sections_fall_back_to_placeholder() {
		let data = data();
		let sections = detail_sections(data.node("p").unwrap());
		let titles: Vec<&str> = sections.iter().map(|s| s.title).collect();
		assert_eq!(
			titles,
			vec!["Biography", "Institutional Connections", "Website"]
		);
		assert_eq!(sections[0].body, SectionBody::Text("Researcher".into()));
		assert_eq!(sections[1].body, SectionBody::Empty);
		assert_eq!(sections[2].body, SectionBody::Empty);
	}

	#[test]
	fn method_sections_cover_schema() {
		let data = data();
		let sections = detail_sections(data.node("m").unwrap());
		assert_eq!(sections.len(), 7);
		assert_eq!(sections[1].body, SectionBody::Empty);
		assert_eq!(
			sections[2].body,
			SectionBody::Preformatted("1. go\n2. look".into())
		);
		assert_eq!(
			sections[5].body,
			SectionBody::Link {
				href: "https://example.org/paper".into(),
				label: "View Publication",
			}
		);
		assert_eq!(sections[6].body, SectionBody::List(vec!["t1".into()]));
	}

	#[test]
	fn reselecting_replaces_in_place() {
		let data = data();
		let mut selection = Selection::default();
		selection.select(Some("p"));
		let next = connected_entities(&data, "p")[0].node.id.clone();
		selection.select(Some(&next));
		assert_eq!(selection.node(&data).unwrap().name, "Walkshop");
		selection.select(None);
		assert!(!selection.is_open());
	}

	#[test]
	fn summaries_use_first_entry() {
		let list = TextField::List(vec!["abcdef".into(), "zzz".into()]);
		assert_eq!(summary(Some(&list), 3).as_deref(), Some("abc..."));
		assert_eq!(summary(Some(&TextField::Text("/".into())), 3), None);
		assert_eq!(summary(None, 3), None);
	}

	#[test]
	fn panel_width_is_clamped() {
		let mut width = PanelWidth::default();
		for _ in 0..20 {
			width = width.step(1);
		}
		assert_eq!(width.percent(), PanelWidth::MAX);
		for _ in 0..20 {
			width = width.step(-1);
		}
		assert_eq!(width.percent(), PanelWidth::MIN);
		assert_eq!(
			PanelWidth::from_pointer(300.0, 1000.0, PanelSide::Right).percent(),
			70.0
		);
		assert_eq!(
			PanelWidth::from_pointer(50.0, 1000.0, PanelSide::Left).percent(),
			PanelWidth::MIN
		);
	}
}
