use std::borrow::Cow;

use serde::Deserialize;

/// Display placeholder for a field with no value.
pub const EMPTY_FIELD: &str = "/";

/// The closed set of entity types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum NodeKind {
	People,
	Institutions,
	Projects,
	Methods,
}

impl NodeKind {
	/// All kinds in display order.
	pub const ALL: [NodeKind; 4] = [
		NodeKind::People,
		NodeKind::Institutions,
		NodeKind::Projects,
		NodeKind::Methods,
	];

	pub fn label(self) -> &'static str {
		match self {
			NodeKind::People => "People",
			NodeKind::Institutions => "Institutions",
			NodeKind::Projects => "Projects",
			NodeKind::Methods => "Methods",
		}
	}

	/// Lower-case singular noun, used in accessible labels.
	pub fn noun(self) -> &'static str {
		match self {
			NodeKind::People => "person",
			NodeKind::Institutions => "institution",
			NodeKind::Projects => "project",
			NodeKind::Methods => "method",
		}
	}

	pub fn color(self) -> &'static str {
		match self {
			NodeKind::People => "#5F5BA3",
			NodeKind::Institutions => "#DC2680",
			NodeKind::Projects => "#EB631A",
			NodeKind::Methods => "#148D66",
		}
	}

	/// Card background and border used by the table view.
	pub fn card_colors(self) -> (&'static str, &'static str) {
		match self {
			NodeKind::People => ("#F4F3F8", "rgba(95, 91, 163, 0.5)"),
			NodeKind::Institutions => ("#FFF6FB", "rgba(220, 38, 128, 0.5)"),
			NodeKind::Projects => ("#FFFAF3", "rgba(235, 98, 26, 0.5)"),
			NodeKind::Methods => ("#EEF9F6", "rgba(20, 141, 102, 0.5)"),
		}
	}
}

/// Free-form text that arrives either as a string or as a list of strings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextField {
	Text(String),
	List(Vec<String>),
	Number(f64),
}

impl TextField {
	/// The whole value as one string, list entries joined by a space.
	pub fn joined(&self) -> Cow<'_, str> {
		match self {
			TextField::Text(s) => Cow::Borrowed(s),
			TextField::List(items) => Cow::Owned(items.join(" ")),
			TextField::Number(n) => Cow::Owned(n.to_string()),
		}
	}

	/// First entry of a list, or the whole text.
	pub fn first(&self) -> Cow<'_, str> {
		match self {
			TextField::List(items) => Cow::Borrowed(items.first().map(String::as_str).unwrap_or("")),
			other => other.joined(),
		}
	}

	/// True for empty values and the "/" placeholder.
	pub fn is_blank(&self) -> bool {
		let text = self.joined();
		let text = text.trim();
		text.is_empty() || text == EMPTY_FIELD
	}
}

/// Returns the field's text, or `None` when it carries no value.
pub fn present(field: &Option<TextField>) -> Option<Cow<'_, str>> {
	field.as_ref().filter(|f| !f.is_blank()).map(TextField::joined)
}

/// Returns a url-like field, or `None` when it carries no value.
pub fn present_str(field: &Option<String>) -> Option<&str> {
	field
		.as_deref()
		.map(str::trim)
		.filter(|s| !s.is_empty() && *s != EMPTY_FIELD)
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PersonFields {
	#[serde(default)]
	pub bio: Option<TextField>,
	#[serde(default)]
	pub connections: Option<TextField>,
	#[serde(default)]
	pub website: Option<String>,
	#[serde(default)]
	pub publications: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct InstitutionFields {
	#[serde(default)]
	pub bio: Option<TextField>,
	#[serde(default)]
	pub website: Option<String>,
	#[serde(default)]
	pub publications: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ProjectFields {
	#[serde(default)]
	pub description: Option<TextField>,
	#[serde(default)]
	pub budget: Option<TextField>,
	#[serde(default)]
	pub methods: Option<TextField>,
	#[serde(default)]
	pub involved_institutions: Option<TextField>,
	#[serde(default)]
	pub website: Option<String>,
	#[serde(default)]
	pub publications: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MethodFields {
	#[serde(default)]
	pub description: Option<TextField>,
	#[serde(default)]
	pub category: Option<TextField>,
	#[serde(default)]
	pub steps: Option<TextField>,
	#[serde(default)]
	pub challenges: Option<TextField>,
	#[serde(default)]
	pub conditions: Option<TextField>,
	/// Publication url.
	#[serde(default)]
	pub links: Option<String>,
	#[serde(default)]
	pub templates: Option<Vec<String>>,
}

/// Type-specific content of a node, tagged by the record's `type` field.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum NodeDetails {
	People(PersonFields),
	Institutions(InstitutionFields),
	Projects(ProjectFields),
	Methods(MethodFields),
}

/// An entity of the graph.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Node {
	pub id: String,
	pub name: String,
	#[serde(flatten)]
	pub details: NodeDetails,
}

impl Node {
	pub fn kind(&self) -> NodeKind {
		match self.details {
			NodeDetails::People(_) => NodeKind::People,
			NodeDetails::Institutions(_) => NodeKind::Institutions,
			NodeDetails::Projects(_) => NodeKind::Projects,
			NodeDetails::Methods(_) => NodeKind::Methods,
		}
	}

	pub fn bio(&self) -> Option<&TextField> {
		match &self.details {
			NodeDetails::People(p) => p.bio.as_ref(),
			NodeDetails::Institutions(i) => i.bio.as_ref(),
			_ => None,
		}
	}

	pub fn description(&self) -> Option<&TextField> {
		match &self.details {
			NodeDetails::Projects(p) => p.description.as_ref(),
			NodeDetails::Methods(m) => m.description.as_ref(),
			_ => None,
		}
	}

	pub fn methods(&self) -> Option<&TextField> {
		match &self.details {
			NodeDetails::Projects(p) => p.methods.as_ref(),
			_ => None,
		}
	}

	pub fn category(&self) -> Option<&TextField> {
		match &self.details {
			NodeDetails::Methods(m) => m.category.as_ref(),
			_ => None,
		}
	}

	pub fn website(&self) -> Option<&str> {
		match &self.details {
			NodeDetails::People(p) => present_str(&p.website),
			NodeDetails::Institutions(i) => present_str(&i.website),
			NodeDetails::Projects(p) => present_str(&p.website),
			NodeDetails::Methods(_) => None,
		}
	}
}

/// Kind of relationship carried by a link.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
	Leads,
	Develops,
	Applies,
	Supports,
	#[default]
	#[serde(other)]
	Default,
}

fn default_strength() -> f64 {
	1.0
}

/// A relationship between two nodes, referenced by id.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Link {
	pub source: String,
	pub target: String,
	#[serde(default)]
	pub relationship: Relationship,
	#[serde(default = "default_strength")]
	pub strength: f64,
}

impl Link {
	pub fn touches(&self, id: &str) -> bool {
		self.source == id || self.target == id
	}

	/// The endpoint opposite to `id`, if the link touches it.
	pub fn other_end(&self, id: &str) -> Option<&str> {
		if self.source == id {
			Some(&self.target)
		} else if self.target == id {
			Some(&self.source)
		} else {
			None
		}
	}

	/// Rendered stroke width.
	pub fn line_width(&self) -> f64 {
		self.strength.max(0.0).sqrt() * 2.0
	}
}

/// The loaded dataset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<Node>,
	pub links: Vec<Link>,
}

impl GraphData {
	/// Looks a node up by id. With duplicate ids the last record wins.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().rev().find(|n| n.id == id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_tagged_node_with_list_bio() {
		let node: Node = serde_json::from_str(
			r#"{"id":"p1","type":"People","name":"Alice","bio":["foo bar","baz"],"website":"/"}"#,
		)
		.unwrap();
		assert_eq!(node.kind(), NodeKind::People);
		assert_eq!(node.bio().unwrap().joined(), "foo bar baz");
		assert_eq!(node.website(), None);
	}

	#[test]
	fn numeric_budget_is_accepted() {
		let node: Node = serde_json::from_str(
			r#"{"id":"x","type":"Projects","name":"Atlas","budget":12000}"#,
		)
		.unwrap();
		let NodeDetails::Projects(fields) = &node.details else {
			panic!("expected a project");
		};
		assert_eq!(present(&fields.budget).as_deref(), Some("12000"));
	}

	#[test]
	fn unknown_relationship_falls_back_to_default() {
		let link: Link =
			serde_json::from_str(r#"{"source":"a","target":"b","relationship":"mentors"}"#).unwrap();
		assert_eq!(link.relationship, Relationship::Default);
		assert_eq!(link.strength, 1.0);
		assert_eq!(link.other_end("b"), Some("a"));
		assert_eq!(link.other_end("c"), None);
	}

	#[test]
	fn slash_counts_as_blank() {
		assert!(TextField::Text(" / ".into()).is_blank());
		assert!(TextField::List(vec![]).is_blank());
		assert!(!TextField::Text("x".into()).is_blank());
	}

	#[test]
	fn last_duplicate_id_wins_lookup() {
		let first: Node =
			serde_json::from_str(r#"{"id":"d","type":"Methods","name":"First"}"#).unwrap();
		let second: Node =
			serde_json::from_str(r#"{"id":"d","type":"Methods","name":"Second"}"#).unwrap();
		let data = GraphData {
			nodes: vec![first, second],
			links: vec![],
		};
		assert_eq!(data.node("d").unwrap().name, "Second");
	}
}
