use std::collections::HashSet;

use super::model::{GraphData, Node, NodeKind, TextField};

/// Per-type visibility toggles. Every type starts visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleTypes {
	people: bool,
	institutions: bool,
	projects: bool,
	methods: bool,
}

impl Default for VisibleTypes {
	fn default() -> Self {
		Self {
			people: true,
			institutions: true,
			projects: true,
			methods: true,
		}
	}
}

impl VisibleTypes {
	fn flag_mut(&mut self, kind: NodeKind) -> &mut bool {
		match kind {
			NodeKind::People => &mut self.people,
			NodeKind::Institutions => &mut self.institutions,
			NodeKind::Projects => &mut self.projects,
			NodeKind::Methods => &mut self.methods,
		}
	}

	pub fn is_visible(&self, kind: NodeKind) -> bool {
		match kind {
			NodeKind::People => self.people,
			NodeKind::Institutions => self.institutions,
			NodeKind::Projects => self.projects,
			NodeKind::Methods => self.methods,
		}
	}

	pub fn set(&mut self, kind: NodeKind, visible: bool) {
		*self.flag_mut(kind) = visible;
	}

	pub fn toggle(&mut self, kind: NodeKind) {
		let flag = self.flag_mut(kind);
		*flag = !*flag;
	}
}

/// Keeps the nodes whose type is visible and the links whose endpoints both
/// survive. Dataset order is preserved.
pub fn filter_visible(data: &GraphData, visible: VisibleTypes) -> GraphData {
	let nodes: Vec<Node> = data
		.nodes
		.iter()
		.filter(|n| visible.is_visible(n.kind()))
		.cloned()
		.collect();
	let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
	let links = data
		.links
		.iter()
		.filter(|l| ids.contains(l.source.as_str()) && ids.contains(l.target.as_str()))
		.cloned()
		.collect();
	GraphData { nodes, links }
}

fn field_matches(field: Option<&TextField>, needle: &str) -> bool {
	field.is_some_and(|f| f.joined().to_lowercase().contains(needle))
}

fn node_matches(node: &Node, needle: &str) -> bool {
	node.name.to_lowercase().contains(needle)
		|| field_matches(node.bio(), needle)
		|| field_matches(node.description(), needle)
		|| field_matches(node.methods(), needle)
		|| field_matches(node.category(), needle)
}

/// Ids of the nodes matching `query`, case-insensitively.
///
/// A blank query yields an empty set, which callers read as "no highlight".
pub fn search(nodes: &[Node], query: &str) -> HashSet<String> {
	if query.trim().is_empty() {
		return HashSet::new();
	}
	let needle = query.to_lowercase();
	nodes
		.iter()
		.filter(|n| node_matches(n, &needle))
		.map(|n| n.id.clone())
		.collect()
}

/// Number of nodes of each type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TypeCounts([usize; 4]);

impl TypeCounts {
	pub fn of(nodes: &[Node]) -> Self {
		let mut counts = [0; 4];
		for node in nodes {
			counts[slot(node.kind())] += 1;
		}
		Self(counts)
	}

	pub fn get(&self, kind: NodeKind) -> usize {
		self.0[slot(kind)]
	}
}

fn slot(kind: NodeKind) -> usize {
	match kind {
		NodeKind::People => 0,
		NodeKind::Institutions => 1,
		NodeKind::Projects => 2,
		NodeKind::Methods => 3,
	}
}
