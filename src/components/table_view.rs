use leptos::prelude::*;

use super::use_workspace;
use crate::graph::selection::summary;
use crate::graph::{Node, NodeKind};

const MATCH_BACKGROUND: &str = "#F6FFFF";
const MATCH_BORDER: &str = "#00837F";

/// Card summary: people show 80 characters of biography, everything else
/// 100 characters of its description.
fn card_summary(node: &Node) -> Option<String> {
	match node.kind() {
		NodeKind::People => summary(node.bio(), 80),
		NodeKind::Institutions => summary(node.bio(), 100),
		NodeKind::Projects | NodeKind::Methods => summary(node.description(), 100),
	}
}

#[component]
fn EntityCard(node: Node, position: usize, total: usize) -> impl IntoView {
	let ws = use_workspace();
	let kind = node.kind();
	let id = node.id.clone();
	let is_match = {
		let id = id.clone();
		move || ws.highlighted.with(|h| h.contains(&id))
	};
	let is_match_bg = is_match.clone();
	let (background, border) = kind.card_colors();
	let summary_id = format!("node-{}-summary", node.id);
	let label = format!(
		"View details for {}, {} {position} of {total}",
		node.name,
		kind.noun()
	);
	let category = node.category().map(|c| c.joined().into_owned());
	let summary = card_summary(&node);
	let described_by = summary.is_some().then(|| summary_id.clone());
	let has_website = kind == NodeKind::Institutions && node.website().is_some();

	view! {
		<button
			class="entity-card"
			class:entity-card-match=is_match.clone()
			style:background-color=move || if is_match_bg() { MATCH_BACKGROUND } else { background }
			style:border-color=move || if is_match() { MATCH_BORDER } else { border }
			aria-label=label
			aria-describedby=described_by
			on:click=move |_| ws.select(&id)
		>
			<div class="entity-card-name">{node.name.clone()}</div>
			{category
				.map(|c| {
					view! {
						<div class="entity-card-tag" style:background-color=kind.color()>
							{c}
						</div>
					}
				})}
			{summary
				.map(|s| {
					view! {
						<div id=summary_id class="entity-card-summary">
							{s}
						</div>
					}
				})}
			<Show when=move || has_website>
				<div class="entity-card-website" style:color=kind.color()>
					"Website"
				</div>
			</Show>
		</button>
	}
}

/// Accessible alternative to the map: one column per entity type.
#[component]
pub fn TableView() -> impl IntoView {
	let ws = use_workspace();

	let column = move |kind: NodeKind| {
		let nodes: Vec<Node> = ws
			.visible
			.with(|d| d.nodes.iter().filter(|n| n.kind() == kind).cloned().collect());
		let total = nodes.len();
		let cards = nodes
			.into_iter()
			.enumerate()
			.map(|(i, node)| view! { <EntityCard node=node position=i + 1 total=total /> })
			.collect_view();
		view! {
			<section class="table-column" aria-label=format!("{} entities", kind.label())>
				<h3 class="table-column-header">
					<span
						class="legend-swatch"
						style:background-color=kind.color()
						aria-hidden="true"
					/>
					{kind.label()}
					" ("
					{total}
					")"
				</h3>
				<div class="table-column-cards">{cards}</div>
			</section>
		}
	};

	view! {
		<div class="table-view" role="main" aria-label="Accessible table view of network data">
			<p class="sr-only">
				{move || {
					format!(
						"Table showing {} entities organized by type: People, Institutions, Projects, and Methods.",
						ws.visible.with(|d| d.nodes.len()),
					)
				}}
			</p>
			<div class="table-columns">
				{move || NodeKind::ALL.into_iter().map(column).collect_view()}
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(json: serde_json::Value) -> Node {
		serde_json::from_value(json).unwrap()
	}

	#[test]
	fn people_summaries_are_shorter() {
		let long = "x".repeat(150);
		let person = node(serde_json::json!({"id": "p", "name": "P", "type": "People", "bio": long}));
		let project = node(serde_json::json!({"id": "q", "name": "Q", "type": "Projects", "description": long}));
		assert_eq!(card_summary(&person).unwrap().len(), 83);
		assert_eq!(card_summary(&project).unwrap().len(), 103);
	}

	#[test]
	fn missing_summary_is_none() {
		let method = node(serde_json::json!({"id": "m", "name": "M", "type": "Methods"}));
		assert_eq!(card_summary(&method), None);
	}
}
