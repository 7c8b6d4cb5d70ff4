use leptos::prelude::*;

use super::resize_handle::ResizeHandle;
use super::use_workspace;
use crate::graph::model::EMPTY_FIELD;
use crate::graph::selection::{
	DetailSection, PanelSide, SectionBody, connected_entities, detail_sections,
};
use crate::graph::{Node, PanelWidth};

fn section_view(section: DetailSection) -> impl IntoView {
	let body = match section.body {
		SectionBody::Text(text) => view! { <p class="detail-text">{text}</p> }.into_any(),
		SectionBody::Preformatted(text) => view! { <div class="detail-box">{text}</div> }.into_any(),
		SectionBody::Tag(text) => view! { <span class="detail-tag">{text}</span> }.into_any(),
		SectionBody::Link { href, label } => view! {
			<a class="detail-link" href=href target="_blank" rel="noopener noreferrer">
				{label}
				" ↗"
			</a>
		}
		.into_any(),
		SectionBody::List(items) => view! {
			<ul class="detail-list">
				{items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}
			</ul>
		}
		.into_any(),
		SectionBody::Empty => view! { <p class="detail-text">{EMPTY_FIELD}</p> }.into_any(),
	};
	view! {
		<section class="detail-section">
			<h3 class="detail-section-title">{section.title}</h3>
			{body}
		</section>
	}
}

#[component]
fn DetailBody(node: Node) -> impl IntoView {
	let ws = use_workspace();
	let connections: Vec<(String, String, &'static str, &'static str)> = ws.data.with(|d| {
		connected_entities(d, &node.id)
			.into_iter()
			.map(|c| {
				let kind = c.node.kind();
				(c.node.id.clone(), c.node.name.clone(), kind.label(), kind.color())
			})
			.collect()
	});
	let kind = node.kind();
	let sections = detail_sections(&node)
		.into_iter()
		.map(section_view)
		.collect_view();
	let rows = connections
		.into_iter()
		.map(|(id, name, kind_label, color)| {
			view! {
				<li>
					<button class="connection-row" on:click=move |_| ws.select(&id)>
						<span class="connection-dot" style:background-color=color aria-hidden="true" />
						<span class="connection-name">{name}</span>
						<span class="connection-kind">{kind_label}</span>
						<span aria-hidden="true">"→"</span>
					</button>
				</li>
			}
		})
		.collect_view();

	view! {
		<header class="detail-header">
			<span class="connection-dot" style:background-color=kind.color() aria-hidden="true" />
			<div>
				<h2 id="detail-title" class="detail-name">{node.name.clone()}</h2>
				<p class="detail-kind">{kind.label()}</p>
			</div>
			<button
				class="panel-close"
				aria-label="Close details"
				title="Close"
				on:click=move |_| ws.ui.update(|u| u.selection.clear())
			>
				"×"
			</button>
		</header>
		<div class="detail-scroll">
			{sections}
			<section class="detail-section">
				<h3 class="detail-section-title">"Connected Entities"</h3>
				<ul class="connection-list">{rows}</ul>
			</section>
		</div>
	}
}

/// Right-hand panel describing the selected node.
#[component]
pub fn NodeDetailsPanel() -> impl IntoView {
	let ws = use_workspace();
	let selected = Memo::new(move |_| {
		ws.ui
			.with(|ui| ws.data.with(|d| ui.selection.node(d).cloned()))
	});
	let width = move || format!("{}%", ws.ui.with(|u| u.detail_width.percent()));
	let on_resize = Callback::new(move |w: PanelWidth| ws.ui.update(|u| u.detail_width = w));

	move || {
		selected.get().map(|node| {
			view! {
				<aside
					class="side-panel side-panel-right"
					role="dialog"
					aria-labelledby="detail-title"
					style:width=width
				>
					<ResizeHandle side=PanelSide::Right on_resize=on_resize />
					<DetailBody node=node />
				</aside>
			}
		})
	}
}
