use leptos::prelude::*;
use leptos_router::components::A;

use super::use_workspace;
use crate::config::AppConfig;
use crate::content::NAV_ITEMS;
use crate::graph::{NodeKind, TypeCounts};

/// Collapsible sidebar: help texts and dataset statistics.
#[component]
pub fn Navigation() -> impl IntoView {
	let ws = use_workspace();
	let expanded = move || ws.ui.with(|u| u.nav_expanded);
	let stats = Memo::new(move |_| {
		ws.data
			.with(|d| (d.nodes.len(), d.links.len(), TypeCounts::of(&d.nodes)))
	});

	let items = NAV_ITEMS
		.iter()
		.map(|item| {
			view! {
				<button
					class="nav-item"
					title=item.label
					aria-label=item.label
					on:click=move |_| ws.ui.update(|u| u.modal = Some(item))
				>
					<span class="nav-icon" aria-hidden="true">
						{item.icon}
					</span>
					<Show when=expanded>
						<span class="nav-label">{item.label}</span>
					</Show>
				</button>
			}
		})
		.collect_view();

	view! {
		<nav class="navigation" class:navigation-expanded=expanded aria-label="Site navigation">
			<button
				class="nav-toggle"
				title="Toggle Navigation"
				aria-expanded=move || expanded().to_string()
				on:click=move |_| ws.ui.update(|u| u.nav_expanded = !u.nav_expanded)
			>
				"☰"
			</button>
			<div class="nav-items">{items}</div>
			<Show when=expanded>
				<div class="nav-stats">
					<div class="nav-stats-title">{AppConfig::default().document_title}</div>
					<div>"Network Statistics:"</div>
					<div>"Total Nodes: " {move || stats.with(|s| s.0)}</div>
					<div>"Total Links: " {move || stats.with(|s| s.1)}</div>
					{NodeKind::ALL
						.into_iter()
						.map(|kind| {
							view! {
								<div>{kind.label()} ": " {move || stats.with(|s| s.2.get(kind))}</div>
							}
						})
						.collect_view()}
					<A href="/privacy">"Privacy Policy"</A>
				</div>
			</Show>
		</nav>
	}
}
