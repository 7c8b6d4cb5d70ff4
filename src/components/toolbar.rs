use leptos::prelude::*;
use log::warn;

use super::use_workspace;
use crate::config::AppConfig;
use crate::state::ViewMode;

/// Id of the search input, focused by the Ctrl/⌘+K shortcut.
pub const SEARCH_INPUT_ID: &str = "search-input";

fn reload() {
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Err(err) = window.location().reload() {
		warn!("reload failed: {err:?}");
	}
}

fn status_text(matches: usize) -> String {
	let plural = if matches == 1 { "" } else { "s" };
	format!("Found {matches} matching node{plural}")
}

#[component]
pub fn Toolbar() -> impl IntoView {
	let ws = use_workspace();
	let ui = ws.ui;
	let title = AppConfig::default().title;
	let term = move || ui.with(|u| u.search_term.clone());
	let matches = move || ws.highlighted.with(|h| h.len());
	let is_map = move || ui.with(|u| u.view_mode == ViewMode::Map);

	view! {
		<header class="toolbar">
			<h1 class="toolbar-title">{title}</h1>
			<div class="toolbar-search">
				<input
					id=SEARCH_INPUT_ID
					type="text"
					role="searchbox"
					placeholder="Search nodes, descriptions, methods..."
					aria-label="Search nodes, descriptions, and methods"
					prop:value=term
					on:input=move |ev| {
						let value = event_target_value(&ev);
						ui.update(|u| u.search_term = value);
					}
				/>
				<Show when=move || !term().is_empty()>
					<button
						class="toolbar-clear"
						aria-label="Clear search"
						on:click=move |_| ui.update(|u| u.search_term.clear())
					>
						"×"
					</button>
				</Show>
			</div>
			<div class="toolbar-actions">
				<button
					class="toolbar-view-toggle"
					aria-label=move || {
						if is_map() {
							"Switch to accessible simple table view"
						} else {
							"Switch to interactive graph view"
						}
					}
					on:click=move |_| ui.update(|u| u.view_mode = u.view_mode.toggled())
				>
					{move || if is_map() { "Simple View" } else { "Graph View" }}
				</button>
				<button
					class="toolbar-reset"
					aria-label="Reset and refresh the application"
					on:click=move |_| reload()
				>
					"Reset"
				</button>
				<button
					class="toolbar-help"
					aria-label="Show keyboard shortcuts"
					title="Keyboard shortcuts"
					on:click=move |_| ui.update(|u| u.help_open = true)
				>
					"?"
				</button>
			</div>
			<Show when=move || { matches() > 0 }>
				<div id="search-results" class="toolbar-status" role="status" aria-live="polite">
					{move || status_text(matches())}
				</div>
			</Show>
		</header>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_pluralises() {
		assert_eq!(status_text(1), "Found 1 matching node");
		assert_eq!(status_text(3), "Found 3 matching nodes");
	}
}
