use leptos::prelude::*;

use super::use_workspace;
use crate::shortcuts::help_entries;

fn is_mac() -> bool {
	web_sys::window()
		.and_then(|w| w.navigator().platform().ok())
		.is_some_and(|p| p.to_uppercase().contains("MAC"))
}

/// Overlay listing the keyboard shortcuts.
#[component]
pub fn KeyboardHelp() -> impl IntoView {
	let ws = use_workspace();
	let close = move || ws.ui.update(|u| u.help_open = false);
	let rows = help_entries(is_mac())
		.into_iter()
		.map(|(keys, description)| {
			view! {
				<div class="help-row">
					<kbd>{keys}</kbd>
					<span>{description}</span>
				</div>
			}
		})
		.collect_view();

	view! {
		<div class="help-backdrop" on:click=move |_| close()>
			<div
				class="help-dialog"
				role="dialog"
				aria-labelledby="help-title"
				aria-modal="true"
				on:click=|ev| ev.stop_propagation()
			>
				<header class="help-header">
					<h2 id="help-title">"Keyboard Shortcuts"</h2>
					<button class="panel-close" aria-label="Close help" on:click=move |_| close()>
						"×"
					</button>
				</header>
				{rows}
				<p class="help-footer">"Press Escape or click outside to close"</p>
			</div>
		</div>
	}
}
