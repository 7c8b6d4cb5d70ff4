use leptos::prelude::*;

use super::use_workspace;
use crate::graph::{NodeKind, TypeCounts};

/// Per-type visibility checkboxes with the dataset counts.
#[component]
pub fn FilterLegend() -> impl IntoView {
	let ws = use_workspace();
	let counts = Memo::new(move |_| ws.data.with(|d| TypeCounts::of(&d.nodes)));

	let rows = NodeKind::ALL
		.into_iter()
		.map(|kind| {
			let checked = move || ws.ui.with(|u| u.visible_types.is_visible(kind));
			view! {
				<label class="legend-row">
					<input
						type="checkbox"
						prop:checked=checked
						on:change=move |_| ws.ui.update(|u| u.visible_types.toggle(kind))
					/>
					<span
						class="legend-swatch"
						style:background-color=kind.color()
						aria-hidden="true"
					/>
					<span class="legend-label">
						{kind.label()} " (" {move || counts.with(|c| c.get(kind))} ")"
					</span>
				</label>
			}
		})
		.collect_view();

	view! {
		<fieldset class="filter-legend">
			<legend class="sr-only">"Visible entity types"</legend>
			{rows}
		</fieldset>
	}
}
