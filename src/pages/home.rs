use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, KeyboardEvent};

use crate::components::listeners::EventListenerGuard;
use crate::components::{
	FeedbackButton, FilterLegend, FundingBar, GraphMap, InfoModal, KeyboardHelp, Navigation,
	NodeDetailsPanel, SEARCH_INPUT_ID, TableView, Toolbar, Workspace,
};
use crate::config::AppConfig;
use crate::data::fetch_graph_data;
use crate::graph::GraphData;
use crate::shortcuts::{KeyPress, route};
use crate::state::{ShortcutOutcome, ViewMode};

enum LoadState {
	Loading,
	Ready(GraphData),
	Failed(String),
}

fn in_text_input(ev: &KeyboardEvent) -> bool {
	ev.target()
		.and_then(|t| t.dyn_into::<HtmlElement>().ok())
		.is_some_and(|el| {
			let tag = el.tag_name();
			tag == "INPUT" || tag == "TEXTAREA" || el.is_content_editable()
		})
}

fn focus_search() {
	let input = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id(SEARCH_INPUT_ID))
		.and_then(|el| el.dyn_into::<HtmlElement>().ok());
	if let Some(input) = input {
		let _ = input.focus();
	}
}

/// Routes global key presses into the workspace state.
fn shortcut_listener(ws: Workspace) -> Option<EventListenerGuard> {
	EventListenerGuard::on_window("keydown", move |ev: Event| {
		let Some(ev) = ev.dyn_ref::<KeyboardEvent>() else {
			return;
		};
		let key = ev.key();
		let press = KeyPress {
			key: &key,
			ctrl: ev.ctrl_key(),
			meta: ev.meta_key(),
			in_text_input: in_text_input(ev),
		};
		let Some(shortcut) = route(&press) else {
			return;
		};
		match ws.ui.try_update(|u| u.apply(shortcut)) {
			Some(ShortcutOutcome::Handled) => ev.prevent_default(),
			Some(ShortcutOutcome::FocusSearch) => {
				ev.prevent_default();
				focus_search();
			}
			Some(ShortcutOutcome::Ignored) | None => {}
		}
	})
}

/// The loaded application: sidebar, toolbar, the active view and overlays.
#[component]
fn Explorer(data: GraphData) -> impl IntoView {
	let ws = Workspace::new(data);
	provide_context(ws);

	let keys = StoredValue::new_local(shortcut_listener(ws));
	on_cleanup(move || {
		keys.try_set_value(None);
	});

	let view_mode = Memo::new(move |_| ws.ui.with(|u| u.view_mode));
	let help_open = move || ws.ui.with(|u| u.help_open);
	let on_select = Callback::new(move |id: String| ws.select(&id));

	view! {
		<div class="app">
			<Navigation />
			<main class="app-main">
				<Toolbar />
				<div class="app-view">
					{move || match view_mode.get() {
						ViewMode::Map => {
							view! {
								<GraphMap
									data=ws.visible
									highlighted=ws.highlighted
									on_select=on_select
								/>
								<FilterLegend />
							}
								.into_any()
						}
						ViewMode::Table => {
							view! {
								<FilterLegend />
								<TableView />
							}
								.into_any()
						}
					}}
				</div>
			</main>
			<NodeDetailsPanel />
			<InfoModal />
			<Show when=help_open>
				<KeyboardHelp />
			</Show>
			<FeedbackButton />
			<FundingBar />
		</div>
	}
}

/// Loads the dataset, then shows the explorer.
#[component]
pub fn Home() -> impl IntoView {
	let load = RwSignal::new(LoadState::Loading);

	spawn_local(async move {
		let url = AppConfig::default().data_url;
		debug!("fetching {url}");
		match fetch_graph_data(url).await {
			Ok(data) => load.set(LoadState::Ready(data)),
			Err(err) => {
				error!("{err}");
				load.set(LoadState::Failed(err.to_string()));
			}
		}
	});

	move || {
		load.with(|state| match state {
			LoadState::Loading => view! {
				<div class="status-screen" role="status" aria-live="polite">
					"Loading data..."
				</div>
			}
			.into_any(),
			LoadState::Failed(message) => view! {
				<div class="status-screen status-error" role="alert">
					{format!("Error: {message}")}
				</div>
			}
			.into_any(),
			LoadState::Ready(data) => view! { <Explorer data=data.clone() /> }.into_any(),
		})
	}
}
