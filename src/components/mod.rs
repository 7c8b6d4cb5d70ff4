//! Leptos components. Shared reactive state lives in [`Workspace`], provided
//! as context by the home page once the dataset has loaded.

use std::collections::HashSet;

use leptos::prelude::*;

use crate::graph::{GraphData, VisibleTypes, filter_visible, search};
use crate::state::UiState;

mod feedback;
mod filter_legend;
mod funding_bar;
mod graph_map;
mod keyboard_help;
pub mod listeners;
mod modal;
mod navigation;
mod node_details;
mod resize_handle;
mod table_view;
mod toolbar;

pub use feedback::FeedbackButton;
pub use filter_legend::FilterLegend;
pub use funding_bar::FundingBar;
pub use graph_map::GraphMap;
pub use keyboard_help::KeyboardHelp;
pub use modal::InfoModal;
pub use navigation::Navigation;
pub use node_details::NodeDetailsPanel;
pub use table_view::TableView;
pub use toolbar::{SEARCH_INPUT_ID, Toolbar};

/// The loaded dataset plus everything derived from it and the UI state.
#[derive(Clone, Copy)]
pub struct Workspace {
	pub ui: RwSignal<UiState>,
	/// Full dataset as loaded.
	pub data: RwSignal<GraphData>,
	/// Nodes and links of the visible types.
	pub visible: Memo<GraphData>,
	/// Ids matching the search term, over the full dataset.
	pub highlighted: Memo<HashSet<String>>,
}

impl Workspace {
	pub fn new(data: GraphData) -> Self {
		let ui = RwSignal::new(UiState::default());
		let data = RwSignal::new(data);
		let visible_types: Memo<VisibleTypes> = Memo::new(move |_| ui.with(|u| u.visible_types));
		let search_term = Memo::new(move |_| ui.with(|u| u.search_term.clone()));
		let visible = Memo::new(move |_| {
			let types = visible_types.get();
			data.with(|d| filter_visible(d, types))
		});
		let highlighted = Memo::new(move |_| {
			let term = search_term.get();
			data.with(|d| search(&d.nodes, &term))
		});
		Self {
			ui,
			data,
			visible,
			highlighted,
		}
	}

	/// Opens the detail panel for `id`.
	pub fn select(&self, id: &str) {
		self.ui.update(|u| u.selection.select(Some(id)));
	}
}

/// The workspace provided by the home page.
pub fn use_workspace() -> Workspace {
	expect_context::<Workspace>()
}
