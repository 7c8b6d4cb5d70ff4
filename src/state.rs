//! Presentation state shared by the toolbar, views, panels and shortcuts.

use log::debug;

use crate::content::NavItem;
use crate::graph::{PanelWidth, Selection, VisibleTypes};
use crate::shortcuts::Shortcut;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
	#[default]
	Map,
	Table,
}

impl ViewMode {
	pub fn toggled(self) -> Self {
		match self {
			ViewMode::Map => ViewMode::Table,
			ViewMode::Table => ViewMode::Map,
		}
	}
}

/// Work a shortcut leaves for the caller, beyond the state change itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShortcutOutcome {
	Handled,
	/// The search field should take focus.
	FocusSearch,
	Ignored,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiState {
	pub view_mode: ViewMode,
	pub search_term: String,
	pub selection: Selection,
	pub visible_types: VisibleTypes,
	pub nav_expanded: bool,
	pub modal: Option<&'static NavItem>,
	pub help_open: bool,
	pub detail_width: PanelWidth,
	pub modal_width: PanelWidth,
}

impl UiState {
	/// Closes the topmost overlay: help, then modal, then detail panel.
	pub fn close_topmost(&mut self) -> bool {
		if self.help_open {
			self.help_open = false;
		} else if self.modal.is_some() {
			self.modal = None;
		} else if self.selection.is_open() {
			self.selection.clear();
		} else {
			return false;
		}
		true
	}

	/// Resizes the open side panel, the modal taking precedence.
	pub fn resize_panel(&mut self, direction: i8) -> bool {
		if self.modal.is_some() {
			self.modal_width = self.modal_width.step(direction);
		} else if self.selection.is_open() {
			self.detail_width = self.detail_width.step(direction);
		} else {
			return false;
		}
		true
	}

	pub fn apply(&mut self, shortcut: Shortcut) -> ShortcutOutcome {
		debug!("shortcut {shortcut:?}");
		match shortcut {
			Shortcut::ToggleViewMode => self.view_mode = self.view_mode.toggled(),
			Shortcut::FocusSearch => return ShortcutOutcome::FocusSearch,
			Shortcut::ToggleNavigation => self.nav_expanded = !self.nav_expanded,
			Shortcut::ShowHelp => self.help_open = true,
			Shortcut::Close => {
				if !self.close_topmost() {
					return ShortcutOutcome::Ignored;
				}
			}
			Shortcut::ResizePanel(direction) => {
				if !self.resize_panel(direction) {
					return ShortcutOutcome::Ignored;
				}
			}
		}
		ShortcutOutcome::Handled
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::content::NAV_ITEMS;

	#[test]
	fn view_switch_keeps_selection() {
		let mut ui = UiState::default();
		ui.selection.select(Some("x"));
		assert_eq!(ui.apply(Shortcut::ToggleViewMode), ShortcutOutcome::Handled);
		assert_eq!(ui.view_mode, ViewMode::Table);
		assert_eq!(ui.selection.id(), Some("x"));
	}

	#[test]
	fn escape_closes_overlays_in_order() {
		let mut ui = UiState {
			help_open: true,
			modal: Some(&NAV_ITEMS[0]),
			..UiState::default()
		};
		ui.selection.select(Some("x"));
		ui.apply(Shortcut::Close);
		assert!(!ui.help_open);
		assert!(ui.modal.is_some());
		ui.apply(Shortcut::Close);
		assert!(ui.modal.is_none());
		assert!(ui.selection.is_open());
		ui.apply(Shortcut::Close);
		assert!(!ui.selection.is_open());
		assert_eq!(ui.apply(Shortcut::Close), ShortcutOutcome::Ignored);
	}

	#[test]
	fn resize_targets_modal_before_details() {
		let mut ui = UiState::default();
		assert_eq!(ui.apply(Shortcut::ResizePanel(1)), ShortcutOutcome::Ignored);
		ui.selection.select(Some("x"));
		ui.apply(Shortcut::ResizePanel(1));
		assert_eq!(ui.detail_width.percent(), 55.0);
		ui.modal = Some(&NAV_ITEMS[1]);
		ui.apply(Shortcut::ResizePanel(-1));
		assert_eq!(ui.modal_width.percent(), 45.0);
		assert_eq!(ui.detail_width.percent(), 55.0);
	}
}
