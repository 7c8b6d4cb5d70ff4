//! Global keyboard shortcuts.

/// A key press, reduced to what routing needs.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyPress<'a> {
	pub key: &'a str,
	pub ctrl: bool,
	pub meta: bool,
	/// Focus is in a text input, textarea or editable element.
	pub in_text_input: bool,
}

impl KeyPress<'_> {
	fn command(&self) -> bool {
		self.ctrl || self.meta
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
	ToggleViewMode,
	FocusSearch,
	ToggleNavigation,
	ShowHelp,
	/// Closes the topmost overlay.
	Close,
	/// Grows (`+1`) or shrinks (`-1`) the open side panel.
	ResizePanel(i8),
}

/// Maps a key press to a shortcut.
///
/// Nothing fires while typing in a text field, except Escape.
pub fn route(press: &KeyPress) -> Option<Shortcut> {
	if press.key == "Escape" {
		return Some(Shortcut::Close);
	}
	if press.in_text_input {
		return None;
	}
	if press.command() {
		return match press.key {
			"e" | "E" => Some(Shortcut::ToggleViewMode),
			"k" | "K" => Some(Shortcut::FocusSearch),
			"b" | "B" => Some(Shortcut::ToggleNavigation),
			"ArrowLeft" => Some(Shortcut::ResizePanel(-1)),
			"ArrowRight" => Some(Shortcut::ResizePanel(1)),
			_ => None,
		};
	}
	(press.key == "?").then_some(Shortcut::ShowHelp)
}

/// Rows of the keyboard help overlay.
pub fn help_entries(is_mac: bool) -> Vec<(String, &'static str)> {
	let cmd = if is_mac { "⌘" } else { "Ctrl" };
	vec![
		(format!("{cmd} + E"), "Toggle between Map and Table view"),
		(format!("{cmd} + K"), "Focus search box"),
		(format!("{cmd} + B"), "Toggle navigation sidebar"),
		(format!("{cmd} + ← →"), "Resize panels (when modal or details open)"),
		("Escape".into(), "Close modals and detail panels"),
		("Tab / Shift + Tab".into(), "Navigate between elements"),
		("?".into(), "Show this help"),
	]
}
