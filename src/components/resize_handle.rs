use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent};

use super::listeners::{EventListenerGuard, release_later};
use crate::graph::PanelWidth;
use crate::graph::selection::PanelSide;

fn viewport_width() -> f64 {
	web_sys::window()
		.and_then(|w| w.inner_width().ok())
		.and_then(|w| w.as_f64())
		.unwrap_or(0.0)
}

/// Drag strip on the inner edge of a side panel.
#[component]
pub fn ResizeHandle(side: PanelSide, on_resize: Callback<PanelWidth>) -> impl IntoView {
	let drag = StoredValue::new_local(None::<(EventListenerGuard, EventListenerGuard)>);
	on_cleanup(move || {
		drag.try_set_value(None);
	});

	let on_mousedown = move |ev: MouseEvent| {
		ev.prevent_default();
		let on_move = EventListenerGuard::on_window("mousemove", move |ev: Event| {
			if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
				let width = PanelWidth::from_pointer(ev.client_x() as f64, viewport_width(), side);
				on_resize.run(width);
			}
		});
		let on_up = EventListenerGuard::on_window("mouseup", move |_| {
			if let Some(listeners) = drag.try_update_value(Option::take).flatten() {
				release_later(listeners);
			}
		});
		drag.set_value(on_move.zip(on_up));
	};

	let class = match side {
		PanelSide::Left => "resize-handle resize-handle-right-edge",
		PanelSide::Right => "resize-handle resize-handle-left-edge",
	};

	view! {
		<div
			class=class
			role="separator"
			aria-orientation="vertical"
			aria-label="Resize panel. Ctrl and arrow keys also resize."
			on:mousedown=on_mousedown
		/>
	}
}
