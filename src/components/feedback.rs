use leptos::prelude::*;
use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, MouseEvent};

use super::listeners::{EventListenerGuard, release_later};
use crate::config::AppConfig;

const BUTTON_SIZE: f64 = 44.0;

fn viewport() -> (f64, f64) {
	let Some(window) = web_sys::window() else {
		return (0.0, 0.0);
	};
	let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	(dim(window.inner_width()), dim(window.inner_height()))
}

/// Keeps the button fully inside the viewport.
fn clamp_position(x: f64, y: f64, viewport: (f64, f64)) -> (f64, f64) {
	(
		x.min(viewport.0 - BUTTON_SIZE).max(0.0),
		y.min(viewport.1 - BUTTON_SIZE).max(0.0),
	)
}

/// Floating feedback button. It can be dragged anywhere; a press that did
/// not move opens the feedback form.
#[component]
pub fn FeedbackButton() -> impl IntoView {
	let button_ref = NodeRef::<leptos::html::Button>::new();
	let position = RwSignal::new((10.0, viewport().1 - 80.0));
	let moved = StoredValue::new(false);
	let drag = StoredValue::new_local(None::<(EventListenerGuard, EventListenerGuard)>);
	on_cleanup(move || {
		drag.try_set_value(None);
	});

	let on_mousedown = move |ev: MouseEvent| {
		moved.set_value(false);
		let Some(button) = button_ref.get_untracked() else {
			return;
		};
		let rect = button.get_bounding_client_rect();
		let offset = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		let on_move = EventListenerGuard::on_window("mousemove", move |ev: Event| {
			if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
				moved.set_value(true);
				position.set(clamp_position(
					ev.client_x() as f64 - offset.0,
					ev.client_y() as f64 - offset.1,
					viewport(),
				));
			}
		});
		let on_up = EventListenerGuard::on_window("mouseup", move |_| {
			if let Some(listeners) = drag.try_update_value(Option::take).flatten() {
				release_later(listeners);
			}
		});
		drag.set_value(on_move.zip(on_up));
		ev.prevent_default();
	};

	let on_click = move |_: MouseEvent| {
		if moved.get_value() {
			return;
		}
		let url = AppConfig::default().feedback_url;
		if let Some(window) = web_sys::window() {
			if let Err(err) = window.open_with_url_and_target(url, "_blank") {
				warn!("could not open feedback form: {err:?}");
			}
		}
	};

	view! {
		<button
			node_ref=button_ref
			class="feedback-button"
			title="Give Feedback - Drag to move"
			aria-label="Give feedback"
			style:left=move || format!("{}px", position.get().0)
			style:top=move || format!("{}px", position.get().1)
			on:mousedown=on_mousedown
			on:click=on_click
		>
			"💬"
		</button>
	}
}
