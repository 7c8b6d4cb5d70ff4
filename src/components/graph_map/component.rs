use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::MapState;
use crate::components::listeners::{EventListenerGuard, FrameLoop, release_later};
use crate::config::LayoutConfig;
use crate::graph::{GraphData, InteractionEvent};

/// Used when the container has no size yet.
const FALLBACK_SIZE: (f64, f64) = (1000.0, 700.0);
const ZOOM_STEP: f64 = 1.5;

type SharedState = Rc<RefCell<Option<MapState>>>;

/// One running layout. Dropping it stops the frame loop and the simulation.
struct MapSession {
	state: SharedState,
	_frames: FrameLoop,
}

impl Drop for MapSession {
	fn drop(&mut self) {
		if let Ok(mut state) = self.state.try_borrow_mut() {
			if let Some(state) = state.as_mut() {
				state.teardown();
			}
		}
	}
}

fn canvas_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or(FALLBACK_SIZE)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

fn local_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Force-directed map of the visible entities, drawn as coloured labels.
///
/// A new layout starts whenever `data` changes; `highlighted` only changes
/// how labels are dimmed. A click on a label that was not dragged reports
/// its id through `on_select`.
#[component]
pub fn GraphMap(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into)] highlighted: Signal<HashSet<String>>,
	on_select: Callback<String>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let session = StoredValue::new_local(None::<MapSession>);
	let gesture = StoredValue::new_local(None::<(EventListenerGuard, EventListenerGuard)>);
	let zoom = RwSignal::new(100_u32);

	let state_init = state.clone();
	Effect::new(move |_| {
		let data = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		session.set_value(None);

		let (w, h) = canvas_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		let Some(ctx) = context_2d(&canvas) else {
			warn!("canvas has no 2d context");
			return;
		};
		*state_init.borrow_mut() = Some(MapState::new(
			&data,
			highlighted.get_untracked(),
			w,
			h,
			LayoutConfig::default(),
		));
		zoom.set(100);

		let state_frame = state_init.clone();
		let frames = FrameLoop::start(move || {
			let Ok(mut state) = state_frame.try_borrow_mut() else {
				return;
			};
			if let Some(s) = state.as_mut() {
				s.advance();
				render::render(s, &ctx);
			}
		});
		session.set_value(Some(MapSession {
			state: state_init.clone(),
			_frames: frames,
		}));
	});

	let state_hl = state.clone();
	Effect::new(move |_| {
		let set = highlighted.get();
		if let Some(s) = state_hl.borrow_mut().as_mut() {
			s.set_highlighted(set);
		}
	});

	let state_rs = state.clone();
	let resize = StoredValue::new_local(EventListenerGuard::on_window("resize", move |_| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = canvas_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		if let Some(s) = state_rs.borrow_mut().as_mut() {
			s.resize(w, h);
		}
	}));

	on_cleanup(move || {
		gesture.try_set_value(None);
		resize.try_set_value(None);
		session.try_set_value(None);
		debug!("graph map unmounted");
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = local_point(&canvas, &ev);
		let started = state_md
			.borrow_mut()
			.as_mut()
			.is_some_and(|s| s.pointer_down(x, y));
		if !started {
			return;
		}
		ev.prevent_default();

		let state_move = state_md.clone();
		let on_move = EventListenerGuard::on_window("mousemove", move |ev: Event| {
			let Some(ev) = ev.dyn_ref::<MouseEvent>() else {
				return;
			};
			let (x, y) = local_point(&canvas, ev);
			if let Some(s) = state_move.borrow_mut().as_mut() {
				s.pointer_move(x, y);
			}
		});
		let state_up = state_md.clone();
		let on_up = EventListenerGuard::on_window("mouseup", move |_| {
			let event = state_up.borrow_mut().as_mut().and_then(MapState::pointer_up);
			if let Some(listeners) = gesture.try_update_value(Option::take).flatten() {
				release_later(listeners);
			}
			if let Some(InteractionEvent::NodeSelected(id)) = event {
				debug!("map selected {id}");
				on_select.run(id);
			}
		});
		gesture.set_value(on_move.zip(on_up));
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = local_point(&canvas, &ev);
		let hovering = match state_mm.borrow_mut().as_mut() {
			Some(s) => {
				s.hover_at(x, y);
				s.controller.hovered().is_some() || s.controller.dragged().is_some()
			}
			None => false,
		};
		let _ = web_sys::HtmlElement::style(&canvas)
			.set_property("cursor", if hovering { "pointer" } else { "grab" });
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(s) = state_ml.borrow_mut().as_mut() {
			s.pointer_leave();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = local_point(&canvas, &ev);
		if let Some(s) = state_wh.borrow_mut().as_mut() {
			s.wheel(x, y, ev.delta_y());
			zoom.set(s.controller.transform().percent());
		}
	};

	let state_zoom = state.clone();
	let zoom_by = move |factor: f64| {
		if let Some(s) = state_zoom.borrow_mut().as_mut() {
			s.zoom_by(factor);
			zoom.set(s.controller.transform().percent());
		}
	};
	let zoom_in = zoom_by.clone();

	view! {
		<div class="graph-map">
			<canvas
				node_ref=canvas_ref
				class="graph-map-canvas"
				role="img"
				aria-label="Relationship map. Switch to the table view for an accessible list."
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; position: absolute; inset: 0; cursor: grab;"
			/>
			<div class="zoom-controls">
				<button aria-label="Zoom in" on:click=move |_| zoom_in(ZOOM_STEP)>
					"+"
				</button>
				<span class="zoom-level" aria-live="polite">
					{move || format!("{}%", zoom.get())}
				</span>
				<button aria-label="Zoom out" on:click=move |_| zoom_by(1.0 / ZOOM_STEP)>
					"−"
				</button>
			</div>
		</div>
	}
}
