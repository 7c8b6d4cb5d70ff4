//! Owned browser resources. Dropping a guard releases what it acquired.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

/// A registered DOM listener, removed again on drop.
pub struct EventListenerGuard {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl EventListenerGuard {
	pub fn new(
		target: &EventTarget,
		event: &'static str,
		handler: impl FnMut(Event) + 'static,
	) -> Option<Self> {
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		target
			.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
			.ok()?;
		Some(Self {
			target: target.clone(),
			event,
			callback,
		})
	}

	/// Listens on `window`.
	pub fn on_window(event: &'static str, handler: impl FnMut(Event) + 'static) -> Option<Self> {
		let window = web_sys::window()?;
		Self::new(window.as_ref(), event, handler)
	}
}

impl Drop for EventListenerGuard {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
		debug!("released {} listener", self.event);
	}
}

/// Drops `value` once the current event handler has returned, so a
/// listener can release its own guard.
pub fn release_later<T: 'static>(value: T) {
	leptos::task::spawn_local(async move {
		drop(value);
	});
}

struct FrameLoopInner {
	callback: RefCell<Option<Closure<dyn FnMut()>>>,
	handle: Cell<Option<i32>>,
}

impl FrameLoopInner {
	fn schedule(&self) {
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Some(cb) = self.callback.borrow().as_ref() {
			if let Ok(handle) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				self.handle.set(Some(handle));
			}
		}
	}
}

/// A `requestAnimationFrame` loop that runs until dropped.
pub struct FrameLoop {
	inner: Rc<FrameLoopInner>,
}

impl FrameLoop {
	pub fn start(mut frame: impl FnMut() + 'static) -> Self {
		let inner = Rc::new(FrameLoopInner {
			callback: RefCell::new(None),
			handle: Cell::new(None),
		});
		let weak = Rc::downgrade(&inner);
		*inner.callback.borrow_mut() = Some(Closure::new(move || {
			let Some(inner) = weak.upgrade() else {
				return;
			};
			inner.handle.set(None);
			frame();
			inner.schedule();
		}));
		inner.schedule();
		Self { inner }
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		if let (Some(handle), Some(window)) = (self.inner.handle.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(handle);
		}
		self.inner.callback.borrow_mut().take();
		debug!("frame loop stopped");
	}
}
