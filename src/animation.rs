//! Self-rescheduling frame loop with a stop handle.

use std::cell::{Cell, RefCell};
use std::ops::ControlFlow;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// Something that can run a callback on the next display frame.
pub trait FrameScheduler {
	/// Queue `frame` to run once on the next frame.
	fn request_frame(&self, frame: Box<dyn FnOnce()>);
}

/// [`FrameScheduler`] backed by `window.requestAnimationFrame`.
pub struct RafScheduler {
	window: Window,
}

impl RafScheduler {
	pub fn new(window: Window) -> Self {
		Self { window }
	}
}

impl FrameScheduler for RafScheduler {
	fn request_frame(&self, frame: Box<dyn FnOnce()>) {
		let cb = Closure::once_into_js(move || frame());
		if let Err(err) = self.window.request_animation_frame(cb.unchecked_ref()) {
			log::error!("requestAnimationFrame failed: {:?}", err);
		}
	}
}

/// Shared run flag of a loop started with [`start_loop`].
///
/// Clones refer to the same loop.
#[derive(Clone, Debug)]
pub struct AnimationHandle {
	running: Rc<Cell<bool>>,
}

impl AnimationHandle {
	/// Stops the loop. The already-queued frame runs nothing and queues nothing.
	pub fn stop(&self) {
		self.running.set(false);
	}

	pub fn is_running(&self) -> bool {
		self.running.get()
	}
}

/// Starts a loop that calls `tick` once per frame until stopped.
///
/// Each frame queues its successor before running `tick`, so a `tick` that
/// returns early still leaves the next frame scheduled. Returning
/// [`ControlFlow::Break`] from `tick` stops the loop.
pub fn start_loop<S, F>(scheduler: Rc<S>, tick: F) -> AnimationHandle
where
	S: FrameScheduler + 'static,
	F: FnMut() -> ControlFlow<()> + 'static,
{
	let handle = AnimationHandle {
		running: Rc::new(Cell::new(true)),
	};
	schedule(scheduler, handle.running.clone(), Rc::new(RefCell::new(tick)));
	handle
}

fn schedule<S, F>(scheduler: Rc<S>, running: Rc<Cell<bool>>, tick: Rc<RefCell<F>>)
where
	S: FrameScheduler + 'static,
	F: FnMut() -> ControlFlow<()> + 'static,
{
	let next = scheduler.clone();
	scheduler.request_frame(Box::new(move || {
		if !running.get() {
			return;
		}
		schedule(next, running.clone(), tick.clone());
		let flow = (&mut *tick.borrow_mut())();
		if flow.is_break() {
			running.set(false);
		}
	}));
}
