//! Stoppable `requestAnimationFrame` loop.
//!
//! The frame callback re-enqueues itself until [`LoopHandle::stop`] is called.
//! Stopping cancels the pending frame, drops the callback and runs any
//! teardown registered with [`LoopHandle::on_stop`].

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::prelude::*;

use crate::error::{FxError, FxResult};

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;
type Teardown = Rc<RefCell<Vec<Box<dyn FnOnce()>>>>;

/// Run/stop control for a frame loop. Clones share the same loop.
#[derive(Clone)]
pub struct LoopHandle {
	running: Rc<Cell<bool>>,
	pending: Rc<Cell<Option<i32>>>,
	frames: Rc<Cell<u64>>,
	// The callback holds a clone of this handle, so the slot is emptied on
	// stop to break the cycle.
	callback: FrameSlot,
	teardown: Teardown,
}

impl fmt::Debug for LoopHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LoopHandle")
			.field("running", &self.running.get())
			.field("pending", &self.pending.get())
			.field("frames", &self.frames.get())
			.field("teardown", &self.teardown.borrow().len())
			.finish()
	}
}

impl Default for LoopHandle {
	fn default() -> Self {
		Self::new()
	}
}

impl LoopHandle {
	/// A handle in the running state with no frame scheduled yet.
	pub fn new() -> Self {
		Self {
			running: Rc::new(Cell::new(true)),
			pending: Rc::new(Cell::new(None)),
			frames: Rc::new(Cell::new(0)),
			callback: Rc::new(RefCell::new(None)),
			teardown: Rc::new(RefCell::new(Vec::new())),
		}
	}

	pub fn is_running(&self) -> bool {
		self.running.get()
	}

	/// Number of frames stepped so far.
	pub fn frames(&self) -> u64 {
		self.frames.get()
	}

	/// Registers cleanup to run when the loop is stopped, such as removing
	/// event listeners. Runs right away if the loop is already stopped.
	pub fn on_stop(&self, f: impl FnOnce() + 'static) {
		if self.is_running() {
			self.teardown.borrow_mut().push(Box::new(f));
		} else {
			f();
		}
	}

	/// Stops the loop, cancels the frame already queued and releases the
	/// frame callback and teardown hooks. Must not be called from inside the
	/// frame step. Returns whether the loop was running.
	pub fn stop(&self) -> bool {
		let was_running = self.running.replace(false);
		if let Some(id) = self.pending.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
		let hooks = std::mem::take(&mut *self.teardown.borrow_mut());
		for hook in hooks {
			hook();
		}
		drop(self.callback.borrow_mut().take());
		if was_running {
			debug!("animation loop stopped after {} frames", self.frames());
		}
		was_running
	}

	/// Marks the start of a frame. Returns `false` once the loop is stopped,
	/// in which case the caller must neither step nor reschedule.
	fn begin_frame(&self) -> bool {
		self.pending.set(None);
		if !self.is_running() {
			return false;
		}
		self.frames.set(self.frames.get() + 1);
		true
	}
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> FxResult<i32> {
	let window = web_sys::window().ok_or_else(|| FxError::dom("no window"))?;
	Ok(window.request_animation_frame(cb.as_ref().unchecked_ref())?)
}

/// Calls `step` once per animation frame until the returned handle is stopped.
pub fn start(mut step: impl FnMut() + 'static) -> FxResult<LoopHandle> {
	let handle = LoopHandle::new();

	let inner = handle.clone();
	*handle.callback.borrow_mut() = Some(Closure::new(move || {
		if !inner.begin_frame() {
			return;
		}
		step();
		if let Some(ref cb) = *inner.callback.borrow() {
			match request_frame(cb) {
				Ok(id) => inner.pending.set(Some(id)),
				Err(e) => {
					warn!("animation loop halted: {}", e);
					inner.running.set(false);
				}
			}
		}
	}));

	let first = match *handle.callback.borrow() {
		Some(ref cb) => request_frame(cb),
		None => Err(FxError::dom("frame callback missing")),
	};
	match first {
		Ok(id) => handle.pending.set(Some(id)),
		Err(e) => {
			handle.stop();
			return Err(e);
		}
	}
	Ok(handle)
}
