//! Leptos component wrapping the particle field canvas.
//!
//! The component creates a full-window canvas, listens for window resize and
//! pointer moves, and drives the field through a stoppable animation loop.
//! Stopping the loop also detaches both listeners.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::animation::{self, LoopHandle};
use super::render;
use super::state::FieldState;
use super::theme::Theme;
use crate::error::{FxError, FxResult};

thread_local! {
	static ACTIVE_LOOP: RefCell<Option<LoopHandle>> = const { RefCell::new(None) };
}

/// Stops the particle field currently on the page, if any.
/// Returns whether a running loop was stopped.
pub fn stop_active() -> bool {
	ACTIVE_LOOP.with(|cell| cell.borrow_mut().take().is_some_and(|h| h.stop()))
}

fn inner_size(window: &Window) -> FxResult<(f64, f64)> {
	let w = window.inner_width()?.as_f64();
	let h = window.inner_height()?.as_f64();
	match (w, h) {
		(Some(w), Some(h)) => Ok((w, h)),
		_ => Err(FxError::dom("window inner size is not a number")),
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> FxResult<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")?
		.ok_or_else(|| FxError::dom("canvas has no 2d context"))?
		.dyn_into()
		.map_err(|_| FxError::dom("2d context has an unexpected type"))
}

/// Attaches `callback` to a window event. The returned function detaches it
/// and drops the callback.
fn listen<T: ?Sized + 'static>(
	window: &Window,
	event: &'static str,
	callback: Closure<T>,
) -> FxResult<Box<dyn FnOnce()>> {
	window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
	let window = window.clone();
	Ok(Box::new(move || {
		if let Err(e) =
			window.remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
		{
			warn!("particle field: {} listener not removed: {:?}", event, e);
		}
	}))
}

/// Draws the seed from `Math.random()` when none is configured.
fn resolve_seed(seed: Option<u64>) -> u64 {
	seed.unwrap_or_else(|| (js_sys::Math::random() * u64::MAX as f64) as u64)
}

/// Wires the field to a mounted canvas and starts the loop.
fn mount_field(canvas: HtmlCanvasElement, theme: Theme, seed: Option<u64>) -> FxResult<LoopHandle> {
	let window = web_sys::window().ok_or_else(|| FxError::dom("no window"))?;
	let (w, h) = inner_size(&window)?;
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	let ctx = context_2d(&canvas)?;

	let mut rng = SmallRng::seed_from_u64(resolve_seed(seed));
	let state = Rc::new(RefCell::new(FieldState::new(&mut rng, theme, w, h)));
	info!(
		"particle field: {} particles on {}x{}",
		state.borrow().particles.len(),
		w,
		h
	);

	let (state_resize, canvas_resize) = (state.clone(), canvas.clone());
	let on_resize = Closure::<dyn FnMut()>::new(move || {
		let Some(win) = web_sys::window() else {
			return;
		};
		match inner_size(&win) {
			Ok((nw, nh)) => {
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				state_resize.borrow_mut().resize(nw, nh);
				debug!("particle field resized to {}x{}", nw, nh);
			}
			Err(e) => warn!("particle field: resize ignored: {}", e),
		}
	});
	let unlisten_resize = listen(&window, "resize", on_resize)?;

	let state_pointer = state.clone();
	let on_pointer = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
		state_pointer
			.borrow_mut()
			.set_pointer(ev.client_x() as f64, ev.client_y() as f64);
	});
	let unlisten_pointer = match listen(&window, "mousemove", on_pointer) {
		Ok(f) => f,
		Err(e) => {
			unlisten_resize();
			return Err(e);
		}
	};

	let started = animation::start(move || {
		let mut s = state.borrow_mut();
		s.tick();
		if let Err(e) = render::render(&*s, &ctx) {
			warn!("particle field: frame {} not drawn: {}", s.frame, e);
		}
	});
	match started {
		Ok(handle) => {
			handle.on_stop(unlisten_resize);
			handle.on_stop(unlisten_pointer);
			Ok(handle)
		}
		Err(e) => {
			unlisten_resize();
			unlisten_pointer();
			Err(e)
		}
	}
}

/// Renders the ambient particle background on a full-window canvas.
///
/// The canvas sits behind the page content and ignores pointer events;
/// pointer positions are read from the window instead. `theme` tunes the
/// particles and `seed` makes the initial layout reproducible.
#[component]
pub fn ParticleCanvas(
	#[prop(optional)] theme: Option<Theme>,
	#[prop(default = None)] seed: Option<u64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let theme = theme.unwrap_or_default();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		stop_active();
		match mount_field(canvas.into(), theme.clone(), seed) {
			Ok(handle) => ACTIVE_LOOP.with(|cell| *cell.borrow_mut() = Some(handle)),
			Err(e) => warn!("particle field disabled: {}", e),
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			id="particleCanvas"
			class="particle-canvas"
			style="position: fixed; top: 0; left: 0; z-index: -1; pointer-events: none; display: block;"
		/>
	}
}
