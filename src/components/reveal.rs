//! Reveal-on-scroll for marked page elements.
//!
//! Marked elements start transparent and pushed down a little. An
//! `IntersectionObserver` fades each one in the first time it enters the
//! viewport. Revealed elements stay revealed.

use std::cell::RefCell;

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, IntersectionObserver, IntersectionObserverEntry};

use crate::error::{FxError, FxResult};

/// Which elements to reveal and how they animate in.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
	/// CSS selector of the elements to reveal.
	pub selector: String,
	/// Downward offset of hidden elements, in CSS pixels.
	pub offset: f64,
	/// CSS `transition` applied when an element is revealed.
	pub transition: String,
}

impl Default for RevealConfig {
	fn default() -> Self {
		Self {
			selector: ".reveal".to_string(),
			offset: 20.0,
			transition: "all 0.6s ease".to_string(),
		}
	}
}

/// Anything with writable inline style properties.
pub trait StyleTarget {
	/// Sets one inline style property.
	fn set_style(&self, property: &str, value: &str) -> FxResult<()>;
}

impl StyleTarget for HtmlElement {
	fn set_style(&self, property: &str, value: &str) -> FxResult<()> {
		Ok(self.style().set_property(property, value)?)
	}
}

/// Puts an element in its hidden starting state.
pub fn conceal<T: StyleTarget + ?Sized>(target: &T, config: &RevealConfig) -> FxResult<()> {
	target.set_style("opacity", "0")?;
	target.set_style("transform", &format!("translateY({}px)", config.offset))
}

/// Fades an element in. Writing the same values again changes nothing.
pub fn reveal<T: StyleTarget + ?Sized>(target: &T, config: &RevealConfig) -> FxResult<()> {
	target.set_style("opacity", "1")?;
	target.set_style("transform", "translateY(0)")?;
	target.set_style("transition", &config.transition)
}

/// Applies one intersection entry: intersecting targets are revealed, the
/// rest are left untouched. Returns whether the target was revealed.
pub fn apply_entry<T: StyleTarget + ?Sized>(
	is_intersecting: bool,
	target: &T,
	config: &RevealConfig,
) -> FxResult<bool> {
	if !is_intersecting {
		return Ok(false);
	}
	reveal(target, config)?;
	Ok(true)
}

/// A live observer over the page's reveal elements.
pub struct RevealObserver {
	observer: IntersectionObserver,
	_callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
	observed: usize,
}

impl RevealObserver {
	/// Number of elements being watched.
	pub fn observed(&self) -> usize {
		self.observed
	}
}

impl Drop for RevealObserver {
	fn drop(&mut self) {
		self.observer.disconnect();
	}
}

thread_local! {
	static ACTIVE_OBSERVER: RefCell<Option<RevealObserver>> = const { RefCell::new(None) };
}

fn on_entries(entries: js_sys::Array, config: &RevealConfig) {
	for value in entries.iter() {
		let Ok(entry) = value.dyn_into::<IntersectionObserverEntry>() else {
			continue;
		};
		let Ok(target) = entry.target().dyn_into::<HtmlElement>() else {
			continue;
		};
		if let Err(e) = apply_entry(entry.is_intersecting(), &target, config) {
			warn!("reveal: {}", e);
		}
	}
}

/// Hides every element matching `config.selector` and starts observing them.
pub fn observe(document: &Document, config: RevealConfig) -> FxResult<RevealObserver> {
	let nodes = document.query_selector_all(&config.selector)?;
	let mut elements = Vec::with_capacity(nodes.length() as usize);
	for i in 0..nodes.length() {
		if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
			conceal(&el, &config)?;
			elements.push(el);
		}
	}

	let callback_config = config.clone();
	let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
		move |entries: js_sys::Array, _: IntersectionObserver| {
			on_entries(entries, &callback_config);
		},
	);
	let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())
		.map_err(|e| FxError::dom(format!("IntersectionObserver unavailable: {:?}", e)))?;
	for el in &elements {
		observer.observe(el);
	}

	info!("reveal: observing {} elements matching {}", elements.len(), config.selector);
	Ok(RevealObserver {
		observer,
		_callback: callback,
		observed: elements.len(),
	})
}

/// Observes the current page's reveal elements for the rest of the page's
/// life, replacing any earlier observer.
pub fn install(config: RevealConfig) -> FxResult<usize> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| FxError::dom("no document"))?;
	let observer = observe(&document, config)?;
	let count = observer.observed();
	ACTIVE_OBSERVER.with(|cell| *cell.borrow_mut() = Some(observer));
	Ok(count)
}
