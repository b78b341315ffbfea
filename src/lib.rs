//! skyplot-fx: page effects for the sky object plotting site.
//!
//! This crate provides the WASM front-end of the landing page: an ambient
//! particle background on a full-window canvas, a reveal-on-scroll effect for
//! marked sections, and the form that sends the user to the plot page.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::prelude::*;

pub mod components;
pub mod config;
pub mod error;

pub use components::particle_field::{LoopHandle, ParticleCanvas, Theme};
pub use components::plot_form::{PlotConfig, PlotForm, PlotRequest};
pub use components::reveal::RevealConfig;
pub use config::PageConfig;
pub use error::{FxError, FxResult};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("skyplot-fx: logging initialized");
}

/// Form handler for server-rendered pages that call `calculate()` from an
/// `onclick` attribute.
#[wasm_bindgen]
pub fn calculate() {
	let config = config::load();
	if let Err(e) = components::plot_form::submit(&config.plot) {
		warn!("skyplot-fx: calculate failed: {}", e);
	}
}

/// Stops the particle animation. Returns whether it was running.
#[wasm_bindgen]
pub fn stop_particle_field() -> bool {
	components::particle_field::stop_active()
}

/// Main application component.
/// Loads page configuration from the DOM and renders the landing page.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = config::load();
	let reveal_config = config.reveal.clone();

	// Reveal elements exist once the view below is mounted.
	Effect::new(move |_| match components::reveal::install(reveal_config.clone()) {
		Ok(count) => info!("skyplot-fx: {} reveal elements", count),
		Err(e) => warn!("skyplot-fx: reveal disabled: {}", e),
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Sky Object Plotter" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleCanvas theme=config.theme seed=config.seed />
		<main class="page">
			<section class="hero reveal">
				<h1>"Sky Object Plotter"</h1>
				<p class="subtitle">"See where a star, planet or galaxy sits in the sky at any moment."</p>
			</section>
			<section class="plot reveal">
				<h2>"Plot an object"</h2>
				<PlotForm config=config.plot />
			</section>
		</main>
	}
}
