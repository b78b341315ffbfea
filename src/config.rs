//! Page configuration.
//!
//! Server templates can tune the effects by embedding JSON in a script
//! element:
//!
//! ```html
//! <script id="skyplot-config" type="application/json">
//!   { "seed": 7, "theme": { "particles": { "count": 150 } } }
//! </script>
//! ```
//!
//! Every field is optional. Without the element the defaults apply.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::components::particle_field::Theme;
use crate::components::plot_form::PlotConfig;
use crate::components::reveal::RevealConfig;
use crate::error::{FxError, FxResult};

/// Id of the script element holding the page configuration.
pub const CONFIG_ELEMENT_ID: &str = "skyplot-config";

/// All tunables for the page effects.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
	/// Fixed seed for the particle layout; random per page load when absent.
	pub seed: Option<u64>,
	/// Particle look and motion; validated on load.
	pub theme: Theme,
	/// Which elements fade in on scroll, and how.
	pub reveal: RevealConfig,
	/// Plot form input ids and target path.
	pub plot: PlotConfig,
}

impl PageConfig {
	/// Parses and validates a JSON configuration.
	pub fn from_json(json: &str) -> FxResult<Self> {
		let config: PageConfig = serde_json::from_str(json)?;
		config.theme.validate()?;
		Ok(config)
	}
}

fn config_text() -> FxResult<Option<String>> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| FxError::dom("no document"))?;
	let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
		return Ok(None);
	};
	let script: HtmlScriptElement = element
		.dyn_into()
		.map_err(|_| FxError::config(format!("#{CONFIG_ELEMENT_ID} is not a script element")))?;
	Ok(Some(script.text()?))
}

/// Loads the page configuration, falling back to defaults on any problem.
pub fn load() -> PageConfig {
	let text = match config_text() {
		Ok(Some(text)) => text,
		Ok(None) => return PageConfig::default(),
		Err(e) => {
			warn!("skyplot-fx: config unavailable: {}", e);
			return PageConfig::default();
		}
	};

	match PageConfig::from_json(&text) {
		Ok(config) => {
			info!(
				"skyplot-fx: loaded config ({} particles)",
				config.theme.particles.count
			);
			config
		}
		Err(e) => {
			warn!("skyplot-fx: ignoring config: {}", e);
			PageConfig::default()
		}
	}
}
