//! Plot request form.
//!
//! Reads a date and an object name and sends the browser to the plot page
//! with both as query parameters. An empty field raises a blocking alert and
//! nothing else happens.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use log::{info, warn};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlInputElement};

use crate::error::{FxError, FxResult};

/// Characters `encodeURIComponent` leaves as they are, besides alphanumerics.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'_')
	.remove(b'.')
	.remove(b'!')
	.remove(b'~')
	.remove(b'*')
	.remove(b'\'')
	.remove(b'(')
	.remove(b')');

/// Percent-encodes a query value the way browsers' `encodeURIComponent` does.
pub fn encode_component(value: &str) -> String {
	utf8_percent_encode(value, COMPONENT).to_string()
}

/// Where the form reads from and where it navigates to.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
	/// Path of the plot page.
	pub path: String,
	/// Element id of the date input.
	pub date_input: String,
	/// Element id of the object name input.
	pub object_input: String,
}

impl Default for PlotConfig {
	fn default() -> Self {
		Self {
			path: "/plot_page".to_string(),
			date_input: "date".to_string(),
			object_input: "object".to_string(),
		}
	}
}

/// A validated plot request.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotRequest {
	pub datetime: String,
	pub object: String,
}

impl PlotRequest {
	/// Only checks that both values are present; the date format is left to
	/// the server.
	pub fn new(datetime: impl Into<String>, object: impl Into<String>) -> FxResult<Self> {
		let (datetime, object) = (datetime.into(), object.into());
		if datetime.is_empty() || object.is_empty() {
			return Err(FxError::IncompleteForm);
		}
		Ok(Self { datetime, object })
	}

	/// Target URL, e.g. `/plot_page?datetime=2024-01-01&object=Mars`.
	pub fn href(&self, path: &str) -> String {
		format!(
			"{}?datetime={}&object={}",
			path,
			encode_component(&self.datetime),
			encode_component(&self.object)
		)
	}
}

/// What a form submission did.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
	/// The browser was sent to this URL.
	Navigated(String),
	/// A field was empty and the user was alerted.
	Rejected,
}

fn input_value(document: &Document, id: &str) -> FxResult<String> {
	let input: HtmlInputElement = document
		.get_element_by_id(id)
		.ok_or_else(|| FxError::dom(format!("no element #{id}")))?
		.dyn_into()
		.map_err(|_| FxError::dom(format!("#{id} is not an input")))?;
	Ok(input.value())
}

/// Browser side effects of a submission.
pub trait Navigator {
	/// Shows a blocking message.
	fn alert(&self, message: &str) -> FxResult<()>;
	/// Sends the browser to `href`.
	fn navigate(&self, href: &str) -> FxResult<()>;
}

impl Navigator for web_sys::Window {
	fn alert(&self, message: &str) -> FxResult<()> {
		self.alert_with_message(message)?;
		Ok(())
	}

	fn navigate(&self, href: &str) -> FxResult<()> {
		self.location().set_href(href)?;
		Ok(())
	}
}

/// Navigates when both values are present, alerts otherwise.
pub fn submit_values<N: Navigator + ?Sized>(
	nav: &N,
	config: &PlotConfig,
	datetime: String,
	object: String,
) -> FxResult<Submission> {
	match PlotRequest::new(datetime, object) {
		Ok(request) => {
			let href = request.href(&config.path);
			info!("plot form: navigating to {}", href);
			nav.navigate(&href)?;
			Ok(Submission::Navigated(href))
		}
		Err(e @ FxError::IncompleteForm) => {
			nav.alert(&e.to_string())?;
			Ok(Submission::Rejected)
		}
		Err(e) => Err(e),
	}
}

/// Reads the form inputs from the page and navigates or alerts.
pub fn submit(config: &PlotConfig) -> FxResult<Submission> {
	let window = web_sys::window().ok_or_else(|| FxError::dom("no window"))?;
	let document = window.document().ok_or_else(|| FxError::dom("no document"))?;
	let datetime = input_value(&document, &config.date_input)?;
	let object = input_value(&document, &config.object_input)?;
	submit_values(&window, config, datetime, object)
}

/// Date and object inputs with a submit button.
///
/// Input ids come from `config` so server-rendered scripts that look up
/// `#date` and `#object` keep working.
#[component]
pub fn PlotForm(#[prop(optional)] config: Option<PlotConfig>) -> impl IntoView {
	let config = config.unwrap_or_default();
	let (date_id, object_id) = (config.date_input.clone(), config.object_input.clone());

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		if let Err(e) = submit(&config) {
			warn!("plot form: {}", e);
		}
	};

	view! {
		<form class="plot-form" on:submit=on_submit>
			<label for=date_id.clone()>"Date and time"</label>
			<input type="datetime-local" id=date_id />
			<label for=object_id.clone()>"Object"</label>
			<input type="text" id=object_id placeholder="e.g. Mars" />
			<button type="submit">"Calculate"</button>
		</form>
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use super::*;

	#[derive(Default)]
	struct RecordingNavigator {
		alerts: RefCell<Vec<String>>,
		visits: RefCell<Vec<String>>,
	}

	impl Navigator for RecordingNavigator {
		fn alert(&self, message: &str) -> FxResult<()> {
			self.alerts.borrow_mut().push(message.to_string());
			Ok(())
		}

		fn navigate(&self, href: &str) -> FxResult<()> {
			self.visits.borrow_mut().push(href.to_string());
			Ok(())
		}
	}

	#[test]
	fn empty_field_alerts_and_stays() {
		let nav = RecordingNavigator::default();
		let outcome = submit_values(
			&nav,
			&PlotConfig::default(),
			"2024-01-01".to_string(),
			String::new(),
		)
		.unwrap();
		assert_eq!(outcome, Submission::Rejected);
		assert_eq!(
			*nav.alerts.borrow(),
			["Please fill in both the date and object fields."]
		);
		assert!(nav.visits.borrow().is_empty());
	}

	#[test]
	fn complete_form_navigates_once() {
		let nav = RecordingNavigator::default();
		let outcome = submit_values(
			&nav,
			&PlotConfig::default(),
			"2024-01-01".to_string(),
			"Mars".to_string(),
		)
		.unwrap();
		let href = "/plot_page?datetime=2024-01-01&object=Mars";
		assert_eq!(outcome, Submission::Navigated(href.to_string()));
		assert_eq!(*nav.visits.borrow(), [href]);
		assert!(nav.alerts.borrow().is_empty());
	}

	#[test]
	fn navigation_failure_propagates() {
		struct Blocked;
		impl Navigator for Blocked {
			fn alert(&self, _: &str) -> FxResult<()> {
				Ok(())
			}
			fn navigate(&self, _: &str) -> FxResult<()> {
				Err(FxError::dom("navigation blocked"))
			}
		}

		let result = submit_values(&Blocked, &PlotConfig::default(), "d".into(), "o".into());
		assert_eq!(result, Err(FxError::dom("navigation blocked")));
	}

	#[test]
	fn plain_values_pass_through() {
		let req = PlotRequest::new("2024-01-01", "Mars").unwrap();
		assert_eq!(
			req.href("/plot_page"),
			"/plot_page?datetime=2024-01-01&object=Mars"
		);
	}

	#[test]
	fn datetime_local_values_encode_colons() {
		let req = PlotRequest::new("2024-01-01T21:30", "M31").unwrap();
		assert_eq!(
			req.href("/plot_page"),
			"/plot_page?datetime=2024-01-01T21%3A30&object=M31"
		);
	}

	#[test]
	fn empty_object_is_rejected() {
		assert_eq!(
			PlotRequest::new("2024-01-01", ""),
			Err(FxError::IncompleteForm)
		);
	}

	#[test]
	fn empty_date_is_rejected() {
		assert_eq!(PlotRequest::new("", "Mars"), Err(FxError::IncompleteForm));
	}

	#[test]
	fn whitespace_counts_as_present() {
		let req = PlotRequest::new(" ", "Mars").unwrap();
		assert_eq!(req.href("/p"), "/p?datetime=%20&object=Mars");
	}

	#[test]
	fn encodes_like_encode_uri_component() {
		assert_eq!(encode_component("Andromeda Galaxy"), "Andromeda%20Galaxy");
		assert_eq!(encode_component("a&b=c?d/e#f"), "a%26b%3Dc%3Fd%2Fe%23f");
		assert_eq!(encode_component("-_.!~*'()"), "-_.!~*'()");
		assert_eq!(encode_component("+,;@$"), "%2B%2C%3B%40%24");
		assert_eq!(encode_component("سهيل"), "%D8%B3%D9%87%D9%8A%D9%84");
	}

	#[test]
	fn default_config_targets_plot_page() {
		let config = PlotConfig::default();
		assert_eq!(config.path, "/plot_page");
		assert_eq!(config.date_input, "date");
		assert_eq!(config.object_input, "object");
	}
}
