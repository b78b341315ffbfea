//! Error type shared by the page effects.

use wasm_bindgen::JsValue;

/// Result alias used across the crate.
pub type FxResult<T> = Result<T, FxError>;

/// Failures raised while wiring up or drawing the page effects.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FxError {
	/// A DOM node or browser API was missing or rejected a call.
	#[error("dom error: {0}")]
	Dom(String),

	/// A canvas draw call failed.
	#[error("render error: {0}")]
	Render(String),

	/// Page configuration could not be used.
	#[error("config error: {0}")]
	Config(String),

	/// The plot form was submitted with an empty field.
	#[error("Please fill in both the date and object fields.")]
	IncompleteForm,
}

impl FxError {
	/// Builds a [`FxError::Dom`].
	pub fn dom(msg: impl Into<String>) -> Self {
		Self::Dom(msg.into())
	}

	/// Builds a [`FxError::Render`].
	pub fn render(msg: impl Into<String>) -> Self {
		Self::Render(msg.into())
	}

	/// Builds a [`FxError::Config`].
	pub fn config(msg: impl Into<String>) -> Self {
		Self::Config(msg.into())
	}
}

impl From<JsValue> for FxError {
	fn from(value: JsValue) -> Self {
		Self::Dom(
			value
				.as_string()
				.unwrap_or_else(|| format!("{:?}", value)),
		)
	}
}

impl From<serde_json::Error> for FxError {
	fn from(err: serde_json::Error) -> Self {
		Self::Config(err.to_string())
	}
}
