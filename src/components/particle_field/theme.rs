//! Visual theming for the particle field.
//!
//! Holds the color type and the tunable styles for particle spawning, the
//! per-frame fade overlay and pointer repulsion. Every style deserializes with
//! defaults so page configuration can override single fields.

use serde::Deserialize;

use crate::error::{FxError, FxResult};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	#[serde(default = "opaque")]
	pub a: f64,
}

fn opaque() -> f64 {
	1.0
}

impl Color {
	/// Fully transparent black, the outer stop of every particle glow.
	pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0.0);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Spawn parameters for the particle collection.
///
/// Each `*_min`/`*_max` pair is a half-open sampling range.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleStyle {
	/// Number of particles created at startup.
	pub count: usize,
	/// Minimum particle radius
	pub size_min: f64,
	/// Maximum particle radius
	pub size_max: f64,
	/// Directional bias is sampled in `[-drift, drift)` on each axis.
	pub drift: f64,
	/// Lowest value of each RGB channel; keeps particles in light tones.
	pub channel_min: u8,
	/// Minimum alpha baked into the particle color
	pub alpha_min: f64,
	/// Maximum alpha baked into the particle color
	pub alpha_max: f64,
	/// Minimum particle opacity
	pub opacity_min: f64,
	/// Maximum particle opacity
	pub opacity_max: f64,
	/// Minimum extra glow radius past the particle edge
	pub trail_min: f64,
	/// Maximum extra glow radius past the particle edge
	pub trail_max: f64,
	/// Minimum orbital wobble speed
	pub orbit_speed_min: f64,
	/// Maximum orbital wobble speed
	pub orbit_speed_max: f64,
	/// Orbital angle advance per frame, in radians.
	pub angle_step: f64,
}

impl Default for ParticleStyle {
	fn default() -> Self {
		Self {
			count: 300,
			size_min: 1.0,
			size_max: 3.0,
			drift: 0.2,
			channel_min: 155,
			alpha_min: 0.5,
			alpha_max: 1.0,
			opacity_min: 0.5,
			opacity_max: 1.0,
			trail_min: 10.0,
			trail_max: 30.0,
			orbit_speed_min: 0.01,
			orbit_speed_max: 0.03,
			angle_step: 0.01,
		}
	}
}

/// Translucent diagonal gradient laid over the surface every frame.
///
/// Because the overlay is not opaque, previous frames fade out over a few
/// frames instead of vanishing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
	pub enabled: bool,
	/// Color at the top-left corner
	pub start: Color,
	/// Color at the bottom-right corner
	pub end: Color,
}

impl Default for OverlayStyle {
	fn default() -> Self {
		Self {
			enabled: true,
			start: Color::rgba(10, 10, 10, 0.1),
			end: Color::rgba(255, 255, 255, 0.1),
		}
	}
}

/// Pointer repulsion parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RepelStyle {
	/// Particles closer than this to the pointer are pushed away.
	pub radius: f64,
	/// Fraction of the particle-to-pointer delta applied per frame.
	pub strength: f64,
}

impl Default for RepelStyle {
	fn default() -> Self {
		Self {
			radius: 150.0,
			strength: 0.02,
		}
	}
}

/// Complete visual theme for the field.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
	pub particles: ParticleStyle,
	pub overlay: OverlayStyle,
	pub repel: RepelStyle,
}

impl Theme {
	/// Rejects themes that would break the particle invariants.
	pub fn validate(&self) -> FxResult<()> {
		let p = &self.particles;
		if p.size_min <= 0.0 {
			return Err(FxError::config("particles.size_min must be positive"));
		}
		let ranges = [
			("size", p.size_min, p.size_max),
			("alpha", p.alpha_min, p.alpha_max),
			("opacity", p.opacity_min, p.opacity_max),
			("trail", p.trail_min, p.trail_max),
			("orbit_speed", p.orbit_speed_min, p.orbit_speed_max),
		];
		for (name, min, max) in ranges {
			if min > max {
				return Err(FxError::config(format!(
					"particles.{name}_min must not exceed particles.{name}_max"
				)));
			}
		}
		if p.opacity_min < 0.5 || p.opacity_max > 1.0 {
			return Err(FxError::config("particles.opacity must stay within [0.5, 1.0]"));
		}
		if p.alpha_min < 0.0 || p.alpha_max > 1.0 {
			return Err(FxError::config("particles.alpha must stay within [0, 1]"));
		}
		if p.orbit_speed_min <= 0.0 {
			return Err(FxError::config("particles.orbit_speed_min must be positive"));
		}
		if p.trail_min < 0.0 {
			return Err(FxError::config("particles.trail_min must be non-negative"));
		}
		if p.drift < 0.0 || self.repel.radius < 0.0 {
			return Err(FxError::config("drift and repel radius must be non-negative"));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_always_carries_alpha() {
		assert_eq!(Color::rgb(1, 2, 3).to_css(), "rgba(1, 2, 3, 1)");
		assert_eq!(Color::rgba(10, 10, 10, 0.1).to_css(), "rgba(10, 10, 10, 0.1)");
		assert_eq!(Color::TRANSPARENT.to_css(), "rgba(0, 0, 0, 0)");
	}

	#[test]
	fn default_theme_is_valid() {
		assert!(Theme::default().validate().is_ok());
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let theme: Theme =
			serde_json::from_str(r#"{ "particles": { "count": 12 }, "repel": { "radius": 80 } }"#)
				.unwrap();
		assert_eq!(theme.particles.count, 12);
		assert_eq!(theme.particles.size_min, 1.0);
		assert_eq!(theme.repel.radius, 80.0);
		assert_eq!(theme.repel.strength, 0.02);
		assert_eq!(theme.overlay, OverlayStyle::default());
	}

	#[test]
	fn color_alpha_defaults_to_opaque() {
		let c: Color = serde_json::from_str(r#"{ "r": 1, "g": 2, "b": 3 }"#).unwrap();
		assert_eq!(c, Color::rgb(1, 2, 3));
	}

	#[test]
	fn rejects_non_positive_size() {
		let mut theme = Theme::default();
		theme.particles.size_min = 0.0;
		assert!(theme.validate().is_err());
	}

	#[test]
	fn rejects_opacity_outside_half_to_one() {
		let mut theme = Theme::default();
		theme.particles.opacity_min = 0.0;
		theme.particles.opacity_max = 0.1;
		assert!(theme.validate().unwrap_err().to_string().contains("opacity"));

		let mut theme = Theme::default();
		theme.particles.opacity_max = 1.5;
		assert!(theme.validate().is_err());
	}

	#[test]
	fn rejects_alpha_outside_unit_range() {
		let mut theme = Theme::default();
		theme.particles.alpha_max = 2.0;
		assert!(theme.validate().unwrap_err().to_string().contains("alpha"));

		let mut theme = Theme::default();
		theme.particles.alpha_min = -0.1;
		assert!(theme.validate().is_err());
	}

	#[test]
	fn rejects_non_positive_orbit_speed() {
		let mut theme = Theme::default();
		theme.particles.orbit_speed_min = -5.0;
		assert!(theme.validate().unwrap_err().to_string().contains("orbit_speed_min"));

		theme.particles.orbit_speed_min = 0.0;
		assert!(theme.validate().is_err());
	}

	#[test]
	fn rejects_negative_trail() {
		let mut theme = Theme::default();
		theme.particles.trail_min = -50.0;
		theme.particles.trail_max = -40.0;
		assert!(theme.validate().unwrap_err().to_string().contains("trail_min"));
	}

	#[test]
	fn rejects_inverted_ranges() {
		let mut theme = Theme::default();
		theme.particles.opacity_min = 0.9;
		theme.particles.opacity_max = 0.2;
		assert!(matches!(theme.validate(), Err(FxError::Config(_))));
	}
}
