//! Canvas rendering for the particle field.
//!
//! A frame is drawn in two passes:
//! 1. Clear the surface and lay the translucent fade overlay over it
//! 2. Draw each particle as a disc filled with a radial glow
//!
//! Drawing goes through the [`Surface`] trait so the frame composition can be
//! checked without a browser.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::FieldState;
use super::theme::Color;
use crate::error::{FxError, FxResult};

/// Immediate-mode drawing operations a frame needs.
pub trait Surface {
	/// Clears a rectangle to transparent.
	fn clear_rect(&self, x: f64, y: f64, width: f64, height: f64);

	/// Fills a rectangle with a linear gradient running along its diagonal,
	/// from the top-left corner to the bottom-right corner.
	fn fill_rect_diagonal(
		&self,
		x: f64,
		y: f64,
		width: f64,
		height: f64,
		from: Color,
		to: Color,
	) -> FxResult<()>;

	/// Fills a circle of `radius` with a radial gradient centered on it that
	/// runs from `from` at the center to `to` at `outer_radius`.
	fn fill_circle_radial(
		&self,
		x: f64,
		y: f64,
		radius: f64,
		outer_radius: f64,
		from: Color,
		to: Color,
	) -> FxResult<()>;
}

impl Surface for CanvasRenderingContext2d {
	fn clear_rect(&self, x: f64, y: f64, width: f64, height: f64) {
		CanvasRenderingContext2d::clear_rect(self, x, y, width, height);
	}

	fn fill_rect_diagonal(
		&self,
		x: f64,
		y: f64,
		width: f64,
		height: f64,
		from: Color,
		to: Color,
	) -> FxResult<()> {
		let gradient = self.create_linear_gradient(x, y, x + width, y + height);
		gradient
			.add_color_stop(0.0, &from.to_css())
			.map_err(|e| FxError::render(format!("overlay stop: {:?}", e)))?;
		gradient
			.add_color_stop(1.0, &to.to_css())
			.map_err(|e| FxError::render(format!("overlay stop: {:?}", e)))?;

		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.fill_rect(x, y, width, height);
		Ok(())
	}

	fn fill_circle_radial(
		&self,
		x: f64,
		y: f64,
		radius: f64,
		outer_radius: f64,
		from: Color,
		to: Color,
	) -> FxResult<()> {
		self.begin_path();
		self.arc(x, y, radius, 0.0, PI * 2.0)
			.map_err(|e| FxError::render(format!("arc: {:?}", e)))?;

		let gradient = self
			.create_radial_gradient(x, y, 0.0, x, y, outer_radius)
			.map_err(|e| FxError::render(format!("radial gradient: {:?}", e)))?;
		gradient
			.add_color_stop(0.0, &from.to_css())
			.map_err(|e| FxError::render(format!("glow stop: {:?}", e)))?;
		gradient
			.add_color_stop(1.0, &to.to_css())
			.map_err(|e| FxError::render(format!("glow stop: {:?}", e)))?;

		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.fill();
		Ok(())
	}
}

/// Renders one complete frame of the field.
pub fn render<S: Surface + ?Sized>(state: &FieldState, surface: &S) -> FxResult<()> {
	draw_background(state, surface)?;
	draw_particles(state, surface)
}

fn draw_background<S: Surface + ?Sized>(state: &FieldState, surface: &S) -> FxResult<()> {
	let (w, h) = (state.width, state.height);
	surface.clear_rect(0.0, 0.0, w, h);

	let overlay = &state.theme.overlay;
	if !overlay.enabled {
		return Ok(());
	}
	surface.fill_rect_diagonal(0.0, 0.0, w, h, overlay.start, overlay.end)
}

fn draw_particles<S: Surface + ?Sized>(state: &FieldState, surface: &S) -> FxResult<()> {
	for p in &state.particles.particles {
		surface.fill_circle_radial(
			p.x,
			p.y,
			p.size(),
			p.glow_radius(),
			p.color(),
			Color::TRANSPARENT,
		)?;
	}
	Ok(())
}
