//! Field context: the particle collection plus the shared inputs it reads.
//!
//! Pointer moves and window resizes write here between frames; the animation
//! loop reads it once per frame. Only one callback runs at a time, so plain
//! `&mut` access through a `RefCell` is enough.

use rand::Rng;

use super::particles::{ParticleSystem, Pointer};
use super::theme::Theme;

/// Everything one frame of the particle field needs.
pub struct FieldState {
	pub particles: ParticleSystem,
	pub theme: Theme,
	pub width: f64,
	pub height: f64,
	/// Last known pointer position; `None` until the first pointer move.
	pub pointer: Option<Pointer>,
	pub frame: u64,
}

impl FieldState {
	pub fn new<R: Rng + ?Sized>(rng: &mut R, theme: Theme, width: f64, height: f64) -> Self {
		let particles = ParticleSystem::new(rng, &theme.particles, width, height);
		Self {
			particles,
			theme,
			width,
			height,
			pointer: None,
			frame: 0,
		}
	}

	pub fn set_pointer(&mut self, x: f64, y: f64) {
		self.pointer = Some(Pointer { x, y });
	}

	/// Adopts new surface bounds. Particles keep their positions and bounce
	/// back in on their own.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Advances every particle one frame.
	pub fn tick(&mut self) {
		self.particles
			.update(self.width, self.height, self.pointer, &self.theme.repel);
		self.frame += 1;
	}
}
