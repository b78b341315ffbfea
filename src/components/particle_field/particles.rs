//! Ambient particle simulation.
//!
//! Each particle combines three motions every frame: a linear drift that
//! bounces off the surface edges, a slow circular wobble, and a push away from
//! the pointer when it comes close.

use std::f64::consts::TAU;

use rand::Rng;

use super::theme::{Color, ParticleStyle, RepelStyle};

/// Pointer position in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
	pub x: f64,
	pub y: f64,
}

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub direction_x: f64,
	pub direction_y: f64,
	size: f64,
	color: Color,
	opacity: f64,
	trail_length: f64,
	angle: f64,
	speed: f64,
}

/// Uniform sample in `[min, max)`; collapses to `min` when the range is empty.
fn sample<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
	min + rng.r#gen::<f64>() * (max - min).max(0.0)
}

impl Particle {
	/// Spawns a particle fully inside a `width` x `height` surface.
	pub fn random<R: Rng + ?Sized>(
		rng: &mut R,
		style: &ParticleStyle,
		width: f64,
		height: f64,
	) -> Self {
		let size = sample(rng, style.size_min, style.size_max);
		let x = sample(rng, size, width - size);
		let y = sample(rng, size, height - size);
		let direction_x = sample(rng, -style.drift, style.drift);
		let direction_y = sample(rng, -style.drift, style.drift);

		let channel_min = f64::from(style.channel_min);
		let mut channel = || sample(rng, channel_min, 255.0) as u8;
		let (r, g, b) = (channel(), channel(), channel());
		let color = Color::rgba(r, g, b, sample(rng, style.alpha_min, style.alpha_max));

		Self {
			x,
			y,
			direction_x,
			direction_y,
			size,
			color,
			opacity: sample(rng, style.opacity_min, style.opacity_max),
			trail_length: sample(rng, style.trail_min, style.trail_max),
			angle: sample(rng, 0.0, TAU),
			speed: sample(rng, style.orbit_speed_min, style.orbit_speed_max),
		}
	}

	pub fn size(&self) -> f64 {
		self.size
	}

	pub fn color(&self) -> Color {
		self.color
	}

	pub fn opacity(&self) -> f64 {
		self.opacity
	}

	pub fn angle(&self) -> f64 {
		self.angle
	}

	/// Outer radius of the glow gradient.
	pub fn glow_radius(&self) -> f64 {
		self.size + self.trail_length
	}

	/// Reverses the drift on any axis where the particle sits outside the
	/// surface. Position is left as is, so a particle may spend a frame past
	/// the edge before the reversed drift brings it back.
	fn reflect(&mut self, width: f64, height: f64) {
		if self.x > width || self.x < 0.0 {
			self.direction_x = -self.direction_x;
		}
		if self.y > height || self.y < 0.0 {
			self.direction_y = -self.direction_y;
		}
	}

	/// Advances the particle one frame.
	pub fn update(
		&mut self,
		width: f64,
		height: f64,
		angle_step: f64,
		pointer: Option<Pointer>,
		repel: &RepelStyle,
	) {
		self.reflect(width, height);

		// Orbital wobble
		self.x += self.angle.cos() * self.speed;
		self.y += self.angle.sin() * self.speed;
		self.angle = (self.angle + angle_step).rem_euclid(TAU);

		// Larger particles drift slower
		self.x += self.direction_x * (1.0 / self.size);
		self.y += self.direction_y * (1.0 / self.size);

		if let Some(p) = pointer {
			let (dx, dy) = (p.x - self.x, p.y - self.y);
			let distance = (dx * dx + dy * dy).sqrt();
			if distance < repel.radius {
				self.x -= dx * repel.strength;
				self.y -= dy * repel.strength;
			}
		}
	}
}

/// Owns the fixed particle collection.
pub struct ParticleSystem {
	pub particles: Vec<Particle>,
	angle_step: f64,
}

impl ParticleSystem {
	pub fn new<R: Rng + ?Sized>(
		rng: &mut R,
		style: &ParticleStyle,
		width: f64,
		height: f64,
	) -> Self {
		let particles = (0..style.count)
			.map(|_| Particle::random(rng, style, width, height))
			.collect();

		Self {
			particles,
			angle_step: style.angle_step,
		}
	}

	/// Update every particle in collection order.
	pub fn update(
		&mut self,
		width: f64,
		height: f64,
		pointer: Option<Pointer>,
		repel: &RepelStyle,
	) {
		for p in &mut self.particles {
			p.update(width, height, self.angle_step, pointer, repel);
		}
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	fn still_particle(x: f64, y: f64) -> Particle {
		Particle {
			x,
			y,
			direction_x: 0.0,
			direction_y: 0.0,
			size: 2.0,
			color: Color::rgba(200, 200, 200, 0.8),
			opacity: 0.7,
			trail_length: 15.0,
			angle: 0.0,
			speed: 0.0,
		}
	}

	fn system(seed: u64) -> ParticleSystem {
		let mut rng = SmallRng::seed_from_u64(seed);
		ParticleSystem::new(&mut rng, &ParticleStyle::default(), 800.0, 600.0)
	}

	#[test]
	fn spawns_inside_bounds_with_style_ranges() {
		let ps = system(7);
		assert_eq!(ps.len(), 300);
		for p in &ps.particles {
			assert!((1.0..3.0).contains(&p.size()));
			assert!(p.x >= p.size() && p.x <= 800.0 - p.size());
			assert!(p.y >= p.size() && p.y <= 600.0 - p.size());
			assert!(p.direction_x.abs() <= 0.2 && p.direction_y.abs() <= 0.2);
			let c = p.color();
			assert!(c.r >= 155 && c.g >= 155 && c.b >= 155);
			assert!((0.5..1.0).contains(&c.a));
			let trail = p.glow_radius() - p.size();
			assert!(trail > 10.0 - 1e-9 && trail < 30.0 + 1e-9);
			assert!((0.01..0.03).contains(&p.speed));
			assert!((0.0..TAU).contains(&p.angle()));
		}
	}

	#[test]
	fn same_seed_same_field() {
		assert_eq!(system(42).particles, system(42).particles);
		assert_ne!(system(42).particles, system(43).particles);
	}

	#[test]
	fn tiny_surface_does_not_panic() {
		let mut rng = SmallRng::seed_from_u64(1);
		let p = Particle::random(&mut rng, &ParticleStyle::default(), 0.0, 0.0);
		assert_eq!(p.x, p.size());
		assert_eq!(p.y, p.size());
	}

	#[test]
	fn size_and_opacity_hold_over_many_frames() {
		let mut ps = system(3);
		let repel = RepelStyle::default();
		let before: Vec<_> = ps.particles.iter().map(|p| (p.size(), p.opacity())).collect();
		for frame in 0..500 {
			let pointer = (frame % 2 == 0).then_some(Pointer { x: 400.0, y: 300.0 });
			ps.update(800.0, 600.0, pointer, &repel);
		}
		for (p, (size, opacity)) in ps.particles.iter().zip(before) {
			assert!(p.size() > 0.0);
			assert_eq!(p.size(), size);
			assert_eq!(p.opacity(), opacity);
			assert!((0.5..=1.0).contains(&p.opacity()));
		}
	}

	#[test]
	fn reflects_only_when_outside() {
		let repel = RepelStyle::default();

		let mut inside = still_particle(50.0, 50.0);
		inside.direction_x = 0.1;
		inside.direction_y = -0.1;
		inside.update(100.0, 100.0, 0.01, None, &repel);
		assert_eq!((inside.direction_x, inside.direction_y), (0.1, -0.1));

		let mut right = still_particle(100.5, 50.0);
		right.direction_x = 0.1;
		right.update(100.0, 100.0, 0.01, None, &repel);
		assert_eq!(right.direction_x, -0.1);

		let mut above = still_particle(50.0, -0.5);
		above.direction_y = -0.1;
		above.update(100.0, 100.0, 0.01, None, &repel);
		assert_eq!(above.direction_y, 0.1);
	}

	#[test]
	fn bounce_is_not_clamped() {
		let mut p = still_particle(101.0, 50.0);
		p.direction_x = 0.2;
		p.update(100.0, 100.0, 0.01, None, &RepelStyle::default());
		// Reversed drift moves it back by 0.2 / size, still past the edge.
		assert!((p.x - 100.9).abs() < 1e-9);
	}

	#[test]
	fn orbit_and_drift_follow_angle_and_size() {
		let mut p = still_particle(10.0, 10.0);
		p.speed = 0.02;
		p.angle = std::f64::consts::FRAC_PI_2;
		p.direction_x = 0.2;
		p.update(100.0, 100.0, 0.01, None, &RepelStyle::default());
		assert!((p.x - 10.1).abs() < 1e-9);
		assert!((p.y - 10.02).abs() < 1e-9);
		assert!((p.angle() - (std::f64::consts::FRAC_PI_2 + 0.01)).abs() < 1e-12);
	}

	#[test]
	fn angle_wraps_around_full_turn() {
		let mut p = still_particle(10.0, 10.0);
		p.angle = TAU - 0.005;
		p.update(100.0, 100.0, 0.01, None, &RepelStyle::default());
		assert!((p.angle() - 0.005).abs() < 1e-9);
	}

	#[test]
	fn no_pointer_no_repulsion() {
		let repel = RepelStyle::default();
		let mut a = still_particle(50.0, 50.0);
		let b = a.clone();
		a.update(100.0, 100.0, 0.01, None, &repel);
		assert_eq!((a.x, a.y), (b.x, b.y));
	}

	#[test]
	fn pointer_inside_radius_pushes_away() {
		let mut p = still_particle(50.0, 50.0);
		p.update(
			100.0,
			100.0,
			0.01,
			Some(Pointer { x: 60.0, y: 50.0 }),
			&RepelStyle::default(),
		);
		assert!((p.x - 49.8).abs() < 1e-9);
		assert_eq!(p.y, 50.0);
	}

	#[test]
	fn pointer_at_radius_is_ignored() {
		let mut p = still_particle(0.0, 50.0);
		p.update(
			400.0,
			100.0,
			0.01,
			Some(Pointer { x: 150.0, y: 50.0 }),
			&RepelStyle::default(),
		);
		assert_eq!((p.x, p.y), (0.0, 50.0));
	}
}
