//! Ambient particle field drawn behind the page.
//!
//! A fixed set of glowing particles drifts across a full-window canvas:
//! - Linear drift that bounces softly off the surface edges
//! - A slow circular wobble per particle
//! - Repulsion away from the pointer once it has moved over the page
//! - A translucent overlay each frame that leaves faint trails
//!
//! # Example
//!
//! ```ignore
//! use skyplot_fx::components::particle_field::{ParticleCanvas, Theme};
//!
//! view! { <ParticleCanvas theme=Theme::default() seed=7 /> }
//! ```

pub mod animation;
mod component;
pub mod particles;
pub mod render;
pub mod state;
pub mod theme;

pub use animation::LoopHandle;
pub use component::{ParticleCanvas, stop_active};
pub use state::FieldState;
pub use theme::Theme;
