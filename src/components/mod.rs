//! Page components: particle background, scroll reveal and the plot form.

pub mod particle_field;
pub mod plot_form;
pub mod reveal;
