//! Animated particle background for a 2D canvas.
//!
//! A [`ParticleField`] keeps a set of slowly drifting dots sized to the
//! surface area, wraps them around the edges and joins close pairs with faint
//! lines. In the browser, [`ParticleBackground`] drives it from
//! `requestAnimationFrame` and regenerates it on window resize.

mod utils;

pub mod color;
pub mod config;
pub mod field;
pub mod frame_loop;
pub mod particle;
pub mod surface;

pub use color::Color;
pub use config::{ConfigError, FieldConfig};
pub use field::{connection_alpha, particle_count, ParticleField};
pub use frame_loop::ParticleBackground;
pub use particle::Particle;
pub use surface::{CanvasSurface, Surface};

use wasm_bindgen::prelude::*;
use web_sys::console;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Installs the panic hook and console logging. Call once before starting a
/// background.
#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logging();
}

// Console timer scoped to its own lifetime, shows up in the browser's
// performance tooling
pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}
