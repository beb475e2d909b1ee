mod utils;

pub mod animation;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod particle;
pub mod recording;
pub mod surface;
pub mod web;

pub use animation::{Animation, FrameClock, ResizeSignal};
pub use color::Color;
pub use config::FieldConfig;
pub use error::FieldError;
pub use field::{connection_opacity, ParticleField};
pub use particle::Particle;
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::Surface;
pub use web::{CanvasSurface, ParticleBackground, WindowClock, WindowResize};

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}
