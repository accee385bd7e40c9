//! A real-time Mandelbulb renderer.
//!
//! The crate is split along the per-frame data flow: [`ray`] turns a pixel
//! coordinate into a world-space ray, [`march`] sphere-traces it through the
//! [`fractal`] distance field, [`colour`] turns the outcome into a colour
//! sample, and [`render`] runs that pipeline for every pixel of a frame in
//! parallel. The host loop in `main.rs` only delivers parameters and
//! presents the finished buffer.

pub mod animation;
pub mod colour;
pub mod fractal;
pub mod march;
pub mod params;
pub mod pixel;
pub mod ray;
pub mod render;
pub mod screen;

pub use march::{march, MarchConfig, MarchOutcome, Ray};
pub use params::{FractalParameters, FrameParameters};
pub use render::{ensure_buffer, render_frame};
pub use screen::Size;
