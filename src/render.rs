//! The per-frame pass: one independent unit of work per output pixel.

use log::trace;
use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSliceMut};

use crate::colour;
use crate::fractal::mandelbulb_distance;
use crate::march::{march, MarchConfig};
use crate::params::{FractalParameters, FrameParameters};
use crate::pixel::Rgba;
use crate::ray;
use crate::screen::Size;

/// Return a buffer with exactly one cell per pixel of `size`, reusing
/// `buffer` when the resolution is unchanged. The caller owns the buffer
/// between frames; this pass holds it only while rendering.
pub fn ensure_buffer(mut buffer: Vec<Rgba>, size: Size) -> Vec<Rgba> {
    if buffer.len() != size.pixel_count() {
        buffer = vec![colour::BACKGROUND; size.pixel_count()];
    }
    buffer
}

/// Render one frame into `buffer`, overwriting every cell.
///
/// Rows are distributed across the rayon pool; each pixel reads only the
/// frame-immutable parameters and writes its own cell, so no two units of
/// work communicate. Fractal parameters are clamped here, once, before any
/// pixel sees them.
pub fn render_frame(
    frame: &FrameParameters,
    fractal: &FractalParameters,
    config: MarchConfig,
    buffer: &mut [Rgba],
) {
    trace!("begin render_frame {}x{}", frame.size.width, frame.size.height);
    debug_assert_eq!(buffer.len(), frame.size.pixel_count());

    // A minimized window reports a 0x0 resolution; there is nothing to
    // render and a zero chunk size would panic below.
    if frame.size.pixel_count() == 0 {
        return;
    }

    let fractal = fractal.clamped();
    let width = frame.size.width as usize;

    buffer
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = render_pixel(x as u32, y as u32, frame, &fractal, config);
            }
        });

    trace!("end render_frame");
}

/// The whole per-pixel pipeline: generate, march, shade. Pure; identical
/// inputs produce an identical sample.
fn render_pixel(
    x: u32,
    y: u32,
    frame: &FrameParameters,
    fractal: &FractalParameters,
    config: MarchConfig,
) -> Rgba {
    let ray = ray::for_pixel(x, y, frame);
    let outcome = march(
        ray,
        |p| mandelbulb_distance(p, fractal.power),
        config,
        fractal.max_distance,
    );
    colour::shade(outcome, fractal, frame.light_direction, config)
}
