//! Per-frame inputs supplied by the host loop.

use glam::{Mat4, Vec3};

use crate::screen::Size;

/// Camera and light state for one frame. Immutable while the frame renders.
#[derive(Clone, Copy, Debug)]
pub struct FrameParameters {
    pub camera_to_world: Mat4,
    pub camera_inverse_projection: Mat4,
    /// Direction the light travels, unit length.
    pub light_direction: Vec3,
    pub size: Size,
}

/// Tunable fractal and shading parameters.
///
/// The marching loop assumes these have passed through [`clamped`], which
/// enforces the boundary invariants: `power >= 1.01` (the derivative update
/// in the distance estimator collapses at 1), `max_distance > 0`,
/// `darkness > 0` (it divides the glow term), mix colours and
/// `black_and_white` in [0, 1].
///
/// [`clamped`]: FractalParameters::clamped
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FractalParameters {
    /// Exponent of the bulb's spherical power map.
    pub power: f32,
    /// Divisor applied to the step-count glow term; higher is darker.
    pub darkness: f32,
    /// Ray travel distance beyond which a ray counts as escaped.
    pub max_distance: f32,
    pub colour_a_mix: Vec3,
    pub colour_b_mix: Vec3,
    /// Blend factor toward greyscale, 0 = full colour.
    pub black_and_white: f32,
}

pub const MIN_POWER: f32 = 1.01;

impl FractalParameters {
    /// Enforce the parameter invariants at the boundary, before marching.
    /// Out-of-range values clamp rather than error; a frame always renders.
    pub fn clamped(self) -> Self {
        Self {
            power: self.power.max(MIN_POWER),
            darkness: self.darkness.max(1e-3),
            max_distance: self.max_distance.max(1e-3),
            colour_a_mix: self.colour_a_mix.clamp(Vec3::ZERO, Vec3::ONE),
            colour_b_mix: self.colour_b_mix.clamp(Vec3::ZERO, Vec3::ONE),
            black_and_white: self.black_and_white.clamp(0.0, 1.0),
        }
    }
}

impl Default for FractalParameters {
    fn default() -> Self {
        Self {
            power: 10.0,
            darkness: 70.0,
            max_distance: 200.0,
            colour_a_mix: Vec3::new(0.0, 0.0, 1.0),
            colour_b_mix: Vec3::new(1.0, 0.0, 0.0),
            black_and_white: 0.0,
        }
    }
}
