//! Frame-to-frame evolution of the fractal power.
//!
//! The host owns an [`AnimationState`] and folds [`advance`] over it once
//! per frame; nothing here mutates shared state.

use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationConfig {
    /// Linear power growth per second. Zero switches to oscillation.
    pub power_increase_rate: f32,
    /// Oscillation phase speed, radians per second.
    pub oscillation_rate: f32,
    /// Half the peak-to-peak swing of the oscillating power.
    pub oscillation_range: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            power_increase_rate: 0.2,
            oscillation_rate: 0.2,
            oscillation_range: 5.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    /// Oscillation phase, kept in [0, 2π).
    pub phase: f32,
    pub power: f32,
}

impl AnimationState {
    pub fn new(power: f32) -> Self {
        Self { phase: 0.0, power }
    }
}

/// Advance the animation by `dt` seconds.
///
/// With a non-zero `power_increase_rate` the power grows without bound (the
/// parameter boundary still clamps it from below). Otherwise the power
/// swings through [1, 1 + 2 · range], starting from the bottom of the swing.
pub fn advance(state: AnimationState, dt: f32, config: &AnimationConfig) -> AnimationState {
    if config.power_increase_rate != 0.0 {
        AnimationState {
            power: state.power + config.power_increase_rate * dt,
            ..state
        }
    } else {
        let phase = (state.phase + dt * config.oscillation_rate) % (2.0 * PI);
        AnimationState {
            phase,
            power: 1.0 + config.oscillation_range * (1.0 + (phase + PI).cos()),
        }
    }
}
