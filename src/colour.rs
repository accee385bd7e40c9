//! Shading of a marched ray.

use glam::Vec3;

use crate::march::{MarchConfig, MarchOutcome};
use crate::params::FractalParameters;
use crate::pixel::Rgba;

/// Floor under the Lambert term so faces pointing away from the light keep
/// some shape instead of going flat black.
const AMBIENT: f32 = 0.1;

/// Rec. 601 luma weights.
const LUMA: Vec3 = Vec3::new(0.299, 0.587, 0.114);

/// Background for rays that miss or escape.
pub const BACKGROUND: Rgba = Rgba::BLACK;

/// Turn one march outcome into its final colour sample.
pub fn shade(
    outcome: MarchOutcome,
    params: &FractalParameters,
    light_direction: Vec3,
    config: MarchConfig,
) -> Rgba {
    match outcome {
        MarchOutcome::Hit { normal, steps, .. } => {
            let lambert = normal.dot(-light_direction).max(0.0);
            let light = AMBIENT + (1.0 - AMBIENT) * lambert;

            // More steps means the ray skimmed the surface; use that as the
            // mix statistic and as a glow factor tempered by `darkness`.
            let skim = steps as f32 / config.max_steps as f32;
            let glow = steps as f32 / params.darkness;

            let surface = params.colour_a_mix.lerp(params.colour_b_mix, skim);
            let lit = surface * light * glow;

            let grey = Vec3::splat(lit.dot(LUMA));
            Rgba::from_vec3(lit.lerp(grey, params.black_and_white))
        }
        MarchOutcome::Miss { .. } | MarchOutcome::Escaped { .. } => BACKGROUND,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(normal: Vec3, steps: u32) -> MarchOutcome {
        MarchOutcome::Hit {
            distance: 1.0,
            point: Vec3::ZERO,
            normal,
            steps,
        }
    }

    #[test]
    fn miss_and_escape_use_the_background() {
        let params = FractalParameters::default();
        let config = MarchConfig::default();
        let miss = shade(MarchOutcome::Miss { steps: 250 }, &params, Vec3::NEG_Y, config);
        let escaped = shade(
            MarchOutcome::Escaped {
                distance: 200.0,
                steps: 40,
            },
            &params,
            Vec3::NEG_Y,
            config,
        );
        assert_eq!(miss, BACKGROUND);
        assert_eq!(escaped, BACKGROUND);
    }

    #[test]
    fn surface_facing_the_light_is_brighter() {
        let params = FractalParameters {
            darkness: 10.0,
            ..Default::default()
        };
        let config = MarchConfig::default();
        let light = Vec3::NEG_Y;

        let facing = shade(hit(Vec3::Y, 60), &params, light, config);
        let averted = shade(hit(Vec3::NEG_Y, 60), &params, light, config);
        let brightness = |c: Rgba| c.r as u32 + c.g as u32 + c.b as u32;
        assert!(brightness(facing) > brightness(averted));
    }

    #[test]
    fn full_black_and_white_is_grey() {
        let params = FractalParameters {
            black_and_white: 1.0,
            darkness: 10.0,
            ..Default::default()
        };
        let sample = shade(hit(Vec3::Y, 60), &params, Vec3::NEG_Y, MarchConfig::default());
        assert!(sample.r.abs_diff(sample.g) <= 1);
        assert!(sample.g.abs_diff(sample.b) <= 1);
    }
}
