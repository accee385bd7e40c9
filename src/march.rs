//! Sphere tracing through a distance field.

use glam::Vec3;

/// A world-space ray. Created fresh per pixel per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

/// Step budget and hit threshold for the marching loop. Reasonable defaults,
/// not contractual values; the host may tune both.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarchConfig {
    pub max_steps: u32,
    pub epsilon: f32,
}

impl Default for MarchConfig {
    fn default() -> Self {
        Self {
            max_steps: 250,
            epsilon: 1e-4,
        }
    }
}

/// Terminal state of one marched ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarchOutcome {
    Hit {
        /// Distance travelled along the ray.
        distance: f32,
        point: Vec3,
        normal: Vec3,
        steps: u32,
    },
    /// Step budget exhausted without reaching a surface.
    Miss { steps: u32 },
    /// Travelled past the maximum distance.
    Escaped { distance: f32, steps: u32 },
}

impl MarchOutcome {
    pub fn is_hit(self) -> bool {
        matches!(self, MarchOutcome::Hit { .. })
    }
}

/// Sphere-trace `ray` through the field described by `distance`.
///
/// Each step advances by exactly the estimated distance to the nearest
/// surface, so the ray can never overshoot it. A non-finite estimate ends
/// the ray as a miss rather than poisoning the rest of the frame.
pub fn march(
    ray: Ray,
    distance: impl Fn(Vec3) -> f32,
    config: MarchConfig,
    max_distance: f32,
) -> MarchOutcome {
    let mut t = 0.0_f32;
    let mut steps = 0;

    while steps < config.max_steps {
        if t >= max_distance {
            return MarchOutcome::Escaped { distance: t, steps };
        }

        let point = ray.origin + t * ray.direction;
        let d = distance(point);

        if !d.is_finite() {
            return MarchOutcome::Miss { steps };
        }

        if d < config.epsilon {
            return MarchOutcome::Hit {
                distance: t,
                point,
                normal: estimate_normal(point, &distance, config.epsilon),
                steps,
            };
        }

        t += d;
        steps += 1;
    }

    MarchOutcome::Miss { steps }
}

/// Surface normal by central differences of the distance field.
fn estimate_normal(point: Vec3, distance: &impl Fn(Vec3) -> f32, epsilon: f32) -> Vec3 {
    let dx = Vec3::new(epsilon, 0.0, 0.0);
    let dy = Vec3::new(0.0, epsilon, 0.0);
    let dz = Vec3::new(0.0, 0.0, epsilon);

    let gradient = Vec3::new(
        distance(point + dx) - distance(point - dx),
        distance(point + dy) - distance(point - dy),
        distance(point + dz) - distance(point - dz),
    );

    gradient.normalize_or_zero()
}
