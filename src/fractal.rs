//! The Mandelbulb distance estimator.

use glam::Vec3;

/// Iterations of the spherical power map per distance query.
pub const DE_ITERATIONS: u32 = 15;

/// Orbit radius beyond which the iteration has provably escaped.
pub const ESCAPE_RADIUS: f32 = 2.0;

/// Estimate the distance from `p` to the Mandelbulb surface.
///
/// Runs the usual bulb iteration: keep a running point `z` and running
/// derivative `dr`, repeatedly raise `z` to `power` in spherical coordinates
/// and translate back by `p`, then bound the distance with
/// `0.5 * ln(r) * r / dr`. The estimate is a lower bound on the true
/// distance, which is what makes sphere tracing overshoot-free.
///
/// `power` must already be clamped to at least
/// [`MIN_POWER`](crate::params::MIN_POWER); at exactly 1 the derivative
/// update degenerates.
pub fn mandelbulb_distance(p: Vec3, power: f32) -> f32 {
    let mut z = p;
    let mut dr = 1.0_f32;
    let mut r = z.length();

    // The origin is interior to the bulb; the spherical conversion below
    // would divide by a zero radius.
    if r == 0.0 {
        return 0.0;
    }

    for _ in 0..DE_ITERATIONS {
        r = z.length();
        if r > ESCAPE_RADIUS {
            break;
        }

        let theta = (z.z / r).acos();
        let phi = z.y.atan2(z.x);
        dr = r.powf(power - 1.0) * power * dr + 1.0;

        let zr = r.powf(power);
        let theta = theta * power;
        let phi = phi * power;

        z = zr
            * Vec3::new(
                theta.sin() * phi.cos(),
                theta.sin() * phi.sin(),
                theta.cos(),
            );
        z += p;
    }

    0.5 * r.ln() * r / dr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_is_finite_across_points_and_powers() {
        // Grid over the escape-radius ball crossed with powers in [1.01, 20].
        let steps = 9;
        for pi in 0..=steps {
            let power = 1.01 + (20.0 - 1.01) * pi as f32 / steps as f32;
            for x in -4..=4 {
                for y in -4..=4 {
                    for z in -4..=4 {
                        let p = Vec3::new(x as f32, y as f32, z as f32) * 0.45;
                        if p.length() >= ESCAPE_RADIUS {
                            continue;
                        }
                        let d = mandelbulb_distance(p, power);
                        assert!(
                            d.is_finite(),
                            "non-finite estimate at {p:?} power {power}: {d}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn origin_is_an_immediate_interior_hit() {
        let d = mandelbulb_distance(Vec3::ZERO, 8.0);
        assert_eq!(d, 0.0);
    }

    #[test]
    fn points_far_outside_report_large_distance() {
        let d = mandelbulb_distance(Vec3::new(10.0, 0.0, 0.0), 8.0);
        assert!(d > 1.0, "expected a generous bound far away, got {d}");
    }

    #[test]
    fn points_near_the_surface_report_small_distance() {
        // The bulb at power 8 fills most of the unit ball; just outside its
        // bounding radius the estimate must be small but positive.
        let d = mandelbulb_distance(Vec3::new(1.3, 0.0, 0.0), 8.0);
        assert!(d > 0.0 && d < 0.5, "unexpected estimate {d}");
    }
}
