//! Per-pixel ray generation.

use glam::{Vec3, Vec4, Vec4Swizzles};

use crate::march::Ray;
use crate::params::FrameParameters;

/// Build the world-space camera ray for pixel `(x, y)`.
///
/// The pixel centre maps to normalized device coordinates in [-1, 1]² with
/// +y up (row 0 is the top of the image), is unprojected through the inverse
/// projection to a view-space direction, rotated into world space, and
/// normalized. Callers must pass an in-range pixel; there is no runtime
/// check.
pub fn for_pixel(x: u32, y: u32, frame: &FrameParameters) -> Ray {
    let width = frame.size.width as f32;
    let height = frame.size.height as f32;

    let ndc_x = (x as f32 + 0.5) / width * 2.0 - 1.0;
    let ndc_y = 1.0 - (y as f32 + 0.5) / height * 2.0;

    let origin = frame.camera_to_world.w_axis.xyz();

    let view_direction = frame.camera_inverse_projection * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
    let world_direction = frame.camera_to_world * Vec4::new(view_direction.x, view_direction.y, view_direction.z, 0.0);

    Ray {
        origin,
        direction: world_direction.xyz().normalize(),
    }
}

#[cfg(test)]
mod tests {
    use glam::Mat4;

    use super::*;
    use crate::screen::Size;

    fn test_frame(fov_y: f32, size: Size) -> FrameParameters {
        let aspect = size.width as f32 / size.height as f32;
        let projection = Mat4::perspective_rh(fov_y, aspect, 0.1, 100.0);
        FrameParameters {
            camera_to_world: Mat4::IDENTITY,
            camera_inverse_projection: projection.inverse(),
            light_direction: Vec3::NEG_Y,
            size,
        }
    }

    #[test]
    fn origin_is_the_camera_position() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let mut frame = test_frame(
            1.0,
            Size {
                width: 64,
                height: 64,
            },
        );
        frame.camera_to_world = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y).inverse();

        let ray = for_pixel(10, 50, &frame);
        assert!((ray.origin - eye).length() < 1e-5);
    }

    #[test]
    fn directions_are_unit_length() {
        let frame = test_frame(
            1.2,
            Size {
                width: 33,
                height: 17,
            },
        );
        for &(x, y) in &[(0, 0), (32, 0), (0, 16), (32, 16), (16, 8)] {
            let ray = for_pixel(x, y, &frame);
            assert!((ray.direction.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn centre_pixel_looks_down_negative_z() {
        // Identity camera-to-world means view space is world space: a
        // right-handed projection looks along -z.
        let frame = test_frame(
            1.0,
            Size {
                width: 101,
                height: 101,
            },
        );
        let ray = for_pixel(50, 50, &frame);
        assert!(ray.direction.z < -0.999, "direction {:?}", ray.direction);
    }

    #[test]
    fn corner_spread_matches_the_field_of_view() {
        // The vertical angle between rays through the top and bottom edge
        // centres must reproduce the projection's vertical field of view.
        let fov_y = 1.0_f32;
        let size = Size {
            width: 200,
            height: 100,
        };
        let frame = test_frame(fov_y, size);

        let top = for_pixel(size.width / 2, 0, &frame);
        let bottom = for_pixel(size.width / 2, size.height - 1, &frame);

        let angle = top.direction.dot(bottom.direction).clamp(-1.0, 1.0).acos();
        // Rays pass through pixel centres, so the spread is one pixel
        // narrower than the full frustum.
        let expected = fov_y * (size.height - 1) as f32 / size.height as f32;
        assert!(
            (angle - expected).abs() < 2e-2,
            "angle {angle}, expected about {expected}"
        );
    }

    #[test]
    fn top_of_image_maps_to_positive_y() {
        let frame = test_frame(
            1.0,
            Size {
                width: 100,
                height: 100,
            },
        );
        let ray = for_pixel(50, 0, &frame);
        assert!(ray.direction.y > 0.0);
    }
}
