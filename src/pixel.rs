use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// One output sample, laid out to match an `Rgba8Unorm` texture texel.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    /// Quantize a linear colour, clamping components to [0, 1] first so an
    /// over-bright shading term can't wrap around.
    pub fn from_vec3(colour: Vec3) -> Self {
        let clamped = colour.clamp(Vec3::ZERO, Vec3::ONE);
        Rgba {
            r: (clamped.x * 255.0).round() as u8,
            g: (clamped.y * 255.0).round() as u8,
            b: (clamped.z * 255.0).round() as u8,
            a: 255,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantization_clamps_out_of_range_components() {
        let over = Rgba::from_vec3(Vec3::new(2.0, -1.0, 0.5));
        assert_eq!(
            over,
            Rgba {
                r: 255,
                g: 0,
                b: 128,
                a: 255
            }
        );
    }
}
