use bytemuck::{Pod, Zeroable};

/// Output resolution in pixels.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}
