/// Tunables for the preview pipeline
use crate::decimate::DEFAULT_TARGET_FACES;
use crate::raster::LINE_COLOR;

/// Default canvas edge length in pixels
pub const DEFAULT_SIZE: u32 = 600;

/// Default number of orbit steps
pub const DEFAULT_FRAME_COUNT: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewConfig {
    /// Frames are `size` x `size` pixels
    pub size: u32,
    /// Orbit steps per full turn, one frame each
    pub frame_count: usize,
    /// Face budget per frame before decimation kicks in
    pub target_faces: usize,
    pub line_color: [u8; 3],
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            frame_count: DEFAULT_FRAME_COUNT,
            target_faces: DEFAULT_TARGET_FACES,
            line_color: LINE_COLOR,
        }
    }
}
