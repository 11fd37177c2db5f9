/// Uniform face subsampling to bound rasterization cost
use crate::geometry::Face;

/// Default upper bound on faces drawn per frame
pub const DEFAULT_TARGET_FACES: usize = 15_000;

/// Keep every `len / target`-th face, starting with the first.
///
/// Faces are dropped without regard to size or position, so dense regions thin
/// out at the same rate as sparse ones. The stride is rounded down, so the
/// result can hold somewhat more than `target` faces.
pub fn decimate(faces: &[Face], target: usize) -> Vec<Face> {
    let target = target.max(1);
    if faces.len() <= target {
        return faces.to_vec();
    }

    let stride = faces.len() / target;
    faces.iter().step_by(stride).cloned().collect()
}
