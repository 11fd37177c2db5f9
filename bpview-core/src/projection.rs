/// Orbiting camera and orthographic projection to canvas pixels
use std::f32::consts::TAU;

use nalgebra::{Point3, Rotation3, Vector3};

/// Fixed downward tilt of the preview camera
pub const CAMERA_TILT_DEGREES: f32 = 20.0;

/// Fraction of the canvas left empty around the fitted geometry
pub const PADDING: f32 = 0.2;

/// Camera circling the vertical axis at a fixed tilt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Tilt about the horizontal axis, in radians
    pub tilt: f32,
}

impl OrbitCamera {
    pub fn new(tilt_degrees: f32) -> Self {
        Self {
            tilt: tilt_degrees.to_radians(),
        }
    }

    /// Orbit angle of `step` out of `steps` evenly spaced positions
    pub fn orbit_angle(step: usize, steps: usize) -> f32 {
        if steps == 0 {
            return 0.0;
        }
        (step as f32 / steps as f32) * TAU
    }

    /// View rotation for an orbit angle: points are orbited first, then tilted.
    pub fn view_rotation(&self, angle: f32) -> Rotation3<f32> {
        let tilt = Rotation3::from_axis_angle(&Vector3::x_axis(), self.tilt);
        let orbit = Rotation3::from_axis_angle(&Vector3::y_axis(), angle);
        tilt * orbit
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(CAMERA_TILT_DEGREES)
    }
}

/// Maps centred, rotated geometry onto a square canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Point3<f32>,
    pub scale: f32,
    pub size: u32,
}

impl Viewport {
    /// Fit the bounding box `min..max` into a `size` x `size` canvas.
    ///
    /// The largest box dimension spans the canvas minus padding. Flat or
    /// point-like geometry uses an extent of 1.
    pub fn fit(min: &Point3<f32>, max: &Point3<f32>, size: u32) -> Self {
        let center = nalgebra::center(min, max);
        let mut extent = (max - min).max();
        if extent == 0.0 {
            extent = 1.0;
        }

        let size_f = size as f32;
        Self {
            center,
            scale: (size_f - PADDING * size_f) / extent,
            size,
        }
    }

    /// Project a world point to integer pixel coordinates.
    ///
    /// Orthographic: depth is discarded and Y grows downwards. Coordinates are
    /// truncated toward zero and may fall outside the canvas.
    pub fn project(&self, view: &Rotation3<f32>, point: &Point3<f32>) -> (i32, i32) {
        let rotated = view * (point - self.center);
        let half = self.size as f32 / 2.0;

        let x = rotated.x * self.scale + half;
        let y = half - rotated.y * self.scale;
        (x as i32, y as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_angle() {
        assert_eq!(OrbitCamera::orbit_angle(0, 4), 0.0);
        assert!((OrbitCamera::orbit_angle(1, 4) - TAU / 4.0).abs() < 1e-6);
        assert_eq!(OrbitCamera::orbit_angle(3, 0), 0.0);
    }

    #[test]
    fn test_view_rotation_orbits_then_tilts() {
        let camera = OrbitCamera::default();
        let view = camera.view_rotation(TAU / 4.0);

        // Quarter orbit carries +X to -Z; the tilt then lifts it along +Y
        let v = view * Vector3::new(1.0, 0.0, 0.0);
        let t = CAMERA_TILT_DEGREES.to_radians();
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - t.sin()).abs() < 1e-6);
        assert!((v.z + t.cos()).abs() < 1e-6);
    }

    #[test]
    fn test_fit_scale() {
        let viewport = Viewport::fit(&Point3::new(-1.0, 0.0, 0.0), &Point3::new(1.0, 0.5, 0.0), 100);
        assert_eq!(viewport.center, Point3::new(0.0, 0.25, 0.0));
        assert!((viewport.scale - 40.0).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_extent() {
        let p = Point3::new(3.0, 3.0, 3.0);
        let viewport = Viewport::fit(&p, &p, 100);
        assert!((viewport.scale - 80.0).abs() < 1e-5);
    }

    #[test]
    fn test_project_flips_y() {
        let viewport = Viewport::fit(&Point3::new(-1.0, -1.0, -1.0), &Point3::new(1.0, 1.0, 1.0), 100);
        let identity = Rotation3::identity();

        assert_eq!(viewport.project(&identity, &Point3::origin()), (50, 50));
        assert_eq!(viewport.project(&identity, &Point3::new(1.0, 1.0, 0.0)), (90, 10));
        // Depth does not move the point
        assert_eq!(viewport.project(&identity, &Point3::new(1.0, 1.0, 5.0)), (90, 10));
    }
}
