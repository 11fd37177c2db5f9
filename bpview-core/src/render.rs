/// Rotating wireframe renderer producing one frame per orbit step
use nalgebra::Point3;

use crate::config::PreviewConfig;
use crate::decimate::decimate;
use crate::geometry::{bounds, BakedScene, Face};
use crate::projection::{OrbitCamera, Viewport};
use crate::raster::{Canvas, Frame, LINE_COLOR};

/// Renders a baked scene from evenly spaced positions around its centre.
///
/// Bounds, scale and the face list are fixed at construction; every frame is
/// independent of the others and drawn onto its own canvas.
pub struct WireframeRenderer<'a> {
    vertices: &'a [Point3<f32>],
    faces: Vec<Face>,
    viewport: Option<Viewport>,
    camera: OrbitCamera,
    frame_count: usize,
    color: [u8; 3],
}

impl<'a> WireframeRenderer<'a> {
    /// Renderer over `faces` exactly as given.
    pub fn new(vertices: &'a [Point3<f32>], faces: Vec<Face>, size: u32, frame_count: usize) -> Self {
        let viewport = bounds(vertices).map(|(min, max)| Viewport::fit(&min, &max, size));

        Self {
            vertices,
            faces,
            viewport,
            camera: OrbitCamera::default(),
            frame_count,
            color: LINE_COLOR,
        }
    }

    /// Renderer over a baked scene, decimated to the configured face budget.
    pub fn from_baked(baked: &'a BakedScene, config: &PreviewConfig) -> Self {
        let faces = decimate(&baked.faces, config.target_faces);
        if faces.len() < baked.faces.len() {
            tracing::debug!(
                "Decimated {} faces to {}",
                baked.faces.len(),
                faces.len()
            );
        }

        Self::new(&baked.vertices, faces, config.size, config.frame_count).with_color(config.line_color)
    }

    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_camera(mut self, camera: OrbitCamera) -> Self {
        self.camera = camera;
        self
    }

    /// Number of frames this renderer produces; zero without geometry
    pub fn len(&self) -> usize {
        match self.viewport {
            Some(_) => self.frame_count,
            None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Faces drawn in each frame
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Render orbit step `step`, or `None` if it is out of range.
    pub fn render_frame(&self, step: usize) -> Option<Frame> {
        let viewport = self.viewport?;
        if step >= self.frame_count {
            return None;
        }

        let angle = OrbitCamera::orbit_angle(step, self.frame_count);
        let view = self.camera.view_rotation(angle);
        let projected: Vec<(i32, i32)> = self
            .vertices
            .iter()
            .map(|v| viewport.project(&view, v))
            .collect();

        let mut canvas = Canvas::new(viewport.size, self.color);
        let mut points = Vec::new();
        for face in &self.faces {
            points.clear();
            points.extend(face.iter().filter_map(|&i| projected.get(i).copied()));
            canvas.draw_closed_polyline(&points);
        }

        tracing::trace!("Rendered frame {}/{}", step + 1, self.frame_count);
        Some(canvas.into_frame())
    }

    /// Lazily render frames in orbit order
    pub fn frames(&self) -> Frames<'_, 'a> {
        Frames {
            renderer: self,
            next: 0,
            end: self.len(),
        }
    }

    /// Render every frame up front
    pub fn render_all(&self) -> Vec<Frame> {
        self.frames().collect()
    }
}

/// Iterator yielding one rendered frame per orbit step
pub struct Frames<'r, 'a> {
    renderer: &'r WireframeRenderer<'a>,
    next: usize,
    end: usize,
}

impl Iterator for Frames<'_, '_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.next >= self.end {
            return None;
        }
        let frame = self.renderer.render_frame(self.next);
        self.next += 1;
        frame
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames<'_, '_> {}

/// Render `frame_count` frames of a `size` x `size` wireframe of `faces`.
pub fn render(vertices: &[Point3<f32>], faces: &[Face], size: u32, frame_count: usize) -> Vec<Frame> {
    WireframeRenderer::new(vertices, faces.to_vec(), size, frame_count).render_all()
}
