/// Geometry buffers shared by the baker, decimator and renderer
use nalgebra::{Matrix4, Point3};

/// A polygon given as an ordered list of vertex indices
pub type Face = Vec<usize>;

/// A mesh in its own local space
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vuid: i64,
    pub vertices: Vec<Point3<f32>>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new(vuid: i64, vertices: Vec<Point3<f32>>, faces: Vec<Face>) -> Self {
        Self {
            vuid,
            vertices,
            faces,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Flattened world-space geometry: one vertex array and faces indexing into it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BakedScene {
    pub vertices: Vec<Point3<f32>>,
    pub faces: Vec<Face>,
}

impl BakedScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Index the next appended vertex will receive
    pub fn vertex_offset(&self) -> usize {
        self.vertices.len()
    }

    /// Transform `mesh` by `matrix` and append it, rebasing its face indices
    /// onto the current end of the vertex buffer.
    pub fn append(&mut self, mesh: &Mesh, matrix: &Matrix4<f32>) {
        let offset = self.vertex_offset();

        self.vertices.reserve(mesh.vertices.len());
        self.vertices
            .extend(mesh.vertices.iter().map(|v| matrix.transform_point(v)));

        self.faces.extend(
            mesh.faces
                .iter()
                .map(|face| face.iter().map(|&idx| idx + offset).collect::<Face>()),
        );
    }
}

/// Axis-aligned bounds of a vertex set, `None` when empty
pub fn bounds(vertices: &[Point3<f32>]) -> Option<(Point3<f32>, Point3<f32>)> {
    let first = *vertices.first()?;
    Some(vertices.iter().fold((first, first), |(min, max), v| {
        (min.inf(v), max.sup(v))
    }))
}
