/// Local transforms and hierarchical world-matrix resolution
use nalgebra::{Matrix4, Vector3};

use crate::error::StructureError;
use crate::scene::SceneObject;

/// A parent-relative placement. Rotation is Euler angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl LocalTransform {
    pub fn new(position: Vector3<f32>, rotation: Vector3<f32>, scale: Vector3<f32>) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::repeat(1.0),
        }
    }

    /// `T * R * S`: scale is applied to a point first, translation last
    pub fn matrix(&self) -> Matrix4<f32> {
        Transform::translation_matrix(&self.position)
            * Transform::rotation_matrix(&self.rotation)
            * Transform::scale_matrix(&self.scale)
    }

    /// The placement reflected across the YZ plane: X position and the
    /// Y/Z rotations flip sign, X rotation and scale are kept.
    pub fn mirrored(&self) -> Self {
        Self {
            position: Vector3::new(-self.position.x, self.position.y, self.position.z),
            rotation: Vector3::new(self.rotation.x, -self.rotation.y, -self.rotation.z),
            scale: self.scale,
        }
    }
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Rotation from Euler angles in degrees, composed as `Ry * Rx * Rz`
    /// (roll first, then pitch, then yaw).
    pub fn rotation_matrix(degrees: &Vector3<f32>) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(degrees.x.to_radians(), 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, degrees.y.to_radians(), 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, degrees.z.to_radians()));

        ry * rx * rz
    }

    pub fn translation_matrix(position: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new_translation(position)
    }

    pub fn scale_matrix(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(scale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

/// Memoized world matrices for an arena of scene objects.
///
/// Each object's global matrix is computed at most once. Resolution walks the
/// ancestor chain with an explicit stack, so deep hierarchies cannot overflow
/// the call stack and cycles are reported as [`StructureError`].
pub struct TransformResolver<'a> {
    objects: &'a [SceneObject],
    states: Vec<VisitState>,
    globals: Vec<Matrix4<f32>>,
}

impl<'a> TransformResolver<'a> {
    pub fn new(objects: &'a [SceneObject]) -> Self {
        Self {
            objects,
            states: vec![VisitState::Unvisited; objects.len()],
            globals: vec![Matrix4::identity(); objects.len()],
        }
    }

    /// World matrix of the object at arena position `index`
    pub fn resolve_index(&mut self, index: usize) -> Result<Matrix4<f32>, StructureError> {
        let objects = self.objects;
        let mut stack = vec![index];

        while let Some(&top) = stack.last() {
            match self.states[top] {
                VisitState::Done => {
                    stack.pop();
                    continue;
                }
                VisitState::Unvisited => self.states[top] = VisitState::InProgress,
                VisitState::InProgress => {}
            }

            let object = &objects[top];
            match object.parent {
                Some(parent) if self.states[parent] == VisitState::InProgress => {
                    return Err(self.abandon(&stack, parent));
                }
                Some(parent) if self.states[parent] == VisitState::Unvisited => {
                    stack.push(parent);
                }
                parent => {
                    let local = object.transform.matrix();
                    self.globals[top] = match parent {
                        Some(parent) => self.globals[parent] * local,
                        None => local,
                    };
                    self.states[top] = VisitState::Done;
                    stack.pop();
                }
            }
        }

        Ok(self.globals[index])
    }

    /// Resolve every object in arena order
    pub fn resolve_all(&mut self) -> Result<(), StructureError> {
        for index in 0..self.objects.len() {
            self.resolve_index(index)?;
        }
        Ok(())
    }

    /// Already-resolved world matrix, `None` if not computed yet
    pub fn cached(&self, index: usize) -> Option<&Matrix4<f32>> {
        match self.states.get(index)? {
            VisitState::Done => self.globals.get(index),
            _ => None,
        }
    }

    /// World matrix of the object's parent, identity for roots
    pub fn parent_global(&mut self, index: usize) -> Result<Matrix4<f32>, StructureError> {
        match self.objects[index].parent {
            Some(parent) => self.resolve_index(parent),
            None => Ok(Matrix4::identity()),
        }
    }

    /// Reset the in-flight walk and describe the cycle closing at `parent`.
    fn abandon(&mut self, stack: &[usize], parent: usize) -> StructureError {
        for &index in stack {
            if self.states[index] == VisitState::InProgress {
                self.states[index] = VisitState::Unvisited;
            }
        }

        let start = stack.iter().position(|&i| i == parent).unwrap_or(0);
        let mut chain: Vec<i64> = stack[start..].iter().map(|&i| self.objects[i].vuid).collect();
        chain.push(self.objects[parent].vuid);

        StructureError::CyclicParentage {
            vuid: self.objects[parent].vuid,
            chain,
        }
    }
}
