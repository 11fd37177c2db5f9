/// Flattening of the object hierarchy into one world-space mesh
use nalgebra::{Matrix4, Vector3};

use crate::error::StructureError;
use crate::geometry::{BakedScene, Mesh};
use crate::scene::{BlueprintKind, Scene, SceneObject};
use crate::transform::TransformResolver;

/// Bake every structural part of `scene`, in document order.
///
/// Symmetric parts without an explicit mirror object are followed by a
/// mirrored copy placed under the same parent.
pub fn bake(scene: &Scene) -> Result<BakedScene, StructureError> {
    let objects = scene.objects();
    let mut resolver = TransformResolver::new(objects);

    // Parents may be non-geometric, so resolve the whole hierarchy up front
    resolver.resolve_all()?;

    let mut baked = BakedScene::new();
    let mut parts = 0;
    let mut ghosts = 0;

    for (index, object) in objects.iter().enumerate() {
        let Some(mesh) = body_mesh(scene, object) else {
            continue;
        };

        let global = resolver.resolve_index(index)?;
        baked.append(mesh, &global);
        parts += 1;

        if object.needs_symmetry_ghost() {
            let parent = resolver.parent_global(index)?;
            baked.append(mesh, &mirrored_global(object, &parent));
            ghosts += 1;
        }
    }

    tracing::info!(
        "Baked {} parts ({} mirrored): {} vertices, {} faces",
        parts,
        ghosts,
        baked.vertices.len(),
        baked.faces.len()
    );

    Ok(baked)
}

/// World matrix of the mirrored copy: the mirrored local placement under the
/// unmirrored parent, applied to the mesh reflected in its own X axis.
///
/// For `Ry * Rx * Rz` rotations this equals the original placement reflected
/// across the parent's YZ plane.
pub fn mirrored_global(object: &SceneObject, parent: &Matrix4<f32>) -> Matrix4<f32> {
    let reflect = Matrix4::new_nonuniform_scaling(&Vector3::new(-1.0, 1.0, 1.0));
    parent * object.transform.mirrored().matrix() * reflect
}

/// The mesh an object contributes, or `None` if it is filtered out
fn body_mesh<'s>(scene: &'s Scene, object: &SceneObject) -> Option<&'s Mesh> {
    if object.cannon_blueprint.is_some() {
        tracing::debug!("Object {}: procedural cannon, skipped", object.vuid);
        return None;
    }

    let blueprint_id = object.structure_blueprint?;
    let Some(blueprint) = scene.blueprint(blueprint_id) else {
        tracing::debug!(
            "Object {}: blueprint {} not found, skipped",
            object.vuid,
            blueprint_id
        );
        return None;
    };

    match &blueprint.kind {
        BlueprintKind::Structural(_) => {}
        BlueprintKind::Other(tag) => {
            tracing::trace!("Object {}: baking unrecognized blueprint type {:?}", object.vuid, tag);
        }
        BlueprintKind::Decal | BlueprintKind::Crew | BlueprintKind::Internal => return None,
        BlueprintKind::TrackBelt | BlueprintKind::PaintJob => {
            tracing::debug!(
                "Object {}: {} blueprints are not baked",
                object.vuid,
                blueprint.kind.tag()
            );
            return None;
        }
    }

    let mesh = blueprint.body_mesh.and_then(|vuid| scene.mesh(vuid));
    match mesh {
        Some(mesh) if !mesh.is_empty() => Some(mesh),
        _ => {
            tracing::debug!("Object {}: no body mesh, skipped", object.vuid);
            None
        }
    }
}
