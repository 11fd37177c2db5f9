/// Built-in sample blueprint used when no file is given
use bpview_core::scene::{
    RawBlueprint, RawBlueprintBody, RawFace, RawMesh, RawMeshBody, RawMeshData, RawObject,
    RawTransform, SceneDocument, NO_REF, SYMMETRY_FLAG,
};

const HULL_MESH: i64 = 100;
const TURRET_MESH: i64 = 101;
const BARREL_MESH: i64 = 102;
const SKIRT_MESH: i64 = 103;

fn box_mesh(vuid: i64, sx: f32, sy: f32, sz: f32) -> RawMesh {
    let (hx, hy, hz) = (sx / 2.0, sy / 2.0, sz / 2.0);
    let mut vertices = Vec::with_capacity(24);
    for &(x, y, z) in &[
        (-hx, -hy, -hz),
        (hx, -hy, -hz),
        (hx, hy, -hz),
        (-hx, hy, -hz),
        (-hx, -hy, hz),
        (hx, -hy, hz),
        (hx, hy, hz),
        (-hx, hy, hz),
    ] {
        vertices.extend_from_slice(&[x, y, z]);
    }

    let quads: [[i64; 4]; 6] = [
        [0, 1, 2, 3],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [3, 2, 6, 7],
        [0, 3, 7, 4],
        [1, 2, 6, 5],
    ];

    RawMesh {
        vuid,
        mesh_data: RawMeshData {
            mesh: RawMeshBody {
                vertices,
                faces: quads.iter().map(|q| RawFace::Indexed { v: q.to_vec() }).collect(),
            },
        },
    }
}

fn part(vuid: i64, pvuid: i64, blueprint: i64, flags: i64, pos: [f32; 3], rot: [f32; 3]) -> RawObject {
    RawObject {
        vuid,
        pvuid,
        flags,
        transform: RawTransform {
            pos: pos.to_vec(),
            rot: rot.to_vec(),
            ..RawTransform::default()
        },
        structure_blueprint_vuid: blueprint,
        cannon_blueprint_vuid: None,
    }
}

fn structure(id: i64, mesh: i64) -> RawBlueprint {
    RawBlueprint {
        id,
        kind: "structure".to_string(),
        blueprint: RawBlueprintBody {
            body_mesh_vuid: mesh,
        },
    }
}

/// A hull with a turret and barrel, plus one side skirt mirrored implicitly
pub fn demo_scene() -> SceneDocument {
    SceneDocument {
        objects: vec![
            part(1, NO_REF, 10, 0, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
            part(2, 1, 11, 0, [0.0, 0.9, -0.3], [0.0, 30.0, 0.0]),
            part(3, 2, 12, 0, [0.0, 0.1, 1.6], [-5.0, 0.0, 0.0]),
            part(4, 1, 13, SYMMETRY_FLAG, [1.3, -0.2, 0.0], [0.0, 0.0, 10.0]),
        ],
        blueprints: vec![
            structure(10, HULL_MESH),
            structure(11, TURRET_MESH),
            structure(12, BARREL_MESH),
            structure(13, SKIRT_MESH),
        ],
        meshes: vec![
            box_mesh(HULL_MESH, 2.4, 1.0, 5.0),
            box_mesh(TURRET_MESH, 1.6, 0.7, 1.8),
            box_mesh(BARREL_MESH, 0.15, 0.15, 2.2),
            box_mesh(SKIRT_MESH, 0.1, 0.6, 4.6),
        ],
    }
}
