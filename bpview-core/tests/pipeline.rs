use bpview_core::{
    bake, bake_document, preview, preview_file, LoadError, Preview, PreviewConfig, PreviewError,
    Scene, StructureError, TransformResolver,
};
use nalgebra::Point3;
use serde_json::{json, Value};

fn triangle_mesh() -> Value {
    json!({
        "vuid": 100,
        "meshData": { "mesh": {
            "vertices": [0, 0, 0, 1, 0, 0, 0, 1, 0],
            "faces": [{ "v": [0, 1, 2] }]
        }}
    })
}

fn hull_document(flags: i64) -> String {
    json!({
        "objects": [{
            "vuid": 1,
            "pvuid": -1,
            "flags": flags,
            "structureBlueprintVuid": 10,
            "transform": { "pos": [0, 0, 0], "rot": [0, 0, 0], "scale": [1, 1, 1] }
        }],
        "blueprints": [{ "id": 10, "type": "hull", "blueprint": { "bodyMeshVuid": 100 } }],
        "meshes": [triangle_mesh()]
    })
    .to_string()
}

fn config(size: u32, frame_count: usize) -> PreviewConfig {
    PreviewConfig {
        size,
        frame_count,
        ..PreviewConfig::default()
    }
}

#[test]
fn single_hull_bakes_unchanged_and_renders() {
    let baked = bake_document(&hull_document(0)).unwrap();
    assert_eq!(
        baked.vertices,
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    );
    assert_eq!(baked.faces, vec![vec![0, 1, 2]]);

    let frames = preview(&hull_document(0), &config(100, 4)).unwrap().into_frames();
    assert_eq!(frames.len(), 4);
    for frame in frames {
        assert_eq!(frame.dimensions(), (100, 100));
        assert_eq!(frame.into_raw().len(), 100 * 100 * 3);
    }
}

#[test]
fn symmetry_flag_adds_mirrored_copy() {
    let plain = bake_document(&hull_document(0)).unwrap();
    let baked = bake_document(&hull_document(4)).unwrap();

    assert_eq!(baked.vertices.len(), 2 * plain.vertices.len());
    assert_eq!(baked.faces.len(), 2 * plain.faces.len());
    assert_eq!(baked.faces, vec![vec![0, 1, 2], vec![3, 4, 5]]);
    assert_eq!(
        &baked.vertices[3..],
        &[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    );
}

#[test]
fn scene_without_structures_is_empty() {
    let document = json!({
        "objects": [{ "vuid": 1 }, { "vuid": 2, "pvuid": 1 }],
        "blueprints": [],
        "meshes": [triangle_mesh()]
    })
    .to_string();

    let baked = bake_document(&document).unwrap();
    assert!(baked.vertices.is_empty());
    assert!(baked.faces.is_empty());

    let result = preview(&document, &config(100, 4)).unwrap();
    assert_eq!(result, Preview::Empty);
    assert!(result.frames().is_empty());
}

#[test]
fn zero_frames_of_real_geometry_is_not_empty() {
    let result = preview(&hull_document(0), &config(100, 0)).unwrap();
    assert_eq!(result, Preview::Rendered(Vec::new()));
    assert!(!result.is_empty());
    assert!(result.frames().is_empty());

    let document = json!({ "objects": [], "blueprints": [], "meshes": [] }).to_string();
    assert_eq!(preview(&document, &config(100, 0)).unwrap(), Preview::Empty);
}

#[test]
fn zero_size_still_yields_every_frame() {
    let frames = preview(&hull_document(0), &config(0, 3)).unwrap().into_frames();
    assert_eq!(frames.len(), 3);
    for frame in frames {
        assert_eq!(frame.dimensions(), (0, 0));
    }
}

#[test]
fn chain_composes_parent_and_child() {
    let document = json!({
        "objects": [
            { "vuid": 2, "pvuid": 1, "transform": { "pos": [1, 0, 0], "rot": [0, 0, 90] } },
            { "vuid": 1, "transform": { "pos": [0, 3, 0], "rot": [0, 45, 0], "scale": [2, 2, 2] } }
        ]
    })
    .to_string();
    let scene = Scene::from_json(&document).unwrap();
    let mut resolver = TransformResolver::new(scene.objects());

    let a = scene.index_of(1).unwrap();
    let b = scene.index_of(2).unwrap();
    let global_b = resolver.resolve_index(b).unwrap();
    let global_a = resolver.resolve_index(a).unwrap();

    assert_eq!(global_a, scene.objects()[a].transform.matrix());
    let expected = global_a * scene.objects()[b].transform.matrix();
    assert!((global_b - expected).norm() < 1e-5);
}

#[test]
fn cyclic_parents_fail_explicitly() {
    let document = json!({
        "objects": [
            { "vuid": 1, "pvuid": 3 },
            { "vuid": 2, "pvuid": 1 },
            { "vuid": 3, "pvuid": 2 }
        ]
    })
    .to_string();

    match preview(&document, &PreviewConfig::default()) {
        Err(PreviewError::Structure(StructureError::CyclicParentage { chain, .. })) => {
            assert_eq!(chain.len(), 4);
            assert_eq!(chain.first(), chain.last());
        }
        other => panic!("expected a cycle error, got {:?}", other.map(|p| p.frames().len())),
    }
}

#[test]
fn load_errors_are_distinguishable() {
    let result = preview("not json", &PreviewConfig::default());
    assert!(matches!(result, Err(PreviewError::Load(LoadError::Parse(_)))));

    let result = preview_file("/nonexistent/vehicle.blueprint", &PreviewConfig::default());
    assert!(matches!(result, Err(PreviewError::Load(LoadError::Io(_)))));
}

#[test]
fn large_meshes_are_decimated_before_drawing() {
    let faces: Vec<Value> = (0..40).map(|_| json!({ "v": [0, 1, 2] })).collect();
    let document = json!({
        "objects": [{ "vuid": 1, "structureBlueprintVuid": 10 }],
        "blueprints": [{ "id": 10, "type": "structure", "blueprint": { "bodyMeshVuid": 100 } }],
        "meshes": [{
            "vuid": 100,
            "meshData": { "mesh": { "vertices": [0, 0, 0, 1, 0, 0, 0, 1, 0], "faces": faces } }
        }]
    })
    .to_string();

    let scene = Scene::from_json(&document).unwrap();
    let baked = bake(&scene).unwrap();
    assert_eq!(baked.faces.len(), 40);

    let config = PreviewConfig {
        target_faces: 10,
        ..config(32, 3)
    };
    let renderer = bpview_core::WireframeRenderer::from_baked(&baked, &config);
    assert_eq!(renderer.faces().len(), 10);
    assert_eq!(renderer.frames().count(), 3);
}
