/// Blueprint scene documents: raw JSON records and the normalized arena
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Deserializer};

use crate::error::LoadError;
use crate::geometry::{Face, Mesh};
use crate::transform::LocalTransform;

/// Sentinel used by the document format for "no reference"
pub const NO_REF: i64 = -1;

/// Flag bit marking a part as symmetric across the vehicle's centre line
pub const SYMMETRY_FLAG: i64 = 4;

fn no_ref() -> i64 {
    NO_REF
}

fn reference(id: i64) -> Option<i64> {
    (id != NO_REF).then_some(id)
}

/// Any value under the key counts as a reference, even `null`.
fn present_reference<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(Some(value.as_i64().unwrap_or(NO_REF)))
}

/// The document exactly as stored on disk
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SceneDocument {
    pub objects: Vec<RawObject>,
    pub blueprints: Vec<RawBlueprint>,
    pub meshes: Vec<RawMesh>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawObject {
    pub vuid: i64,
    #[serde(default = "no_ref")]
    pub pvuid: i64,
    #[serde(default)]
    pub flags: i64,
    #[serde(default)]
    pub transform: RawTransform,
    #[serde(default = "no_ref")]
    pub structure_blueprint_vuid: i64,
    #[serde(default, deserialize_with = "present_reference")]
    pub cannon_blueprint_vuid: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawTransform {
    pub pos: Vec<f32>,
    pub rot: Vec<f32>,
    pub scale: Vec<f32>,
    pub mirror_vuid: i64,
}

impl Default for RawTransform {
    fn default() -> Self {
        Self {
            pos: vec![0.0; 3],
            rot: vec![0.0; 3],
            scale: vec![1.0; 3],
            mirror_vuid: NO_REF,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBlueprint {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub blueprint: RawBlueprintBody,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawBlueprintBody {
    pub body_mesh_vuid: i64,
}

impl Default for RawBlueprintBody {
    fn default() -> Self {
        Self {
            body_mesh_vuid: NO_REF,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMesh {
    pub vuid: i64,
    #[serde(default)]
    pub mesh_data: RawMeshData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMeshData {
    pub mesh: RawMeshBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMeshBody {
    pub vertices: Vec<f32>,
    pub faces: Vec<RawFace>,
}

/// Faces appear either as `{ "v": [...] }` or as a bare index list
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawFace {
    Indexed { v: Vec<i64> },
    Bare(Vec<i64>),
}

impl RawFace {
    fn indices(&self) -> &[i64] {
        match self {
            RawFace::Indexed { v } => v,
            RawFace::Bare(v) => v,
        }
    }
}

/// Closed vocabulary of blueprint type tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlueprintKind {
    /// Hulls, turrets and other structures that carry a body mesh
    Structural(String),
    Decal,
    Crew,
    Internal,
    TrackBelt,
    PaintJob,
    /// A tag outside the known vocabulary
    Other(String),
}

impl BlueprintKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "structure" | "hull" | "turret" => BlueprintKind::Structural(tag.to_string()),
            "decal" => BlueprintKind::Decal,
            "crew" => BlueprintKind::Crew,
            "internal" => BlueprintKind::Internal,
            "trackBelt" => BlueprintKind::TrackBelt,
            "paintJob" => BlueprintKind::PaintJob,
            other => BlueprintKind::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            BlueprintKind::Structural(tag) | BlueprintKind::Other(tag) => tag,
            BlueprintKind::Decal => "decal",
            BlueprintKind::Crew => "crew",
            BlueprintKind::Internal => "internal",
            BlueprintKind::TrackBelt => "trackBelt",
            BlueprintKind::PaintJob => "paintJob",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
    pub id: i64,
    pub kind: BlueprintKind,
    pub body_mesh: Option<i64>,
}

/// A fully defaulted scene object. `parent` is an arena index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneObject {
    pub vuid: i64,
    pub pvuid: Option<i64>,
    pub parent: Option<usize>,
    pub transform: LocalTransform,
    pub flags: i64,
    pub structure_blueprint: Option<i64>,
    pub cannon_blueprint: Option<i64>,
    pub mirror: Option<i64>,
}

impl SceneObject {
    /// Symmetric parts without an explicit mirror object get a mirrored copy
    pub fn needs_symmetry_ghost(&self) -> bool {
        self.flags & SYMMETRY_FLAG != 0 && self.mirror.is_none()
    }
}

/// Normalized scene: objects in document order plus lookup tables
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    index: HashMap<i64, usize>,
    blueprints: HashMap<i64, Blueprint>,
    meshes: HashMap<i64, Mesh>,
}

impl Scene {
    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        let document: SceneDocument = serde_json::from_str(text)?;
        Self::from_document(document)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_document(document: SceneDocument) -> Result<Self, LoadError> {
        let mut objects: Vec<SceneObject> = Vec::with_capacity(document.objects.len());
        let mut index = HashMap::with_capacity(document.objects.len());

        for raw in document.objects {
            let object = normalize_object(raw);
            match index.get(&object.vuid) {
                Some(&slot) => {
                    tracing::debug!("Object {} redefined, keeping the later record", object.vuid);
                    objects[slot] = object;
                }
                None => {
                    index.insert(object.vuid, objects.len());
                    objects.push(object);
                }
            }
        }

        for object in &mut objects {
            object.parent = object.pvuid.and_then(|pvuid| {
                let parent = index.get(&pvuid).copied();
                if parent.is_none() {
                    tracing::debug!(
                        "Object {} references unknown parent {}, treating it as a root",
                        object.vuid,
                        pvuid
                    );
                }
                parent
            });
        }

        let blueprints = document
            .blueprints
            .into_iter()
            .map(|raw| {
                let blueprint = Blueprint {
                    id: raw.id,
                    kind: BlueprintKind::from_tag(&raw.kind),
                    body_mesh: reference(raw.blueprint.body_mesh_vuid),
                };
                (blueprint.id, blueprint)
            })
            .collect();

        let meshes = document
            .meshes
            .into_iter()
            .map(|raw| normalize_mesh(raw).map(|mesh| (mesh.vuid, mesh)))
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(Self {
            objects,
            index,
            blueprints,
            meshes,
        })
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, vuid: i64) -> Option<&SceneObject> {
        self.index_of(vuid).map(|i| &self.objects[i])
    }

    pub fn index_of(&self, vuid: i64) -> Option<usize> {
        self.index.get(&vuid).copied()
    }

    pub fn blueprint(&self, id: i64) -> Option<&Blueprint> {
        self.blueprints.get(&id)
    }

    pub fn mesh(&self, vuid: i64) -> Option<&Mesh> {
        self.meshes.get(&vuid)
    }
}

fn padded(values: &[f32], fill: f32) -> Vector3<f32> {
    let at = |i: usize| values.get(i).copied().unwrap_or(fill);
    Vector3::new(at(0), at(1), at(2))
}

fn normalize_object(raw: RawObject) -> SceneObject {
    let transform = LocalTransform::new(
        padded(&raw.transform.pos, 0.0),
        padded(&raw.transform.rot, 0.0),
        padded(&raw.transform.scale, 1.0),
    );

    SceneObject {
        vuid: raw.vuid,
        pvuid: reference(raw.pvuid),
        parent: None,
        transform,
        flags: raw.flags,
        structure_blueprint: reference(raw.structure_blueprint_vuid),
        cannon_blueprint: raw.cannon_blueprint_vuid,
        mirror: reference(raw.transform.mirror_vuid),
    }
}

fn normalize_mesh(raw: RawMesh) -> Result<Mesh, LoadError> {
    let body = raw.mesh_data.mesh;
    if body.vertices.len() % 3 != 0 {
        return Err(LoadError::InvalidMesh {
            vuid: raw.vuid,
            len: body.vertices.len(),
        });
    }

    let vertices: Vec<Point3<f32>> = body
        .vertices
        .chunks_exact(3)
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect();

    let count = vertices.len();
    let mut dropped = 0;
    let faces: Vec<Face> = body
        .faces
        .iter()
        .filter_map(|face| {
            let indices = face.indices();
            let valid = !indices.is_empty()
                && indices.iter().all(|&i| i >= 0 && (i as usize) < count);
            if !valid {
                dropped += 1;
                return None;
            }
            Some(indices.iter().map(|&i| i as usize).collect())
        })
        .collect();

    if dropped > 0 {
        tracing::warn!(
            "Mesh {}: dropped {} faces with missing vertex references",
            raw.vuid,
            dropped
        );
    }

    Ok(Mesh::new(raw.vuid, vertices, faces))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_defaults_and_padding() {
        let scene = Scene::from_json(
            r#"{
                "objects": [
                    { "vuid": 1 },
                    { "vuid": 2, "transform": { "pos": [5], "rot": [10, 20], "scale": [2] } }
                ]
            }"#,
        )
        .unwrap();

        let first = scene.object(1).unwrap();
        assert_eq!(first.transform, LocalTransform::identity());
        assert_eq!(first.pvuid, None);
        assert_eq!(first.mirror, None);

        let second = scene.object(2).unwrap();
        assert_eq!(second.transform.position, Vector3::new(5.0, 0.0, 0.0));
        assert_eq!(second.transform.rotation, Vector3::new(10.0, 20.0, 0.0));
        assert_eq!(second.transform.scale, Vector3::new(2.0, 1.0, 1.0));
    }

    #[test]
    fn test_parent_resolution() {
        let scene = Scene::from_json(
            r#"{
                "objects": [
                    { "vuid": 5, "pvuid": 9 },
                    { "vuid": 9 },
                    { "vuid": 3, "pvuid": 404 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(scene.object(5).unwrap().parent, Some(1));
        assert_eq!(scene.object(9).unwrap().parent, None);
        // Unknown parents fall back to roots
        assert_eq!(scene.object(3).unwrap().pvuid, Some(404));
        assert_eq!(scene.object(3).unwrap().parent, None);
    }

    #[test]
    fn test_cannon_key_presence() {
        let scene = Scene::from_json(
            r#"{
                "objects": [
                    { "vuid": 1, "cannonBlueprintVuid": 12 },
                    { "vuid": 2, "cannonBlueprintVuid": null },
                    { "vuid": 3 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(scene.object(1).unwrap().cannon_blueprint, Some(12));
        assert!(scene.object(2).unwrap().cannon_blueprint.is_some());
        assert_eq!(scene.object(3).unwrap().cannon_blueprint, None);
    }

    #[test]
    fn test_symmetry_ghost_flag() {
        let scene = Scene::from_json(
            r#"{
                "objects": [
                    { "vuid": 1, "flags": 4 },
                    { "vuid": 2, "flags": 5, "transform": { "mirrorVuid": 1 } },
                    { "vuid": 3, "flags": 3 }
                ]
            }"#,
        )
        .unwrap();

        assert!(scene.object(1).unwrap().needs_symmetry_ghost());
        assert!(!scene.object(2).unwrap().needs_symmetry_ghost());
        assert!(!scene.object(3).unwrap().needs_symmetry_ghost());
    }

    #[test]
    fn test_duplicate_objects_keep_first_position() {
        let scene = Scene::from_json(
            r#"{
                "objects": [
                    { "vuid": 1, "flags": 0 },
                    { "vuid": 2 },
                    { "vuid": 1, "flags": 4 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(scene.objects().len(), 2);
        assert_eq!(scene.objects()[0].vuid, 1);
        assert_eq!(scene.objects()[0].flags, 4);
    }

    #[test]
    fn test_blueprint_kinds() {
        assert_eq!(
            BlueprintKind::from_tag("hull"),
            BlueprintKind::Structural("hull".to_string())
        );
        assert_eq!(BlueprintKind::from_tag("decal"), BlueprintKind::Decal);
        assert_eq!(BlueprintKind::from_tag("trackBelt"), BlueprintKind::TrackBelt);
        assert_eq!(
            BlueprintKind::from_tag("engine"),
            BlueprintKind::Other("engine".to_string())
        );
        assert_eq!(BlueprintKind::from_tag("paintJob").tag(), "paintJob");
    }

    #[test]
    fn test_mesh_faces_both_forms() {
        let scene = Scene::from_json(
            r#"{
                "meshes": [{
                    "vuid": 100,
                    "meshData": { "mesh": {
                        "vertices": [0, 0, 0, 1, 0, 0, 0, 1, 0],
                        "faces": [{ "v": [0, 1, 2] }, [2, 1, 0], [0, 7], []]
                    }}
                }]
            }"#,
        )
        .unwrap();

        let mesh = scene.mesh(100).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.faces, vec![vec![0, 1, 2], vec![2, 1, 0]]);
    }

    #[test]
    fn test_partial_vertex_triple_is_rejected() {
        let result = Scene::from_json(
            r#"{ "meshes": [{ "vuid": 7, "meshData": { "mesh": { "vertices": [0, 1] } } }] }"#,
        );
        assert!(matches!(
            result,
            Err(LoadError::InvalidMesh { vuid: 7, len: 2 })
        ));
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(Scene::from_json("{ nope"), Err(LoadError::Parse(_))));
    }
}
