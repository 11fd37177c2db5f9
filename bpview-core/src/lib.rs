/// bpview core library - blueprint baking and wireframe previews
///
/// Flattens a hierarchical vehicle blueprint into one world-space mesh and
/// renders it as a rotating wireframe, one RGB frame per orbit step.

pub mod bake;
pub mod config;
pub mod decimate;
pub mod error;
pub mod geometry;
pub mod preview;
pub mod projection;
pub mod raster;
pub mod render;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use bake::bake;
pub use config::PreviewConfig;
pub use decimate::decimate;
pub use error::{LoadError, PreviewError, StructureError};
pub use geometry::{BakedScene, Face, Mesh};
pub use preview::{bake_document, bake_file, preview, preview_file, render_baked, Preview};
pub use projection::{OrbitCamera, Viewport};
pub use raster::Frame;
pub use render::{render, Frames, WireframeRenderer};
pub use scene::{Blueprint, BlueprintKind, Scene, SceneObject};
pub use transform::{LocalTransform, Transform, TransformResolver};
