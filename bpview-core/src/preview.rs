/// End-to-end preview: scene document in, frame sequence out
use std::path::Path;

use crate::bake::bake;
use crate::config::PreviewConfig;
use crate::error::PreviewError;
use crate::geometry::BakedScene;
use crate::raster::Frame;
use crate::render::WireframeRenderer;
use crate::scene::Scene;

/// Result of a successful preview
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Rendered(Vec<Frame>),
    /// The document loaded but contains no bakeable geometry
    Empty,
}

impl Preview {
    pub fn frames(&self) -> &[Frame] {
        match self {
            Preview::Rendered(frames) => frames,
            Preview::Empty => &[],
        }
    }

    pub fn into_frames(self) -> Vec<Frame> {
        match self {
            Preview::Rendered(frames) => frames,
            Preview::Empty => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Preview::Empty)
    }
}

/// Parse and bake a JSON scene document
pub fn bake_document(document: &str) -> Result<BakedScene, PreviewError> {
    let scene = Scene::from_json(document)?;
    Ok(bake(&scene)?)
}

/// Read, parse and bake a scene document from disk
pub fn bake_file<P: AsRef<Path>>(path: P) -> Result<BakedScene, PreviewError> {
    let scene = Scene::from_path(path)?;
    Ok(bake(&scene)?)
}

/// Render a baked scene eagerly.
///
/// Real geometry is always `Rendered`, even when zero frames were asked for.
pub fn render_baked(baked: &BakedScene, config: &PreviewConfig) -> Preview {
    if baked.is_empty() {
        return Preview::Empty;
    }

    let renderer = WireframeRenderer::from_baked(baked, config);

    let frames = renderer.render_all();
    tracing::info!(
        "Rendered {} frames at {}x{} ({} faces each)",
        frames.len(),
        config.size,
        config.size,
        renderer.faces().len()
    );
    Preview::Rendered(frames)
}

/// Bake and render a JSON scene document
pub fn preview(document: &str, config: &PreviewConfig) -> Result<Preview, PreviewError> {
    let baked = bake_document(document)?;
    Ok(render_baked(&baked, config))
}

/// Bake and render a scene document stored at `path`
pub fn preview_file<P: AsRef<Path>>(path: P, config: &PreviewConfig) -> Result<Preview, PreviewError> {
    let baked = bake_file(path)?;
    Ok(render_baked(&baked, config))
}
