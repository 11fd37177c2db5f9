/// Error types for loading, resolving and previewing blueprints
use std::fmt;

/// The scene document could not be read or parsed.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// A mesh whose flat vertex list is not made of whole triples
    InvalidMesh { vuid: i64, len: usize },
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "IO error: {}", e),
            LoadError::Parse(e) => write!(f, "Malformed scene document: {}", e),
            LoadError::InvalidMesh { vuid, len } => write!(
                f,
                "Mesh {} has {} vertex coordinates, not a multiple of 3",
                vuid, len
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            LoadError::InvalidMesh { .. } => None,
        }
    }
}

/// The object hierarchy is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// `vuid` is its own ancestor; `chain` lists the objects walked, child first
    CyclicParentage { vuid: i64, chain: Vec<i64> },
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureError::CyclicParentage { vuid, chain } => {
                let chain: Vec<String> = chain.iter().map(|v| v.to_string()).collect();
                write!(
                    f,
                    "Object {} is its own ancestor: {}",
                    vuid,
                    chain.join(" -> ")
                )
            }
        }
    }
}

impl std::error::Error for StructureError {}

/// Any failure of the preview pipeline
#[derive(Debug)]
pub enum PreviewError {
    Load(LoadError),
    Structure(StructureError),
}

impl From<LoadError> for PreviewError {
    fn from(err: LoadError) -> Self {
        PreviewError::Load(err)
    }
}

impl From<StructureError> for PreviewError {
    fn from(err: StructureError) -> Self {
        PreviewError::Structure(err)
    }
}

impl From<std::io::Error> for PreviewError {
    fn from(err: std::io::Error) -> Self {
        PreviewError::Load(err.into())
    }
}

impl From<serde_json::Error> for PreviewError {
    fn from(err: serde_json::Error) -> Self {
        PreviewError::Load(err.into())
    }
}

impl fmt::Display for PreviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewError::Load(e) => write!(f, "Failed to load blueprint: {}", e),
            PreviewError::Structure(e) => write!(f, "Invalid blueprint structure: {}", e),
        }
    }
}

impl std::error::Error for PreviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PreviewError::Load(e) => Some(e),
            PreviewError::Structure(e) => Some(e),
        }
    }
}
