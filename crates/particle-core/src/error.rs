use std::fmt;

/// The two remote resources the scene waits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetKind {
    Font,
    Sprite,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Font => f.write_str("font"),
            AssetKind::Sprite => f.write_str("sprite texture"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParticleError {
    #[error("failed to load {resource}: {cause}")]
    AssetLoadFailure { resource: AssetKind, cause: String },

    #[error("mount element #{0} is missing")]
    MountPointMissing(String),

    #[error("shader source #{0} is missing")]
    ShaderSourceMissing(String),

    #[error("malformed font: {0}")]
    FontFormat(String),

    #[error("malformed sprite image: {0}")]
    SpriteFormat(String),

    #[error("render error: {0}")]
    Render(String),
}

impl ParticleError {
    pub fn asset(resource: AssetKind, cause: impl fmt::Display) -> Self {
        ParticleError::AssetLoadFailure {
            resource,
            cause: cause.to_string(),
        }
    }
}

impl From<serde_json::Error> for ParticleError {
    fn from(e: serde_json::Error) -> Self {
        ParticleError::FontFormat(e.to_string())
    }
}
