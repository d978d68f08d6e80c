// crates/engine/src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to walk '{}': {}", display_opt(.path), .source)]
    Traversal {
        path: Option<PathBuf>,
        #[source]
        source: walkdir::Error,
    },

    #[error("Target already exists: '{}' -> '{}'", .from.display(), .to.display())]
    Collision { from: PathBuf, to: PathBuf },

    #[error("Failed to rename '{}' -> '{}': {}", .from.display(), .to.display(), .source)]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<walkdir::Error> for EngineError {
    fn from(source: walkdir::Error) -> Self {
        Self::Traversal {
            path: source.path().map(PathBuf::from),
            source,
        }
    }
}

impl From<crate::options::RenameOptionsBuilderError> for EngineError {
    fn from(e: crate::options::RenameOptionsBuilderError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

fn display_opt(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string())
}

pub type Result<T> = std::result::Result<T, EngineError>;
