// crates/cli/src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] subrename_engine::EngineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<subrename_engine::options::RenameOptionsBuilderError> for AppError {
    fn from(e: subrename_engine::options::RenameOptionsBuilderError) -> Self {
        Self::Engine(e.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
