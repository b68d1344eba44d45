use std::path::PathBuf;

use thiserror::Error;

/// Failure while building the sprite set at startup
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("asset file not found: {0}")]
    Missing(PathBuf),

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("asset has zero size: {0}")]
    Empty(PathBuf),
}

#[derive(Error, Debug)]
pub enum GameError {
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
