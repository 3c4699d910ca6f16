// src/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RowscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("XDG directory error: {0}")]
    Xdg(#[from] xdg::BaseDirectoriesError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dataset error in {path}: {message}")]
    Dataset { path: String, message: String },
}
