//! Ошибки подготовки датасета

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrepareError {
    #[error("dataset file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset: {0}")]
    Format(String),

    #[error("required columns missing: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("no rows left: {0}")]
    EmptyResult(String),

    #[error("encoding failed: {0}")]
    Encoding(String),

    #[error("cannot split dataset: {0}")]
    Split(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PrepareError {
    /// Ошибка чтения файла с привязкой к пути
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }
}

impl From<csv::Error> for PrepareError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Io(io) => Self::Format(format!("I/O error while parsing: {}", io)),
            _ => Self::Format(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PrepareError>;
