use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FixError>;

#[derive(Debug, Error)]
pub enum FixError {
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8", path.display())]
    NotUtf8 { path: PathBuf },

    #[error("unknown encoding label: {0}")]
    UnknownEncoding(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

impl FixError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FixError::Io {
            path: path.into(),
            source,
        }
    }
}
