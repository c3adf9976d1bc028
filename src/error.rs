use {
    std::{io, path::PathBuf},
    thiserror::Error,
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Source document could not be read or parsed
    #[error("failed to load parameters from {origin}: {reason}")]
    Source { origin: String, reason: String },

    /// Key is present but its value cannot be coerced to the declared type
    #[error("option {key} expects {expected}, found {found}")]
    Type {
        key: String,
        expected: &'static str,
        found: String,
    },

    #[error("failed to write {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("no default value for option {key}")]
    MissingDefault { key: String },

    #[error("GridLength {0} is too large, its square overflows")]
    GridTooLarge(usize),

    #[error("SharedLength must be non-zero to derive the linear length")]
    ZeroSharedLength,

    #[error("failed to encode parameters: {0}")]
    Encode(#[from] serde_yaml::Error),
}
