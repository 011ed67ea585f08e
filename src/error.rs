//! Error type shared by every public operation of the crate.
//!
//! Reader internals (the EDF seam over `edfplus`) work with `anyhow` and context
//! chains; the chain is flattened into [`Error::Load`] at the public boundary
//! so callers can match on a closed set of failure kinds.
use std::path::PathBuf;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Recording file missing, truncated or not a valid EDF file.
    #[error("failed to load recording {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    /// Channel layout file malformed. `line` is 1-based.
    #[error("malformed channel layout {} (line {line}): {reason}", path.display())]
    LayoutParse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// MVAR fit or spectral estimation failed.
    #[error("connectivity estimation failed: {0}")]
    Estimation(String),

    /// The requested density is below what the surviving edges allow.
    #[error(
        "target density {threshold} is unreachable (minimum achievable density is {min_density})"
    )]
    DensityUnreachable { threshold: f64, min_density: f64 },

    /// Caller-supplied argument out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an `anyhow` chain from a reader into a [`Error::Load`].
    pub(crate) fn load(path: impl Into<PathBuf>, err: &anyhow::Error) -> Self {
        Error::Load {
            path: path.into(),
            reason: format!("{err:#}"),
        }
    }
}
