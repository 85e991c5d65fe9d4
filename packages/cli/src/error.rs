use std::path::PathBuf;

use swaggerui::SetupError;

/// Errors that stop the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("spec path {} has no usable file name", path.display())]
    SpecName { path: PathBuf },

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("listening on {addr}: {source}")]
    Bind {
        addr: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
