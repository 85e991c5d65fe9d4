//! Errors from building a [`SwaggerUi`](crate::SwaggerUi).

use crate::validation::{ValidationErrors, ValidationFailure};

/// Construction failed; no handler was built.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// One or more options broke a validation rule.
    #[error("setting up swagger-ui: invalid options: {0}")]
    Validation(#[from] ValidationErrors),

    /// A file could not be written into the overlay.
    #[error("setting up swagger-ui: error setting up overlay: error writing {file}: {source}")]
    Overlay {
        file: String,
        source: swaggerui_vfs::Error,
    },

    /// The embedded bundle has no usable tree at `root`.
    #[error("setting up swagger-ui: error setting up static: bundle root {root:?}: {source}")]
    Bundle {
        root: String,
        source: swaggerui_vfs::Error,
    },
}

impl SetupError {
    /// The failed rules, if validation is what stopped construction.
    pub fn validation_failures(&self) -> Option<&[ValidationFailure]> {
        match self {
            SetupError::Validation(errors) => Some(errors.failures()),
            _ => None,
        }
    }
}
