//! # swaggerui
//!
//! Serve swagger-ui for your own API description.
//!
//! The swagger-ui distribution is embedded in the crate. A [`SwaggerUi`]
//! handler writes two files into a small in-memory overlay (your spec
//! document and a `swagger-initializer.js` pointing the UI at it) and
//! serves the overlay merged on top of the embedded files:
//!
//! ```text
//!   request ──► FileServer ──► MergedFs ─┬─► MemFs     (spec, initializer)
//!                                        └─► BundleFs  (swagger-ui/dist)
//! ```
//!
//! Options are checked before anything is built; a handler either exists
//! fully valid or construction fails with a [`SetupError`] listing every
//! broken rule.
//!
//! The large upstream bundles (`swagger-ui-bundle.js`, `swagger-ui.css`,
//! ...) are downloaded by `scripts/fetch-swagger-ui.sh` before building.
//! Without them the build script warns, release builds fail, and
//! [`missing_dist_files`] lists what the running binary lacks.
//!
//! ```rust
//! use swaggerui::{spec, SwaggerUi};
//!
//! let ui = SwaggerUi::new([spec("openapi.yaml", "openapi: 3.0.0\n")]).unwrap();
//!
//! let request = http::Request::get("/swagger-initializer.js").body(()).unwrap();
//! let body = ui.serve(&request).into_body();
//! assert!(std::str::from_utf8(&body).unwrap().contains("./openapi.yaml"));
//! ```

mod assets;
mod error;
mod handler;
pub mod initializer;
pub mod validation;

pub use assets::{missing_dist_files, ASSETS, BUNDLE_ROOT, DIST_FILES};
pub use error::SetupError;
pub use handler::{
    initializer_content, prefix, spec, HandlerOption, SwaggerFs, SwaggerUi, SwaggerUiBuilder,
    DEFAULT_SPEC_FILENAME,
};
pub use initializer::INITIALIZER_FILENAME;
pub use validation::{DeclaredFormat, ValidationErrors, ValidationFailure};
