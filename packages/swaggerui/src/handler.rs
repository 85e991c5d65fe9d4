//! The swagger-ui handler: options, construction, and request serving.

use bytes::Bytes;
use http::{Request, Response};
use include_dir::Dir;

use swaggerui_http::FileServer;
use swaggerui_vfs::{BundleFs, MemFs, MergedFs, Mode, Path, PathError};

use crate::assets::{ASSETS, BUNDLE_ROOT};
use crate::error::SetupError;
use crate::initializer::{self, INITIALIZER_FILENAME};
use crate::validation;

/// Spec filename used when no [`HandlerOption::Spec`] is given.
pub const DEFAULT_SPEC_FILENAME: &str = "swagger.yaml";

/// The filesystem a handler serves: the overlay on top of the bundle.
pub type SwaggerFs = MergedFs<MemFs, BundleFs>;

/// One construction option. Applied in order; later options win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOption {
    /// Serve `content` as the spec under `filename`.
    Spec { filename: String, content: Bytes },
    /// Replace the generated `swagger-initializer.js` entirely.
    InitializerContent(Bytes),
    /// Prefix for the spec URL in the generated initializer.
    Prefix(String),
}

/// Option serving `content` as the spec document named `filename`.
pub fn spec(filename: impl Into<String>, content: impl Into<Bytes>) -> HandlerOption {
    HandlerOption::Spec {
        filename: filename.into(),
        content: content.into(),
    }
}

/// Option replacing the generated initializer with `content`.
pub fn initializer_content(content: impl Into<Bytes>) -> HandlerOption {
    HandlerOption::InitializerContent(content.into())
}

/// Option setting the spec URL prefix used by the generated initializer.
pub fn prefix(prefix: impl Into<String>) -> HandlerOption {
    HandlerOption::Prefix(prefix.into())
}

/// Serves swagger-ui with a spec document and initializer overlaid onto the
/// embedded distribution.
///
/// Built once, validated up front, then read-only: a `SwaggerUi` can be
/// shared across threads and serve requests concurrently.
///
/// # Example
///
/// ```rust
/// use swaggerui::{spec, SwaggerUi};
///
/// let ui = SwaggerUi::new([spec("api.yaml", "openapi: 3.0.0\n")]).unwrap();
///
/// let request = http::Request::get("/api.yaml").body(()).unwrap();
/// let response = ui.serve(&request);
/// assert_eq!(response.status(), http::StatusCode::OK);
/// assert_eq!(&response.body()[..], b"openapi: 3.0.0\n");
/// ```
#[derive(Debug)]
pub struct SwaggerUi {
    spec_filename: String,
    spec_content: Bytes,
    initializer_content: Bytes,
    server: FileServer<SwaggerFs>,
}

impl SwaggerUi {
    /// Build a handler over the embedded swagger-ui distribution.
    pub fn new(options: impl IntoIterator<Item = HandlerOption>) -> Result<Self, SetupError> {
        Self::with_bundle(&ASSETS, options)
    }

    /// Build a handler over `root`, which must contain `swagger-ui/dist`.
    pub fn with_bundle(
        root: &'static Dir<'static>,
        options: impl IntoIterator<Item = HandlerOption>,
    ) -> Result<Self, SetupError> {
        let mut spec_filename = DEFAULT_SPEC_FILENAME.to_string();
        let mut spec_content = Bytes::new();
        let mut custom_initializer = None;
        let mut url_prefix = String::new();

        for option in options {
            match option {
                HandlerOption::Spec { filename, content } => {
                    spec_filename = filename;
                    spec_content = content;
                }
                HandlerOption::InitializerContent(content) => custom_initializer = Some(content),
                HandlerOption::Prefix(p) => url_prefix = p,
            }
        }

        let initializer_content = match custom_initializer {
            Some(content) => content,
            None => Bytes::from(initializer::render(&spec_filename, &url_prefix)),
        };

        validation::validate(&spec_filename, &spec_content, &initializer_content)?;

        let overlay = setup_overlay(&spec_filename, &spec_content, &initializer_content)?;
        let bundle = BundleFs::sub(root, BUNDLE_ROOT).map_err(|source| SetupError::Bundle {
            root: BUNDLE_ROOT.to_string(),
            source,
        })?;

        log::debug!(
            "swagger-ui ready: spec {} ({} bytes), initializer {} bytes",
            spec_filename,
            spec_content.len(),
            initializer_content.len()
        );

        Ok(Self {
            spec_filename,
            spec_content,
            initializer_content,
            server: FileServer::new(MergedFs::new(overlay, bundle)),
        })
    }

    /// Start an option list fluently.
    pub fn builder() -> SwaggerUiBuilder {
        SwaggerUiBuilder::default()
    }

    /// Answer one request from the merged filesystem.
    ///
    /// Paths are resolved from the distribution root, so a caller mounting
    /// the handler under a prefix strips that prefix first.
    pub fn serve<B>(&self, request: &Request<B>) -> Response<Bytes> {
        self.server.serve(request)
    }

    pub fn spec_filename(&self) -> &str {
        &self.spec_filename
    }

    pub fn spec_content(&self) -> &Bytes {
        &self.spec_content
    }

    pub fn initializer_content(&self) -> &Bytes {
        &self.initializer_content
    }

    /// The merged filesystem, for reading or walking files directly.
    pub fn file_system(&self) -> &SwaggerFs {
        self.server.source()
    }
}

fn setup_overlay(filename: &str, spec: &Bytes, initializer: &Bytes) -> Result<MemFs, SetupError> {
    let mut overlay = MemFs::new();
    for (name, content) in [(filename, spec), (INITIALIZER_FILENAME, initializer)] {
        overlay_path(name)
            .map_err(swaggerui_vfs::Error::from)
            .and_then(|path| overlay.put(&path, content.clone(), Mode::FILE))
            .map_err(|source| SetupError::Overlay {
                file: name.to_string(),
                source,
            })?;
    }
    Ok(overlay)
}

/// The overlay path for `name`, which must already be in normal form.
///
/// The name is also the spec URL, so `/api.yaml` or `a//b.yaml` would be
/// served under a different path than the initializer points at.
fn overlay_path(name: &str) -> Result<Path, PathError> {
    let path = Path::parse(name)?;
    if path.is_empty() || path.to_string() != name {
        return Err(PathError::InvalidPath {
            message: format!(
                "{:?} must be a relative path without empty, '.' or trailing components",
                name
            ),
        });
    }
    Ok(path)
}

/// Collects [`HandlerOption`]s and builds a [`SwaggerUi`].
///
/// ```rust
/// use swaggerui::SwaggerUi;
///
/// let ui = SwaggerUi::builder()
///     .spec("openapi.json", r#"{"openapi":"3.0.0"}"#)
///     .prefix("/docs")
///     .build()
///     .unwrap();
/// assert_eq!(ui.spec_filename(), "openapi.json");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SwaggerUiBuilder {
    options: Vec<HandlerOption>,
}

impl SwaggerUiBuilder {
    pub fn spec(mut self, filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        self.options.push(spec(filename, content));
        self
    }

    pub fn initializer_content(mut self, content: impl Into<Bytes>) -> Self {
        self.options.push(initializer_content(content));
        self
    }

    pub fn prefix(mut self, url_prefix: impl Into<String>) -> Self {
        self.options.push(prefix(url_prefix));
        self
    }

    pub fn option(mut self, option: HandlerOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn build(self) -> Result<SwaggerUi, SetupError> {
        SwaggerUi::new(self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{ValidationFailure, MIN_INITIALIZER_LEN};
    use swaggerui_vfs::{path, FileSource};

    fn padded(content: &str) -> String {
        format!("{:<width$}", content, width = MIN_INITIALIZER_LEN)
    }

    #[test]
    fn default_handler() {
        let ui = SwaggerUi::new([]).unwrap();
        assert_eq!(ui.spec_filename(), DEFAULT_SPEC_FILENAME);
        assert!(ui.spec_content().is_empty());
        assert!(std::str::from_utf8(ui.initializer_content())
            .unwrap()
            .contains("\"./swagger.yaml\""));
    }

    #[test]
    fn later_options_win() {
        let ui = SwaggerUi::new([spec("a.yaml", "a: 1"), spec("b.json", "{}")]).unwrap();
        assert_eq!(ui.spec_filename(), "b.json");
        assert!(ui.file_system().open(&path!("a.yaml")).is_err());
    }

    #[test]
    fn prefix_reaches_initializer() {
        let ui = SwaggerUi::new([prefix("/docs"), spec("v1.yaml", "x: y")]).unwrap();
        let js = std::str::from_utf8(ui.initializer_content()).unwrap();
        assert!(js.contains("\"/docs/v1.yaml\""));
    }

    #[test]
    fn custom_initializer_ignores_prefix() {
        let custom = padded("window.onload = null;");
        let ui = SwaggerUi::new([prefix("/docs"), initializer_content(custom.clone())]).unwrap();
        assert_eq!(&ui.initializer_content()[..], custom.as_bytes());
    }

    #[test]
    fn overlay_files_are_written() {
        let ui = SwaggerUi::new([spec("foo.yaml", "bar")]).unwrap();
        let fs = ui.file_system();
        assert_eq!(fs.upper().len(), 2);
        let written: Vec<String> = fs.upper().files().map(|(p, _)| p.to_string()).collect();
        assert_eq!(written, ["foo.yaml", "swagger-initializer.js"]);
        assert_eq!(&fs.read_file(&path!("foo.yaml")).unwrap()[..], b"bar");
        assert_eq!(
            fs.upper().open(&path!("swagger-initializer.js")).unwrap().mode(),
            Mode::FILE
        );
    }

    #[test]
    fn nested_spec_filename() {
        let ui = SwaggerUi::new([spec("v1/openapi.yaml", "a: b")]).unwrap();
        assert!(ui.file_system().open(&path!("v1/openapi.yaml")).is_ok());
    }

    #[test]
    fn overlay_collision_is_setup_error() {
        let err = SwaggerUi::new([spec("swagger-initializer.js/api.yaml", "a: b")]).unwrap_err();
        assert!(matches!(err, SetupError::Overlay { ref file, .. } if file == INITIALIZER_FILENAME));
    }

    #[test]
    fn escaping_spec_filename_is_setup_error() {
        let err = SwaggerUi::new([spec("../api.yaml", "a: b")]).unwrap_err();
        assert!(matches!(err, SetupError::Overlay { ref file, .. } if file == "../api.yaml"));
    }

    #[test]
    fn non_normal_spec_filename_is_setup_error() {
        for name in ["/api.yaml", "./api.yaml", "v1//api.yaml", "v1/./api.yaml"] {
            let err = SwaggerUi::new([spec(name, "a: b")]).unwrap_err();
            assert!(
                matches!(err, SetupError::Overlay { ref file, .. } if file == name),
                "{}: {}",
                name,
                err
            );
        }
    }

    #[test]
    fn validation_runs_before_overlay() {
        let err = SwaggerUi::new([spec("../api.txt", "a: b")]).unwrap_err();
        assert_eq!(
            err.validation_failures(),
            Some(
                &[ValidationFailure::UnsupportedExtension {
                    filename: "../api.txt".to_string()
                }][..]
            )
        );
    }

    #[test]
    fn missing_bundle_root_is_setup_error() {
        static NO_DIST: Dir<'static> = include_dir::include_dir!("$CARGO_MANIFEST_DIR/src");
        let err = SwaggerUi::with_bundle(&NO_DIST, []).unwrap_err();
        assert!(matches!(err, SetupError::Bundle { .. }));
    }

    #[test]
    fn builder_matches_options() {
        let ui = SwaggerUi::builder()
            .spec("api.yml", "openapi: 3.1.0")
            .option(prefix("/x"))
            .build()
            .unwrap();
        assert_eq!(ui.spec_filename(), "api.yml");
        assert!(std::str::from_utf8(ui.initializer_content())
            .unwrap()
            .contains("\"/x/api.yml\""));
    }

    #[test]
    fn handler_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SwaggerUi>();
    }
}
