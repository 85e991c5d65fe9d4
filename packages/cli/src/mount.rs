//! Mounting a handler under a base path.

use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE, LOCATION};
use http::{Request, Response, StatusCode, Uri};

use swaggerui::SwaggerUi;

/// A [`SwaggerUi`] reachable below `base_path`, with the base stripped
/// before the handler sees the request.
#[derive(Debug)]
pub struct Mount {
    base_path: String,
    ui: SwaggerUi,
}

impl Mount {
    /// `base_path` is normalized to start and end with `/`.
    pub fn new(base_path: &str, ui: SwaggerUi) -> Self {
        let trimmed = base_path.trim_matches('/');
        let base_path = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        };
        Self { base_path, ui }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn ui(&self) -> &SwaggerUi {
        &self.ui
    }

    pub fn dispatch<B>(&self, request: &Request<B>) -> Response<Bytes> {
        let path = request.uri().path();

        // "/api-docs" -> "/api-docs/"
        if self.base_path.len() > 1 && path == &self.base_path[..self.base_path.len() - 1] {
            let mut location = self.base_path.clone();
            if let Some(query) = request.uri().query() {
                location.push('?');
                location.push_str(query);
            }
            return redirect(&location);
        }

        let rest = match path.strip_prefix(&self.base_path) {
            Some(rest) => rest,
            None => return not_found(),
        };

        let mut stripped = format!("/{}", rest);
        if let Some(query) = request.uri().query() {
            stripped.push('?');
            stripped.push_str(query);
        }
        let uri: Uri = match stripped.parse() {
            Ok(uri) => uri,
            Err(e) => {
                log::debug!("cannot rebuild request uri {:?}: {}", stripped, e);
                return not_found();
            }
        };

        let mut inner = Request::new(());
        *inner.method_mut() = request.method().clone();
        *inner.uri_mut() = uri;
        *inner.headers_mut() = request.headers().clone();
        self.ui.serve(&inner)
    }
}

fn redirect(location: &str) -> Response<Bytes> {
    let mut response = Response::new(Bytes::new());
    *response.status_mut() = StatusCode::MOVED_PERMANENTLY;
    if let Ok(value) = HeaderValue::from_str(location) {
        response.headers_mut().insert(LOCATION, value);
    }
    response
}

fn not_found() -> Response<Bytes> {
    let mut response = Response::new(Bytes::from_static(b"404 page not found\n"));
    *response.status_mut() = StatusCode::NOT_FOUND;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}
