//! FileServer: answer HTTP requests from a [`FileSource`].

use bytes::Bytes;
use http::header::{
    HeaderName, HeaderValue, ACCEPT_RANGES, ALLOW, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE,
    ETAG, IF_MATCH, IF_NONE_MATCH, IF_RANGE, LOCATION, RANGE, X_CONTENT_TYPE_OPTIONS,
};
use http::{Method, Request, Response, StatusCode};
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use xxhash_rust::xxh3::xxh3_64;

use swaggerui_vfs::{Error, FileSource, NamedFile, Node, Path};

use crate::content_type::ContentType;
use crate::listing;
use crate::range::{parse_range, RangeError};

/// File served for a directory request when present.
pub const INDEX_FILE: &str = "index.html";

/// Serves the files of a [`FileSource`] over HTTP.
///
/// Only `GET` and `HEAD` are answered. Directory requests are redirected to
/// a trailing slash and then served from `index.html` or as an HTML listing.
/// Responses carry a content-hash `ETag`, honour `If-None-Match`, `If-Match`,
/// `If-Range`, and single byte `Range` requests.
///
/// Redirects are relative, so the server can be mounted under any prefix
/// as long as the prefix is stripped from the request path first.
///
/// # Example
///
/// ```rust
/// use swaggerui_http::FileServer;
/// use swaggerui_vfs::{MemFs, Mode, path};
///
/// let mut fs = MemFs::new();
/// fs.put(&path!("swagger.yaml"), "openapi: 3.0.0", Mode::FILE).unwrap();
///
/// let server = FileServer::new(fs);
/// let request = http::Request::get("/swagger.yaml").body(()).unwrap();
/// let response = server.serve(&request);
///
/// assert_eq!(response.status(), http::StatusCode::OK);
/// assert_eq!(&response.body()[..], b"openapi: 3.0.0");
/// ```
#[derive(Debug, Clone)]
pub struct FileServer<S> {
    source: S,
}

impl<S: FileSource> FileServer<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The filesystem this server reads from.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Answer one request. Never fails: lookup errors become error responses.
    pub fn serve<B>(&self, request: &Request<B>) -> Response<Bytes> {
        let response = self.respond(request);
        log::debug!(
            "{} {} -> {}",
            request.method(),
            request.uri().path(),
            response.status()
        );
        response
    }

    fn respond<B>(&self, request: &Request<B>) -> Response<Bytes> {
        let method = request.method();
        if method != Method::GET && method != Method::HEAD {
            let mut response = text(StatusCode::METHOD_NOT_ALLOWED, "405 method not allowed");
            set_header(&mut response, ALLOW, "GET, HEAD");
            return response;
        }

        let decoded = percent_decode_str(request.uri().path()).decode_utf8_lossy();
        let url_path = if decoded.starts_with('/') {
            decoded.into_owned()
        } else {
            format!("/{}", decoded)
        };

        if url_path.ends_with(&format!("/{}", INDEX_FILE)) {
            return local_redirect(request, "./");
        }

        let path = match Path::clean(&url_path) {
            Ok(path) => path,
            Err(e) => {
                log::debug!("rejecting request path {:?}: {}", url_path, e);
                return not_found();
            }
        };

        let node = match self.source.open(&path) {
            Ok(node) => node,
            Err(e) => return error_response(&e),
        };

        match node {
            Node::Dir { .. } => {
                if !url_path.ends_with('/') {
                    let name = path.file_name().unwrap_or_default();
                    return local_redirect(request, &format!("{}/", name));
                }
                self.serve_dir(request, &path)
            }
            Node::File(file) => {
                if url_path.ends_with('/') {
                    return local_redirect(request, &format!("../{}", file.name()));
                }
                serve_file(request, &path, &file)
            }
        }
    }

    fn serve_dir<B>(&self, request: &Request<B>, dir: &Path) -> Response<Bytes> {
        if let Ok(index) = Path::parse(INDEX_FILE).map(|name| dir.join(&name)) {
            if let Ok(Node::File(file)) = self.source.open(&index) {
                return serve_file(request, &index, &file);
            }
        }

        match self.source.list(dir) {
            Ok(entries) => {
                let body = Bytes::from(listing::render(&entries));
                let length = body.len();
                let body = if request.method() == Method::HEAD {
                    Bytes::new()
                } else {
                    body
                };
                let mut response = Response::new(body);
                set_header(&mut response, CONTENT_TYPE, ContentType::HTML.as_str());
                set_header(&mut response, CONTENT_LENGTH, &length.to_string());
                response
            }
            Err(e) => error_response(&e),
        }
    }
}

/// Strong validator derived from the file content.
pub fn etag_for(content: &[u8]) -> String {
    format!("\"{:016x}\"", xxh3_64(content))
}

fn serve_file<B>(request: &Request<B>, path: &Path, file: &NamedFile) -> Response<Bytes> {
    let content = file.content();
    let size = content.len() as u64;
    let etag = etag_for(content);

    if let Some(if_match) = header_str(request, &IF_MATCH) {
        if !etag_list_matches(if_match, &etag, false) {
            return text(StatusCode::PRECONDITION_FAILED, "412 precondition failed");
        }
    }

    if let Some(if_none_match) = header_str(request, &IF_NONE_MATCH) {
        if etag_list_matches(if_none_match, &etag, true) {
            let mut response = Response::new(Bytes::new());
            *response.status_mut() = StatusCode::NOT_MODIFIED;
            set_header(&mut response, ETAG, &etag);
            return response;
        }
    }

    // A stale If-Range means the client's partial copy is outdated: send everything.
    let range = match header_str(request, &IF_RANGE) {
        Some(if_range) if if_range.trim() != etag => None,
        _ => header_str(request, &RANGE),
    };

    let (status, body, content_range) = match range.map(|h| parse_range(h, size)) {
        Some(Ok(ranges)) if ranges.len() == 1 => {
            let r = ranges[0];
            (
                StatusCode::PARTIAL_CONTENT,
                content.slice(r.start as usize..=r.end as usize),
                Some(r.content_range(size)),
            )
        }
        Some(Err(RangeError::Unsatisfiable)) => {
            let mut response = text(
                StatusCode::RANGE_NOT_SATISFIABLE,
                "invalid range: failed to overlap",
            );
            set_header(&mut response, CONTENT_RANGE, &format!("bytes */{}", size));
            return response;
        }
        Some(Err(RangeError::Invalid)) => {
            return text(StatusCode::RANGE_NOT_SATISFIABLE, "invalid range");
        }
        // No header, an empty range list, or several ranges: whole file.
        _ => (StatusCode::OK, content.clone(), None),
    };

    let length = body.len();
    let body = if request.method() == Method::HEAD {
        Bytes::new()
    } else {
        body
    };

    let mut response = Response::new(body);
    *response.status_mut() = status;
    set_header(&mut response, CONTENT_TYPE, ContentType::for_path(path).as_str());
    set_header(&mut response, CONTENT_LENGTH, &length.to_string());
    set_header(&mut response, ACCEPT_RANGES, "bytes");
    set_header(&mut response, ETAG, &etag);
    if let Some(content_range) = content_range {
        set_header(&mut response, CONTENT_RANGE, &content_range);
    }
    response
}

/// Compare an `If-Match`/`If-None-Match` list against `etag`.
///
/// `weak` allows `W/` validators to match, as `If-None-Match` requires.
fn etag_list_matches(list: &str, etag: &str, weak: bool) -> bool {
    list.split(',').map(str::trim).any(|candidate| {
        if candidate == "*" {
            return true;
        }
        match candidate.strip_prefix("W/") {
            Some(stripped) => weak && stripped == etag,
            None => candidate == etag,
        }
    })
}

fn header_str<'a, B>(request: &'a Request<B>, name: &HeaderName) -> Option<&'a str> {
    request.headers().get(name).and_then(|v| v.to_str().ok())
}

fn set_header(response: &mut Response<Bytes>, name: HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(value) => {
            response.headers_mut().insert(name, value);
        }
        Err(_) => log::warn!("dropping unrepresentable {} header value {:?}", name, value),
    }
}

fn text(status: StatusCode, message: &str) -> Response<Bytes> {
    let mut response = Response::new(Bytes::from(format!("{}\n", message)));
    *response.status_mut() = status;
    set_header(&mut response, CONTENT_TYPE, ContentType::TEXT.as_str());
    set_header(&mut response, X_CONTENT_TYPE_OPTIONS, "nosniff");
    response
}

fn not_found() -> Response<Bytes> {
    text(StatusCode::NOT_FOUND, "404 page not found")
}

fn error_response(error: &Error) -> Response<Bytes> {
    match error {
        Error::NotFound { .. } | Error::NotADirectory { .. } | Error::Path(_) => not_found(),
        Error::IsADirectory { .. } => {
            log::warn!("file server lookup failed: {}", error);
            text(StatusCode::INTERNAL_SERVER_ERROR, "500 internal server error")
        }
    }
}

/// Redirect relative to the request path, keeping the query string.
fn local_redirect<B>(request: &Request<B>, target: &str) -> Response<Bytes> {
    let mut location = utf8_percent_encode(target, listing::HREF_SET).to_string();
    if let Some(query) = request.uri().query() {
        location.push('?');
        location.push_str(query);
    }

    let mut response = Response::new(Bytes::new());
    *response.status_mut() = StatusCode::MOVED_PERMANENTLY;
    set_header(&mut response, LOCATION, &location);
    response
}
