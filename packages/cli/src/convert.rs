//! Conversions between `tiny_http` and `http` types.

use std::io::Cursor;

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{Method, Request, Response};

/// Copy method, target and headers of a `tiny_http` request.
///
/// Headers `http` cannot represent are dropped. The body is not read; the
/// file server only answers `GET` and `HEAD`.
pub fn to_http_request(request: &tiny_http::Request) -> Result<Request<()>, http::Error> {
    let method = Method::from_bytes(request.method().as_str().as_bytes())?;
    let mut builder = Request::builder().method(method).uri(request.url());

    for header in request.headers() {
        let name = HeaderName::from_bytes(header.field.as_str().as_str().as_bytes());
        let value = HeaderValue::from_str(header.value.as_str());
        match (name, value) {
            (Ok(name), Ok(value)) => builder = builder.header(name, value),
            _ => log::debug!("dropping header {}", header.field),
        }
    }

    builder.body(())
}

/// Turn a handler response into a `tiny_http` response.
pub fn to_tiny_response(response: Response<Bytes>) -> tiny_http::Response<Cursor<Vec<u8>>> {
    let (parts, body) = response.into_parts();
    let mut tiny = tiny_http::Response::from_data(body.to_vec()).with_status_code(parts.status.as_u16());

    for (name, value) in parts.headers.iter() {
        match tiny_http::Header::from_bytes(name.as_str().as_bytes(), value.as_bytes()) {
            Ok(header) => tiny.add_header(header),
            Err(()) => log::debug!("dropping response header {}", name),
        }
    }
    tiny
}
