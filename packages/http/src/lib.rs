//! # swaggerui-http
//!
//! Serve a [`FileSource`](swaggerui_vfs::FileSource) over HTTP.
//!
//! The server speaks in terms of the `http` crate's types, so it can sit
//! behind any transport: take an `http::Request`, get back an
//! `http::Response<Bytes>`.
//!
//! ```rust
//! use swaggerui_http::FileServer;
//! use swaggerui_vfs::{MemFs, Mode, path};
//!
//! let mut fs = MemFs::new();
//! fs.put(&path!("index.html"), "<html></html>", Mode::FILE).unwrap();
//!
//! let server = FileServer::new(fs);
//! let response = server.serve(&http::Request::get("/").body(()).unwrap());
//! assert_eq!(response.status(), http::StatusCode::OK);
//! ```
//!
//! ## What the server does
//!
//! - `GET` and `HEAD` only; anything else is `405 Method Not Allowed`
//! - request paths are percent-decoded and cleaned, so `..` cannot leave the root
//! - directories redirect to a trailing slash, then serve `index.html` or a listing
//! - `.../index.html` redirects to `./`
//! - content types come from the file extension
//! - `ETag` is a hash of the content; `If-None-Match`, `If-Match` and
//!   `If-Range` are honoured
//! - a single `Range` gets `206 Partial Content`

mod content_type;
mod file_server;
mod listing;
mod range;

pub use content_type::ContentType;
pub use file_server::{etag_for, FileServer, INDEX_FILE};
pub use listing::{html_escape, render as render_listing};
pub use range::{parse_range, ByteRange, RangeError};
