//! # swaggerui-cli
//!
//! `swaggerui-serve`: serve swagger-ui for a spec file on disk.
//!
//! ```text
//! swaggerui-serve --spec openapi.yaml --listen 127.0.0.1:8080 --base-path /api-docs/
//! ```
//!
//! Every flag can also be set from the environment (`SWAGGERUI_SPEC`,
//! `SWAGGERUI_LISTEN`, `SWAGGERUI_BASE_PATH`, `SWAGGERUI_PREFIX`,
//! `SWAGGERUI_INITIALIZER`).

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use clap::Parser;

use swaggerui::{HandlerOption, SwaggerUi};

mod convert;
mod error;
mod mount;

pub use convert::{to_http_request, to_tiny_response};
pub use error::CliError;
pub use mount::Mount;

/// Serve swagger-ui for an API description
#[derive(Parser, Debug, Clone)]
#[command(name = "swaggerui-serve")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Spec document to serve (.yaml, .yml or .json); an empty swagger.yaml if unset
    #[arg(long, short, env = "SWAGGERUI_SPEC")]
    pub spec: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, short, env = "SWAGGERUI_LISTEN", default_value = "127.0.0.1:8080")]
    pub listen: String,

    /// Path the UI is served under
    #[arg(long, env = "SWAGGERUI_BASE_PATH", default_value = "/api-docs/")]
    pub base_path: String,

    /// Prefix for the spec URL in the generated initializer
    #[arg(long, env = "SWAGGERUI_PREFIX")]
    pub prefix: Option<String>,

    /// File replacing the generated swagger-initializer.js
    #[arg(long, env = "SWAGGERUI_INITIALIZER")]
    pub initializer: Option<PathBuf>,

    /// Threads answering requests
    #[arg(long, default_value_t = 4)]
    pub workers: usize,
}

fn read(path: &Path) -> Result<Vec<u8>, CliError> {
    fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Build the handler options from the command line.
pub fn handler_options(args: &Args) -> Result<Vec<HandlerOption>, CliError> {
    let mut options = Vec::new();

    if let Some(path) = &args.spec {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| CliError::SpecName { path: path.clone() })?;
        options.push(swaggerui::spec(filename, read(path)?));
    }
    if let Some(prefix) = &args.prefix {
        options.push(swaggerui::prefix(prefix.as_str()));
    }
    if let Some(path) = &args.initializer {
        options.push(swaggerui::initializer_content(read(path)?));
    }

    Ok(options)
}

/// A bound server, ready to answer requests.
pub struct App {
    server: Arc<tiny_http::Server>,
    mount: Arc<Mount>,
}

impl App {
    pub fn bind(args: &Args) -> Result<Self, CliError> {
        let ui = SwaggerUi::new(handler_options(args)?)?;
        let mount = Mount::new(&args.base_path, ui);

        let server = tiny_http::Server::http(args.listen.as_str()).map_err(|source| CliError::Bind {
            addr: args.listen.clone(),
            source,
        })?;

        Ok(Self {
            server: Arc::new(server),
            mount: Arc::new(mount),
        })
    }

    /// The bound address; useful when listening on port 0.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    /// Answer requests on `workers` threads until the listener fails.
    pub fn run(self, workers: usize) {
        let handles: Vec<_> = (0..workers.max(1))
            .map(|_| {
                let server = Arc::clone(&self.server);
                let mount = Arc::clone(&self.mount);
                thread::spawn(move || worker(&server, &mount))
            })
            .collect();

        for handle in handles {
            if handle.join().is_err() {
                log::error!("request worker panicked");
            }
        }
    }
}

fn worker(server: &tiny_http::Server, mount: &Mount) {
    loop {
        let request = match server.recv() {
            Ok(request) => request,
            Err(e) => {
                log::warn!("stopping worker: {}", e);
                return;
            }
        };

        let response = match to_http_request(&request) {
            Ok(http_request) => mount.dispatch(&http_request),
            Err(e) => {
                log::debug!("unusable request {} {}: {}", request.method(), request.url(), e);
                let mut response = http::Response::new(bytes::Bytes::from_static(b"400 bad request\n"));
                *response.status_mut() = http::StatusCode::BAD_REQUEST;
                response
            }
        };

        log::info!(
            "{} {} {}",
            request.method(),
            request.url(),
            response.status().as_u16()
        );
        if let Err(e) = request.respond(to_tiny_response(response)) {
            log::debug!("writing response failed: {}", e);
        }
    }
}

/// Bind and serve until the process is stopped.
pub fn run(args: Args) -> Result<(), CliError> {
    let missing = swaggerui::missing_dist_files();
    if !missing.is_empty() {
        log::warn!(
            "swagger-ui distribution is incomplete, missing {}; the UI will not load",
            missing.join(", ")
        );
    }

    let app = App::bind(&args)?;
    match app.local_addr() {
        Some(addr) => log::info!(
            "serving swagger-ui at http://{}{}",
            addr,
            app.mount().base_path()
        ),
        None => log::info!("serving swagger-ui on {}", args.listen),
    }
    app.run(args.workers);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["swaggerui-serve"]);
        assert_eq!(args.listen, "127.0.0.1:8080");
        assert_eq!(args.base_path, "/api-docs/");
        assert_eq!(args.workers, 4);
        assert!(args.spec.is_none());
        assert!(handler_options(&args).unwrap().is_empty());
    }

    #[test]
    fn missing_spec_file_is_read_error() {
        let args = Args::parse_from(["swaggerui-serve", "--spec", "/nonexistent/api.yaml"]);
        let err = handler_options(&args).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
        assert!(err.to_string().starts_with("reading /nonexistent/api.yaml: "));
    }

    #[test]
    fn prefix_becomes_option() {
        let args = Args::parse_from(["swaggerui-serve", "--prefix", "/docs"]);
        assert_eq!(
            handler_options(&args).unwrap(),
            vec![HandlerOption::Prefix("/docs".to_string())]
        );
    }
}
