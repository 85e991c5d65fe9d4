use std::io::Write;
use std::net::SocketAddr;
use std::thread;

use clap::Parser;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use reqwest::StatusCode;

use swaggerui_cli::{App, Args, CliError};

fn start(extra: &[&str]) -> SocketAddr {
    let mut argv = vec!["swaggerui-serve", "--listen", "127.0.0.1:0"];
    argv.extend_from_slice(extra);
    let args = Args::parse_from(argv);

    let app = App::bind(&args).unwrap();
    let addr = app.local_addr().unwrap();
    thread::spawn(move || app.run(2));
    addr
}

fn client() -> Client {
    Client::builder().redirect(Policy::none()).build().unwrap()
}

fn spec_file(name: &str, content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    (dir, path.to_str().unwrap().to_string())
}

#[test]
fn test_serves_spec_from_disk() {
    let (_dir, path) = spec_file("petstore.yaml", "openapi: 3.0.0\ninfo:\n  title: pets\n");
    let addr = start(&["--spec", &path]);

    let response = client()
        .get(format!("http://{}/api-docs/petstore.yaml", addr))
        .send()
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/yaml");
    assert_eq!(
        response.text().unwrap(),
        "openapi: 3.0.0\ninfo:\n  title: pets\n"
    );

    let initializer = client()
        .get(format!("http://{}/api-docs/swagger-initializer.js", addr))
        .send()
        .unwrap()
        .text()
        .unwrap();
    assert!(initializer.contains("\"./petstore.yaml\""));
}

#[test]
fn test_base_path_handling() {
    let addr = start(&["--base-path", "/docs"]);

    let response = client()
        .get(format!("http://{}/docs", addr))
        .send()
        .unwrap();
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers()["location"], "/docs/");

    let response = client()
        .get(format!("http://{}/docs/", addr))
        .send()
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().unwrap().contains("<div id=\"swagger-ui\"></div>"));

    let response = client()
        .get(format!("http://{}/swagger.yaml", addr))
        .send()
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_range_and_conditional_requests() {
    let (_dir, path) = spec_file("api.json", "{\"openapi\":\"3.0.0\"}");
    let addr = start(&["--spec", &path]);
    let url = format!("http://{}/api-docs/api.json", addr);

    let response = client().get(&url).header("range", "bytes=1-9").send().unwrap();
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(response.headers()["content-range"], "bytes 1-9/19");
    assert_eq!(response.text().unwrap(), "\"openapi\"");

    let etag = client().get(&url).send().unwrap().headers()["etag"].clone();
    let response = client()
        .get(&url)
        .header("if-none-match", etag)
        .send()
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
}

#[test]
fn test_head_request() {
    let (_dir, path) = spec_file("api.yaml", "a: b\n");
    let addr = start(&["--spec", &path]);

    let response = client()
        .head(format!("http://{}/api-docs/api.yaml", addr))
        .send()
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-length"], "5");
    assert!(response.bytes().unwrap().is_empty());
}

#[test]
fn test_post_is_rejected() {
    let addr = start(&[]);
    let response = client()
        .post(format!("http://{}/api-docs/swagger.yaml", addr))
        .body("x")
        .send()
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[test]
fn test_invalid_spec_fails_to_start() {
    let (_dir, path) = spec_file("api.yaml", "{\"this\":\"is json\"}");
    let args = Args::parse_from(["swaggerui-serve", "--listen", "127.0.0.1:0", "--spec", &path]);

    match App::bind(&args) {
        Err(CliError::Setup(e)) => {
            assert!(e.to_string().starts_with("setting up swagger-ui: invalid options: "));
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("invalid spec was accepted"),
    }
}

#[test]
fn test_custom_initializer_file() {
    let content = format!("{:<300}", "window.onload = function () {};");
    let (_dir, init) = spec_file("init.js", &content);
    let addr = start(&["--initializer", &init]);

    let body = client()
        .get(format!("http://{}/api-docs/swagger-initializer.js", addr))
        .send()
        .unwrap()
        .text()
        .unwrap();
    assert_eq!(body, content);
}
