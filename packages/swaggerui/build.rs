//! Checks that the embedded swagger-ui distribution is complete.
//!
//! The large upstream files are not kept in the repository; run
//! `scripts/fetch-swagger-ui.sh` to download them into `assets/`.
//! Debug builds only warn when they are missing so the crate can be
//! developed and tested without them. Release builds refuse to embed an
//! incomplete distribution unless `SWAGGERUI_ALLOW_INCOMPLETE_DIST` is set.

use std::env;
use std::path::Path;

/// Upstream files the stock `index.html` loads. Kept in step with
/// `swaggerui::assets::DIST_FILES`.
const DIST_FILES: &[&str] = &[
    "swagger-ui-bundle.js",
    "swagger-ui-standalone-preset.js",
    "swagger-ui.css",
    "favicon-16x16.png",
    "favicon-32x32.png",
    "oauth2-redirect.html",
];

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let dist_dir = Path::new(&manifest_dir).join("assets/swagger-ui/dist");

    println!("cargo:rerun-if-changed={}", dist_dir.display());
    println!("cargo:rerun-if-env-changed=SWAGGERUI_ALLOW_INCOMPLETE_DIST");

    let missing: Vec<&str> = DIST_FILES
        .iter()
        .copied()
        .filter(|name| !dist_dir.join(name).is_file())
        .collect();
    if missing.is_empty() {
        return;
    }

    let message = format!(
        "swagger-ui distribution in {} is missing {}; run scripts/fetch-swagger-ui.sh",
        dist_dir.display(),
        missing.join(", ")
    );

    let release = env::var("PROFILE").map(|p| p == "release").unwrap_or(false);
    if release && env::var_os("SWAGGERUI_ALLOW_INCOMPLETE_DIST").is_none() {
        panic!(
            "{} (or set SWAGGERUI_ALLOW_INCOMPLETE_DIST=1 to embed it anyway)",
            message
        );
    }
    println!("cargo:warning={}", message);
}
