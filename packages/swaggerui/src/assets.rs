//! The swagger-ui distribution embedded at build time.

use include_dir::{include_dir, Dir};

/// Directory inside [`ASSETS`] that holds the servable files.
pub const BUNDLE_ROOT: &str = "swagger-ui/dist";

/// Upstream files under [`BUNDLE_ROOT`] that the stock `index.html` loads.
///
/// They are fetched by `scripts/fetch-swagger-ui.sh` rather than kept in
/// the repository. The build script warns when any is absent and fails
/// release builds.
pub const DIST_FILES: &[&str] = &[
    "swagger-ui-bundle.js",
    "swagger-ui-standalone-preset.js",
    "swagger-ui.css",
    "favicon-16x16.png",
    "favicon-32x32.png",
    "oauth2-redirect.html",
];

/// Everything under the crate's `assets/` directory.
///
/// `scripts/fetch-swagger-ui.sh` refreshes the JavaScript and CSS bundles
/// from an upstream swagger-ui release.
pub static ASSETS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// Entries of [`DIST_FILES`] that were not embedded.
pub fn missing_dist_files() -> Vec<&'static str> {
    DIST_FILES
        .iter()
        .copied()
        .filter(|name| ASSETS.get_file(format!("{}/{}", BUNDLE_ROOT, name)).is_none())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_in_files_are_embedded() {
        for name in ["index.html", "index.css", "swagger-initializer.js"] {
            assert!(
                ASSETS.get_file(format!("{}/{}", BUNDLE_ROOT, name)).is_some(),
                "{}",
                name
            );
        }
    }

    #[test]
    fn missing_files_are_a_subset_of_dist_files() {
        let missing = missing_dist_files();
        assert!(missing.iter().all(|name| DIST_FILES.contains(name)));
    }
}
