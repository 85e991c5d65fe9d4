//! The generated `swagger-initializer.js`.

/// Name of the bootstrap script inside the bundle.
pub const INITIALIZER_FILENAME: &str = "swagger-initializer.js";

const URL_PLACEHOLDER: &str = "{{url}}";

/// The stock initializer with the spec URL swapped for a placeholder.
pub const INITIALIZER_TEMPLATE: &str = r#"
window.onload = function () {
  //<editor-fold desc="Changeable Configuration Block">

  // the following lines will be replaced by docker/configurator, when it runs in a docker-container
  window.ui = SwaggerUIBundle({
    url: {{url}},
    dom_id: '#swagger-ui',
    deepLinking: true,
    presets: [
      SwaggerUIBundle.presets.apis,
      SwaggerUIStandalonePreset
    ],
    plugins: [
      SwaggerUIBundle.plugins.DownloadUrl
    ],
    layout: "StandaloneLayout"
  });

  //</editor-fold>
};
"#;

/// URL the UI fetches the spec from.
///
/// Relative to the page when there is no prefix, so the UI works wherever
/// it is mounted.
pub fn spec_url(filename: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        format!("./{}", filename)
    } else {
        format!("{}/{}", prefix, filename)
    }
}

/// Render the initializer pointing the UI at `filename` under `prefix`.
///
/// The URL is written as a JSON string literal, which is also a valid
/// JavaScript one.
pub fn render(filename: &str, prefix: &str) -> String {
    let url = serde_json::Value::String(spec_url(filename, prefix)).to_string();
    INITIALIZER_TEMPLATE.replacen(URL_PLACEHOLDER, &url, 1)
}
