//! HTML directory listings.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use swaggerui_vfs::DirEntry;

/// Characters escaped in the `href` of a listing entry.
pub(crate) const HREF_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Render a `<pre>` listing of `entries`; directories get a trailing `/`.
pub fn render(entries: &[DirEntry]) -> String {
    let mut out = String::from("<!doctype html>\n<meta name=\"viewport\" content=\"width=device-width\">\n<pre>\n");
    for entry in entries {
        let mut name = entry.name.clone();
        if entry.is_dir() {
            name.push('/');
        }
        // A leading "./" keeps names containing ':' from being read as a URL scheme.
        let href = format!("./{}", utf8_percent_encode(&name, HREF_SET));
        out.push_str(&format!(
            "<a href=\"{}\">{}</a>\n",
            html_escape(&href),
            html_escape(&name)
        ));
    }
    out.push_str("</pre>\n");
    out
}

/// HTML-escape a string for safe insertion into HTML
pub fn html_escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(ch),
        }
    }
    result
}
