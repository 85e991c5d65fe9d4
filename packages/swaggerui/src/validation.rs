//! Checks on handler options, run before anything is built.
//!
//! Each rule is a pure predicate. [`validate`] runs all of them and reports
//! every failure at once, so a caller fixing their options sees the whole
//! list rather than one problem per attempt.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::de::IgnoredAny;
use serde::Deserialize;

/// Shortest accepted initializer: the minified stock `swagger-initializer.js`.
pub const MIN_INITIALIZER_LEN: usize = 249;

/// Longest accepted initializer.
pub const MAX_INITIALIZER_LEN: usize = 16384;

/// Longest accepted spec filename, in characters.
pub const MAX_FILENAME_LEN: usize = 255;

lazy_static! {
    static ref SPEC_FILENAME: Regex = Regex::new(r"(?i)\.(ya?ml|json)$").unwrap();
}

/// The document format a spec filename promises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclaredFormat {
    Yaml,
    Json,
}

impl DeclaredFormat {
    /// Derive the format from the extension, ignoring case.
    ///
    /// `None` when the extension is neither `.yaml`, `.yml` nor `.json`.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let captures = SPEC_FILENAME.captures(filename)?;
        if captures[1].eq_ignore_ascii_case("json") {
            Some(DeclaredFormat::Json)
        } else {
            Some(DeclaredFormat::Yaml)
        }
    }
}

impl fmt::Display for DeclaredFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredFormat::Yaml => write!(f, "YAML"),
            DeclaredFormat::Json => write!(f, "JSON"),
        }
    }
}

/// A single rule an option failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFailure {
    #[error("spec filename must be 1 to {max} characters long, got {len}", max = MAX_FILENAME_LEN)]
    FilenameLength { len: usize },

    #[error("spec filename {filename:?} must end in .yaml, .yml or .json")]
    UnsupportedExtension { filename: String },

    #[error("spec content of {filename:?} is not valid {format}: {message}")]
    MalformedContent {
        filename: String,
        format: DeclaredFormat,
        message: String,
    },

    /// YAML is a superset of JSON; a `.yaml` name still has to hold YAML proper.
    #[error("spec content of {filename:?} is JSON, but the filename declares YAML")]
    JsonDeclaredAsYaml { filename: String },

    #[error("initializer content must be at least {min} bytes, got {len}", min = MIN_INITIALIZER_LEN)]
    InitializerTooShort { len: usize },

    #[error("initializer content must be at most {max} bytes, got {len}", max = MAX_INITIALIZER_LEN)]
    InitializerTooLong { len: usize },
}

/// Every rule that failed, in the order the rules ran. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationFailure>);

impl ValidationErrors {
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationFailure> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<ValidationFailure> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationFailure;
    type IntoIter = std::slice::Iter<'a, ValidationFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// True when the filename ends in `.yaml`, `.yml` or `.json`, in any case.
pub fn is_accepted_filename(filename: &str) -> bool {
    DeclaredFormat::from_filename(filename).is_some()
}

/// True when `payload` is a well-formed document of the format `filename` declares.
pub fn is_well_formed_content(filename: &str, payload: &[u8]) -> bool {
    match DeclaredFormat::from_filename(filename) {
        Some(format) => check_content(filename, format, payload).is_ok(),
        None => false,
    }
}

/// True when the initializer is within the accepted length bounds.
pub fn is_bootstrap_length_valid(payload: &[u8]) -> bool {
    (MIN_INITIALIZER_LEN..=MAX_INITIALIZER_LEN).contains(&payload.len())
}

/// Check `payload` against a declared format.
pub fn check_content(
    filename: &str,
    format: DeclaredFormat,
    payload: &[u8],
) -> Result<(), ValidationFailure> {
    let malformed = |message: String| ValidationFailure::MalformedContent {
        filename: filename.to_string(),
        format,
        message,
    };

    match format {
        DeclaredFormat::Json => json_syntax(payload).map_err(|e| malformed(e.to_string())),
        DeclaredFormat::Yaml => {
            for document in serde_yaml::Deserializer::from_slice(payload) {
                serde_yaml::Value::deserialize(document).map_err(|e| malformed(e.to_string()))?;
            }
            if is_json(payload) {
                return Err(ValidationFailure::JsonDeclaredAsYaml {
                    filename: filename.to_string(),
                });
            }
            Ok(())
        }
    }
}

fn is_json(payload: &[u8]) -> bool {
    json_syntax(payload).is_ok()
}

/// Parse `payload` as one JSON value, however deeply nested.
fn json_syntax(payload: &[u8]) -> Result<(), serde_json::Error> {
    let mut de = serde_json::Deserializer::from_slice(payload);
    de.disable_recursion_limit();
    IgnoredAny::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()
}

/// Run every rule and collect the failures.
///
/// Empty spec content is exempt from the content rule: with no spec given,
/// the handler serves an empty document under the default name. The content
/// rule is skipped as well when the extension is unsupported, since there is
/// no declared format to check against.
pub fn validate(filename: &str, spec: &[u8], initializer: &[u8]) -> Result<(), ValidationErrors> {
    let mut failures = Vec::new();

    let filename_len = filename.chars().count();
    if filename_len == 0 || filename_len > MAX_FILENAME_LEN {
        failures.push(ValidationFailure::FilenameLength { len: filename_len });
    }

    match DeclaredFormat::from_filename(filename) {
        None => failures.push(ValidationFailure::UnsupportedExtension {
            filename: filename.to_string(),
        }),
        Some(format) if !spec.is_empty() => {
            if let Err(failure) = check_content(filename, format, spec) {
                failures.push(failure);
            }
        }
        Some(_) => {}
    }

    if initializer.len() < MIN_INITIALIZER_LEN {
        failures.push(ValidationFailure::InitializerTooShort {
            len: initializer.len(),
        });
    } else if initializer.len() > MAX_INITIALIZER_LEN {
        failures.push(ValidationFailure::InitializerTooLong {
            len: initializer.len(),
        });
    }

    if failures.is_empty() {
        Ok(())
    } else {
        log::debug!("rejecting handler options: {} rule(s) failed", failures.len());
        Err(ValidationErrors(failures))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn json_value() -> impl Strategy<Value = serde_json::Value> {
        let leaf = prop_oneof![
            Just(serde_json::Value::Null),
            any::<bool>().prop_map(serde_json::Value::from),
            any::<i64>().prop_map(serde_json::Value::from),
            "[a-z ]{0,8}".prop_map(serde_json::Value::from),
        ];
        leaf.prop_recursive(4, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::from),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                    .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        /// The extension decides the format whatever its case.
        #[test]
        fn prop_extension_case_is_ignored(
            stem in "[a-zA-Z0-9_-]{1,20}",
            ext in "[yY][aA][mM][lL]|[yY][mM][lL]|[jJ][sS][oO][nN]",
        ) {
            let filename = format!("{}.{}", stem, ext);
            let expected = if ext.eq_ignore_ascii_case("json") {
                DeclaredFormat::Json
            } else {
                DeclaredFormat::Yaml
            };
            prop_assert!(is_accepted_filename(&filename));
            prop_assert_eq!(DeclaredFormat::from_filename(&filename), Some(expected));
        }

        /// Anything else is refused.
        #[test]
        fn prop_other_extensions_are_rejected(
            stem in "[a-zA-Z0-9_-]{1,20}",
            ext in "[a-zA-Z0-9]{1,6}",
        ) {
            let lower = ext.to_ascii_lowercase();
            prop_assume!(!matches!(lower.as_str(), "yaml" | "yml" | "json"));
            let name = format!("{}.{}", stem, ext);
            prop_assert!(!is_accepted_filename(&name));
        }

        /// Serialized JSON is accepted under a .json name and refused under a YAML name.
        #[test]
        fn prop_json_is_json_and_never_yaml(value in json_value()) {
            let text = serde_json::to_vec(&value).unwrap();
            prop_assert!(is_well_formed_content("spec.json", &text));
            prop_assert!(!is_well_formed_content("spec.yaml", &text));
            prop_assert!(!is_well_formed_content("spec.yml", &text));
        }

        /// Accepted lengths are exactly the closed bounds.
        #[test]
        fn prop_bootstrap_length_boundary(len in 0usize..20000) {
            prop_assert_eq!(
                is_bootstrap_length_valid(&vec![b' '; len]),
                (MIN_INITIALIZER_LEN..=MAX_INITIALIZER_LEN).contains(&len)
            );
        }
    }
}
