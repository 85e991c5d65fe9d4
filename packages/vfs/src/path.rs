//! Slash-separated relative path type used by every filesystem layer.

use std::fmt;

/// Paths longer than this are rejected outright.
const MAX_PATH_BYTES: usize = 4096;

/// Errors related to path parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// A path component is not usable as a file name.
    #[error("invalid path component '{component}' at position {position}: {message}")]
    InvalidComponent {
        component: String,
        position: usize,
        message: String,
    },
    /// The path string is invalid.
    #[error("invalid path: {message}")]
    InvalidPath { message: String },
}

/// A validated, relative path inside a virtual filesystem.
///
/// The empty path is the root directory. Components never contain `/`,
/// `\` or NUL, and are never `.` or `..`, so a `Path` cannot escape the
/// root it is resolved against.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path {
    pub components: Vec<String>,
}

impl Path {
    /// The root directory.
    pub fn root() -> Self {
        Path::default()
    }

    /// Parse a path string strictly.
    ///
    /// # Path Syntax
    ///
    /// - Components are separated by `/`
    /// - Empty components and `.` are ignored (normalizes `//`, `./` and
    ///   leading or trailing `/`)
    /// - `..` is rejected; use [`Path::clean`] for lexical resolution
    ///
    /// # Examples
    ///
    /// ```rust
    /// use swaggerui_vfs::Path;
    ///
    /// let path = Path::parse("css/index.css").unwrap();
    /// assert_eq!(path.len(), 2);
    ///
    /// assert_eq!(Path::parse("./a/b/").unwrap(), Path::parse("a/b").unwrap());
    /// assert!(Path::parse("../etc/passwd").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, PathError> {
        Self::check_length(s)?;

        let components: Vec<String> = s
            .split('/')
            .filter(|c| !c.is_empty() && *c != ".")
            .map(|c| c.to_string())
            .collect();

        for (i, component) in components.iter().enumerate() {
            Self::validate_component(component, i)?;
        }

        Ok(Path { components })
    }

    /// Lexically clean a path string the way a URL path is cleaned.
    ///
    /// `..` removes the preceding component and is dropped at the root, so
    /// `/../../a` cleans to `a`. The remaining components are validated like
    /// [`Path::parse`].
    ///
    /// ```rust
    /// use swaggerui_vfs::Path;
    ///
    /// assert_eq!(Path::clean("/a/b/../c").unwrap(), Path::parse("a/c").unwrap());
    /// assert!(Path::clean("/../..").unwrap().is_empty());
    /// ```
    pub fn clean(s: &str) -> Result<Self, PathError> {
        Self::check_length(s)?;

        let mut components: Vec<String> = Vec::new();
        for component in s.split('/') {
            match component {
                "" | "." => {}
                ".." => {
                    components.pop();
                }
                other => components.push(other.to_string()),
            }
        }

        for (i, component) in components.iter().enumerate() {
            Self::validate_component(component, i)?;
        }

        Ok(Path { components })
    }

    fn check_length(s: &str) -> Result<(), PathError> {
        if s.len() > MAX_PATH_BYTES {
            return Err(PathError::InvalidPath {
                message: format!("path is {} bytes, limit is {}", s.len(), MAX_PATH_BYTES),
            });
        }
        Ok(())
    }

    /// Validate a single path component.
    fn validate_component(component: &str, position: usize) -> Result<(), PathError> {
        let invalid = |message: &str| PathError::InvalidComponent {
            component: component.to_string(),
            position,
            message: message.to_string(),
        };

        if component.is_empty() {
            return Err(invalid("empty component"));
        }
        if component == "." || component == ".." {
            return Err(invalid("relative components are not allowed"));
        }
        if let Some(c) = component.chars().find(|c| matches!(c, '/' | '\\' | '\0')) {
            return Err(invalid(&format!("invalid character {:?} in file name", c)));
        }

        Ok(())
    }

    /// Check if this path is empty (root path).
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Get the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Iterate over components.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.components.iter()
    }

    /// The last component, or `None` for the root.
    pub fn file_name(&self) -> Option<&str> {
        self.components.last().map(String::as_str)
    }

    /// Extension of the last component, without the dot.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(0) | None => None,
            Some(i) => Some(&name[i + 1..]),
        }
    }

    /// Join this path with another.
    #[must_use]
    pub fn join(&self, other: &Path) -> Path {
        let mut components = self.components.clone();
        components.extend(other.components.iter().cloned());
        Path { components }
    }

    /// Get a slice of components as a new path.
    pub fn slice(&self, start: usize, end: usize) -> Path {
        Path {
            components: self.components[start..end].to_vec(),
        }
    }

    /// Proper ancestors from the top down, excluding the root and the path itself.
    pub fn ancestors(&self) -> impl Iterator<Item = Path> + '_ {
        (1..self.len()).map(move |end| self.slice(0, end))
    }
}

/// The root displays as `.`, everything else as its slash-joined components.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, ".")
        } else {
            write!(f, "{}", self.components.join("/"))
        }
    }
}

/// Macro for creating paths from literals.
///
/// # Example
///
/// ```rust
/// use swaggerui_vfs::path;
///
/// let p = path!("swagger-ui/dist/index.html");
/// assert_eq!(p.len(), 3);
/// ```
#[macro_export]
macro_rules! path {
    ($s:expr) => {
        $crate::Path::parse($s).expect("invalid path literal")
    };
}
