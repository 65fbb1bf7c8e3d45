//! Normalized path handling for host and container paths
//!
//! Container paths are always POSIX, and host paths are compared lexically
//! against the workspace root, so both are kept with forward slashes and
//! cleaned the same way.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A path normalized to use forward slashes internally.
///
/// Backslashes are converted on construction. The path is otherwise kept as
/// given; use [`NormalizedPath::cleaned`] for the lexically shortest form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }

    /// Lexically cleaned copy of this path (see [`clean`]).
    pub fn cleaned(&self) -> Self {
        Self {
            inner: clean(&self.inner),
        }
    }

    /// Whether the path is rooted at `/`.
    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/')
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next()
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// Express this path relative to `base`, lexically.
    ///
    /// Both paths are cleaned first. The result may start with `../` when
    /// this path lies outside `base`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotRelative`] when exactly one of the two paths is
    /// absolute, or when `base` climbs above a point `self` can be reached
    /// from (for example a base of `../x`).
    pub fn relative_to(&self, base: &NormalizedPath) -> Result<String> {
        let base_clean = clean(base.as_str());
        let target_clean = clean(self.as_str());
        if base_clean == target_clean {
            return Ok(".".to_string());
        }

        let not_relative = || Error::NotRelative {
            base: base.to_string(),
            target: self.to_string(),
        };

        if base_clean.starts_with('/') != target_clean.starts_with('/') {
            return Err(not_relative());
        }

        let base_parts = segments(&base_clean);
        let target_parts = segments(&target_clean);
        let common = base_parts
            .iter()
            .zip(&target_parts)
            .take_while(|(b, t)| b == t)
            .count();

        let rest_base = &base_parts[common..];
        if rest_base.contains(&"..") {
            return Err(not_relative());
        }

        let mut relative: Vec<&str> = vec![".."; rest_base.len()];
        relative.extend_from_slice(&target_parts[common..]);
        Ok(relative.join("/"))
    }
}

fn segments(cleaned: &str) -> Vec<&str> {
    cleaned
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

/// Return the lexically shortest path equivalent to `path`.
///
/// Repeated slashes and `.` segments are dropped, `..` consumes the segment
/// before it, and `..` directly under the root is discarded. An empty result
/// becomes `.`.
pub fn clean(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut out: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if out.last().is_some_and(|last| *last != "..") {
                    out.pop();
                } else if !rooted {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }

    let joined = out.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Join the non-empty segments with `/` and clean the result.
///
/// Returns an empty string when every segment is empty.
pub fn join_segments(segments: &[&str]) -> String {
    let present: Vec<&str> = segments.iter().copied().filter(|s| !s.is_empty()).collect();
    if present.is_empty() {
        return String::new();
    }
    clean(&present.join("/"))
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_root_parent_is_dropped() {
        assert_eq!(clean("/.."), "/");
        assert_eq!(clean("/../a"), "/a");
    }

    #[test]
    fn test_join_segments_skips_empty() {
        assert_eq!(join_segments(&["", "/app", "a/b.js"]), "/app/a/b.js");
        assert_eq!(join_segments(&["", ""]), "");
    }

    #[test]
    fn test_relative_to_mixed_absolute_is_error() {
        let target = NormalizedPath::new("/abs/file");
        let base = NormalizedPath::new("rel");
        assert!(target.relative_to(&base).is_err());
    }
}
