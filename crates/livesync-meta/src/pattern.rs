//! Glob semantics for sync rule sources
//!
//! `*` and `?` never cross a `/`; a `**` segment matches any number of
//! directories, including none, so `src/**/*.js` covers `src/a.js` as well
//! as `src/a/b/c.js`.

use globset::{GlobBuilder, GlobMatcher};

/// Compile a sync rule source pattern into a matcher.
pub fn compile_pattern(pattern: &str) -> Result<GlobMatcher, globset::Error> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .build()?;
    Ok(glob.compile_matcher())
}
