//! Rule matcher

use livesync_fs::join_segments;
use livesync_meta::{SyncRule, compile_pattern};

use crate::{Error, Result};

/// Compute every container destination for `rel_path`.
///
/// Rules are tried in declaration order and each matching rule contributes
/// exactly one destination, so the result may hold duplicates. A relative
/// `dest` is resolved against `container_wd`. When `rel_path` starts with
/// the rule's `strip` prefix that prefix is dropped; otherwise the whole
/// path is kept.
///
/// # Errors
///
/// Returns [`Error::Pattern`] for the first rule whose source is not a
/// valid glob; no destinations are returned in that case.
pub fn match_sync_rules(
    rules: &[SyncRule],
    rel_path: &str,
    container_wd: &str,
) -> Result<Vec<String>> {
    let mut destinations = Vec::with_capacity(1);
    for rule in rules {
        let matcher = compile_pattern(&rule.src).map_err(|source| Error::Pattern {
            path: rel_path.to_string(),
            pattern: rule.src.clone(),
            source,
        })?;

        if !matcher.is_match(rel_path) {
            continue;
        }

        let wd = if rule.dest.starts_with('/') {
            ""
        } else {
            container_wd
        };

        let sub_path = rel_path.strip_prefix(rule.strip.as_str()).unwrap_or(rel_path);
        destinations.push(join_segments(&[wd, &rule.dest, sub_path]));
    }
    Ok(destinations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_prefix_keeps_subdirectories() {
        let rules = vec![SyncRule::new("src/**/*.js", "/app").with_strip("src/")];
        let dsts = match_sync_rules(&rules, "src/a/b.js", "/home/app").unwrap();
        assert_eq!(dsts, vec!["/app/a/b.js"]);
    }

    #[test]
    fn test_relative_dest_uses_working_dir() {
        let rules = vec![SyncRule::new("**/*.txt", "dist")];
        let dsts = match_sync_rules(&rules, "x/y.txt", "/home/app").unwrap();
        assert_eq!(dsts, vec!["/home/app/dist/x/y.txt"]);
    }

    #[test]
    fn test_non_matching_strip_keeps_path() {
        let rules = vec![SyncRule::new("*.html", "/www").with_strip("static/")];
        let dsts = match_sync_rules(&rules, "index.html", "/").unwrap();
        assert_eq!(dsts, vec!["/www/index.html"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let rules = vec![SyncRule::new("*.js", "/app")];
        let dsts = match_sync_rules(&rules, "main.go", "/").unwrap();
        assert!(dsts.is_empty());
    }
}
