//! Read helpers with size limits

use std::fs;

use crate::{Error, NormalizedPath, Result};

/// Upper bound for any configuration or builds file (1 MiB).
pub const MAX_CONFIG_SIZE: u64 = 1024 * 1024;

/// Read text content from a file, refusing files over [`MAX_CONFIG_SIZE`].
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    let metadata = fs::metadata(&native_path).map_err(|e| Error::io(&native_path, e))?;
    if metadata.len() > MAX_CONFIG_SIZE {
        return Err(Error::TooLarge {
            path: native_path,
            size: metadata.len(),
            max: MAX_CONFIG_SIZE,
        });
    }
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Resolve a directory to its canonical absolute form.
///
/// Uses `dunce` so Windows paths do not come back in `\\?\` form, which
/// would never match the paths a watcher reports.
pub fn canonicalize(path: &NormalizedPath) -> Result<NormalizedPath> {
    let native_path = path.to_native();
    let resolved = dunce::canonicalize(&native_path).map_err(|e| Error::io(&native_path, e))?;
    tracing::debug!(from = %path, to = %resolved.display(), "Canonicalized path");
    Ok(NormalizedPath::new(resolved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_missing_file_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path().join("missing.toml"));

        let err = read_text(&path).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_read_text_rejects_oversized_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("big.toml");
        std::fs::write(&file, vec![b'#'; (MAX_CONFIG_SIZE + 1) as usize]).unwrap();

        let err = read_text(&NormalizedPath::new(&file)).unwrap_err();
        assert!(matches!(err, Error::TooLarge { .. }));
    }
}
