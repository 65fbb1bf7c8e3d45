//! Validation for artifacts and sync rules

use crate::config::ArtifactConfig;
use crate::error::{Error, Result};
use crate::pattern::compile_pattern;

/// Validate one artifact: image name present, every rule complete and
/// every source pattern compilable.
pub fn validate_artifact(index: usize, artifact: &ArtifactConfig) -> Result<()> {
    if artifact.image.trim().is_empty() {
        return Err(Error::MissingImage { index });
    }

    for (rule_index, rule) in artifact.sync.iter().enumerate() {
        let invalid = |message: &str| Error::InvalidRule {
            image: artifact.image.clone(),
            rule: rule_index,
            message: message.to_string(),
        };

        if rule.src.trim().is_empty() {
            return Err(invalid("src must not be empty"));
        }
        if rule.dest.trim().is_empty() {
            return Err(invalid("dest must not be empty"));
        }

        compile_pattern(&rule.src).map_err(|e| Error::InvalidPattern {
            image: artifact.image.clone(),
            rule: rule_index,
            pattern: rule.src.clone(),
            message: e.to_string(),
        })?;
    }

    if !artifact.has_sync_rules() {
        tracing::debug!(image = %artifact.image, "Artifact declares no sync rules");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SyncRule;

    #[test]
    fn test_valid_artifact() {
        let artifact = ArtifactConfig::new("app", ".")
            .with_rule(SyncRule::new("src/**/*.js", "/app").with_strip("src/"));
        assert!(validate_artifact(0, &artifact).is_ok());
    }

    #[test]
    fn test_artifact_without_rules_is_valid() {
        assert!(validate_artifact(0, &ArtifactConfig::new("app", ".")).is_ok());
    }

    #[test]
    fn test_empty_image_rejected() {
        let err = validate_artifact(2, &ArtifactConfig::new(" ", ".")).unwrap_err();
        assert!(matches!(err, Error::MissingImage { index: 2 }));
    }

    #[test]
    fn test_empty_dest_rejected() {
        let artifact = ArtifactConfig::new("app", ".").with_rule(SyncRule::new("*.js", ""));
        let err = validate_artifact(0, &artifact).unwrap_err();
        assert!(err.to_string().contains("dest must not be empty"));
    }

    #[test]
    fn test_bad_pattern_names_rule() {
        let artifact = ArtifactConfig::new("app", ".")
            .with_rule(SyncRule::new("*.js", "/app"))
            .with_rule(SyncRule::new("[", "/app"));
        let err = validate_artifact(0, &artifact).unwrap_err();
        match err {
            Error::InvalidPattern { rule, pattern, .. } => {
                assert_eq!(rule, 1);
                assert_eq!(pattern, "[");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
