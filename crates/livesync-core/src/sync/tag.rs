//! Tag resolution

use livesync_meta::BuildArtifact;

/// Tag of the first build whose image name equals `image`.
///
/// Later builds with the same image name are ignored.
pub fn latest_tag<'a>(image: &str, builds: &'a [BuildArtifact]) -> Option<&'a str> {
    builds
        .iter()
        .find(|build| build.image_name == image)
        .map(|build| build.tag.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins() {
        let builds = vec![
            BuildArtifact::new("db", "db:1"),
            BuildArtifact::new("app", "app:new"),
            BuildArtifact::new("app", "app:old"),
        ];
        assert_eq!(latest_tag("app", &builds), Some("app:new"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(latest_tag("app", &[BuildArtifact::new("db", "db:1")]), None);
    }
}
