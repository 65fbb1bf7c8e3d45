use livesync_fs::{NormalizedPath, clean};
use proptest::prelude::*;
use rstest::rstest;

#[test]
fn test_normalize_backslashes_to_forward() {
    let path = NormalizedPath::new("foo\\bar\\baz");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[test]
fn test_join_paths() {
    let base = NormalizedPath::new("foo/bar");
    let joined = base.join("baz");
    assert_eq!(joined.as_str(), "foo/bar/baz");
}

#[test]
fn test_parent_and_file_name() {
    let path = NormalizedPath::new("foo/bar/baz.txt");
    assert_eq!(path.parent().unwrap().as_str(), "foo/bar");
    assert_eq!(path.file_name(), Some("baz.txt"));
    assert_eq!(path.extension(), Some("txt"));
}

#[test]
fn test_extension_ignores_dotfiles() {
    let path = NormalizedPath::new("config/.hidden");
    assert_eq!(path.extension(), None);
}

#[rstest]
#[case("", ".")]
#[case("a/../b", "b")]
#[case("../a", "../a")]
#[case("/a/b/../../c", "/c")]
#[case("a/./b//c", "a/b/c")]
#[case("a/b/", "a/b")]
#[case("/", "/")]
#[case("a/..", ".")]
fn test_clean(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(clean(input), expected);
}

#[rstest]
#[case("workspace", "workspace/src/a/b.js", "src/a/b.js")]
#[case("/home/me/app", "/home/me/app/index.html", "index.html")]
#[case("/home/me/app", "/home/me/app", ".")]
#[case("/home/me/app", "/home/me/other/x.txt", "../other/x.txt")]
#[case(".", "x/y.txt", "x/y.txt")]
#[case("./ws/", "ws/./lib/../main.go", "main.go")]
fn test_relative_to(#[case] base: &str, #[case] target: &str, #[case] expected: &str) {
    let rel = NormalizedPath::new(target)
        .relative_to(&NormalizedPath::new(base))
        .unwrap();
    assert_eq!(rel, expected);
}

#[rstest]
#[case("/abs/workspace", "relative/file.txt")]
#[case("relative", "/abs/file.txt")]
#[case("../outside", "inside/file.txt")]
fn test_relative_to_errors(#[case] base: &str, #[case] target: &str) {
    let err = NormalizedPath::new(target)
        .relative_to(&NormalizedPath::new(base))
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains(target), "error should name the path, got: {msg}");
    assert!(msg.contains(base), "error should name the base, got: {msg}");
}

proptest! {
    #[test]
    fn prop_clean_is_idempotent(path in "[a-z./]{0,24}") {
        let once = clean(&path);
        prop_assert_eq!(clean(&once), once);
    }

    #[test]
    fn prop_relative_to_inverts_join(
        base in "/[a-z]{1,4}(/[a-z]{1,4}){0,3}",
        rest in "[a-z]{1,4}(/[a-z]{1,4}){0,3}",
    ) {
        let target = NormalizedPath::new(&base).join(&rest);
        let rel = target.relative_to(&NormalizedPath::new(&base)).unwrap();
        prop_assert_eq!(rel, rest);
    }
}
