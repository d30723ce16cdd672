use reward_purge::canonicalize_or_current;
use tempfile::tempdir;

#[test]
fn canonicalize_or_current_returns_cwd_for_dot() {
    let resolved = canonicalize_or_current(".").expect("resolve dot");
    assert_eq!(resolved, std::env::current_dir().expect("cwd"));
}

#[test]
fn canonicalize_or_current_resolves_existing_absolute_paths() {
    let tmp = tempdir().expect("tempdir");
    let resolved =
        canonicalize_or_current(&tmp.path().to_string_lossy()).expect("resolve absolute");
    assert_eq!(resolved, tmp.path().canonicalize().expect("canonicalize tmp"));
}

#[test]
fn canonicalize_or_current_joins_missing_paths_with_cwd() {
    let resolved = canonicalize_or_current("no-such-dir-for-purge").expect("resolve missing");
    assert!(resolved.is_absolute());
    assert!(resolved.ends_with("no-such-dir-for-purge"));
}
