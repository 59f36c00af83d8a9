use std::fs;
use std::process::{Command, Output};

fn dirmatch(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dirmatch"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn sorted_lines(bytes: &[u8]) -> Vec<String> {
    let mut lines: Vec<String> = String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_owned)
        .collect();
    lines.sort();
    lines
}

fn sample_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in ["foo.txt", "bar.txt", "note.md"] {
        fs::write(dir.path().join(name), name).unwrap();
    }
    dir
}

#[test]
fn prints_matching_paths() {
    let dir = sample_dir();
    let root = dir.path().to_str().unwrap();

    let out = dirmatch(&[root, "*.txt"]);

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        sorted_lines(&out.stdout),
        vec![format!("{root}/bar.txt"), format!("{root}/foo.txt")]
    );
}

#[test]
fn no_matches_exits_zero_and_prints_nothing() {
    let dir = sample_dir();
    let out = dirmatch(&[dir.path().to_str().unwrap(), "*.log"]);

    assert_eq!(out.status.code(), Some(0));
    assert!(out.stdout.is_empty());
}

#[test]
fn missing_directory_exits_one_with_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");

    let out = dirmatch(&[missing.to_str().unwrap(), "*"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("cannot open directory"), "stderr: {stderr}");
}

#[test]
fn missing_pattern_prints_usage_and_exits_one() {
    let dir = sample_dir();
    let out = dirmatch(&[dir.path().to_str().unwrap()]);

    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Usage"), "stderr: {stderr}");
}

#[test]
fn extra_argument_is_a_usage_error() {
    let dir = sample_dir();
    let out = dirmatch(&[dir.path().to_str().unwrap(), "*", "extra"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}

#[test]
fn no_arguments_is_a_usage_error() {
    let out = dirmatch(&[]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn star_lists_dot_entries() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a"), "").unwrap();
    let root = dir.path().to_str().unwrap();

    let out = dirmatch(&[root, "*"]);

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        sorted_lines(&out.stdout),
        vec![format!("{root}/."), format!("{root}/.."), format!("{root}/a")]
    );
}

#[test]
fn directory_is_concatenated_verbatim() {
    let dir = sample_dir();
    let root = format!("{}/", dir.path().to_str().unwrap());

    let out = dirmatch(&[root.as_str(), "note.*"]);

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(sorted_lines(&out.stdout), vec![format!("{root}/note.md")]);
}

#[test]
fn help_exits_zero() {
    let out = dirmatch(&["--help"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("PATTERN"));
}

#[cfg(target_os = "linux")]
#[test]
fn non_utf8_names_are_printed_verbatim() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(OsStr::from_bytes(b"\xff.txt")), "").unwrap();
    let root = dir.path().to_str().unwrap();

    let out = dirmatch(&[root, "*.txt"]);

    assert_eq!(out.status.code(), Some(0));
    let mut expected = format!("{root}/").into_bytes();
    expected.extend_from_slice(b"\xff.txt\n");
    assert_eq!(out.stdout, expected);
}
