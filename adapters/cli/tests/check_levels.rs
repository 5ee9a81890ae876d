use std::{io::Write, process::Command};

fn run_check(contents: &str) -> std::process::Output {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write levels");

    Command::new(env!("CARGO_BIN_EXE_platformer"))
        .arg("--check")
        .arg("--levels")
        .arg(file.path())
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run the platformer binary")
}

#[test]
fn check_summarises_every_level() {
    let output = run_check("; test catalog\n5-|-@*&E|5#.\n4-|-@E-|4#.\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("level 1: 5x3 cells, 1 coins, 1 enemies, 1 exits"));
    assert!(stdout.contains("2 levels ok"));
}

#[test]
fn check_fails_on_undecodable_levels() {
    let output = run_check("3#.\n#?#.\n");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("level catalog is invalid"));
}

#[test]
fn bundled_levels_are_valid() {
    let output = Command::new(env!("CARGO_BIN_EXE_platformer"))
        .current_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/../.."))
        .arg("--check")
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run the platformer binary");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("levels ok"));
}
