//! Integration tests for the `kiln pack` and `kiln extract` commands.

mod common;

use common::kiln;
use kiln::archive::{ArchiveWriter, extract_text_entry};
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn write_file(dir: &Path, relative: &str, contents: &[u8]) {
    let path = dir.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, contents).unwrap();
}

/// A project fixture with compiled classes, a bundled library jar and a
/// manifest that packs both (expanding the library).
fn project_fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "build/classes/com/example/Main.class", b"main");
    write_file(tmp.path(), "build/classes/com/example/Helper.class", b"helper");

    let lib = tmp.path().join("libs/dep.jar");
    std::fs::create_dir_all(lib.parent().unwrap()).unwrap();
    let mut writer = ArchiveWriter::create(&lib).unwrap();
    writer.add_entry("vendor/Lib.class", None, &mut &b"lib"[..]).unwrap();
    writer.add_entry("META-INF/SIGNER.RSA", None, &mut &b"sig"[..]).unwrap();
    writer.finish().unwrap();

    write_file(
        tmp.path(),
        "kiln.toml",
        br#"
name = "demo"

[[archive]]
output = "build/libs/demo.jar"

[[archive.include]]
from = "build/classes"
patterns = ["**"]

[[archive.include]]
from = "libs"
patterns = ["*.jar"]
expand = true
"#,
    );
    tmp
}

#[test]
fn pack_assembles_the_declared_archive() {
    let project = project_fixture();

    kiln()
        .current_dir(project.path())
        .arg("pack")
        .assert()
        .success()
        .stdout(predicate::str::contains("Packed"))
        .stdout(predicate::str::contains("demo.jar"));

    assert!(project.path().join("build/libs/demo.jar").is_file());
}

#[test]
fn pack_then_extract_round_trips_contents() {
    let project = project_fixture();

    kiln().current_dir(project.path()).arg("pack").assert().success();

    let dest = TempDir::new().unwrap();
    kiln()
        .current_dir(project.path())
        .arg("extract")
        .arg("build/libs/demo.jar")
        .arg(dest.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracted"));

    // Classes from the class tree, with the prefix stripped.
    assert_eq!(
        std::fs::read(dest.path().join("com/example/Main.class")).unwrap(),
        b"main"
    );
    assert_eq!(
        std::fs::read(dest.path().join("com/example/Helper.class")).unwrap(),
        b"helper"
    );
    // The library jar was expanded, minus its signature file.
    assert_eq!(std::fs::read(dest.path().join("vendor/Lib.class")).unwrap(), b"lib");
    assert!(!dest.path().join("META-INF/SIGNER.RSA").exists());
    assert!(!dest.path().join("dep.jar").exists());
}

#[test]
fn pack_honors_an_explicit_manifest_path() {
    let project = project_fixture();

    kiln()
        .arg("--manifest-path")
        .arg(project.path().join("kiln.toml"))
        .arg("pack")
        .assert()
        .success();

    let jar = project.path().join("build/libs/demo.jar");
    assert!(jar.is_file());
    // Spot-check one entry without extracting everything.
    assert!(extract_text_entry(&jar, "com/example/Main.class").unwrap().is_some());
}

#[test]
fn pack_without_a_manifest_fails() {
    let empty = TempDir::new().unwrap();

    kiln()
        .current_dir(empty.path())
        .arg("pack")
        .assert()
        .failure()
        .stderr(predicate::str::contains("kiln.toml"));
}

#[test]
fn pack_fails_on_missing_literal_sources() {
    let tmp = TempDir::new().unwrap();
    write_file(
        tmp.path(),
        "kiln.toml",
        br#"
name = "broken"

[[archive]]
output = "out.jar"

[[archive.include]]
patterns = ["absent.txt"]
"#,
    );

    kiln()
        .current_dir(tmp.path())
        .arg("pack")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing source file"));
}
