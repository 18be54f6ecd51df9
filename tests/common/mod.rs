//! Shared fixtures for kiln integration tests.
#![allow(dead_code)] // not every test binary uses every helper

use std::path::Path;

/// Publish a pinned coordinate into a Maven-layout fixture repository,
/// optionally with sidecar dependency metadata.
pub fn publish(root: &Path, coordinate: &str, metadata: Option<&str>) {
    let mut segments = coordinate.split(':');
    let group = segments.next().expect("group");
    let artifact = segments.next().expect("artifact");
    let version = segments.next().expect("fixture coordinates are pinned");

    let dir = root.join(group.replace('.', "/")).join(artifact).join(version);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(format!("{artifact}-{version}.jar")), b"jar-bytes").unwrap();
    if let Some(text) = metadata {
        std::fs::write(dir.join("dependencies.toml"), text).unwrap();
    }
}

/// A `kiln` command with a clean environment.
pub fn kiln() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("kiln").unwrap()
}
