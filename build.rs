//! Build script for release-pull-request: stamps `BUILD_INFO_HUMAN`.
//!
//! The string is `<crate version> (<git describe>) built <date>`. When the
//! checkout has no tags, `git describe --always` yields a bare commit hash,
//! which is still useful when reporting problems. Outside a git checkout the
//! describe part is omitted.

use std::process::Command;

use chrono::Utc;

fn main() {
    for path in ["src", "build.rs", "Cargo.toml"] {
        println!("cargo:rerun-if-changed={path}");
    }

    println!("cargo:rustc-env=BUILD_INFO_HUMAN={}", build_info());
}

fn git_describe() -> Option<String> {
    Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn build_info() -> String {
    let built = Utc::now().format("%Y-%m-%d");
    match git_describe() {
        Some(describe) => format!(
            "{} ({describe}) built {built}",
            env!("CARGO_PKG_VERSION")
        ),
        None => format!("{} built {built}", env!("CARGO_PKG_VERSION")),
    }
}
