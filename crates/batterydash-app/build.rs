//! Stamps `BATTERYDASH_BUILD_ID` as `YYYY.MM.DD+g<short-sha>`, or
//! `YYYY.MM.DD+local` outside a git checkout. Packagers can pin the id by
//! exporting `BATTERYDASH_BUILD_ID` themselves.

use chrono::Utc;
use std::env;
use std::process::Command;

fn git_revision() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())?;

    let sha = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!sha.is_empty()).then(|| format!("g{sha}"))
}

fn build_id() -> String {
    if let Ok(pinned) = env::var("BATTERYDASH_BUILD_ID") {
        if !pinned.trim().is_empty() {
            return pinned;
        }
    }

    let date = Utc::now().format("%Y.%m.%d");
    let revision = git_revision().unwrap_or_else(|| "local".to_string());
    format!("{date}+{revision}")
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads");
    println!("cargo:rerun-if-env-changed=BATTERYDASH_BUILD_ID");

    println!("cargo:rustc-env=BATTERYDASH_BUILD_ID={}", build_id());
}
