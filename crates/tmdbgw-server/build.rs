#![allow(missing_docs)]
#![allow(clippy::print_stdout)] // build scripts talk to cargo through stdout

use std::process::Command;

fn main() {
    let git_hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|hash| String::from(hash.trim()))
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| String::from("unknown"));

    println!("cargo:rustc-env=GIT_HASH={git_hash}");
}
