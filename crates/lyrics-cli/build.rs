use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn main() {
    let commit = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_string());

    // Tracked-file changes only; untracked files do not mark the build dirty.
    let dirty = Command::new("git")
        .args(["diff", "--quiet", "HEAD"])
        .status()
        .is_ok_and(|s| !s.success());

    let build_hash = if dirty {
        format!("{commit}-dirty-{}", chrono::Local::now().format("%Y%m%d-%H%M%S"))
    } else {
        commit
    };
    println!("cargo:rustc-env=BUILD_HASH={build_hash}");

    // Workspace root holds .git, two levels up.
    for path in ["../../.git/HEAD", "../../.git/index"] {
        println!("cargo:rerun-if-changed={path}");
    }
}
