use std::process::Command;

/// Run a command and return its trimmed stdout, or `None` on any failure
fn capture(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8(output.stdout).ok()?.trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Emit `key` for the crate, keeping a value already present in the build environment
fn emit(key: &str, discovered: Option<String>) {
    println!("cargo:rerun-if-env-changed={}", key);
    let value = std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .or(discovered);
    if let Some(value) = value {
        println!("cargo:rustc-env={}={}", key, value);
    }
}

fn main() {
    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());

    emit("HTTP_TRACER_GIT_COMMIT", capture("git", &["rev-parse", "HEAD"]));
    emit(
        "HTTP_TRACER_GIT_COMMIT_DATE",
        capture("git", &["log", "-1", "--format=%cI"]),
    );
    emit(
        "HTTP_TRACER_GIT_TAG",
        capture("git", &["describe", "--tags", "--exact-match"]),
    );
    emit(
        "HTTP_TRACER_BUILD_DATE",
        Some(chrono::Utc::now().to_rfc3339()),
    );
    emit("HTTP_TRACER_RUSTC_VERSION", capture(&rustc, &["--version"]));

    println!("cargo:rerun-if-changed=build.rs");
}
