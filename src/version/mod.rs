//! Build and runtime version report
//!
//! Metadata is embedded by `build.rs` at compile time; whatever it could
//! not discover is filled in from the running process. The report is
//! collected once and never changes afterwards.

use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Placeholder for any property that could not be determined
pub const UNKNOWN_PROPERTY: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub rust_version: String,
    pub git_commit: String,
    pub git_commit_date: String,
    pub build_date: String,
    pub git_tag: String,
    pub platform: String,
}

static INFO: OnceLock<VersionInfo> = OnceLock::new();

/// Version information for this binary, collected on first use
pub fn info() -> &'static VersionInfo {
    INFO.get_or_init(|| {
        let mut info = VersionInfo::unknown();
        info.collect_from_build();
        info.collect_from_runtime();
        info
    })
}

impl VersionInfo {
    /// Every property set to [`UNKNOWN_PROPERTY`]
    pub fn unknown() -> Self {
        Self {
            rust_version: UNKNOWN_PROPERTY.to_string(),
            git_commit: UNKNOWN_PROPERTY.to_string(),
            git_commit_date: UNKNOWN_PROPERTY.to_string(),
            build_date: UNKNOWN_PROPERTY.to_string(),
            git_tag: UNKNOWN_PROPERTY.to_string(),
            platform: UNKNOWN_PROPERTY.to_string(),
        }
    }

    fn collect_from_build(&mut self) {
        fill(
            &mut self.rust_version,
            option_env!("HTTP_TRACER_RUSTC_VERSION"),
        );
        fill(&mut self.git_commit, option_env!("HTTP_TRACER_GIT_COMMIT"));
        fill(
            &mut self.git_commit_date,
            option_env!("HTTP_TRACER_GIT_COMMIT_DATE"),
        );
        fill(&mut self.build_date, option_env!("HTTP_TRACER_BUILD_DATE"));
        fill(&mut self.git_tag, option_env!("HTTP_TRACER_GIT_TAG"));
    }

    fn collect_from_runtime(&mut self) {
        let platform = format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH);
        fill(&mut self.platform, Some(platform.as_str()));
    }
}

/// Set `slot` to `value` unless it already holds something or `value` is empty
fn fill(slot: &mut String, value: Option<&str>) {
    if *slot != UNKNOWN_PROPERTY {
        return;
    }
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        *slot = value.to_string();
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rust version:\t{}", self.rust_version)?;
        writeln!(f, "Git commit:\t{}", self.git_commit)?;
        writeln!(f, "Commit date:\t{}", self.git_commit_date)?;
        writeln!(f, "Built date:\t{}", self.build_date)?;
        writeln!(f, "Git tag:\t{}", self.git_tag)?;
        writeln!(f, "OS/Arch:\t{}", self.platform)
    }
}

/// Print the version report to stdout
pub fn print() {
    print!("{}", info());
}

/// True when the first argument after the program name is `version` or `--version`
pub fn is_version_request<I, S>(args: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let first = args.into_iter().nth(1);
    matches!(first.as_ref().map(|s| s.as_ref()), Some("version" | "--version"))
}

/// Print the report and exit with status 0 if the process was started
/// with `version` or `--version`
pub fn exit_if_requested() {
    if is_version_request(std::env::args()) {
        print();
        std::process::exit(0);
    }
}
