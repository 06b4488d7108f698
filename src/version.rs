//! Version information.

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git commit SHA (short) if the build environment provided one.
pub const GIT_SHA: &str = match option_env!("SENTIMENTSYNC_GIT_SHA") {
    Some(sha) => sha,
    None => "unknown",
};

/// Full version string: `{version}` or `{version}+{sha}`.
pub fn version_string() -> String {
    if GIT_SHA == "unknown" {
        PKG_VERSION.to_string()
    } else {
        format!("{PKG_VERSION}+{}", &GIT_SHA[..7.min(GIT_SHA.len())])
    }
}
