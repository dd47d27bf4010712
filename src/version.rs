//! Build identity reported by the health probe and `labscore --version`.
//!
//! Git metadata is embedded by `build.rs`; outside a git checkout every
//! field falls back to `"unknown"`.

use std::fmt;

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Identity of the running build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub branch: &'static str,
    pub sha: &'static str,
    pub dirty: bool,
}

impl BuildInfo {
    /// Metadata captured at compile time.
    pub fn current() -> Self {
        Self {
            version: PKG_VERSION,
            branch: option_env!("VERGEN_GIT_BRANCH").unwrap_or("unknown"),
            sha: option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
            dirty: option_env!("VERGEN_GIT_DIRTY") == Some("true"),
        }
    }

    /// Commit id cut to seven characters.
    pub fn short_sha(&self) -> &'static str {
        let sha = self.sha;
        match sha.char_indices().nth(7) {
            Some((end, _)) => &sha[..end],
            None => sha,
        }
    }
}

/// `{version}+{branch}.{sha}`, with `.dirty` appended for a modified tree.
impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}.{}", self.version, self.branch, self.short_sha())?;
        if self.dirty {
            f.write_str(".dirty")?;
        }
        Ok(())
    }
}

/// Version string of the running build, e.g. `0.1.0+main.abc1234`.
pub fn version_string() -> String {
    BuildInfo::current().to_string()
}
