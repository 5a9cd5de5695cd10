use std::collections::BTreeMap;

use serde::Serialize;

const UNKNOWN: &str = "unknown";

/// Build metadata, fixed at compile time.
///
/// `build_time` and `git_commit` come from the `WEBSPIDER_BUILD_TIME` and
/// `WEBSPIDER_GIT_COMMIT` environment variables seen by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub version: &'static str,
    pub build_time: &'static str,
    pub git_commit: &'static str,
}

impl VersionInfo {
    pub const fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            build_time: match option_env!("WEBSPIDER_BUILD_TIME") {
                Some(build_time) => build_time,
                None => UNKNOWN,
            },
            git_commit: match option_env!("WEBSPIDER_GIT_COMMIT") {
                Some(git_commit) => git_commit,
                None => UNKNOWN,
            },
        }
    }

    pub fn to_map(&self) -> BTreeMap<&'static str, &'static str> {
        BTreeMap::from([
            ("version", self.version),
            ("build_time", self.build_time),
            ("git_commit", self.git_commit),
        ])
    }
}

impl Default for VersionInfo {
    fn default() -> Self {
        Self::current()
    }
}
