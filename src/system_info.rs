use std::fmt;

use git_version::git_version;

// include -modified if the working tree has uncommitted changes
const COMMIT: &str = git_version!(
    args = ["--abbrev=10", "--always", "--dirty=-modified"],
    fallback = "unknown"
);

/// Version details of the running binary, logged once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: String,
    pub commit: &'static str,
    pub profile: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        let profile = if cfg!(debug_assertions) {
            "dev"
        } else {
            "release"
        };
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: describe_version(
                option_env!("RELEASE_VERSION").unwrap_or(""),
                option_env!("LATEST_TAG").unwrap_or(""),
                option_env!("COMMITS_AHEAD").unwrap_or(""),
            ),
            commit: COMMIT,
            profile,
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (commit {}, {} build)",
            self.name, self.version, self.commit, self.profile
        )
    }
}

fn describe_version(release: &str, latest: &str, ahead: &str) -> String {
    match (release, latest, ahead) {
        (tag, _, _) if !tag.is_empty() => format!("release {tag}"),
        (_, latest, ahead) if !latest.is_empty() && !ahead.is_empty() => {
            format!("{ahead} commits ahead of {latest}")
        }
        (_, latest, _) if !latest.is_empty() => format!("ahead of {latest}"),
        _ => format!("development {}", env!("CARGO_PKG_VERSION")),
    }
}
