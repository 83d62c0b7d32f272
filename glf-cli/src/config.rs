//! Runtime configuration for the catalog client and fetcher.
//!
//! The organization name and API hosts are explicit parameters rather than
//! embedded literals, so the whole workflow can be pointed at a substitute
//! endpoint.

use std::env;

/// Default GitHub REST API base URL.
const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default archive host (codeload serves `tar.gz` snapshots).
const DEFAULT_ARCHIVE_BASE: &str = "https://codeload.github.com";

/// Organization hosting the template repositories.
const DEFAULT_ORGANIZATION: &str = "glf-template";

/// Which listing endpoint supplies version references.
///
/// The two endpoints are alternative configurations of the same workflow;
/// a single invocation uses exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionSource {
    /// List branch heads (`/repos/{org}/{repo}/branches`).
    #[default]
    Branches,
    /// List tags (`/repos/{org}/{repo}/tags`).
    Tags,
}

/// Configuration passed into the catalog client and fetcher at construction.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL for catalog listing requests.
    pub api_base: String,
    /// Base URL for archive downloads.
    pub archive_base: String,
    /// Organization that hosts the template repositories.
    pub organization: String,
    /// Endpoint used to enumerate version references.
    pub version_source: VersionSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            archive_base: DEFAULT_ARCHIVE_BASE.to_string(),
            organization: DEFAULT_ORGANIZATION.to_string(),
            version_source: VersionSource::default(),
        }
    }
}

impl Config {
    /// Build a configuration from the environment, falling back to defaults.
    ///
    /// Recognized variables: `GLF_API_URL`, `GLF_ARCHIVE_URL`,
    /// `GLF_TEMPLATE_ORG`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base: env::var("GLF_API_URL").unwrap_or(defaults.api_base),
            archive_base: env::var("GLF_ARCHIVE_URL").unwrap_or(defaults.archive_base),
            organization: env::var("GLF_TEMPLATE_ORG").unwrap_or(defaults.organization),
            version_source: defaults.version_source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_github_and_template_org() {
        let config = Config::default();
        assert_eq!(config.api_base, "https://api.github.com");
        assert_eq!(config.archive_base, "https://codeload.github.com");
        assert_eq!(config.organization, "glf-template");
        assert_eq!(config.version_source, VersionSource::Branches);
    }

    #[test]
    fn environment_overrides_api_base() {
        std::env::set_var("GLF_API_URL", "http://localhost:9999");
        let config = Config::from_env();
        assert_eq!(config.api_base, "http://localhost:9999");
        std::env::remove_var("GLF_API_URL");
    }
}
