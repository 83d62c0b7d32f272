//! Remote template catalog client.
//!
//! Issues read-only GET requests against the organization's repository
//! listing and the per-repository branch or tag listing. Responses are JSON
//! arrays of objects of which only the `name` field is consumed; a body that
//! does not decode to that shape fails fast with
//! [`Error::MalformedResponse`] instead of letting an absent name reach the
//! selector.
//!
//! No retries are performed. A single failure is surfaced immediately and
//! the caller decides whether to abort the workflow.

use serde::Deserialize;

use crate::config::{Config, VersionSource};
use crate::error::{Error, Result};

/// A selectable template repository, identified by its remote name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateRepository {
    /// Remote repository identifier.
    pub name: String,
}

/// A branch or tag of a template repository.
///
/// Which of the two it is depends solely on the listing endpoint that
/// produced it; no kind field is stored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionRef {
    /// Branch or tag name.
    pub name: String,
}

/// Client for the remote template catalog.
pub struct CatalogClient {
    config: Config,
}

impl CatalogClient {
    /// Create a client bound to the given configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// List the template repositories of the configured organization.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CatalogUnavailable`] if the request fails or answers
    /// with a non-success status, and [`Error::MalformedResponse`] if the
    /// body is not the expected JSON shape. An empty listing is a success.
    pub fn list_repositories(&self) -> Result<Vec<TemplateRepository>> {
        let body = get(&self.repos_url())?;
        parse_repositories(&body)
    }

    /// List version references (branches or tags) for `repo`.
    ///
    /// # Errors
    ///
    /// Same failure semantics as [`Self::list_repositories`].
    pub fn list_versions(&self, repo: &str) -> Result<Vec<VersionRef>> {
        let body = get(&self.versions_url(repo))?;
        parse_versions(&body)
    }

    fn repos_url(&self) -> String {
        format!(
            "{}/orgs/{}/repos",
            self.config.api_base, self.config.organization
        )
    }

    fn versions_url(&self, repo: &str) -> String {
        let listing = match self.config.version_source {
            VersionSource::Branches => "branches",
            VersionSource::Tags => "tags",
        };
        format!(
            "{}/repos/{}/{}/{}",
            self.config.api_base, self.config.organization, repo, listing
        )
    }
}

impl crate::workflow::Catalog for CatalogClient {
    fn list_repositories(&self) -> Result<Vec<TemplateRepository>> {
        Self::list_repositories(self)
    }

    fn list_versions(&self, repo: &str) -> Result<Vec<VersionRef>> {
        Self::list_versions(self, repo)
    }
}

/// Perform one GET and read the body to a string.
fn get(url: &str) -> Result<String> {
    let response = ureq::get(url)
        .call()
        .map_err(|e| Error::CatalogUnavailable(Box::new(e)))?;

    response
        .into_body()
        .read_to_string()
        .map_err(|e| Error::CatalogUnavailable(Box::new(e)))
}

/// Decode a repository listing body.
fn parse_repositories(body: &str) -> Result<Vec<TemplateRepository>> {
    serde_json::from_str(body).map_err(Error::MalformedResponse)
}

/// Decode a branch or tag listing body.
fn parse_versions(body: &str) -> Result<Vec<VersionRef>> {
    serde_json::from_str(body).map_err(Error::MalformedResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(version_source: VersionSource) -> CatalogClient {
        CatalogClient::new(Config {
            api_base: "http://catalog.test".to_string(),
            archive_base: "http://archive.test".to_string(),
            organization: "glf-template".to_string(),
            version_source,
        })
    }

    #[test]
    fn repos_url_is_organization_scoped() {
        let client = client(VersionSource::Branches);
        assert_eq!(
            client.repos_url(),
            "http://catalog.test/orgs/glf-template/repos"
        );
    }

    #[test]
    fn versions_url_follows_configured_source() {
        assert_eq!(
            client(VersionSource::Branches).versions_url("foo"),
            "http://catalog.test/repos/glf-template/foo/branches"
        );
        assert_eq!(
            client(VersionSource::Tags).versions_url("foo"),
            "http://catalog.test/repos/glf-template/foo/tags"
        );
    }

    #[test]
    fn parses_names_and_ignores_extra_fields() {
        let body = r#"[
            {"name": "web-app", "full_name": "glf-template/web-app", "private": false},
            {"name": "api-service"}
        ]"#;

        let repos = parse_repositories(body).unwrap();
        assert_eq!(
            repos,
            vec![
                TemplateRepository {
                    name: "web-app".to_string()
                },
                TemplateRepository {
                    name: "api-service".to_string()
                },
            ]
        );
    }

    #[test]
    fn empty_listing_is_a_success() {
        assert_eq!(parse_repositories("[]").unwrap(), vec![]);
        assert_eq!(parse_versions("[]").unwrap(), vec![]);
    }

    #[test]
    fn missing_name_is_malformed() {
        let body = r#"[{"full_name": "glf-template/web-app"}]"#;
        let err = parse_repositories(body).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn non_array_body_is_malformed() {
        let body = r#"{"message": "Not Found"}"#;
        let err = parse_versions(body).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }
}
