//! Template archive fetching and extraction.
//!
//! The workflow hands the downloader a locator of the shape
//! `{organization}/{repo}#{version}`. The production implementation resolves
//! it against the configured archive host, downloads the `tar.gz` snapshot,
//! and unpacks it into the target directory with the archive's top-level
//! directory stripped, so the template's files land directly under the
//! target.
//!
//! Completion of the extraction is treated as sufficient proof of success;
//! no further validation of the extracted content is performed, and a
//! failure is never retried.

use std::fs;
use std::io::Cursor;
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::workflow::Downloader;

/// Delimiter between repository and version in a locator.
const VERSION_DELIMITER: char = '#';

/// Compose the locator consumed by the download operation.
///
/// For organization `glf-template`, repository `foo` and version `main` the
/// result is `glf-template/foo#main`.
#[must_use]
pub fn locator(organization: &str, repo: &str, version: &str) -> String {
    format!("{organization}/{repo}{VERSION_DELIMITER}{version}")
}

/// Split a locator back into `(organization, repo, version)`.
fn parse_locator(locator: &str) -> Result<(&str, &str, &str)> {
    let invalid = || Error::download_failed(format!("invalid locator: {locator}"));

    let (path, version) = locator.rsplit_once(VERSION_DELIMITER).ok_or_else(invalid)?;
    let (organization, repo) = path.split_once('/').ok_or_else(invalid)?;

    if organization.is_empty() || repo.is_empty() || version.is_empty() {
        return Err(invalid());
    }
    Ok((organization, repo, version))
}

/// Downloads a template archive and extracts it into a target directory.
pub struct ArchiveDownloader {
    archive_base: String,
    force: bool,
}

impl ArchiveDownloader {
    /// Create a downloader against the configured archive host.
    ///
    /// With `force`, an existing target directory is removed before
    /// extraction; without it, an existing target is a download failure.
    #[must_use]
    pub fn new(config: &Config, force: bool) -> Self {
        Self {
            archive_base: config.archive_base.clone(),
            force,
        }
    }

    /// Fetch the `tar.gz` snapshot for one repository version.
    fn fetch_archive(&self, organization: &str, repo: &str, version: &str) -> Result<Vec<u8>> {
        let url = format!(
            "{}/{organization}/{repo}/tar.gz/{version}",
            self.archive_base
        );

        let response = ureq::get(&url)
            .call()
            .map_err(|e| Error::download_failed(format!("fetching {url}: {e}")))?;

        response
            .into_body()
            .read_to_vec()
            .map_err(|e| Error::download_failed(format!("reading archive from {url}: {e}")))
    }

    /// Ensure the target directory can be written to.
    fn prepare_target(&self, target: &Path) -> Result<()> {
        if target.exists() {
            if !self.force {
                return Err(Error::download_failed(format!(
                    "target directory {} already exists (use --force to overwrite)",
                    target.display()
                )));
            }
            fs::remove_dir_all(target).map_err(|e| {
                Error::download_failed(format!("clearing {}: {e}", target.display()))
            })?;
        }

        fs::create_dir_all(target)
            .map_err(|e| Error::download_failed(format!("creating {}: {e}", target.display())))
    }
}

impl Downloader for ArchiveDownloader {
    fn download(&self, locator: &str, target: &Path) -> Result<()> {
        let (organization, repo, version) = parse_locator(locator)?;
        self.prepare_target(target)?;
        let bytes = self.fetch_archive(organization, repo, version)?;
        extract_archive(&bytes, target)
    }
}

/// Unpack a gzip'd tarball into `target`.
///
/// Snapshot archives wrap everything in a single `{repo}-{version}/`
/// directory; that leading component is dropped so the template's tree is
/// recreated directly under `target`.
///
/// # Errors
///
/// Returns [`Error::DownloadFailed`] if the archive cannot be read, contains
/// a path that escapes the target, or an entry cannot be written.
pub fn extract_archive(data: &[u8], target: &Path) -> Result<()> {
    let decoder = GzDecoder::new(Cursor::new(data));
    let mut archive = Archive::new(decoder);

    let entries = archive
        .entries()
        .map_err(|e| Error::download_failed(format!("reading archive: {e}")))?;

    for entry in entries {
        let mut entry =
            entry.map_err(|e| Error::download_failed(format!("reading archive entry: {e}")))?;
        let path = entry
            .path()
            .map_err(|e| Error::download_failed(format!("reading entry path: {e}")))?
            .into_owned();

        let Some(stripped) = strip_top_level(&path)? else {
            continue;
        };

        let dest = target.join(stripped);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::download_failed(format!("creating {}: {e}", parent.display()))
            })?;
        }

        entry
            .unpack(&dest)
            .map_err(|e| Error::download_failed(format!("writing {}: {e}", dest.display())))?;
    }

    Ok(())
}

/// Drop the leading path component and reject traversal components.
fn strip_top_level(path: &Path) -> Result<Option<PathBuf>> {
    let mut components = path.components();
    components.next();
    let rest = components.as_path();

    if rest.as_os_str().is_empty() {
        return Ok(None);
    }
    if rest
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir))
    {
        return Err(Error::download_failed(format!(
            "unsafe path in archive: {}",
            path.display()
        )));
    }
    Ok(Some(rest.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn locator_joins_organization_repo_and_version() {
        assert_eq!(locator("glf-template", "foo", "main"), "glf-template/foo#main");
    }

    #[test]
    fn parse_locator_round_trips() {
        let composed = locator("glf-template", "web-app", "v1.2");
        let (organization, repo, version) = parse_locator(&composed).unwrap();
        assert_eq!(organization, "glf-template");
        assert_eq!(repo, "web-app");
        assert_eq!(version, "v1.2");
    }

    #[test]
    fn parse_locator_rejects_missing_pieces() {
        for bad in ["", "foo", "foo#main", "org/repo", "org/#main", "/repo#main"] {
            assert!(parse_locator(bad).is_err(), "should reject: {bad}");
        }
    }

    #[test]
    fn strip_top_level_drops_the_archive_root() {
        let stripped = strip_top_level(Path::new("repo-main/src/lib.rs")).unwrap();
        assert_eq!(stripped, Some(PathBuf::from("src/lib.rs")));
    }

    #[test]
    fn strip_top_level_skips_the_root_entry() {
        assert_eq!(strip_top_level(Path::new("repo-main/")).unwrap(), None);
        assert_eq!(strip_top_level(Path::new("repo-main")).unwrap(), None);
    }

    #[test]
    fn strip_top_level_rejects_traversal() {
        assert!(strip_top_level(Path::new("repo-main/../evil.txt")).is_err());
    }

    #[test]
    fn existing_target_without_force_fails() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("demo");
        fs::create_dir(&target).unwrap();

        let downloader = ArchiveDownloader {
            archive_base: "http://archive.test".to_string(),
            force: false,
        };
        let err = downloader.prepare_target(&target).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn existing_target_with_force_is_replaced() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("demo");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("stale.txt"), "old").unwrap();

        let downloader = ArchiveDownloader {
            archive_base: "http://archive.test".to_string(),
            force: true,
        };
        downloader.prepare_target(&target).unwrap();

        assert!(target.exists());
        assert!(!target.join("stale.txt").exists());
    }
}
