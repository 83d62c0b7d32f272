//! The create-project workflow.
//!
//! A single invocation is one linear traversal of
//! `SelectingRepo -> SelectingVersion -> Downloading -> Done`, with an
//! aborted outcome reachable from either selection state when a listing
//! comes back empty. Each remote step runs behind a progress spinner.
//! Nothing is retried and no state persists across invocations: the first
//! failure ends the run, and the user re-invokes the command.
//!
//! The workflow is generic over its three collaborators so it can be
//! exercised end to end with in-memory substitutes.

use std::path::{Path, PathBuf};

use crate::catalog::{TemplateRepository, VersionRef};
use crate::error::Result;
use crate::fetch::locator;
use crate::progress::with_progress;

/// Remote catalog operations the workflow depends on.
pub trait Catalog {
    /// List the selectable template repositories. May be empty.
    fn list_repositories(&self) -> Result<Vec<TemplateRepository>>;

    /// List version references for `repo`. May be empty.
    fn list_versions(&self, repo: &str) -> Result<Vec<VersionRef>>;
}

/// Interactive single-choice selection.
pub trait Prompt {
    /// Present `options` and return the chosen element, unmodified.
    ///
    /// Callers must not pass an empty `options` slice; both call sites in
    /// this module check for emptiness first and abort instead.
    fn choose(&self, prompt: &str, options: &[String]) -> Result<String>;
}

/// The external download-and-extract operation.
pub trait Downloader {
    /// Resolve `locator` and extract the archive into `target`.
    fn download(&self, locator: &str, target: &Path) -> Result<()>;
}

/// Why a workflow ended without creating a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The organization listing returned no repositories.
    NoTemplates,
    /// The chosen repository has no branches or tags to offer.
    NoVersions,
}

impl AbortReason {
    /// User-facing abort message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoTemplates => "no template available",
            Self::NoVersions => "no version available",
        }
    }
}

/// Terminal result of one workflow traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The template was downloaded into the target directory.
    Created(ProjectRequest),
    /// The workflow stopped before downloading anything. Non-fatal.
    Aborted(AbortReason),
}

/// A fully-resolved create request.
///
/// Only constructed once both selections have succeeded, so a request never
/// reaches the downloader with a missing repository or version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRequest {
    /// Name the user asked for.
    pub project_name: String,
    /// Directory the template is extracted into, resolved against the
    /// working directory at invocation time.
    pub target_dir: PathBuf,
    /// Chosen template repository.
    pub repo: TemplateRepository,
    /// Chosen branch or tag.
    pub version: VersionRef,
}

/// Workflow states. One invocation traverses these once, in order.
enum State {
    SelectingRepo,
    SelectingVersion { repo: TemplateRepository },
    Downloading { repo: TemplateRepository, version: VersionRef },
    Done(Outcome),
}

/// Sequences catalog listing, interactive selection, and download.
pub struct Workflow<'a, C, P, D> {
    catalog: &'a C,
    prompt: &'a P,
    downloader: &'a D,
    organization: String,
}

impl<'a, C, P, D> Workflow<'a, C, P, D>
where
    C: Catalog,
    P: Prompt,
    D: Downloader,
{
    /// Wire the workflow's collaborators.
    pub fn new(
        catalog: &'a C,
        prompt: &'a P,
        downloader: &'a D,
        organization: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            prompt,
            downloader,
            organization: organization.into(),
        }
    }

    /// Run the flow end to end for `project_name`.
    ///
    /// # Errors
    ///
    /// Fails on the first catalog, prompt, or download error. Empty listings
    /// are not errors; they end the run with [`Outcome::Aborted`].
    pub fn run(&self, project_name: &str, target_dir: &Path) -> Result<Outcome> {
        let mut state = State::SelectingRepo;

        loop {
            state = match state {
                State::SelectingRepo => match self.select_repository()? {
                    Some(repo) => State::SelectingVersion { repo },
                    None => State::Done(Outcome::Aborted(AbortReason::NoTemplates)),
                },
                State::SelectingVersion { repo } => match self.select_version(&repo)? {
                    Some(version) => State::Downloading { repo, version },
                    None => State::Done(Outcome::Aborted(AbortReason::NoVersions)),
                },
                State::Downloading { repo, version } => {
                    let request = ProjectRequest {
                        project_name: project_name.to_string(),
                        target_dir: target_dir.to_path_buf(),
                        repo,
                        version,
                    };
                    self.download(&request)?;
                    State::Done(Outcome::Created(request))
                }
                State::Done(outcome) => return Ok(outcome),
            };
        }
    }

    /// List repositories and let the user pick one. `None` means the
    /// catalog was empty.
    fn select_repository(&self) -> Result<Option<TemplateRepository>> {
        let repos = with_progress("fetching templates", || self.catalog.list_repositories())?;
        if repos.is_empty() {
            return Ok(None);
        }

        let names: Vec<String> = repos.iter().map(|r| r.name.clone()).collect();
        let name = self
            .prompt
            .choose("Please choose a template to create project", &names)?;
        Ok(Some(TemplateRepository { name }))
    }

    /// List versions for `repo` and let the user pick one. `None` means the
    /// repository offered no versions.
    fn select_version(&self, repo: &TemplateRepository) -> Result<Option<VersionRef>> {
        let versions = with_progress("fetching versions", || {
            self.catalog.list_versions(&repo.name)
        })?;
        if versions.is_empty() {
            return Ok(None);
        }

        let names: Vec<String> = versions.iter().map(|v| v.name.clone()).collect();
        let name = self
            .prompt
            .choose("Please choose a version to create project", &names)?;
        Ok(Some(VersionRef { name }))
    }

    /// Hand the fully-populated request to the downloader. One attempt only.
    fn download(&self, request: &ProjectRequest) -> Result<()> {
        let locator = locator(
            &self.organization,
            &request.repo.name,
            &request.version.name,
        );
        with_progress("downloading template", || {
            self.downloader.download(&locator, &request.target_dir)
        })
    }
}
