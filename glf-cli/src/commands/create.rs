//! Project creation command

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use console::{style, Emoji};

use crate::catalog::CatalogClient;
use crate::config::{Config, VersionSource};
use crate::fetch::ArchiveDownloader;
use crate::prompt::TermPrompt;
use crate::workflow::{Outcome, Workflow};

static SUCCESS: Emoji = Emoji("✓", "√");
static INFO: Emoji = Emoji("ℹ", "i");

/// Create a new project from a remote template.
pub struct CreateCommand {
    name: String,
    target_dir: PathBuf,
    force: bool,
    config: Config,
}

impl CreateCommand {
    /// Build the command for `name`.
    ///
    /// The target directory is resolved against the current working
    /// directory here, at invocation time, not when the user makes a
    /// selection later.
    ///
    /// # Errors
    ///
    /// Returns an error if the current working directory cannot be
    /// determined.
    pub fn new(name: String, force: bool, tags: bool) -> Result<Self> {
        let mut config = Config::from_env();
        if tags {
            config.version_source = VersionSource::Tags;
        }

        let target_dir = env::current_dir()
            .context("Failed to get current directory")?
            .join(&name);

        Ok(Self {
            name,
            target_dir,
            force,
            config,
        })
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog, a prompt, or the download fails.
    /// An empty catalog or version listing is reported to the user and is
    /// not an error.
    pub fn execute(&self) -> Result<()> {
        println!(
            "{} {} {}",
            style("Creating").green().bold(),
            style("project:").bold(),
            style(&self.name).cyan().bold()
        );
        println!();

        let catalog = CatalogClient::new(self.config.clone());
        let prompt = TermPrompt;
        let downloader = ArchiveDownloader::new(&self.config, self.force);
        let workflow = Workflow::new(
            &catalog,
            &prompt,
            &downloader,
            self.config.organization.clone(),
        );

        match workflow.run(&self.name, &self.target_dir)? {
            Outcome::Created(_) => {
                println!();
                println!(
                    "{SUCCESS} Successfully created project {}",
                    style(&self.name).cyan().bold()
                );
                println!();
                println!("{}", style("Next steps:").bold());
                println!(
                    "  {} {}",
                    style("$").dim(),
                    style(format!("cd {}", self.name)).cyan()
                );
            }
            Outcome::Aborted(reason) => {
                println!("{INFO} {}", style(reason.message()).yellow());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_dir_is_resolved_against_cwd_at_construction() {
        let cmd = CreateCommand::new("demo-app".to_string(), false, false).unwrap();
        let expected = env::current_dir().unwrap().join("demo-app");
        assert_eq!(cmd.target_dir, expected);
    }

    #[test]
    fn tags_flag_switches_the_version_source() {
        let cmd = CreateCommand::new("demo-app".to_string(), false, true).unwrap();
        assert_eq!(cmd.config.version_source, VersionSource::Tags);

        let cmd = CreateCommand::new("demo-app".to_string(), false, false).unwrap();
        assert_eq!(cmd.config.version_source, VersionSource::Branches);
    }
}
