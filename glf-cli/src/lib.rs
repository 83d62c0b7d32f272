//! Interactive project scaffolding from remote template repositories.
//!
//! `glf create <name>` lists the template repositories of a configured
//! organization, lets the user pick one plus a branch or tag, then downloads
//! the matching archive and extracts it into `./<name>`.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod fetch;
pub mod progress;
pub mod prompt;
pub mod workflow;

pub use catalog::{CatalogClient, TemplateRepository, VersionRef};
pub use config::{Config, VersionSource};
pub use error::Error;
pub use workflow::{AbortReason, Outcome, ProjectRequest, Workflow};
