//! # microgen
//!
//! **microgen** scaffolds deployment and data-access files into an existing
//! Go microservice module and lists the services known to a registry.
//!
//! ## Overview
//!
//! Run inside a service module, `microgen generate <set>` renders a fixed
//! catalog of templates into the project tree:
//!
//! - **kubernetes** - `plugins.go` and the `resources/*.yaml` manifests
//! - **skaffold** - the Kubernetes set plus `.dockerignore`, `go.mod`, `skaffold.yaml`
//! - **sqlc** - `postgres/` queries, migrations, sqlc config and a DB wrapper
//!
//! Generation is non-destructive: any path that already exists is skipped, so
//! commands can be rerun after generated files have been edited.
//!
//! ## Architecture
//!
//! - **[`generator`]** - configuration resolution, the template catalog and the
//!   file generator
//! - **[`registry`]** - the [`registry::Registry`] trait, back-ends and the sorted lister
//! - **[`cli`]** - argument parsing and command dispatch for the `microgen` binary
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`error`]** - error types for each component
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use microgen::generator::{resolve_config, Generator, ProjectOptions, TemplateSet};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = resolve_config(ProjectOptions::default())?;
//! let entries = TemplateSet::Kubernetes.entries(config.directory());
//! for outcome in Generator::new(config).generate(&entries)? {
//!     println!("{:?}", outcome);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod error;
pub mod generator;
pub mod logging;
pub mod registry;

pub use error::{Error, Result};
pub use generator::{
    resolve_config, ConfigOptions, EntryOutcome, FileEntry, Generator, GeneratorConfig,
    ProjectOptions, TemplateSet,
};
pub use registry::{list_services, Registry, Service};
