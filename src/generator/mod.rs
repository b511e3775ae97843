//! # Generator Module
//!
//! The generator module scaffolds deployment and data-access files into an
//! existing service module.
//!
//! ## Overview
//!
//! Generation takes two inputs:
//! - a [`GeneratorConfig`] describing the service (`service`, `vendor`,
//!   target `directory`, and the `client`/`skaffold`/`sqlc` flags)
//! - an ordered list of [`FileEntry`] values, each a path plus template text
//!
//! ## Architecture
//!
//! ```text
//! project dir ─┬─ basename ──► service ─┐
//!              └─ go.mod ────► vendor ──┴─► GeneratorConfig ─► Generator::generate(entries)
//! ```
//!
//! 1. **Config resolution** - [`resolve_config`] derives the service name from
//!    the directory basename and the vendor prefix from the `module` line
//! 2. **Entry selection** - [`TemplateSet::entries`] picks the catalog files
//!    for one subcommand
//! 3. **Generation** - [`Generator::generate`] creates directories, renders
//!    templates with minijinja and writes new files
//!
//! ## Overwrite Policy
//!
//! Generation never overwrites. Any existing path is skipped, so rerunning a
//! command after editing generated files is safe. There is no `--force`.
//!
//! ## Generated Structure
//!
//! ```text
//! my-service/
//! ├── .dockerignore           # skaffold
//! ├── go.mod                  # skaffold (skipped when present)
//! ├── plugins.go              # kubernetes, skaffold
//! ├── skaffold.yaml           # skaffold
//! ├── resources/              # kubernetes, skaffold
//! │   ├── clusterrole.yaml
//! │   ├── configmap.yaml
//! │   ├── deployment.yaml
//! │   └── rolebinding.yaml
//! └── postgres/               # sqlc
//!     ├── postgres.go
//!     ├── sqlc.yaml
//!     ├── migrations/
//!     └── queries/
//!         └── example.sql
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use microgen::generator::{resolve_config, Generator, ProjectOptions, TemplateSet};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = resolve_config(ProjectOptions {
//!     skaffold: true,
//!     ..ProjectOptions::default()
//! })?;
//! let entries = TemplateSet::Skaffold.entries(config.directory());
//! Generator::new(config).generate(&entries)?;
//! # Ok(())
//! # }
//! ```

mod config;
mod generate;
mod templates;

pub use config::*;
pub use generate::*;
pub use templates::*;
