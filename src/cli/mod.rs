//! # CLI Module
//!
//! Command-line interface for the `microgen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Writes a template set into the service module in the current directory
//! (or `--directory`). Existing files are left alone, so the commands can be
//! rerun at any time.
//!
//! ```bash
//! microgen generate kubernetes
//! microgen generate skaffold
//! microgen generate sqlc --directory services/billing
//! ```
//!
//! Options shared by all three:
//! - `--directory <DIR>` - Service module directory (default: `.`)
//! - `--service <NAME>` - Service name (default: directory basename)
//! - `--vendor <PREFIX>` - Import-path prefix (default: from `go.mod`)
//! - `--client <BOOL>` - Client-only variant (default: name ends in `-client`)
//!
//! ### `services`
//!
//! Lists registered service names, sorted, one per line:
//!
//! ```bash
//! MICRO_REGISTRY=file MICRO_REGISTRY_ADDRESS=registry.yaml microgen services
//! microgen services --registry http --registry-address localhost:8000
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use microgen::cli::{run, Cli};
//! use clap::Parser;
//!
//! run(Cli::parse())?;
//! ```

mod commands;


pub use commands::{
    generate, run, run_cli, Cli, Commands, GenerateCommand, ProjectArgs, RegistryArgs,
};
