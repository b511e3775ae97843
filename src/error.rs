//! Error types for configuration resolution, file generation and registry listing.
//!
//! Each component returns its own enum so callers can match on the failure
//! class; [`Error`] aggregates them for code that drives a whole command.
//! "Already exists" is deliberately absent from every enum: the generator
//! treats pre-existing paths as done, never as a failure.

use std::io;
use std::path::PathBuf;

/// The project environment could not be read.
///
/// Raised before any entry is processed; generation never starts.
#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    /// The process working directory is unavailable (deleted, permissions).
    #[error("cannot determine working directory: {0}")]
    WorkingDirectory(#[source] io::Error),

    /// The module-declaration file could not be opened or read.
    #[error("cannot read module file {}: {source}", path.display())]
    ModuleFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The project directory has no final path segment to name the service after.
    #[error("cannot derive a service name from {}", path.display())]
    NoServiceName { path: PathBuf },
}

/// A generation entry could not be materialized.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Directory creation or file write failed for a reason other than pre-existence.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A catalog template referenced an unknown placeholder or is malformed.
    #[error("failed to render template for {}: {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },
}

/// The service registry could not be listed.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("cannot read registry file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot decode registry data from {origin}: {message}")]
    Decode { origin: String, message: String },

    #[error("registry request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("registry at {url} answered {status}")]
    Status { url: String, status: u16 },

    #[error("the {kind} registry needs an address (--registry-address or MICRO_REGISTRY_ADDRESS)")]
    MissingAddress { kind: &'static str },

    #[error("cannot write service listing: {0}")]
    Output(#[source] io::Error),
}

/// Any failure of a scaffolding or listing command.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Environment(#[from] EnvironmentError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub type Result<T> = std::result::Result<T, Error>;
