//! # Registry Module
//!
//! Read-only access to a service registry and the `services` listing.
//!
//! The lister never reaches for a process-wide registry: callers open one with
//! [`open_registry`] (or construct a back-end directly) and pass it in.
//!
//! ## Back-ends
//!
//! - [`MemoryRegistry`] - a fixed list, for tests and embedding
//! - [`FileRegistry`] - a YAML or JSON document on disk
//! - [`HttpRegistry`] - one blocking `GET {address}/registry/services`
//!
//! File and HTTP documents may be either a bare sequence of services or a
//! mapping with a `services` key:
//!
//! ```yaml
//! services:
//!   - name: greeter
//!     version: latest
//!   - name: billing
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::RegistryError;

/// A service as reported by a registry. Only `name` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Service {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            metadata: BTreeMap::new(),
        }
    }
}

/// Source of registered services.
pub trait Registry {
    /// Every service instance the registry knows about. Names may repeat
    /// (one entry per version).
    fn list_services(&self) -> Result<Vec<Service>, RegistryError>;
}

/// Write the distinct service names in `registry`, sorted, one per line.
///
/// Nothing is written when the registry call fails.
pub fn list_services(registry: &dyn Registry, out: &mut impl Write) -> Result<(), RegistryError> {
    let services = registry.list_services()?;
    let names: BTreeSet<String> = services.into_iter().map(|s| s.name).collect();
    debug!(count = names.len(), "listing services");

    for name in &names {
        writeln!(out, "{name}").map_err(RegistryError::Output)?;
    }
    out.flush().map_err(RegistryError::Output)
}

// ---------------------------------------------------------------------------
// Back-ends
// ---------------------------------------------------------------------------

/// Registry backed by a fixed list of services.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    services: Vec<Service>,
}

impl MemoryRegistry {
    pub fn new(services: Vec<Service>) -> Self {
        Self { services }
    }
}

impl Registry for MemoryRegistry {
    fn list_services(&self) -> Result<Vec<Service>, RegistryError> {
        Ok(self.services.clone())
    }
}

/// Registry document on disk; `.json` is read as JSON, anything else as YAML.
#[derive(Debug, Clone)]
pub struct FileRegistry {
    path: PathBuf,
}

impl FileRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Registry for FileRegistry {
    fn list_services(&self) -> Result<Vec<Service>, RegistryError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| RegistryError::Read {
            path: self.path.clone(),
            source,
        })?;
        let origin = self.path.display().to_string();

        let is_json = self
            .path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let document: ServiceDocument = if is_json {
            serde_json::from_str(&content).map_err(|e| decode_error(&origin, e))?
        } else {
            serde_yaml::from_str(&content).map_err(|e| decode_error(&origin, e))?
        };
        Ok(document.into_services())
    }
}

/// Registry reachable over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRegistry {
    address: String,
}

impl HttpRegistry {
    /// `address` is a base URL; a missing scheme defaults to `http://`.
    pub fn new(address: impl Into<String>) -> Self {
        let address = address.into();
        let address = if address.contains("://") {
            address
        } else {
            format!("http://{address}")
        };
        Self {
            address: address.trim_end_matches('/').to_string(),
        }
    }

    pub fn services_url(&self) -> String {
        format!("{}/registry/services", self.address)
    }
}

impl Registry for HttpRegistry {
    fn list_services(&self) -> Result<Vec<Service>, RegistryError> {
        let url = self.services_url();
        info!(url = %url, "querying registry");

        // No request timeout; reqwest's blocking client defaults to 30s.
        let client = reqwest::blocking::Client::builder().timeout(None).build()?;
        let response = client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Status {
                url,
                status: status.as_u16(),
            });
        }
        let body = response.text()?;
        let document: ServiceDocument =
            serde_json::from_str(&body).map_err(|e| decode_error(&url, e))?;
        Ok(document.into_services())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ServiceDocument {
    List(Vec<Service>),
    Wrapped { services: Vec<Service> },
}

impl ServiceDocument {
    fn into_services(self) -> Vec<Service> {
        match self {
            ServiceDocument::List(services) | ServiceDocument::Wrapped { services } => services,
        }
    }
}

fn decode_error(origin: &str, err: impl fmt::Display) -> RegistryError {
    RegistryError::Decode {
        origin: origin.to_string(),
        message: err.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Which back-end `open_registry` builds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum RegistryKind {
    #[default]
    Http,
    File,
    /// Empty in-memory registry.
    Memory,
}

impl RegistryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RegistryKind::Http => "http",
            RegistryKind::File => "file",
            RegistryKind::Memory => "memory",
        }
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(RegistryKind::Http),
            "file" => Ok(RegistryKind::File),
            "memory" => Ok(RegistryKind::Memory),
            other => Err(format!("unknown registry `{other}` (expected http, file or memory)")),
        }
    }
}

/// Build the registry selected by `kind`.
///
/// # Errors
///
/// [`RegistryError::MissingAddress`] when an HTTP or file registry has no address.
pub fn open_registry(
    kind: RegistryKind,
    address: Option<&str>,
) -> Result<Box<dyn Registry>, RegistryError> {
    let address = address.map(str::trim).filter(|a| !a.is_empty());
    match (kind, address) {
        (RegistryKind::Memory, _) => Ok(Box::new(MemoryRegistry::default())),
        (RegistryKind::File, Some(path)) => Ok(Box::new(FileRegistry::new(path))),
        (RegistryKind::Http, Some(addr)) => Ok(Box::new(HttpRegistry::new(addr))),
        (kind, None) => Err(RegistryError::MissingAddress {
            kind: kind.as_str(),
        }),
    }
}
