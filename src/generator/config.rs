//! Generator configuration and its resolution from the project directory.
//!
//! The service name comes from the project directory's basename and the vendor
//! prefix from the `module` line of its `go.mod`. Both can be overridden by the
//! caller; everything else is a plain flag.

use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::EnvironmentError;

/// Name of the module-declaration file read from the project directory.
pub const MODULE_FILE: &str = "go.mod";

/// Keyword that opens the module-declaration line.
const MODULE_KEYWORD: &str = "module";

/// Suffix that marks a client-only service variant.
const CLIENT_SUFFIX: &str = "-client";

/// Options accepted by [`GeneratorConfig::new`].
///
/// Every recognized field is listed here with its default. Fields are
/// independent: the resulting configuration does not depend on the order in
/// which a caller fills them in.
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    /// Short service name.
    pub service: String,
    /// Module-path prefix; a missing trailing `/` is added.
    pub vendor: String,
    /// Target root for generated paths (default: `.`).
    pub directory: Option<PathBuf>,
    /// Client-only variant (default: `service` ends with `-client`).
    pub client: Option<bool>,
    /// Skaffold entry set active.
    pub skaffold: bool,
    /// Sqlc entry set active.
    pub sqlc: bool,
}

/// Immutable configuration for one generation run.
///
/// Serializes to the template context: `service`, `vendor`, `client`,
/// `skaffold` and `sqlc` are the placeholders catalog templates may use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorConfig {
    service: String,
    vendor: String,
    #[serde(skip)]
    directory: PathBuf,
    client: bool,
    skaffold: bool,
    sqlc: bool,
}

impl GeneratorConfig {
    pub fn new(options: ConfigOptions) -> Self {
        let ConfigOptions {
            service,
            mut vendor,
            directory,
            client,
            skaffold,
            sqlc,
        } = options;

        if !vendor.is_empty() && !vendor.ends_with('/') {
            vendor.push('/');
        }
        let client = client.unwrap_or_else(|| service.ends_with(CLIENT_SUFFIX));

        Self {
            service,
            vendor,
            directory: directory.unwrap_or_else(|| PathBuf::from(".")),
            client,
            skaffold,
            sqlc,
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn client(&self) -> bool {
        self.client
    }

    pub fn skaffold(&self) -> bool {
        self.skaffold
    }

    pub fn sqlc(&self) -> bool {
        self.sqlc
    }
}

/// Caller-supplied overrides for [`resolve_config`].
///
/// `None` means "derive it from the project directory".
#[derive(Debug, Clone, Default)]
pub struct ProjectOptions {
    pub directory: Option<PathBuf>,
    pub service: Option<String>,
    pub vendor: Option<String>,
    pub client: Option<bool>,
    pub skaffold: bool,
    pub sqlc: bool,
}

/// Resolve a full configuration for the project at `options.directory`
/// (default: the working directory).
///
/// # Errors
///
/// Returns [`EnvironmentError`] if the service name cannot be derived or, when
/// no vendor override is given, the module file cannot be read.
pub fn resolve_config(options: ProjectOptions) -> Result<GeneratorConfig, EnvironmentError> {
    let directory = options.directory.unwrap_or_else(|| PathBuf::from("."));

    let service = match options.service {
        Some(service) => service,
        None => derive_service(&directory)?,
    };
    let vendor = match options.vendor {
        Some(vendor) => vendor,
        None => derive_vendor(&directory, &service)?,
    };
    debug!(service = %service, vendor = %vendor, directory = %directory.display(), "resolved project");

    Ok(GeneratorConfig::new(ConfigOptions {
        service,
        vendor,
        directory: Some(directory),
        client: options.client,
        skaffold: options.skaffold,
        sqlc: options.sqlc,
    }))
}

/// Service name of the process working directory.
pub fn current_service() -> Result<String, EnvironmentError> {
    let cwd = env::current_dir().map_err(EnvironmentError::WorkingDirectory)?;
    service_from_path(&cwd)
}

/// Last path segment of `dir`, resolved against the working directory when relative.
///
/// `.` and `..` are normalized away first, so `derive_service(".")` names the
/// working directory itself.
pub fn derive_service(dir: &Path) -> Result<String, EnvironmentError> {
    let absolute = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        env::current_dir()
            .map_err(EnvironmentError::WorkingDirectory)?
            .join(dir)
    };
    service_from_path(&normalize(&absolute))
}

fn service_from_path(path: &Path) -> Result<String, EnvironmentError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| EnvironmentError::NoServiceName {
            path: path.to_path_buf(),
        })
}

// Lexical normalization only; symlinks are not resolved.
pub(super) fn normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Vendor prefix for `service`, read from `dir/go.mod`.
///
/// See [`vendor_for_module`] for how the module path is cut.
///
/// # Errors
///
/// Fails with [`EnvironmentError::ModuleFile`] if the module file cannot be
/// opened or read. A file without a module line is not an error: the vendor
/// is empty.
pub fn derive_vendor(dir: &Path, service: &str) -> Result<String, EnvironmentError> {
    let path = dir.join(MODULE_FILE);
    let module_err = |source| EnvironmentError::ModuleFile {
        path: path.clone(),
        source,
    };

    let file = File::open(&path).map_err(module_err)?;
    for line in BufReader::new(file).lines() {
        let line = line.map_err(module_err)?;
        if let Some(module) = parse_module_line(&line) {
            return Ok(vendor_for_module(module, service));
        }
    }
    Ok(String::new())
}

/// Module path declared by `line`, if it is a module declaration.
pub fn parse_module_line(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(MODULE_KEYWORD)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.split("//").next().unwrap_or_default();
    rest.split_whitespace()
        .next_back()
        .map(|module| module.trim_matches('"'))
        .filter(|module| !module.is_empty())
}

/// Parent import prefix of `module`.
///
/// Empty when the module is the service itself (the whole path, or its last
/// segment, names the service) or when the module path has a single segment.
pub fn vendor_for_module(module: &str, service: &str) -> String {
    if module == service {
        return String::new();
    }
    match module.rsplit_once('/') {
        Some((_, last)) if last == service => String::new(),
        Some((parent, _)) => format!("{parent}/"),
        None => String::new(),
    }
}
