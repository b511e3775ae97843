use std::borrow::Cow;
use std::env;
use std::fs::{self, OpenOptions};
use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use minijinja::value::{Value, ValueKind};
use minijinja::{Environment, ErrorKind, Output, State, UndefinedBehavior};
use tracing::{debug, info};

use super::config::{normalize, GeneratorConfig};
use crate::error::GenerateError;

/// One thing to materialize on disk.
///
/// An empty `template` marks a directory: the path is created (with parents)
/// and no file is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the generator directory (or absolute beneath it).
    pub path: String,
    /// Raw template text; empty for a directory marker.
    pub template: Cow<'static, str>,
}

impl FileEntry {
    pub fn file(path: impl Into<String>, template: impl Into<Cow<'static, str>>) -> Self {
        Self {
            path: path.into(),
            template: template.into(),
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            template: Cow::Borrowed(""),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.template.is_empty()
    }
}

/// What [`Generator::generate`] did with an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// A new file was rendered and written.
    Created(PathBuf),
    /// Something already existed at the path; it was left untouched.
    Skipped(PathBuf),
    /// The directory exists (created now or before).
    EnsuredDir(PathBuf),
}

impl EntryOutcome {
    pub fn path(&self) -> &Path {
        match self {
            EntryOutcome::Created(p) | EntryOutcome::Skipped(p) | EntryOutcome::EnsuredDir(p) => p,
        }
    }
}

/// Renders entries against a [`GeneratorConfig`] and writes them under its directory.
///
/// Existing paths are never overwritten, so running the same entry list twice
/// leaves the tree as the first run did.
pub struct Generator {
    config: GeneratorConfig,
    env: Environment<'static>,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        // Generated files keep the template's final newline.
        env.set_keep_trailing_newline(true);
        env.set_formatter(format_value);
        Self { config, env }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Materialize `entries` in order, stopping at the first hard error.
    ///
    /// Files written before a failure stay on disk; rerunning is safe.
    ///
    /// # Errors
    ///
    /// - [`GenerateError::Io`] when a directory or file cannot be created, or
    ///   an entry path escapes the generator directory
    /// - [`GenerateError::Template`] when a template does not render
    pub fn generate(&self, entries: &[FileEntry]) -> Result<Vec<EntryOutcome>, GenerateError> {
        let mut outcomes = Vec::with_capacity(entries.len());
        for entry in entries {
            let target = self.target_path(&entry.path)?;
            let outcome = if entry.is_dir() {
                ensure_dir(&target)?;
                debug!(path = %target.display(), "ensured directory");
                EntryOutcome::EnsuredDir(target)
            } else {
                self.write_entry(entry, target)?
            };
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    /// Render a template against this generator's configuration.
    pub fn render(&self, template: &str) -> Result<String, minijinja::Error> {
        self.env.render_str(template, &self.config)
    }

    fn write_entry(&self, entry: &FileEntry, target: PathBuf) -> Result<EntryOutcome, GenerateError> {
        if exists(&target)? {
            debug!(path = %target.display(), "skipping existing file");
            return Ok(EntryOutcome::Skipped(target));
        }

        let rendered = match self.render(&entry.template) {
            Ok(rendered) => rendered,
            Err(source) => {
                debug!(path = %target.display(), error = %source, "template failed to render");
                return Err(GenerateError::Template {
                    path: target,
                    source,
                });
            }
        };

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent)?;
        }

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&target) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                debug!(path = %target.display(), "file appeared before write, skipping");
                return Ok(EntryOutcome::Skipped(target));
            }
            Err(source) => return Err(GenerateError::Io { path: target, source }),
        };
        if let Err(source) = file.write_all(rendered.as_bytes()) {
            return Err(GenerateError::Io { path: target, source });
        }

        info!(path = %target.display(), "generated file");
        Ok(EntryOutcome::Created(target))
    }

    fn target_path(&self, entry_path: &str) -> Result<PathBuf, GenerateError> {
        let root = self.config.directory();
        let path = Path::new(entry_path);
        let invalid = |reason: &str| GenerateError::Io {
            path: root.join(path),
            source: io::Error::new(io::ErrorKind::InvalidInput, reason.to_string()),
        };

        if entry_path.is_empty() {
            return Err(invalid("empty entry path"));
        }
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(invalid("entry path must not contain `..`"));
        }
        if path.is_absolute() {
            let absolute_root = if root.is_absolute() {
                normalize(root)
            } else {
                let cwd = env::current_dir().map_err(|source| GenerateError::Io {
                    path: root.to_path_buf(),
                    source,
                })?;
                normalize(&cwd.join(root))
            };
            if !path.starts_with(&absolute_root) {
                return Err(invalid("absolute entry path is outside the target directory"));
            }
            return Ok(path.to_path_buf());
        }
        Ok(root.join(path))
    }
}

// Booleans print as `true`/`false` rather than `True`/`False`.
fn format_value(out: &mut Output<'_>, state: &State<'_, '_>, value: &Value) -> Result<(), minijinja::Error> {
    if value.kind() == ValueKind::Bool {
        let text = if value.is_true() { "true" } else { "false" };
        return out
            .write_str(text)
            .map_err(|_| minijinja::Error::new(ErrorKind::WriteFailure, "failed to write output"));
    }
    minijinja::escape_formatter(out, state, value)
}

// `symlink_metadata` so that a dangling link still counts as "something is there".
fn exists(path: &Path) -> Result<bool, GenerateError> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(GenerateError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn ensure_dir(path: &Path) -> Result<(), GenerateError> {
    fs::create_dir_all(path).map_err(|source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    })
}
