//! Template catalog and the entry lists each `generate` subcommand writes.
//!
//! Bodies live under `templates/` and are embedded at compile time. They use
//! plain substitution only (`{{ service }}`, `{{ vendor }}`); rendering is
//! strict, so a misspelled placeholder fails the run instead of emitting an
//! empty string.

use std::path::Path;

use super::generate::FileEntry;

pub const PLUGINS: &str = include_str!("../../templates/plugins.go.txt");
pub const KUBERNETES_CLUSTER_ROLE: &str = include_str!("../../templates/kubernetes/clusterrole.yaml");
pub const KUBERNETES_ENV: &str = include_str!("../../templates/kubernetes/configmap.yaml");
pub const KUBERNETES_DEPLOYMENT: &str = include_str!("../../templates/kubernetes/deployment.yaml");
pub const KUBERNETES_ROLE_BINDING: &str = include_str!("../../templates/kubernetes/rolebinding.yaml");
pub const DOCKER_IGNORE: &str = include_str!("../../templates/skaffold/dockerignore.txt");
pub const MODULE: &str = include_str!("../../templates/skaffold/go.mod.txt");
pub const SKAFFOLD_CFG: &str = include_str!("../../templates/skaffold/skaffold.yaml");
pub const QUERY_EXAMPLE: &str = include_str!("../../templates/sqlc/example.sql");
pub const POSTGRES: &str = include_str!("../../templates/sqlc/postgres.go.txt");
pub const SQLC: &str = include_str!("../../templates/sqlc/sqlc.yaml");

pub const POSTGRES_PATH: &str = "postgres/postgres.go";
pub const SQLC_CONFIG_PATH: &str = "postgres/sqlc.yaml";

/// The entry sets the CLI knows how to generate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TemplateSet {
    /// Kubernetes resource manifests plus the registry plugin stub
    Kubernetes,
    /// Everything in `Kubernetes` plus Skaffold build files
    Skaffold,
    /// sqlc query/migration layout and Postgres wrapper
    Sqlc,
}

impl TemplateSet {
    /// Entries to generate into `directory`.
    ///
    /// `directory` is only consulted by [`TemplateSet::Sqlc`], which leaves out
    /// the Postgres wrapper and sqlc config when they already exist.
    pub fn entries(self, directory: &Path) -> Vec<FileEntry> {
        match self {
            TemplateSet::Kubernetes => kubernetes_entries(),
            TemplateSet::Skaffold => skaffold_entries(),
            TemplateSet::Sqlc => sqlc_entries(directory),
        }
    }

    /// Line printed after a successful run.
    pub fn completion_message(self) -> &'static str {
        match self {
            TemplateSet::Kubernetes => "kubernetes resource template files generated",
            TemplateSet::Skaffold => "skaffold project template files generated",
            TemplateSet::Sqlc => "Sqlc project template files generated",
        }
    }
}

pub fn kubernetes_entries() -> Vec<FileEntry> {
    vec![
        FileEntry::file("plugins.go", PLUGINS),
        FileEntry::file("resources/clusterrole.yaml", KUBERNETES_CLUSTER_ROLE),
        FileEntry::file("resources/configmap.yaml", KUBERNETES_ENV),
        FileEntry::file("resources/deployment.yaml", KUBERNETES_DEPLOYMENT),
        FileEntry::file("resources/rolebinding.yaml", KUBERNETES_ROLE_BINDING),
    ]
}

pub fn skaffold_entries() -> Vec<FileEntry> {
    let mut entries = vec![
        FileEntry::file(".dockerignore", DOCKER_IGNORE),
        FileEntry::file("go.mod", MODULE),
    ];
    entries.extend(kubernetes_entries());
    entries.push(FileEntry::file("skaffold.yaml", SKAFFOLD_CFG));
    entries
}

pub fn sqlc_entries(directory: &Path) -> Vec<FileEntry> {
    let mut entries = vec![
        FileEntry::file("postgres/queries/example.sql", QUERY_EXAMPLE),
        FileEntry::dir("postgres/migrations/"),
    ];
    if !directory.join(POSTGRES_PATH).exists() {
        entries.push(FileEntry::file(POSTGRES_PATH, POSTGRES));
    }
    if !directory.join(SQLC_CONFIG_PATH).exists() {
        entries.push(FileEntry::file(SQLC_CONFIG_PATH, SQLC));
    }
    entries
}
