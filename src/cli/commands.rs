use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::error::Result;
use crate::generator::{resolve_config, EntryOutcome, Generator, ProjectOptions, TemplateSet};
use crate::registry::{list_services, open_registry, RegistryKind};

/// Command-line interface for microgen
///
/// Scaffolds deployment and database files into the service module in the
/// current directory, and lists services known to a registry.
#[derive(Parser)]
#[command(name = "microgen")]
#[command(about = "Microservice scaffolding CLI", long_about = None, version)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate project template files after the fact
    Generate {
        #[command(subcommand)]
        sub: GenerateCommand,
    },
    /// List services in the registry
    Services(RegistryArgs),
}

/// Template sets that `generate` can write
#[derive(Subcommand)]
pub enum GenerateCommand {
    /// Generate Kubernetes resource template files
    Kubernetes(ProjectArgs),
    /// Generate Skaffold template files
    Skaffold(ProjectArgs),
    /// Generate sqlc resources
    Sqlc(ProjectArgs),
}

impl GenerateCommand {
    pub fn template_set(&self) -> TemplateSet {
        match self {
            GenerateCommand::Kubernetes(_) => TemplateSet::Kubernetes,
            GenerateCommand::Skaffold(_) => TemplateSet::Skaffold,
            GenerateCommand::Sqlc(_) => TemplateSet::Sqlc,
        }
    }

    pub fn project(&self) -> &ProjectArgs {
        match self {
            GenerateCommand::Kubernetes(args)
            | GenerateCommand::Skaffold(args)
            | GenerateCommand::Sqlc(args) => args,
        }
    }
}

/// Overrides for values normally derived from the project directory
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Service module directory (default: current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Service name (default: basename of the directory)
    #[arg(long)]
    pub service: Option<String>,

    /// Import-path prefix (default: derived from the directory's go.mod)
    #[arg(long)]
    pub vendor: Option<String>,

    /// Treat the service as a client-only variant (default: name ends in `-client`)
    #[arg(long)]
    pub client: Option<bool>,
}

/// Registry selection for `services`
#[derive(Args, Debug, Clone)]
pub struct RegistryArgs {
    /// Registry back-end: http, file or memory
    #[arg(long, env = "MICRO_REGISTRY", default_value_t = RegistryKind::Http)]
    pub registry: RegistryKind,

    /// Registry base URL (http) or document path (file)
    #[arg(long, env = "MICRO_REGISTRY_ADDRESS")]
    pub registry_address: Option<String>,
}

/// Parse the process arguments and execute the command
///
/// # Errors
///
/// Returns the first error of the command; see [`run`].
pub fn run_cli() -> anyhow::Result<()> {
    run(Cli::parse())
}

/// Execute a parsed command
///
/// # Errors
///
/// Returns an error if:
/// - The service name or go.mod cannot be read
/// - A file or directory cannot be written, or a template fails to render
/// - The registry cannot be opened or listed
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Generate { sub } => {
            let set = sub.template_set();
            generate(set, sub.project())?;
            println!("{}", set.completion_message());
            Ok(())
        }
        Commands::Services(args) => {
            let registry = open_registry(args.registry, args.registry_address.as_deref())?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            list_services(registry.as_ref(), &mut out)
                .with_context(|| format!("failed to list services from {} registry", args.registry))?;
            out.flush()?;
            Ok(())
        }
    }
}

/// Resolve the project configuration and write one template set
///
/// # Errors
///
/// [`crate::Error::Environment`] if configuration cannot be resolved,
/// [`crate::Error::Generate`] if an entry cannot be written.
pub fn generate(set: TemplateSet, project: &ProjectArgs) -> Result<Vec<EntryOutcome>> {
    let config = resolve_config(ProjectOptions {
        directory: project.directory.clone(),
        service: project.service.clone(),
        vendor: project.vendor.clone(),
        client: project.client,
        skaffold: set == TemplateSet::Skaffold,
        sqlc: set == TemplateSet::Sqlc,
    })?;

    let entries = set.entries(config.directory());
    let outcomes = Generator::new(config).generate(&entries)?;

    let created = outcomes
        .iter()
        .filter(|o| matches!(o, EntryOutcome::Created(_)))
        .count();
    info!(?set, created, total = outcomes.len(), "generation finished");
    Ok(outcomes)
}
