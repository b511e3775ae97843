mod common;

use common::project::TempProject;
use microgen::generator::{
    derive_vendor, resolve_config, sqlc_entries, ConfigOptions, EntryOutcome, FileEntry,
    Generator, GeneratorConfig, ProjectOptions, TemplateSet,
};
use microgen::error::EnvironmentError;

fn options_for(project: &TempProject) -> ProjectOptions {
    ProjectOptions {
        directory: Some(project.dir().to_path_buf()),
        ..ProjectOptions::default()
    }
}

#[test]
fn test_generation_is_idempotent() {
    let project = TempProject::with_module("widget", "github.com/acme/widget");
    let config = resolve_config(ProjectOptions {
        skaffold: true,
        ..options_for(&project)
    })
    .unwrap();
    let entries = TemplateSet::Skaffold.entries(config.directory());
    let generator = Generator::new(config);

    generator.generate(&entries).unwrap();
    let first = project.snapshot();
    let outcomes = generator.generate(&entries).unwrap();
    let second = project.snapshot();

    assert_eq!(first, second);
    assert!(outcomes
        .iter()
        .all(|o| matches!(o, EntryOutcome::Skipped(_))));
}

#[test]
fn test_vendor_resolution_for_service_and_client() {
    let project = TempProject::with_module("widget", "github.com/acme/widget");
    assert_eq!(derive_vendor(project.dir(), "widget").unwrap(), "");
    assert_eq!(derive_vendor(project.dir(), "widget-client").unwrap(), "github.com/acme/");

    let root_module = TempProject::with_module("widget", "widget");
    assert_eq!(derive_vendor(root_module.dir(), "widget").unwrap(), "");

    let client = TempProject::with_module("widget-client", "github.com/acme/widget");
    let config = resolve_config(options_for(&client)).unwrap();
    assert_eq!(config.vendor(), "github.com/acme/");
    assert!(config.client());
}

#[test]
fn test_directory_marker_creates_no_file() {
    let project = TempProject::new("widget");
    let generator = Generator::new(GeneratorConfig::new(ConfigOptions {
        service: "widget".into(),
        directory: Some(project.dir().to_path_buf()),
        ..ConfigOptions::default()
    }));

    generator.generate(&[FileEntry::dir("a/b/")]).unwrap();

    let path = project.path("a/b");
    assert!(path.is_dir());
    assert!(!path.is_file());
    assert!(project.snapshot().is_empty());
}

#[test]
fn test_existing_file_is_not_overwritten() {
    let project = TempProject::with_module("widget", "github.com/acme/widget");
    project.write("resources/deployment.yaml", "X");

    let config = resolve_config(options_for(&project)).unwrap();
    let entries = TemplateSet::Kubernetes.entries(config.directory());
    let outcomes = Generator::new(config).generate(&entries).unwrap();

    assert_eq!(project.read("resources/deployment.yaml"), "X");
    assert!(outcomes.contains(&EntryOutcome::Skipped(project.path("resources/deployment.yaml"))));
    assert!(project.read("resources/configmap.yaml").contains("name: widget-env"));
}

#[test]
fn test_missing_module_file_stops_before_writing() {
    let project = TempProject::new("widget");

    let err = resolve_config(options_for(&project)).unwrap_err();

    assert!(matches!(err, EnvironmentError::ModuleFile { .. }));
    assert!(project.snapshot().is_empty());
    assert!(!project.path("resources").exists());
}

#[test]
fn test_sqlc_layout() {
    let project = TempProject::with_module("orders-api", "github.com/acme/orders");
    let config = resolve_config(ProjectOptions {
        sqlc: true,
        ..options_for(&project)
    })
    .unwrap();
    let entries = TemplateSet::Sqlc.entries(config.directory());
    Generator::new(config).generate(&entries).unwrap();

    assert!(project.path("postgres/migrations").is_dir());
    assert!(project.read("postgres/queries/example.sql").contains("SampleQuery"));
    assert!(project
        .read("postgres/postgres.go")
        .contains("\"github.com/acme/orders-api/postgres/sqlc\""));
    assert!(project.read("postgres/sqlc.yaml").contains("engine: \"postgresql\""));

    // both optional files exist now, so a second entry list leaves them out
    assert_eq!(sqlc_entries(project.dir()).len(), 2);
}
