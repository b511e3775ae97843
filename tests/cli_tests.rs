mod common;

use common::project::TempProject;
use std::fs;
use std::process::{Command, Output};

fn microgen(project: &TempProject, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_microgen"))
        .current_dir(project.dir())
        .env_remove("MICRO_REGISTRY")
        .env_remove("MICRO_REGISTRY_ADDRESS")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run microgen")
}

#[test]
fn test_cli_generate_kubernetes() {
    let project = TempProject::with_module("widget", "github.com/acme/widget");

    let output = microgen(&project, &["generate", "kubernetes"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "kubernetes resource template files generated\n"
    );
    assert!(project.path("plugins.go").exists());
    for file in ["clusterrole", "configmap", "deployment", "rolebinding"] {
        assert!(project.path(&format!("resources/{file}.yaml")).exists());
    }
    assert!(project.read("resources/deployment.yaml").contains("name: widget\n"));
}

#[test]
fn test_cli_generate_skaffold_keeps_go_mod() {
    let project = TempProject::with_module("widget-client", "github.com/acme/widget");
    let go_mod = project.read("go.mod");

    let output = microgen(&project, &["generate", "skaffold"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "skaffold project template files generated\n"
    );
    assert_eq!(project.read("go.mod"), go_mod);
    assert!(project.read("skaffold.yaml").contains("image: widget-client"));
    assert!(project.path(".dockerignore").exists());

    // second run changes nothing
    let before = project.snapshot();
    assert!(microgen(&project, &["generate", "skaffold"]).status.success());
    assert_eq!(project.snapshot(), before);
}

#[test]
fn test_cli_generate_sqlc() {
    let project = TempProject::with_module("orders", "github.com/acme/orders");

    let output = microgen(&project, &["generate", "sqlc"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Sqlc project template files generated\n"
    );
    assert!(project.path("postgres/migrations").is_dir());
    assert!(project.path("postgres/sqlc.yaml").exists());
}

#[test]
fn test_cli_generate_without_go_mod_fails() {
    let project = TempProject::new("widget");

    let output = microgen(&project, &["generate", "kubernetes"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("go.mod"));
    // reported once
    assert_eq!(stderr.lines().count(), 1, "{stderr}");
    assert!(stderr.starts_with("Error: "));
    assert!(output.stdout.is_empty());
    assert!(fs::read_dir(project.dir()).unwrap().next().is_none());
}

#[test]
fn test_cli_generate_into_directory_with_overrides() {
    let cwd = TempProject::new("workspace");
    let target = cwd.path("svc");
    fs::create_dir_all(&target).unwrap();

    let output = microgen(
        &cwd,
        &[
            "generate",
            "sqlc",
            "--directory",
            "svc",
            "--service",
            "billing",
            "--vendor",
            "example.com/shop",
        ],
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let postgres = fs::read_to_string(target.join("postgres/postgres.go")).unwrap();
    assert!(postgres.contains("\"example.com/shop/billing/postgres/sqlc\""));
}

#[test]
fn test_cli_services_from_file_registry() {
    let project = TempProject::new("registry");
    project.write(
        "registry.yaml",
        "services:\n  - name: c-svc\n  - name: a-svc\n  - name: b-svc\n",
    );

    let output = microgen(
        &project,
        &["services", "--registry", "file", "--registry-address", "registry.yaml"],
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "a-svc\nb-svc\nc-svc\n");
}

#[test]
fn test_cli_services_registry_from_env() {
    let project = TempProject::new("registry");
    project.write("registry.json", r#"[{"name":"zeta"},{"name":"alpha"}]"#);

    let output = Command::new(env!("CARGO_BIN_EXE_microgen"))
        .current_dir(project.dir())
        .env("MICRO_REGISTRY", "file")
        .env("MICRO_REGISTRY_ADDRESS", "registry.json")
        .arg("services")
        .output()
        .expect("run microgen");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "alpha\nzeta\n");
}

#[test]
fn test_cli_services_missing_file_fails_quietly() {
    let project = TempProject::new("registry");

    let output = microgen(
        &project,
        &["services", "--registry", "file", "--registry-address", "missing.yaml"],
    );

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
