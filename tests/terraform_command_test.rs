#![cfg(unix)]

use std::collections::BTreeMap;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use infratest::terraform::{self, TerraformOptions};
use infratest::utils::logger;
use infratest::InfraError;
use tempfile::TempDir;

/// Writes an executable shell script standing in for the terraform binary and
/// returns its path.
fn write_fake_terraform(dir: &Path, body: &str) -> String {
    let path = dir.join("fake-terraform");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();

    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();

    path.to_str().unwrap().to_string()
}

fn fake_options(temp_dir: &TempDir, script_body: &str) -> TerraformOptions {
    TerraformOptions {
        terraform_dir: temp_dir.path().to_path_buf(),
        terraform_binary: Some(write_fake_terraform(temp_dir.path(), script_body)),
        ..TerraformOptions::default()
    }
}

#[tokio::test]
async fn test_destroy_argument_order() {
    logger::init_test_logger();
    let temp_dir = TempDir::new().unwrap();

    let mut options = fake_options(&temp_dir, r#"echo "$@""#);
    options.vars.insert("a".to_string(), serde_json::json!("1"));
    options.vars.insert("b".to_string(), serde_json::json!("2"));

    let output = terraform::destroy(&options).await;

    assert_eq!(
        output.trim(),
        "destroy -force -input=false -lock=false -var a=1 -var b=2"
    );
}

#[tokio::test]
async fn test_apply_argument_order() {
    let temp_dir = TempDir::new().unwrap();

    let mut options = fake_options(&temp_dir, r#"echo "$@""#);
    options
        .vars
        .insert("region".to_string(), serde_json::json!("us-east1"));

    let output = terraform::apply(&options).await;

    assert_eq!(
        output.trim(),
        "apply -input=false -lock=false -auto-approve -var region=us-east1"
    );
}

#[tokio::test]
async fn test_init_does_not_forward_vars() {
    let temp_dir = TempDir::new().unwrap();

    let mut options = fake_options(&temp_dir, r#"echo "$@""#);
    options
        .vars
        .insert("unused".to_string(), serde_json::json!("x"));

    let output = terraform::init(&options).await;

    assert_eq!(output.trim(), "init -input=false");
}

#[tokio::test]
async fn test_init_and_apply_returns_apply_output() {
    let temp_dir = TempDir::new().unwrap();

    let options = fake_options(&temp_dir, r#"echo "$@""#);

    let output = terraform::init_and_apply(&options).await;

    assert!(output.starts_with("apply"));
    assert!(!output.contains("init -input=false"));
}

#[tokio::test]
async fn test_combined_stdout_and_stderr() {
    let temp_dir = TempDir::new().unwrap();

    let options = fake_options(
        &temp_dir,
        "echo \"plan line on stdout\"\necho \"warning on stderr\" 1>&2",
    );

    let output = terraform::run_terraform_command(&options, &["plan-ish".to_string()]).await;

    assert!(output.contains("plan line on stdout"));
    assert!(output.contains("warning on stderr"));
}

#[tokio::test]
async fn test_nonzero_exit_surfaces_as_error() {
    let temp_dir = TempDir::new().unwrap();

    let options = fake_options(
        &temp_dir,
        "echo \"partial output\"\necho \"Error: boom\" 1>&2\nexit 3",
    );

    let err = terraform::try_destroy(&options).await.unwrap_err();

    match err {
        InfraError::CommandFailed {
            status, output, ..
        } => {
            assert_eq!(status.code(), Some(3));
            assert!(output.contains("partial output"));
            assert!(output.contains("Error: boom"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_binary_fails_to_spawn() {
    let temp_dir = TempDir::new().unwrap();

    let options = TerraformOptions {
        terraform_dir: temp_dir.path().to_path_buf(),
        terraform_binary: Some("/nonexistent/terraform-binary".to_string()),
        ..TerraformOptions::default()
    };

    let err = terraform::try_init(&options).await.unwrap_err();

    assert!(matches!(err, InfraError::CommandSpawn { .. }));
}

#[tokio::test]
async fn test_env_vars_reach_the_process() {
    let temp_dir = TempDir::new().unwrap();

    let mut env_vars = BTreeMap::new();
    env_vars.insert("TF_VAR_region".to_string(), "us-east1".to_string());

    let mut options = fake_options(&temp_dir, r#"echo "region=$TF_VAR_region""#);
    options.env_vars = env_vars;

    let output = terraform::run_terraform_command(&options, &["env-check".to_string()]).await;

    assert!(output.contains("region=us-east1"));
}

#[tokio::test]
async fn test_command_runs_in_terraform_dir() {
    let temp_dir = TempDir::new().unwrap();
    let workdir = temp_dir.path().join("stack-workdir");
    fs::create_dir(&workdir).unwrap();

    let mut options = fake_options(&temp_dir, "pwd");
    options.terraform_dir = workdir;

    let output = terraform::run_terraform_command(&options, &["whereami".to_string()]).await;

    assert!(output.trim().ends_with("stack-workdir"));
}
