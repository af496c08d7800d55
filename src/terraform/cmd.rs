use std::collections::BTreeMap;

use serde_json::Value;
use tokio::process::Command;

use crate::terraform::options::TerraformOptions;
use crate::utils::error::{InfraError, Result};

/// Runs the terraform binary once with the given arguments and returns the
/// combined stdout/stderr, failing the test on error.
pub async fn run_terraform_command(options: &TerraformOptions, args: &[String]) -> String {
    try_run_terraform_command(options, args)
        .await
        .unwrap_or_else(|err| panic!("{}", err))
}

/// Runs the terraform binary once with the given arguments and returns the
/// combined stdout/stderr. A non-zero exit status surfaces as
/// [`InfraError::CommandFailed`] carrying the same combined output.
pub async fn try_run_terraform_command(
    options: &TerraformOptions,
    args: &[String],
) -> Result<String> {
    let binary = options.binary();
    let command_line = format!("{} {}", binary, args.join(" "));
    tracing::info!(
        "Running {} in {}",
        command_line,
        options.terraform_dir.display()
    );

    let mut command = Command::new(binary);
    command.args(args).current_dir(&options.terraform_dir);
    for (key, value) in &options.env_vars {
        command.env(key, value);
    }

    let output = command
        .output()
        .await
        .map_err(|source| InfraError::CommandSpawn {
            command: command_line.clone(),
            source,
        })?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        return Err(InfraError::CommandFailed {
            command: command_line,
            status: output.status,
            output: combined,
        });
    }

    Ok(combined)
}

/// Builds the full argument list: the subcommand and its fixed flags first,
/// then one `-var` flag per variable.
pub fn format_args(options: &TerraformOptions, command_args: &[&str]) -> Vec<String> {
    let mut args: Vec<String> = command_args.iter().map(|s| s.to_string()).collect();
    args.extend(format_terraform_vars_as_args(&options.vars));
    args
}

/// Formats each variable as a `-var key=value` argument pair, in key order.
pub fn format_terraform_vars_as_args(vars: &BTreeMap<String, Value>) -> Vec<String> {
    let mut args = Vec::with_capacity(vars.len() * 2);
    for (key, value) in vars {
        args.push("-var".to_string());
        args.push(format!("{}={}", key, format_var_value(value)));
    }
    args
}

fn format_var_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_vars_orders_by_key() {
        let mut vars = BTreeMap::new();
        vars.insert("b".to_string(), json!("2"));
        vars.insert("a".to_string(), json!("1"));

        let args = format_terraform_vars_as_args(&vars);

        assert_eq!(args, vec!["-var", "a=1", "-var", "b=2"]);
    }

    #[test]
    fn test_format_vars_empty_map() {
        let vars = BTreeMap::new();

        assert!(format_terraform_vars_as_args(&vars).is_empty());
    }

    #[test]
    fn test_format_vars_renders_non_strings_as_json() {
        let mut vars = BTreeMap::new();
        vars.insert("count".to_string(), json!(3));
        vars.insert("enabled".to_string(), json!(true));
        vars.insert("zones".to_string(), json!(["a", "b"]));

        let args = format_terraform_vars_as_args(&vars);

        assert_eq!(
            args,
            vec![
                "-var",
                "count=3",
                "-var",
                "enabled=true",
                "-var",
                "zones=[\"a\",\"b\"]",
            ]
        );
    }

    #[test]
    fn test_format_vars_renders_strings_bare() {
        let mut vars = BTreeMap::new();
        vars.insert("region".to_string(), json!("us-east1"));

        let args = format_terraform_vars_as_args(&vars);

        assert_eq!(args, vec!["-var", "region=us-east1"]);
    }

    #[test]
    fn test_format_args_places_fixed_flags_before_vars() {
        let mut options = TerraformOptions::default();
        options.vars.insert("a".to_string(), json!("1"));
        options.vars.insert("b".to_string(), json!("2"));

        let args = format_args(&options, &["destroy", "-force", "-input=false", "-lock=false"]);

        assert_eq!(
            args,
            vec![
                "destroy",
                "-force",
                "-input=false",
                "-lock=false",
                "-var",
                "a=1",
                "-var",
                "b=2",
            ]
        );
    }
}
