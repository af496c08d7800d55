use crate::terraform::cmd::try_run_terraform_command;
use crate::terraform::options::TerraformOptions;
use crate::utils::error::Result;

/// Runs `terraform init` with the given options and returns stdout/stderr,
/// failing the test on error.
pub async fn init(options: &TerraformOptions) -> String {
    try_init(options)
        .await
        .unwrap_or_else(|err| panic!("{}", err))
}

/// Runs `terraform init` with the given options and returns stdout/stderr.
/// Variables are not forwarded; init does not accept them.
pub async fn try_init(options: &TerraformOptions) -> Result<String> {
    let args = vec!["init".to_string(), "-input=false".to_string()];
    try_run_terraform_command(options, &args).await
}
