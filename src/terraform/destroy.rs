use crate::terraform::cmd::{format_args, try_run_terraform_command};
use crate::terraform::options::TerraformOptions;
use crate::utils::error::Result;

/// Runs `terraform destroy` with the given options and returns stdout/stderr,
/// failing the test on error.
pub async fn destroy(options: &TerraformOptions) -> String {
    try_destroy(options)
        .await
        .unwrap_or_else(|err| panic!("{}", err))
}

/// Runs `terraform destroy` with the given options and returns stdout/stderr.
pub async fn try_destroy(options: &TerraformOptions) -> Result<String> {
    let args = format_args(options, &["destroy", "-force", "-input=false", "-lock=false"]);
    try_run_terraform_command(options, &args).await
}
