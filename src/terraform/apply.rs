use crate::terraform::cmd::{format_args, try_run_terraform_command};
use crate::terraform::init::try_init;
use crate::terraform::options::TerraformOptions;
use crate::utils::error::Result;

/// Runs `terraform apply` with the given options and returns stdout/stderr,
/// failing the test on error.
pub async fn apply(options: &TerraformOptions) -> String {
    try_apply(options)
        .await
        .unwrap_or_else(|err| panic!("{}", err))
}

/// Runs `terraform apply` with the given options and returns stdout/stderr.
pub async fn try_apply(options: &TerraformOptions) -> Result<String> {
    let args = format_args(
        options,
        &["apply", "-input=false", "-lock=false", "-auto-approve"],
    );
    try_run_terraform_command(options, &args).await
}

/// Runs `terraform init` followed by `terraform apply` and returns the apply
/// output, failing the test on error.
pub async fn init_and_apply(options: &TerraformOptions) -> String {
    try_init_and_apply(options)
        .await
        .unwrap_or_else(|err| panic!("{}", err))
}

/// Runs `terraform init` followed by `terraform apply` and returns the apply
/// output.
pub async fn try_init_and_apply(options: &TerraformOptions) -> Result<String> {
    try_init(options).await?;
    try_apply(options).await
}
