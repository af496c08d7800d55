pub mod apply;
pub mod cmd;
pub mod destroy;
pub mod init;
pub mod options;

pub use apply::{apply, init_and_apply, try_apply, try_init_and_apply};
pub use cmd::{
    format_args, format_terraform_vars_as_args, run_terraform_command, try_run_terraform_command,
};
pub use destroy::{destroy, try_destroy};
pub use init::{init, try_init};
pub use options::TerraformOptions;
