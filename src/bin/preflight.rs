use clap::Parser;
use infratest::gcp::storage;
use infratest::terraform::{self, TerraformOptions};
use infratest::utils::logger;

#[derive(Debug, Parser)]
#[command(name = "preflight")]
#[command(about = "Checks that this environment can run infrastructure tests")]
struct PreflightArgs {
    /// Terraform binary to probe
    #[arg(long, default_value = "terraform")]
    terraform_binary: String,

    /// Skip the terraform binary check
    #[arg(long)]
    skip_terraform: bool,

    /// Skip the storage credentials check
    #[arg(long)]
    skip_storage: bool,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = PreflightArgs::parse();

    logger::init_cli_logger(args.verbose);
    tracing::info!("Starting infratest preflight");

    let mut failures = 0;

    if !args.skip_terraform {
        let options = TerraformOptions {
            terraform_binary: Some(args.terraform_binary.clone()),
            ..TerraformOptions::default()
        };

        match terraform::try_run_terraform_command(&options, &["version".to_string()]).await {
            Ok(output) => {
                let version = output.lines().next().unwrap_or("unknown version");
                println!("✅ terraform binary answers: {}", version);
            }
            Err(e) => {
                eprintln!("❌ terraform binary check failed: {}", e);
                failures += 1;
            }
        }
    }

    if !args.skip_storage {
        match storage::try_new_storage_client().await {
            Ok(_) => println!("✅ storage client built from ambient credentials"),
            Err(e) => {
                eprintln!("❌ storage credentials check failed: {}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        eprintln!("❌ preflight failed: {} check(s) did not pass", failures);
        std::process::exit(1);
    }

    println!("✅ preflight passed");
}
