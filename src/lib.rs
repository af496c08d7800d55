pub mod gcp;
pub mod terraform;
pub mod utils;

pub use terraform::TerraformOptions;
pub use utils::error::{InfraError, Result};
