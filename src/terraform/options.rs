use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options passed through to every terraform invocation.
///
/// Variables live in a `BTreeMap` so the generated `-var` flags come out in a
/// stable key order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerraformOptions {
    /// Directory the command runs in.
    pub terraform_dir: PathBuf,

    /// Variables forwarded as `-var key=value` flags. String values are
    /// rendered bare; everything else is rendered as JSON.
    pub vars: BTreeMap<String, Value>,

    /// Extra environment variables for the spawned process.
    pub env_vars: BTreeMap<String, String>,

    /// Overrides the binary name; `terraform` when unset.
    pub terraform_binary: Option<String>,
}

impl Default for TerraformOptions {
    fn default() -> Self {
        Self {
            terraform_dir: PathBuf::from("."),
            vars: BTreeMap::new(),
            env_vars: BTreeMap::new(),
            terraform_binary: None,
        }
    }
}

impl TerraformOptions {
    pub fn new(terraform_dir: impl Into<PathBuf>) -> Self {
        Self {
            terraform_dir: terraform_dir.into(),
            ..Self::default()
        }
    }

    pub(crate) fn binary(&self) -> &str {
        self.terraform_binary.as_deref().unwrap_or("terraform")
    }
}
