//! Configuration module
//!
//! Settings resolved from command-line flags and their environment fallbacks.

use anyhow::bail;
use imagebuilder_core::construct::Environment;
use std::path::PathBuf;

pub const DEFAULT_STACK_ID: &str = "ImageBuilderStack";
pub const DEFAULT_OUTPUT_DIR: &str = "cdk.out";

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Id of the stack to declare
    pub stack_id: String,

    /// Where `synth` writes the cloud assembly
    pub output_dir: PathBuf,

    pub account: Option<String>,
    pub region: Option<String>,
}

impl Config {
    /// Target environment of the stack
    pub fn environment(&self) -> Environment {
        Environment {
            account: self.account.clone(),
            region: self.region.clone(),
        }
    }

    /// Validates the configuration
    ///
    /// Stack id syntax is checked when the stack is declared.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.stack_id.is_empty() {
            bail!("stack_id cannot be empty");
        }

        if self.output_dir.as_os_str().is_empty() {
            bail!("output_dir cannot be empty");
        }

        if let Some(account) = &self.account {
            if account.len() != 12 || !account.chars().all(|c| c.is_ascii_digit()) {
                bail!("account must be a 12-digit AWS account id");
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stack_id: DEFAULT_STACK_ID.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            account: None,
            region: None,
        }
    }
}
