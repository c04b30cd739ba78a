//! Image Builder CLI
//!
//! Synthesizes the Windows image pipeline stack into CloudFormation and
//! inspects its resource graph.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "imagebuilder")]
#[command(about = "Windows Image Builder stack synthesizer", long_about = None)]
struct Cli {
    /// Stack id, also used as the CloudFormation stack name
    #[arg(
        long,
        global = true,
        env = "IMAGEBUILDER_STACK_ID",
        default_value = config::DEFAULT_STACK_ID
    )]
    stack_id: String,

    /// Cloud assembly output directory
    #[arg(
        short,
        long,
        global = true,
        env = "IMAGEBUILDER_OUTPUT_DIR",
        default_value = config::DEFAULT_OUTPUT_DIR
    )]
    output: PathBuf,

    /// Target AWS account
    #[arg(long, global = true, env = "CDK_DEFAULT_ACCOUNT")]
    account: Option<String>,

    /// Target AWS region
    #[arg(long, global = true, env = "CDK_DEFAULT_REGION")]
    region: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            stack_id: self.stack_id.clone(),
            output_dir: self.output.clone(),
            account: self.account.clone(),
            region: self.region.clone(),
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so `template` output can be piped
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imagebuilder=info,imagebuilder_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = cli.config();
    config.validate()?;

    handle_command(cli.command, &config)
}
