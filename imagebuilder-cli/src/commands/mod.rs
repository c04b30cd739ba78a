//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod list;
mod synth;

use anyhow::{Context, Result};
use clap::Subcommand;
use imagebuilder_core::construct::{App, StackProps};
use imagebuilder_core::stacks::windows::WindowsImageStack;
use tracing::info;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Write the cloud assembly (templates and manifest) to the output directory
    Synth,
    /// Print the stack template to stdout
    Template {
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// List stacks and their resources
    List {
        /// Also show references between resources
        #[arg(short, long)]
        long: bool,
    },
}

/// Handle a CLI command
///
/// Declares the app, then routes the command to its handler.
pub fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let app = build_app(config)?;

    match command {
        Commands::Synth => synth::synth(&app, config),
        Commands::Template { compact } => synth::print_template(&app, config, compact),
        Commands::List { long } => list::list_stacks(&app, long),
    }
}

/// Declare the app with the configured stack
fn build_app(config: &Config) -> Result<App> {
    let mut app = App::new();

    let props = StackProps {
        description: None,
        env: config.environment(),
    };
    let env = props.env.to_string();
    WindowsImageStack::with_props(&mut app, &config.stack_id, props)
        .with_context(|| format!("Failed to declare stack '{}'", config.stack_id))?;

    info!("Declared stack {} ({})", config.stack_id, env);

    Ok(app)
}
