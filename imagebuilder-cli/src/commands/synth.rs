//! Synthesis command handlers

use anyhow::{Context, Result};
use colored::*;
use imagebuilder_core::assembly::CloudAssembly;
use imagebuilder_core::construct::App;

use crate::config::Config;

/// Write the cloud assembly and report what was produced
pub fn synth(app: &App, config: &Config) -> Result<()> {
    let assembly = CloudAssembly::write(app, &config.output_dir).with_context(|| {
        format!(
            "Failed to write cloud assembly to {}",
            config.output_dir.display()
        )
    })?;

    println!("{}", "✓ Synthesis complete!".green().bold());
    for (stack_id, artifact) in &assembly.manifest.artifacts {
        println!(
            "  {} {} {}",
            "▸".cyan(),
            stack_id.bold(),
            artifact.environment.dimmed()
        );
    }
    for path in assembly.template_paths() {
        println!("  {} {}", "Created".green(), path.display());
    }

    Ok(())
}

/// Print the configured stack's template to stdout
pub fn print_template(app: &App, config: &Config, compact: bool) -> Result<()> {
    let stack = app
        .stack(&config.stack_id)
        .with_context(|| format!("Stack '{}' not found", config.stack_id))?;

    let template = stack
        .synthesize()
        .with_context(|| format!("Failed to synthesize stack '{}'", stack.id()))?;

    let rendered = if compact {
        template.to_json()?
    } else {
        template.to_json_pretty()?
    };
    println!("{}", rendered);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use imagebuilder_core::stacks::windows::WindowsImageStack;

    #[test]
    fn test_synth_writes_assembly() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            output_dir: dir.path().join("out"),
            ..Config::default()
        };

        let mut app = App::new();
        WindowsImageStack::new(&mut app, &config.stack_id).unwrap();

        synth(&app, &config).unwrap();
        assert!(config.output_dir.join("manifest.json").exists());
        assert!(
            config
                .output_dir
                .join("ImageBuilderStack.template.json")
                .exists()
        );
    }

    #[test]
    fn test_print_template_unknown_stack() {
        let app = App::new();
        let err = print_template(&app, &Config::default(), false).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
