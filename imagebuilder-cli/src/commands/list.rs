//! List command handler

use anyhow::Result;
use colored::*;
use imagebuilder_core::construct::{App, Stack};

/// Print every stack with its resources
pub fn list_stacks(app: &App, long: bool) -> Result<()> {
    if app.stacks().is_empty() {
        println!("{}", "No stacks declared.".yellow());
        return Ok(());
    }

    for stack in app.stacks() {
        for line in stack_lines(stack, long) {
            println!("{}", line);
        }
        println!();
    }

    Ok(())
}

/// Render one stack: a header, one line per resource and, with `long`,
/// one line per reference edge
fn stack_lines(stack: &Stack, long: bool) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {}",
        stack.id().bold(),
        stack.props().env.to_string().dimmed()
    )];

    for entry in stack.resources() {
        lines.push(format!(
            "  {} {} {}",
            "▸".cyan(),
            entry.logical_id,
            entry.resource.type_name().dimmed()
        ));
    }

    if long {
        let references = stack.references();
        if !references.is_empty() {
            lines.push(format!("  {}", "References:".bold()));
            for reference in references {
                lines.push(format!(
                    "    {}.{} → {}",
                    reference.from,
                    reference.property.dimmed(),
                    reference.target.logical_id.cyan()
                ));
            }
        }
    }

    lines
}
