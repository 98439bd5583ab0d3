use std::path::Path;

use console::style;
use miette::Result;

use armforge_core::check::check_deployment;

pub fn run(path: String) -> Result<()> {
    let description = Path::new(&path);

    println!(
        "{} {}",
        style("Checking deployment at").bold(),
        style(description.display()).cyan()
    );

    let result = check_deployment(description)?;

    println!("  Builders: {}", result.builder_count);
    println!("  Resources: {}", result.resource_count);
    if !result.parameters.is_empty() {
        println!("  Parameters: {}", result.parameters.join(", "));
    }
    if !result.outputs.is_empty() {
        println!("  Outputs: {}", result.outputs.join(", "));
    }

    if !result.warnings.is_empty() {
        println!("\n{}", style("Warnings:").yellow().bold());
        for w in &result.warnings {
            println!("  {} {}", style("⚠").yellow(), w);
        }
    }

    if !result.errors.is_empty() {
        println!("\n{}", style("Errors:").red().bold());
        for e in &result.errors {
            println!("  {} {}", style("✗").red(), e);
        }
        println!(
            "\n{} Deployment has {} error(s)",
            style("✗").red().bold(),
            result.errors.len()
        );
        std::process::exit(1);
    } else {
        println!("\n{} Deployment is valid!", style("✓").green().bold());
    }

    Ok(())
}
