use armforge_core::diff::unified_diff;
use armforge_core::BuildOptions;
use console::style;
use miette::Result;

pub fn run(path: String, output: Option<String>, overwrite: bool, dry_run: bool) -> Result<()> {
    let options = BuildOptions {
        path,
        output,
        overwrite,
    };

    if !dry_run {
        armforge_core::build(options)?;
        return Ok(());
    }

    let plan = armforge_core::plan_build(options)?;

    let changes = plan
        .existing
        .as_deref()
        .map(|existing| unified_diff(existing, &plan.json, &plan.output_path));

    match changes {
        Some(None) => {
            println!(
                "{} {} is up to date",
                style("==>").cyan().bold(),
                style(plan.output_path.display()).cyan()
            );
        }
        Some(Some(diff)) => {
            println!(
                "{} Changes to {}:",
                style("==>").cyan().bold(),
                style(plan.output_path.display()).cyan()
            );
            for line in diff.lines() {
                let styled = if line.starts_with('+') && !line.starts_with("+++") {
                    style(line).green()
                } else if line.starts_with('-') && !line.starts_with("---") {
                    style(line).red()
                } else {
                    style(line).dim()
                };
                println!("{styled}");
            }
        }
        None => {
            println!(
                "{} Template that would be written to {}:",
                style("==>").cyan().bold(),
                style(plan.output_path.display()).cyan()
            );
            print!("{}", plan.json);
        }
    }

    println!(
        "\nSummary: {} resources, {} parameters, {} outputs",
        plan.template.resources.len(),
        plan.template.parameters().len(),
        plan.template.outputs.len()
    );
    println!(
        "\n{} Dry run: no files written.",
        style("\u{2139}").blue().bold()
    );

    Ok(())
}
