pub mod builders;
pub mod check;
pub mod config;
pub mod deployment;
pub mod diff;
pub mod error;
pub mod expressions;
pub mod model;
pub mod resolve;
pub mod writer;

use std::path::{Path, PathBuf};

use console::style;

use crate::config::{config_path, load_config};
use crate::deployment::Deployment;
use crate::error::{ArmforgeError, Result};
use crate::model::ArmTemplate;

const DEFAULT_OUTPUT: &str = "template.json";

/// Options for the `build` operation.
pub struct BuildOptions {
    /// Path to armforge.toml, or a directory containing it.
    pub path: String,
    /// Output file. If None, uses `[deployment].output` or `template.json`
    /// next to the description file.
    pub output: Option<String>,
    /// Replace an existing output file.
    pub overwrite: bool,
}

/// A rendered template that has not been written yet.
#[derive(Debug)]
pub struct BuildPlan {
    pub template: ArmTemplate,
    pub json: String,
    pub output_path: PathBuf,
    /// Current contents of the output file, if it exists.
    pub existing: Option<String>,
    pub overwrite: bool,
}

#[derive(Debug)]
pub struct BuiltTemplate {
    pub output_path: PathBuf,
    pub resource_count: usize,
    pub parameter_count: usize,
}

/// Load the description, resolve it and render the template in memory.
///
/// Nothing is written to disk.
pub fn plan_build(options: BuildOptions) -> Result<BuildPlan> {
    let source = Path::new(&options.path);
    let config = load_config(source)?;

    let output_path = match &options.output {
        Some(out) => PathBuf::from(out),
        None => {
            let description = config_path(source);
            let base = description.parent().unwrap_or(Path::new("."));
            base.join(
                config
                    .deployment
                    .output
                    .as_deref()
                    .unwrap_or(DEFAULT_OUTPUT),
            )
        }
    };

    let template = Deployment::from_config(&config).build()?;
    let json = writer::to_json(&template)?;

    let existing = if output_path.exists() {
        Some(
            std::fs::read_to_string(&output_path).map_err(|e| ArmforgeError::Io {
                context: format!("reading {}", output_path.display()),
                source: e,
            })?,
        )
    } else {
        None
    };

    Ok(BuildPlan {
        template,
        json,
        output_path,
        existing,
        overwrite: options.overwrite,
    })
}

/// Write a planned template to disk and print a summary.
pub fn execute_build(plan: BuildPlan) -> Result<BuiltTemplate> {
    if plan.existing.is_some() && !plan.overwrite {
        return Err(ArmforgeError::OutputExists {
            path: plan.output_path,
        });
    }

    writer::write_template(&plan.output_path, &plan.json)?;

    let built = BuiltTemplate {
        output_path: plan.output_path,
        resource_count: plan.template.resources.len(),
        parameter_count: plan.template.parameters().len(),
    };

    println!(
        "\n{} Template written to {}",
        style("✓").green().bold(),
        style(built.output_path.display()).cyan()
    );
    println!(
        "  {} resources, {} parameters, {} outputs",
        built.resource_count,
        built.parameter_count,
        plan.template.outputs.len()
    );

    Ok(built)
}

/// Build a deployment template from a description file.
pub fn build(options: BuildOptions) -> Result<BuiltTemplate> {
    let plan = plan_build(options)?;
    execute_build(plan)
}
