//! # App Command Implementation
//!
//! This module implements the `app` subcommand group:
//!
//! - **`app preview FILE`**: print the Application descriptors in `FILE`.
//! - **`app preview-resources FILE`**: render every Application and print
//!   the generated resources, grouped by kind.
//! - **`app plan FILE`**: print which origin and revision each source would
//!   be rendered from, without rendering anything.
//!
//! All three accept `-n/--name` to select one Application. Nothing here
//! writes to disk or talks to a cluster.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use gitops_preview::config::{self, Application};
use gitops_preview::credentials::EnvCredentials;
use gitops_preview::defaults::OUTPUT_ENV;
use gitops_preview::output::{self, OutputConfig, OutputFormat};
use gitops_preview::phases::orchestrator;
use gitops_preview::projector;
use gitops_preview::render::DirectoryRenderer;
use gitops_preview::repository::LocalOriginDetector;
use gitops_preview::suggestions;

/// Preview Applications
#[derive(Args, Debug)]
pub struct AppArgs {
    #[command(subcommand)]
    pub command: AppCommand,
}

#[derive(Subcommand, Debug)]
pub enum AppCommand {
    /// Preview Application spec
    Preview(PreviewArgs),

    /// Preview Kubernetes resource(s) generated from an Application
    PreviewResources(PreviewResourcesArgs),

    /// Show how each source of an Application would be rendered
    Plan(PlanArgs),
}

/// Arguments shared by every `app` subcommand
#[derive(Args, Debug)]
pub struct DescriptorArgs {
    /// Path to a YAML file with one or more Application documents.
    #[arg(value_name = "APPMANIFEST")]
    pub file: PathBuf,

    /// Name of the Application to preview.
    #[arg(short, long)]
    pub name: Option<String>,
}

#[derive(Args, Debug)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub descriptor: DescriptorArgs,

    /// Output format.
    #[arg(short, long, value_enum, env = OUTPUT_ENV, default_value = "name")]
    pub output: OutputFormat,
}

#[derive(Args, Debug)]
pub struct PreviewResourcesArgs {
    #[command(flatten)]
    pub descriptor: DescriptorArgs,

    /// Kind of resources to preview (case-insensitive).
    #[arg(short, long)]
    pub kind: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, env = OUTPUT_ENV, default_value = "name")]
    pub output: OutputFormat,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub descriptor: DescriptorArgs,

    /// Output format. `json` and `yaml` print a summary without credentials.
    #[arg(short, long, value_enum, env = OUTPUT_ENV, default_value = "name")]
    pub output: OutputFormat,
}

/// Execute the `app` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: AppArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);

    match args.command {
        AppCommand::Preview(args) => preview(args, &out),
        AppCommand::PreviewResources(args) => preview_resources(args, &out),
        AppCommand::Plan(args) => plan(args, &out),
    }
}

fn preview(args: PreviewArgs, out: &OutputConfig) -> Result<()> {
    let apps = load_applications(&args.descriptor)?;
    let text = match (&args.descriptor.name, apps.as_slice()) {
        (Some(_), [app]) => output::format_application(app, args.output, out)?,
        _ => output::format_applications(&apps, args.output, out)?,
    };
    print!("{}", text);
    Ok(())
}

fn preview_resources(args: PreviewResourcesArgs, out: &OutputConfig) -> Result<()> {
    let apps = load_applications(&args.descriptor)?;

    let detector = LocalOriginDetector::new();
    let renderer = DirectoryRenderer::new();
    let credentials = EnvCredentials::new();

    let mut blocks = Vec::with_capacity(apps.len());
    for app in &apps {
        let documents = orchestrator::generate(app, &detector, &renderer, &credentials)
            .map_err(|e| {
                anyhow::anyhow!(
                    "Failed to generate manifests for app '{}': {}",
                    app.name(),
                    e
                )
            })?;
        let resources = projector::classify(&documents, args.kind.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to read manifests of app '{}': {}", app.name(), e))?;
        blocks.push(output::format_resources(&resources, args.output, out)?);
    }

    print!("{}", output::join_blocks(&blocks, args.output));
    Ok(())
}

fn plan(args: PlanArgs, out: &OutputConfig) -> Result<()> {
    let apps = load_applications(&args.descriptor)?;

    let detector = LocalOriginDetector::new();
    let credentials = EnvCredentials::new();

    let mut blocks = Vec::with_capacity(apps.len());
    for app in &apps {
        let plan = orchestrator::plan(app, &detector, &credentials)
            .map_err(|e| anyhow::anyhow!("Failed to plan app '{}': {}", app.name(), e))?;
        let block = match args.output {
            OutputFormat::Name => output::format_plan(&plan, out),
            OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&plan.summary())?),
            OutputFormat::Yaml => serde_yaml::to_string(&plan.summary())?,
        };
        blocks.push(block);
    }

    print!("{}", output::join_blocks(&blocks, args.output));
    Ok(())
}

/// Loads the descriptor file and applies the `--name` filter.
fn load_applications(args: &DescriptorArgs) -> Result<Vec<Application>> {
    let path = &args.file;
    if !path.exists() {
        return Err(suggestions::descriptor_not_found(path));
    }

    let apps = config::from_file(path).map_err(|e| {
        anyhow::anyhow!("Failed to load descriptor from {}: {}", path.display(), e)
    })?;
    if apps.is_empty() {
        return Err(suggestions::no_applications(path));
    }

    select(apps, args.name.as_deref(), path)
}

fn select(apps: Vec<Application>, name: Option<&str>, path: &Path) -> Result<Vec<Application>> {
    let Some(name) = name else {
        return Ok(apps);
    };

    if !apps.iter().any(|app| app.name() == name) {
        let available: Vec<&str> = apps.iter().map(Application::name).collect();
        return Err(suggestions::application_not_found(name, &available, path));
    }

    Ok(apps.into_iter().filter(|app| app.name() == name).collect())
}
