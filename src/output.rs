//! # Output Formatting
//!
//! This module renders previews for the terminal and decides whether the
//! terminal gets color.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Formats
//!
//! Every `format_*` function returns the full text to print, so commands
//! stay a thin `print!` over these helpers and the layout is testable.

use std::env;

use clap::ValueEnum;
use console::style;

use crate::config::Application;
use crate::error::Result;
use crate::phases::RenderPlan;
use crate::projector::ResourcesByKind;

/// Output configuration for controlling colors.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether headers should be styled.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stdout is not a TTY (unless `CLICOLOR_FORCE=1`)
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Output format for previews
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// `kind/name` listing
    #[default]
    Name,
    /// Pretty-printed JSON
    Json,
    /// YAML documents
    Yaml,
}

/// Styles a table header when color is enabled.
pub fn header(config: &OutputConfig, text: &str) -> String {
    if config.use_color {
        style(text).bold().force_styling(true).to_string()
    } else {
        text.to_string()
    }
}

/// Formats grouped resources.
pub fn format_resources(
    grouped: &ResourcesByKind,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String> {
    let mut blocks = Vec::with_capacity(grouped.len());

    for (kind, resources) in grouped {
        let block = match format {
            OutputFormat::Name => {
                let mut block = header(config, "NAME");
                for resource in resources {
                    block.push('\n');
                    block.push_str(&format!("{}/{}", kind, resource.name()));
                }
                block.push('\n');
                block
            }
            OutputFormat::Json => {
                let mut block = serde_json::to_string_pretty(resources)?;
                block.push('\n');
                block
            }
            OutputFormat::Yaml => {
                let mut documents = Vec::with_capacity(resources.len());
                for resource in resources {
                    documents.push(serde_yaml::to_string(resource)?);
                }
                documents.join("---\n")
            }
        };
        blocks.push(block);
    }

    Ok(join_blocks(&blocks, format))
}

/// Joins formatted blocks so that the result stays one valid stream: YAML
/// blocks are separated by `---`, the others by a blank line. Empty blocks
/// are skipped.
pub fn join_blocks<S: AsRef<str>>(blocks: &[S], format: OutputFormat) -> String {
    let separator = match format {
        OutputFormat::Yaml => "---\n",
        _ => "\n",
    };
    blocks
        .iter()
        .map(AsRef::as_ref)
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Formats descriptors as a list, with `apiVersion` and `kind` filled in.
pub fn format_applications(
    applications: &[Application],
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String> {
    let typed: Vec<Application> = applications.iter().map(Application::with_type_meta).collect();

    let text = match format {
        OutputFormat::Name => {
            let mut text = header(config, "NAME");
            text.push('\n');
            for app in &typed {
                text.push_str(&format!("application/{}\n", app.name()));
            }
            text
        }
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(&typed)?;
            text.push('\n');
            text
        }
        OutputFormat::Yaml => serde_yaml::to_string(&typed)?,
    };
    Ok(text)
}

/// Formats one selected descriptor as an object.
pub fn format_application(
    application: &Application,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String> {
    let typed = application.with_type_meta();

    let text = match format {
        OutputFormat::Name => {
            format_applications(std::slice::from_ref(application), format, config)?
        }
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(&typed)?;
            text.push('\n');
            text
        }
        OutputFormat::Yaml => serde_yaml::to_string(&typed)?,
    };
    Ok(text)
}

/// Formats a plan: one line per renderer invocation, then the references.
pub fn format_plan(plan: &RenderPlan, config: &OutputConfig) -> String {
    let mut text = format!(
        "{} {} ({} source{})\n",
        header(config, "APPLICATION"),
        plan.application,
        plan.len(),
        if plan.len() == 1 { "" } else { "s" }
    );

    for planned in &plan.sources {
        let kind = if planned.origin.is_local() {
            "local"
        } else {
            "remote"
        };
        text.push_str(&format!(
            "  [{}] {} {} @ {}",
            planned.index,
            kind,
            planned.origin.url(),
            planned.source.target_revision
        ));
        if let Some(path) = &planned.source.path {
            text.push_str(&format!(" path={}", path));
        }
        if planned.source.is_registry() {
            text.push_str(&format!(" chart={}", planned.source.chart));
        }
        text.push('\n');
    }

    if !plan.references.is_empty() {
        text.push_str(&header(config, "REFERENCES"));
        text.push('\n');
        for (key, target) in &plan.references {
            text.push_str(&format!(
                "  {} -> {} @ {}\n",
                key, target.repo_url, target.target_revision
            ));
        }
    }

    text
}
