pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::dates::parse_day_first;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use chrono::NaiveDate;
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use toml_config::DashboardConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "case-dashboard")]
#[command(about = "Monthly case volume dashboard for customer-service CSV reports")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// CSV location: http(s) URL or local path
    #[arg(long, global = true)]
    pub source: Option<String>,

    #[arg(long, global = true)]
    pub date_column: Option<String>,

    #[arg(long, global = true)]
    pub role_column: Option<String>,

    /// Month and trend wording: pt or en
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Metrics, monthly volume and role comparison for one selection
    Report(ReportArgs),
    /// List selectable roles and the available date range
    Roles,
    /// Show how the dataset was extracted and what the indicators mean
    Wiki,
    /// Write the normalized dataset as CSV
    Export(ExportArgs),
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    /// Creator role to analyse (defaults to the first role in the data)
    #[arg(long)]
    pub role: Option<String>,

    /// Start date, DD/MM/YYYY
    #[arg(long, value_parser = parse_cli_date)]
    pub start: Option<NaiveDate>,

    /// End date, DD/MM/YYYY
    #[arg(long, value_parser = parse_cli_date)]
    pub end: Option<NaiveDate>,

    /// Print the chart payload as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Output directory
    #[arg(short, long)]
    pub output: Option<String>,

    /// CSV file name
    #[arg(long)]
    pub filename: Option<String>,

    /// Pack the CSV and a JSON report into a ZIP archive
    #[arg(long)]
    pub zip: bool,
}

#[cfg(feature = "cli")]
fn parse_cli_date(value: &str) -> std::result::Result<NaiveDate, String> {
    parse_day_first(value).ok_or_else(|| format!("'{}' is not a DD/MM/YYYY date", value))
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Merge settings: command line > TOML file > defaults.
    pub fn resolve(&self) -> Result<DashboardConfig> {
        let base = match &self.config {
            Some(path) => DashboardConfig::from_file(path)?,
            None => DashboardConfig::default(),
        };
        Ok(self.apply_overrides(base))
    }

    pub fn apply_overrides(&self, mut config: DashboardConfig) -> DashboardConfig {
        if let Some(source) = &self.source {
            config.source.location = source.clone();
        }
        if let Some(timeout) = self.timeout {
            config.source.timeout_seconds = Some(timeout);
        }
        if let Some(date_column) = &self.date_column {
            config.columns.date = date_column.clone();
        }
        if let Some(role_column) = &self.role_column {
            config.columns.role = role_column.clone();
        }
        if let Some(locale) = &self.locale {
            config.display.locale = locale.clone();
        }

        if let Command::Export(export) = &self.command {
            if let Some(output) = &export.output {
                config.export.output_path = output.clone();
            }
            if let Some(filename) = &export.filename {
                config.export.filename = filename.clone();
            }
            if export.zip {
                let compression = config
                    .export
                    .compression
                    .get_or_insert(toml_config::CompressionConfig {
                        enabled: true,
                        filename: None,
                    });
                compression.enabled = true;
            }
        }

        config
    }
}
