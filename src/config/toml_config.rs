use crate::core::dates::SUPPORTED_LOCALES;
use crate::core::ConfigProvider;
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/Brunosilva-data/Atendimento_WhatsApp/main/Report_WhatsApp_2023_2024.csv";
pub const DEFAULT_DATE_COLUMN: &str = "Data de abertura";
pub const DEFAULT_ROLE_COLUMN: &str = "Papel do criador";
pub const DEFAULT_LOCALE: &str = "pt";
pub const DEFAULT_EXPORT_FILENAME: &str = "Report_WhatsApp_2023_2024.csv";
pub const DEFAULT_BUNDLE_FILENAME: &str = "Report_WhatsApp_2023_2024.zip";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub columns: ColumnConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub location: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: DEFAULT_SOURCE_URL.to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub date: String,
    pub role: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            date: DEFAULT_DATE_COLUMN.to_string(),
            role: DEFAULT_ROLE_COLUMN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub locale: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_path: String,
    pub filename: String,
    pub compression: Option<CompressionConfig>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: ".".to_string(),
            filename: DEFAULT_EXPORT_FILENAME.to_string(),
            compression: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: Option<String>,
}

impl DashboardConfig {
    /// Load the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashboardError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse the configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashboardError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Substitute `${VAR}` references (e.g. `${CASES_CSV_URL}`); unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashboardError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn compression_enabled(&self) -> bool {
        self.export
            .compression
            .as_ref()
            .map(|c| c.enabled)
            .unwrap_or(false)
    }

    /// Bundle filename; defaults to the CSV filename with a `.zip` extension.
    pub fn bundle_filename(&self) -> String {
        self.export
            .compression
            .as_ref()
            .and_then(|c| c.filename.clone())
            .unwrap_or_else(|| {
                Path::new(&self.export.filename)
                    .with_extension("zip")
                    .to_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| DEFAULT_BUNDLE_FILENAME.to_string())
            })
    }

    /// Check that the configured values are usable.
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_source("source.location", &self.source.location)?;

        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_range("source.timeout_seconds", timeout, 1, 600)?;
        }

        validation::validate_non_empty_string("columns.date", &self.columns.date)?;
        validation::validate_non_empty_string("columns.role", &self.columns.role)?;
        if self.columns.date.trim() == self.columns.role.trim() {
            return Err(DashboardError::InvalidConfigValueError {
                field: "columns.role".to_string(),
                value: self.columns.role.clone(),
                reason: "Date and role columns must be different".to_string(),
            });
        }

        validation::validate_one_of("display.locale", &self.display.locale, SUPPORTED_LOCALES)?;

        validation::validate_path("export.output_path", &self.export.output_path)?;
        validation::validate_file_extension("export.filename", &self.export.filename, &["csv"])?;
        if self.compression_enabled() {
            validation::validate_file_extension(
                "export.compression.filename",
                &self.bundle_filename(),
                &["zip"],
            )?;
        }

        Ok(())
    }
}

impl ConfigProvider for DashboardConfig {
    fn source_location(&self) -> &str {
        &self.source.location
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds()
    }

    fn date_column(&self) -> &str {
        &self.columns.date
    }

    fn role_column(&self) -> &str {
        &self.columns.role
    }

    fn locale(&self) -> &str {
        &self.display.locale
    }

    fn output_path(&self) -> &str {
        &self.export.output_path
    }

    fn export_filename(&self) -> &str {
        &self.export.filename
    }
}

impl Validate for DashboardConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[source]
location = "https://example.com/cases.csv"
timeout_seconds = 10

[columns]
date = "Opened"
role = "Creator role"

[display]
locale = "en"

[export]
output_path = "./out"
filename = "cases.csv"

[export.compression]
enabled = true
filename = "cases_bundle.zip"
"#;

        let config = DashboardConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.source_location(), "https://example.com/cases.csv");
        assert_eq!(config.timeout_seconds(), 10);
        assert_eq!(config.date_column(), "Opened");
        assert_eq!(config.role_column(), "Creator role");
        assert_eq!(config.locale(), "en");
        assert!(config.compression_enabled());
        assert_eq!(config.bundle_filename(), "cases_bundle.zip");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = DashboardConfig::from_toml_str("").unwrap();

        assert_eq!(config.source_location(), DEFAULT_SOURCE_URL);
        assert_eq!(config.date_column(), DEFAULT_DATE_COLUMN);
        assert_eq!(config.role_column(), DEFAULT_ROLE_COLUMN);
        assert_eq!(config.locale(), "pt");
        assert_eq!(config.timeout_seconds(), DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(config.export_filename(), DEFAULT_EXPORT_FILENAME);
        assert!(!config.compression_enabled());
        assert_eq!(config.bundle_filename(), DEFAULT_BUNDLE_FILENAME);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CASE_DASHBOARD_TEST_SOURCE", "https://test.example.com/r.csv");

        let toml_content = r#"
[source]
location = "${CASE_DASHBOARD_TEST_SOURCE}"
"#;

        let config = DashboardConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.location, "https://test.example.com/r.csv");

        std::env::remove_var("CASE_DASHBOARD_TEST_SOURCE");
    }

    #[test]
    fn test_config_validation() {
        let bad_locale = DashboardConfig::from_toml_str("[display]\nlocale = \"fr\"\n").unwrap();
        assert!(bad_locale.validate().is_err());

        let bad_url = DashboardConfig::from_toml_str("[source]\nlocation = \"ftp://x/y.csv\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let same_columns =
            DashboardConfig::from_toml_str("[columns]\ndate = \"A\"\nrole = \"A\"\n").unwrap();
        assert!(same_columns.validate().is_err());

        let bad_export = DashboardConfig::from_toml_str(
            "[export]\noutput_path = \".\"\nfilename = \"cases.txt\"\n",
        )
        .unwrap();
        assert!(bad_export.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = DashboardConfig::from_toml_str("[source\nlocation = 1").unwrap_err();
        assert!(matches!(err, DashboardError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[source]
location = "./data/cases.csv"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = DashboardConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.source_location(), "./data/cases.csv");
    }
}
