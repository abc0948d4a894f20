use crate::app::presenter::chart_payload;
use crate::config::cli::LocalStorage;
use crate::config::toml_config::DashboardConfig;
use crate::core::dashboard::Dashboard;
use crate::core::dates::{MonthLocale, SUPPORTED_LOCALES};
use crate::core::export::Exporter;
use crate::core::loader::{source_for, DataLoader};
use crate::core::ConfigProvider;
use crate::domain::model::Selection;
use crate::utils::error::{DashboardError, Result};
use std::time::Duration;

pub fn locale_for<C: ConfigProvider>(config: &C) -> Result<MonthLocale> {
    MonthLocale::from_code(config.locale()).ok_or_else(|| DashboardError::InvalidConfigValueError {
        field: "display.locale".to_string(),
        value: config.locale().to_string(),
        reason: format!("Supported values: {}", SUPPORTED_LOCALES.join(", ")),
    })
}

/// Load the configured CSV once and wrap it in a [`Dashboard`].
pub async fn load_dashboard<C: ConfigProvider>(config: &C) -> Result<Dashboard> {
    let locale = locale_for(config)?;
    let source = source_for(
        config.source_location(),
        Duration::from_secs(config.timeout_seconds()),
    )?;
    let loader = DataLoader::new(config.date_column(), config.role_column());

    let dataset = loader.load(source.as_ref()).await?;
    Ok(Dashboard::new(dataset, locale))
}

/// Write the normalized dataset under `export.output_path`. With compression
/// enabled the CSV is bundled with the report for the default selection.
/// Returns the path written.
pub async fn export_dataset(dashboard: &Dashboard, config: &DashboardConfig) -> Result<String> {
    let storage = LocalStorage::new(config.output_path());
    let exporter = Exporter::new(storage.clone());

    let filename = if config.compression_enabled() {
        let bundle = config.bundle_filename();
        let report = match dashboard.default_role() {
            Some(role) => {
                let view = dashboard.view(&Selection::for_role(role))?;
                serde_json::to_value(chart_payload(&view, dashboard.locale()))?
            }
            None => serde_json::Value::Null,
        };
        let size = exporter
            .export_bundle(dashboard.dataset(), config.export_filename(), &report, &bundle)
            .await?;
        tracing::info!("📦 Wrote {} ({} bytes)", bundle, size);
        bundle
    } else {
        let size = exporter
            .export_csv(dashboard.dataset(), config.export_filename())
            .await?;
        tracing::info!("💾 Wrote {} ({} bytes)", config.export_filename(), size);
        config.export_filename().to_string()
    };

    Ok(storage.full_path(&filename).display().to_string())
}
