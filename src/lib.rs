pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::DashboardConfig};
pub use crate::core::{dashboard::Dashboard, dates::MonthLocale, loader::DataLoader};
pub use domain::model::Selection;
pub use utils::error::{DashboardError, Result};
