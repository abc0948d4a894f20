pub mod aggregate;
pub mod dashboard;
pub mod dates;
pub mod export;
pub mod filter;
pub mod loader;
pub mod metrics;

pub use crate::domain::model::{CaseRecord, Dataset, DashboardView, Metrics, MonthlySeries};
pub use crate::domain::ports::{ConfigProvider, DataSource, Storage};
pub use crate::utils::error::Result;
