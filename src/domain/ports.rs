use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source_location(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn date_column(&self) -> &str;
    fn role_column(&self) -> &str;
    fn locale(&self) -> &str;
    fn output_path(&self) -> &str;
    fn export_filename(&self) -> &str;
}

/// Where the raw CSV bytes come from.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<u8>>;
    fn describe(&self) -> String;
}
