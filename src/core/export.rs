use crate::core::dates::format_export_date;
use crate::domain::model::Dataset;
use crate::domain::ports::Storage;
use crate::utils::error::{DashboardError, Result};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const REPORT_ENTRY: &str = "report.json";

/// UTF-8 CSV with the original header row and no index column.
/// The date column is rewritten in ISO form; every other field is verbatim.
pub fn to_csv(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(dataset.headers())?;

    let date_idx = dataset.date_column();
    for record in dataset.records() {
        let date = format_export_date(record.opened_at);
        writer.write_record(record.fields.iter().enumerate().map(|(i, field)| {
            if i == date_idx {
                date.as_str()
            } else {
                field.as_str()
            }
        }))?;
    }

    writer
        .into_inner()
        .map_err(|e| DashboardError::IoError(e.into_error()))
}

pub struct Exporter<S: Storage> {
    storage: S,
}

impl<S: Storage> Exporter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Write the dataset as `filename`. Returns the number of bytes written.
    pub async fn export_csv(&self, dataset: &Dataset, filename: &str) -> Result<usize> {
        let csv_data = to_csv(dataset)?;
        tracing::debug!("Writing {} ({} bytes) to storage", filename, csv_data.len());
        self.storage.write_file(filename, &csv_data).await?;
        Ok(csv_data.len())
    }

    /// Pack the CSV and a JSON report into one ZIP archive.
    pub async fn export_bundle(
        &self,
        dataset: &Dataset,
        csv_name: &str,
        report: &serde_json::Value,
        zip_name: &str,
    ) -> Result<usize> {
        let csv_data = to_csv(dataset)?;

        tracing::debug!("Creating ZIP bundle {} with {} and {}", zip_name, csv_name, REPORT_ENTRY);
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>(csv_name, FileOptions::default())?;
            zip.write_all(&csv_data)?;

            zip.start_file::<_, ()>(REPORT_ENTRY, FileOptions::default())?;
            zip.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

            zip.finish()?.into_inner()
        };

        self.storage.write_file(zip_name, &zip_data).await?;
        Ok(zip_data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loader::DataLoader;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files.lock().await.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    const SAMPLE: &str = "\
Número,Data de abertura,Papel do criador,Assunto
1001,15/03/2023,Assistente CSF,Troca
1002,02/04/2023 10:15,Assistente CSF CM,\"Pedido, atraso\"
";

    fn dataset() -> Dataset {
        DataLoader::new("Data de abertura", "Papel do criador")
            .parse(SAMPLE.as_bytes())
            .unwrap()
    }

    #[test]
    fn test_to_csv_rewrites_only_dates() {
        let csv = String::from_utf8(to_csv(&dataset()).unwrap()).unwrap();
        assert_eq!(
            csv,
            "Número,Data de abertura,Papel do criador,Assunto\n\
             1001,2023-03-15,Assistente CSF,Troca\n\
             1002,2023-04-02,Assistente CSF CM,\"Pedido, atraso\"\n"
        );
    }

    #[tokio::test]
    async fn test_export_csv_writes_through_storage() {
        let storage = MockStorage::default();
        let exporter = Exporter::new(storage.clone());

        let written = exporter.export_csv(&dataset(), "cases.csv").await.unwrap();

        let data = storage.get_file("cases.csv").await.unwrap();
        assert_eq!(data.len(), written);
        assert!(data.starts_with("Número,".as_bytes()));
    }

    #[tokio::test]
    async fn test_export_bundle_contains_csv_and_report() {
        let storage = MockStorage::default();
        let exporter = Exporter::new(storage.clone());
        let report = serde_json::json!({"role": "Assistente CSF", "total_cases": 1});

        exporter
            .export_bundle(&dataset(), "cases.csv", &report, "cases.zip")
            .await
            .unwrap();

        let zip_bytes = storage.get_file("cases.zip").await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_bytes)).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec!["cases.csv".to_string(), REPORT_ENTRY.to_string()]);

        let mut report_file = archive.by_name(REPORT_ENTRY).unwrap();
        let mut content = String::new();
        std::io::Read::read_to_string(&mut report_file, &mut content).unwrap();
        assert!(content.contains("Assistente CSF"));
    }
}
