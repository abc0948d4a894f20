use crate::core::dates::parse_day_first;
use crate::domain::model::{CaseRecord, Dataset};
use crate::domain::ports::DataSource;
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::is_remote;
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Making HTTP request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        tracing::debug!("HTTP response status: {}", status);

        if !status.is_success() {
            return Err(DashboardError::HttpStatusError {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DataSource for FileSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Reading local file: {}", self.path.display());
        Ok(tokio::fs::read(&self.path).await?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// http(s) locations go over the network, anything else is a local path.
pub fn source_for(location: &str, timeout: Duration) -> Result<Box<dyn DataSource>> {
    if is_remote(location) {
        Ok(Box::new(HttpSource::new(location, timeout)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}

/// Parses case CSVs into a [`Dataset`], normalizing the date column on the way.
#[derive(Debug, Clone)]
pub struct DataLoader {
    date_column: String,
    role_column: String,
}

impl DataLoader {
    pub fn new(date_column: impl Into<String>, role_column: impl Into<String>) -> Self {
        Self {
            date_column: date_column.into(),
            role_column: role_column.into(),
        }
    }

    /// Fetch and parse in one go. Any failure aborts the whole load.
    pub async fn load(&self, source: &dyn DataSource) -> Result<Dataset> {
        tracing::info!("📥 Loading dataset from {}", source.describe());
        let bytes = source.fetch().await?;
        tracing::debug!("Fetched {} bytes", bytes.len());

        let dataset = self.parse(&bytes)?;
        tracing::info!(
            "✅ Loaded {} cases ({} columns)",
            dataset.len(),
            dataset.headers().len()
        );
        Ok(dataset)
    }

    pub fn parse(&self, bytes: &[u8]) -> Result<Dataset> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let date_idx = self.column_index(&headers, &self.date_column)?;
        let role_idx = self.column_index(&headers, &self.role_column)?;

        let mut records = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let fields: Vec<String> = result?.iter().map(str::to_string).collect();

            let raw_date = &fields[date_idx];
            let opened_at =
                parse_day_first(raw_date).ok_or_else(|| DashboardError::DateParseError {
                    column: self.date_column.clone(),
                    row: row + 1,
                    value: raw_date.clone(),
                })?;

            records.push(CaseRecord {
                opened_at,
                creator_role: fields[role_idx].clone(),
                fields,
            });
        }

        Ok(Dataset::new(headers, date_idx, role_idx, records))
    }

    fn column_index(&self, headers: &[String], column: &str) -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| DashboardError::MissingColumnError {
                column: column.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SAMPLE: &str = "\
Número,Data de abertura,Papel do criador,Assunto
1001,15/03/2023,Assistente CSF,Troca
1002,02/04/2023 10:15,Assistente CSF CM,\"Pedido, atraso\"
1003,30/04/2023,,Reembolso
";

    fn loader() -> DataLoader {
        DataLoader::new("Data de abertura", "Papel do criador")
    }

    #[test]
    fn test_parse_sample() {
        let dataset = loader().parse(SAMPLE.as_bytes()).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.date_column_name(), "Data de abertura");
        assert_eq!(dataset.role_column_name(), "Papel do criador");

        let first = &dataset.records()[0];
        assert_eq!(first.opened_at, NaiveDate::from_ymd_opt(2023, 3, 15).unwrap());
        assert_eq!(first.creator_role, "Assistente CSF");

        let second = &dataset.records()[1];
        assert_eq!(second.opened_at, NaiveDate::from_ymd_opt(2023, 4, 2).unwrap());
        assert_eq!(second.fields[3], "Pedido, atraso");

        assert_eq!(dataset.records()[2].creator_role, "");
    }

    #[test]
    fn test_parse_strips_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(SAMPLE.as_bytes());
        let dataset = loader().parse(&bytes).unwrap();
        assert_eq!(dataset.headers()[0], "Número");
    }

    #[test]
    fn test_missing_column_fails_load() {
        let err = DataLoader::new("Opened", "Papel do criador")
            .parse(SAMPLE.as_bytes())
            .unwrap_err();
        assert!(matches!(err, DashboardError::MissingColumnError { column } if column == "Opened"));
    }

    #[test]
    fn test_bad_date_fails_whole_load() {
        let csv = "Data de abertura,Papel do criador\n01/01/2023,A\n2023/13/45,A\n";
        let err = loader().parse(csv.as_bytes()).unwrap_err();
        match err {
            DashboardError::DateParseError { row, value, .. } => {
                assert_eq!(row, 2);
                assert_eq!(value, "2023/13/45");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_two_digit_years_land_in_this_century() {
        let csv = "Data de abertura,Papel do criador\n15/03/23,A\n01/02/2024,A\n";
        let dataset = loader().parse(csv.as_bytes()).unwrap();

        let bounds = dataset.date_bounds().unwrap();
        assert_eq!(bounds.start, NaiveDate::from_ymd_opt(2023, 3, 15).unwrap());
        assert_eq!(bounds.end, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }

    #[test]
    fn test_three_digit_year_fails_load() {
        let csv = "Data de abertura,Papel do criador\n15/03/2023,A\n15/03/202,A\n";
        let err = loader().parse(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::DateParseError { row: 2, ref value, .. } if value == "15/03/202"
        ));
    }

    #[test]
    fn test_ragged_rows_are_csv_errors() {
        let csv = "Data de abertura,Papel do criador\n01/01/2023,A,extra\n";
        let err = loader().parse(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DashboardError::CsvError(_)));
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        let csv = "Data de abertura,Papel do criador\n";
        let dataset = loader().parse(csv.as_bytes()).unwrap();
        assert!(dataset.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = FileSource::new("/definitely/not/here.csv");
        let err = loader().load(&source).await.unwrap_err();
        assert!(matches!(err, DashboardError::IoError(_)));
    }

    #[test]
    fn test_source_for_dispatch() {
        let timeout = Duration::from_secs(5);
        let remote = source_for("https://example.com/data.csv", timeout).unwrap();
        assert_eq!(remote.describe(), "https://example.com/data.csv");
        let local = source_for("data/report.csv", timeout).unwrap();
        assert_eq!(local.describe(), "data/report.csv");
    }
}
