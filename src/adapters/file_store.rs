use crate::adapters::memory_store::MemoryStore;
use crate::core::{Country, CountryStore, DataFormat, Storage};
use crate::utils::error::{Result, StatsError};
use async_trait::async_trait;

const CSV_HEADER: [&str; 4] = ["code", "name", "internet_users", "adult_literacy_rate"];

/// A country table persisted as one CSV or JSON file.
///
/// The file is read once on open. Every mutation is applied to a copy of the
/// table, the copy is written out, and only then does it replace the live
/// table, so a failed write leaves the store unchanged.
pub struct FileStore<S: Storage> {
    storage: S,
    path: String,
    format: DataFormat,
    table: MemoryStore,
}

impl<S: Storage> FileStore<S> {
    pub async fn open(storage: S, path: impl Into<String>, format: DataFormat) -> Result<Self> {
        let path = path.into();

        let table = if storage.exists(&path).await {
            let bytes = storage.read_file(&path).await?;
            let countries = decode(&bytes, format)?;
            tracing::debug!("Loaded {} countries from {}", countries.len(), path);
            MemoryStore::from_countries(countries)?
        } else {
            tracing::warn!("Data file {} not found, starting with an empty table", path);
            MemoryStore::new()
        };

        Ok(Self {
            storage,
            path,
            format,
            table,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn countries(&self) -> &[Country] {
        self.table.countries()
    }

    async fn commit(&mut self, next: MemoryStore) -> Result<()> {
        let bytes = encode(next.countries(), self.format)?;
        tracing::debug!("Writing {} countries ({} bytes) to {}", next.len(), bytes.len(), self.path);
        self.storage
            .write_file(&self.path, &bytes)
            .await
            .map_err(|e| match e {
                StatsError::IoError(source) => StatsError::StorageError {
                    path: self.path.clone(),
                    source,
                },
                other => other,
            })?;
        self.table = next;
        Ok(())
    }
}

pub fn decode(bytes: &[u8], format: DataFormat) -> Result<Vec<Country>> {
    match format {
        DataFormat::Csv => {
            let mut reader = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .from_reader(bytes);
            let mut countries = Vec::new();
            for row in reader.deserialize::<Country>() {
                countries.push(row?);
            }
            Ok(countries)
        }
        DataFormat::Json => {
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(Vec::new());
            }
            Ok(serde_json::from_slice(bytes)?)
        }
    }
}

pub fn encode(countries: &[Country], format: DataFormat) -> Result<Vec<u8>> {
    match format {
        DataFormat::Csv => {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(Vec::new());
            writer.write_record(CSV_HEADER)?;
            for country in countries {
                writer.serialize(country)?;
            }
            writer
                .into_inner()
                .map_err(|e| StatsError::IoError(e.into_error()))
        }
        DataFormat::Json => Ok(serde_json::to_vec_pretty(countries)?),
    }
}

#[async_trait]
impl<S: Storage> CountryStore for FileStore<S> {
    async fn fetch_all(&self) -> Result<Vec<Country>> {
        self.table.fetch_all().await
    }

    async fn get_by_code(&self, code: &str) -> Result<Country> {
        self.table.get_by_code(code).await
    }

    async fn add(&mut self, country: Country) -> Result<()> {
        let mut next = self.table.clone();
        next.insert(country)?;
        self.commit(next).await
    }

    async fn update(&mut self, code: &str, country: Country) -> Result<()> {
        let mut next = self.table.clone();
        next.replace(code, country)?;
        self.commit(next).await
    }

    async fn delete(&mut self, code: &str) -> Result<Country> {
        let mut next = self.table.clone();
        let removed = next.remove(code)?;
        self.commit(next).await?;
        Ok(removed)
    }
}
