use crate::core::{Country, CountryStore};
use crate::utils::error::{Result, StatsError};
use crate::utils::validation::sanitize_percent;
use async_trait::async_trait;

/// Countries held in insertion order, unique by upper-cased code.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    countries: Vec<Country>,
}

fn normalize_key(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Brings a record in line with the table invariants: upper-case code and
/// percentages inside [0, 100] or absent.
fn normalize_record(mut country: Country) -> Country {
    country.code = normalize_key(&country.code);
    country.internet_users = sanitize_percent(country.internet_users);
    country.adult_literacy_rate = sanitize_percent(country.adult_literacy_rate);
    country
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from loaded records, rejecting duplicate codes.
    pub fn from_countries(countries: Vec<Country>) -> Result<Self> {
        let mut store = Self::new();
        for country in countries {
            store.insert(country)?;
        }
        Ok(store)
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    fn position(&self, code: &str) -> Option<usize> {
        let key = normalize_key(code);
        self.countries.iter().position(|c| c.code == key)
    }

    fn position_or_missing(&self, code: &str) -> Result<usize> {
        self.position(code).ok_or_else(|| StatsError::CountryNotFound {
            code: normalize_key(code),
        })
    }

    pub(crate) fn insert(&mut self, country: Country) -> Result<()> {
        let country = normalize_record(country);
        if self.position(&country.code).is_some() {
            return Err(StatsError::DuplicateCode { code: country.code });
        }
        self.countries.push(country);
        Ok(())
    }

    pub(crate) fn replace(&mut self, code: &str, country: Country) -> Result<()> {
        let index = self.position_or_missing(code)?;
        let country = normalize_record(country);
        if let Some(other) = self.position(&country.code) {
            if other != index {
                return Err(StatsError::DuplicateCode { code: country.code });
            }
        }
        self.countries[index] = country;
        Ok(())
    }

    pub(crate) fn remove(&mut self, code: &str) -> Result<Country> {
        let index = self.position_or_missing(code)?;
        Ok(self.countries.remove(index))
    }
}

#[async_trait]
impl CountryStore for MemoryStore {
    async fn fetch_all(&self) -> Result<Vec<Country>> {
        Ok(self.countries.clone())
    }

    async fn get_by_code(&self, code: &str) -> Result<Country> {
        let index = self.position_or_missing(code)?;
        Ok(self.countries[index].clone())
    }

    async fn add(&mut self, country: Country) -> Result<()> {
        self.insert(country)
    }

    async fn update(&mut self, code: &str, country: Country) -> Result<()> {
        self.replace(code, country)
    }

    async fn delete(&mut self, code: &str) -> Result<Country> {
        self.remove(code)
    }
}
