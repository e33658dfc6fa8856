use serde::{Deserialize, Serialize};
use std::fmt;

/// One country's indicator row. `code` is the primary key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
    pub internet_users: Option<f64>,
    pub adult_literacy_rate: Option<f64>,
}

impl Country {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            internet_users: None,
            adult_literacy_rate: None,
        }
    }

    pub fn with_internet_users(mut self, value: Option<f64>) -> Self {
        self.internet_users = value;
        self
    }

    pub fn with_adult_literacy_rate(mut self, value: Option<f64>) -> Self {
        self.adult_literacy_rate = value;
        self
    }

    pub fn get(&self, field: Field) -> Option<f64> {
        field.value(self)
    }

    pub fn set(&mut self, field: Field, value: Option<f64>) {
        match field {
            Field::InternetUsers => self.internet_users = value,
            Field::AdultLiteracyRate => self.adult_literacy_rate = value,
        }
    }
}

/// The two optional numeric columns the statistics run over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    InternetUsers,
    AdultLiteracyRate,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::InternetUsers, Field::AdultLiteracyRate];

    pub fn value(self, country: &Country) -> Option<f64> {
        match self {
            Field::InternetUsers => country.internet_users,
            Field::AdultLiteracyRate => country.adult_literacy_rate,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::InternetUsers => "Internet Users",
            Field::AdultLiteracyRate => "Adult Literacy",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::InternetUsers => write!(f, "internet usage"),
            Field::AdultLiteracyRate => write!(f, "adult literacy"),
        }
    }
}
