use crate::core::aggregator::{self, CorrelationMode};
use crate::domain::model::{Country, Field};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extremum {
    pub code: String,
    pub name: String,
    pub value: f64,
}

impl Extremum {
    fn from_country(country: &Country, field: Field) -> Option<Self> {
        Some(Self {
            code: country.code.clone(),
            name: country.name.clone(),
            value: field.value(country)?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldSummary {
    pub field: Field,
    pub count: usize,
    pub mean: Option<f64>,
    pub max: Option<Extremum>,
    pub min: Option<Extremum>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CorrelationSummary {
    pub mode: CorrelationMode,
    pub paired: usize,
    pub coefficient: Option<f64>,
}

/// Every metric over one snapshot. A metric that cannot be computed is left
/// empty and its reason recorded in `notes`.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsReport {
    pub generated_at: DateTime<Utc>,
    pub total_records: usize,
    pub fields: Vec<FieldSummary>,
    pub correlation: CorrelationSummary,
    pub notes: Vec<String>,
}

fn keep<T>(result: Result<T>, notes: &mut Vec<String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Metric skipped: {}", e);
            let note = e.to_string();
            if !notes.contains(&note) {
                notes.push(note);
            }
            None
        }
    }
}

impl StatisticsReport {
    pub fn compute(records: &[Country], mode: CorrelationMode) -> Self {
        let mut notes = Vec::new();

        let fields = Field::ALL
            .iter()
            .map(|&field| {
                let max = keep(aggregator::max_by_field(records, field), &mut notes);
                let min = keep(aggregator::min_by_field(records, field), &mut notes);
                FieldSummary {
                    field,
                    count: aggregator::with_field(records, field).len(),
                    mean: keep(aggregator::mean(records, field), &mut notes),
                    max: max.and_then(|c| Extremum::from_country(c, field)),
                    min: min.and_then(|c| Extremum::from_country(c, field)),
                }
            })
            .collect();

        let coefficient = keep(
            aggregator::correlation_between(
                records,
                Field::InternetUsers,
                Field::AdultLiteracyRate,
                mode,
            ),
            &mut notes,
        );

        Self {
            generated_at: Utc::now(),
            total_records: records.len(),
            fields,
            correlation: CorrelationSummary {
                mode,
                paired: aggregator::with_both_fields(records).len(),
                coefficient,
            },
            notes,
        }
    }

    pub fn field(&self, field: Field) -> Option<&FieldSummary> {
        self.fields.iter().find(|summary| summary.field == field)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();

        for summary in &self.fields {
            let noun = summary.field.to_string();
            if let Some(max) = &summary.max {
                let _ = writeln!(
                    out,
                    "Country with greatest {} percent: {} --> {:.2}",
                    noun, max.name, max.value
                );
            }
            if let Some(min) = &summary.min {
                let _ = writeln!(
                    out,
                    "Country with least {} percent: {} --> {:.2}",
                    noun, min.name, min.value
                );
            }
            if let Some(mean) = summary.mean {
                let _ = writeln!(
                    out,
                    "Mean {} percent over {} countries: {:.2}",
                    noun, summary.count, mean
                );
            }
        }

        match self.correlation.coefficient {
            Some(r) => {
                let _ = writeln!(
                    out,
                    "Correlation coefficient (Internet Usage <-> Adult Literacy): {:.2}",
                    r
                );
            }
            None => {
                let _ = writeln!(
                    out,
                    "Correlation coefficient (Internet Usage <-> Adult Literacy): --"
                );
            }
        }

        for note in &self.notes {
            let _ = writeln!(out, "Note: {}", note);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Country> {
        vec![
            Country::new("US", "United states")
                .with_internet_users(Some(87.0))
                .with_adult_literacy_rate(Some(99.0)),
            Country::new("DE", "Germany").with_internet_users(Some(84.0)),
            Country::new("IN", "India")
                .with_internet_users(Some(34.5))
                .with_adult_literacy_rate(Some(74.4)),
        ]
    }

    #[test]
    fn test_report_collects_every_metric() {
        let report = StatisticsReport::compute(&sample(), CorrelationMode::default());

        assert_eq!(report.total_records, 3);
        let internet = report.field(Field::InternetUsers).unwrap();
        assert_eq!(internet.count, 3);
        assert_eq!(internet.max.as_ref().unwrap().code, "US");
        assert_eq!(internet.min.as_ref().unwrap().code, "IN");
        assert_eq!(report.correlation.paired, 2);
        assert!(report.correlation.coefficient.is_some());
        assert!(report.notes.is_empty());

        let text = report.render_text();
        assert!(text.contains("Country with greatest internet usage percent: United states --> 87.00"));
        assert!(text.contains("Country with least adult literacy percent: India --> 74.40"));
    }

    #[test]
    fn test_report_on_empty_dataset_records_notes() {
        let report = StatisticsReport::compute(&[], CorrelationMode::PairedMeans);

        assert!(report.fields.iter().all(|f| f.mean.is_none() && f.max.is_none()));
        assert!(report.correlation.coefficient.is_none());
        // one note per field plus the correlation
        assert_eq!(report.notes.len(), 3);
        assert!(report.render_text().contains("Adult Literacy): --"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = StatisticsReport::compute(&sample(), CorrelationMode::PairedMeans);
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["total_records"], 3);
        assert_eq!(json["correlation"]["mode"], "paired-means");
        assert_eq!(json["fields"][0]["field"], "internet_users");
    }
}
