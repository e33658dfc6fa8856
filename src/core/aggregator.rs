//! Statistics over a snapshot of country records.
//!
//! Every function here is pure: it borrows the slice it is given, never
//! mutates it, and recomputes from scratch on each call. Records missing a
//! field are skipped by the metric that needs that field, so different
//! metrics may run over populations of different sizes.

use crate::domain::model::{Country, Field};
use crate::utils::error::{Result, StatsError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which population the correlation centers each field on.
///
/// `SingleFieldMeans` centers on the mean of every record that has the
/// field, while the deviations are only summed over records that have both
/// fields. When the two populations differ this is not the textbook Pearson
/// coefficient. `PairedMeans` centers on the paired subset instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorrelationMode {
    #[default]
    SingleFieldMeans,
    PairedMeans,
}

impl CorrelationMode {
    pub const VARIANTS: [&'static str; 2] = ["single-field-means", "paired-means"];

    pub fn as_str(self) -> &'static str {
        match self {
            CorrelationMode::SingleFieldMeans => "single-field-means",
            CorrelationMode::PairedMeans => "paired-means",
        }
    }
}

impl fmt::Display for CorrelationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorrelationMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single-field-means" => Ok(CorrelationMode::SingleFieldMeans),
            "paired-means" => Ok(CorrelationMode::PairedMeans),
            other => Err(format!(
                "unknown correlation mode '{}', expected one of: {}",
                other,
                Self::VARIANTS.join(", ")
            )),
        }
    }
}

fn present(records: &[Country], field: Field) -> impl Iterator<Item = (&Country, f64)> + '_ {
    records
        .iter()
        .filter_map(move |country| field.value(country).map(|value| (country, value)))
}

fn empty_dataset(field: Field) -> StatsError {
    StatsError::EmptyDataset {
        field: field.to_string(),
    }
}

/// Records that have `field`, in their original order.
pub fn with_field(records: &[Country], field: Field) -> Vec<&Country> {
    present(records, field).map(|(country, _)| country).collect()
}

/// Records that have both internet usage and adult literacy, in their original order.
pub fn with_both_fields(records: &[Country]) -> Vec<&Country> {
    records
        .iter()
        .filter(|country| Field::ALL.iter().all(|field| field.value(country).is_some()))
        .collect()
}

pub fn max_by_field(records: &[Country], field: Field) -> Result<&Country> {
    present(records, field)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(country, _)| country)
        .ok_or_else(|| empty_dataset(field))
}

pub fn min_by_field(records: &[Country], field: Field) -> Result<&Country> {
    present(records, field)
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(country, _)| country)
        .ok_or_else(|| empty_dataset(field))
}

/// Arithmetic mean of `field`, divided by the number of records that have it.
pub fn mean(records: &[Country], field: Field) -> Result<f64> {
    let (sum, count) = present(records, field)
        .fold((0.0, 0usize), |(sum, count), (_, value)| (sum + value, count + 1));

    if count == 0 {
        return Err(empty_dataset(field));
    }
    Ok(sum / count as f64)
}

/// Internet usage against adult literacy, centered on single-field means.
pub fn correlation(records: &[Country]) -> Result<f64> {
    correlation_between(
        records,
        Field::InternetUsers,
        Field::AdultLiteracyRate,
        CorrelationMode::SingleFieldMeans,
    )
}

/// Pearson-style coefficient of `x` against `y` over the records that have both.
///
/// Fails with [`StatsError::DegenerateCorrelation`] when no record has both
/// fields or when either field has no spread around its mean, rather than
/// returning NaN or infinity.
pub fn correlation_between(
    records: &[Country],
    x: Field,
    y: Field,
    mode: CorrelationMode,
) -> Result<f64> {
    let pairs: Vec<(f64, f64)> = records
        .iter()
        .filter_map(|country| Some((x.value(country)?, y.value(country)?)))
        .collect();

    if pairs.is_empty() {
        return Err(StatsError::DegenerateCorrelation {
            paired: 0,
            reason: format!("no record has both {} and {}", x, y),
        });
    }

    let (mean_x, mean_y) = match mode {
        CorrelationMode::SingleFieldMeans => (mean(records, x)?, mean(records, y)?),
        CorrelationMode::PairedMeans => {
            let n = pairs.len() as f64;
            let (sum_x, sum_y) = pairs
                .iter()
                .fold((0.0, 0.0), |(sx, sy), (px, py)| (sx + px, sy + py));
            (sum_x / n, sum_y / n)
        }
    };

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for (px, py) in &pairs {
        let dx = px - mean_x;
        let dy = py - mean_y;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        sum_yy += dy * dy;
    }

    tracing::debug!(
        paired = pairs.len(),
        mean_x,
        mean_y,
        sum_xy,
        sum_xx,
        sum_yy,
        mode = %mode,
        "correlation sums"
    );

    let flat = if sum_xx == 0.0 {
        Some(x)
    } else if sum_yy == 0.0 {
        Some(y)
    } else {
        None
    };
    if let Some(field) = flat {
        return Err(StatsError::DegenerateCorrelation {
            paired: pairs.len(),
            reason: format!("{} has no variance", field),
        });
    }

    Ok(sum_xy / (sum_xx * sum_yy).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(code: &str, internet: Option<f64>, literacy: Option<f64>) -> Country {
        Country::new(code, code)
            .with_internet_users(internet)
            .with_adult_literacy_rate(literacy)
    }

    fn scenario() -> Vec<Country> {
        vec![
            country("US", Some(87.0), Some(99.0)),
            country("DE", Some(84.0), None),
            country("FR", None, Some(99.0)),
            country("JP", Some(91.0), Some(99.0)),
        ]
    }

    fn codes(records: &[&Country]) -> Vec<String> {
        records.iter().map(|c| c.code.clone()).collect()
    }

    #[test]
    fn test_with_field_preserves_order() {
        let records = scenario();
        assert_eq!(
            codes(&with_field(&records, Field::InternetUsers)),
            vec!["US", "DE", "JP"]
        );
        assert_eq!(
            codes(&with_field(&records, Field::AdultLiteracyRate)),
            vec!["US", "FR", "JP"]
        );
        assert_eq!(codes(&with_both_fields(&records)), vec!["US", "JP"]);
    }

    #[test]
    fn test_scenario_mean_and_extrema() {
        let records = scenario();

        let m = mean(&records, Field::InternetUsers).unwrap();
        assert!((m - 262.0 / 3.0).abs() < 1e-9);

        let top = max_by_field(&records, Field::InternetUsers).unwrap();
        assert_eq!(top.code, "JP");

        let bottom = min_by_field(&records, Field::InternetUsers).unwrap();
        assert_eq!(bottom.code, "DE");

        let least_literate = min_by_field(&records, Field::AdultLiteracyRate).unwrap();
        assert_eq!(least_literate.adult_literacy_rate, Some(99.0));
    }

    #[test]
    fn test_scenario_correlation_is_degenerate() {
        // Literacy is 99 everywhere, so the paired deviations are all zero.
        let err = correlation(&scenario()).unwrap_err();
        match err {
            StatsError::DegenerateCorrelation { paired, reason } => {
                assert_eq!(paired, 2);
                assert!(reason.contains("adult literacy"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_subset_errors() {
        let records = vec![country("AA", None, Some(10.0))];
        for result in [
            max_by_field(&records, Field::InternetUsers).map(|_| ()),
            min_by_field(&records, Field::InternetUsers).map(|_| ()),
            mean(&records, Field::InternetUsers).map(|_| ()),
        ] {
            assert!(matches!(result, Err(StatsError::EmptyDataset { .. })));
        }
        assert!(matches!(
            correlation(&records),
            Err(StatsError::DegenerateCorrelation { paired: 0, .. })
        ));
        assert!(matches!(
            correlation(&[]),
            Err(StatsError::DegenerateCorrelation { paired: 0, .. })
        ));
    }

    #[test]
    fn test_correlation_fully_paired_matches_hand_computation() {
        // means 2 and 11/3: sum_xy = 3, sum_xx = 2, sum_yy = 14/3
        let records = vec![
            country("A", Some(1.0), Some(2.0)),
            country("B", Some(2.0), Some(4.0)),
            country("C", Some(3.0), Some(5.0)),
        ];
        let expected = 3.0 / (2.0_f64 * 14.0 / 3.0).sqrt();

        let r = correlation(&records).unwrap();
        assert!((r - expected).abs() < 1e-12);

        let paired = correlation_between(
            &records,
            Field::InternetUsers,
            Field::AdultLiteracyRate,
            CorrelationMode::PairedMeans,
        )
        .unwrap();
        assert!((paired - expected).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_centers_on_single_field_population() {
        // DD only has internet usage, so it shifts mean_x to 30 while the
        // sums run over AA, BB and CC: sum_xy = 400, sum_xx = 500, sum_yy = 800.
        let records = vec![
            country("AA", Some(10.0), Some(20.0)),
            country("BB", Some(20.0), Some(40.0)),
            country("CC", Some(30.0), Some(60.0)),
            country("DD", Some(60.0), None),
        ];

        let reproduced = correlation(&records).unwrap();
        assert!((reproduced - 0.4_f64.sqrt()).abs() < 1e-12);

        let textbook = correlation_between(
            &records,
            Field::InternetUsers,
            Field::AdultLiteracyRate,
            CorrelationMode::PairedMeans,
        )
        .unwrap();
        assert!((textbook - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_is_symmetric() {
        let records = vec![
            country("AA", Some(10.0), Some(25.0)),
            country("BB", Some(35.0), Some(40.0)),
            country("CC", Some(70.0), Some(38.0)),
            country("DD", Some(60.0), None),
            country("EE", None, Some(90.0)),
        ];
        for mode in [CorrelationMode::SingleFieldMeans, CorrelationMode::PairedMeans] {
            let forward = correlation_between(
                &records,
                Field::InternetUsers,
                Field::AdultLiteracyRate,
                mode,
            )
            .unwrap();
            let backward = correlation_between(
                &records,
                Field::AdultLiteracyRate,
                Field::InternetUsers,
                mode,
            )
            .unwrap();
            assert!((forward - backward).abs() < 1e-12);
            assert!((-1.0..=1.0).contains(&forward));
        }
    }

    #[test]
    fn test_correlation_mode_parsing() {
        assert_eq!(
            "paired-means".parse::<CorrelationMode>().unwrap(),
            CorrelationMode::PairedMeans
        );
        assert_eq!(
            " Single-Field-Means ".parse::<CorrelationMode>().unwrap(),
            CorrelationMode::SingleFieldMeans
        );
        assert!("pearson".parse::<CorrelationMode>().is_err());
    }
}
