use crate::utils::error::{Result, StatsError};

pub const MAX_CODE_LEN: usize = 3;
pub const PERCENT_MIN: f64 = 0.0;
pub const PERCENT_MAX: f64 = 100.0;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(StatsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(StatsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Case-insensitive membership check against lower-case `allowed` values.
pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value.to_ascii_lowercase().as_str()) {
        return Ok(());
    }
    Err(StatsError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: format!("Valid values: {}", allowed.join(", ")),
    })
}

/// Normalizes a country code: ASCII letters only, 1 to 3 of them, upper-cased.
pub fn normalize_code(input: &str) -> Result<String> {
    let code = input.trim();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(StatsError::ValidationError {
            field: "code".to_string(),
            message: "The country code must contain only letters, and must not be blank."
                .to_string(),
        });
    }
    if code.len() > MAX_CODE_LEN {
        return Err(StatsError::ValidationError {
            field: "code".to_string(),
            message: "The country code must contain only three letters.".to_string(),
        });
    }
    Ok(code.to_ascii_uppercase())
}

/// Normalizes a display name to "Capitalized" form.
///
/// Names are letters separated by single spaces; anything else is rejected.
pub fn normalize_name(input: &str) -> Result<String> {
    let name = input.trim();
    let well_formed = !name.is_empty()
        && name
            .split(' ')
            .all(|word| !word.is_empty() && word.chars().all(char::is_alphabetic));
    if !well_formed {
        return Err(StatsError::ValidationError {
            field: "name".to_string(),
            message: "The country name must contain only letters, and must not be blank."
                .to_string(),
        });
    }

    let mut chars = name.chars();
    let capitalized = match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    };
    Ok(capitalized)
}

pub fn is_valid_percent(value: f64) -> bool {
    value.is_finite() && (PERCENT_MIN..=PERCENT_MAX).contains(&value)
}

/// Out-of-range percentages become absent; they are never clamped.
pub fn sanitize_percent(value: Option<f64>) -> Option<f64> {
    value.filter(|v| is_valid_percent(*v))
}

pub fn parse_percent(field_name: &str, input: &str) -> Result<f64> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| StatsError::ValidationError {
            field: field_name.to_string(),
            message: "You are only allowed to pass in numerical values.".to_string(),
        })?;
    if !is_valid_percent(value) {
        return Err(StatsError::ValidationError {
            field: field_name.to_string(),
            message: "The value you entered is not between the 0.0-100.0 range.".to_string(),
        });
    }
    Ok(value)
}
