use crate::core::Country;
use std::fmt::Write;

const CODE_WIDTH: usize = 8;
const NAME_WIDTH: usize = 32;
const VALUE_WIDTH: usize = 18;

fn cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "--".to_string(),
    }
}

/// Renders the data table, with `--` standing in for absent percentages.
pub fn render_table(countries: &[Country]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<cw$}{:<nw$}{:<vw$}{}",
        "Code",
        "Country",
        "Internet Users",
        "Literacy",
        cw = CODE_WIDTH,
        nw = NAME_WIDTH,
        vw = VALUE_WIDTH
    );
    let _ = writeln!(out, "{}", "-".repeat(CODE_WIDTH + NAME_WIDTH + VALUE_WIDTH + 8));

    for country in countries {
        let _ = writeln!(
            out,
            "{:<cw$}{:<nw$}{:<vw$}{}",
            country.code,
            country.name,
            cell(country.internet_users),
            cell(country.adult_literacy_rate),
            cw = CODE_WIDTH,
            nw = NAME_WIDTH,
            vw = VALUE_WIDTH
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_values_render_as_dashes() {
        let countries = vec![
            Country::new("DE", "Germany").with_internet_users(Some(84.0)),
            Country::new("FR", "France").with_adult_literacy_rate(Some(99.0)),
        ];
        let table = render_table(&countries);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Code"));
        assert_eq!(lines[2].split_whitespace().collect::<Vec<_>>(), ["DE", "Germany", "84.00", "--"]);
        assert_eq!(lines[3].split_whitespace().collect::<Vec<_>>(), ["FR", "France", "--", "99.00"]);
    }
}
