//! Shared cell styling for the HTML report
//!
//! Delta cells are color-banded on fixed thresholds (2/5/10/15 percent in
//! either direction): cool colors for decreases, warm colors for increases,
//! no color inside the neutral band. The band colors and row striping match
//! the house report style.

use crate::models::Money;

/// Opening tag for a data row, striped by row index
pub fn row_open(i_row: usize) -> &'static str {
    if i_row % 2 == 0 {
        "<tr style='background-color:WhiteSmoke;'>"
    } else {
        "<tr>"
    }
}

/// An empty data cell
pub const BLANK_CELL: &str = "<td>&nbsp;</td>";

/// Header row backgrounds
pub const HEADER_ROW: &str = "<tr style='background-color:SteelBlue;'>";
pub const SUBHEADER_ROW: &str = "<tr style='background-color:LightSteelBlue;'>";

/// A right-aligned currency cell
pub fn currency_cell(amount: Money) -> String {
    format!(
        "<td style='text-align:right; padding:4px;'>{}</td>",
        amount.format_currency()
    )
}

/// A color-banded percent-change cell; a null delta renders blank
pub fn delta_cell(delta: Option<f64>) -> String {
    let Some(value) = delta else {
        return BLANK_CELL.to_string();
    };

    let formatted = format_percent(value);
    match band_color(value) {
        None => format!(
            "<td style='text-align:right; padding:4px;'>{}</td>",
            formatted
        ),
        Some(color) => format!(
            "<td style='text-align:right; padding:4px; color:{}; font-weight:bold;'>{}</td>",
            color, formatted
        ),
    }
}

/// Fractional change as a percentage with two decimals: 0.5 -> "50.00%"
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// The band color for a signed fractional change; `None` in the neutral band
fn band_color(value: f64) -> Option<&'static str> {
    if value < -0.15 {
        Some("Navy")
    } else if value < -0.10 {
        Some("Blue")
    } else if value < -0.05 {
        Some("DodgerBlue")
    } else if value < -0.02 {
        Some("DeepSkyBlue")
    } else if value <= 0.02 {
        None
    } else if value <= 0.05 {
        Some("Orange")
    } else if value <= 0.10 {
        Some("DarkOrange")
    } else if value <= 0.15 {
        Some("OrangeRed")
    } else {
        Some("Red")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(band_color(-0.16), Some("Navy"));
        assert_eq!(band_color(-0.15), Some("Blue"));
        assert_eq!(band_color(-0.10), Some("DodgerBlue"));
        assert_eq!(band_color(-0.05), Some("DeepSkyBlue"));
        assert_eq!(band_color(-0.02), None);
        assert_eq!(band_color(0.0), None);
        assert_eq!(band_color(0.02), None);
        assert_eq!(band_color(0.03), Some("Orange"));
        assert_eq!(band_color(0.05), Some("Orange"));
        assert_eq!(band_color(0.10), Some("DarkOrange"));
        assert_eq!(band_color(0.15), Some("OrangeRed"));
        assert_eq!(band_color(0.151), Some("Red"));
    }

    #[test]
    fn test_null_delta_renders_blank_cell() {
        assert_eq!(delta_cell(None), BLANK_CELL);
    }

    #[test]
    fn test_neutral_delta_has_no_color() {
        let cell = delta_cell(Some(0.01));
        assert!(cell.contains("1.00%"));
        assert!(!cell.contains("color"));
    }

    #[test]
    fn test_banded_delta_is_bold_and_colored() {
        let cell = delta_cell(Some(0.5));
        assert!(cell.contains("50.00%"));
        assert!(cell.contains("Red"));
        assert!(cell.contains("font-weight:bold"));
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.5), "50.00%");
        assert_eq!(format_percent(-0.025), "-2.50%");
    }

    #[test]
    fn test_row_striping_alternates() {
        assert!(row_open(0).contains("WhiteSmoke"));
        assert_eq!(row_open(1), "<tr>");
        assert!(row_open(2).contains("WhiteSmoke"));
    }

    #[test]
    fn test_currency_cell() {
        let cell = currency_cell(Money::from_cents(-123_456));
        assert!(cell.contains("-$1,234.56"));
        assert!(cell.contains("text-align:right"));
    }
}
