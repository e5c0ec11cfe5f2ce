use std::str::FromStr;
use svgtypes::{Length, LengthUnit, NumberListParser};

/// Round a value to a number of fractional digits
pub fn round_to(value: f64, precision: u8) -> f64 {
    let factor = 10f64.powi(i32::from(precision));
    let rounded = (value * factor).round() / factor;
    // Avoid emitting "-0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Format a number in its shortest form at the given precision
///
/// Trailing zeros are dropped, a leading zero before the decimal point is
/// omitted (`0.5` becomes `.5`, `-0.5` becomes `-.5`).
///
/// # Examples
/// ```
/// use fig2icon::optimizer::numbers::format_number;
///
/// assert_eq!(format_number(12.0, 4), "12");
/// assert_eq!(format_number(0.50000001, 4), ".5");
/// assert_eq!(format_number(-0.123456, 4), "-.1235");
/// ```
pub fn format_number(value: f64, precision: u8) -> String {
    let rounded = round_to(value, precision);
    let mut text = format!("{:.*}", usize::from(precision), rounded);

    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }

    if let Some(rest) = text.strip_prefix("0.") {
        return format!(".{rest}");
    }
    if let Some(rest) = text.strip_prefix("-0.") {
        return format!("-.{rest}");
    }
    text
}

/// Parse a length attribute, accepting unitless and `px` values only
pub fn parse_length(value: &str) -> Option<f64> {
    let length = Length::from_str(value.trim()).ok()?;
    matches!(length.unit, LengthUnit::None | LengthUnit::Px).then_some(length.number)
}

/// Parse a whitespace and/or comma separated list of numbers
///
/// Returns `None` if anything other than numbers and separators is found.
pub fn parse_number_list(value: &str) -> Option<Vec<f64>> {
    NumberListParser::from(value)
        .collect::<Result<Vec<f64>, _>>()
        .ok()
}
