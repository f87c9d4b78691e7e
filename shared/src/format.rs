/// Maximum fraction digits shown for totals, matching `Number#toLocaleString`
const MAX_FRACTION_DIGITS: usize = 3;

/// Format a total with en-US thousands grouping: `1234.5` -> `"1,234.5"`.
///
/// At most three fraction digits are kept and trailing zeros are dropped,
/// so whole amounts render without a decimal point.
pub fn format_total(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞" } else { "∞" }.to_string();
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + integer.len() / 3 + 1);
    let is_zero = integer.bytes().all(|b| b == b'0') && fraction.is_empty();
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_numbers() {
        assert_eq!(format_total(0.0), "0");
        assert_eq!(format_total(15.0), "15");
        assert_eq!(format_total(5.0), "5");
        assert_eq!(format_total(999.0), "999");
        assert_eq!(format_total(1000.0), "1,000");
        assert_eq!(format_total(1234567.0), "1,234,567");
    }

    #[test]
    fn test_fractions_are_trimmed_to_three_digits() {
        assert_eq!(format_total(1234.5), "1,234.5");
        assert_eq!(format_total(0.1 + 0.2), "0.3");
        assert_eq!(format_total(2.0 / 3.0), "0.667");
        assert_eq!(format_total(10.25), "10.25");
    }

    #[test]
    fn test_negative_totals() {
        assert_eq!(format_total(-1500.0), "-1,500");
        assert_eq!(format_total(-0.0001), "0");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_total(f64::NAN), "NaN");
        assert_eq!(format_total(f64::INFINITY), "∞");
    }
}
