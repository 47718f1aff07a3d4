use std::fmt;

/// Money is represented as integer cents to avoid floating-point drift.
/// For USD/EUR, 1 unit = 100 cents, so 4.50 = 450 cents.
pub type Cents = i64;

/// Format cents as a plain decimal string with two places.
/// Example: 450 -> "4.50", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

/// Parse a decimal string into cents.
/// Example: "4.50" -> 450, "12.5" -> 1250, "100" -> 10000, ".5" -> 50
///
/// More than two decimal places are truncated. Anything that is not a plain
/// decimal number (including `NaN`, `inf` and exponents) is rejected, as are
/// values that do not fit in `Cents`.
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let (units_str, decimal_str) = match digits.split_once('.') {
        Some((units, decimals)) => (units, decimals),
        None => (digits, ""),
    };

    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(ParseCentsError::InvalidFormat);
    }
    if !units_str.chars().all(|c| c.is_ascii_digit())
        || !decimal_str.chars().all(|c| c.is_ascii_digit())
    {
        return Err(ParseCentsError::InvalidFormat);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str.parse().map_err(|_| ParseCentsError::Overflow)?
    };

    // Pad or truncate to exactly two digits
    let decimal_cents: i64 = match decimal_str.len() {
        0 => 0,
        1 => i64::from(decimal_str.as_bytes()[0] - b'0') * 10,
        _ => decimal_str[..2]
            .parse()
            .map_err(|_| ParseCentsError::InvalidFormat)?,
    };

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(decimal_cents))
        .ok_or(ParseCentsError::Overflow)?;
    Ok(if negative { -cents } else { cents })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
    Overflow,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
            ParseCentsError::Overflow => write!(f, "amount is too large"),
        }
    }
}

impl std::error::Error for ParseCentsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(450), "4.50");
        assert_eq!(format_cents(650), "6.50");
        assert_eq!(format_cents(7), "0.07");
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(-1), "-0.01");
    }

    #[test]
    fn test_format_cents_extremes() {
        assert_eq!(format_cents(Cents::MAX), "92233720368547758.07");
        // unsigned_abs keeps MIN from overflowing
        assert_eq!(format_cents(Cents::MIN), "-92233720368547758.08");
        assert_eq!(parse_cents(&format_cents(Cents::MAX)), Ok(Cents::MAX));
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("4.50"), Ok(450));
        assert_eq!(parse_cents("4.5"), Ok(450));
        assert_eq!(parse_cents("2"), Ok(200));
        assert_eq!(parse_cents("2."), Ok(200));
        assert_eq!(parse_cents(".50"), Ok(50));
        assert_eq!(parse_cents(" 0.01 "), Ok(1));
        assert_eq!(parse_cents("+3.25"), Ok(325));
        assert_eq!(parse_cents("-50.00"), Ok(-5000));
        assert_eq!(parse_cents("100.999"), Ok(10099)); // Truncates
    }

    #[test]
    fn test_parse_cents_invalid() {
        for input in ["", "   ", ".", "-", "abc", "12.34.56", "1e3", "NaN", "inf", "4,50", "12abc"] {
            assert_eq!(
                parse_cents(input),
                Err(ParseCentsError::InvalidFormat),
                "input {:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_parse_cents_overflow() {
        assert_eq!(
            parse_cents("99999999999999999999"),
            Err(ParseCentsError::Overflow)
        );
        assert_eq!(
            parse_cents("92233720368547758.08"),
            Err(ParseCentsError::Overflow)
        );
    }
}
