/// Parses a money amount that may be stored as formatted text.
///
/// Accepts plain decimals (`"1234.5"`) as well as currency-formatted text
/// (`"$1,234.50"`, `"-$12.00"`, `"$-12.00"`): surrounding whitespace, one
/// leading sign, one leading `$` and every `,` group separator are removed
/// before parsing. Returns `None` when nothing numeric is left
/// (`"N/A"`, `"$"`, `"NaN"`).
pub fn parse_currency(raw: &str) -> Option<f64> {
    let mut text = raw.trim();

    let mut negative = false;
    if let Some(rest) = text.strip_prefix('-') {
        negative = true;
        text = rest;
    }
    if let Some(rest) = text.strip_prefix('$') {
        text = rest;
    }
    // "$-12.00" puts the sign after the symbol
    if !negative {
        if let Some(rest) = text.strip_prefix('-') {
            negative = true;
            text = rest;
        }
    }

    let digits: String = text.chars().filter(|c| *c != ',').collect();
    if digits.is_empty() || digits.starts_with('+') || digits.starts_with('-') {
        return None;
    }

    let value: f64 = digits.parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formatted_amounts() {
        assert_eq!(parse_currency("$1,234.50"), Some(1234.50));
        assert_eq!(parse_currency("$0"), Some(0.0));
        assert_eq!(parse_currency("$1,234,567.89"), Some(1_234_567.89));
        assert_eq!(parse_currency("  $15.00 "), Some(15.0));
    }

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_currency("1234.5"), Some(1234.5));
        assert_eq!(parse_currency("42"), Some(42.0));
        assert_eq!(parse_currency("0.0"), Some(0.0));
    }

    #[test]
    fn test_parse_negative_amounts() {
        assert_eq!(parse_currency("-$45.10"), Some(-45.10));
        assert_eq!(parse_currency("$-45.10"), Some(-45.10));
        assert_eq!(parse_currency("-3.5"), Some(-3.5));
    }

    #[test]
    fn test_reject_non_numeric() {
        assert_eq!(parse_currency("N/A"), None);
        assert_eq!(parse_currency(""), None);
        assert_eq!(parse_currency("$"), None);
        assert_eq!(parse_currency("$,"), None);
        assert_eq!(parse_currency("--5"), None);
        assert_eq!(parse_currency("NaN"), None);
        assert_eq!(parse_currency("inf"), None);
        assert_eq!(parse_currency("12 USD"), None);
    }
}
