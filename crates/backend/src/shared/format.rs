/// Formats an integer with `,` thousands separators
///
/// # Examples
/// `format_number(1234567)` → `"1,234,567"`, `format_number(42)` → `"42"`
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Abbreviates an amount with a K/M/B suffix and one decimal.
/// Amounts below one thousand keep two decimals.
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if abs >= 1_000_000_000.0 {
        format!("{}{:.1}B", sign, abs / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{}{:.1}M", sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}{:.1}K", sign, abs / 1_000.0)
    } else {
        format!("{}{:.2}", sign, abs)
    }
}

/// Dollar amount for the key metrics block, e.g. `"$1.2M"`, `"-$45.00"`
pub fn format_money(value: f64) -> String {
    let compact = format_compact(value);
    match compact.strip_prefix('-') {
        Some(rest) => format!("-${}", rest),
        None => format!("${}", compact),
    }
}
