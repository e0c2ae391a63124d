//! Number formatting for tables and tooltips.

/// Group the integer part with commas and keep two decimals: `1234.5` →
/// `1,234.50`.
pub fn grouped(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    let sign = if amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{sign}{out}.{frac_part}")
}

fn symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "INR" => Some("₹"),
        _ => None,
    }
}

/// Currency amount for display: `$1,234.00`, `€80,000.00`, or `CHF 120.00`
/// for codes without a symbol.
pub fn currency(amount: f64, code: &str) -> String {
    let digits = grouped(amount);
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest.to_string()),
        None => ("", digits),
    };
    match symbol(code) {
        Some(sym) => format!("{sign}{sym}{digits}"),
        None => format!("{sign}{code} {digits}"),
    }
}

pub fn usd(amount: f64) -> String {
    currency(amount, "USD")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(grouped(0.0), "0.00");
        assert_eq!(grouped(999.999), "1,000.00");
        assert_eq!(grouped(1234567.5), "1,234,567.50");
        assert_eq!(grouped(-42000.0), "-42,000.00");
        assert_eq!(grouped(-0.001), "0.00");
    }

    #[test]
    fn currency_symbols() {
        assert_eq!(usd(85847.0), "$85,847.00");
        assert_eq!(currency(80000.0, "EUR"), "€80,000.00");
        assert_eq!(currency(-5.0, "USD"), "-$5.00");
        assert_eq!(currency(120.0, "CHF"), "CHF 120.00");
        assert_eq!(usd(f64::NAN), "$NaN");
    }
}
