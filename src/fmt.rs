use serde_json::Value;

/// Format a float as a dollar amount with thousands separators: $1,234.56
///
/// Negative values keep the symbol first (`$-500.00`) so the result can be fed
/// back through [`currency`] unchanged.
pub fn money(val: f64) -> String {
    if !val.is_finite() {
        return "$0.00".to_string();
    }
    let cents = format!("{:.2}", val.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if val < 0.0 && cents != "0.00" {
        format!("$-{with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

/// Currency formatting for raw record values.
///
/// Strings already carrying a `$` pass through untouched, numeric strings and
/// numbers go through [`money`], and anything that does not coerce to a number
/// becomes `$0.00`.
pub fn currency(value: &Value) -> String {
    match value {
        Value::String(s) if s.starts_with('$') => s.clone(),
        Value::String(s) => parse_number(s).map(money).unwrap_or_else(|| money(0.0)),
        Value::Number(n) => n.as_f64().map(money).unwrap_or_else(|| money(0.0)),
        _ => money(0.0),
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Template text for a value that collapses to empty when falsy: null, `false`,
/// zero and the empty string all render as nothing.
pub fn text(value: &Value) -> String {
    match value {
        Value::Bool(false) | Value::Null => String::new(),
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        other => plain(other),
    }
}

/// Template text for a value that is rendered as-is; only a missing value is empty.
pub fn plain(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.as_f64().map(|f| f.to_string()).unwrap_or_default(),
        },
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Truthiness used to decide whether an optional amount is shown at all.
pub fn is_present(value: &Value) -> bool {
    !text(value).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234.56), "$1,234.56");
        assert_eq!(money(1234.5), "$1,234.50");
        assert_eq!(money(-500.00), "$-500.00");
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(-0.0), "$0.00");
        assert_eq!(money(1000000.99), "$1,000,000.99");
        assert_eq!(money(42.10), "$42.10");
        assert_eq!(money(999.0), "$999.00");
    }

    #[test]
    fn test_money_non_finite_is_zero() {
        assert_eq!(money(f64::NAN), "$0.00");
        assert_eq!(money(f64::INFINITY), "$0.00");
    }

    #[test]
    fn test_currency_numbers_and_strings() {
        assert_eq!(currency(&json!(1234.5)), "$1,234.50");
        assert_eq!(currency(&json!(0)), "$0.00");
        assert_eq!(currency(&json!("2500")), "$2,500.00");
        assert_eq!(currency(&json!(" 12.3 ")), "$12.30");
        assert_eq!(currency(&json!("1,234.5")), "$1,234.50");
    }

    #[test]
    fn test_currency_passes_formatted_strings_through() {
        assert_eq!(currency(&json!("$99.00")), "$99.00");
        assert_eq!(currency(&json!("$1,000")), "$1,000");
    }

    #[test]
    fn test_currency_non_numeric_is_zero() {
        assert_eq!(currency(&json!("")), "$0.00");
        assert_eq!(currency(&json!("NaN")), "$0.00");
        assert_eq!(currency(&json!("abc")), "$0.00");
        assert_eq!(currency(&Value::Null), "$0.00");
        assert_eq!(currency(&json!(true)), "$0.00");
        assert_eq!(currency(&json!([1, 2])), "$0.00");
    }

    #[test]
    fn test_currency_is_idempotent() {
        for v in [0.0, 1.0, 12.345, 999.999, 1234.5, -87.25, 1_000_000.0, 0.004] {
            let once = currency(&json!(v));
            let twice = currency(&Value::String(once.clone()));
            assert_eq!(once, twice, "value {v}");
        }
    }

    #[test]
    fn test_text_falsy_values_are_empty() {
        assert_eq!(text(&Value::Null), "");
        assert_eq!(text(&json!(false)), "");
        assert_eq!(text(&json!(0)), "");
        assert_eq!(text(&json!("")), "");
        assert_eq!(text(&json!("7.5%")), "7.5%");
        assert_eq!(text(&json!(8.25)), "8.25");
        assert_eq!(text(&json!(12)), "12");
    }

    #[test]
    fn test_plain_keeps_zero() {
        assert_eq!(plain(&json!(0)), "0");
        assert_eq!(plain(&json!(32.5)), "32.5");
        assert_eq!(plain(&json!("SQ")), "SQ");
        assert_eq!(plain(&Value::Null), "");
    }

    #[test]
    fn test_is_present() {
        assert!(is_present(&json!(125.4)));
        assert!(is_present(&json!("$10.00")));
        assert!(!is_present(&json!(0)));
        assert!(!is_present(&json!("")));
        assert!(!is_present(&Value::Null));
    }
}
