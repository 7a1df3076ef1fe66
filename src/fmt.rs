/// Format a float the es-ES way: thousands dot, decimal comma. 1.234,56
pub fn money(val: f64) -> String {
    if val.is_nan() {
        return "NaN".to_string();
    }
    let negative = val < 0.0;
    let abs = val.abs();
    let cents = format!("{:.2}", abs);
    let parts: Vec<&str> = cents.split('.').collect();
    let int_part = parts[0];
    let dec_part = parts[1];

    let mut with_dots = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_dots.push('.');
        }
        with_dots.push(c);
    }
    let with_dots: String = with_dots.chars().rev().collect();

    if negative {
        format!("-{with_dots},{dec_part}")
    } else {
        format!("{with_dots},{dec_part}")
    }
}

/// Two decimals with a decimal comma and no grouping, as written in the
/// semicolon CSV export: 1234,56
pub fn csv_amount(val: f64) -> String {
    format!("{:.2}", val).replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234.56), "1.234,56");
        assert_eq!(money(-500.00), "-500,00");
        assert_eq!(money(0.0), "0,00");
        assert_eq!(money(1000000.99), "1.000.000,99");
        assert_eq!(money(42.10), "42,10");
    }

    #[test]
    fn test_money_nan_is_visible() {
        assert_eq!(money(f64::NAN), "NaN");
    }

    #[test]
    fn test_csv_amount() {
        assert_eq!(csv_amount(1234.5), "1234,50");
        assert_eq!(csv_amount(-42.0), "-42,00");
    }
}
