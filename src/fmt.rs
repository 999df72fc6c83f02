/// Format a value for display with thousands separators: 1,234.56
/// Integral values drop the decimals entirely.
pub fn number(val: f64) -> String {
    let negative = val < 0.0;
    let abs = val.abs();
    let integral = (abs - abs.round()).abs() < 1e-9;
    let formatted = if integral {
        format!("{:.0}", abs)
    } else {
        format!("{:.2}", abs)
    };
    let parts: Vec<&str> = formatted.split('.').collect();
    let int_part = parts[0];

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let mut out: String = with_commas.chars().rev().collect();
    if let Some(dec) = parts.get(1) {
        out.push('.');
        out.push_str(dec);
    }
    if negative {
        format!("-{out}")
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_formatting() {
        assert_eq!(number(1234.56), "1,234.56");
        assert_eq!(number(-500.0), "-500");
        assert_eq!(number(0.0), "0");
        assert_eq!(number(1000000.99), "1,000,000.99");
        assert_eq!(number(100.0), "100");
        assert_eq!(number(1234.5), "1,234.50");
    }
}
