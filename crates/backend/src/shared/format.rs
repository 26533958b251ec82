/// Groups digits in threes with dots: `1234567` → `"1.234.567"`.
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// es-ES number text: dot grouping from five integer digits on, comma
/// decimals, at most three fraction digits.
pub fn format_decimal_es(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = (value.abs() * 1000.0).round() / 1000.0;
    let int_part = rounded.trunc() as usize;
    let frac = format!("{:.3}", rounded.fract());
    let frac = frac.trim_start_matches('0').trim_start_matches('.').trim_end_matches('0');

    let int_text = if int_part >= 10_000 {
        format_number(int_part)
    } else {
        int_part.to_string()
    };

    let sign = if value < 0.0 && rounded > 0.0 { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{int_text}")
    } else {
        format!("{sign}{int_text},{frac}")
    }
}

pub fn format_currency(amount: f64) -> String {
    format!("€{}", format_decimal_es(amount))
}

pub fn format_percentage(value: f64) -> String {
    format!("{}%", value)
}
