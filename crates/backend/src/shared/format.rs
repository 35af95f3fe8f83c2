/// Группирует разряды целого числа точками: 1234567 → "1.234.567"
///
/// ```
/// use wms_backend::shared::format::format_count;
/// assert_eq!(format_count(1234567), "1.234.567");
/// ```
pub fn format_count(n: usize) -> String {
    group_digits(&n.to_string())
}

/// Количество из агрегатов (f64): целые без дробной части,
/// остальное — с двумя знаками после запятой
pub fn format_quantity(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    if abs.fract() == 0.0 {
        return format!("{}{}", sign, group_digits(&format!("{:.0}", abs)));
    }
    let text = format!("{:.2}", abs);
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{}{},{}", sign, group_digits(int_part), frac_part)
}

fn group_digits(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1.000");
        assert_eq!(format_count(1234567890), "1.234.567.890");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(7.0), "7");
        assert_eq!(format_quantity(12500.0), "12.500");
        assert_eq!(format_quantity(1234.5), "1.234,50");
        assert_eq!(format_quantity(-3.0), "-3");
        assert_eq!(format_quantity(f64::NAN), "0");
    }
}
