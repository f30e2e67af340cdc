/// Format a whole-VND amount the way Vietnamese storefronts print it, e.g.
/// `57000` → `"57.000₫"`.
#[must_use]
pub fn format_vnd(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{grouped}₫")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_amounts_have_no_separator() {
        assert_eq!(format_vnd(0), "0₫");
        assert_eq!(format_vnd(999), "999₫");
    }

    #[test]
    fn thousands_are_dot_separated() {
        assert_eq!(format_vnd(7_000), "7.000₫");
        assert_eq!(format_vnd(57_000), "57.000₫");
        assert_eq!(format_vnd(1_234_567), "1.234.567₫");
    }

    #[test]
    fn negative_amounts_keep_sign() {
        assert_eq!(format_vnd(-25_000), "-25.000₫");
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        assert_eq!(format_vnd(i64::MIN), "-9.223.372.036.854.775.808₫");
    }
}
