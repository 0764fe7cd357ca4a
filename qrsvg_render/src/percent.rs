/// Parse a percentage string such as `"50%"` into a ratio (`0.5`).
///
/// Only the leading decimal number matters: leading whitespace is skipped and anything after the number (the `%`
/// sign, a unit, garbage) is ignored. Returns `None` when the string does not start with a number.
/// # Example
/// ```
/// use qrsvg_render::percent::parse_percent;
/// assert_eq!(parse_percent("50%"), Some(0.5));
/// assert_eq!(parse_percent(" 12.5 %"), Some(0.125));
/// assert_eq!(parse_percent("wide"), None);
/// ```
pub fn parse_percent(text: &str) -> Option<f64> {
    leading_number(text).map(|number| number / 100.0)
}

/// Parse the longest prefix of `text` (after leading whitespace) that forms a decimal number with an optional sign,
/// fraction and exponent.
pub(crate) fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = digits_from(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits_from(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    text[..end].parse().ok()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_plain_number_is_a_percentage() {
        assert_eq!(parse_percent("20"), Some(0.2));
    }

    #[test]
    fn test_sign_fraction_and_exponent() {
        assert_eq!(parse_percent("-10%"), Some(-0.1));
        assert_eq!(parse_percent(".5%"), Some(0.005));
        assert_eq!(parse_percent("5.%"), Some(0.05));
        assert_eq!(parse_percent("1e2%"), Some(1.0));
        assert_eq!(parse_percent("3e%"), Some(0.03));
    }

    #[test]
    fn test_not_a_number() {
        assert_eq!(parse_percent(""), None);
        assert_eq!(parse_percent("%50"), None);
        assert_eq!(parse_percent("-."), None);
        assert_eq!(parse_percent("+"), None);
    }
}
