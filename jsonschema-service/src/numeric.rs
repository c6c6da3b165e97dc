//! Numeric comparisons on JSON numbers
//!
//! Keyword semantics are defined on mathematical values, not on their JSON
//! representation: `1.0` is an integer, `minimum` compares values that may
//! exceed `f64` integer precision, and `multipleOf` must divide exactly even
//! for decimal fractions like `0.1` that have no finite binary expansion.
//! The divisibility check therefore runs on scaled decimal mantissas parsed
//! from the number's shortest decimal rendering, falling back to a float
//! quotient only when the mantissa overflows 128 bits.

use serde_json::Number;
use std::cmp::Ordering;

/// Whether the mathematical value of `n` is an integer
pub(crate) fn is_integer(n: &Number) -> bool {
    if n.is_i64() || n.is_u64() {
        return true;
    }
    n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
}

/// Compare two JSON numbers by mathematical value
pub(crate) fn number_cmp(a: &Number, b: &Number) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return Some(x.cmp(&y));
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return Some(x.cmp(&y));
    }
    // One side is a u64 beyond i64::MAX; a negative other side decides.
    if a.is_u64() && b.as_i64().is_some_and(|y| y < 0) {
        return Some(Ordering::Greater);
    }
    if b.is_u64() && a.as_i64().is_some_and(|x| x < 0) {
        return Some(Ordering::Less);
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y),
        _ => None,
    }
}

/// Whether `value` is an exact integer multiple of `divisor`
pub(crate) fn is_multiple_of(value: &Number, divisor: &Number) -> bool {
    if let (Some((mv, sv)), Some((md, sd))) = (
        parse_decimal(&value.to_string()),
        parse_decimal(&divisor.to_string()),
    ) {
        if md == 0 {
            return false;
        }
        let scale = sv.max(sd);
        if let (Some(mv), Some(md)) = (scale_up(mv, scale - sv), scale_up(md, scale - sd)) {
            return mv % md == 0;
        }
    }
    match (value.as_f64(), divisor.as_f64()) {
        (Some(v), Some(d)) if d != 0.0 => {
            let quotient = v / d;
            (quotient - quotient.round()).abs() <= f64::EPSILON * quotient.abs().max(1.0) * 4.0
        }
        _ => false,
    }
}

/// Parse a decimal rendering into `(mantissa, scale)` with
/// `value = mantissa * 10^-scale`
fn parse_decimal(text: &str) -> Option<(i128, u32)> {
    let (digits, exponent) = match text.find(['e', 'E']) {
        Some(i) => (&text[..i], text[i + 1..].parse::<i32>().ok()?),
        None => (text, 0),
    };
    let negative = digits.starts_with('-');
    let digits = digits.trim_start_matches(['-', '+']);
    let (int_part, frac_part) = match digits.find('.') {
        Some(i) => (&digits[..i], &digits[i + 1..]),
        None => (digits, ""),
    };

    let mut mantissa: i128 = 0;
    for c in int_part.chars().chain(frac_part.chars()) {
        let digit = i128::from(c.to_digit(10)?);
        mantissa = mantissa.checked_mul(10)?.checked_add(digit)?;
    }
    if negative {
        mantissa = -mantissa;
    }

    let scale = i64::try_from(frac_part.len()).ok()? - i64::from(exponent);
    if scale <= 0 {
        Some((scale_up(mantissa, u32::try_from(-scale).ok()?)?, 0))
    } else {
        Some((mantissa, u32::try_from(scale).ok()?))
    }
}

fn scale_up(mantissa: i128, by: u32) -> Option<i128> {
    (0..by).try_fold(mantissa, |acc, _| acc.checked_mul(10))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn num(value: serde_json::Value) -> Number {
        value.as_number().expect("test value is a number").clone()
    }

    #[test]
    fn test_is_integer() {
        assert!(is_integer(&num(json!(3))));
        assert!(is_integer(&num(json!(-3.0))));
        assert!(!is_integer(&num(json!(3.5))));
    }

    #[test]
    fn test_number_cmp() {
        assert_eq!(number_cmp(&num(json!(1)), &num(json!(1.0))), Some(Ordering::Equal));
        assert_eq!(number_cmp(&num(json!(-1)), &num(json!(0.5))), Some(Ordering::Less));
        assert_eq!(
            number_cmp(&num(json!(18_446_744_073_709_551_615u64)), &num(json!(-1))),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_multiple_of_decimal_fractions() {
        assert!(is_multiple_of(&num(json!(3)), &num(json!(0.1))));
        assert!(is_multiple_of(&num(json!(1.2)), &num(json!(0.4))));
        assert!(!is_multiple_of(&num(json!(10.23)), &num(json!(0.1))));
        assert!(!is_multiple_of(&num(json!(7)), &num(json!(2))));
        assert!(is_multiple_of(&num(json!(-6)), &num(json!(3))));
    }

    #[test]
    fn test_multiple_of_zero_divisor() {
        assert!(!is_multiple_of(&num(json!(4)), &num(json!(0))));
    }

    #[test]
    fn test_parse_decimal_exponents() {
        assert_eq!(parse_decimal("1e3"), Some((1000, 0)));
        assert_eq!(parse_decimal("-2.50"), Some((-250, 2)));
        assert_eq!(parse_decimal("1.5e-2"), Some((15, 3)));
    }
}
