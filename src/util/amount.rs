//! Fixed-point currency amounts rendered as decimal text.

use crate::util::{Error, Result};
use serde_json::{Number, Value};

/// Number of base units in one coin.
pub const COIN: i64 = 100_000_000;

/// Formats an amount as `[-]<whole>.<8 fractional digits>`.
///
/// Truncating division and modulo by [`COIN`]; the sign is kept separately so
/// `i64::MIN` formats without overflow.
///
/// # Examples
/// ```
/// use ccscript::util::value_from_amount;
/// assert_eq!(value_from_amount(150_000_000), "1.50000000");
/// assert_eq!(value_from_amount(-1), "-0.00000001");
/// ```
#[must_use]
pub fn value_from_amount(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let n_abs = amount.unsigned_abs();
    let coin = COIN as u64;
    format!("{}{}.{:08}", sign, n_abs / coin, n_abs % coin)
}

/// Amount as a JSON number carrying the exact decimal text.
#[must_use]
pub fn amount_to_json(amount: i64) -> Value {
    let text = value_from_amount(amount);
    match text.parse::<Number>() {
        Ok(n) => Value::Number(n),
        Err(_) => Value::String(text),
    }
}

/// Largest amount accepted from text, in base units.
pub const MAX_MONEY: i64 = 21_000_000_000 * COIN;

/// Parses decimal text with at most 8 fractional digits into base units.
///
/// # Errors
/// `Error::BadArgument` for anything else, or when the result is outside
/// `-MAX_MONEY..=MAX_MONEY`.
pub fn parse_amount(text: &str) -> Result<i64> {
    let bad = || Error::BadArgument(format!("Invalid amount {}", text));
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !is_digits(whole) || !is_digits(frac) || frac.len() > 8 {
        return Err(bad());
    }
    if digits.ends_with('.') {
        return Err(bad());
    }
    let whole: i64 = whole.parse().map_err(|_| bad())?;
    let frac: i64 = format!("{:0<8}", frac).parse().map_err(|_| bad())?;
    let n = whole.checked_mul(COIN).and_then(|w| w.checked_add(frac)).ok_or_else(bad)?;
    if n > MAX_MONEY {
        return Err(bad());
    }
    Ok(if negative { -n } else { n })
}

/// Reads an amount from a JSON number or string.
///
/// # Errors
/// Any other JSON type, or text [`parse_amount`] rejects.
pub fn amount_from_json(value: &Value) -> Result<i64> {
    match value {
        Value::Number(n) => parse_amount(&n.to_string()),
        Value::String(s) => parse_amount(s),
        other => Err(Error::BadArgument(format!("Amount is not a number: {}", other))),
    }
}
