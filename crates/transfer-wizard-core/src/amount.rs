//! Exact conversion between decimal text and integer minor units.

use thiserror::Error;

use crate::domain::MAX_ASSET_DECIMALS;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("quantity is empty")]
    Empty,
    #[error("quantity is not a plain decimal number: {0}")]
    Malformed(String),
    #[error("quantity has more than {decimals} fractional digits")]
    TooManyDecimals { decimals: u8 },
    #[error("quantity must not be negative")]
    Negative,
    #[error("quantity does not fit in 63 bits")]
    Overflow,
    #[error("unsupported decimal precision {0}")]
    UnsupportedDecimals(u8),
}

/// Scales `text` by `10^decimals` into minor units without rounding.
///
/// Extra fractional digits are accepted only when they are zeros, so `"1.50"`
/// at precision 1 is `15` while `"1.55"` is rejected.
pub fn parse_quantity_qnt(text: &str, decimals: u8) -> Result<i64, AmountError> {
    if decimals > MAX_ASSET_DECIMALS {
        return Err(AmountError::UnsupportedDecimals(decimals));
    }
    if text.is_empty() {
        return Err(AmountError::Empty);
    }
    if text.starts_with('-') {
        return Err(AmountError::Negative);
    }

    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (text, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part)
        || !all_digits(frac_part)
        || (int_part.is_empty() && frac_part.is_empty())
    {
        return Err(AmountError::Malformed(text.to_owned()));
    }

    let precision = usize::from(decimals);
    let (kept, dropped) = frac_part.split_at(frac_part.len().min(precision));
    if dropped.bytes().any(|b| b != b'0') {
        return Err(AmountError::TooManyDecimals { decimals });
    }

    let mut qnt: i64 = 0;
    let padding = precision - kept.len();
    let digits = int_part
        .bytes()
        .chain(kept.bytes())
        .chain(std::iter::repeat(b'0').take(padding));
    for digit in digits {
        qnt = qnt
            .checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(digit - b'0')))
            .ok_or(AmountError::Overflow)?;
    }
    Ok(qnt)
}

/// Renders minor units with exactly `decimals` fractional digits.
pub fn format_quantity_qnt(qnt: i64, decimals: u8) -> Result<String, AmountError> {
    if decimals > MAX_ASSET_DECIMALS {
        return Err(AmountError::UnsupportedDecimals(decimals));
    }
    if decimals == 0 {
        return Ok(qnt.to_string());
    }
    let sign = if qnt < 0 { "-" } else { "" };
    let magnitude = u128::from(qnt.unsigned_abs());
    let scale = 10u128.pow(u32::from(decimals));
    Ok(format!(
        "{sign}{}.{:0width$}",
        magnitude / scale,
        magnitude % scale,
        width = usize::from(decimals)
    ))
}
