/*!
# Fixed-Point Amounts

Allocation files carry human-readable decimal amounts ("12.5"). Trees and the
registry work in integer base units, scaled by `10^decimals`.

Conversion is exact: an amount with more fractional digits than the token
supports is rejected rather than rounded, because a silently rounded leaf would
commit a different allocation than the file author wrote.
*/

use rust_decimal::Decimal;

use crate::errors::{CsvError, CsvResult};

/// Implied decimals of allocation amounts unless configured otherwise.
pub const DEFAULT_TOKEN_DECIMALS: u32 = 18;

/// Parse a decimal string into base units.
///
/// # Examples
///
/// ```
/// use prism_tranche_csvs::parse_token_amount;
///
/// assert_eq!(parse_token_amount("1.5", 18).unwrap(), 1_500_000_000_000_000_000);
/// assert_eq!(parse_token_amount("42", 0).unwrap(), 42);
/// assert!(parse_token_amount("0.001", 2).is_err());
/// ```
pub fn parse_token_amount(text: &str, decimals: u32) -> CsvResult<u128> {
    let trimmed = text.trim();

    let value = Decimal::from_str_exact(trimmed)
        .map_err(|e| CsvError::InvalidAmount(format!("'{}': {}", trimmed, e)))?;

    if value < Decimal::ZERO {
        return Err(CsvError::InvalidAmount(format!(
            "'{}': amounts must not be negative",
            trimmed
        )));
    }

    // "1.500" carries scale 3 but only needs 1
    let value = value.normalize();
    let scale = value.scale();

    if scale > decimals {
        return Err(CsvError::InvalidAmount(format!(
            "'{}': more than {} decimal places",
            trimmed, decimals
        )));
    }

    let mantissa = u128::try_from(value.mantissa())
        .map_err(|_| CsvError::InvalidAmount(format!("'{}': negative mantissa", trimmed)))?;

    10u128
        .checked_pow(decimals - scale)
        .and_then(|factor| mantissa.checked_mul(factor))
        .ok_or_else(|| {
            CsvError::InvalidAmount(format!(
                "'{}' * 10^{} overflows u128",
                trimmed, decimals
            ))
        })
}

/// Render base units as a decimal string without trailing zeros.
pub fn format_token_amount(amount: u128, decimals: u32) -> String {
    if decimals == 0 {
        return amount.to_string();
    }

    let digits = format!("{:0>width$}", amount, width = decimals as usize + 1);
    let (whole, fraction) = digits.split_at(digits.len() - decimals as usize);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}
