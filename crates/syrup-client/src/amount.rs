//! Decimal amount parsing.

use crate::error::SyrupError;

/// Decimals of the pool base asset (USDC).
pub const BASE_ASSET_DECIMALS: u32 = 6;

/// Parse a human-readable decimal amount into base units using
/// [`BASE_ASSET_DECIMALS`]. `"12.5"` becomes `12_500_000`.
pub fn parse_base_amount(input: &str) -> Result<u64, SyrupError> {
    parse_amount(input, BASE_ASSET_DECIMALS)
}

/// Parse `input` as a decimal and scale it by `10^decimals`.
///
/// Digits past `decimals` are only accepted when they are zeros; anything
/// that would be truncated is rejected, as are zero, negative and
/// non-numeric inputs.
pub fn parse_amount(input: &str, decimals: u32) -> Result<u64, SyrupError> {
    let invalid = |reason: &str| SyrupError::InvalidAmount(format!("`{input}`: {reason}"));

    let trimmed = input.trim();
    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("no digits"));
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid("expected a non-negative decimal number"));
    }

    let significant = fraction.trim_end_matches('0');
    if significant.len() > decimals as usize {
        return Err(invalid(&format!("more than {decimals} decimal places")));
    }

    let scale = 10u64
        .checked_pow(decimals)
        .ok_or_else(|| invalid("unsupported decimals"))?;
    let whole_units = if whole.is_empty() {
        0
    } else {
        whole.parse::<u64>().map_err(|_| invalid("too large"))?
    };
    let fraction_units = if significant.is_empty() {
        0
    } else {
        let padded = format!("{significant:0<width$}", width = decimals as usize);
        padded.parse::<u64>().map_err(|_| invalid("too large"))?
    };

    let amount = whole_units
        .checked_mul(scale)
        .and_then(|units| units.checked_add(fraction_units))
        .ok_or_else(|| invalid("too large"))?;

    if amount == 0 {
        return Err(invalid("must be greater than zero"));
    }
    Ok(amount)
}
