//! Amount conversion between smallest units and display strings.

use alloy::primitives::U256;

use crate::error::{AppError, Result};
use crate::ethereum::constants::ETHER_DECIMALS;

/// Format a U256 value with decimals to a human-readable string.
///
/// Trailing fractional zeros are dropped, so whole values carry no point.
pub fn format_units(value: U256, decimals: u8) -> String {
    if value == U256::ZERO {
        return "0".to_string();
    }

    let value_str = value.to_string();
    let decimals = decimals as usize;

    if decimals == 0 {
        return value_str;
    }

    let len = value_str.len();
    if len <= decimals {
        let zeros = decimals - len;
        let decimal_part = value_str.trim_end_matches('0');
        format!("0.{}{}", "0".repeat(zeros), decimal_part)
    } else {
        let (integer, decimal) = value_str.split_at(len - decimals);
        let decimal = decimal.trim_end_matches('0');
        if decimal.is_empty() {
            integer.to_string()
        } else {
            format!("{}.{}", integer, decimal)
        }
    }
}

/// Format an 18-decimal amount for display, always keeping a fractional part
/// (`2 ETH` renders as `2.0`, `0` as `0.0`).
pub fn format_ether(value: U256) -> String {
    let formatted = format_units(value, ETHER_DECIMALS);
    if formatted.contains('.') {
        formatted
    } else {
        format!("{formatted}.0")
    }
}

/// Parse a human-readable amount string to U256 with decimals.
///
/// Accepts plain decimal notation only; excess fractional digits are truncated.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256> {
    let amount = amount.trim();

    if amount.is_empty() {
        return Err(AppError::InvalidAmount("Amount cannot be empty".to_string()));
    }

    if amount.starts_with('-') {
        return Err(AppError::InvalidAmount("Amount cannot be negative".to_string()));
    }

    if !amount.chars().all(|c| c.is_ascii_digit() || c == '.') || amount == "." {
        return Err(AppError::InvalidAmount(format!("Not a decimal number: {amount}")));
    }

    let decimals = decimals as usize;
    let multiplier = U256::from(10).pow(U256::from(decimals));
    let parts: Vec<&str> = amount.split('.').collect();

    let (integer, mut fraction) = match parts.as_slice() {
        [integer] => (*integer, String::new()),
        [integer, fraction] => (*integer, fraction.to_string()),
        _ => return Err(AppError::InvalidAmount(format!("Invalid amount format: {amount}"))),
    };

    if fraction.len() > decimals {
        fraction.truncate(decimals);
    } else {
        fraction.push_str(&"0".repeat(decimals - fraction.len()));
    }

    let integer_value = parse_digits(integer)?;
    let fraction_value = parse_digits(&fraction)?;

    integer_value
        .checked_mul(multiplier)
        .and_then(|v| v.checked_add(fraction_value))
        .ok_or_else(|| AppError::InvalidAmount(format!("Amount too large: {amount}")))
}

/// Parse an 18-decimal amount (`"2"` becomes `2 * 10^18`).
pub fn parse_ether(amount: &str) -> Result<U256> {
    parse_units(amount, ETHER_DECIMALS)
}

fn parse_digits(digits: &str) -> Result<U256> {
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    digits.parse::<U256>().map_err(|e| AppError::InvalidAmount(format!("Invalid amount: {e}")))
}
