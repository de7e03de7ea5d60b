//! Fixed-point formatting and parsing for token and ether amounts.
//!
//! Amounts travel as base units (`U256`); these helpers convert to and from
//! the decimal strings users read and type. Output follows the common wallet
//! convention: trailing zeros trimmed, at least one fractional digit.

use client_blockchain_core::U256;

/// Decimals used by ether and by the Crypto Dev Token.
pub const ETHER_DECIMALS: u8 = 18;

fn unit(decimals: u8) -> U256 {
    U256::from(10).pow(U256::from(decimals))
}

/// Formats `value` base units as a decimal string with `decimals` places.
///
/// Examples (18 decimals): `0` → `"0.0"`, `10^18` → `"1.0"`, `5·10^15` → `"0.005"`.
pub fn format_units(value: U256, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }

    let base = unit(decimals);
    let whole = value / base;
    let fraction = (value % base).to_string();
    let padded = format!("{:0>width$}", fraction, width = decimals as usize);
    let trimmed = padded.trim_end_matches('0');

    if trimmed.is_empty() {
        format!("{}.0", whole)
    } else {
        format!("{}.{}", whole, trimmed)
    }
}

/// Formats wei (or token base units) as ether.
pub fn format_ether(value: U256) -> String {
    format_units(value, ETHER_DECIMALS)
}

/// Parses a decimal string into base units.
///
/// Returns `None` for empty input, signs, more than `decimals` fractional
/// digits, or values that overflow 256 bits.
pub fn parse_units(input: &str, decimals: u8) -> Option<U256> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let (whole, fraction) = match input.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (input, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if fraction.len() > decimals as usize {
        return None;
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let whole = if whole.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(whole, 10).ok()?
    };
    let padded = format!("{:0<width$}", fraction, width = decimals as usize);
    let fraction = if padded.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(&padded, 10).ok()?
    };

    whole.checked_mul(unit(decimals))?.checked_add(fraction)
}

/// Parses a whole-token quantity typed by the user.
pub fn parse_quantity(input: &str) -> Option<U256> {
    parse_units(input, 0)
}
