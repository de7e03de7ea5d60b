//! Local UI state that never leaves the terminal.
use client_blockchain_core::U256;
use client_frontend_core::format::parse_quantity;

/// Longest quantity the field accepts.
const MAX_DIGITS: usize = 12;

/// Numeric quantity typed by the user.
#[derive(Clone, Debug, Default)]
pub struct QuantityInput {
    digits: String,
}

impl QuantityInput {
    /// Returns `true` when the field changed.
    pub fn push(&mut self, digit: char) -> bool {
        if !digit.is_ascii_digit() || self.digits.len() >= MAX_DIGITS {
            return false;
        }
        if self.digits == "0" {
            self.digits.clear();
        }
        self.digits.push(digit);
        true
    }

    pub fn pop(&mut self) -> bool {
        self.digits.pop().is_some()
    }

    /// Parsed amount; an empty field is zero.
    pub fn value(&self) -> U256 {
        parse_quantity(&self.digits).unwrap_or(U256::ZERO)
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }
}
