//! Keypad amount accumulation
//!
//! Classic right-to-left numeric-pad entry: each digit shifts the running
//! cent total left one decimal place, backspace drops the last digit.

use thiserror::Error;

/// Errors raised by keypad input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeypadError {
    #[error("Unrecognized key: {0}")]
    UnrecognizedKey(String),

    #[error("Amount exceeds the maximum the terminal can register")]
    Overflow,
}

/// A single keypad keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Backspace,
}

impl Key {
    /// Parse a wire key: "0"–"9" or "backspace"
    pub fn parse(raw: &str) -> Result<Self, KeypadError> {
        if raw == "backspace" {
            return Ok(Key::Backspace);
        }

        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_digit() => Ok(Key::Digit(c as u8 - b'0')),
            _ => Err(KeypadError::UnrecognizedKey(raw.to_string())),
        }
    }
}

/// Running cent total being keyed in on the merchant screen
///
/// Invariant: non-negative (unsigned by construction). The total only
/// changes through `press`; overflowing keystrokes are rejected and leave
/// the prior value intact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingAmount {
    cents: u64,
}

impl PendingAmount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cents(&self) -> u64 {
        self.cents
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Apply one keystroke to the running total
    pub fn press(&mut self, key: Key) -> Result<(), KeypadError> {
        match key {
            Key::Digit(d) => {
                self.cents = self
                    .cents
                    .checked_mul(10)
                    .and_then(|c| c.checked_add(u64::from(d)))
                    .ok_or(KeypadError::Overflow)?;
            }
            Key::Backspace => {
                self.cents /= 10;
            }
        }
        Ok(())
    }

    /// Two-decimal display value, e.g. 125 cents renders as "1.25"
    pub fn display(&self) -> String {
        format!("{}.{:02}", self.cents / 100, self.cents % 100)
    }

    /// Reset the total for a fresh payment
    pub fn clear(&mut self) {
        self.cents = 0;
    }
}
