//! Base-62 digit alphabet shared by the integer and fractional parts of a key.

use super::error::KeyError;

/// Digits in ascending byte order, so digit order equals string order.
pub const BASE_62_DIGITS: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Number of digits in the alphabet.
pub const BASE: usize = 62;

/// Smallest digit.
pub const ZERO: u8 = b'0';

/// Largest digit.
pub const MAX_DIGIT: u8 = b'z';

/// Value of a digit character, or an error naming the key it came from.
pub fn value_of(digit: u8, key: &[u8]) -> Result<usize, KeyError> {
    BASE_62_DIGITS
        .iter()
        .position(|&d| d == digit)
        .ok_or_else(|| KeyError::malformed(key, "contains a non base-62 character"))
}

/// Character for a digit value below [`BASE`].
pub fn digit_for(value: usize) -> Result<u8, KeyError> {
    BASE_62_DIGITS
        .get(value)
        .copied()
        .ok_or(KeyError::Exhausted("digit out of range"))
}
