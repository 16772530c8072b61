//! The integer part of an order key.
//!
//! The head character encodes how many characters the integer part spans:
//! `a`..`z` cover lengths 2..27 on the positive side and `Z`..`A` cover
//! lengths 2..27 on the negative side. Incrementing past the last value of a
//! length moves to the next head, so integers stay ordered as plain strings.

use super::digits::{digit_for, value_of, BASE, MAX_DIGIT, ZERO};
use super::error::KeyError;

/// The integer part below every other one. It is reserved so that a key
/// smaller than any generated key can always be found.
pub const SMALLEST_INTEGER: &[u8; 27] = b"A00000000000000000000000000";

/// Length of the integer part announced by `head`.
pub fn length_for_head(head: u8, key: &[u8]) -> Result<usize, KeyError> {
    match head {
        b'a'..=b'z' => Ok(usize::from(head.saturating_sub(b'a')).saturating_add(2)),
        b'A'..=b'Z' => Ok(usize::from(b'Z'.saturating_sub(head)).saturating_add(2)),
        _ => Err(KeyError::malformed(key, "invalid head character")),
    }
}

/// Split a key into its integer and fractional parts.
pub fn split_key(key: &[u8]) -> Result<(&[u8], &[u8]), KeyError> {
    let head = *key
        .first()
        .ok_or_else(|| KeyError::malformed(key, "empty key"))?;
    let len = length_for_head(head, key)?;
    match (key.get(..len), key.get(len..)) {
        (Some(integer), Some(fraction)) => Ok((integer, fraction)),
        _ => Err(KeyError::malformed(key, "shorter than its integer part")),
    }
}

/// Next integer, or `None` once the largest integer has been reached.
pub fn increment(integer: &[u8]) -> Result<Option<Vec<u8>>, KeyError> {
    let (&head, digits) = integer
        .split_first()
        .ok_or_else(|| KeyError::malformed(integer, "empty integer part"))?;
    let mut digits = digits.to_vec();
    let mut carry = true;
    for digit in digits.iter_mut().rev() {
        let next = value_of(*digit, integer)?.saturating_add(1);
        if next == BASE {
            *digit = ZERO;
        } else {
            *digit = digit_for(next)?;
            carry = false;
            break;
        }
    }
    if !carry {
        return Ok(Some(with_head(head, digits)));
    }
    match head {
        b'Z' => Ok(Some(vec![b'a', ZERO])),
        b'z' => Ok(None),
        _ => {
            let next_head = head.saturating_add(1);
            if next_head > b'a' {
                digits.push(ZERO);
            } else {
                digits.pop();
            }
            Ok(Some(with_head(next_head, digits)))
        }
    }
}

/// Previous integer, or `None` below the smallest one.
pub fn decrement(integer: &[u8]) -> Result<Option<Vec<u8>>, KeyError> {
    let (&head, digits) = integer
        .split_first()
        .ok_or_else(|| KeyError::malformed(integer, "empty integer part"))?;
    let mut digits = digits.to_vec();
    let mut borrow = true;
    for digit in digits.iter_mut().rev() {
        match value_of(*digit, integer)?.checked_sub(1) {
            None => *digit = MAX_DIGIT,
            Some(prev) => {
                *digit = digit_for(prev)?;
                borrow = false;
                break;
            }
        }
    }
    if !borrow {
        return Ok(Some(with_head(head, digits)));
    }
    match head {
        b'a' => Ok(Some(vec![b'Z', MAX_DIGIT])),
        b'A' => Ok(None),
        _ => {
            let prev_head = head.saturating_sub(1);
            if prev_head < b'Z' {
                digits.push(MAX_DIGIT);
            } else {
                digits.pop();
            }
            Ok(Some(with_head(prev_head, digits)))
        }
    }
}

fn with_head(head: u8, digits: Vec<u8>) -> Vec<u8> {
    let mut out = Vec::with_capacity(digits.len().saturating_add(1));
    out.push(head);
    out.extend(digits);
    out
}
