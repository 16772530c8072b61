//! Fractional order keys.
//!
//! An order key is a printable string whose plain byte-wise comparison gives
//! the display order of gallery items. Between any two keys another key can
//! always be generated, so moving or inserting an item never renumbers its
//! siblings.
//!
//! A key is an integer part (see [`integer`]) followed by an optional
//! fraction that never ends in `0`. The first key handed out is [`INITIAL_KEY`].

mod digits;
pub mod error;
mod integer;
mod midpoint;

pub use error::KeyError;

use integer::{split_key, SMALLEST_INTEGER};
use midpoint::midpoint;

/// Key produced when a collection is empty.
pub const INITIAL_KEY: &str = "a0";

/// Check that `key` is a well-formed order key.
pub fn validate_order_key(key: &str) -> Result<(), KeyError> {
    let bytes = key.as_bytes();
    if bytes == SMALLEST_INTEGER.as_slice() {
        return Err(KeyError::malformed(bytes, "reserved smallest key"));
    }
    let (integer, fraction) = split_key(bytes)?;
    for &digit in integer.iter().skip(1).chain(fraction) {
        digits::value_of(digit, bytes)?;
    }
    if fraction.last() == Some(&digits::ZERO) {
        return Err(KeyError::malformed(bytes, "fraction ends in zero"));
    }
    Ok(())
}

/// Generate a key strictly between `lower` and `upper`.
///
/// A missing bound leaves that side open: `(None, Some(b))` yields a key below
/// `b`, `(Some(a), None)` a key above `a`, and `(None, None)` the initial key.
/// Bounds that are inverted, equal, or not valid keys are rejected.
pub fn generate_key(lower: Option<&str>, upper: Option<&str>) -> Result<String, KeyError> {
    if let (Some(lower), Some(upper)) = (lower, upper) {
        if lower >= upper {
            return Err(KeyError::Inverted {
                lower: lower.to_string(),
                upper: upper.to_string(),
            });
        }
    }
    if let Some(lower) = lower {
        validate_order_key(lower)?;
    }
    if let Some(upper) = upper {
        validate_order_key(upper)?;
    }
    let key = match (lower, upper) {
        (None, None) => INITIAL_KEY.as_bytes().to_vec(),
        (None, Some(upper)) => key_before(upper.as_bytes())?,
        (Some(lower), None) => key_after(lower.as_bytes())?,
        (Some(lower), Some(upper)) => key_between(lower.as_bytes(), upper.as_bytes())?,
    };
    String::from_utf8(key).map_err(|_| KeyError::Exhausted("generated a non-ASCII key"))
}

/// Generate `count` ascending keys, all strictly between `lower` and `upper`.
pub fn generate_keys(
    lower: Option<&str>,
    upper: Option<&str>,
    count: usize,
) -> Result<Vec<String>, KeyError> {
    match count {
        0 => return Ok(Vec::new()),
        1 => return Ok(vec![generate_key(lower, upper)?]),
        _ => {}
    }
    if upper.is_none() {
        let mut keys = Vec::with_capacity(count);
        let mut last = generate_key(lower, None)?;
        for _ in 1..count {
            let next = generate_key(Some(&last), None)?;
            keys.push(std::mem::replace(&mut last, next));
        }
        keys.push(last);
        return Ok(keys);
    }
    if lower.is_none() {
        let mut keys = Vec::with_capacity(count);
        let mut first = generate_key(None, upper)?;
        for _ in 1..count {
            let prev = generate_key(None, Some(&first))?;
            keys.push(std::mem::replace(&mut first, prev));
        }
        keys.push(first);
        keys.reverse();
        return Ok(keys);
    }
    let half = count / 2;
    let middle = generate_key(lower, upper)?;
    let mut keys = generate_keys(lower, Some(&middle), half)?;
    let rest = generate_keys(
        Some(&middle),
        upper,
        count.saturating_sub(half).saturating_sub(1),
    )?;
    keys.push(middle);
    keys.extend(rest);
    Ok(keys)
}

fn key_before(upper: &[u8]) -> Result<Vec<u8>, KeyError> {
    let (integer, fraction) = split_key(upper)?;
    if integer == SMALLEST_INTEGER.as_slice() {
        let mut key = integer.to_vec();
        key.extend(midpoint(b"", Some(fraction))?);
        return Ok(key);
    }
    if !fraction.is_empty() {
        return Ok(integer.to_vec());
    }
    integer::decrement(integer)?.ok_or(KeyError::Exhausted("cannot decrement any further"))
}

fn key_after(lower: &[u8]) -> Result<Vec<u8>, KeyError> {
    let (integer, fraction) = split_key(lower)?;
    match integer::increment(integer)? {
        Some(next) => Ok(next),
        None => {
            let mut key = integer.to_vec();
            key.extend(midpoint(fraction, None)?);
            Ok(key)
        }
    }
}

fn key_between(lower: &[u8], upper: &[u8]) -> Result<Vec<u8>, KeyError> {
    let (lower_int, lower_frac) = split_key(lower)?;
    let (upper_int, upper_frac) = split_key(upper)?;
    if lower_int == upper_int {
        let mut key = lower_int.to_vec();
        key.extend(midpoint(lower_frac, Some(upper_frac))?);
        return Ok(key);
    }
    let next = integer::increment(lower_int)?
        .ok_or(KeyError::Exhausted("cannot increment any further"))?;
    if next.as_slice() < upper {
        return Ok(next);
    }
    let mut key = lower_int.to_vec();
    key.extend(midpoint(lower_frac, None)?);
    Ok(key)
}
