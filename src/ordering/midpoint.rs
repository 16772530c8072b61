//! Midpoints between fractional parts.
//!
//! A fractional part is read as base-62 digits after an implicit radix point.
//! It never ends in the zero digit, which keeps every value spelled exactly
//! one way.

use super::digits::{digit_for, value_of, BASE, ZERO};
use super::error::KeyError;

/// Digits strictly between `lower` and `upper` (`None` means 1.0).
pub fn midpoint(lower: &[u8], upper: Option<&[u8]>) -> Result<Vec<u8>, KeyError> {
    if lower.last() == Some(&ZERO) {
        return Err(KeyError::malformed(lower, "fraction ends in zero"));
    }
    if let Some(upper) = upper {
        if upper.last() == Some(&ZERO) {
            return Err(KeyError::malformed(upper, "fraction ends in zero"));
        }
        if lower >= upper {
            return Err(KeyError::Inverted {
                lower: String::from_utf8_lossy(lower).into_owned(),
                upper: String::from_utf8_lossy(upper).into_owned(),
            });
        }
        // Shared prefix, reading missing `lower` digits as zero.
        let shared = upper
            .iter()
            .enumerate()
            .take_while(|&(i, &digit)| lower.get(i).copied().unwrap_or(ZERO) == digit)
            .count();
        if shared > 0 {
            let (prefix, upper_rest) = upper.split_at(shared);
            let lower_rest = lower.get(shared..).unwrap_or_default();
            let mut out = prefix.to_vec();
            out.extend(midpoint(lower_rest, Some(upper_rest))?);
            return Ok(out);
        }
    }

    let lower_digit = match lower.first() {
        Some(&digit) => value_of(digit, lower)?,
        None => 0,
    };
    let upper_digit = match upper {
        Some(upper) => {
            let first = upper
                .first()
                .ok_or_else(|| KeyError::malformed(upper, "empty upper fraction"))?;
            value_of(*first, upper)?
        }
        None => BASE,
    };

    if upper_digit.saturating_sub(lower_digit) > 1 {
        let mid = lower_digit.saturating_add(upper_digit).saturating_add(1) / 2;
        return Ok(vec![digit_for(mid)?]);
    }

    // Consecutive first digits.
    match upper {
        Some(upper) if upper.len() > 1 => Ok(upper.get(..1).unwrap_or_default().to_vec()),
        _ => {
            let mut out = vec![digit_for(lower_digit)?];
            out.extend(midpoint(lower.get(1..).unwrap_or_default(), None)?);
            Ok(out)
        }
    }
}
