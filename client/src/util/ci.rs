//! Uruguayan national ID (cédula de identidad, CI) validation.
//!
//! ALGORITHM
//! =========
//! Separators are ignored. A CI has 7 or 8 digits; 7-digit inputs are
//! left-padded with `0`. The first seven digits are weighted by
//! `[2, 9, 8, 7, 6, 3, 4]`, and the eighth digit must equal
//! `(10 - sum % 10) % 10`.

#[cfg(test)]
#[path = "ci_test.rs"]
mod ci_test;

const WEIGHTS: [u8; 7] = [2, 9, 8, 7, 6, 3, 4];

/// Reasons a CI string is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CiError {
    #[error("a CI has 7 or 8 digits, got {0}")]
    Length(usize),
    #[error("check digit mismatch: expected {expected}, got {actual}")]
    CheckDigit { expected: u8, actual: u8 },
}

/// Compute the check digit for the first seven digits of a CI.
pub fn check_digit(digits: &[u8; 7]) -> u8 {
    let sum: u32 = digits
        .iter()
        .zip(WEIGHTS)
        .map(|(d, w)| u32::from(*d) * u32::from(w))
        .sum();
    // Always < 10 after the outer modulo.
    #[allow(clippy::cast_possible_truncation)]
    let digit = ((10 - sum % 10) % 10) as u8;
    digit
}

/// Validate a CI and return its canonical 8-digit form.
///
/// # Errors
///
/// Returns [`CiError::Length`] when the input does not hold 7 or 8 digits, and
/// [`CiError::CheckDigit`] when the checksum does not match.
pub fn normalize_ci(raw: &str) -> Result<String, CiError> {
    let digits: Vec<u8> = raw
        .chars()
        .filter_map(|c| c.to_digit(10))
        .filter_map(|d| u8::try_from(d).ok())
        .collect();

    let padded: [u8; 8] = match digits.len() {
        7 => {
            let mut out = [0_u8; 8];
            out[1..].copy_from_slice(&digits);
            out
        }
        8 => {
            let mut out = [0_u8; 8];
            out.copy_from_slice(&digits);
            out
        }
        n => return Err(CiError::Length(n)),
    };

    let mut body = [0_u8; 7];
    body.copy_from_slice(&padded[..7]);
    let expected = check_digit(&body);
    let actual = padded[7];
    if expected != actual {
        return Err(CiError::CheckDigit { expected, actual });
    }

    Ok(padded.iter().map(|d| char::from(b'0' + d)).collect())
}

pub fn is_valid_ci(raw: &str) -> bool {
    normalize_ci(raw).is_ok()
}
