//! # Check Digit Module
//!
//! GS1 Mod-10 check digit arithmetic.
//!
//! ## The Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GS1 Mod-10 over a 13-digit base (left-to-right, 0-indexed)             │
//! │                                                                         │
//! │  base:    7  4  8  2  3  4  5  6  7  8  9  0  1                         │
//! │  index:   0  1  2  3  4  5  6  7  8  9 10 11 12                         │
//! │  weight:  3  1  3  1  3  1  3  1  3  1  3  1  3                         │
//! │                                                                         │
//! │  even-index sum × 3 = (7+8+3+5+7+9+1) × 3 = 120                         │
//! │  odd-index sum  × 1 = (4+2+4+6+8+0)       =  24                         │
//! │  total = 144 → remainder 4 → check digit 10 - 4 = 6                     │
//! │                                                                         │
//! │  GTIN-14: 7482345678901 6                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! For bodies of other lengths (verifying GTIN-8/12/13) the weights are
//! anchored on the RIGHTMOST body digit, which always gets weight 3. On a
//! 13-digit body both conventions assign identical weights.

use crate::error::{CoreError, CoreResult};
use crate::GTIN13_BASE_LEN;

/// Numeric value of an ASCII digit byte.
#[inline]
fn digit_value(byte: u8) -> u32 {
    u32::from(byte - b'0')
}

/// Turns a weighted sum into the digit that lifts it to the next multiple of 10.
#[inline]
fn check_digit_from_total(total: u32) -> u8 {
    let remainder = (total % 10) as u8;
    if remainder == 0 {
        0
    } else {
        10 - remainder
    }
}

// =============================================================================
// 13-Digit Check Digit
// =============================================================================

/// Computes the GS1 check digit for a 13-digit base, returning an error if the
/// input is not exactly 13 ASCII digits.
///
/// ## Example
/// ```rust
/// use gtin_core::check_digit::try_compute_check_digit;
///
/// assert_eq!(try_compute_check_digit("7482345678901"), Ok(6));
/// assert!(try_compute_check_digit("748234567890").is_err()); // 12 digits
/// ```
pub fn try_compute_check_digit(digits13: &str) -> CoreResult<u8> {
    if let Some((pos, ch)) = digits13.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
        return Err(CoreError::CheckDigitInput {
            expected_len: GTIN13_BASE_LEN,
            reason: format!("non-digit {ch:?} at byte {pos}"),
        });
    }

    if digits13.len() != GTIN13_BASE_LEN {
        return Err(CoreError::CheckDigitInput {
            expected_len: GTIN13_BASE_LEN,
            reason: format!("got {} digits", digits13.len()),
        });
    }

    let (odd_sum, even_sum) = digits13.bytes().enumerate().fold(
        (0u32, 0u32),
        |(odd, even), (i, byte)| {
            if i % 2 == 0 {
                (odd + digit_value(byte), even)
            } else {
                (odd, even + digit_value(byte))
            }
        },
    );

    Ok(check_digit_from_total(odd_sum * 3 + even_sum))
}

/// Computes the GS1 check digit for a 13-digit base.
///
/// Positions are counted from the left starting at 0: digits at even indices
/// are weighted 3, digits at odd indices are weighted 1.
///
/// # Panics
///
/// Panics if `digits13` is not exactly 13 ASCII digits. Callers own that
/// precondition; use [`try_compute_check_digit`] when the input is untrusted.
///
/// ## Example
/// ```rust
/// use gtin_core::check_digit::compute_check_digit;
///
/// assert_eq!(compute_check_digit("7482345678901"), 6);
/// ```
pub fn compute_check_digit(digits13: &str) -> u8 {
    match try_compute_check_digit(digits13) {
        Ok(digit) => digit,
        Err(err) => panic!("compute_check_digit precondition violated: {err}"),
    }
}

// =============================================================================
// General GS1 Verification
// =============================================================================

/// Computes the GS1 check digit for a body of any length.
///
/// Returns `None` if the body is empty or contains anything but ASCII digits.
pub fn gs1_check_digit(body: &str) -> Option<u8> {
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let total: u32 = body
        .bytes()
        .rev()
        .enumerate()
        .map(|(from_right, byte)| {
            let weight = if from_right % 2 == 0 { 3 } else { 1 };
            digit_value(byte) * weight
        })
        .sum();

    Some(check_digit_from_total(total))
}

/// Returns true if the last digit of `code` is the GS1 check digit of the rest.
///
/// ## Example
/// ```rust
/// use gtin_core::check_digit::has_valid_check_digit;
///
/// assert!(has_valid_check_digit("4006381333931"));
/// assert!(!has_valid_check_digit("4006381333932"));
/// ```
pub fn has_valid_check_digit(code: &str) -> bool {
    if code.len() < 2 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let (body, last) = code.split_at(code.len() - 1);
    match (gs1_check_digit(body), last.as_bytes()[0]) {
        (Some(expected), found) if found.is_ascii_digit() => expected == found - b'0',
        _ => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
