//! Request correlation ids.
//!
//! An id is two base-36 strings built from fresh random 64-bit halves, so it
//! stays short, URL-safe and readable in backend logs.

#[cfg(test)]
#[path = "request_id_test.rs"]
mod request_id_test;

use uuid::Uuid;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a new correlation id for `X-REQUEST-ID`.
pub fn generate_request_id() -> String {
    let (high, low) = Uuid::new_v4().as_u64_pair();
    let mut id = to_base36(high);
    id.push_str(&to_base36(low));
    id
}

/// Render `value` in lowercase base 36.
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::with_capacity(13);
    while value > 0 {
        let digit = usize::try_from(value % 36).unwrap_or_default();
        digits.push(char::from(DIGITS[digit]));
        value /= 36;
    }
    digits.iter().rev().collect()
}
