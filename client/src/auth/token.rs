//! Session token decoding.
//!
//! The backend splits its JWT across two cookies: `token-hp` carries
//! `header.payload` and is readable from script, while the signature stays in
//! an HttpOnly cookie. The client never verifies anything; it only reads the
//! `id` claim out of the payload to know who is logged in.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Deserialize;

/// Identity carried by a session token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
}

const SEGMENT_CONFIG: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_encode_padding(false).with_decode_padding_mode(DecodePaddingMode::Indifferent);

/// JWT alphabet, padding optional.
const URL_SAFE_SEGMENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, SEGMENT_CONFIG);
/// Standard alphabet, padding optional.
const STANDARD_SEGMENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, SEGMENT_CONFIG);

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("session token has no payload segment")]
    MissingPayload,
    #[error("session token payload is not base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("session token payload is not JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("session token payload has no usable `id` claim")]
    MissingId,
}

#[derive(Deserialize)]
struct Claims {
    #[serde(default)]
    id: Option<serde_json::Value>,
}

/// Decode the identity from a raw `token-hp` cookie value.
///
/// Accepts `header.payload` as well as the full three-segment form.
///
/// # Errors
///
/// Returns a [`TokenError`] when the payload segment is missing, is not
/// base64, is not a JSON object, or lacks a non-empty `id`.
pub fn parse_session_token(raw: &str) -> Result<Identity, TokenError> {
    let payload = raw
        .trim()
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or(TokenError::MissingPayload)?;

    let bytes = decode_segment(payload)?;
    let claims: Claims = serde_json::from_slice(&bytes)?;

    let user_id = match claims.id {
        Some(serde_json::Value::String(id)) if !id.is_empty() => id,
        Some(serde_json::Value::Number(id)) => id.to_string(),
        _ => return Err(TokenError::MissingId),
    };

    Ok(Identity { user_id })
}

/// Decode one JWT segment in either alphabet, padded or not.
fn decode_segment(segment: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_SEGMENT.decode(segment).or_else(|url_safe_err| STANDARD_SEGMENT.decode(segment).map_err(|_| url_safe_err))
}
