//! Wire codec: structured JSON payloads wrapped in base64 framing.
//!
//! Agreements and lock/claim payloads cross the boundary as
//! base64-encoded JSON so they can travel through text-only transports
//! unharmed. Decode failures — bad base64, bad JSON, or an empty
//! payload — surface as [`OpenlockError::Decode`].

use base64::Engine as _;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{ClaimPayload, ExchangeAgreement, LockPayload, OpenlockError, Result};

const BASE64: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// Encode an agreement for the wire.
pub fn encode_agreement(agreement: &ExchangeAgreement) -> Result<String> {
    encode(agreement)
}

/// Decode an agreement from the wire.
pub fn decode_agreement(text: &str) -> Result<ExchangeAgreement> {
    decode(text, "agreement")
}

/// Encode a lock payload for the wire.
pub fn encode_lock_payload(payload: &LockPayload) -> Result<String> {
    encode(payload)
}

/// Decode a lock payload from the wire.
pub fn decode_lock_payload(text: &str) -> Result<LockPayload> {
    decode(text, "lock payload")
}

/// Encode a claim payload for the wire.
pub fn encode_claim_payload(payload: &ClaimPayload) -> Result<String> {
    encode(payload)
}

/// Decode a claim payload from the wire.
pub fn decode_claim_payload(text: &str) -> Result<ClaimPayload> {
    decode(text, "claim payload")
}

/// Decode a bare base64 field (e.g. a revealed preimage).
pub fn decode_base64(text: &str, what: &str) -> Result<Vec<u8>> {
    BASE64.decode(text).map_err(|err| OpenlockError::Decode {
        reason: format!("{what} is not valid base64: {err}"),
    })
}

/// Encode raw bytes as a base64 field.
#[must_use]
pub fn encode_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

fn encode<T: Serialize>(value: &T) -> Result<String> {
    Ok(BASE64.encode(serde_json::to_vec(value)?))
}

fn decode<T: DeserializeOwned>(text: &str, what: &str) -> Result<T> {
    if text.is_empty() {
        return Err(OpenlockError::Decode {
            reason: format!("empty {what}"),
        });
    }
    let bytes = decode_base64(text, what)?;
    if bytes.is_empty() {
        return Err(OpenlockError::Decode {
            reason: format!("empty {what}"),
        });
    }
    serde_json::from_slice(&bytes).map_err(|err| OpenlockError::Decode {
        reason: format!("{what} is not valid JSON: {err}"),
    })
}
