//! HTLC lock and claim payloads, and the persisted lock record.
//!
//! Payloads are tagged by lock mechanism so that a future non-HTLC
//! mechanism extends the enum instead of being sniffed out of the
//! payload structure.
//!
//! ## Lock lifecycle (per asset)
//!
//! ```text
//!   ┌──────────┐   lock (checks pass)    ┌────────┐
//!   │ UNLOCKED ├────────────────────────▶│ LOCKED │
//!   └──────────┘                         └───┬────┘
//!         ▲       unlock (past expiry)       │ claim (preimage, unexpired,
//!         └──────────────────────────────────┤        authorized recipient)
//!                                            ▼
//!                                       ┌─────────┐
//!                                       │ CLAIMED │  (terminal)
//!                                       └─────────┘
//! ```

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const BASE64: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// How an HTLC expiry is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeSpec {
    /// `expiry_time_secs` is an absolute UNIX timestamp.
    Epoch,
    /// `expiry_time_secs` is a duration; the lock engine resolves it
    /// against the invocation clock when the record is written.
    Duration,
}

/// The hash commitment side of an HTLC: redeemable by revealing the
/// preimage of `hash_base64` before the expiry, reversible after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtlcCommitment {
    /// base64(SHA-256(preimage)).
    pub hash_base64: String,
    pub expiry_time_secs: u64,
    pub time_spec: TimeSpec,
}

impl HtlcCommitment {
    /// Resolve the expiry to an absolute UNIX timestamp.
    #[must_use]
    pub fn absolute_expiry(&self, now_secs: u64) -> u64 {
        match self.time_spec {
            TimeSpec::Epoch => self.expiry_time_secs,
            TimeSpec::Duration => now_secs.saturating_add(self.expiry_time_secs),
        }
    }

    /// Whether `preimage` hashes to this commitment.
    #[must_use]
    pub fn matches_preimage(&self, preimage: &[u8]) -> bool {
        sha256_base64(preimage) == self.hash_base64
    }
}

/// The claim side of an HTLC: the revealed preimage, base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtlcClaim {
    pub hash_preimage_base64: String,
}

/// A lock payload, tagged by mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mechanism", content = "payload")]
pub enum LockPayload {
    Htlc(HtlcCommitment),
}

/// A claim payload, tagged by mechanism. The tag must agree with the
/// mechanism that created the lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mechanism", content = "payload")]
pub enum ClaimPayload {
    Htlc(HtlcClaim),
}

/// The persisted lock record, keyed by asset. At most one active record
/// per asset at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRecord {
    pub lockers: Vec<String>,
    /// Claim-eligible identities, in order. Becomes the asset's
    /// co-owner list on claim.
    pub recipients: Vec<String>,
    pub commitment: HtlcCommitment,
    /// Absolute expiry, resolved at lock time.
    pub expiry_time_secs: u64,
}

impl LockRecord {
    /// Whether the reclaim window has opened.
    #[must_use]
    pub fn is_expired(&self, now_secs: u64) -> bool {
        now_secs > self.expiry_time_secs
    }

    /// Exact membership check against the recipient set.
    #[must_use]
    pub fn is_recipient(&self, identity: &str) -> bool {
        self.recipients.iter().any(|r| r == identity)
    }
}

/// base64(SHA-256(bytes)) — the encoding used for hash commitments.
#[must_use]
pub fn sha256_base64(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    BASE64.encode(hasher.finalize())
}
