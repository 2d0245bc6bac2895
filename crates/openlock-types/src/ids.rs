//! Contract identifiers for OpenLock lock instances.
//!
//! A `ContractId` is the opaque handle returned by a successful lock and
//! accepted by the claim/unlock engines in place of the original
//! agreement. It is a hex-encoded SHA-256 over a domain tag, the
//! agreement coordinates, and a UUIDv7 salt — collision-resistant and
//! unique per lock instance.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Opaque handle for one specific lock instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ContractId(pub String);

impl ContractId {
    /// Derive a fresh contract id for a lock on `(asset_type, id)` by the
    /// given locker set.
    ///
    /// Format: `hex(SHA-256("openlock:contract:v1:" || asset_type || id
    /// || lockers || uuid_v7))`. The UUIDv7 salt makes repeated locks on
    /// the same asset produce distinct ids.
    #[must_use]
    pub fn derive(asset_type: &str, id: &str, lockers: &[String]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"openlock:contract:v1:");
        hasher.update(asset_type.as_bytes());
        hasher.update([0u8]);
        hasher.update(id.as_bytes());
        for locker in lockers {
            hasher.update([0u8]);
            hasher.update(locker.as_bytes());
        }
        hasher.update(Uuid::now_v7().as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// The full hex-encoded id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A short prefix for log lines.
    #[must_use]
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(8)]
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ContractId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}
