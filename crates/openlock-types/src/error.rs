//! Error types for the OpenLock asset-locking engine.
//!
//! All errors use the `OL_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Asset registry errors
//! - 2xx: Wire / codec errors
//! - 3xx: Lock errors
//! - 4xx: Claim errors
//! - 5xx: Unlock errors
//! - 6xx: Lookup index errors
//! - 8xx: Authorization errors
//! - 9xx: Storage / internal errors

use thiserror::Error;

/// Central error enum for all OpenLock operations.
#[derive(Debug, Error)]
pub enum OpenlockError {
    // =================================================================
    // Asset Registry Errors (1xx)
    // =================================================================
    /// The requested asset is not present in the ledger.
    #[error("OL_ERR_100: the asset {id} of type {asset_type} does not exist")]
    AssetNotFound { asset_type: String, id: String },

    /// Create was attempted for an asset key that is already present.
    #[error("OL_ERR_101: the asset {0} already exists")]
    AssetAlreadyExists(String),

    /// The asset failed business-rule validation (empty fields, bad or
    /// past maturity date).
    #[error("OL_ERR_102: invalid asset: {reason}")]
    InvalidAsset { reason: String },

    // =================================================================
    // Wire / Codec Errors (2xx)
    // =================================================================
    /// A wire payload could not be decoded (bad base64, bad JSON, or
    /// empty payload).
    #[error("OL_ERR_200: decode failed: {reason}")]
    Decode { reason: String },

    /// A decoded agreement failed structural validation.
    #[error("OL_ERR_201: invalid agreement: {reason}")]
    InvalidAgreement { reason: String },

    // =================================================================
    // Lock Errors (3xx)
    // =================================================================
    /// The asset already carries an active lock record.
    #[error("OL_ERR_300: asset {id} of type {asset_type} is already locked")]
    AlreadyLocked { asset_type: String, id: String },

    /// No active lock record for the given asset or contract reference.
    #[error("OL_ERR_301: no active lock for {reference}")]
    LockNotFound { reference: String },

    /// The lock request violated an ownership rule (locker set mismatch,
    /// maturity-vs-expiry conflict, empty hash commitment) or the
    /// presented agreement does not match the stored record.
    #[error("OL_ERR_302: lock rejected: {reason}")]
    LockRejected { reason: String },

    // =================================================================
    // Claim Errors (4xx)
    // =================================================================
    /// The revealed preimage does not hash to the stored commitment.
    #[error("OL_ERR_400: preimage does not match the hash commitment")]
    PreimageMismatch,

    /// The lock expired before the claim arrived.
    #[error("OL_ERR_401: lock expired at {expiry_time_secs}")]
    LockExpired { expiry_time_secs: u64 },

    // =================================================================
    // Unlock Errors (5xx)
    // =================================================================
    /// Unlock was attempted while the lock's expiry had not yet elapsed.
    #[error("OL_ERR_500: lock cannot be reversed before its expiry at {expiry_time_secs}")]
    LockNotExpired { expiry_time_secs: u64 },

    // =================================================================
    // Lookup Index Errors (6xx)
    // =================================================================
    /// The contract-id half of the lookup index has no entry.
    #[error("OL_ERR_600: no asset is associated with contract {contract_id}")]
    ContractNotFound { contract_id: String },

    /// The asset half of the lookup index has no entry.
    #[error("OL_ERR_601: no contract is associated with asset {id} of type {asset_type}")]
    AssetNotAssociated { asset_type: String, id: String },

    // =================================================================
    // Authorization Errors (8xx)
    // =================================================================
    /// The caller identity is not authorized for the operation.
    #[error("OL_ERR_800: not authorized: {reason}")]
    NotAuthorized { reason: String },

    // =================================================================
    // Storage / Internal (9xx)
    // =================================================================
    /// Ledger read/write failure, wrapped with operation context.
    #[error("OL_ERR_900: storage error: {reason}")]
    Storage { reason: String },

    /// Serialization / deserialization failure on a persisted record.
    #[error("OL_ERR_901: serialization error: {0}")]
    Serialization(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, OpenlockError>;

// Persisted records are JSON; a corrupt record surfaces as OL_ERR_901.
impl From<serde_json::Error> for OpenlockError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
