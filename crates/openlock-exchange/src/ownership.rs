//! Asset-specific ownership rules for locking.
//!
//! A co-owned asset locks only with the unanimous agreement of its
//! current title holders, and only if it will not mature while the
//! lock could still be reclaimed. Purely advisory — no mutation.

use openlock_ledger::{IdentityProvider, LedgerStore};
use openlock_types::{
    HtlcCommitment, LockPayload, OpenlockError, Result, same_identity_set, wire,
};

/// Validate a lock request against the asset it names.
///
/// Checks, in order:
/// 1. the lock payload decodes and carries a non-empty hash commitment;
/// 2. the asset exists and the caller holds title;
/// 3. `lockers` equals the asset's co-owner set exactly (both
///    directions, whole identities — not substring containment);
/// 4. the asset does not mature before the resolved expiry.
///
/// Returns the decoded commitment and its absolute expiry (resolved
/// against `now_secs` for duration-style commitments) for the lock
/// engine to persist.
///
/// # Errors
/// `Decode` on a malformed payload, `AssetNotFound` / `NotAuthorized`
/// from the asset read, `LockRejected` on any rule violation.
pub fn validate_lock<S: LedgerStore, I: IdentityProvider>(
    store: &S,
    identity: &I,
    asset_type: &str,
    id: &str,
    lockers: &[String],
    lock_payload_b64: &str,
    now_secs: u64,
) -> Result<(HtlcCommitment, u64)> {
    let LockPayload::Htlc(commitment) = wire::decode_lock_payload(lock_payload_b64)?;
    if commitment.hash_base64.is_empty() {
        return Err(OpenlockError::LockRejected {
            reason: "hash commitment must not be empty".to_string(),
        });
    }

    let asset = openlock_registry::read_asset(store, identity, asset_type, id, true)?;

    if !same_identity_set(lockers, &asset.co_owners) {
        return Err(OpenlockError::LockRejected {
            reason: "locker set does not include all the co-owners of the asset".to_string(),
        });
    }

    let expiry_time_secs = commitment.absolute_expiry(now_secs);
    if asset.maturity_epoch_secs() < expiry_time_secs {
        return Err(OpenlockError::LockRejected {
            reason: "asset will mature before the locking period ends".to_string(),
        });
    }

    Ok((commitment, expiry_time_secs))
}
