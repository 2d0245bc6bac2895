//! The lock engine: creates HTLC locks and answers lock-state queries.

use openlock_ledger::{IdentityProvider, LedgerStore, WriteBatch};
use openlock_types::{ContractId, LockRecord, OpenlockError, Result, keys, wire};

use crate::{lookup, ownership, unix_now_secs};

/// Lock an asset under an HTLC commitment.
///
/// The agreement's locker set must equal the asset's co-owner set, the
/// caller must be one of the lockers, and the asset must carry no
/// active lock. On success the lock record and both lookup-index
/// halves are committed in one batch and the fresh [`ContractId`] is
/// returned.
///
/// # Errors
/// `Decode` / `InvalidAgreement` on a bad payload, `NotAuthorized` when
/// the caller is not a locker, `LockRejected` / `AssetNotFound` from
/// the ownership rules, `AlreadyLocked` when a record already exists.
pub fn lock_asset<S: LedgerStore, I: IdentityProvider>(
    store: &mut S,
    identity: &I,
    agreement_b64: &str,
    lock_payload_b64: &str,
) -> Result<ContractId> {
    let agreement = wire::decode_agreement(agreement_b64)?;
    agreement.validate()?;

    let caller = identity.caller_identity()?;
    if !agreement.lockers.iter().any(|locker| locker == &caller) {
        return Err(OpenlockError::NotAuthorized {
            reason: format!("caller is not one of the lockers of asset {}", agreement.id),
        });
    }

    let now_secs = unix_now_secs();
    let (commitment, expiry_time_secs) = ownership::validate_lock(
        store,
        identity,
        &agreement.asset_type,
        &agreement.id,
        &agreement.lockers,
        lock_payload_b64,
        now_secs,
    )?;

    let lock_key = keys::lock_key(&agreement.asset_type, &agreement.id);
    if store.get(&lock_key)?.is_some() {
        return Err(OpenlockError::AlreadyLocked {
            asset_type: agreement.asset_type.clone(),
            id: agreement.id.clone(),
        });
    }

    let contract_id = ContractId::derive(&agreement.asset_type, &agreement.id, &agreement.lockers);
    let record = LockRecord {
        lockers: agreement.lockers.clone(),
        recipients: agreement.recipients.clone(),
        commitment,
        expiry_time_secs,
    };

    let mut batch = WriteBatch::new();
    batch.put(lock_key, serde_json::to_vec(&record)?);
    lookup::stage_put(&mut batch, &agreement.asset_type, &agreement.id, &contract_id)?;
    store.apply(batch)?;

    tracing::info!(
        asset_type = %agreement.asset_type,
        id = %agreement.id,
        contract = contract_id.short(),
        expiry = expiry_time_secs,
        "Asset locked"
    );
    Ok(contract_id)
}

/// Whether the asset named by the agreement carries a live lock.
///
/// Pure query: a missing or already-expired record reports `false`.
///
/// # Errors
/// `AssetNotFound` only when the asset itself is absent.
pub fn is_locked<S: LedgerStore>(store: &S, agreement_b64: &str) -> Result<bool> {
    let agreement = wire::decode_agreement(agreement_b64)?;
    agreement.validate()?;
    live_lock(store, &agreement.asset_type, &agreement.id)
}

/// [`is_locked`] entered by contract id instead of agreement.
///
/// An unknown contract id reports `false`; a dangling index entry whose
/// asset is gone surfaces `AssetNotFound`.
pub fn is_locked_by_contract_id<S: LedgerStore>(store: &S, contract_id: &str) -> Result<bool> {
    match lookup::resolve_asset(store, contract_id) {
        Ok((asset_type, id)) => live_lock(store, &asset_type, &id),
        Err(OpenlockError::ContractNotFound { .. }) => Ok(false),
        Err(err) => Err(err),
    }
}

fn live_lock<S: LedgerStore>(store: &S, asset_type: &str, id: &str) -> Result<bool> {
    openlock_registry::get_asset(store, asset_type, id)?;
    let now_secs = unix_now_secs();
    Ok(load_record(store, asset_type, id)?
        .is_some_and(|record| !record.is_expired(now_secs)))
}

/// Fetch the active lock record for an asset, if any.
pub(crate) fn load_record<S: LedgerStore>(
    store: &S,
    asset_type: &str,
    id: &str,
) -> Result<Option<LockRecord>> {
    match store.get(&keys::lock_key(asset_type, id))? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{ALICE, BOB, agreement_b64, htlc_lock_b64, seeded_store};
    use openlock_ledger::StaticIdentity;
    use openlock_types::TimeSpec;

    fn lock_by_alice(store: &mut openlock_ledger::MemoryLedger) -> ContractId {
        let agreement = agreement_b64(&[ALICE], &[ALICE, BOB]);
        let payload = htlc_lock_b64(b"abcd", 300, TimeSpec::Duration);
        lock_asset(store, &StaticIdentity::new(ALICE), &agreement, &payload).unwrap()
    }

    #[test]
    fn lock_returns_a_contract_id_and_indexes_it() {
        let mut store = seeded_store();
        let contract_id = lock_by_alice(&mut store);

        assert!(!contract_id.as_str().is_empty());
        let (ty, id) = lookup::resolve_asset(&store, contract_id.as_str()).unwrap();
        assert_eq!((ty.as_str(), id.as_str()), ("bond", "b01"));
        assert_eq!(
            lookup::resolve_contract(&store, "bond", "b01").unwrap(),
            contract_id
        );

        let record = load_record(&store, "bond", "b01").unwrap().unwrap();
        assert_eq!(record.lockers, vec![ALICE.to_string()]);
        assert_eq!(record.recipients, vec![ALICE.to_string(), BOB.to_string()]);
        assert!(record.commitment.matches_preimage(b"abcd"));
    }

    #[test]
    fn duration_lock_resolves_to_an_absolute_expiry() {
        let mut store = seeded_store();
        let before = crate::unix_now_secs();
        lock_by_alice(&mut store);
        let after = crate::unix_now_secs();

        let record = load_record(&store, "bond", "b01").unwrap().unwrap();
        assert!(record.expiry_time_secs >= before + 300);
        assert!(record.expiry_time_secs <= after + 300);
    }

    #[test]
    fn double_lock_is_rejected() {
        let mut store = seeded_store();
        lock_by_alice(&mut store);

        let agreement = agreement_b64(&[ALICE], &[BOB]);
        let payload = htlc_lock_b64(b"efgh", 300, TimeSpec::Duration);
        let err =
            lock_asset(&mut store, &StaticIdentity::new(ALICE), &agreement, &payload).unwrap_err();
        assert!(matches!(err, OpenlockError::AlreadyLocked { .. }));
    }

    #[test]
    fn lock_by_a_non_locker_caller_is_rejected() {
        let mut store = seeded_store();
        let agreement = agreement_b64(&[ALICE], &[BOB]);
        let payload = htlc_lock_b64(b"abcd", 300, TimeSpec::Duration);

        let err =
            lock_asset(&mut store, &StaticIdentity::new(BOB), &agreement, &payload).unwrap_err();
        assert!(matches!(err, OpenlockError::NotAuthorized { .. }));
        assert!(load_record(&store, "bond", "b01").unwrap().is_none());
    }

    #[test]
    fn lock_with_mismatched_locker_set_is_rejected() {
        let mut store = seeded_store();
        let agreement = agreement_b64(&[ALICE, BOB], &[BOB]);
        let payload = htlc_lock_b64(b"abcd", 300, TimeSpec::Duration);

        let err =
            lock_asset(&mut store, &StaticIdentity::new(ALICE), &agreement, &payload).unwrap_err();
        assert!(matches!(err, OpenlockError::LockRejected { .. }));
    }

    #[test]
    fn lock_past_maturity_is_rejected() {
        let mut store = seeded_store();
        let agreement = agreement_b64(&[ALICE], &[BOB]);
        // 48h lock on a 24h-maturity asset.
        let payload = htlc_lock_b64(b"abcd", 48 * 3600, TimeSpec::Duration);

        let err =
            lock_asset(&mut store, &StaticIdentity::new(ALICE), &agreement, &payload).unwrap_err();
        assert!(matches!(err, OpenlockError::LockRejected { .. }));
    }

    #[test]
    fn lock_rejects_blank_agreement() {
        let mut store = seeded_store();
        let blank = openlock_types::wire::encode_agreement(&openlock_types::ExchangeAgreement {
            asset_type: String::new(),
            id: "b01".to_string(),
            lockers: vec![ALICE.to_string()],
            recipients: vec![BOB.to_string()],
        })
        .unwrap();
        let payload = htlc_lock_b64(b"abcd", 300, TimeSpec::Duration);

        let err =
            lock_asset(&mut store, &StaticIdentity::new(ALICE), &blank, &payload).unwrap_err();
        assert!(matches!(err, OpenlockError::InvalidAgreement { .. }));
    }

    #[test]
    fn is_locked_reflects_lock_state() {
        let mut store = seeded_store();
        let agreement = agreement_b64(&[ALICE], &[ALICE, BOB]);
        assert!(!is_locked(&store, &agreement).unwrap());

        let contract_id = lock_by_alice(&mut store);
        assert!(is_locked(&store, &agreement).unwrap());
        assert!(is_locked_by_contract_id(&store, contract_id.as_str()).unwrap());
    }

    #[test]
    fn is_locked_missing_asset_is_an_error() {
        let store = openlock_ledger::MemoryLedger::new();
        let agreement = agreement_b64(&[ALICE], &[BOB]);
        let err = is_locked(&store, &agreement).unwrap_err();
        assert!(matches!(err, OpenlockError::AssetNotFound { .. }));
    }

    #[test]
    fn is_locked_unknown_contract_id_is_false() {
        let store = seeded_store();
        assert!(!is_locked_by_contract_id(&store, "deadbeef").unwrap());
    }

    #[test]
    fn expired_record_reports_unlocked() {
        let mut store = seeded_store();
        let agreement = agreement_b64(&[ALICE], &[BOB]);
        // Epoch expiry already in the past; maturity (future) still
        // clears the ownership rule.
        let payload = htlc_lock_b64(b"abcd", 1_000, TimeSpec::Epoch);
        lock_asset(&mut store, &StaticIdentity::new(ALICE), &agreement, &payload).unwrap();

        assert!(!is_locked(&store, &agreement).unwrap());
        assert!(load_record(&store, "bond", "b01").unwrap().is_some());
    }
}
