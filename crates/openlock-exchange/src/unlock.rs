//! The unlock engine: expiry-gated reversal of a lock.
//!
//! Unlock is the locker side of the HTLC bargain: once the expiry has
//! elapsed unclaimed, the lock record and both lookup-index halves are
//! removed in one batch. The asset's co-owner list is untouched. The
//! expiry check is a local precondition of this engine, not an
//! assumption about the caller.

use openlock_ledger::{LedgerStore, WriteBatch};
use openlock_types::{
    ContractId, LockRecord, OpenlockError, Result, keys, same_identity_set, wire,
};

use crate::{lock, lookup, unix_now_secs};

/// Reverse an expired lock, entering by agreement.
///
/// # Errors
/// `LockNotFound` when no record exists, `LockRejected` when the
/// agreement does not match the stored record, `LockNotExpired` while
/// the claim window is still open.
pub fn unlock_asset<S: LedgerStore>(store: &mut S, agreement_b64: &str) -> Result<bool> {
    let agreement = wire::decode_agreement(agreement_b64)?;
    agreement.validate()?;

    let record = lock::load_record(store, &agreement.asset_type, &agreement.id)?.ok_or_else(
        || OpenlockError::LockNotFound {
            reference: format!("asset {} of type {}", agreement.id, agreement.asset_type),
        },
    )?;
    if !same_identity_set(&agreement.lockers, &record.lockers)
        || !same_identity_set(&agreement.recipients, &record.recipients)
    {
        return Err(OpenlockError::LockRejected {
            reason: "agreement does not match the active lock record".to_string(),
        });
    }

    let contract_id = lookup::resolve_contract(store, &agreement.asset_type, &agreement.id)?;
    reverse(
        store,
        &agreement.asset_type,
        &agreement.id,
        &contract_id,
        &record,
    )
}

/// Reverse an expired lock by contract id.
///
/// # Errors
/// `ContractNotFound` when the id resolves to nothing; otherwise as
/// [`unlock_asset`].
pub fn unlock_by_contract_id<S: LedgerStore>(store: &mut S, contract_id: &str) -> Result<bool> {
    let (asset_type, id) = lookup::resolve_asset(store, contract_id)?;
    let record =
        lock::load_record(store, &asset_type, &id)?.ok_or_else(|| OpenlockError::LockNotFound {
            reference: format!("contract {contract_id}"),
        })?;
    reverse(
        store,
        &asset_type,
        &id,
        &ContractId::from(contract_id.to_string()),
        &record,
    )
}

fn reverse<S: LedgerStore>(
    store: &mut S,
    asset_type: &str,
    id: &str,
    contract_id: &ContractId,
    record: &LockRecord,
) -> Result<bool> {
    let now_secs = unix_now_secs();
    if !record.is_expired(now_secs) {
        return Err(OpenlockError::LockNotExpired {
            expiry_time_secs: record.expiry_time_secs,
        });
    }

    let mut batch = WriteBatch::new();
    batch.delete(keys::lock_key(asset_type, id));
    lookup::stage_delete_pair(&mut batch, asset_type, id, contract_id);
    store.apply(batch)?;

    tracing::info!(
        asset_type,
        id,
        contract = contract_id.short(),
        "Lock reversed after expiry"
    );
    Ok(true)
}
