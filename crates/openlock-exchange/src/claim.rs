//! The claim engine: preimage-gated ownership transfer.
//!
//! A claim settles in one batch: the asset's co-owner list becomes the
//! lock's recipient list, and the lock record plus both lookup-index
//! halves are removed. Any check failure aborts before anything is
//! staged.

use openlock_ledger::{IdentityProvider, LedgerStore, WriteBatch};
use openlock_types::{
    ClaimPayload, ContractId, LockRecord, OpenlockError, Result, keys, same_identity_set, wire,
};

use crate::{lock, lookup, unix_now_secs};

/// Claim a locked asset by revealing the preimage, entering by
/// agreement.
///
/// The presented agreement must match the stored record (locker and
/// recipient sets); the preimage must hash to the commitment; the lock
/// must be unexpired; and the caller must be one of the recipients.
///
/// # Errors
/// `LockNotFound`, `LockRejected` (agreement/record mismatch),
/// `PreimageMismatch`, `LockExpired`, `NotAuthorized`, or the
/// decode/storage errors of the payloads and ledger.
pub fn claim_asset<S: LedgerStore, I: IdentityProvider>(
    store: &mut S,
    identity: &I,
    agreement_b64: &str,
    claim_payload_b64: &str,
) -> Result<bool> {
    let agreement = wire::decode_agreement(agreement_b64)?;
    agreement.validate()?;

    let record = lock::load_record(store, &agreement.asset_type, &agreement.id)?.ok_or_else(
        || OpenlockError::LockNotFound {
            reference: format!("asset {} of type {}", agreement.id, agreement.asset_type),
        },
    )?;
    check_agreement_matches(&agreement.lockers, &agreement.recipients, &record)?;

    let contract_id = lookup::resolve_contract(store, &agreement.asset_type, &agreement.id)?;
    settle(
        store,
        identity,
        &agreement.asset_type,
        &agreement.id,
        &contract_id,
        &record,
        claim_payload_b64,
    )
}

/// Claim a locked asset by contract id.
///
/// # Errors
/// `ContractNotFound` when the id resolves to nothing; otherwise as
/// [`claim_asset`].
pub fn claim_by_contract_id<S: LedgerStore, I: IdentityProvider>(
    store: &mut S,
    identity: &I,
    contract_id: &str,
    claim_payload_b64: &str,
) -> Result<bool> {
    let (asset_type, id) = lookup::resolve_asset(store, contract_id)?;
    let record =
        lock::load_record(store, &asset_type, &id)?.ok_or_else(|| OpenlockError::LockNotFound {
            reference: format!("contract {contract_id}"),
        })?;
    settle(
        store,
        identity,
        &asset_type,
        &id,
        &ContractId::from(contract_id.to_string()),
        &record,
        claim_payload_b64,
    )
}

fn settle<S: LedgerStore, I: IdentityProvider>(
    store: &mut S,
    identity: &I,
    asset_type: &str,
    id: &str,
    contract_id: &ContractId,
    record: &LockRecord,
    claim_payload_b64: &str,
) -> Result<bool> {
    let ClaimPayload::Htlc(claim) = wire::decode_claim_payload(claim_payload_b64)?;
    let preimage = wire::decode_base64(&claim.hash_preimage_base64, "preimage")?;

    let now_secs = unix_now_secs();
    if !record.commitment.matches_preimage(&preimage) {
        return Err(OpenlockError::PreimageMismatch);
    }
    if record.is_expired(now_secs) {
        return Err(OpenlockError::LockExpired {
            expiry_time_secs: record.expiry_time_secs,
        });
    }

    let caller = identity.caller_identity()?;
    if !record.is_recipient(&caller) {
        return Err(OpenlockError::NotAuthorized {
            reason: format!(
                "transaction creator {caller} is not one of the recipient co-owners"
            ),
        });
    }

    // Title transfers to the recipient list, in its stored order.
    let mut asset = openlock_registry::get_asset(store, asset_type, id)?;
    asset.co_owners = record.recipients.clone();

    let mut batch = WriteBatch::new();
    batch.put(keys::asset_key(asset_type, id), serde_json::to_vec(&asset)?);
    batch.delete(keys::lock_key(asset_type, id));
    lookup::stage_delete_pair(&mut batch, asset_type, id, contract_id);
    store.apply(batch)?;

    tracing::info!(
        asset_type,
        id,
        contract = contract_id.short(),
        new_owners = asset.co_owners.len(),
        "Asset claimed"
    );
    Ok(true)
}

fn check_agreement_matches(
    lockers: &[String],
    recipients: &[String],
    record: &LockRecord,
) -> Result<()> {
    if !same_identity_set(lockers, &record.lockers)
        || !same_identity_set(recipients, &record.recipients)
    {
        return Err(OpenlockError::LockRejected {
            reason: "agreement does not match the active lock record".to_string(),
        });
    }
    Ok(())
}
