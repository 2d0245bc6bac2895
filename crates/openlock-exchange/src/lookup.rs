//! Bidirectional contract-id lookup index.
//!
//! Two physical entries per lock — `ctasset:<contractId>` → asset
//! coordinates and `assetct:<type>:<id>` → contract id — treated as one
//! logical unit: every mutation here *stages* both halves into the
//! caller's [`WriteBatch`] so they commit (or vanish) together with the
//! rest of the invocation's writes.

use openlock_ledger::{LedgerStore, WriteBatch};
use openlock_types::{ContractId, OpenlockError, Result, keys};
use serde::{Deserialize, Serialize};

/// The contractId → asset direction, stored as JSON.
#[derive(Debug, Serialize, Deserialize)]
struct LookupEntry {
    asset_type: String,
    id: String,
}

/// Stage both halves of a new index pair.
pub fn stage_put(
    batch: &mut WriteBatch,
    asset_type: &str,
    id: &str,
    contract_id: &ContractId,
) -> Result<()> {
    let entry = LookupEntry {
        asset_type: asset_type.to_string(),
        id: id.to_string(),
    };
    batch.put(
        keys::contract_asset_key(contract_id.as_str()),
        serde_json::to_vec(&entry)?,
    );
    batch.put(
        keys::asset_contract_key(asset_type, id),
        contract_id.as_str().as_bytes().to_vec(),
    );
    Ok(())
}

/// Resolve a contract id to its asset coordinates.
///
/// # Errors
/// `ContractNotFound` if the forward half is absent.
pub fn resolve_asset<S: LedgerStore>(store: &S, contract_id: &str) -> Result<(String, String)> {
    let bytes = store
        .get(&keys::contract_asset_key(contract_id))?
        .ok_or_else(|| OpenlockError::ContractNotFound {
            contract_id: contract_id.to_string(),
        })?;
    let entry: LookupEntry = serde_json::from_slice(&bytes)?;
    Ok((entry.asset_type, entry.id))
}

/// Resolve an asset to its active contract id.
///
/// # Errors
/// `AssetNotAssociated` if the reverse half is absent.
pub fn resolve_contract<S: LedgerStore>(
    store: &S,
    asset_type: &str,
    id: &str,
) -> Result<ContractId> {
    let bytes = store
        .get(&keys::asset_contract_key(asset_type, id))?
        .ok_or_else(|| OpenlockError::AssetNotAssociated {
            asset_type: asset_type.to_string(),
            id: id.to_string(),
        })?;
    let raw = String::from_utf8(bytes)
        .map_err(|err| OpenlockError::Serialization(err.to_string()))?;
    Ok(ContractId::from(raw))
}

/// Stage deletion of both halves of a known pair.
pub fn stage_delete_pair(
    batch: &mut WriteBatch,
    asset_type: &str,
    id: &str,
    contract_id: &ContractId,
) {
    batch.delete(keys::contract_asset_key(contract_id.as_str()));
    batch.delete(keys::asset_contract_key(asset_type, id));
}

/// Resolve the contract id for an asset, then stage deletion of both
/// halves. Returns the resolved id.
pub fn delete_by_asset<S: LedgerStore>(
    store: &S,
    batch: &mut WriteBatch,
    asset_type: &str,
    id: &str,
) -> Result<ContractId> {
    let contract_id = resolve_contract(store, asset_type, id)?;
    stage_delete_pair(batch, asset_type, id, &contract_id);
    Ok(contract_id)
}

/// Resolve the asset for a contract id, then stage deletion of both
/// halves. Returns the resolved coordinates.
pub fn delete_by_contract_id<S: LedgerStore>(
    store: &S,
    batch: &mut WriteBatch,
    contract_id: &ContractId,
) -> Result<(String, String)> {
    let (asset_type, id) = resolve_asset(store, contract_id.as_str())?;
    stage_delete_pair(batch, &asset_type, &id, contract_id);
    Ok((asset_type, id))
}
