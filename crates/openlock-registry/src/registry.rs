//! Asset registry operations.
//!
//! Validation order on create follows the ledger-first discipline:
//! structural checks, existence check, then the maturity-date rules.
//! Update and delete are read-modify-write; all of them except
//! `update_co_owners` require the caller to currently hold title.

use chrono::{DateTime, Utc};
use openlock_ledger::{IdentityProvider, LedgerStore};
use openlock_types::{OpenlockError, Result, SharedAsset, keys, parse_maturity_date};
use rust_decimal::Decimal;

/// Create a new co-owned asset record.
///
/// # Errors
/// - `InvalidAsset` on an empty type, id, or co-owner set, on a
///   maturity date that does not parse against the canonical format,
///   or on a maturity date in the past
/// - `AssetAlreadyExists` if the key is already present
/// - `Storage` on ledger failure
pub fn create_asset<S: LedgerStore>(
    store: &mut S,
    asset_type: &str,
    id: &str,
    co_owners: Vec<String>,
    issuer: &str,
    face_value: Decimal,
    maturity_date: &str,
) -> Result<()> {
    if asset_type.is_empty() {
        return Err(OpenlockError::InvalidAsset {
            reason: "asset type must not be empty".to_string(),
        });
    }
    if id.is_empty() {
        return Err(OpenlockError::InvalidAsset {
            reason: "asset id must not be empty".to_string(),
        });
    }
    if co_owners.is_empty() {
        return Err(OpenlockError::InvalidAsset {
            reason: "co-owner set must not be empty".to_string(),
        });
    }

    let key = keys::asset_key(asset_type, id);
    if store.get(&key).map_err(read_context)?.is_some() {
        return Err(OpenlockError::AssetAlreadyExists(id.to_string()));
    }

    let maturity = parse_maturity_date(maturity_date)?;
    if maturity < Utc::now() {
        return Err(OpenlockError::InvalidAsset {
            reason: "maturity date can not be in past".to_string(),
        });
    }

    let asset = SharedAsset {
        asset_type: asset_type.to_string(),
        id: id.to_string(),
        co_owners,
        issuer: issuer.to_string(),
        face_value,
        maturity_date: maturity,
    };
    store.put(&key, serde_json::to_vec(&asset)?)?;

    tracing::info!(
        asset_type,
        id,
        owners = asset.co_owners.len(),
        "Asset created"
    );
    Ok(())
}

/// Fetch an asset without an authorization check.
///
/// # Errors
/// `AssetNotFound` if absent; `Storage` on ledger failure.
pub fn get_asset<S: LedgerStore>(store: &S, asset_type: &str, id: &str) -> Result<SharedAsset> {
    let key = keys::asset_key(asset_type, id);
    let bytes = store
        .get(&key)
        .map_err(read_context)?
        .ok_or_else(|| OpenlockError::AssetNotFound {
            asset_type: asset_type.to_string(),
            id: id.to_string(),
        })?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Read an asset, optionally requiring the caller to hold title.
///
/// # Errors
/// `AssetNotFound` if absent; when `authorize_caller` is set,
/// `NotAuthorized` unless the caller is one of the co-owners.
pub fn read_asset<S: LedgerStore, I: IdentityProvider>(
    store: &S,
    identity: &I,
    asset_type: &str,
    id: &str,
    authorize_caller: bool,
) -> Result<SharedAsset> {
    let asset = get_asset(store, asset_type, id)?;
    if authorize_caller {
        let caller = identity.caller_identity()?;
        if !asset.is_co_owner(&caller) {
            return Err(OpenlockError::NotAuthorized {
                reason: format!("caller is not a co-owner of asset {id}"),
            });
        }
    }
    Ok(asset)
}

/// Update the face value. The caller must currently hold title.
pub fn update_face_value<S: LedgerStore, I: IdentityProvider>(
    store: &mut S,
    identity: &I,
    asset_type: &str,
    id: &str,
    face_value: Decimal,
) -> Result<()> {
    let mut asset = read_asset(store, identity, asset_type, id, true)?;
    asset.face_value = face_value;
    write_asset(store, &asset)
}

/// Update the maturity date. The caller must currently hold title.
pub fn update_maturity_date<S: LedgerStore, I: IdentityProvider>(
    store: &mut S,
    identity: &I,
    asset_type: &str,
    id: &str,
    maturity_date: DateTime<Utc>,
) -> Result<()> {
    let mut asset = read_asset(store, identity, asset_type, id, true)?;
    asset.maturity_date = maturity_date;
    write_asset(store, &asset)
}

/// Replace the co-owner set.
///
/// Note: this operation performs no caller check — any caller may
/// rewrite ownership. The sibling updates do authorize; see DESIGN.md
/// for why the asymmetry is kept.
pub fn update_co_owners<S: LedgerStore>(
    store: &mut S,
    asset_type: &str,
    id: &str,
    co_owners: Vec<String>,
) -> Result<()> {
    if co_owners.is_empty() {
        return Err(OpenlockError::InvalidAsset {
            reason: "co-owner set must not be empty".to_string(),
        });
    }
    let mut asset = get_asset(store, asset_type, id)?;
    asset.co_owners = co_owners;
    write_asset(store, &asset)
}

/// Delete an asset record. The caller must currently hold title.
pub fn delete_asset<S: LedgerStore, I: IdentityProvider>(
    store: &mut S,
    identity: &I,
    asset_type: &str,
    id: &str,
) -> Result<()> {
    read_asset(store, identity, asset_type, id, true)?;
    store.delete(&keys::asset_key(asset_type, id))?;
    tracing::info!(asset_type, id, "Asset deleted");
    Ok(())
}

/// All asset records, in ledger scan order.
///
/// Built on the store's lazy scan; a mid-scan failure aborts and
/// surfaces the error with no partial result.
pub fn list_all<S: LedgerStore>(store: &S) -> Result<Vec<SharedAsset>> {
    let mut assets = Vec::new();
    for entry in store.range_scan(keys::ASSET_PREFIX) {
        let (_, bytes) = entry.map_err(read_context)?;
        assets.push(serde_json::from_slice(&bytes)?);
    }
    Ok(assets)
}

/// The subset of [`list_all`] where the caller holds title, in the same
/// scan order.
pub fn list_mine<S: LedgerStore, I: IdentityProvider>(
    store: &S,
    identity: &I,
) -> Result<Vec<SharedAsset>> {
    let caller = identity.caller_identity()?;
    Ok(list_all(store)?
        .into_iter()
        .filter(|asset| asset.is_co_owner(&caller))
        .collect())
}

fn write_asset<S: LedgerStore>(store: &mut S, asset: &SharedAsset) -> Result<()> {
    let key = keys::asset_key(&asset.asset_type, &asset.id);
    store.put(&key, serde_json::to_vec(asset)?)
}

// Storage failures on the read path carry the world-state context.
fn read_context(err: OpenlockError) -> OpenlockError {
    match err {
        OpenlockError::Storage { reason } => OpenlockError::Storage {
            reason: format!("failed to read asset record from world state: {reason}"),
        },
        other => other,
    }
}
