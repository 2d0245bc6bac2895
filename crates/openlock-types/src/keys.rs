//! Ledger key formatting.
//!
//! Every record class gets its own namespace prefix so asset records,
//! lock records, and the two lookup-index directions can never collide
//! in the shared key space. Assets scan as one contiguous range under
//! [`ASSET_PREFIX`].

/// Namespace for asset records.
pub const ASSET_PREFIX: &str = "asset:";
/// Namespace for lock records.
pub const LOCK_PREFIX: &str = "lock:";
/// Namespace for the contractId → asset direction of the lookup index.
pub const CONTRACT_ASSET_PREFIX: &str = "ctasset:";
/// Namespace for the asset → contractId direction of the lookup index.
pub const ASSET_CONTRACT_PREFIX: &str = "assetct:";

/// Key of an asset record.
#[must_use]
pub fn asset_key(asset_type: &str, id: &str) -> String {
    format!("{ASSET_PREFIX}{asset_type}:{id}")
}

/// Key of an asset's lock record.
#[must_use]
pub fn lock_key(asset_type: &str, id: &str) -> String {
    format!("{LOCK_PREFIX}{asset_type}:{id}")
}

/// Key of the contractId → asset lookup entry.
#[must_use]
pub fn contract_asset_key(contract_id: &str) -> String {
    format!("{CONTRACT_ASSET_PREFIX}{contract_id}")
}

/// Key of the asset → contractId lookup entry.
#[must_use]
pub fn asset_contract_key(asset_type: &str, id: &str) -> String {
    format!("{ASSET_CONTRACT_PREFIX}{asset_type}:{id}")
}
