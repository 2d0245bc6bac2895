//! # openlock-registry
//!
//! The Asset Registry: create / read / update / delete and range-scan
//! listing of co-owned [`SharedAsset`](openlock_types::SharedAsset)
//! records over a [`LedgerStore`](openlock_ledger::LedgerStore).
//!
//! The registry owns no state of its own — every operation is one
//! read-modify-write against the store, authorized against the caller's
//! identity where current ownership matters.

pub mod registry;

pub use registry::{
    create_asset, delete_asset, get_asset, list_all, list_mine, read_asset, update_co_owners,
    update_face_value, update_maturity_date,
};
