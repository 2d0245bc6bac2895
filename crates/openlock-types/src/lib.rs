//! # openlock-types
//!
//! Shared types and errors for the **OpenLock** asset-locking engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`ContractId`]
//! - **Asset model**: [`SharedAsset`] and the canonical maturity-date format
//! - **Agreement model**: [`ExchangeAgreement`]
//! - **Lock model**: [`LockPayload`], [`ClaimPayload`], [`HtlcCommitment`],
//!   [`HtlcClaim`], [`TimeSpec`], [`LockRecord`]
//! - **Wire codec**: base64-framed JSON payload encoding in [`wire`]
//! - **Ledger keys**: namespaced key builders in [`keys`]
//! - **Errors**: [`OpenlockError`] with `OL_ERR_` prefix codes

pub mod agreement;
pub mod asset;
pub mod error;
pub mod ids;
pub mod keys;
pub mod lock;
pub mod wire;

// Re-export all primary types at crate root for ergonomic imports:
//   use openlock_types::{SharedAsset, ExchangeAgreement, LockRecord, ...};

pub use agreement::*;
pub use asset::*;
pub use error::*;
pub use ids::*;
pub use lock::*;

// Key builders are accessed via `openlock_types::keys::asset_key(..)` and
// the codec via `openlock_types::wire::decode_agreement(..)` (not
// re-exported to keep call sites self-describing).
