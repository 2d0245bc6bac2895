//! # openlock-ledger
//!
//! Collaborator contracts the OpenLock core consumes, plus reference
//! implementations for tests and embedders:
//!
//! - [`LedgerStore`]: key-value get/put/delete, ordered lazy range
//!   scans, and an all-or-nothing [`WriteBatch`] commit boundary
//! - [`IdentityProvider`]: resolves the caller's opaque identity string
//! - [`MemoryLedger`]: BTreeMap-backed store with ordered scans
//! - [`StaticIdentity`]: fixed-identity provider
//!
//! The engine crates are generic over these traits; a durable backend
//! (or a chain runtime's state API) plugs in behind the same contract.

pub mod identity;
pub mod memory;
pub mod store;

pub use identity::{IdentityProvider, StaticIdentity};
pub use memory::MemoryLedger;
pub use store::{LedgerStore, WriteBatch, WriteOp};
