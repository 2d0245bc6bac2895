//! # openlock-exchange
//!
//! **The HTLC protocol plane**: ownership rules, the lock / claim /
//! unlock engines, and the bidirectional contract-id lookup index.
//!
//! ## Control Flow
//!
//! ```text
//! lock(agreement, commitment)
//!     → ownership rules (set equality, maturity ≥ expiry)
//!     → LockRecord + both lookup halves in ONE batch  → ContractId
//!
//! claim(agreement | contractId, preimage)
//!     → preimage check → expiry check → recipient check
//!     → asset.co_owners := recipients, record + lookup halves
//!       removed in ONE batch
//!
//! unlock(agreement | contractId)             (only past expiry)
//!     → record + lookup halves removed in ONE batch
//! ```
//!
//! Every state-changing operation stages all of its writes into a
//! single [`WriteBatch`](openlock_ledger::WriteBatch) and issues exactly
//! one `apply` — the lookup-index halves can never be half-written.
//! "Current time" is read once per invocation so the validity check and
//! the write can never disagree about the clock.

pub mod claim;
pub mod lock;
pub mod lookup;
pub mod ownership;
pub mod unlock;

pub use claim::{claim_asset, claim_by_contract_id};
pub use lock::{is_locked, is_locked_by_contract_id, lock_asset};
pub use ownership::validate_lock;
pub use unlock::{unlock_asset, unlock_by_contract_id};

/// The invocation clock, read once per public operation.
pub(crate) fn unix_now_secs() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}
