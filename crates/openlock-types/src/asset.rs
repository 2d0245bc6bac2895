//! The co-owned asset record and its canonical maturity-date format.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{OpenlockError, Result};

/// Canonical text format for maturity dates, shown verbatim in the
/// parse-failure message: `DD Mon YY HH:MM TZ`.
pub const MATURITY_DATE_FORMAT: &str = "02 Jan 06 15:04 MST";

/// strftime pattern for the date-time portion (the zone token is split
/// off before parsing; chrono cannot parse `%Z` abbreviations, so the
/// value is interpreted as UTC).
const MATURITY_STRPTIME: &str = "%d %b %y %H:%M";

/// A co-owned asset record. Keyed in the ledger by `(asset_type, id)`.
///
/// Created by the registry, mutated by the update operations and by a
/// successful claim (which replaces `co_owners` with the lock's
/// recipient set), and deleted explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedAsset {
    pub asset_type: String,
    pub id: String,
    /// The identities jointly holding current title. Locking requires
    /// their unanimous agreement.
    pub co_owners: Vec<String>,
    pub issuer: String,
    pub face_value: Decimal,
    pub maturity_date: DateTime<Utc>,
}

impl SharedAsset {
    /// Whether `identity` holds current title (exact membership).
    #[must_use]
    pub fn is_co_owner(&self, identity: &str) -> bool {
        self.co_owners.iter().any(|owner| owner == identity)
    }

    /// Maturity date as UNIX epoch seconds (clamped at zero for
    /// pre-epoch dates, which mature before any lock).
    #[must_use]
    pub fn maturity_epoch_secs(&self) -> u64 {
        u64::try_from(self.maturity_date.timestamp()).unwrap_or(0)
    }
}

/// Parse a maturity date in the canonical [`MATURITY_DATE_FORMAT`].
///
/// The trailing zone token is required but only the date-time portion
/// is interpreted (as UTC).
///
/// # Errors
/// Returns [`OpenlockError::InvalidAsset`] naming the canonical format
/// when the text does not parse.
pub fn parse_maturity_date(text: &str) -> Result<DateTime<Utc>> {
    let parsed = text
        .rsplit_once(' ')
        .filter(|(_, zone)| !zone.is_empty() && !zone.contains(':'))
        .and_then(|(stamp, _)| NaiveDateTime::parse_from_str(stamp, MATURITY_STRPTIME).ok());
    match parsed {
        Some(naive) => Ok(naive.and_utc()),
        None => Err(OpenlockError::InvalidAsset {
            reason: format!(
                "maturity date provided is not in correct format, \
                 please use this format: {MATURITY_DATE_FORMAT}"
            ),
        }),
    }
}
