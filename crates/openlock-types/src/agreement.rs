//! Exchange agreements — the transient, per-call description of who is
//! locking an asset and who may claim it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{OpenlockError, Result};

/// An asset-exchange agreement. Decoded from the wire per call, never
/// persisted as-is: the durable form is the [`crate::LockRecord`] the
/// lock engine writes from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeAgreement {
    pub asset_type: String,
    pub id: String,
    /// The identities locking the asset. Must equal the asset's
    /// co-owner set exactly for a lock to go through.
    pub lockers: Vec<String>,
    /// The identities that may claim, in order. Becomes the asset's
    /// co-owner list on a successful claim.
    pub recipients: Vec<String>,
}

impl ExchangeAgreement {
    /// Structural validation: an agreement must name the asset it
    /// covers.
    ///
    /// # Errors
    /// Returns [`OpenlockError::InvalidAgreement`] on an empty asset
    /// type or id.
    pub fn validate(&self) -> Result<()> {
        if self.asset_type.is_empty() {
            return Err(OpenlockError::InvalidAgreement {
                reason: "asset type must not be empty".to_string(),
            });
        }
        if self.id.is_empty() {
            return Err(OpenlockError::InvalidAgreement {
                reason: "asset id must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Exact identity-set equality: size-equal and mutually contained.
///
/// This is logical set equality over whole identity strings, not
/// substring containment — `"alice"` is not a member of a set holding
/// `"alice-and-co"`.
#[must_use]
pub fn same_identity_set(a: &[String], b: &[String]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agreement() -> ExchangeAgreement {
        ExchangeAgreement {
            asset_type: "bond".to_string(),
            id: "b01".to_string(),
            lockers: vec!["alice-cert".to_string()],
            recipients: vec!["alice-cert".to_string(), "bob-cert".to_string()],
        }
    }

    #[test]
    fn validate_accepts_well_formed() {
        assert!(agreement().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_type_and_id() {
        let mut a = agreement();
        a.asset_type = String::new();
        assert!(matches!(
            a.validate().unwrap_err(),
            OpenlockError::InvalidAgreement { .. }
        ));

        let mut a = agreement();
        a.id = String::new();
        assert!(matches!(
            a.validate().unwrap_err(),
            OpenlockError::InvalidAgreement { .. }
        ));
    }

    #[test]
    fn set_equality_ignores_order() {
        let a = vec!["x".to_string(), "y".to_string()];
        let b = vec!["y".to_string(), "x".to_string()];
        assert!(same_identity_set(&a, &b));
    }

    #[test]
    fn set_equality_checks_both_directions() {
        let owners = vec!["x".to_string(), "y".to_string()];
        let subset = vec!["x".to_string()];
        let superset = vec!["x".to_string(), "y".to_string(), "z".to_string()];
        assert!(!same_identity_set(&owners, &subset));
        assert!(!same_identity_set(&owners, &superset));
        assert!(!same_identity_set(&subset, &owners));
    }

    #[test]
    fn set_equality_is_not_substring_containment() {
        // A shorter identity whose encoded form is a prefix of another
        // must not be treated as the same member.
        let a = vec!["alice".to_string()];
        let b = vec!["alice-and-co".to_string()];
        assert!(!same_identity_set(&a, &b));
    }

    #[test]
    fn serde_roundtrip() {
        let a = agreement();
        let json = serde_json::to_string(&a).unwrap();
        let back: ExchangeAgreement = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }
}
