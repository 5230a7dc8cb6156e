// ── Create-payload preparation ──
//
// Every create call takes a vector. `CreateMode` decides how strictly the
// vector is checked, and an optional external id list can stamp a customer
// onto each record. All of this runs before a request is built, so a bad
// payload never reaches the network.

use depot_api::{NewAddress, RecordId};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::CoreError;

/// How a create form was submitted.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CreateMode {
    /// Exactly one record.
    #[default]
    Single,
    /// One or more records.
    Bulk,
}

impl CreateMode {
    pub fn validate<T>(self, records: &[T]) -> Result<(), CoreError> {
        match (self, records.len()) {
            (_, 0) => Err(CoreError::validation("at least one record is required")),
            (Self::Single, 1) | (Self::Bulk, _) => Ok(()),
            (Self::Single, n) => Err(CoreError::validation(format!(
                "single mode takes exactly one record, got {n}"
            ))),
        }
    }
}

/// Records that belong to a customer.
pub trait CustomerOwned {
    fn set_customer_id(&mut self, id: RecordId);
}

impl CustomerOwned for NewAddress {
    fn set_customer_id(&mut self, id: RecordId) {
        self.customer_id = Some(id);
    }
}

/// Apply an external customer id list to `records`.
///
/// - empty list: records are left as they are
/// - one id: every record gets it
/// - one id per record: zipped by position
/// - anything else is rejected
pub fn assign_customer_ids<T: CustomerOwned>(
    records: &mut [T],
    customer_ids: &[RecordId],
) -> Result<(), CoreError> {
    match customer_ids {
        [] => Ok(()),
        [id] => {
            for record in records.iter_mut() {
                record.set_customer_id(id.clone());
            }
            Ok(())
        }
        ids if ids.len() == records.len() => {
            for (record, id) in records.iter_mut().zip(ids) {
                record.set_customer_id(id.clone());
            }
            Ok(())
        }
        ids => Err(CoreError::validation(format!(
            "got {} customer ids for {} records; pass one id or one per record",
            ids.len(),
            records.len()
        ))),
    }
}
