use serde::{Deserialize, Serialize};

use crate::error::ResolveError;
use crate::lookup::{Key, KeyLookup};
use crate::raw::AccessionRawAttributes;

/// An accession ready to be written, with its logical database resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessionState {
    /// Object the accession identifies; unset for accessions looked up on their own
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_key: Option<Key>,
    pub acc_id: String,
    pub prefix_part: String,
    pub numeric_part: Option<i64>,
    pub logical_db_key: Key,
    pub mgi_type: Option<String>,
    pub is_private: bool,
    pub is_preferred: bool,
    pub created_by: Option<String>,
}

pub struct AccAttributeResolver<'a> {
    logical_db: &'a dyn KeyLookup,
}

impl<'a> AccAttributeResolver<'a> {
    pub fn new(logical_db: &'a dyn KeyLookup) -> Self {
        Self { logical_db }
    }

    /// Resolve an accession of the object `object_key`
    pub fn resolve(&self, raw: &AccessionRawAttributes, object_key: Key) -> Result<AccessionState, ResolveError> {
        Ok(AccessionState {
            object_key: Some(object_key),
            ..self.resolve_unattached(raw)?
        })
    }

    /// Resolve the logical database name; an unknown name fails the record
    pub fn resolve_unattached(&self, raw: &AccessionRawAttributes) -> Result<AccessionState, ResolveError> {
        let acc_id = raw.acc_id().ok_or(ResolveError::MissingAttribute("acc_id"))?;
        let logical_db = raw
            .logical_db
            .as_deref()
            .ok_or(ResolveError::MissingAttribute("logical_db"))?;

        Ok(AccessionState {
            object_key: None,
            acc_id: acc_id.to_string(),
            prefix_part: raw.prefix_part().unwrap_or_default().to_string(),
            numeric_part: raw.numeric_part(),
            logical_db_key: self.logical_db.lookup(logical_db)?,
            mgi_type: raw.mgi_type.clone(),
            is_private: raw.is_private,
            is_preferred: raw.is_preferred,
            created_by: raw.created_by.clone(),
        })
    }
}
