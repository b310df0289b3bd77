use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::lookup::{Key, KeyLookup, LookupSet};
use crate::raw::RefAssocRawAttributes;

/// Which authority a reference id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefSource {
    PubMed,
    Medline,
    JNumber,
}

impl fmt::Display for RefSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefSource::PubMed => write!(f, "pubmed"),
            RefSource::Medline => write!(f, "medline"),
            RefSource::JNumber => write!(f, "jnumber"),
        }
    }
}

/// A reference association with the reference key resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceAssocState {
    /// Object the reference is associated with
    pub object_key: Key,
    pub refs_key: Key,
    pub ref_id: String,
    /// Authority the key was found through
    pub source: RefSource,
    pub ref_assoc_type: Option<String>,
    pub mgi_type: Option<String>,
}

pub struct RefAssocAttributeResolver<'a> {
    pubmed: &'a dyn KeyLookup,
    medline: &'a dyn KeyLookup,
    jnumber: &'a dyn KeyLookup,
}

impl<'a> RefAssocAttributeResolver<'a> {
    pub fn new(pubmed: &'a dyn KeyLookup, medline: &'a dyn KeyLookup, jnumber: &'a dyn KeyLookup) -> Self {
        Self {
            pubmed,
            medline,
            jnumber,
        }
    }

    pub fn from_lookups(lookups: &'a LookupSet) -> Self {
        Self::new(&lookups.pubmed, &lookups.medline, &lookups.jnumber)
    }

    /// Resolve `raw` through the `source` lookup as a reference of `object_key`
    ///
    /// Returns `None` when the id is not in MGI; that is an expected outcome,
    /// not an error.
    pub fn resolve(
        &self,
        raw: &RefAssocRawAttributes,
        source: RefSource,
        object_key: Key,
    ) -> Option<ReferenceAssocState> {
        let ref_id = raw.ref_id.as_deref()?.trim();
        let lookup = match source {
            RefSource::PubMed => self.pubmed,
            RefSource::Medline => self.medline,
            RefSource::JNumber => self.jnumber,
        };

        match lookup.lookup(ref_id) {
            Ok(refs_key) => Some(ReferenceAssocState {
                object_key,
                refs_key,
                ref_id: ref_id.to_string(),
                source,
                ref_assoc_type: raw.ref_assoc_type.clone(),
                mgi_type: raw.mgi_type.clone(),
            }),
            Err(e) => {
                debug!(%source, ref_id, "{}", e);
                None
            },
        }
    }
}
