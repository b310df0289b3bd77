use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ResolveError;
use crate::lookup::{Key, KeyLookup, LookupSet};
use crate::raw::SequenceRawAttributes;

/// A sequence ready to be written, with vocabulary terms resolved to keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceState {
    pub seq_type_key: Key,
    pub quality_key: Key,
    pub status_key: Key,
    pub provider_key: Key,
    pub length: Option<u64>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub division: Option<String>,
    pub is_virtual: bool,
    pub raw_organisms: Option<String>,
    pub organism_count: usize,
    pub other_organism_count: usize,
    pub seq_date: Option<NaiveDate>,
    pub seq_record_date: Option<NaiveDate>,
}

pub struct SequenceAttributeResolver<'a> {
    seq_type: &'a dyn KeyLookup,
    quality: &'a dyn KeyLookup,
    status: &'a dyn KeyLookup,
    provider: &'a dyn KeyLookup,
}

impl<'a> SequenceAttributeResolver<'a> {
    pub fn from_lookups(lookups: &'a LookupSet) -> Self {
        Self {
            seq_type: &lookups.seq_type,
            quality: &lookups.seq_quality,
            status: &lookups.seq_status,
            provider: &lookups.seq_provider,
        }
    }

    pub fn resolve(&self, raw: &SequenceRawAttributes) -> Result<SequenceState, ResolveError> {
        Ok(SequenceState {
            seq_type_key: term_key(self.seq_type, raw.seq_type.as_deref(), "seq_type")?,
            quality_key: term_key(self.quality, raw.quality.as_deref(), "quality")?,
            status_key: term_key(self.status, raw.status.as_deref(), "status")?,
            provider_key: term_key(self.provider, raw.provider.as_deref(), "provider")?,
            length: raw.length,
            description: raw.description.clone(),
            version: raw.version.clone(),
            division: raw.division.clone(),
            is_virtual: raw.is_virtual,
            raw_organisms: raw.raw_organisms.clone(),
            organism_count: raw.organism_count,
            other_organism_count: raw.other_organism_count,
            seq_date: raw.seq_date,
            seq_record_date: raw.seq_record_date,
        })
    }
}

fn term_key(lookup: &dyn KeyLookup, term: Option<&str>, attribute: &'static str) -> Result<Key, ResolveError> {
    let term = term.ok_or(ResolveError::MissingAttribute(attribute))?;
    Ok(lookup.lookup(term)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookups() -> LookupSet {
        let mut lookups = LookupSet::default();
        lookups.seq_type.insert("RNA", 316346);
        lookups.seq_quality.insert("Not Specified", 316338);
        lookups.seq_status.insert("ACTIVE", 316342);
        lookups.seq_provider.insert("GenBank/EMBL/DDBJ", 316380);
        lookups
    }

    fn raw() -> SequenceRawAttributes {
        SequenceRawAttributes {
            seq_type: Some("RNA".to_string()),
            quality: Some("Not Specified".to_string()),
            status: Some("ACTIVE".to_string()),
            provider: Some("GenBank/EMBL/DDBJ".to_string()),
            length: Some(1234),
            ..SequenceRawAttributes::default()
        }
    }

    #[test]
    fn test_resolve_vocabulary() {
        let lookups = lookups();
        let state = SequenceAttributeResolver::from_lookups(&lookups)
            .resolve(&raw())
            .unwrap();
        assert_eq!(state.seq_type_key, 316346);
        assert_eq!(state.provider_key, 316380);
        assert_eq!(state.length, Some(1234));
    }

    #[test]
    fn test_unknown_term_fails() {
        let lookups = lookups();
        let mut raw = raw();
        raw.seq_type = Some("Polypeptide".to_string());
        let err = SequenceAttributeResolver::from_lookups(&lookups)
            .resolve(&raw)
            .unwrap_err();
        assert!(matches!(err, ResolveError::NotFound(ref e) if e.lookup == "seq_type"));
    }

    #[test]
    fn test_missing_term() {
        let lookups = lookups();
        let mut raw = raw();
        raw.status = None;
        let err = SequenceAttributeResolver::from_lookups(&lookups)
            .resolve(&raw)
            .unwrap_err();
        assert_eq!(err, ResolveError::MissingAttribute("status"));
    }
}
