//! Key lookups
//!
//! Every lookup maps an external term (a logical database name, a PubMed id,
//! a vocabulary term) to an MGD key. Caches are filled once before the first
//! record and are read-only for the rest of the run.

mod file;

#[cfg(feature = "database")]
mod database;

use std::collections::HashMap;

use crate::error::KeyNotFound;

pub use file::{read_lookup_file, LOOKUP_FILES};

#[cfg(feature = "database")]
pub use database::load_from_database;

/// Internal MGD key
pub type Key = i64;

/// Term-to-key resolution against MGD
pub trait KeyLookup {
    fn name(&self) -> &str;

    fn lookup(&self, term: &str) -> Result<Key, KeyNotFound>;
}

/// A lookup whose whole table is held in memory
#[derive(Debug, Clone, Default)]
pub struct FullCachedLookup {
    name: String,
    keys: HashMap<String, Key>,
}

impl FullCachedLookup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: HashMap::new(),
        }
    }

    pub fn with_entries<I, S>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Key)>,
        S: Into<String>,
    {
        let mut lookup = Self::new(name);
        lookup.extend(entries);
        lookup
    }

    pub fn insert(&mut self, term: impl Into<String>, key: Key) {
        self.keys.insert(normalize(&term.into()), key);
    }

    pub fn extend<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (S, Key)>,
        S: Into<String>,
    {
        for (term, key) in entries {
            self.insert(term, key);
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeyLookup for FullCachedLookup {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, term: &str) -> Result<Key, KeyNotFound> {
        self.keys
            .get(&normalize(term))
            .copied()
            .ok_or_else(|| KeyNotFound::new(&self.name, term))
    }
}

/// Terms match case-insensitively, ignoring surrounding whitespace
fn normalize(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Every lookup a load run needs
#[derive(Debug, Clone)]
pub struct LookupSet {
    pub logical_db: FullCachedLookup,
    pub pubmed: FullCachedLookup,
    pub medline: FullCachedLookup,
    pub jnumber: FullCachedLookup,
    pub seq_type: FullCachedLookup,
    pub seq_quality: FullCachedLookup,
    pub seq_status: FullCachedLookup,
    pub seq_provider: FullCachedLookup,
}

impl Default for LookupSet {
    fn default() -> Self {
        Self {
            logical_db: FullCachedLookup::new("logical_db"),
            pubmed: FullCachedLookup::new("pubmed"),
            medline: FullCachedLookup::new("medline"),
            jnumber: FullCachedLookup::new("jnumber"),
            seq_type: FullCachedLookup::new("seq_type"),
            seq_quality: FullCachedLookup::new("seq_quality"),
            seq_status: FullCachedLookup::new("seq_status"),
            seq_provider: FullCachedLookup::new("seq_provider"),
        }
    }
}

impl LookupSet {
    /// Lookups in the order their files are read
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut FullCachedLookup> {
        [
            &mut self.logical_db,
            &mut self.pubmed,
            &mut self.medline,
            &mut self.jnumber,
            &mut self.seq_type,
            &mut self.seq_quality,
            &mut self.seq_status,
            &mut self.seq_provider,
        ]
        .into_iter()
    }

    pub fn total_entries(&self) -> usize {
        [
            &self.logical_db,
            &self.pubmed,
            &self.medline,
            &self.jnumber,
            &self.seq_type,
            &self.seq_quality,
            &self.seq_status,
            &self.seq_provider,
        ]
        .iter()
        .map(|lookup| lookup.len())
        .sum()
    }
}
