//! Raw sequence attributes

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Descriptive attributes of one sequence record before vocabulary resolution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRawAttributes {
    pub seq_type: Option<String>,
    pub quality: Option<String>,
    pub status: Option<String>,
    pub provider: Option<String>,
    pub length: Option<u64>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub division: Option<String>,
    pub is_virtual: bool,
    /// Organism text exactly as the record lists it
    pub raw_organisms: Option<String>,
    /// Organisms the record lists, classified or not
    pub organism_count: usize,
    /// Organisms on the record that are not mouse, human or rat
    pub other_organism_count: usize,
    #[serde(skip_serializing)]
    pub record: Option<String>,
    /// Last sequence update
    pub seq_date: Option<NaiveDate>,
    /// Later of the sequence and annotation updates
    pub seq_record_date: Option<NaiveDate>,
}

impl SequenceRawAttributes {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
