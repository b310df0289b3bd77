//! Raw reference association attributes

use serde::{Deserialize, Serialize};

/// A reference id to associate with an object
///
/// Whether `ref_id` is a PubMed id, a MEDLINE id or a J-number depends on
/// where it came from; resolvers are told which.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefAssocRawAttributes {
    pub ref_id: Option<String>,
    pub ref_assoc_type: Option<String>,
    pub mgi_type: Option<String>,
}

impl RefAssocRawAttributes {
    pub fn new(ref_id: impl Into<String>) -> Self {
        Self {
            ref_id: Some(ref_id.into()),
            ..Self::default()
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_restores_defaults() {
        let mut raw = RefAssocRawAttributes {
            ref_id: Some("1734233".to_string()),
            ref_assoc_type: Some("Provider".to_string()),
            mgi_type: Some("Sequence".to_string()),
        };
        raw.reset();
        assert_eq!(raw, RefAssocRawAttributes::default());
    }
}
