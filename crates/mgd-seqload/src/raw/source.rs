//! Raw molecular source attributes

use serde::{Deserialize, Serialize};

/// Biological provenance of a sequence as stated by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MSRawAttributes {
    pub organism: Option<String>,
    pub strain: Option<String>,
    pub tissue: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub cell_line: Option<String>,
}

impl MSRawAttributes {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_restores_defaults() {
        let mut raw = MSRawAttributes {
            organism: Some("mouse, laboratory".to_string()),
            strain: Some("C57BL/6J".to_string()),
            tissue: Some("brain".to_string()),
            age: Some("adult".to_string()),
            gender: Some("Female".to_string()),
            cell_line: Some("NIH 3T3".to_string()),
        };
        raw.reset();
        assert_eq!(raw, MSRawAttributes::default());
    }
}
