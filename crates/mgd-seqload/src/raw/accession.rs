//! Raw accession attributes

use serde::{Deserialize, Serialize};

/// Largest digit run kept in the numeric part; longer runs spill into the prefix
const MAX_NUMERIC_DIGITS: usize = 18;

/// One accession id as read from an input record
///
/// Assigning the id splits it into a prefix and a numeric part so that
/// `prefix_part + numeric_part` always reproduces the normalized id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessionRawAttributes {
    acc_id: Option<String>,
    prefix_part: Option<String>,
    numeric_part: Option<i64>,
    pub logical_db: Option<String>,
    pub mgi_type: Option<String>,
    pub is_private: bool,
    pub is_preferred: bool,
    pub created_by: Option<String>,
}

impl Default for AccessionRawAttributes {
    fn default() -> Self {
        Self {
            acc_id: None,
            prefix_part: None,
            numeric_part: None,
            logical_db: None,
            mgi_type: None,
            is_private: false,
            is_preferred: true,
            created_by: None,
        }
    }
}

impl AccessionRawAttributes {
    pub fn new(acc_id: &str) -> Self {
        let mut raw = Self::default();
        raw.set_acc_id(acc_id);
        raw
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Normalize and store `acc_id`, recomputing its prefix and numeric parts
    pub fn set_acc_id(&mut self, acc_id: &str) {
        let normalized = normalize_acc_id(acc_id);
        let (prefix, numeric) = split_acc_id(&normalized);
        self.prefix_part = Some(prefix);
        self.numeric_part = numeric;
        self.acc_id = Some(normalized);
    }

    pub fn acc_id(&self) -> Option<&str> {
        self.acc_id.as_deref()
    }

    pub fn prefix_part(&self) -> Option<&str> {
        self.prefix_part.as_deref()
    }

    pub fn numeric_part(&self) -> Option<i64> {
        self.numeric_part
    }
}

/// Trim whitespace and the `;` delimiter flat-file formats put after ids
pub fn normalize_acc_id(acc_id: &str) -> String {
    acc_id.trim().trim_end_matches(';').trim().to_string()
}

/// Split an accession id into `(prefix, numeric)`
///
/// The numeric part is the trailing digit run without its leading zeros, so
/// `"AB000123"` splits into `("AB000", Some(123))` and `"J:2"` into
/// `("J:", Some(2))`. Ids without trailing digits are all prefix.
pub fn split_acc_id(acc_id: &str) -> (String, Option<i64>) {
    let digits_start = acc_id
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i);

    let Some(start) = digits_start else {
        return (acc_id.to_string(), None);
    };

    let digits = &acc_id[start..];
    let window = &digits[digits.len().saturating_sub(MAX_NUMERIC_DIGITS)..];
    let significant = window.trim_start_matches('0');
    // An all-zero run keeps one "0" as the numeric part
    let significant = if significant.is_empty() {
        &window[window.len() - 1..]
    } else {
        significant
    };

    let split_at = acc_id.len() - significant.len();
    match significant.parse::<i64>() {
        Ok(numeric) => (acc_id[..split_at].to_string(), Some(numeric)),
        Err(_) => (acc_id.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rebuild(raw: &AccessionRawAttributes) -> String {
        let numeric = raw.numeric_part().map(|n| n.to_string()).unwrap_or_default();
        format!("{}{}", raw.prefix_part().unwrap_or_default(), numeric)
    }

    #[test]
    fn test_split_genbank_id() {
        let raw = AccessionRawAttributes::new("AB000123");
        assert_eq!(raw.prefix_part(), Some("AB000"));
        assert_eq!(raw.numeric_part(), Some(123));
    }

    #[test]
    fn test_split_jnumber() {
        let raw = AccessionRawAttributes::new("J:90438");
        assert_eq!(raw.prefix_part(), Some("J:"));
        assert_eq!(raw.numeric_part(), Some(90438));
    }

    #[test]
    fn test_split_all_zero_digits() {
        assert_eq!(split_acc_id("X000"), ("X00".to_string(), Some(0)));
    }

    #[test]
    fn test_split_no_digits() {
        assert_eq!(split_acc_id("ABC_DEF"), ("ABC_DEF".to_string(), None));
    }

    #[test]
    fn test_split_numeric_only() {
        assert_eq!(split_acc_id("240677"), (String::new(), Some(240677)));
    }

    #[test]
    fn test_set_acc_id_strips_delimiter() {
        let raw = AccessionRawAttributes::new("  P12345; ");
        assert_eq!(raw.acc_id(), Some("P12345"));
        assert_eq!(raw.prefix_part(), Some("P"));
        assert_eq!(raw.numeric_part(), Some(12345));
    }

    #[test]
    fn test_long_digit_run_fits_i64() {
        let raw = AccessionRawAttributes::new("SEQ12345678901234567890123");
        assert_eq!(rebuild(&raw), "SEQ12345678901234567890123");
        assert!(raw.numeric_part().is_some());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut raw = AccessionRawAttributes::new("AB000123");
        raw.logical_db = Some("Sequence DB".to_string());
        raw.mgi_type = Some("Sequence".to_string());
        raw.is_private = true;
        raw.is_preferred = false;
        raw.created_by = Some("seqload".to_string());

        raw.reset();

        assert_eq!(raw, AccessionRawAttributes::default());
        assert!(!raw.is_private);
        assert!(raw.is_preferred);
        assert_eq!(raw.acc_id(), None);
    }

    proptest! {
        #[test]
        fn prop_prefix_plus_numeric_rebuilds_id(id in "[A-Za-z_:.]{0,6}[0-9]{0,24}") {
            let raw = AccessionRawAttributes::new(&id);
            prop_assert_eq!(rebuild(&raw), normalize_acc_id(&id));
        }
    }
}
