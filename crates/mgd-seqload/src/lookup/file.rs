//! Lookup tables from tab-separated key files
//!
//! Each file holds `term<TAB>key` rows, one per term, with optional `#`
//! comment lines. The files are the text dumps MGD exports for offline runs.

use mgd_common::{MgdError, Result};
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

use super::{FullCachedLookup, Key, KeyLookup, LookupSet};

/// File names expected in a lookup directory, matching [`LookupSet::iter_mut`] order
pub const LOOKUP_FILES: [&str; 8] = [
    "logical_db.tsv",
    "pubmed.tsv",
    "medline.tsv",
    "jnumber.tsv",
    "seq_type.tsv",
    "seq_quality.tsv",
    "seq_status.tsv",
    "seq_provider.tsv",
];

impl LookupSet {
    /// Read every lookup from `dir`; a missing or malformed file fails the run
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut set = LookupSet::default();

        for (lookup, file_name) in set.iter_mut().zip(LOOKUP_FILES) {
            let loaded = read_lookup_file(dir.join(file_name), lookup.name())?;
            *lookup = loaded;
        }

        info!(
            dir = %dir.display(),
            entries = set.total_entries(),
            "Loaded lookup tables"
        );
        Ok(set)
    }
}

/// Read one `term<TAB>key` file into a cached lookup named `name`
pub fn read_lookup_file(path: impl AsRef<Path>, name: &str) -> Result<FullCachedLookup> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        MgdError::lookup_load(format!("cannot open {} lookup {}: {}", name, path.display(), e))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(file);

    let mut lookup = FullCachedLookup::new(name);
    for (line, row) in reader.records().enumerate() {
        let row = row.map_err(|e| {
            MgdError::lookup_load(format!("{} lookup {}: {}", name, path.display(), e))
        })?;

        let (Some(term), Some(key)) = (row.get(0), row.get(1)) else {
            return Err(MgdError::lookup_load(format!(
                "{} lookup {} row {}: expected term and key",
                name,
                path.display(),
                line + 1
            )));
        };
        let key: Key = key.trim().parse().map_err(|_| {
            MgdError::lookup_load(format!(
                "{} lookup {} row {}: invalid key '{}'",
                name,
                path.display(),
                line + 1,
                key
            ))
        })?;
        lookup.insert(term, key);
    }

    debug!(lookup = name, entries = lookup.len(), "Read lookup file");
    Ok(lookup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_all(dir: &Path) {
        for file_name in LOOKUP_FILES {
            fs::write(dir.join(file_name), "# term\tkey\n").unwrap();
        }
        fs::write(dir.join("logical_db.tsv"), "Sequence DB\t9\nSWISS-PROT\t13\n").unwrap();
        fs::write(dir.join("pubmed.tsv"), "9548713\t61000\n").unwrap();
    }

    #[test]
    fn test_from_dir() {
        let dir = TempDir::new().unwrap();
        write_all(dir.path());

        let set = LookupSet::from_dir(dir.path()).unwrap();
        assert_eq!(set.logical_db.lookup("SWISS-PROT"), Ok(13));
        assert_eq!(set.pubmed.lookup("9548713"), Ok(61000));
        assert!(set.medline.is_empty());
        assert_eq!(set.total_entries(), 3);
    }

    #[test]
    fn test_missing_file_is_lookup_error() {
        let dir = TempDir::new().unwrap();
        write_all(dir.path());
        fs::remove_file(dir.path().join("jnumber.tsv")).unwrap();

        let err = LookupSet::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, MgdError::LookupLoad(_)));
    }

    #[test]
    fn test_invalid_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seq_type.tsv");
        fs::write(&path, "DNA\tnot-a-key\n").unwrap();

        let err = read_lookup_file(&path, "seq_type").unwrap_err();
        assert!(err.to_string().contains("invalid key"));
    }

    #[test]
    fn test_row_without_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seq_type.tsv");
        fs::write(&path, "DNA\n").unwrap();

        assert!(read_lookup_file(&path, "seq_type").is_err());
    }
}
