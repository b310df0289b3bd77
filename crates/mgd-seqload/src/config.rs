//! Run configuration
//!
//! Values that are constant for a whole load: provider, logical database,
//! vocabulary defaults, the load reference, and which organisms are kept.
//! They are read once from the environment (after `.env`, via `dotenvy`) and
//! handed to every interpreter by reference.

use chrono::NaiveDate;
use mgd_common::{MgdError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::decider::Organism;

// ============================================================================
// Sequence Load Defaults
// ============================================================================

/// Default sequence status.
pub const DEFAULT_SEQ_STATUS: &str = "ACTIVE";

/// Default sequence type when the record does not state one.
pub const DEFAULT_SEQ_TYPE: &str = "Not Loaded";

/// Default sequence quality.
pub const DEFAULT_SEQ_QUALITY: &str = "Not Specified";

/// Default reference association type.
pub const DEFAULT_REF_ASSOC_TYPE: &str = "Provider";

/// Default MGI type of loaded sequences.
pub const DEFAULT_SEQ_MGI_TYPE: &str = "Sequence";

/// Default created/modified-by login.
pub const DEFAULT_CREATED_BY: &str = "seqload";

/// Default value for every unspecified molecular source attribute.
pub const NOT_SPECIFIED: &str = "Not Specified";

/// Organisms loaded when `SEQ_ORGANISMS` is unset.
pub const DEFAULT_ORGANISMS: &str = "mouse";

/// First sequence key handed out when `SEQ_START_KEY` is unset.
pub const DEFAULT_START_KEY: i64 = 1;

// ============================================================================
// Coordinate Load Defaults
// ============================================================================

/// Default coordinate map type.
pub const DEFAULT_COORD_MAP_TYPE: &str = "Assembly";

/// Default coordinate units.
pub const DEFAULT_COORD_UNITS: &str = "base pair";

/// Default MGI type of the object a map is drawn on.
pub const DEFAULT_COORD_MAP_MGI_TYPE: &str = "Chromosome";

/// Default MGI type of a located feature.
pub const DEFAULT_COORD_FEATURE_MGI_TYPE: &str = "Sequence";

/// Molecular source values used when a record does not supply its own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDefaults {
    pub organism: String,
    pub strain: String,
    pub tissue: String,
    pub age: String,
    pub gender: String,
    pub cell_line: String,
}

impl Default for SourceDefaults {
    fn default() -> Self {
        Self {
            organism: Organism::Mouse.mgi_name().to_string(),
            strain: NOT_SPECIFIED.to_string(),
            tissue: NOT_SPECIFIED.to_string(),
            age: NOT_SPECIFIED.to_string(),
            gender: NOT_SPECIFIED.to_string(),
            cell_line: NOT_SPECIFIED.to_string(),
        }
    }
}

/// Constants shared by every sequence interpreter in one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceLoadConfig {
    pub provider: String,
    pub logical_db: String,
    pub status: String,
    pub seq_type: String,
    pub quality: String,
    pub is_virtual: bool,
    /// Version comes from `release_version` instead of the record's ids
    pub version_from_config: bool,
    pub release_version: Option<String>,
    pub release_date: Option<NaiveDate>,
    /// Load reference associated with every sequence, e.g. `J:90438`
    pub jnumber: Option<String>,
    pub ref_assoc_type: String,
    pub mgi_type: String,
    pub created_by: String,
    pub source: SourceDefaults,
    pub organisms: Vec<Organism>,
    pub start_key: i64,
}

impl SequenceLoadConfig {
    /// Configuration with defaults for everything but the provider identity
    pub fn new(provider: impl Into<String>, logical_db: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            logical_db: logical_db.into(),
            status: DEFAULT_SEQ_STATUS.to_string(),
            seq_type: DEFAULT_SEQ_TYPE.to_string(),
            quality: DEFAULT_SEQ_QUALITY.to_string(),
            is_virtual: false,
            version_from_config: false,
            release_version: None,
            release_date: None,
            jnumber: None,
            ref_assoc_type: DEFAULT_REF_ASSOC_TYPE.to_string(),
            mgi_type: DEFAULT_SEQ_MGI_TYPE.to_string(),
            created_by: DEFAULT_CREATED_BY.to_string(),
            source: SourceDefaults::default(),
            organisms: vec![Organism::Mouse],
            start_key: DEFAULT_START_KEY,
        }
    }

    /// Load from `SEQ_*` environment variables
    ///
    /// `SEQ_PROVIDER` and `SEQ_LOGICALDB` are required; everything else has a
    /// default.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::new(required_var("SEQ_PROVIDER")?, required_var("SEQ_LOGICALDB")?);

        config.status = var_or("SEQ_STATUS", DEFAULT_SEQ_STATUS);
        config.seq_type = var_or("SEQ_TYPE", DEFAULT_SEQ_TYPE);
        config.quality = var_or("SEQ_QUALITY", DEFAULT_SEQ_QUALITY);
        config.is_virtual = parse_var("SEQ_VIRTUAL", false)?;
        config.version_from_config = parse_var("SEQ_VERSION_FROM_CONFIG", false)?;
        config.release_version = optional_var("SEQ_RELEASE_VERSION");
        config.release_date = optional_var("SEQ_RELEASE_DATE")
            .map(|value| parse_config_date("SEQ_RELEASE_DATE", &value))
            .transpose()?;
        config.jnumber = optional_var("SEQ_JNUMBER");
        config.ref_assoc_type = var_or("SEQ_REFASSOC_TYPE", DEFAULT_REF_ASSOC_TYPE);
        config.mgi_type = var_or("SEQ_MGITYPE", DEFAULT_SEQ_MGI_TYPE);
        config.created_by = var_or("SEQ_CREATEDBY", DEFAULT_CREATED_BY);
        config.start_key = parse_var("SEQ_START_KEY", DEFAULT_START_KEY)?;
        config.organisms = parse_organisms(&var_or("SEQ_ORGANISMS", DEFAULT_ORGANISMS))?;

        config.source = SourceDefaults {
            organism: var_or("MS_ORGANISM", Organism::Mouse.mgi_name()),
            strain: var_or("MS_STRAIN", NOT_SPECIFIED),
            tissue: var_or("MS_TISSUE", NOT_SPECIFIED),
            age: var_or("MS_AGE", NOT_SPECIFIED),
            gender: var_or("MS_GENDER", NOT_SPECIFIED),
            cell_line: var_or("MS_CELLLINE", NOT_SPECIFIED),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn with_jnumber(mut self, jnumber: impl Into<String>) -> Self {
        self.jnumber = Some(jnumber.into());
        self
    }

    pub fn with_organisms(mut self, organisms: &[Organism]) -> Self {
        self.organisms = organisms.to_vec();
        self
    }

    pub fn with_release(mut self, version: impl Into<String>, date: NaiveDate) -> Self {
        self.release_version = Some(version.into());
        self.release_date = Some(date);
        self
    }

    pub fn with_version_from_config(mut self, from_config: bool) -> Self {
        self.version_from_config = from_config;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("SEQ_PROVIDER", &self.provider),
            ("SEQ_LOGICALDB", &self.logical_db),
            ("SEQ_STATUS", &self.status),
            ("SEQ_TYPE", &self.seq_type),
            ("SEQ_QUALITY", &self.quality),
        ] {
            if value.trim().is_empty() {
                return Err(MgdError::config(format!("{} cannot be empty", name)));
            }
        }

        if self.organisms.is_empty() {
            return Err(MgdError::config("SEQ_ORGANISMS must name at least one organism"));
        }

        if let Some(ref jnumber) = self.jnumber {
            let jnumber_pattern =
                Regex::new(r"^J:\d+$").map_err(|e| MgdError::config(e.to_string()))?;
            if !jnumber_pattern.is_match(jnumber) {
                return Err(MgdError::config(format!(
                    "SEQ_JNUMBER '{}' is not a J-number",
                    jnumber
                )));
            }
        }

        if self.version_from_config && self.release_version.is_none() {
            return Err(MgdError::config(
                "SEQ_VERSION_FROM_CONFIG is set but SEQ_RELEASE_VERSION is missing",
            ));
        }

        Ok(())
    }
}

/// Constants shared by coordinate interpreters in one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinateLoadConfig {
    pub collection_name: String,
    pub version: Option<String>,
    pub map_type: String,
    pub units: String,
    pub map_mgi_type: String,
    pub feature_mgi_type: String,
    pub organism: String,
}

impl CoordinateLoadConfig {
    pub fn new(collection_name: impl Into<String>) -> Self {
        Self {
            collection_name: collection_name.into(),
            version: None,
            map_type: DEFAULT_COORD_MAP_TYPE.to_string(),
            units: DEFAULT_COORD_UNITS.to_string(),
            map_mgi_type: DEFAULT_COORD_MAP_MGI_TYPE.to_string(),
            feature_mgi_type: DEFAULT_COORD_FEATURE_MGI_TYPE.to_string(),
            organism: Organism::Mouse.mgi_name().to_string(),
        }
    }

    /// Load from `COORD_*` environment variables; `COORD_COLLECTION_NAME` is required
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::new(required_var("COORD_COLLECTION_NAME")?);
        config.version = optional_var("COORD_VERSION");
        config.map_type = var_or("COORD_TYPE", DEFAULT_COORD_MAP_TYPE);
        config.units = var_or("COORD_UNITS", DEFAULT_COORD_UNITS);
        config.map_mgi_type = var_or("COORD_MAP_MGITYPE", DEFAULT_COORD_MAP_MGI_TYPE);
        config.feature_mgi_type = var_or("COORD_FEATURE_MGITYPE", DEFAULT_COORD_FEATURE_MGI_TYPE);
        config.organism = var_or("COORD_ORGANISM", Organism::Mouse.mgi_name());

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.collection_name.trim().is_empty() {
            return Err(MgdError::config("COORD_COLLECTION_NAME cannot be empty"));
        }
        if self.units.trim().is_empty() {
            return Err(MgdError::config("COORD_UNITS cannot be empty"));
        }
        Ok(())
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required_var(name: &str) -> Result<String> {
    optional_var(name).ok_or_else(|| MgdError::config(format!("{} is not set", name)))
}

fn var_or(name: &str, default: &str) -> String {
    optional_var(name).unwrap_or_else(|| default.to_string())
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match optional_var(name) {
        Some(value) => value
            .parse()
            .map_err(|_| MgdError::config(format!("{} has an invalid value '{}'", name, value))),
        None => Ok(default),
    }
}

/// Organism list such as "mouse,rat"
pub fn parse_organisms(value: &str) -> Result<Vec<Organism>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| name.parse::<Organism>().map_err(MgdError::config))
        .collect()
}

/// Accepts ISO dates and the MM/DD/YYYY form MGI configuration files use
pub fn parse_config_date(name: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%m/%d/%Y"))
        .map_err(|_| MgdError::config(format!("{} has an invalid date '{}'", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_documented_defaults() {
        let config = SequenceLoadConfig::new("SWISS-PROT", "SWISS-PROT");
        assert_eq!(config.status, DEFAULT_SEQ_STATUS);
        assert_eq!(config.source.strain, NOT_SPECIFIED);
        assert_eq!(config.organisms, vec![Organism::Mouse]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_provider() {
        let config = SequenceLoadConfig::new("", "GenBank");
        assert!(matches!(config.validate(), Err(MgdError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_jnumber() {
        let config = SequenceLoadConfig::new("GenBank", "Sequence DB").with_jnumber("90438");
        assert!(config.validate().is_err());
        let config = SequenceLoadConfig::new("GenBank", "Sequence DB").with_jnumber("J:90438");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_release_version_when_versioned_by_config() {
        let config =
            SequenceLoadConfig::new("NCBI Gene Model", "NCBI Gene Model").with_version_from_config(true);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_no_organisms() {
        let config = SequenceLoadConfig::new("GenBank", "Sequence DB").with_organisms(&[]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_organisms() {
        assert_eq!(
            parse_organisms("mouse, rat,human").unwrap(),
            vec![Organism::Mouse, Organism::Rat, Organism::Human]
        );
        assert!(parse_organisms("mouse,yeast").is_err());
    }

    #[test]
    fn test_parse_config_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(parse_config_date("D", "2024-03-01").unwrap(), expected);
        assert_eq!(parse_config_date("D", "03/01/2024").unwrap(), expected);
        assert!(parse_config_date("D", "March 1").is_err());
    }

    #[test]
    fn test_coordinate_config_validate() {
        assert!(CoordinateLoadConfig::new("NCBI Gene Model").validate().is_ok());
        assert!(CoordinateLoadConfig::new(" ").validate().is_err());
    }
}
