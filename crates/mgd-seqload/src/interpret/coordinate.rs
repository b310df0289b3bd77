//! Coordinate file interpreter
//!
//! Tab-delimited lines of at least `object  chromosome  start  end  strand`;
//! anything after the strand column is ignored.

use super::{is_comment_or_blank, Interpreter};
use crate::config::CoordinateLoadConfig;
use crate::error::FormatError;
use crate::input::CoordinateInput;
use crate::raw::{CoordMapFeatureRawAttributes, CoordMapRawAttributes};

const NAME: &str = "coordinate";

const MIN_COLUMNS: usize = 5;

pub struct CoordinateInterpreter {
    config: CoordinateLoadConfig,
}

impl CoordinateInterpreter {
    pub fn new(config: CoordinateLoadConfig) -> Self {
        Self { config }
    }
}

impl Interpreter for CoordinateInterpreter {
    type Output = CoordinateInput;

    fn name(&self) -> &'static str {
        NAME
    }

    fn is_valid(&self, record: &str) -> bool {
        !is_comment_or_blank(record)
    }

    fn interpret(&self, record: &str) -> Result<CoordinateInput, FormatError> {
        let columns: Vec<&str> = record
            .trim_end_matches(['\r', '\n'])
            .split('\t')
            .map(str::trim)
            .collect();
        if columns.len() < MIN_COLUMNS {
            return Err(FormatError::new(
                NAME,
                format!(
                    "expected at least {} tab-delimited columns, found {}",
                    MIN_COLUMNS,
                    columns.len()
                ),
                record,
            ));
        }

        let config = &self.config;
        let map = CoordMapRawAttributes {
            collection_name: Some(config.collection_name.clone()),
            version: config.version.clone(),
            map_type: Some(config.map_type.clone()),
            units: Some(config.units.clone()),
            map_object: Some(columns[1].to_string()),
            map_mgi_type: Some(config.map_mgi_type.clone()),
            organism: Some(config.organism.clone()),
        };

        let feature = CoordMapFeatureRawAttributes {
            object_id: Some(columns[0].to_string()),
            mgi_type: Some(config.feature_mgi_type.clone()),
            start: Some(parse_coordinate(columns[2], "start", record)?),
            end: Some(parse_coordinate(columns[3], "end", record)?),
            strand: match columns[4] {
                strand @ ("+" | "-") => Some(strand.to_string()),
                _ => None,
            },
        };

        Ok(CoordinateInput {
            collection_name: config.collection_name.clone(),
            map,
            feature,
        })
    }
}

fn parse_coordinate(value: &str, column: &str, record: &str) -> Result<f64, FormatError> {
    value
        .parse()
        .map_err(|_| FormatError::new(NAME, format!("invalid {} coordinate '{}'", column, value), record))
}
