//! Raw coordinate map and feature attributes

use serde::{Deserialize, Serialize};

/// A coordinate system, e.g. one chromosome of an assembly
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordMapRawAttributes {
    pub collection_name: Option<String>,
    pub version: Option<String>,
    pub map_type: Option<String>,
    pub units: Option<String>,
    /// Object the map is drawn on, e.g. chromosome "11"
    pub map_object: Option<String>,
    pub map_mgi_type: Option<String>,
    pub organism: Option<String>,
}

impl CoordMapRawAttributes {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// One located feature on a coordinate map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordMapFeatureRawAttributes {
    pub object_id: Option<String>,
    pub mgi_type: Option<String>,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub strand: Option<String>,
}

impl CoordMapFeatureRawAttributes {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
