use std::collections::BTreeMap;
use footprint::FootprintParameters;
use rust_decimal::Decimal;
use symbol::{Decoration, Orientation, PinKind, PinShape, PinTableRow, Row};
use thiserror::Error;

/// One device table row, keyed by column header.
///
/// Device tables carry the configurable field columns as well, so the row is kept as a map instead
/// of a fixed record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct DeviceRecord(pub BTreeMap<String, String>);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceRecordError {
    #[error("Missing field. field: '{field}'")]
    MissingField { field: String },

    #[error("Invalid unit. value: '{value}'")]
    InvalidUnit { value: String },
}

impl DeviceRecord {
    pub const REQUIRED_FIELDS: [&'static str; 2] = ["symbol", "name"];

    pub fn validate(&self) -> Result<(), DeviceRecordError> {
        for field in Self::REQUIRED_FIELDS {
            self.required(field)?;
        }
        Ok(())
    }

    fn required(&self, field: &str) -> Result<&str, DeviceRecordError> {
        self.get(field).ok_or_else(|| DeviceRecordError::MissingField { field: field.to_string() })
    }

    /// A trimmed, non-empty column value.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    pub fn name(&self) -> Result<&str, DeviceRecordError> {
        self.required("name")
    }

    pub fn symbol(&self) -> Result<&str, DeviceRecordError> {
        self.required("symbol")
    }

    /// Defaults to the common unit 0.
    pub fn unit(&self) -> Result<u32, DeviceRecordError> {
        match self.get("unit") {
            Some(value) => value.parse().map_err(|_| DeviceRecordError::InvalidUnit { value: value.to_string() }),
            None => Ok(0),
        }
    }

    pub fn section(&self) -> &str {
        self.get("section").unwrap_or_default()
    }

    pub fn row(&self) -> &Row {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PinTableRecord {
    pub name: String,
    pub number: String,
    #[serde(rename = "type")]
    pub kind: PinKind,
    #[serde(default)]
    pub shape: PinShape,
    pub direction: Orientation,
    #[serde(default)]
    pub decoration: Decoration,
    #[serde(default)]
    pub section: String,
}

impl PinTableRecord {
    pub fn build_pin_table_row(&self) -> PinTableRow {
        PinTableRow {
            name: self.name.clone(),
            number: self.number.clone(),
            kind: self.kind,
            shape: self.shape,
            direction: self.direction,
            decoration: self.decoration,
            section: self.section.clone(),
        }
    }
}

impl From<&PinTableRow> for PinTableRecord {
    fn from(row: &PinTableRow) -> Self {
        Self {
            name: row.name.clone(),
            number: row.number.clone(),
            kind: row.kind,
            shape: row.shape,
            direction: row.direction,
            decoration: row.decoration,
            section: row.section.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorOrientation {
    Left,
    Right,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ConnectorRecord {
    pub name: String,
    pub number: u32,
    pub orientation: ConnectorOrientation,
    #[serde(default)]
    pub decoration: Option<Decoration>,
}

// NOTE: serde flatten would let this embed `FootprintParameters` but csv does not support it with
//       typed fields, see https://github.com/BurntSushi/rust-csv/issues/344
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct FootprintRecord {
    pub generator: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: String,
    pub package_width: Decimal,
    pub package_height: Decimal,
    pub pad_width: Decimal,
    pub pad_height: Decimal,
}

impl FootprintRecord {
    pub fn build_parameters(&self) -> FootprintParameters {
        FootprintParameters {
            name: self.name.clone(),
            description: self.description.clone(),
            tags: self.tags.clone(),
            package_width: self.package_width,
            package_height: self.package_height,
            pad_width: self.pad_width,
            pad_height: self.pad_height,
        }
    }
}
