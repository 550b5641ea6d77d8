use std::fs;
use std::path::{Path, PathBuf};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;
use tracing::{info, Level};

pub const REFERENCE_FIELD: u32 = 0;
pub const VALUE_FIELD: u32 = 1;
pub const FOOTPRINT_FIELD: u32 = 2;
pub const DOCUMENT_FIELD: u32 = 3;

/// Fields F0..F3 have a fixed meaning in the library format, configurable fields start after them.
pub const FIRST_EXTRA_FIELD: u32 = 4;

pub const STANDARD_FIELDS: [(u32, &str); 4] = [
    (REFERENCE_FIELD, "Reference"),
    (VALUE_FIELD, "Value"),
    (FOOTPRINT_FIELD, "Footprint"),
    (DOCUMENT_FIELD, "Datasheet"),
];

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    pub symbol: SymbolConfig,
    pub footprint: FootprintConfig,
    pub fields: Vec<FieldConfig>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            symbol: SymbolConfig::default(),
            footprint: FootprintConfig::default(),
            fields: vec![
                FieldConfig::new(4, "Tolerance", "tolerance"),
                FieldConfig::new(5, "Power", "power"),
                FieldConfig::new(6, "Voltage", "voltage"),
            ],
        }
    }
}

/// Symbol dimensions, all in mils.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SymbolConfig {
    pub grid: i32,
    pub pin_length: i32,
    pub pin_name_size: i32,
    pub pin_number_size: i32,
    pub pin_text_offset: i32,
    /// text size of the value field, which shows the symbol name
    pub name_size: i32,
    pub text_size: i32,
    pub line_width: i32,
    /// distance between two adjacent pins on the same side
    pub pin_grid: i32,
    /// distance between a body corner and the first pin
    pub pin_margin: i32,
    /// horizontal room reserved between left and right pin names
    pub reference_space: i32,
    pub template_extension: String,
    pub table_extension: String,
}

impl Default for SymbolConfig {
    fn default() -> Self {
        Self {
            grid: 50,
            pin_length: 200,
            pin_name_size: 50,
            pin_number_size: 50,
            pin_text_offset: 40,
            name_size: 50,
            text_size: 50,
            line_width: 10,
            pin_grid: 100,
            pin_margin: 100,
            reference_space: 200,
            template_extension: ".lib".to_string(),
            table_extension: ".csv".to_string(),
        }
    }
}

/// Footprint dimensions, all in millimeters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FootprintConfig {
    pub reference_layer: String,
    pub reference_font_size: Decimal,
    pub reference_font_thickness: Decimal,
    pub value_layer: String,
    pub value_font_size: Decimal,
    pub value_font_thickness: Decimal,
    pub package_layer: String,
    pub package_line_width: Decimal,
    pub smd_layers: String,
    pub thd_layers: String,
    pub extension: String,
}

impl Default for FootprintConfig {
    fn default() -> Self {
        Self {
            reference_layer: "F.SilkS".to_string(),
            reference_font_size: dec!(1.0),
            reference_font_thickness: dec!(0.15),
            value_layer: "F.Fab".to_string(),
            value_font_size: dec!(1.0),
            value_font_thickness: dec!(0.15),
            package_layer: "F.SilkS".to_string(),
            package_line_width: dec!(0.15),
            smd_layers: "F.Cu F.Paste F.Mask".to_string(),
            thd_layers: "*.Cu *.Mask F.SilkS".to_string(),
            extension: ".kicad_mod".to_string(),
        }
    }
}

/// Maps a device table column onto a named symbol field, e.g. `4 Tolerance tolerance` -> `F4 "5%" ... "Tolerance"`
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldConfig {
    pub index: u32,
    pub name: String,
    pub column: String,
}

impl FieldConfig {
    pub fn new(index: u32, name: &str, column: &str) -> Self {
        Self {
            index,
            name: name.to_string(),
            column: column.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read config. file: {path:?}, error: {reason}")]
    UnableToRead { path: PathBuf, reason: std::io::Error },

    #[error("Invalid config. file: {path:?}, error: {reason}")]
    Invalid { path: PathBuf, reason: serde_json::Error },

    #[error("Field index is reserved. index: {0}")]
    ReservedFieldIndex(u32),

    #[error("Duplicate field index. index: {0}")]
    DuplicateFieldIndex(u32),
}

impl LibraryConfig {
    #[tracing::instrument(level = Level::DEBUG)]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|reason| ConfigError::UnableToRead { path: path.to_path_buf(), reason })?;

        let config: LibraryConfig = serde_json::from_str(&content)
            .map_err(|reason| ConfigError::Invalid { path: path.to_path_buf(), reason })?;

        config.validate()?;

        info!("Loaded config. file: {:?}", path);

        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen: Vec<u32> = vec![];
        for field in self.fields.iter() {
            if field.index < FIRST_EXTRA_FIELD {
                return Err(ConfigError::ReservedFieldIndex(field.index))
            }
            if seen.contains(&field.index) {
                return Err(ConfigError::DuplicateFieldIndex(field.index))
            }
            seen.push(field.index);
        }
        Ok(())
    }

    /// Adds a field mapping, replacing any existing mapping with the same index.
    pub fn with_field(mut self, field: FieldConfig) -> Result<Self, ConfigError> {
        if field.index < FIRST_EXTRA_FIELD {
            return Err(ConfigError::ReservedFieldIndex(field.index))
        }

        match self.fields.iter_mut().find(|existing| existing.index == field.index) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self.fields.sort_by_key(|field| field.index);

        Ok(self)
    }

    pub fn field_name(&self, index: u32) -> Option<&str> {
        STANDARD_FIELDS.iter()
            .find(|(standard_index, _)| *standard_index == index)
            .map(|(_, name)| *name)
            .or_else(|| self.fields.iter()
                .find(|field| field.index == index)
                .map(|field| field.name.as_str())
            )
    }
}
