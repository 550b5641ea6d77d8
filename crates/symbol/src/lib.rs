//! Schematic symbol libraries in the legacy `EESchema-LIBRARY Version 2.3` record format.
//!
//! A [`Symbol`] owns its fields and a flat list of [`DrawItem`]s, each tagged with the unit it
//! belongs to (0 = common to all units). Symbols are built from templates, pin tables or
//! microcontroller pinouts, de-duplicated with [`Symbol::optimize`] and rendered into a [`Library`].

pub mod geometry;
pub mod item;
pub mod field;
pub mod symbol;
pub mod library;
pub mod template;
pub mod layout;
pub mod mcu;

pub use geometry::{BoundingBox, Point};
pub use item::{Arc, Circle, DrawItem, Fill, HorizontalJustify, Orientation, Pin, PinShape, PinType, Polyline, Rectangle, Representation, Text, UnknownValueError, VerticalJustify};
pub use field::{Field, FieldOrientation};
pub use symbol::{Description, Symbol, SymbolError};
pub use library::{Library, LibraryParseError};
pub use template::TemplateError;
pub use layout::{Decoration, PinKind, PinTableError, PinTableRow};
pub use mcu::{McuError, McuPinRow, McuPinout};

use std::collections::BTreeMap;

/// One row of a device table, keyed by column header.
pub type Row = BTreeMap<String, String>;
