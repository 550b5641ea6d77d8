//! Rectangular symbols laid out from pin tables.
//!
//! Each row of a pin table names the side of the body its pin is placed on. The body is sized so
//! that both the pins and their names fit, then snapped so every pin lands on the grid.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use config::SymbolConfig;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;
use tracing::debug;
use crate::geometry::{snap_up, Point};
use crate::item::{Circle, DrawItem, Fill, Orientation, Pin, PinShape, PinType, Rectangle, Representation, UnknownValueError};
use crate::symbol::Symbol;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PinTableError {
    #[error("Empty pin table. section: '{0}'")]
    EmptySection(String),

    #[error("Missing pin number. name: '{0}'")]
    MissingNumber(String),
}

/// Marker drawn where a pin meets the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, DeserializeFromStr, SerializeDisplay)]
pub enum Decoration {
    #[default]
    None,
    Point,
    Square,
    Rectangle,
}

impl FromStr for Decoration {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(Self::None),
            "point" => Ok(Self::Point),
            "square" => Ok(Self::Square),
            "rectangle" => Ok(Self::Rectangle),
            _ => Err(UnknownValueError { kind: "decoration", value: s.to_string() }),
        }
    }
}

impl Display for Decoration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Point => write!(f, "point"),
            Self::Square => write!(f, "square"),
            Self::Rectangle => write!(f, "rectangle"),
        }
    }
}

/// The `type` column of a pin table, `space` keeps a slot free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr, SerializeDisplay)]
pub enum PinKind {
    Pin(PinType),
    Space,
}

impl FromStr for PinKind {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "space" => Ok(Self::Space),
            _ => s.parse().map(Self::Pin),
        }
    }
}

impl Display for PinKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pin(pin_type) => pin_type.fmt(f),
            Self::Space => write!(f, "space"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinTableRow {
    pub name: String,
    pub number: String,
    pub kind: PinKind,
    pub shape: PinShape,
    /// side of the body the pin is placed on
    pub direction: Orientation,
    pub decoration: Decoration,
    pub section: String,
}

impl PinTableRow {
    pub fn pin(name: &str, number: &str, pin_type: PinType, direction: Orientation) -> Self {
        Self {
            name: name.to_string(),
            number: number.to_string(),
            kind: PinKind::Pin(pin_type),
            shape: PinShape::Line,
            direction,
            decoration: Decoration::None,
            section: String::new(),
        }
    }

    pub fn space(direction: Orientation) -> Self {
        Self {
            name: String::new(),
            number: String::new(),
            kind: PinKind::Space,
            shape: PinShape::Line,
            direction,
            decoration: Decoration::None,
            section: String::new(),
        }
    }
}

impl Symbol {
    /// Adds a rectangular body with the pins of `rows` around it to `unit`.
    ///
    /// A non-empty `section` selects the rows of that section only.
    pub fn add_pin_table(&mut self, rows: &[PinTableRow], unit: u32, section: &str, config: &SymbolConfig) -> Result<(), PinTableError> {
        let rows: Vec<&PinTableRow> = rows.iter()
            .filter(|row| section.is_empty() || row.section == section)
            .collect();
        if rows.is_empty() {
            return Err(PinTableError::EmptySection(section.to_string()))
        }

        let side = |direction: Orientation| rows.iter()
            .copied()
            .filter(|row| row.direction == direction)
            .collect::<Vec<_>>();
        let (left, right, up, down) = (side(Orientation::Left), side(Orientation::Right), side(Orientation::Up), side(Orientation::Down));

        let name_extent = |rows: &[&PinTableRow]| -> i32 {
            rows.iter()
                .filter(|row| row.kind != PinKind::Space)
                .map(|row| row.name.chars().filter(|c| *c != '~').count() as i32 * config.pin_name_size)
                .max()
                .unwrap_or(0)
        };
        let slots = |count: usize| -> i32 {
            (count as i32 - 1) * config.pin_grid + 2 * config.pin_margin
        };

        let name_width = name_extent(&left) + config.reference_space + name_extent(&right);
        let name_height = name_extent(&up) + name_extent(&down);

        let width = snap_up(slots(up.len().max(down.len())).max(name_width), 2 * config.grid);
        let height = snap_up(slots(left.len().max(right.len())).max(name_height), 2 * config.grid);
        let (half_width, half_height) = (width / 2, height / 2);

        debug!("Pin table layout. symbol: {}, unit: {}, section: '{}', width: {}, height: {}", self.name, unit, section, width, height);

        self.add(DrawItem::Rectangle(Rectangle {
            start: Point::new(-half_width, half_height),
            end: Point::new(half_width, -half_height),
            unit,
            representation: Representation::Normal,
            width: config.line_width,
            fill: Fill::Background,
        }));

        let placements = [
            (left, Point::new(-half_width - config.pin_length, half_height - config.pin_margin), (0, -config.pin_grid), Orientation::Right),
            (right, Point::new(half_width + config.pin_length, half_height - config.pin_margin), (0, -config.pin_grid), Orientation::Left),
            (up, Point::new(-half_width + config.pin_margin, half_height + config.pin_length), (config.pin_grid, 0), Orientation::Down),
            (down, Point::new(-half_width + config.pin_margin, -half_height - config.pin_length), (config.pin_grid, 0), Orientation::Up),
        ];

        for (rows, start, (dx, dy), orientation) in placements {
            for (index, row) in rows.into_iter().enumerate() {
                let pin_type = match row.kind {
                    PinKind::Space => continue,
                    PinKind::Pin(pin_type) => pin_type,
                };
                if row.number.trim().is_empty() {
                    return Err(PinTableError::MissingNumber(row.name.clone()))
                }

                let step = index as i32;
                let pin = Pin {
                    name: row.name.clone(),
                    number: row.number.clone(),
                    position: start.offset(dx * step, dy * step),
                    length: config.pin_length,
                    orientation,
                    number_size: config.pin_number_size,
                    name_size: config.pin_name_size,
                    unit,
                    representation: Representation::Normal,
                    pin_type,
                    shape: row.shape,
                    visible: true,
                };

                let decoration = decorate(&pin, row.decoration, config);
                self.add(DrawItem::Pin(pin));
                if let Some(decoration) = decoration {
                    self.add(decoration);
                }
            }
        }

        Ok(())
    }
}

/// Graphic marking the body end of `pin`, drawn towards the inside of the body.
fn decorate(pin: &Pin, decoration: Decoration, config: &SymbolConfig) -> Option<DrawItem> {
    let size = config.grid / 2;
    let end = pin.body_end();
    let (dx, dy) = pin.orientation.delta();
    let (px, py) = (dy.abs(), dx.abs());

    match decoration {
        Decoration::None => None,
        Decoration::Point => Some(DrawItem::Circle(Circle {
            center: end.offset(dx * size, dy * size),
            radius: size,
            unit: pin.unit,
            representation: pin.representation,
            width: 0,
            fill: Fill::Foreground,
        })),
        Decoration::Square => Some(DrawItem::Rectangle(Rectangle {
            start: end.offset(-px * size, -py * size),
            end: end.offset(dx * 2 * size + px * size, dy * 2 * size + py * size),
            unit: pin.unit,
            representation: pin.representation,
            width: 0,
            fill: Fill::Foreground,
        })),
        Decoration::Rectangle => Some(DrawItem::Rectangle(Rectangle {
            start: end.offset(-px * size, -py * size),
            end: end.offset(dx * 4 * size + px * size, dy * 4 * size + py * size),
            unit: pin.unit,
            representation: pin.representation,
            width: config.line_width,
            fill: Fill::None,
        })),
    }
}
