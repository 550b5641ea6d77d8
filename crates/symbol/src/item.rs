use std::fmt::{Display, Formatter};
use std::str::FromStr;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;
use crate::geometry::{BoundingBox, Point};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind}. value: '{value}'")]
pub struct UnknownValueError {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownValueError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self { kind, value: value.to_string() }
    }
}

/// Direction a pin points to, from its connection point towards the symbol body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr, SerializeDisplay)]
pub enum Orientation {
    Up,
    Down,
    Left,
    Right,
}

impl Orientation {
    pub fn code(&self) -> char {
        match self {
            Self::Up => 'U',
            Self::Down => 'D',
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit vector in symbol coordinates.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

impl FromStr for Orientation {
    type Err = UnknownValueError;

    /// Accepts side names as used in pin tables and the single letter record codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" | "U" => Ok(Self::Up),
            "down" | "D" => Ok(Self::Down),
            "left" | "L" => Ok(Self::Left),
            "right" | "R" => Ok(Self::Right),
            _ => Err(UnknownValueError::new("orientation", s)),
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Electrical type of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr, SerializeDisplay)]
pub enum PinType {
    Input,
    Output,
    Bidirectional,
    Tristate,
    Passive,
    Unspecified,
    PowerIn,
    PowerOut,
    OpenCollector,
    OpenEmitter,
    NotConnected,
}

const PIN_TYPES: [(PinType, &str, &str); 11] = [
    (PinType::Input, "input", "I"),
    (PinType::Output, "output", "O"),
    (PinType::Bidirectional, "bidirectional", "B"),
    (PinType::Tristate, "tristate", "T"),
    (PinType::Passive, "passive", "P"),
    (PinType::Unspecified, "unspecified", "U"),
    (PinType::PowerIn, "power_in", "W"),
    (PinType::PowerOut, "power_out", "w"),
    (PinType::OpenCollector, "open_collector", "C"),
    (PinType::OpenEmitter, "open_emitter", "E"),
    (PinType::NotConnected, "not_connected", "N"),
];

impl PinType {
    pub fn code(&self) -> &'static str {
        PIN_TYPES.iter()
            .find(|(pin_type, _, _)| pin_type == self)
            .map(|(_, _, code)| *code)
            .unwrap_or("U")
    }
}

impl FromStr for PinType {
    type Err = UnknownValueError;

    /// Names are case-insensitive, codes are not since `W` and `w` differ.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PIN_TYPES.iter()
            .find(|(_, name, code)| name.eq_ignore_ascii_case(s) || code.eq(&s))
            .map(|(pin_type, _, _)| *pin_type)
            .ok_or_else(|| UnknownValueError::new("pin type", s))
    }
}

impl Display for PinType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = PIN_TYPES.iter()
            .find(|(pin_type, _, _)| pin_type == self)
            .map(|(_, name, _)| *name)
            .unwrap_or("unspecified");
        f.write_str(name)
    }
}

/// Graphical style of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, DeserializeFromStr, SerializeDisplay)]
pub enum PinShape {
    #[default]
    Line,
    Inverted,
    Clock,
    InvertedClock,
    InputLow,
    ClockLow,
    OutputLow,
    FallingEdge,
    NonLogic,
}

const PIN_SHAPES: [(PinShape, &str, &str); 9] = [
    (PinShape::Line, "line", ""),
    (PinShape::Inverted, "inverted", "I"),
    (PinShape::Clock, "clock", "C"),
    (PinShape::InvertedClock, "inverted_clock", "CI"),
    (PinShape::InputLow, "input_low", "L"),
    (PinShape::ClockLow, "clock_low", "CL"),
    (PinShape::OutputLow, "output_low", "V"),
    (PinShape::FallingEdge, "falling_edge", "F"),
    (PinShape::NonLogic, "non_logic", "X"),
];

impl PinShape {
    pub fn code(&self) -> &'static str {
        PIN_SHAPES.iter()
            .find(|(shape, _, _)| shape == self)
            .map(|(_, _, code)| *code)
            .unwrap_or("")
    }
}

impl FromStr for PinShape {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PIN_SHAPES.iter()
            .find(|(_, name, code)| name.eq_ignore_ascii_case(s) || code.eq(&s))
            .map(|(shape, _, _)| *shape)
            .ok_or_else(|| UnknownValueError::new("pin shape", s))
    }
}

impl Display for PinShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = PIN_SHAPES.iter()
            .find(|(shape, _, _)| shape == self)
            .map(|(_, name, _)| *name)
            .unwrap_or("line");
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Fill {
    #[default]
    None,
    Foreground,
    Background,
}

impl Fill {
    pub fn code(&self) -> char {
        match self {
            Self::None => 'N',
            Self::Foreground => 'F',
            Self::Background => 'f',
        }
    }
}

impl FromStr for Fill {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(Self::None),
            "F" => Ok(Self::Foreground),
            "f" => Ok(Self::Background),
            _ => Err(UnknownValueError::new("fill", s)),
        }
    }
}

/// Body style an item belongs to, `convert` in the record format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Representation {
    Common,
    #[default]
    Normal,
    DeMorgan,
}

impl Representation {
    pub fn code(&self) -> u8 {
        match self {
            Self::Common => 0,
            Self::Normal => 1,
            Self::DeMorgan => 2,
        }
    }
}

impl FromStr for Representation {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Self::Common),
            "1" => Ok(Self::Normal),
            "2" => Ok(Self::DeMorgan),
            _ => Err(UnknownValueError::new("representation", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalJustify {
    Left,
    #[default]
    Center,
    Right,
}

impl HorizontalJustify {
    pub fn code(&self) -> char {
        match self {
            Self::Left => 'L',
            Self::Center => 'C',
            Self::Right => 'R',
        }
    }
}

impl FromStr for HorizontalJustify {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "L" => Ok(Self::Left),
            "C" => Ok(Self::Center),
            "R" => Ok(Self::Right),
            _ => Err(UnknownValueError::new("horizontal justification", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalJustify {
    Top,
    #[default]
    Center,
    Bottom,
}

impl VerticalJustify {
    pub fn code(&self) -> char {
        match self {
            Self::Top => 'T',
            Self::Center => 'C',
            Self::Bottom => 'B',
        }
    }
}

impl FromStr for VerticalJustify {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "T" => Ok(Self::Top),
            "C" => Ok(Self::Center),
            "B" => Ok(Self::Bottom),
            _ => Err(UnknownValueError::new("vertical justification", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pin {
    pub name: String,
    pub number: String,
    pub position: Point,
    pub length: i32,
    pub orientation: Orientation,
    pub number_size: i32,
    pub name_size: i32,
    pub unit: u32,
    pub representation: Representation,
    pub pin_type: PinType,
    pub shape: PinShape,
    pub visible: bool,
}

impl Pin {
    /// The end of the pin that touches the symbol body.
    pub fn body_end(&self) -> Point {
        let (dx, dy) = self.orientation.delta();
        self.position.offset(dx * self.length, dy * self.length)
    }
}

impl Display for Pin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "X {} {} {} {} {} {} {} {} {} {}",
            record_word(&self.name),
            record_word(&self.number),
            self.position,
            self.length,
            self.orientation.code(),
            self.number_size,
            self.name_size,
            self.unit,
            self.representation.code(),
            self.pin_type.code(),
        )?;

        let shape = match self.visible {
            true => self.shape.code().to_string(),
            false => format!("N{}", self.shape.code()),
        };
        if !shape.is_empty() {
            write!(f, " {}", shape)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rectangle {
    pub start: Point,
    pub end: Point,
    pub unit: u32,
    pub representation: Representation,
    pub width: i32,
    pub fill: Fill,
}

impl Display for Rectangle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "S {} {} {} {} {} {}",
            self.start, self.end, self.unit, self.representation.code(), self.width, self.fill.code()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Text {
    /// tenths of a degree
    pub angle: i32,
    pub position: Point,
    pub size: i32,
    pub visible: bool,
    pub unit: u32,
    pub representation: Representation,
    pub text: String,
    pub italic: bool,
    pub bold: bool,
    pub h_justify: HorizontalJustify,
    pub v_justify: VerticalJustify,
}

impl Display for Text {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "T {} {} {} {} {} {} {} {} {} {} {}",
            self.angle,
            self.position,
            self.size,
            if self.visible { 0 } else { 1 },
            self.unit,
            self.representation.code(),
            quote(&self.text),
            if self.italic { "Italic" } else { "Normal" },
            if self.bold { 1 } else { 0 },
            self.h_justify.code(),
            self.v_justify.code(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub unit: u32,
    pub representation: Representation,
    pub width: i32,
    pub fill: Fill,
}

impl Display for Polyline {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "P {} {} {} {}", self.points.len(), self.unit, self.representation.code(), self.width)?;
        for point in self.points.iter() {
            write!(f, " {}", point)?;
        }
        write!(f, " {}", self.fill.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Circle {
    pub center: Point,
    pub radius: i32,
    pub unit: u32,
    pub representation: Representation,
    pub width: i32,
    pub fill: Fill,
}

impl Display for Circle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "C {} {} {} {} {} {}",
            self.center, self.radius, self.unit, self.representation.code(), self.width, self.fill.code()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Arc {
    pub center: Point,
    pub radius: i32,
    /// tenths of a degree
    pub start_angle: i32,
    /// tenths of a degree
    pub end_angle: i32,
    pub unit: u32,
    pub representation: Representation,
    pub width: i32,
    pub fill: Fill,
    pub start: Point,
    pub end: Point,
}

impl Display for Arc {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "A {} {} {} {} {} {} {} {} {} {}",
            self.center,
            self.radius,
            self.start_angle,
            self.end_angle,
            self.unit,
            self.representation.code(),
            self.width,
            self.fill.code(),
            self.start,
            self.end,
        )
    }
}

/// One record of a symbol's DRAW section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DrawItem {
    Pin(Pin),
    Rectangle(Rectangle),
    Text(Text),
    Polyline(Polyline),
    Circle(Circle),
    Arc(Arc),
}

impl DrawItem {
    pub fn unit(&self) -> u32 {
        match self {
            DrawItem::Pin(item) => item.unit,
            DrawItem::Rectangle(item) => item.unit,
            DrawItem::Text(item) => item.unit,
            DrawItem::Polyline(item) => item.unit,
            DrawItem::Circle(item) => item.unit,
            DrawItem::Arc(item) => item.unit,
        }
    }

    pub fn set_unit(&mut self, unit: u32) {
        match self {
            DrawItem::Pin(item) => item.unit = unit,
            DrawItem::Rectangle(item) => item.unit = unit,
            DrawItem::Text(item) => item.unit = unit,
            DrawItem::Polyline(item) => item.unit = unit,
            DrawItem::Circle(item) => item.unit = unit,
            DrawItem::Arc(item) => item.unit = unit,
        }
    }

    pub fn representation(&self) -> Representation {
        match self {
            DrawItem::Pin(item) => item.representation,
            DrawItem::Rectangle(item) => item.representation,
            DrawItem::Text(item) => item.representation,
            DrawItem::Polyline(item) => item.representation,
            DrawItem::Circle(item) => item.representation,
            DrawItem::Arc(item) => item.representation,
        }
    }

    pub fn set_representation(&mut self, representation: Representation) {
        match self {
            DrawItem::Pin(item) => item.representation = representation,
            DrawItem::Rectangle(item) => item.representation = representation,
            DrawItem::Text(item) => item.representation = representation,
            DrawItem::Polyline(item) => item.representation = representation,
            DrawItem::Circle(item) => item.representation = representation,
            DrawItem::Arc(item) => item.representation = representation,
        }
    }

    /// Everything except pins; pins are electrical and never shared between units.
    pub fn is_graphic(&self) -> bool {
        !matches!(self, DrawItem::Pin(_))
    }

    pub fn same_ignoring_unit(&self, other: &DrawItem) -> bool {
        let mut this = self.clone();
        this.set_unit(0);
        let mut that = other.clone();
        that.set_unit(0);
        this == that
    }

    pub fn bounds(&self) -> BoundingBox {
        match self {
            DrawItem::Pin(pin) => BoundingBox::from_points(pin.position, pin.body_end()),
            DrawItem::Rectangle(rectangle) => BoundingBox::from_points(rectangle.start, rectangle.end),
            DrawItem::Text(text) => BoundingBox::from_points(text.position, text.position),
            DrawItem::Polyline(polyline) => {
                let first = polyline.points.first().copied().unwrap_or_default();
                polyline.points.iter().fold(BoundingBox::from_points(first, first), |mut bounds, point| {
                    bounds.include(*point);
                    bounds
                })
            },
            DrawItem::Circle(circle) => BoundingBox::from_points(
                circle.center.offset(-circle.radius, -circle.radius),
                circle.center.offset(circle.radius, circle.radius),
            ),
            DrawItem::Arc(arc) => BoundingBox::from_points(
                arc.center.offset(-arc.radius, -arc.radius),
                arc.center.offset(arc.radius, arc.radius),
            ),
        }
    }

    /// Parses a tokenized DRAW record, see [`crate::library::tokenize`].
    pub fn from_tokens(tokens: &[String]) -> Result<DrawItem, String> {
        let record = tokens.first().map(String::as_str).unwrap_or("");
        match record {
            "X" => {
                expect_len(tokens, 12, 13)?;
                let (visible, shape) = match tokens.get(12) {
                    Some(shape) if shape.starts_with('N') => (false, parse::<PinShape>(&shape[1..])?),
                    Some(shape) => (true, parse::<PinShape>(shape)?),
                    None => (true, PinShape::Line),
                };
                Ok(DrawItem::Pin(Pin {
                    name: tokens[1].clone(),
                    number: tokens[2].clone(),
                    position: point(tokens, 3)?,
                    length: int(tokens, 5)?,
                    orientation: parse(&tokens[6])?,
                    number_size: int(tokens, 7)?,
                    name_size: int(tokens, 8)?,
                    unit: unit(tokens, 9)?,
                    representation: parse(&tokens[10])?,
                    pin_type: parse(&tokens[11])?,
                    shape,
                    visible,
                }))
            },
            "S" => {
                expect_len(tokens, 9, 10)?;
                Ok(DrawItem::Rectangle(Rectangle {
                    start: point(tokens, 1)?,
                    end: point(tokens, 3)?,
                    unit: unit(tokens, 5)?,
                    representation: parse(&tokens[6])?,
                    width: int(tokens, 7)?,
                    fill: fill(tokens, 8)?,
                }))
            },
            "T" => {
                expect_len(tokens, 9, 13)?;
                Ok(DrawItem::Text(Text {
                    angle: int(tokens, 1)?,
                    position: point(tokens, 2)?,
                    size: int(tokens, 4)?,
                    visible: int(tokens, 5)? == 0,
                    unit: unit(tokens, 6)?,
                    representation: parse(&tokens[7])?,
                    text: tokens[8].clone(),
                    italic: tokens.get(9).is_some_and(|style| style.eq("Italic")),
                    bold: tokens.get(10).is_some_and(|bold| bold.ne("0")),
                    h_justify: tokens.get(11).map(|value| parse(value)).transpose()?.unwrap_or_default(),
                    v_justify: tokens.get(12).map(|value| parse(value)).transpose()?.unwrap_or_default(),
                }))
            },
            "P" => {
                let count = usize::try_from(int(tokens, 1)?).map_err(|_| "negative point count".to_string())?;
                let required = 5 + 2 * count;
                expect_len(tokens, required, required + 1)?;
                let points = (0..count)
                    .map(|index| point(tokens, 5 + 2 * index))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(DrawItem::Polyline(Polyline {
                    points,
                    unit: unit(tokens, 2)?,
                    representation: parse(&tokens[3])?,
                    width: int(tokens, 4)?,
                    fill: fill(tokens, required)?,
                }))
            },
            "C" => {
                expect_len(tokens, 7, 8)?;
                Ok(DrawItem::Circle(Circle {
                    center: point(tokens, 1)?,
                    radius: int(tokens, 3)?,
                    unit: unit(tokens, 4)?,
                    representation: parse(&tokens[5])?,
                    width: int(tokens, 6)?,
                    fill: fill(tokens, 7)?,
                }))
            },
            "A" => {
                expect_len(tokens, 14, 14)?;
                Ok(DrawItem::Arc(Arc {
                    center: point(tokens, 1)?,
                    radius: int(tokens, 3)?,
                    start_angle: int(tokens, 4)?,
                    end_angle: int(tokens, 5)?,
                    unit: unit(tokens, 6)?,
                    representation: parse(&tokens[7])?,
                    width: int(tokens, 8)?,
                    fill: fill(tokens, 9)?,
                    start: point(tokens, 10)?,
                    end: point(tokens, 12)?,
                }))
            },
            _ => Err(format!("unknown draw record '{}'", record)),
        }
    }
}

impl Display for DrawItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawItem::Pin(item) => item.fmt(f),
            DrawItem::Rectangle(item) => item.fmt(f),
            DrawItem::Text(item) => item.fmt(f),
            DrawItem::Polyline(item) => item.fmt(f),
            DrawItem::Circle(item) => item.fmt(f),
            DrawItem::Arc(item) => item.fmt(f),
        }
    }
}

/// Pin names and numbers are whitespace separated words, an empty one is written as `~`.
///
/// Parsing keeps the written form, so `""` reads back as `~` and `"A B"` as `A_B`.
fn record_word(value: &str) -> String {
    match value.trim() {
        "" => "~".to_string(),
        value => value.split_whitespace().collect::<Vec<_>>().join("_"),
    }
}

pub(crate) fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn expect_len(tokens: &[String], min: usize, max: usize) -> Result<(), String> {
    match tokens.len() {
        len if len < min || len > max => Err(format!("expected {} to {} values, found {}", min, max, len)),
        _ => Ok(()),
    }
}

pub(crate) fn int(tokens: &[String], index: usize) -> Result<i32, String> {
    let token = tokens.get(index).ok_or_else(|| format!("missing value at position {}", index))?;
    token.parse().map_err(|_| format!("invalid number '{}' at position {}", token, index))
}

fn unit(tokens: &[String], index: usize) -> Result<u32, String> {
    let token = tokens.get(index).ok_or_else(|| format!("missing unit at position {}", index))?;
    token.parse().map_err(|_| format!("invalid unit '{}' at position {}", token, index))
}

pub(crate) fn point(tokens: &[String], index: usize) -> Result<Point, String> {
    Ok(Point::new(int(tokens, index)?, int(tokens, index + 1)?))
}

fn fill(tokens: &[String], index: usize) -> Result<Fill, String> {
    match tokens.get(index) {
        Some(value) => parse(value),
        None => Ok(Fill::None),
    }
}

pub(crate) fn parse<T: FromStr<Err = UnknownValueError>>(value: &str) -> Result<T, String> {
    value.parse().map_err(|err: UnknownValueError| err.to_string())
}
