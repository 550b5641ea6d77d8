use std::fmt::{Display, Formatter};
use config::FootprintConfig;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Millimetres with three decimals, as written in module files.
pub(crate) fn mm(value: Decimal) -> String {
    format!("{:.3}", value.round_dp(3))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: Decimal,
    pub y: Decimal,
}

impl Position {
    pub fn new(x: Decimal, y: Decimal) -> Self {
        Self { x, y }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", mm(self.x), mm(self.y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Reference,
    Value,
    User,
}

impl Display for TextKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TextKind::Reference => write!(f, "reference"),
            TextKind::Value => write!(f, "value"),
            TextKind::User => write!(f, "user"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub kind: TextKind,
    pub text: String,
    pub at: Position,
    pub angle: Decimal,
    pub layer: String,
    pub size: Decimal,
    pub thickness: Decimal,
}

impl Display for Text {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "  (fp_text {} {} (at {}", self.kind, self.text, self.at)?;
        if !self.angle.is_zero() {
            write!(f, " {}", mm(self.angle))?;
        }
        writeln!(f, ") (layer {})", self.layer)?;
        writeln!(f, "    (effects (font (size {} {}) (thickness {})))", mm(self.size), mm(self.size), mm(self.thickness))?;
        writeln!(f, "  )")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub layer: String,
    pub start: Position,
    pub end: Position,
    pub width: Decimal,
}

impl Line {
    pub fn new(layer: &str, start: Position, end: Position, width: Decimal) -> Self {
        Self { layer: layer.to_string(), start, end, width }
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  (fp_line (start {}) (end {}) (layer {}) (width {}))", self.start, self.end, self.layer, mm(self.width))
    }
}

/// Arc around `start` beginning at `end`, sweeping `angle` degrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arc {
    pub layer: String,
    pub start: Position,
    pub end: Position,
    pub angle: Decimal,
    pub width: Decimal,
}

impl Display for Arc {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  (fp_arc (start {}) (end {}) (angle {}) (layer {}) (width {}))",
            self.start, self.end, mm(self.angle), self.layer, mm(self.width)
        )
    }
}

/// Circle around `center` passing through `end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circle {
    pub layer: String,
    pub center: Position,
    pub end: Position,
    pub width: Decimal,
}

impl Display for Circle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  (fp_circle (center {}) (end {}) (layer {}) (width {}))", self.center, self.end, self.layer, mm(self.width))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rectangle {
    pub layer: String,
    pub at: Position,
    pub width: Decimal,
    pub height: Decimal,
    pub line_width: Decimal,
    /// `at` is the centre instead of the first corner
    pub centered: bool,
}

impl Rectangle {
    fn origin(&self) -> Position {
        origin(self.at, self.width, self.height, self.centered)
    }

    pub fn lines(&self) -> Vec<Line> {
        let Position { x, y } = self.origin();
        let (w, h) = (self.width, self.height);
        let corners = [
            Position::new(x, y),
            Position::new(x + w, y),
            Position::new(x + w, y + h),
            Position::new(x, y + h),
        ];
        closed_path(&self.layer, &corners, self.line_width)
    }
}

/// Rectangle with each corner cut off by `bevel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeveledRectangle {
    pub layer: String,
    pub at: Position,
    pub width: Decimal,
    pub height: Decimal,
    pub bevel: Decimal,
    pub line_width: Decimal,
    pub centered: bool,
}

impl BeveledRectangle {
    pub fn lines(&self) -> Vec<Line> {
        let Position { x, y } = origin(self.at, self.width, self.height, self.centered);
        let (w, h, b) = (self.width, self.height, self.bevel);
        let corners = [
            Position::new(x + b, y),
            Position::new(x + w - b, y),
            Position::new(x + w, y + b),
            Position::new(x + w, y + h - b),
            Position::new(x + w - b, y + h),
            Position::new(x + b, y + h),
            Position::new(x, y + h - b),
            Position::new(x, y + b),
        ];
        closed_path(&self.layer, &corners, self.line_width)
    }
}

/// Outline with a bevelled notch at every `grid` step, e.g. around a pin header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeveledOutline {
    pub layer: String,
    pub at: Position,
    pub width: Decimal,
    pub height: Decimal,
    pub bevel: Decimal,
    pub grid: Decimal,
    pub line_width: Decimal,
    pub centered: bool,
}

impl BeveledOutline {
    pub fn lines(&self) -> Vec<Line> {
        let Position { x, y } = origin(self.at, self.width, self.height, self.centered);
        let (w, h, b, g) = (self.width, self.height, self.bevel, self.grid);
        let columns = steps(w, g);
        let rows = steps(h, g);

        let mut corners: Vec<Position> = vec![];
        for i in 0..columns {
            let left = x + Decimal::from(i) * g;
            corners.push(Position::new(left + b, y));
            corners.push(Position::new(left + g - b, y));
            if i + 1 < columns {
                corners.push(Position::new(left + g, y + b));
            }
        }
        for i in 0..rows {
            let top = y + Decimal::from(i) * g;
            corners.push(Position::new(x + w, top + b));
            corners.push(Position::new(x + w, top + g - b));
            if i + 1 < rows {
                corners.push(Position::new(x + w - b, top + g));
            }
        }
        for i in (0..columns).rev() {
            let right = x + Decimal::from(i) * g + g;
            corners.push(Position::new(right - b, y + h));
            corners.push(Position::new(right - g + b, y + h));
            if i > 0 {
                corners.push(Position::new(right - g, y + h - b));
            }
        }
        for i in (0..rows).rev() {
            let bottom = y + Decimal::from(i) * g + g;
            corners.push(Position::new(x, bottom - b));
            corners.push(Position::new(x, bottom - g + b));
            if i > 0 {
                corners.push(Position::new(x + b, bottom - g));
            }
        }

        closed_path(&self.layer, &corners, self.line_width)
    }
}

fn steps(length: Decimal, grid: Decimal) -> u32 {
    if grid.is_zero() {
        return 0
    }
    (length / grid).trunc().to_u32().unwrap_or(0)
}

fn origin(at: Position, width: Decimal, height: Decimal, centered: bool) -> Position {
    match centered {
        true => Position::new(at.x - width / Decimal::TWO, at.y - height / Decimal::TWO),
        false => at,
    }
}

fn closed_path(layer: &str, corners: &[Position], width: Decimal) -> Vec<Line> {
    corners.iter()
        .zip(corners.iter().cycle().skip(1))
        .map(|(start, end)| Line::new(layer, *start, *end, width))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadTechnology {
    Smd,
    ThruHole,
    NpThruHole,
    Connect,
}

impl PadTechnology {
    /// The configured copper, paste and mask layers for pads of this technology.
    pub fn layers<'a>(&self, config: &'a FootprintConfig) -> &'a str {
        match self {
            PadTechnology::Smd | PadTechnology::Connect => &config.smd_layers,
            PadTechnology::ThruHole | PadTechnology::NpThruHole => &config.thd_layers,
        }
    }
}

impl Display for PadTechnology {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PadTechnology::Smd => write!(f, "smd"),
            PadTechnology::ThruHole => write!(f, "thru_hole"),
            PadTechnology::NpThruHole => write!(f, "np_thru_hole"),
            PadTechnology::Connect => write!(f, "connect"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadShape {
    Circle,
    Oval,
    Rect,
    Trapezoid,
}

impl Display for PadShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PadShape::Circle => write!(f, "circle"),
            PadShape::Oval => write!(f, "oval"),
            PadShape::Rect => write!(f, "rect"),
            PadShape::Trapezoid => write!(f, "trapezoid"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pad {
    pub number: String,
    pub technology: PadTechnology,
    pub shape: PadShape,
    pub at: Position,
    pub angle: Decimal,
    pub width: Decimal,
    pub height: Decimal,
    pub drill: Option<Decimal>,
    pub layers: String,
}

impl Display for Pad {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "  (pad {} {} {} (at {} {}) (size {} {}) ",
            self.number, self.technology, self.shape, self.at, mm(self.angle), mm(self.width), mm(self.height)
        )?;
        if let Some(drill) = self.drill.filter(|drill| !drill.is_zero()) {
            write!(f, "(drill {}) ", mm(drill))?;
        }
        writeln!(f, "(layers {}))", self.layers)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Text(Text),
    Line(Line),
    Arc(Arc),
    Circle(Circle),
    Rectangle(Rectangle),
    BeveledRectangle(BeveledRectangle),
    BeveledOutline(BeveledOutline),
    Pad(Pad),
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let lines = match self {
            Element::Text(text) => return text.fmt(f),
            Element::Line(line) => return line.fmt(f),
            Element::Arc(arc) => return arc.fmt(f),
            Element::Circle(circle) => return circle.fmt(f),
            Element::Pad(pad) => return pad.fmt(f),
            Element::Rectangle(rectangle) => rectangle.lines(),
            Element::BeveledRectangle(rectangle) => rectangle.lines(),
            Element::BeveledOutline(outline) => outline.lines(),
        };
        lines.iter().try_for_each(|line| line.fmt(f))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use super::*;

    #[rstest]
    #[case(dec!(0), "0.000")]
    #[case(dec!(1.5), "1.500")]
    #[case(dec!(-0.96), "-0.960")]
    #[case(dec!(0.12345), "0.123")]
    fn millimetres(#[case] value: Decimal, #[case] expected: &str) {
        // expect
        assert_eq!(mm(value), expected);
    }

    #[test]
    fn render_text() {
        // given
        let text = Text {
            kind: TextKind::Reference,
            text: "REF**".to_string(),
            at: Position::default(),
            angle: dec!(0),
            layer: "F.SilkS".to_string(),
            size: dec!(1.0),
            thickness: dec!(0.15),
        };

        // expect
        assert_eq!(text.to_string(), concat!(
            "  (fp_text reference REF** (at 0.000 0.000) (layer F.SilkS)\n",
            "    (effects (font (size 1.000 1.000) (thickness 0.150)))\n",
            "  )\n",
        ));
    }

    #[rstest]
    #[case(PadTechnology::Smd, "F.Cu F.Paste F.Mask")]
    #[case(PadTechnology::ThruHole, "*.Cu *.Mask F.SilkS")]
    #[case(PadTechnology::NpThruHole, "*.Cu *.Mask F.SilkS")]
    fn pad_layers(#[case] technology: PadTechnology, #[case] expected: &str) {
        // expect
        assert_eq!(technology.layers(&FootprintConfig::default()), expected);
    }

    #[test]
    fn centered_rectangle() {
        // given
        let rectangle = Element::Rectangle(Rectangle {
            layer: "F.SilkS".to_string(),
            at: Position::default(),
            width: dec!(2),
            height: dec!(1),
            line_width: dec!(0.1),
            centered: true,
        });

        // expect
        assert_eq!(rectangle.to_string(), concat!(
            "  (fp_line (start -1.000 -0.500) (end 1.000 -0.500) (layer F.SilkS) (width 0.100))\n",
            "  (fp_line (start 1.000 -0.500) (end 1.000 0.500) (layer F.SilkS) (width 0.100))\n",
            "  (fp_line (start 1.000 0.500) (end -1.000 0.500) (layer F.SilkS) (width 0.100))\n",
            "  (fp_line (start -1.000 0.500) (end -1.000 -0.500) (layer F.SilkS) (width 0.100))\n",
        ));
    }

    #[test]
    fn beveled_rectangle_has_eight_sides() {
        // given
        let rectangle = BeveledRectangle {
            layer: "F.SilkS".to_string(),
            at: Position::default(),
            width: dec!(4),
            height: dec!(2),
            bevel: dec!(0.5),
            line_width: dec!(0.15),
            centered: false,
        };

        // when
        let lines = rectangle.lines();

        // then
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0].start, Position::new(dec!(0.5), dec!(0)));
        assert_eq!(lines[7].end, lines[0].start);
    }

    #[test]
    fn beveled_outline_is_closed() {
        // given
        let outline = BeveledOutline {
            layer: "F.SilkS".to_string(),
            at: Position::default(),
            width: dec!(5.08),
            height: dec!(2.54),
            bevel: dec!(0.25),
            grid: dec!(2.54),
            line_width: dec!(0.15),
            centered: true,
        };

        // when
        let lines = outline.lines();

        // then
        assert_eq!(lines.len(), 14);
        for (line, next) in lines.iter().zip(lines.iter().cycle().skip(1)) {
            assert_eq!(line.end, next.start);
        }
    }

    #[rstest]
    #[case(None, "  (pad 1 thru_hole circle (at 0.000 0.000 0.000) (size 1.700 1.700) (layers *.Cu *.Mask F.SilkS))\n")]
    #[case(Some(dec!(1)), "  (pad 1 thru_hole circle (at 0.000 0.000 0.000) (size 1.700 1.700) (drill 1.000) (layers *.Cu *.Mask F.SilkS))\n")]
    fn render_pad(#[case] drill: Option<Decimal>, #[case] expected: &str) {
        // given
        let pad = Pad {
            number: "1".to_string(),
            technology: PadTechnology::ThruHole,
            shape: PadShape::Circle,
            at: Position::default(),
            angle: dec!(0),
            width: dec!(1.7),
            height: dec!(1.7),
            drill,
            layers: "*.Cu *.Mask F.SilkS".to_string(),
        };

        // expect
        assert_eq!(pad.to_string(), expected);
    }
}
