use std::fmt::{Display, Formatter};
use config::FIRST_EXTRA_FIELD;
use crate::geometry::Point;
use crate::item::{int, point, quote, HorizontalJustify, VerticalJustify};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldOrientation {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub index: u32,
    pub text: String,
    pub position: Point,
    pub size: i32,
    pub orientation: FieldOrientation,
    pub visible: bool,
    pub h_justify: HorizontalJustify,
    pub v_justify: VerticalJustify,
    pub italic: bool,
    pub bold: bool,
    /// Only written for user fields, F0..F3 have implicit names.
    pub name: Option<String>,
    /// When set, `position` is computed from the drawing when the symbol is rendered.
    pub auto_place: bool,
}

impl Field {
    pub fn new(index: u32, text: &str, size: i32) -> Self {
        Self {
            index,
            text: text.to_string(),
            position: Point::default(),
            size,
            orientation: FieldOrientation::Horizontal,
            visible: true,
            h_justify: HorizontalJustify::Left,
            v_justify: VerticalJustify::Center,
            italic: false,
            bold: false,
            name: None,
            auto_place: true,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Parses an `F<n>` record that was already split by [`crate::library::tokenize`].
    pub fn from_tokens(tokens: &[String]) -> Result<Field, String> {
        let record = tokens.first().map(String::as_str).unwrap_or("");
        let index: u32 = record.strip_prefix('F')
            .and_then(|index| index.parse().ok())
            .ok_or_else(|| format!("invalid field record '{}'", record))?;

        if tokens.len() < 9 || tokens.len() > 10 {
            return Err(format!("expected 9 to 10 values, found {}", tokens.len()))
        }

        let orientation = match tokens[5].as_str() {
            "H" => FieldOrientation::Horizontal,
            "V" => FieldOrientation::Vertical,
            other => return Err(format!("invalid field orientation '{}'", other)),
        };
        let visible = match tokens[6].as_str() {
            "V" => true,
            "I" => false,
            other => return Err(format!("invalid field visibility '{}'", other)),
        };
        let h_justify = tokens[7].parse().map_err(|err: crate::item::UnknownValueError| err.to_string())?;

        let style: Vec<char> = tokens[8].chars().collect();
        let v_justify = match style.first() {
            Some(code) => code.to_string().parse().map_err(|err: crate::item::UnknownValueError| err.to_string())?,
            None => VerticalJustify::Center,
        };

        Ok(Field {
            index,
            text: tokens[1].clone(),
            position: point(tokens, 2)?,
            size: int(tokens, 4)?,
            orientation,
            visible,
            h_justify,
            v_justify,
            italic: style.get(1).is_some_and(|code| *code == 'I'),
            bold: style.get(2).is_some_and(|code| *code == 'B'),
            name: tokens.get(9).cloned(),
            auto_place: false,
        })
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "F{} {} {} {} {} {} {} {}{}{}",
            self.index,
            quote(&self.text),
            self.position,
            self.size,
            match self.orientation {
                FieldOrientation::Horizontal => 'H',
                FieldOrientation::Vertical => 'V',
            },
            if self.visible { 'V' } else { 'I' },
            self.h_justify.code(),
            self.v_justify.code(),
            if self.italic { 'I' } else { 'N' },
            if self.bold { 'B' } else { 'N' },
        )?;

        if self.index >= FIRST_EXTRA_FIELD {
            if let Some(name) = &self.name {
                write!(f, " {}", quote(name))?;
            }
        }
        Ok(())
    }
}
