use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, trace};
use crate::field::Field;
use crate::item::{int, DrawItem};
use crate::symbol::{Description, Symbol};

pub const LIBRARY_HEADER: &str = "EESchema-LIBRARY Version 2.3";
pub const DESCRIPTION_HEADER: &str = "EESchema-DOCLIB  Version 2.0";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid symbol library. line: {line}, reason: {reason}")]
pub struct LibraryParseError {
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Library {
    pub symbols: Vec<Symbol>,
}

impl Library {
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = vec![
            LIBRARY_HEADER.to_string(),
            "#encoding utf-8".to_string(),
        ];

        for symbol in self.symbols.iter() {
            lines.push("#".to_string());
            lines.push(format!("# {}", symbol.name));
            lines.push("#".to_string());
            lines.extend(symbol.render_lines());
        }

        lines.push("#".to_string());
        lines.push("#End Library".to_string());

        lines.join("\n") + "\n"
    }

    pub fn render_descriptions(&self) -> String {
        let mut lines: Vec<String> = vec![DESCRIPTION_HEADER.to_string()];

        for symbol in self.symbols.iter() {
            let names = std::iter::once(&symbol.name).chain(symbol.aliases.iter());
            for name in names {
                lines.push("#".to_string());
                lines.extend(render_description(name, &symbol.description));
            }
        }

        lines.push("#".to_string());
        lines.push("#End Doc Library".to_string());

        lines.join("\n") + "\n"
    }
}

fn render_description(name: &str, description: &Description) -> Vec<String> {
    let mut lines = vec![format!("$CMP {}", name)];
    for (record, text) in [("D", &description.description), ("K", &description.keywords), ("F", &description.document)] {
        if !text.is_empty() {
            lines.push(format!("{} {}", record, text));
        }
    }
    lines.push("$ENDCMP".to_string());
    lines
}

/// Splits a record line into whitespace separated values, quoted values may contain spaces and `\"`.
pub fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = vec![];
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue
        }

        let mut token = String::new();
        if c == '"' {
            chars.next();
            let mut terminated = false;
            while let Some(c) = chars.next() {
                match c {
                    '\\' => {
                        if let Some(escaped) = chars.next() {
                            token.push(escaped);
                        }
                    },
                    '"' => {
                        terminated = true;
                        break
                    },
                    _ => token.push(c),
                }
            }
            if !terminated {
                return Err("unterminated quoted value".to_string())
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break
                }
                token.push(c);
                chars.next();
            }
        }
        tokens.push(token);
    }

    Ok(tokens)
}

enum Section {
    Outside,
    Definition,
    FootprintFilters,
    Drawing,
}

impl FromStr for Library {
    type Err = LibraryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut symbols: Vec<Symbol> = vec![];
        let mut current: Option<Symbol> = None;
        let mut section = Section::Outside;
        let mut header_seen = false;

        for (index, line) in s.lines().enumerate() {
            let line_number = index + 1;
            let error = |reason: String| LibraryParseError { line: line_number, reason };

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue
            }

            if !header_seen {
                if !trimmed.starts_with("EESchema-LIBRARY") {
                    return Err(error(format!("expected library header, found '{}'", trimmed)))
                }
                header_seen = true;
                continue
            }

            let tokens = tokenize(trimmed).map_err(error)?;
            let record = tokens[0].clone();
            let record = record.as_str();
            trace!("Parsing record. line: {}, record: {}", line_number, record);

            match (&section, current.as_mut()) {
                (Section::Outside, _) => {
                    if record != "DEF" {
                        return Err(error(format!("unexpected record '{}' outside of a symbol", record)))
                    }
                    current = Some(parse_definition(&tokens).map_err(error)?);
                    section = Section::Definition;
                },
                (Section::FootprintFilters, Some(symbol)) => match record {
                    "$ENDFPLIST" => section = Section::Definition,
                    _ => symbol.footprint_filters.extend(tokens),
                },
                (Section::Drawing, Some(symbol)) => match record {
                    "ENDDRAW" => section = Section::Definition,
                    _ => symbol.draw.push(DrawItem::from_tokens(&tokens).map_err(error)?),
                },
                (Section::Definition, Some(symbol)) => match record {
                    "ALIAS" => symbol.aliases.extend(tokens.into_iter().skip(1)),
                    "$FPLIST" => section = Section::FootprintFilters,
                    "DRAW" => section = Section::Drawing,
                    "ENDDEF" => {
                        if let Some(symbol) = current.take() {
                            debug!("Parsed symbol. name: {}, items: {}", symbol.name, symbol.draw.len());
                            symbols.push(symbol);
                        }
                        section = Section::Outside;
                    },
                    field if field.starts_with('F') => symbol.fields.push(Field::from_tokens(&tokens).map_err(error)?),
                    _ => return Err(error(format!("unexpected record '{}' in symbol '{}'", record, symbol.name))),
                },
                (_, None) => return Err(error("record outside of a symbol".to_string())),
            }
        }

        if let Some(symbol) = current {
            return Err(LibraryParseError { line: s.lines().count(), reason: format!("missing ENDDEF for symbol '{}'", symbol.name) })
        }

        Ok(Library { symbols })
    }
}

fn parse_definition(tokens: &[String]) -> Result<Symbol, String> {
    if tokens.len() != 10 {
        return Err(format!("expected 10 values, found {}", tokens.len()))
    }

    let flag = |index: usize, set: &str, unset: &str| match tokens[index].as_str() {
        value if value == set => Ok(true),
        value if value == unset => Ok(false),
        value => Err(format!("invalid flag '{}' at position {}", value, index)),
    };

    let unit_count = tokens[7].parse::<u32>()
        .map_err(|_| format!("invalid unit count '{}'", tokens[7]))?;

    Ok(Symbol {
        name: tokens[1].clone(),
        reference: match tokens[2].as_str() {
            "~" => String::new(),
            reference => reference.to_string(),
        },
        text_offset: int(tokens, 4)?,
        draw_pin_numbers: flag(5, "Y", "N")?,
        draw_pin_names: flag(6, "Y", "N")?,
        unit_count,
        units_locked: flag(8, "L", "F")?,
        power: flag(9, "P", "N")?,
        fields: vec![],
        aliases: vec![],
        footprint_filters: vec![],
        draw: vec![],
        description: Description::default(),
    })
}
