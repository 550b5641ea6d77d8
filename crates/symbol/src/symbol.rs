use std::collections::BTreeSet;
use config::{LibraryConfig, SymbolConfig, DOCUMENT_FIELD, FOOTPRINT_FIELD, REFERENCE_FIELD, VALUE_FIELD};
use thiserror::Error;
use tracing::{debug, trace};
use crate::field::Field;
use crate::geometry::{BoundingBox, Point};
use crate::item::{DrawItem, Representation};
use crate::template::{substitute, TemplateError};
use crate::Row;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    #[error("Missing field. symbol: '{symbol}', column: '{column}'")]
    MissingField { symbol: String, column: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Description {
    pub description: String,
    pub keywords: String,
    pub document: String,
}

impl Description {
    pub fn is_empty(&self) -> bool {
        self.description.is_empty() && self.keywords.is_empty() && self.document.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub reference: String,
    pub text_offset: i32,
    pub draw_pin_numbers: bool,
    pub draw_pin_names: bool,
    pub unit_count: u32,
    pub units_locked: bool,
    pub power: bool,
    pub fields: Vec<Field>,
    pub aliases: Vec<String>,
    pub footprint_filters: Vec<String>,
    pub draw: Vec<DrawItem>,
    pub description: Description,
}

impl Symbol {
    pub fn new(name: &str, reference: &str, config: &SymbolConfig) -> Self {
        Self {
            name: name.to_string(),
            reference: reference.to_string(),
            text_offset: config.pin_text_offset,
            draw_pin_numbers: true,
            draw_pin_names: true,
            unit_count: 1,
            units_locked: false,
            power: false,
            fields: vec![
                Field::new(REFERENCE_FIELD, reference, config.text_size),
                Field::new(VALUE_FIELD, name, config.name_size),
            ],
            aliases: vec![],
            footprint_filters: vec![],
            draw: vec![],
            description: Description::default(),
        }
    }

    pub fn add(&mut self, item: DrawItem) {
        if item.unit() > self.unit_count {
            self.unit_count = item.unit();
        }
        self.draw.push(item);
    }

    pub fn field(&self, index: u32) -> Option<&Field> {
        self.fields.iter().find(|field| field.index == index)
    }

    /// Sets the text of a field, creating an auto-placed one when missing. Existing fields keep their position.
    pub fn set_field(&mut self, index: u32, text: &str, visible: bool, name: Option<&str>, size: i32) {
        match self.fields.iter_mut().find(|field| field.index == index) {
            Some(field) => {
                field.text = text.to_string();
                field.visible = visible;
                if name.is_some() {
                    field.name = name.map(str::to_string);
                }
            },
            None => {
                let mut field = Field::new(index, text, size);
                field.visible = visible;
                field.name = name.map(str::to_string);
                self.fields.push(field);
                self.fields.sort_by_key(|field| field.index);
            },
        }
    }

    /// Bounds of the items of one unit (including the common ones), or of all units.
    pub fn bounds(&self, unit: Option<u32>) -> Option<BoundingBox> {
        self.draw.iter()
            .filter(|item| match unit {
                Some(unit) => item.unit() == 0 || item.unit() == unit,
                None => true,
            })
            .map(DrawItem::bounds)
            .reduce(BoundingBox::union)
    }

    /// Fills the fields and the description from a device table row.
    pub fn set_fields(&mut self, row: &Row, config: &LibraryConfig) -> Result<(), SymbolError> {
        let size = config.symbol.text_size;
        let value_of = |column: &str| row.get(column)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty());

        let reference = value_of("reference")
            .ok_or_else(|| SymbolError::MissingField { symbol: self.name.clone(), column: "reference".to_string() })?
            .to_string();
        self.set_field(REFERENCE_FIELD, &reference, true, None, size);
        self.reference = reference;

        let value = value_of("value").unwrap_or(&self.name).to_string();
        self.set_field(VALUE_FIELD, &value, true, None, config.symbol.name_size);

        if let Some(footprint) = value_of("footprint") {
            self.set_field(FOOTPRINT_FIELD, footprint, false, None, size);
        }
        if let Some(document) = value_of("document") {
            self.set_field(DOCUMENT_FIELD, document, false, None, size);
        }

        for field in config.fields.iter() {
            if let Some(text) = value_of(&field.column) {
                self.set_field(field.index, text, false, Some(&field.name), size);
            }
        }

        if let Some(aliases) = value_of("alias") {
            self.aliases = aliases.split_whitespace().map(str::to_string).collect();
        }
        if let Some(filters) = value_of("footprint_filters") {
            self.footprint_filters = filters.split_whitespace().map(str::to_string).collect();
        }

        self.description = Description {
            description: value_of("description").unwrap_or_default().to_string(),
            keywords: value_of("keywords").unwrap_or_default().to_string(),
            document: value_of("document").unwrap_or_default().to_string(),
        };

        trace!("Fields set. symbol: {}, fields: {:?}", self.name, self.fields);

        Ok(())
    }

    /// Copies the drawing of `template` into `unit`, substituting `${column}` placeholders from `row`.
    /// Items of the template's common unit 0 stay common.
    ///
    /// Pins whose number is also a column of `row` are renamed to that column's value. When `first`
    /// is set the template's flags and fields are copied as well, later templates only add drawing.
    pub fn load_template(&mut self, template: &Symbol, unit: u32, representation: Representation, row: &Row, first: bool) -> Result<(), TemplateError> {
        for item in template.draw.iter() {
            let mut item = item.clone();
            if item.unit() != 0 {
                item.set_unit(unit);
            }
            if item.representation() != Representation::Common {
                item.set_representation(representation);
            }

            match &mut item {
                DrawItem::Pin(pin) => {
                    pin.name = match row.get(&pin.number) {
                        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
                        _ => substitute(&pin.name, row)?,
                    };
                },
                DrawItem::Text(text) => {
                    text.text = substitute(&text.text, row)?;
                },
                _ => (),
            }

            self.add(item);
        }

        if first {
            self.text_offset = template.text_offset;
            self.draw_pin_numbers = template.draw_pin_numbers;
            self.draw_pin_names = template.draw_pin_names;
            self.units_locked = template.units_locked;
            self.power = template.power;
            if self.footprint_filters.is_empty() {
                self.footprint_filters = template.footprint_filters.clone();
            }

            for field in template.fields.iter() {
                let mut field = field.clone();
                field.text = substitute(&field.text, row)?;
                match self.fields.iter_mut().find(|existing| existing.index == field.index) {
                    Some(existing) => *existing = field,
                    None => self.fields.push(field),
                }
            }
            self.fields.sort_by_key(|field| field.index);
        }

        debug!("Loaded template. symbol: {}, template: {}, unit: {}", self.name, template.name, unit);

        Ok(())
    }

    /// Removes duplicated drawing and moves graphics shared by every unit into the common unit.
    pub fn optimize(&mut self) {
        self.remove_duplicates();
        if self.unit_count > 1 {
            self.collapse_common();
            self.remove_duplicates();
        }
    }

    fn remove_duplicates(&mut self) {
        let mut kept: Vec<DrawItem> = Vec::with_capacity(self.draw.len());
        for item in self.draw.drain(..) {
            if !kept.contains(&item) {
                kept.push(item);
            }
        }
        self.draw = kept;
    }

    fn collapse_common(&mut self) {
        let mut removed = vec![false; self.draw.len()];
        let mut result: Vec<DrawItem> = Vec::with_capacity(self.draw.len());

        for (index, item) in self.draw.iter().enumerate() {
            if removed[index] {
                continue
            }

            if item.is_graphic() && item.unit() != 0 {
                let matches: Vec<usize> = self.draw.iter()
                    .enumerate()
                    .filter(|(other_index, other)| !removed[*other_index] && other.unit() != 0 && other.same_ignoring_unit(item))
                    .map(|(other_index, _)| other_index)
                    .collect();

                let units: BTreeSet<u32> = matches.iter().map(|other_index| self.draw[*other_index].unit()).collect();

                if (1..=self.unit_count).all(|unit| units.contains(&unit)) {
                    for other_index in matches {
                        removed[other_index] = true;
                    }
                    let mut common = item.clone();
                    common.set_unit(0);
                    trace!("Collapsed into common unit. item: {}", common);
                    result.push(common);
                    continue
                }
            }

            result.push(item.clone());
        }

        self.draw = result;
    }

    pub fn render(&self) -> String {
        self.render_lines().join("\n")
    }

    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("DEF {} {} 0 {} {} {} {} {} {}",
            self.name,
            match self.reference.as_str() {
                "" => "~",
                reference => reference,
            },
            self.text_offset,
            if self.draw_pin_numbers { 'Y' } else { 'N' },
            if self.draw_pin_names { 'Y' } else { 'N' },
            self.unit_count,
            if self.units_locked { 'L' } else { 'F' },
            if self.power { 'P' } else { 'N' },
        )];

        lines.extend(self.placed_fields().iter().map(Field::to_string));

        if !self.aliases.is_empty() {
            lines.push(format!("ALIAS {}", self.aliases.join(" ")));
        }

        if !self.footprint_filters.is_empty() {
            lines.push("$FPLIST".to_string());
            lines.extend(self.footprint_filters.iter().map(|filter| format!(" {}", filter)));
            lines.push("$ENDFPLIST".to_string());
        }

        lines.push("DRAW".to_string());
        lines.extend(self.draw.iter().map(DrawItem::to_string));
        lines.push("ENDDRAW".to_string());
        lines.push("ENDDEF".to_string());

        lines
    }

    /// Fields with auto-placed positions resolved against the drawing bounds.
    ///
    /// The reference goes above the top left corner, the value below the bottom left corner and
    /// every other auto-placed field is stacked below the value.
    fn placed_fields(&self) -> Vec<Field> {
        let bounds = self.bounds(None)
            .unwrap_or(BoundingBox::from_points(Point::default(), Point::default()));

        let mut next_y = bounds.min.y;
        let mut fields = self.fields.clone();
        for field in fields.iter_mut().filter(|field| field.auto_place) {
            field.position = match field.index {
                REFERENCE_FIELD => Point::new(bounds.min.x, bounds.max.y + field.size),
                _ => {
                    next_y -= field.size * 2;
                    Point::new(bounds.min.x, next_y + field.size)
                },
            };
        }
        fields
    }
}
