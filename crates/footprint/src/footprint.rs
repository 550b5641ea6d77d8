use config::FootprintConfig;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use crate::element::{Element, Position, Text, TextKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footprint {
    pub name: String,
    pub description: String,
    pub tags: String,
    pub smd: bool,
    /// last edit time stamp, seconds since the epoch
    pub tedit: u32,
    pub elements: Vec<Element>,
}

impl Footprint {
    /// Creates a footprint with the `REF**` and `VAL**` texts every module carries.
    pub fn new(name: &str, description: &str, tags: &str, smd: bool, config: &FootprintConfig) -> Self {
        let reference = Text {
            kind: TextKind::Reference,
            text: "REF**".to_string(),
            at: Position::default(),
            angle: Decimal::ZERO,
            layer: config.reference_layer.clone(),
            size: config.reference_font_size,
            thickness: config.reference_font_thickness,
        };
        let value = Text {
            kind: TextKind::Value,
            text: "VAL**".to_string(),
            at: Position::new(Decimal::ZERO, config.value_font_size + Decimal::TWO * config.value_font_thickness),
            angle: Decimal::ZERO,
            layer: config.value_layer.clone(),
            size: config.value_font_size,
            thickness: config.value_font_thickness,
        };

        Self {
            name: name.to_string(),
            description: description.to_string(),
            tags: tags.to_string(),
            smd,
            tedit: now(),
            elements: vec![Element::Text(reference), Element::Text(value)],
        }
    }

    pub fn with_tedit(mut self, tedit: u32) -> Self {
        self.tedit = tedit;
        self
    }

    pub fn add(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn render(&self) -> String {
        let mut result = format!("(module {} (layer F.Cu) (tedit {:08X})\n", self.name, self.tedit);
        if self.smd {
            result.push_str("  (attr smd)\n");
        }
        if !self.description.is_empty() {
            result.push_str(&format!("  (descr {})\n", quoted(&self.description)));
        }
        if !self.tags.is_empty() {
            result.push_str(&format!("  (tags {})\n", quoted(&self.tags)));
        }
        for element in self.elements.iter() {
            result.push_str(&element.to_string());
        }
        result.push_str(")\n");
        result
    }
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn now() -> u32 {
    u32::try_from(OffsetDateTime::now_utc().unix_timestamp()).unwrap_or(u32::MAX)
}
