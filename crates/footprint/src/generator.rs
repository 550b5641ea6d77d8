use std::collections::BTreeMap;
use config::FootprintConfig;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;
use tracing::debug;
use crate::element::{Element, Line, Pad, PadShape, PadTechnology, Position, Rectangle};
use crate::footprint::Footprint;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FootprintError {
    #[error("Unknown footprint generator. name: '{0}'")]
    UnknownGenerator(String),
}

/// Dimensions of one footprint table row, in millimetres.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct FootprintParameters {
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

pub type Generator = fn(&FootprintParameters, &FootprintConfig) -> Footprint;

pub struct Registry {
    generators: BTreeMap<&'static str, Generator>,
}

impl Default for Registry {
    fn default() -> Self {
        let mut registry = Self { generators: BTreeMap::new() };
        registry.register("chip", chip);
        registry.register("chip_pol", chip_pol);
        registry
    }
}

impl Registry {
    pub fn register(&mut self, name: &'static str, generator: Generator) {
        self.generators.insert(name, generator);
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.generators.keys().copied().collect()
    }

    pub fn generate(&self, name: &str, parameters: &FootprintParameters, config: &FootprintConfig) -> Result<Footprint, FootprintError> {
        let generator = self.generators.get(name)
            .ok_or_else(|| FootprintError::UnknownGenerator(name.to_string()))?;

        debug!("Generating footprint. generator: {}, name: {}", name, parameters.name);

        Ok(generator(parameters, config))
    }
}

/// Two terminal chip resistors, capacitors and inductors.
pub fn chip(parameters: &FootprintParameters, config: &FootprintConfig) -> Footprint {
    let mut footprint = Footprint::new(&parameters.name, &parameters.description, &parameters.tags, true, config);

    footprint.add(Element::Rectangle(Rectangle {
        layer: config.package_layer.clone(),
        at: Position::default(),
        width: parameters.package_width,
        height: parameters.package_height,
        line_width: config.package_line_width,
        centered: true,
    }));

    let offset = parameters.package_width / Decimal::TWO;
    for (number, x) in [("1", -offset), ("2", offset)] {
        footprint.add(Element::Pad(Pad {
            number: number.to_string(),
            technology: PadTechnology::Smd,
            shape: PadShape::Rect,
            at: Position::new(x, Decimal::ZERO),
            angle: Decimal::ZERO,
            width: parameters.pad_width,
            height: parameters.pad_height,
            drill: None,
            layers: PadTechnology::Smd.layers(config).to_string(),
        }));
    }

    footprint
}

/// [`chip`] with a polarity bar left of pad 1.
pub fn chip_pol(parameters: &FootprintParameters, config: &FootprintConfig) -> Footprint {
    let mut footprint = chip(parameters, config);

    let x = -(parameters.package_width / Decimal::TWO + parameters.package_width * dec!(0.1));
    let y = parameters.package_height / Decimal::TWO;
    footprint.add(Element::Line(Line::new(
        &config.package_layer,
        Position::new(x, -y),
        Position::new(x, y),
        config.package_line_width,
    )));

    footprint
}
