use config::{SymbolConfig, FOOTPRINT_FIELD};
use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, info};
use crate::item::{Orientation, PinType};
use crate::layout::{PinTableError, PinTableRow};
use crate::symbol::Symbol;

/// Pins per unit; smaller ports are merged until they reach it.
pub const GROUP_SIZE: usize = 8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum McuError {
    #[error("Unknown pin type. number: '{number}', value: '{value}'")]
    UnknownPinType { number: String, value: String },

    #[error("Pinout has no pins. part: '{0}'")]
    NoPins(String),

    #[error(transparent)]
    PinTable(#[from] PinTableError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McuPinRow {
    pub number: String,
    pub name: String,
    pub pin_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct McuPinout {
    pub part: String,
    pub package: String,
    pub pins: Vec<McuPinRow>,
}

/// Maps a vendor pin type column onto a pin type, `-` and `S` are supply pins.
pub fn mcu_pin_type(value: &str) -> Option<PinType> {
    match value.trim() {
        "I" => Some(PinType::Input),
        "O" => Some(PinType::Output),
        "I/O" => Some(PinType::Bidirectional),
        "N" => Some(PinType::NotConnected),
        "-" | "S" => Some(PinType::PowerIn),
        _ => None,
    }
}

/// Orders port groups: full groups first, then small groups merged in order until each reaches
/// [`GROUP_SIZE`], then whatever is left.
pub fn group_ports<T>(ports: Vec<Vec<T>>) -> Vec<Vec<T>> {
    let (full, partial): (Vec<Vec<T>>, Vec<Vec<T>>) = ports.into_iter()
        .partition(|port| port.len() >= GROUP_SIZE);

    let mut groups = full;
    let mut accumulated: Vec<T> = vec![];
    for port in partial {
        accumulated.extend(port);
        if accumulated.len() >= GROUP_SIZE {
            groups.push(std::mem::take(&mut accumulated));
        }
    }
    if !accumulated.is_empty() {
        groups.push(accumulated);
    }

    groups
}

struct MergedPin {
    number: String,
    name: String,
    pin_type: PinType,
}

impl McuPinout {
    /// Builds a multi-unit symbol, unit 1 holds the supply pins and every following unit one port group.
    pub fn build_symbol(&self, config: &SymbolConfig) -> Result<Symbol, McuError> {
        let mut merged: IndexMap<String, MergedPin> = IndexMap::new();
        for row in self.pins.iter() {
            let pin_type = mcu_pin_type(&row.pin_type)
                .ok_or_else(|| McuError::UnknownPinType { number: row.number.clone(), value: row.pin_type.clone() })?;

            match merged.get_mut(&row.number) {
                Some(existing) => {
                    existing.name.push('/');
                    existing.name.push_str(row.name.trim());
                },
                None => {
                    merged.insert(row.number.clone(), MergedPin { number: row.number.clone(), name: row.name.trim().to_string(), pin_type });
                },
            }
        }
        if merged.is_empty() {
            return Err(McuError::NoPins(self.part.clone()))
        }

        let mut supply: Vec<PinTableRow> = vec![];
        let mut ground: Vec<PinTableRow> = vec![];
        let mut ports: IndexMap<String, Vec<PinTableRow>> = IndexMap::new();
        for pin in merged.values() {
            if pin.pin_type == PinType::PowerIn {
                match pin.name.starts_with('G') {
                    true => ground.push(PinTableRow::pin(&pin.name, &pin.number, pin.pin_type, Orientation::Down)),
                    false => supply.push(PinTableRow::pin(&pin.name, &pin.number, pin.pin_type, Orientation::Up)),
                }
                continue
            }

            let port: String = pin.name.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
            ports.entry(port)
                .or_default()
                .push(PinTableRow::pin(&pin.name, &pin.number, pin.pin_type, Orientation::Left));
        }

        let mut symbol = Symbol::new(&self.part, "IC", config);
        symbol.units_locked = true;
        symbol.set_field(FOOTPRINT_FIELD, &self.package, false, None, config.text_size);

        let mut unit = 1;
        if !supply.is_empty() || !ground.is_empty() {
            let power: Vec<PinTableRow> = supply.into_iter().chain(ground).collect();
            symbol.add_pin_table(&power, unit, "", config)?;
            unit += 1;
        }

        let groups = group_ports(ports.into_values().collect());
        for group in groups.iter() {
            debug!("Port unit. part: {}, unit: {}, pins: {}", self.part, unit, group.len());
            symbol.add_pin_table(group, unit, "", config)?;
            unit += 1;
        }

        info!("Built microcontroller symbol. part: {}, package: {}, pins: {}, units: {}", self.part, self.package, merged.len(), symbol.unit_count);

        Ok(symbol)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use crate::item::DrawItem;
    use super::*;

    fn row(number: &str, name: &str, pin_type: &str) -> McuPinRow {
        McuPinRow { number: number.to_string(), name: name.to_string(), pin_type: pin_type.to_string() }
    }

    #[rstest]
    #[case(vec![3, 9, 4, 5, 2], vec![9, 12, 2])]
    #[case(vec![8, 8], vec![8, 8])]
    #[case(vec![1, 2], vec![3])]
    #[case(vec![], vec![])]
    fn group_sizes(#[case] sizes: Vec<usize>, #[case] expected: Vec<usize>) {
        // given
        let ports: Vec<Vec<usize>> = sizes.iter().map(|size| vec![0; *size]).collect();

        // when
        let groups = group_ports(ports);

        // then
        assert_eq!(groups.iter().map(Vec::len).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn build_symbol() {
        // given
        let pinout = McuPinout {
            part: "STM8S003F3".to_string(),
            package: "TSSOP-20".to_string(),
            pins: vec![
                row("1", "VDD", "S"),
                row("2", "GND", "-"),
                row("3", "PA0", "I/O"),
                row("4", "PA1", "I/O"),
                row("5", "PB0", "I"),
                row("5", "TIM1", "I"),
                row("6", "NC", "N"),
            ],
        };

        // when
        let symbol = pinout.build_symbol(&SymbolConfig::default()).unwrap();

        // then
        assert_eq!(symbol.reference, "IC");
        assert_eq!(symbol.unit_count, 2);
        assert!(symbol.units_locked);
        assert_eq!(symbol.field(FOOTPRINT_FIELD).map(|field| field.text.as_str()), Some("TSSOP-20"));

        let pins: Vec<(String, u32)> = symbol.draw.iter()
            .filter_map(|item| match item {
                DrawItem::Pin(pin) => Some((pin.name.clone(), pin.unit)),
                _ => None,
            })
            .collect();
        assert_eq!(pins, vec![
            ("VDD".to_string(), 1),
            ("GND".to_string(), 1),
            ("PA0".to_string(), 2),
            ("PA1".to_string(), 2),
            ("PB0/TIM1".to_string(), 2),
            ("NC".to_string(), 2),
        ]);
    }

    #[test]
    fn unknown_pin_type() {
        // given
        let pinout = McuPinout {
            part: "X".to_string(),
            package: "Y".to_string(),
            pins: vec![row("7", "PC3", "Q")],
        };

        // expect
        assert_eq!(
            pinout.build_symbol(&SymbolConfig::default()).unwrap_err(),
            McuError::UnknownPinType { number: "7".to_string(), value: "Q".to_string() }
        );
    }

    #[test]
    fn no_pins() {
        // expect
        assert_eq!(
            McuPinout::default().build_symbol(&SymbolConfig::default()).unwrap_err(),
            McuError::NoPins("".to_string())
        );
    }
}
