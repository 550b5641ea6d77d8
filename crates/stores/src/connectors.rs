use std::path::Path;
use anyhow::{Context, Error};
use symbol::{Decoration, Orientation, PinTableRow, PinType};
use thiserror::Error;
use tracing::{info, trace, Level};
use crate::csv::{ConnectorOrientation, ConnectorRecord};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectorError {
    #[error("Odd pin count for a connector with pins on both sides. count: {0}")]
    OddPinCount(u32),
}

#[tracing::instrument(level = Level::DEBUG)]
pub fn load_connectors(connectors_path: &Path) -> Result<Vec<ConnectorRecord>, Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(connectors_path)
        .with_context(|| format!("Error reading connectors. file: {}", connectors_path.display()))?;

    let mut connectors: Vec<ConnectorRecord> = vec![];

    for result in csv_reader.deserialize() {
        let record: ConnectorRecord = result
            .with_context(|| format!("Deserializing connector record. file: {}", connectors_path.display()))?;

        trace!("{:?}", record);

        connectors.push(record);
    }

    info!("Loaded {} connectors", connectors.len());

    Ok(connectors)
}

/// Pins `1..=count`, all unnamed passive pins. With `Both` odd pins go left and even pins go right.
pub fn pin_table(count: u32, orientation: ConnectorOrientation, decoration: Decoration) -> Result<Vec<PinTableRow>, ConnectorError> {
    if orientation == ConnectorOrientation::Both && count % 2 != 0 {
        return Err(ConnectorError::OddPinCount(count))
    }

    let rows = (1..=count)
        .map(|number| {
            let direction = match orientation {
                ConnectorOrientation::Left => Orientation::Left,
                ConnectorOrientation::Right => Orientation::Right,
                ConnectorOrientation::Both if number % 2 == 1 => Orientation::Left,
                ConnectorOrientation::Both => Orientation::Right,
            };
            let mut row = PinTableRow::pin("~", &number.to_string(), PinType::Passive, direction);
            row.decoration = decoration;
            row
        })
        .collect();

    Ok(rows)
}

impl ConnectorRecord {
    /// Uses `default_decoration` unless the table names one.
    pub fn build_pin_table(&self, default_decoration: Decoration) -> Result<Vec<PinTableRow>, ConnectorError> {
        pin_table(self.number, self.orientation, self.decoration.unwrap_or(default_decoration))
    }
}
