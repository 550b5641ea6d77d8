use std::path::Path;
use anyhow::{Context, Error};
use csv::QuoteStyle;
use symbol::PinTableRow;
use tracing::{debug, info, trace, Level};
use crate::csv::PinTableRecord;

#[tracing::instrument(level = Level::DEBUG)]
pub fn load_pin_table(pin_table_path: &Path) -> Result<Vec<PinTableRow>, Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(pin_table_path)
        .with_context(|| format!("Error reading pin table. file: {}", pin_table_path.display()))?;

    let mut rows: Vec<PinTableRow> = vec![];

    for result in csv_reader.deserialize() {
        let record: PinTableRecord = result
            .with_context(|| format!("Deserializing pin table record. file: {}", pin_table_path.display()))?;

        trace!("{:?}", record);

        rows.push(record.build_pin_table_row());
    }

    debug!("Loaded pin table. file: {}, rows: {}", pin_table_path.display(), rows.len());

    Ok(rows)
}

pub fn store_pin_table(pin_table_path: &Path, rows: &[PinTableRow]) -> Result<(), Error> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_path(pin_table_path)
        .with_context(|| format!("Error writing pin table. file: {}", pin_table_path.display()))?;

    for row in rows {
        writer.serialize(PinTableRecord::from(row))?;
    }

    writer.flush()?;

    info!("Stored pin table. file: {}, rows: {}", pin_table_path.display(), rows.len());

    Ok(())
}
