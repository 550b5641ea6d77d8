use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Error};
use config::FootprintConfig;
use footprint::{FootprintError, Registry};
use tracing::{error, info, trace, Level};
use crate::csv::FootprintRecord;

#[tracing::instrument(level = Level::DEBUG)]
pub fn load_footprints(footprints_path: &Path) -> Result<Vec<FootprintRecord>, Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(footprints_path)
        .with_context(|| format!("Error reading footprints. file: {}", footprints_path.display()))?;

    let mut footprints: Vec<FootprintRecord> = vec![];

    for result in csv_reader.deserialize() {
        let record: FootprintRecord = result
            .with_context(|| format!("Deserializing footprint record. file: {}", footprints_path.display()))?;

        trace!("{:?}", record);

        footprints.push(record);
    }

    info!("Loaded {} footprints", footprints.len());

    Ok(footprints)
}

/// Writes one `<name><extension>` file per record and returns the written paths.
///
/// Records naming an unknown generator are logged and skipped.
pub fn write_footprints(records: &[FootprintRecord], output_path: &Path, registry: &Registry, config: &FootprintConfig) -> Result<Vec<PathBuf>, Error> {
    let mut written: Vec<PathBuf> = vec![];

    for record in records {
        let footprint = match registry.generate(&record.generator, &record.build_parameters(), config) {
            Ok(footprint) => footprint,
            Err(FootprintError::UnknownGenerator(generator)) => {
                error!("Unknown footprint generator. generator: '{}', footprint: '{}'", generator, record.name);
                continue
            },
        };

        let path = output_path.join(format!("{}{}", record.name, config.extension));
        fs::write(&path, footprint.render())
            .with_context(|| format!("Error writing footprint. file: {}", path.display()))?;

        info!("Generated footprint. name: {}, file: {}", record.name, path.display());
        written.push(path);
    }

    Ok(written)
}
