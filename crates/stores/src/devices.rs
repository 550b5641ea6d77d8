use std::path::Path;
use anyhow::{Context, Error};
use tracing::{info, trace, Level};
use crate::csv::DeviceRecord;

#[tracing::instrument(level = Level::DEBUG)]
pub fn load_devices(devices_path: &Path) -> Result<Vec<DeviceRecord>, Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .from_path(devices_path)
        .with_context(|| format!("Error reading devices. file: {}", devices_path.display()))?;

    let mut devices: Vec<DeviceRecord> = vec![];

    for (index, result) in csv_reader.deserialize().enumerate() {
        // header is line 1
        let line = index + 2;
        let record: DeviceRecord = result
            .with_context(|| format!("Deserializing device record. file: {}, line: {}", devices_path.display(), line))?;

        trace!("{:?}", record);

        record.validate()
            .with_context(|| format!("Invalid device record. file: {}, line: {}", devices_path.display(), line))?;

        devices.push(record);
    }

    info!("Loaded {} devices", devices.len());

    Ok(devices)
}

#[cfg(test)]
mod tests {
    use assert_fs::prelude::*;
    use assert_fs::TempDir;
    use indoc::indoc;
    use super::*;

    #[test]
    fn load() {
        // given
        let temp_dir = TempDir::new().unwrap();
        let devices_file = temp_dir.child("devices.csv");
        devices_file.write_str(indoc! {r#"
            name,symbol,reference,value,unit
            R_10K,resistor,R,10k,
            "LM358",opamp,U,,1
        "#}).unwrap();

        // when
        let devices = load_devices(devices_file.path()).unwrap();

        // then
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].name().unwrap(), "R_10K");
        assert_eq!(devices[0].unit().unwrap(), 0);
        assert_eq!(devices[1].get("value"), None);
        assert_eq!(devices[1].unit().unwrap(), 1);
    }

    #[test]
    fn missing_symbol() {
        // given
        let temp_dir = TempDir::new().unwrap();
        let devices_file = temp_dir.child("devices.csv");
        devices_file.write_str(indoc! {"
            name,symbol,reference
            R_10K,resistor,R
            R_1K,,R
        "}).unwrap();

        // when
        let result = load_devices(devices_file.path());

        // then
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("line: 3"), "{}", message);
        assert!(message.contains("Missing field. field: 'symbol'"), "{}", message);
    }

    #[test]
    fn missing_file() {
        // when
        let result = load_devices(Path::new("missing.csv"));

        // then
        assert!(result.unwrap_err().to_string().starts_with("Error reading devices. file: missing.csv"));
    }
}
