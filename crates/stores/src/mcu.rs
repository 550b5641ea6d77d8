use std::path::Path;
use anyhow::{bail, Context, Error};
use symbol::{McuPinRow, McuPinout};
use tracing::{info, trace, Level};

/// Loads a vendor pinout table.
///
/// The table starts with `Part,<name>` and `Package,<package>` rows, followed by a header row
/// beginning with `Number` and then `Number,Name,Type` rows. Extra columns are ignored.
#[tracing::instrument(level = Level::DEBUG)]
pub fn load_pinout(pinout_path: &Path) -> Result<McuPinout, Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(pinout_path)
        .with_context(|| format!("Error reading pinout. file: {}", pinout_path.display()))?;

    let mut pinout = McuPinout::default();
    let mut header_seen = false;

    for (index, result) in csv_reader.records().enumerate() {
        let record = result
            .with_context(|| format!("Reading pinout record. file: {}, line: {}", pinout_path.display(), index + 1))?;
        trace!("{:?}", record);

        let first = record.get(0).unwrap_or_default();
        if !header_seen {
            match first {
                "Part" => pinout.part = record.get(1).unwrap_or_default().to_string(),
                "Package" => pinout.package = record.get(1).unwrap_or_default().to_string(),
                "Number" => header_seen = true,
                _ => (),
            }
            continue
        }

        if first.is_empty() {
            continue
        }
        match (record.get(1), record.get(2)) {
            (Some(name), Some(pin_type)) => pinout.pins.push(McuPinRow {
                number: first.to_string(),
                name: name.to_string(),
                pin_type: pin_type.to_string(),
            }),
            _ => bail!("Incomplete pin record. file: {}, line: {}", pinout_path.display(), index + 1),
        }
    }

    if !header_seen {
        bail!("Missing 'Number' header row. file: {}", pinout_path.display())
    }
    if pinout.part.is_empty() {
        bail!("Missing 'Part' row. file: {}", pinout_path.display())
    }

    info!("Loaded pinout. part: {}, package: {}, pins: {}", pinout.part, pinout.package, pinout.pins.len());

    Ok(pinout)
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
        let pinout_file = temp_dir.child("stm8.csv");
        pinout_file.write_str(indoc! {"
            Part,STM8S003F3
            Package,TSSOP-20
            ,
            Number,Name,Type,Notes
            1,PD4,I/O,
            2,VSS,S
            ,,
            3,PD5,I/O,UART TX
        "}).unwrap();

        // when
        let pinout = load_pinout(pinout_file.path()).unwrap();

        // then
        assert_eq!(pinout.part, "STM8S003F3");
        assert_eq!(pinout.package, "TSSOP-20");
        assert_eq!(pinout.pins, vec![
            McuPinRow { number: "1".to_string(), name: "PD4".to_string(), pin_type: "I/O".to_string() },
            McuPinRow { number: "2".to_string(), name: "VSS".to_string(), pin_type: "S".to_string() },
            McuPinRow { number: "3".to_string(), name: "PD5".to_string(), pin_type: "I/O".to_string() },
        ]);
    }

    #[test]
    fn missing_header() {
        // given
        let temp_dir = TempDir::new().unwrap();
        let pinout_file = temp_dir.child("bad.csv");
        pinout_file.write_str("Part,X\n1,PA0,I\n").unwrap();

        // when
        let result = load_pinout(pinout_file.path());

        // then
        assert!(result.unwrap_err().to_string().starts_with("Missing 'Number' header row."));
    }

    #[test]
    fn incomplete_pin() {
        // given
        let temp_dir = TempDir::new().unwrap();
        let pinout_file = temp_dir.child("bad.csv");
        pinout_file.write_str("Part,X\nNumber,Name,Type\n1,PA0\n").unwrap();

        // when
        let result = load_pinout(pinout_file.path());

        // then
        assert!(result.unwrap_err().to_string().starts_with("Incomplete pin record."));
    }
}
