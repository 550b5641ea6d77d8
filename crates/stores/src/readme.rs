use std::fs;
use std::path::Path;
use anyhow::{Context, Error};
use config::{LibraryConfig, STANDARD_FIELDS};
use heck::ToShoutySnakeCase;
use serde::Serialize;
use tracing::info;

const INTRODUCTION: &str = "# kicad
KiCad library generated from CSV tables. Symbols, footprints and parts are described in tables and \
turned into library files by `libgen`.

All dimensions are in millimeters/degree for footprints and mils for symbols, if not otherwise noted.

## Naming conventions

- Filenames are lowercase and separated with underscore (e.g. resistor_1k5_chip_0805, dip_8_narrow)
- Device names are uppercase and separated with underscore (e.g. SOIC_8_WIDE, 74HC595)
";

/// Configuration values as `(PREFIX_KEY, value)`, sorted by key.
fn settings<T: Serialize>(prefix: &str, section: &T) -> Result<Vec<(String, String)>, Error> {
    let value = serde_json::to_value(section)?;
    let mut settings: Vec<(String, String)> = value.as_object()
        .map(|object| object.iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                (format!("{}_{}", prefix, key).to_shouty_snake_case(), value)
            })
            .collect()
        )
        .unwrap_or_default();
    settings.sort();
    Ok(settings)
}

pub fn render_readme(config: &LibraryConfig) -> Result<String, Error> {
    let mut lines: Vec<String> = vec![INTRODUCTION.to_string()];

    lines.push("## Symbol\n".to_string());
    lines.push("### Configuration\n".to_string());
    lines.push("F#-Field usage:".to_string());

    let mut fields: Vec<(u32, &str)> = STANDARD_FIELDS.to_vec();
    fields.extend(config.fields.iter().map(|field| (field.index, field.name.as_str())));
    fields.sort_by_key(|(index, _)| *index);
    lines.extend(fields.iter().map(|(index, name)| format!("* **F{}**: {}", index, name)));
    lines.push(String::new());

    lines.extend(settings("symbol", &config.symbol)?.iter().map(|(key, value)| format!("* **{}**: {}", key, value)));

    lines.push("\n## Footprint\n".to_string());
    lines.push("### Configuration\n".to_string());
    lines.extend(settings("footprint", &config.footprint)?.iter().map(|(key, value)| format!("* **{}**: {}", key, value)));

    Ok(lines.join("\n") + "\n")
}

pub fn write_readme(readme_path: &Path, config: &LibraryConfig) -> Result<(), Error> {
    let readme = render_readme(config)?;
    fs::write(readme_path, readme)
        .with_context(|| format!("Error writing readme. file: {}", readme_path.display()))?;

    info!("Written readme. file: {}", readme_path.display());

    Ok(())
}
