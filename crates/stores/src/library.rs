use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Error};
use config::LibraryConfig;
use symbol::{Library, Representation, Symbol};
use tracing::{debug, info, Level};
use crate::csv::DeviceRecord;
use crate::pin_tables::load_pin_table;

enum SymbolSource {
    Template(PathBuf),
    Table(PathBuf),
}

/// Looks for a template first, then a pin table.
fn resolve_source(symbol: &str, template_path: &Path, table_path: &Path, config: &LibraryConfig) -> Result<SymbolSource, Error> {
    let template = template_path.join(format!("{}{}", symbol, config.symbol.template_extension));
    if template.is_file() {
        return Ok(SymbolSource::Template(template))
    }

    let table = table_path.join(format!("{}{}", symbol, config.symbol.table_extension));
    if table.is_file() {
        return Ok(SymbolSource::Table(table))
    }

    bail!("No template or pin table for symbol. symbol: '{}', template: {}, table: {}", symbol, template.display(), table.display())
}

#[derive(Default)]
struct TemplateCache {
    templates: HashMap<PathBuf, Symbol>,
}

impl TemplateCache {
    #[tracing::instrument(level = Level::DEBUG, skip(self))]
    fn load(&mut self, path: &Path) -> Result<&Symbol, Error> {
        if !self.templates.contains_key(path) {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Error reading template. file: {}", path.display()))?;
            let library: Library = content.parse()
                .with_context(|| format!("Error parsing template. file: {}", path.display()))?;
            let Some(template) = library.symbols.into_iter().next() else {
                bail!("Template contains no symbol. file: {}", path.display())
            };
            debug!("Loaded template. file: {}, symbol: {}", path.display(), template.name);
            self.templates.insert(path.to_path_buf(), template);
        }

        self.templates.get(path)
            .with_context(|| format!("Template not cached. file: {}", path.display()))
    }
}

/// Builds one symbol per run of consecutive rows with the same `name`.
///
/// Every row adds one unit drawn from its template or pin table. The first row of a run also sets
/// the fields and description of the symbol.
pub fn build_library(devices: &[DeviceRecord], template_path: &Path, table_path: &Path, config: &LibraryConfig) -> Result<Library, Error> {
    let mut library = Library::default();
    let mut cache = TemplateCache::default();
    let mut current: Option<Symbol> = None;

    for device in devices {
        let name = device.name()?;
        let symbol_name = device.symbol()?;
        let unit = device.unit()?;

        let first = !matches!(&current, Some(symbol) if symbol.name == name);
        if first {
            if let Some(mut finished) = current.take() {
                finished.optimize();
                library.symbols.push(finished);
            }
        }
        let symbol = current.get_or_insert_with(|| Symbol::new(name, device.get("reference").unwrap_or_default(), &config.symbol));

        match resolve_source(symbol_name, template_path, table_path, config)? {
            SymbolSource::Template(path) => {
                let template = cache.load(&path)?;
                symbol.load_template(template, unit, Representation::Normal, device.row(), first)
                    .with_context(|| format!("Error applying template. device: '{}', file: {}", name, path.display()))?;
            },
            SymbolSource::Table(path) => {
                let rows = load_pin_table(&path)?;
                symbol.add_pin_table(&rows, unit, device.section(), &config.symbol)
                    .with_context(|| format!("Error laying out pin table. device: '{}', file: {}", name, path.display()))?;
            },
        }

        if first {
            symbol.set_fields(device.row(), config)?;
        }
    }

    if let Some(mut finished) = current.take() {
        finished.optimize();
        library.symbols.push(finished);
    }

    info!("Generated {} symbols", library.symbols.len());

    Ok(library)
}

pub fn write_library(library_path: &Path, library: &Library) -> Result<(), Error> {
    fs::write(library_path, library.render())
        .with_context(|| format!("Error writing symbol library. file: {}", library_path.display()))?;

    info!("Written symbol library. file: {}", library_path.display());

    Ok(())
}

pub fn write_descriptions(descriptions_path: &Path, library: &Library) -> Result<(), Error> {
    fs::write(descriptions_path, library.render_descriptions())
        .with_context(|| format!("Error writing description library. file: {}", descriptions_path.display()))?;

    info!("Written description library. file: {}", descriptions_path.display());

    Ok(())
}
