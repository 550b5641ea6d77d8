use std::fs;
use std::path::Path;
use anyhow::{bail, Context};
use clap::Parser;
use tracing::{debug, info};
use config::LibraryConfig;
use footprint::Registry;
use symbol::{Decoration, Library, Symbol};
use stores::{connectors, devices, footprints, library, mcu, pin_tables, project, readme, summary};
use crate::opts::{Command, Opts};

mod opts;

fn main() -> anyhow::Result<()>{
    let args = argfile::expand_args(
        argfile::parse_fromfile,
        argfile::PREFIX,
    )?;

    let opts = Opts::parse_from(args);

    cli::tracing::configure_tracing(opts.trace.clone(), opts.verbose.clone())?;

    let config = LibraryConfig::load_or_default(opts.config.as_deref())?;
    debug!("Configuration: {:?}", config);

    match opts.command {
        Command::Symbols { csv, symbol, desc, template_path, table_path, field } => {
            let config = field.into_iter()
                .try_fold(config, |config, field| config.with_field(field))?;

            let devices = devices::load_devices(&csv)?;
            let library = library::build_library(&devices, &template_path, &table_path, &config)?;

            library::write_library(&symbol, &library)?;
            library::write_descriptions(&desc, &library)?;
        },
        Command::Table { csv, symbol, name, reference } => {
            let name = match name {
                Some(name) => name,
                None => file_stem(&csv)?,
            };

            let rows = pin_tables::load_pin_table(&csv)?;

            let mut table_symbol = Symbol::new(&name, &reference, &config.symbol);
            table_symbol.add_pin_table(&rows, 0, "", &config.symbol)
                .with_context(|| format!("Error laying out pin table. file: {}", csv.display()))?;
            table_symbol.optimize();

            info!("Generated symbol. name: {}, pins: {}", name, rows.len());

            library::write_library(&symbol, &Library { symbols: vec![table_symbol] })?;
        },
        Command::Mcu { csv, symbol } => {
            let pinout = mcu::load_pinout(&csv)?;

            let mut mcu_symbol = pinout.build_symbol(&config.symbol)
                .with_context(|| format!("Error building microcontroller symbol. file: {}", csv.display()))?;
            mcu_symbol.optimize();

            library::write_library(&symbol, &Library { symbols: vec![mcu_symbol] })?;
        },
        Command::PinTables { csv, output_path, decoration } => {
            let default_decoration = Decoration::from(decoration);
            let connectors = connectors::load_connectors(&csv)?;

            for connector in connectors.iter() {
                let rows = connector.build_pin_table(default_decoration)
                    .with_context(|| format!("Error generating pin table. connector: {}", connector.name))?;

                let path = output_path.join(format!("{}{}", connector.name, config.symbol.table_extension));
                pin_tables::store_pin_table(&path, &rows)?;
            }

            info!("Generated {} pin tables", connectors.len());
        },
        Command::Footprints { csv, output_path } => {
            let records = footprints::load_footprints(&csv)?;
            let written = footprints::write_footprints(&records, &output_path, &Registry::default(), &config.footprint)?;

            info!("Generated {} footprints", written.len());
        },
        Command::Summary { libs, footprints, output } => {
            let tree = summary::build_summary(&libs, &footprints)?;
            summary::write_summary(&output, &tree)?;
        },
        Command::Project { project: project_path, library_path, output } => {
            let content = fs::read_to_string(&project_path)
                .with_context(|| format!("Error reading project. file: {}", project_path.display()))?;

            let names = project::scan_library_names(&library_path)?;
            let updated = project::update_project(&content, &names);

            let output = output.unwrap_or(project_path);
            fs::write(&output, updated)
                .with_context(|| format!("Error writing project. file: {}", output.display()))?;

            info!("Updated project. file: {}, libraries: {}", output.display(), names.len());
        },
        Command::Readme { output } => {
            readme::write_readme(&output, &config)?;
        },
    }

    Ok(())
}

fn file_stem(path: &Path) -> anyhow::Result<String> {
    match path.file_stem() {
        Some(stem) => Ok(stem.to_string_lossy().to_string()),
        None => bail!("Unable to derive a symbol name. file: {}", path.display()),
    }
}
