use std::path::PathBuf;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use cli::args::DecorationArg;
use cli::parsers::FieldMappingParser;
use config::FieldConfig;

#[derive(Parser, Debug)]
#[command(name = "libgen")]
#[command(bin_name = "libgen")]
#[command(version, about, long_about = None)]
pub(crate) struct Opts {
    #[command(subcommand)]
    pub(crate) command: Command,

    /// Trace log file
    #[arg(long, num_args = 0..=1, default_missing_value = "trace.log", require_equals = true)]
    pub(crate) trace: Option<PathBuf>,

    /// Library configuration file (JSON)
    #[arg(long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) verbose: Verbosity<InfoLevel>,
}

#[derive(Subcommand, Debug)]
#[command(arg_required_else_help(true))]
pub(crate) enum Command {
    /// Generate symbol and description libraries from a device table
    Symbols {
        /// Device table
        #[arg(long, value_name = "FILE")]
        csv: PathBuf,

        /// Symbol library to write
        #[arg(long, value_name = "FILE")]
        symbol: PathBuf,

        /// Description library to write
        #[arg(long, value_name = "FILE")]
        desc: PathBuf,

        /// Directory containing the symbol templates
        #[arg(long, value_name = "DIR")]
        template_path: PathBuf,

        /// Directory containing the pin tables
        #[arg(long, value_name = "DIR")]
        table_path: PathBuf,

        /// Extra field mapping, e.g. '7:part_number'
        #[arg(long, value_parser = FieldMappingParser::default(), value_name = "INDEX:COLUMN")]
        field: Vec<FieldConfig>,
    },
    /// Generate a symbol library from a single pin table
    Table {
        /// Pin table
        #[arg(long, value_name = "FILE")]
        csv: PathBuf,

        /// Symbol library to write
        #[arg(long, value_name = "FILE")]
        symbol: PathBuf,

        /// Symbol name, defaults to the pin table file name
        #[arg(long)]
        name: Option<String>,

        /// Reference designator prefix
        #[arg(long, default_value = "U")]
        reference: String,
    },
    /// Generate a microcontroller symbol from a vendor pinout table
    Mcu {
        /// Pinout table
        #[arg(long, value_name = "FILE")]
        csv: PathBuf,

        /// Symbol library to write
        #[arg(long, value_name = "FILE")]
        symbol: PathBuf,
    },
    /// Generate connector pin tables
    PinTables {
        /// Connector table
        #[arg(long, value_name = "FILE")]
        csv: PathBuf,

        /// Directory for the generated pin tables
        #[arg(long, value_name = "DIR")]
        output_path: PathBuf,

        /// Decoration for connectors without one
        #[arg(long, default_value = "rectangle")]
        decoration: DecorationArg,
    },
    /// Generate footprint files from a footprint table
    Footprints {
        /// Footprint table
        #[arg(long, value_name = "FILE")]
        csv: PathBuf,

        /// Directory for the generated footprints
        #[arg(long, value_name = "DIR")]
        output_path: PathBuf,
    },
    /// Write a summary of the symbols and footprints in library files
    Summary {
        /// Symbol libraries to scan
        #[arg(long, num_args = 1.., value_name = "FILE")]
        libs: Vec<PathBuf>,

        /// Footprint files to scan
        #[arg(long, num_args = 1.., value_name = "FILE")]
        footprints: Vec<PathBuf>,

        /// Summary file to write
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Update the library list of a project file
    Project {
        /// Project file
        #[arg(long, value_name = "FILE")]
        project: PathBuf,

        /// Directory containing the symbol libraries
        #[arg(long, value_name = "DIR")]
        library_path: PathBuf,

        /// File to write, defaults to updating the project file
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Write a readme describing the library configuration
    Readme {
        /// Readme file to write
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
}
