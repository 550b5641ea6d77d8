//! Table loaders and file writers used by the `libgen` commands.

pub mod csv;
pub mod devices;
pub mod pin_tables;
pub mod connectors;
pub mod mcu;
pub mod footprints;
pub mod library;
pub mod project;
pub mod summary;
pub mod readme;
