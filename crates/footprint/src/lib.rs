//! PCB footprint modules in the s-expression `.kicad_mod` format.

pub mod element;
pub mod footprint;
pub mod generator;

pub use element::{Element, Pad, PadShape, PadTechnology, Position};
pub use footprint::Footprint;
pub use generator::{FootprintError, FootprintParameters, Registry};
