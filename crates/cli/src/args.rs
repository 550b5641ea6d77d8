use clap::ValueEnum;
use symbol::Decoration;

/// Args decouple of CLI arg handling requirements from the internal data structures

#[derive(Debug, Clone, Copy)]
#[derive(ValueEnum)]
#[value(rename_all = "lower")]
pub enum DecorationArg {
    None,
    Point,
    Square,
    Rectangle,
}

impl From<DecorationArg> for Decoration {
    fn from(value: DecorationArg) -> Self {
        match value {
            DecorationArg::None => Self::None,
            DecorationArg::Point => Self::Point,
            DecorationArg::Square => Self::Square,
            DecorationArg::Rectangle => Self::Rectangle,
        }
    }
}
