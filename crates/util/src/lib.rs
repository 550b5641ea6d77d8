#[cfg(feature = "testing")]
pub mod test;

#[cfg(feature = "testing")]
#[macro_use]
pub mod assert;
