use std::ffi::{OsStr, OsString};
use clap::builder::TypedValueParser;
use clap::{Arg, Command, Error, value_parser};
use clap::error::ErrorKind;
use config::{FieldConfig, FIRST_EXTRA_FIELD};
use heck::ToUpperCamelCase;

#[derive(Clone, Default)]
pub struct FieldMappingParser {}

impl TypedValueParser for FieldMappingParser {
    type Value = FieldConfig;

    /// Parses a value in the format '<INDEX>:<COLUMN>', e.g. '7:part_number'.
    ///
    /// The field is named after the column in UpperCamelCase, e.g. 'PartNumber'.
    fn parse_ref(&self, cmd: &Command, _arg: Option<&Arg>, value: &OsStr) -> Result<Self::Value, Error> {

        let chunks_str = match value.to_str() {
            Some(str) => Ok(str),
            None => Err(Error::raw(ErrorKind::InvalidValue, "Invalid argument encoding")),
        }?;

        let Some((index_str, column)) = chunks_str.split_once(':') else {
            return Err(Error::raw(ErrorKind::InvalidValue, format!("Invalid argument. Required format: '<INDEX>:<COLUMN>', found: '{}'\n", chunks_str)))
        };

        let column = column.trim();
        if column.is_empty() || column.contains(':') {
            return Err(Error::raw(ErrorKind::InvalidValue, format!("Invalid argument. Required format: '<INDEX>:<COLUMN>', found: '{}'\n", chunks_str)))
        }

        let index_parser = value_parser!(u32);
        let index_os_str = OsString::from(index_str.trim());
        let index = index_parser.parse_ref(cmd, None, &index_os_str)?;

        if index < FIRST_EXTRA_FIELD {
            return Err(Error::raw(ErrorKind::InvalidValue, format!("Invalid argument. Field index is reserved, index: {}, minimum: {}\n", index, FIRST_EXTRA_FIELD)))
        }

        Ok(FieldConfig::new(index, &column.to_upper_camel_case(), column))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use super::*;

    #[rstest]
    #[case("4:tolerance", FieldConfig::new(4, "Tolerance", "tolerance"))]
    #[case("7:part_number", FieldConfig::new(7, "PartNumber", "part_number"))]
    #[case(" 12 : mpn ", FieldConfig::new(12, "Mpn", "mpn"))]
    fn parse(#[case] value: &str, #[case] expected: FieldConfig) {
        // given
        let cmd = Command::new("test");

        // when
        let result = FieldMappingParser::default().parse_ref(&cmd, None, OsStr::new(value));

        // then
        assert_eq!(result.unwrap(), expected);
    }

    #[rstest]
    #[case("tolerance")]
    #[case("4:")]
    #[case("4:a:b")]
    #[case("x:tolerance")]
    #[case("2:footprint")]
    fn parse_invalid(#[case] value: &str) {
        // given
        let cmd = Command::new("test");

        // when
        let result = FieldMappingParser::default().parse_ref(&cmd, None, OsStr::new(value));

        // then
        assert!(result.is_err());
    }
}
