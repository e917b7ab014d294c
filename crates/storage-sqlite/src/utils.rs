//! Small conversion helpers shared by the repository model types.

use rust_decimal::Decimal;
use std::str::FromStr;
use tripfolio_core::errors::{Error, Result, ValidationError};

/// Parses a TEXT-encoded monetary column.
pub fn parse_decimal(value: &str) -> Result<Decimal> {
    Decimal::from_str(value).map_err(|e| {
        Error::Validation(ValidationError::InvalidInput(format!(
            "Invalid decimal '{}': {}",
            value, e
        )))
    })
}

/// Parses an optional TEXT-encoded monetary column.
pub fn parse_opt_decimal(value: Option<&str>) -> Result<Option<Decimal>> {
    value.map(parse_decimal).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("12.34").unwrap(), dec!(12.34));
        assert_eq!(parse_decimal("-0.5").unwrap(), dec!(-0.5));
        assert!(parse_decimal("twelve").is_err());
    }

    #[test]
    fn test_parse_opt_decimal() {
        assert_eq!(parse_opt_decimal(None).unwrap(), None);
        assert_eq!(parse_opt_decimal(Some("7")).unwrap(), Some(dec!(7)));
    }
}
