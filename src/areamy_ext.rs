//! areamy error integration
//!
//! This module provides conversions from npycodec errors to areamy's AnyErr trait.
//!
//! Enable with the `areamy` feature flag.

use crate::error::{Error, FormatError};
use areamy::error::AnyErr;

impl AnyErr for Error {}

impl From<Error> for Box<dyn AnyErr> {
    fn from(value: Error) -> Self {
        Box::new(value)
    }
}

impl AnyErr for FormatError {}

impl From<FormatError> for Box<dyn AnyErr> {
    fn from(value: FormatError) -> Self {
        Box::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScalarType;

    #[test]
    fn error_to_anyerr() {
        let err = Error::TypeMismatch {
            expected: ScalarType::F32,
            found: "<f8".parse().unwrap(),
        };

        let boxed: Box<dyn AnyErr> = err.into();
        assert!(boxed.to_string().contains("Type mismatch"));
    }

    #[test]
    fn format_error_to_anyerr() {
        let boxed: Box<dyn AnyErr> = FormatError::MissingKey("descr").into();
        assert!(boxed.to_string().contains("descr"));
    }
}
