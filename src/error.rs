//! Error types for npycodec

use crate::types::{ScalarType, TypeDescriptor, Version};
use parsicomb::ParsicombError;
use std::error::Error as StdError;
use std::fmt;
use std::io;

/// Descriptor token outside the supported set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedType {
    token: String,
}

impl UnsupportedType {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The offending token, as found in the file
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Display for UnsupportedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unsupported dtype: {:?}", self.token)
    }
}

impl StdError for UnsupportedType {}

/// Reasons a byte sequence is not a valid array file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// First six bytes are not the magic sequence
    InvalidMagic([u8; 6]),
    /// Major version other than 1 or 2
    UnsupportedVersion { major: u8, minor: u8 },
    /// Input ended inside the named section
    UnexpectedEof { section: &'static str },
    /// Malformed header dictionary text
    Syntax(String),
    MissingKey(&'static str),
    DuplicateKey(String),
    UnknownKey(String),
    /// Key present with a value of the wrong form
    InvalidValue { key: &'static str, found: String },
    UnsupportedType(UnsupportedType),
    /// Element count or byte size does not fit in memory
    ShapeOverflow(Vec<u64>),
    /// Data section length differs from what the header declares
    DataSizeMismatch { expected: u64, actual: u64 },
    /// Dictionary too long for the version's length field
    HeaderTooLong { len: usize, version: Version },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::InvalidMagic(found) => {
                write!(f, "Invalid magic bytes {:02X?}, not a NumPy array file", found)
            }
            FormatError::UnsupportedVersion { major, minor } => {
                write!(f, "Unsupported format version: {}.{}", major, minor)
            }
            FormatError::UnexpectedEof { section } => {
                write!(f, "Unexpected end of input in {}", section)
            }
            FormatError::Syntax(message) => write!(f, "Malformed header: {}", message),
            FormatError::MissingKey(key) => write!(f, "Header is missing key '{}'", key),
            FormatError::DuplicateKey(key) => write!(f, "Header repeats key '{}'", key),
            FormatError::UnknownKey(key) => write!(f, "Header has unknown key '{}'", key),
            FormatError::InvalidValue { key, found } => {
                write!(f, "Header key '{}' has invalid value {}", key, found)
            }
            FormatError::UnsupportedType(e) => write!(f, "{}", e),
            FormatError::ShapeOverflow(shape) => {
                write!(f, "Shape {:?} overflows addressable memory", shape)
            }
            FormatError::DataSizeMismatch { expected, actual } => {
                write!(
                    f,
                    "Data size mismatch: expected {} bytes, got {}",
                    expected, actual
                )
            }
            FormatError::HeaderTooLong { len, version } => {
                write!(
                    f,
                    "Header of {} bytes does not fit format version {}",
                    len, version
                )
            }
        }
    }
}

impl StdError for FormatError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            FormatError::UnsupportedType(e) => Some(e),
            _ => None,
        }
    }
}

impl From<UnsupportedType> for FormatError {
    fn from(e: UnsupportedType) -> Self {
        FormatError::UnsupportedType(e)
    }
}

impl<'a> From<ParsicombError<'a>> for FormatError {
    fn from(e: ParsicombError<'a>) -> Self {
        FormatError::Syntax(e.to_string())
    }
}

/// npycodec error type
#[derive(Debug)]
pub enum Error {
    InvalidFormat(FormatError),
    /// On-disk element type differs from the destination's
    TypeMismatch {
        expected: ScalarType,
        found: TypeDescriptor,
    },
    /// File shape does not fit the destination
    DimensionMismatch { expected: Vec<u64>, found: Vec<u64> },
    /// Archive has no entry with this name
    MissingEntry(String),
    /// Failure in the archive container itself
    Archive(String),
    Io(io::Error),
}

impl Error {
    /// The unsupported descriptor, if that is what failed
    pub fn unsupported_type(&self) -> Option<&UnsupportedType> {
        match self {
            Error::InvalidFormat(FormatError::UnsupportedType(e)) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidFormat(e) => write!(f, "{}", e),
            Error::TypeMismatch { expected, found } => write!(
                f,
                "Type mismatch: destination holds {}, file holds '{}'",
                expected, found
            ),
            Error::DimensionMismatch { expected, found } => write!(
                f,
                "Dimension mismatch: expected shape {:?}, found {:?}",
                expected, found
            ),
            Error::MissingEntry(name) => write!(f, "No archive entry named {:?}", name),
            Error::Archive(message) => write!(f, "Archive error: {}", message),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::InvalidFormat(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FormatError> for Error {
    fn from(e: FormatError) -> Self {
        Error::InvalidFormat(e)
    }
}

impl From<UnsupportedType> for Error {
    fn from(e: UnsupportedType) -> Self {
        Error::InvalidFormat(FormatError::UnsupportedType(e))
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
