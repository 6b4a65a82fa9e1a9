//! Header constants and structure

use super::TypeDescriptor;
use crate::error::FormatError;
use std::fmt;

/// Magic bytes identifying an array file
pub const MAGIC: &[u8; 6] = b"\x93NUMPY";

/// The data section of a written file starts at a multiple of this
pub const ALIGNMENT: usize = 16;

/// Format version stored after the magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    major: u8,
    minor: u8,
}

impl Version {
    pub const V1_0: Version = Version { major: 1, minor: 0 };
    pub const V2_0: Version = Version { major: 2, minor: 0 };

    /// Only major versions 1 and 2 are recognized
    pub fn new(major: u8, minor: u8) -> Result<Self, FormatError> {
        match major {
            1 | 2 => Ok(Self { major, minor }),
            _ => Err(FormatError::UnsupportedVersion { major, minor }),
        }
    }

    pub fn major(self) -> u8 {
        self.major
    }

    pub fn minor(self) -> u8 {
        self.minor
    }

    /// Size in bytes of the header-length field
    pub fn length_field_size(self) -> usize {
        if self.major == 1 { 2 } else { 4 }
    }

    /// Largest dictionary length the length field can express
    pub fn max_header_len(self) -> usize {
        if self.major == 1 {
            u16::MAX as usize
        } else {
            u32::MAX as usize
        }
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::V2_0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Parsed array header. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    version: Version,
    descr: TypeDescriptor,
    fortran_order: bool,
    shape: Vec<u64>,
}

impl Header {
    /// New header at the latest supported version (2.0)
    pub fn new(descr: TypeDescriptor, fortran_order: bool, shape: Vec<u64>) -> Self {
        Self {
            version: Version::default(),
            descr,
            fortran_order,
            shape,
        }
    }

    pub fn with_version(self, version: Version) -> Self {
        Self { version, ..self }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn descr(&self) -> TypeDescriptor {
        self.descr
    }

    pub fn fortran_order(&self) -> bool {
        self.fortran_order
    }

    pub fn shape(&self) -> &[u64] {
        &self.shape
    }

    /// Product of the shape; 1 for a scalar
    pub fn element_count(&self) -> Result<usize, FormatError> {
        self.shape
            .iter()
            .try_fold(1u64, |acc, &dim| acc.checked_mul(dim))
            .and_then(|count| usize::try_from(count).ok())
            .ok_or_else(|| FormatError::ShapeOverflow(self.shape.clone()))
    }

    /// Size in bytes of the data section
    pub fn data_len(&self) -> Result<usize, FormatError> {
        self.element_count()?
            .checked_mul(self.descr.width())
            .ok_or_else(|| FormatError::ShapeOverflow(self.shape.clone()))
    }

    pub(crate) fn shape_usize(&self) -> Result<Vec<usize>, FormatError> {
        self.shape
            .iter()
            .map(|&dim| usize::try_from(dim))
            .collect::<Result<_, _>>()
            .map_err(|_| FormatError::ShapeOverflow(self.shape.clone()))
    }
}

/// Python-style shape tuple: `()`, `(3,)`, `(2, 3)`
pub(crate) fn shape_literal(shape: &[u64]) -> String {
    match shape {
        [] => "()".to_string(),
        [single] => format!("({},)", single),
        dims => {
            let parts: Vec<String> = dims.iter().map(u64::to_string).collect();
            format!("({})", parts.join(", "))
        }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Header {{ version: {}, descr: '{}', fortran_order: {}, shape: {} }}",
            self.version,
            self.descr,
            self.fortran_order,
            shape_literal(&self.shape)
        )
    }
}
