//! Element type descriptors (`<f8`, `|b1`, `>i4`, ...)

use crate::error::UnsupportedType;
use std::fmt;
use std::str::FromStr;

/// Byte order marker of a descriptor token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// `<`
    Little,
    /// `>`
    Big,
    /// `=`
    Native,
    /// `|`, only meaningful for 1-byte elements
    NotApplicable,
}

impl ByteOrder {
    pub fn marker(self) -> char {
        match self {
            ByteOrder::Little => '<',
            ByteOrder::Big => '>',
            ByteOrder::Native => '=',
            ByteOrder::NotApplicable => '|',
        }
    }

    pub fn from_marker(marker: u8) -> Option<Self> {
        match marker {
            b'<' => Some(ByteOrder::Little),
            b'>' => Some(ByteOrder::Big),
            b'=' => Some(ByteOrder::Native),
            b'|' => Some(ByteOrder::NotApplicable),
            _ => None,
        }
    }

    /// Whether multi-byte elements in this order are stored little-endian
    /// on the running machine.
    pub fn is_little_endian(self) -> bool {
        match self {
            ByteOrder::Little => true,
            ByteOrder::Big => false,
            ByteOrder::Native | ByteOrder::NotApplicable => cfg!(target_endian = "little"),
        }
    }
}

/// Element kind of a descriptor token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    SignedInt,
    UnsignedInt,
    Float,
    Complex,
}

impl Kind {
    pub fn letter(self) -> char {
        match self {
            Kind::Bool => 'b',
            Kind::SignedInt => 'i',
            Kind::UnsignedInt => 'u',
            Kind::Float => 'f',
            Kind::Complex => 'c',
        }
    }

    pub fn from_letter(letter: u8) -> Option<Self> {
        match letter {
            b'b' => Some(Kind::Bool),
            b'i' => Some(Kind::SignedInt),
            b'u' => Some(Kind::UnsignedInt),
            b'f' => Some(Kind::Float),
            b'c' => Some(Kind::Complex),
            _ => None,
        }
    }
}

/// Closed set of in-memory scalar types the codec can marshal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Complex32,
    Complex64,
}

/// The one table mapping scalar types to `(kind, width)` pairs. Every
/// supported descriptor appears here exactly once.
const SCALAR_TABLE: [(ScalarType, Kind, u8); 13] = [
    (ScalarType::Bool, Kind::Bool, 1),
    (ScalarType::I8, Kind::SignedInt, 1),
    (ScalarType::I16, Kind::SignedInt, 2),
    (ScalarType::I32, Kind::SignedInt, 4),
    (ScalarType::I64, Kind::SignedInt, 8),
    (ScalarType::U8, Kind::UnsignedInt, 1),
    (ScalarType::U16, Kind::UnsignedInt, 2),
    (ScalarType::U32, Kind::UnsignedInt, 4),
    (ScalarType::U64, Kind::UnsignedInt, 8),
    (ScalarType::F32, Kind::Float, 4),
    (ScalarType::F64, Kind::Float, 8),
    (ScalarType::Complex32, Kind::Complex, 8),
    (ScalarType::Complex64, Kind::Complex, 16),
];

impl ScalarType {
    /// All supported scalar types, in table order
    pub fn all() -> impl Iterator<Item = ScalarType> {
        SCALAR_TABLE.iter().map(|(scalar, _, _)| *scalar)
    }

    fn entry(self) -> (Kind, u8) {
        SCALAR_TABLE
            .iter()
            .find(|(scalar, _, _)| *scalar == self)
            .map(|(_, kind, width)| (*kind, *width))
            .unwrap_or((Kind::Bool, 1))
    }

    pub fn kind(self) -> Kind {
        self.entry().0
    }

    /// Size in bytes of a single element
    pub fn width(self) -> usize {
        self.entry().1 as usize
    }

    pub fn from_kind_width(kind: Kind, width: u8) -> Option<Self> {
        SCALAR_TABLE
            .iter()
            .find(|(_, k, w)| *k == kind && *w == width)
            .map(|(scalar, _, _)| *scalar)
    }

    /// Little-endian descriptor for this scalar type
    pub fn descriptor(self) -> TypeDescriptor {
        let (kind, width) = self.entry();
        TypeDescriptor::normalized(ByteOrder::Little, kind, width)
    }

    pub fn name(self) -> &'static str {
        match self {
            ScalarType::Bool => "bool",
            ScalarType::I8 => "i8",
            ScalarType::I16 => "i16",
            ScalarType::I32 => "i32",
            ScalarType::I64 => "i64",
            ScalarType::U8 => "u8",
            ScalarType::U16 => "u16",
            ScalarType::U32 => "u32",
            ScalarType::U64 => "u64",
            ScalarType::F32 => "f32",
            ScalarType::F64 => "f64",
            ScalarType::Complex32 => "Complex32",
            ScalarType::Complex64 => "Complex64",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parsed descriptor token: byte order, kind and element width.
///
/// Only supported `(kind, width)` pairs can be constructed. Width-1
/// descriptors always carry [`ByteOrder::NotApplicable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    byte_order: ByteOrder,
    kind: Kind,
    width: u8,
}

impl TypeDescriptor {
    pub fn new(byte_order: ByteOrder, kind: Kind, width: u8) -> Result<Self, UnsupportedType> {
        let descr = Self::normalized(byte_order, kind, width);
        let misplaced_pipe = byte_order == ByteOrder::NotApplicable && width != 1;
        if misplaced_pipe || ScalarType::from_kind_width(kind, width).is_none() {
            return Err(UnsupportedType::new(descr.token()));
        }
        Ok(descr)
    }

    fn normalized(byte_order: ByteOrder, kind: Kind, width: u8) -> Self {
        let byte_order = if width == 1 {
            ByteOrder::NotApplicable
        } else {
            byte_order
        };
        Self {
            byte_order,
            kind,
            width,
        }
    }

    /// Little-endian descriptor of `T`
    pub fn of<T: super::Element>() -> Self {
        T::SCALAR.descriptor()
    }

    /// Parse a descriptor token such as `<f8`
    pub fn parse(token: &str) -> Result<Self, UnsupportedType> {
        let unsupported = || UnsupportedType::new(token);
        let bytes = token.as_bytes();
        if !(3..=4).contains(&bytes.len()) {
            return Err(unsupported());
        }

        let byte_order = ByteOrder::from_marker(bytes[0]).ok_or_else(unsupported)?;
        let kind = Kind::from_letter(bytes[1]).ok_or_else(unsupported)?;

        let digits = &bytes[2..];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(unsupported());
        }
        let width = digits
            .iter()
            .fold(0u8, |acc, digit| acc * 10 + (digit - b'0'));

        Self::new(byte_order, kind, width).map_err(|_| unsupported())
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Size in bytes of a single element
    pub fn width(&self) -> usize {
        self.width as usize
    }

    /// The in-memory scalar type with the same kind and width
    pub fn scalar_type(&self) -> ScalarType {
        ScalarType::from_kind_width(self.kind, self.width).unwrap_or(ScalarType::Bool)
    }

    /// Same kind and width with a different byte order
    pub fn with_byte_order(self, byte_order: ByteOrder) -> Self {
        Self::normalized(byte_order, self.kind, self.width)
    }

    /// Canonical token, e.g. `<f8` or `|u1`
    pub fn token(&self) -> String {
        format!(
            "{}{}{}",
            self.byte_order.marker(),
            self.kind.letter(),
            self.width
        )
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

impl FromStr for TypeDescriptor {
    type Err = UnsupportedType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeDescriptor::parse(s)
    }
}

/// Little-endian descriptor of the Rust scalar type `T`
pub fn type_descriptor_of<T: super::Element>() -> TypeDescriptor {
    TypeDescriptor::of::<T>()
}
