//! npycodec - Reader and writer for the NumPy `.npy` array format
//!
//! Decodes `.npy` files into typed Rust containers and encodes Rust values
//! back into files NumPy can load.
//!
//! # Features
//!
//! - Strict typing: the on-disk element type must match the destination exactly
//! - Row-major and column-major (Fortran order) files, with logical transposes
//! - Big- and little-endian data, always written little-endian
//! - Scalars, vectors, fixed-size arrays and 2-D matrices as destinations
//! - Named archives, including zip-backed `.npz` files (`npz` feature)
//! - ndarray conversions (`ndarray` feature)
//!
//! # Example
//!
//! ```rust
//! use npycodec::{Error, Layout, Matrix};
//!
//! let m = Matrix::from_rows(&[vec![1.0f64, 2.0, 3.0], vec![4.0, 5.0, 6.0]])?;
//! let bytes = npycodec::to_bytes(&m)?;
//!
//! let mut back: Matrix<f64> = Matrix::empty(Layout::ColumnMajor);
//! npycodec::from_bytes(&bytes, &mut back)?;
//! assert_eq!(back.row(1), Some(vec![4.0, 5.0, 6.0]));
//!
//! // no implicit conversions
//! let mut ints: Vec<i32> = Vec::new();
//! let result = npycodec::from_bytes(&bytes, &mut ints);
//! assert!(matches!(result, Err(Error::TypeMismatch { .. })));
//! # Ok::<(), Error>(())
//! ```

pub mod archive;
pub mod dump;
pub mod error;
pub mod parser;
pub mod types;
pub mod writer;

#[cfg(feature = "ndarray")]
pub mod ndarray_ext;

#[cfg(feature = "areamy")]
pub mod areamy_ext;

// Re-export common types at crate root
pub use archive::{Archive, MemoryArchive};
pub use dump::{dump, dump_archive, dump_bytes};
pub use error::{Error, FormatError, UnsupportedType};
pub use parser::{from_bytes, parse_header, read_array, read_header, read_into};
pub use types::{
    ALIGNMENT, Array, ArrayData, ByteOrder, Destination, Element, Header, Kind, Layout, MAGIC,
    Matrix, ScalarType, Source, SourceView, Target, TypeDescriptor, Version, type_descriptor_of,
};
pub use writer::{WriteOptions, to_bytes, write, write_with};

#[cfg(feature = "npz")]
pub use archive::{NpzReader, NpzWriter};

#[cfg(feature = "ndarray")]
pub use ndarray_ext::{read_ndarray, write_ndarray};
