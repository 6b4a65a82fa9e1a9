//! Core types for the array format

mod array;
mod container;
mod dtype;
mod element;
mod header;
mod matrix;

pub use array::{Array, ArrayData};
pub(crate) use array::check_count;
pub use container::{Destination, Source, SourceView, Target};
pub use dtype::{ByteOrder, Kind, ScalarType, TypeDescriptor, type_descriptor_of};
pub use element::Element;
pub(crate) use element::with_element_type;
pub use header::{ALIGNMENT, Header, MAGIC, Version};
pub(crate) use header::shape_literal;
pub(crate) use matrix::reorder;
pub use matrix::{Layout, Matrix};
