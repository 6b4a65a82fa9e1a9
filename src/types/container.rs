//! In-memory containers the marshaler reads into and writes from

use super::{Element, Matrix};
use num_complex::{Complex32, Complex64};

/// Destination of a decode, by shape variant
#[derive(Debug)]
pub enum Target<'d, T> {
    /// Accepts only a scalar (empty-shape) file
    Scalar(&'d mut T),
    /// Resized to the file's element count
    Growable(&'d mut Vec<T>),
    /// Element count must match the file's
    Fixed(&'d mut [T]),
    /// 2-D file, transposed as needed for the matrix layout
    Matrix(&'d mut Matrix<T>),
}

/// A value that can be filled from an array file
pub trait Destination {
    type Elem: Element;

    fn target(&mut self) -> Target<'_, Self::Elem>;
}

/// Source of an encode, by shape variant
#[derive(Debug, Clone, Copy)]
pub enum SourceView<'s, T> {
    Scalar(T),
    Flat(&'s [T]),
    Matrix(&'s Matrix<T>),
}

/// A value that can be written as an array file
pub trait Source {
    type Elem: Element;

    fn view(&self) -> SourceView<'_, Self::Elem>;
}

macro_rules! impl_scalar_containers {
    ($($t:ty),* $(,)?) => {
        $(
            impl Destination for $t {
                type Elem = $t;

                fn target(&mut self) -> Target<'_, $t> {
                    Target::Scalar(self)
                }
            }

            impl Source for $t {
                type Elem = $t;

                fn view(&self) -> SourceView<'_, $t> {
                    SourceView::Scalar(*self)
                }
            }
        )*
    };
}

impl_scalar_containers!(
    bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, Complex32, Complex64,
);

impl<T: Element> Destination for Vec<T> {
    type Elem = T;

    fn target(&mut self) -> Target<'_, T> {
        Target::Growable(self)
    }
}

impl<T: Element> Destination for [T] {
    type Elem = T;

    fn target(&mut self) -> Target<'_, T> {
        Target::Fixed(self)
    }
}

impl<T: Element, const N: usize> Destination for [T; N] {
    type Elem = T;

    fn target(&mut self) -> Target<'_, T> {
        Target::Fixed(self.as_mut_slice())
    }
}

impl<T: Element> Destination for Matrix<T> {
    type Elem = T;

    fn target(&mut self) -> Target<'_, T> {
        Target::Matrix(self)
    }
}

impl<T: Element> Source for Vec<T> {
    type Elem = T;

    fn view(&self) -> SourceView<'_, T> {
        SourceView::Flat(self)
    }
}

impl<T: Element> Source for [T] {
    type Elem = T;

    fn view(&self) -> SourceView<'_, T> {
        SourceView::Flat(self)
    }
}

impl<T: Element, const N: usize> Source for [T; N] {
    type Elem = T;

    fn view(&self) -> SourceView<'_, T> {
        SourceView::Flat(self.as_slice())
    }
}

impl<T: Element> Source for Matrix<T> {
    type Elem = T;

    fn view(&self) -> SourceView<'_, T> {
        SourceView::Matrix(self)
    }
}
