//! Integration tests for ndarray support
//!
//! These tests move ndarray values through .npy files and archives.

#![cfg(feature = "ndarray")]

use ndarray::{ArrayD, IxDyn, ShapeBuilder, array, s};
use npycodec::{Archive, Array, Error, MemoryArchive, read_ndarray, to_bytes, write_ndarray};

// =============================================================================
// Basic ndarray roundtrips
// =============================================================================

#[test]
fn roundtrip_ndarray_1d() {
    let arr = array![1.0f32, 2.0, 3.0, 4.0, 5.0];
    let mut bytes = Vec::new();
    write_ndarray(&mut bytes, &arr).unwrap();

    let back: ArrayD<f32> = read_ndarray(&mut bytes.as_slice()).unwrap();
    assert_eq!(arr.into_dyn(), back);
}

#[test]
fn roundtrip_ndarray_3d_tensor() {
    let tensor = ArrayD::<i32>::from_shape_fn(IxDyn(&[2, 3, 4]), |idx| {
        (idx[0] * 12 + idx[1] * 4 + idx[2]) as i32
    });
    let mut bytes = Vec::new();
    write_ndarray(&mut bytes, &tensor).unwrap();

    let back: ArrayD<i32> = read_ndarray(&mut bytes.as_slice()).unwrap();
    assert_eq!(tensor, back);
}

// =============================================================================
// Layouts
// =============================================================================

#[test]
fn non_contiguous_views_are_written_logically() {
    let matrix = array![[1u8, 2, 3], [4, 5, 6], [7, 8, 9]];
    let column = matrix.slice(s![.., 1]);
    let transposed = matrix.t();

    let mut bytes = Vec::new();
    write_ndarray(&mut bytes, &column).unwrap();
    let back: ArrayD<u8> = read_ndarray(&mut bytes.as_slice()).unwrap();
    assert_eq!(back, array![2u8, 5, 8].into_dyn());

    let mut bytes = Vec::new();
    write_ndarray(&mut bytes, &transposed).unwrap();
    let back: ArrayD<u8> = read_ndarray(&mut bytes.as_slice()).unwrap();
    assert_eq!(back, transposed.to_owned().into_dyn());
}

#[test]
fn fortran_array_keeps_values() {
    let fortran = ArrayD::from_shape_vec(IxDyn(&[2, 3]).f(), vec![1.0f64, 4.0, 2.0, 5.0, 3.0, 6.0])
        .unwrap();
    let converted = Array::from_ndarray(&fortran);
    let bytes = npycodec::writer::array_to_bytes(&converted).unwrap();

    let back: ArrayD<f64> = read_ndarray(&mut bytes.as_slice()).unwrap();
    assert_eq!(back, array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]].into_dyn());
}

#[test]
fn fortran_file_loads_logically() {
    let mut bytes = npycodec::MAGIC.to_vec();
    let dict = "{'descr': '<i2', 'fortran_order': True, 'shape': (2, 2), }\n";
    bytes.extend_from_slice(&[1, 0]);
    bytes.extend_from_slice(&(dict.len() as u16).to_le_bytes());
    bytes.extend_from_slice(dict.as_bytes());
    for v in [1i16, 3, 2, 4] {
        bytes.extend_from_slice(&v.to_le_bytes());
    }

    let back: ArrayD<i16> = read_ndarray(&mut bytes.as_slice()).unwrap();
    assert_eq!(back, array![[1i16, 2], [3, 4]].into_dyn());
}

// =============================================================================
// Model weights in an archive
// =============================================================================

#[test]
fn layer_weights_archive() {
    let weights = ArrayD::<f32>::from_shape_fn(IxDyn(&[64, 128]), |idx| {
        ((idx[0] * 128 + idx[1]) as f32) * 0.01
    });
    let bias = ArrayD::<f32>::zeros(IxDyn(&[64]));

    let mut archive = MemoryArchive::new();
    archive.add_array("weights", &Array::from_ndarray(&weights)).unwrap();
    archive.add_array("bias", &Array::from_ndarray(&bias)).unwrap();
    archive.add("epoch", &12u32).unwrap();

    let weights_back: ArrayD<f32> = archive.read_array("weights").unwrap().to_ndarray().unwrap();
    assert_eq!(weights, weights_back);
    assert_eq!(weights_back.shape(), &[64, 128]);

    let bias_back: ArrayD<f32> = archive.read_array("bias").unwrap().to_ndarray().unwrap();
    assert!(bias_back.iter().all(|&v| v == 0.0));
}

#[test]
fn wrong_element_type() {
    let bytes = to_bytes(&vec![1i64, 2, 3]).unwrap();
    let result = read_ndarray::<i32, _>(&mut bytes.as_slice());
    assert!(matches!(result, Err(Error::TypeMismatch { .. })));
}
