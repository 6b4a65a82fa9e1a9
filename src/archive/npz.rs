//! Zip-backed archives in the layout written by `numpy.savez`

use super::Archive;
use crate::error::Error;
use crate::types::{Array, Source};
use crate::writer::{self, WriteOptions};
use std::io::{Read, Seek, Write};
use tracing::debug;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const SUFFIX: &str = ".npy";

fn archive_error(e: ZipError) -> Error {
    match e {
        ZipError::Io(e) => Error::Io(e),
        other => Error::Archive(other.to_string()),
    }
}

/// Reader for `.npz` files. Entry names are listed without the `.npy` suffix.
pub struct NpzReader<R: Read + Seek> {
    zip: ZipArchive<R>,
}

impl<R: Read + Seek> NpzReader<R> {
    pub fn new(reader: R) -> Result<Self, Error> {
        let zip = ZipArchive::new(reader).map_err(archive_error)?;
        debug!(entries = zip.len(), "opened npz archive");
        Ok(Self { zip })
    }

    pub fn into_inner(self) -> R {
        self.zip.into_inner()
    }
}

impl<R: Read + Seek> Archive for NpzReader<R> {
    fn entry_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .zip
            .file_names()
            .map(|name| name.strip_suffix(SUFFIX).unwrap_or(name).to_string())
            .collect();
        names.sort();
        names
    }

    fn open_entry(&mut self, name: &str) -> Result<Box<dyn Read + '_>, Error> {
        let index = self
            .zip
            .index_for_name(&format!("{name}{SUFFIX}"))
            .or_else(|| self.zip.index_for_name(name))
            .ok_or_else(|| Error::MissingEntry(name.to_string()))?;
        let entry = self.zip.by_index(index).map_err(archive_error)?;
        Ok(Box::new(entry))
    }
}

/// Writer for `.npz` files. Entries are stored uncompressed unless built
/// with [`NpzWriter::compressed`].
pub struct NpzWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    file_options: SimpleFileOptions,
    options: WriteOptions,
}

impl<W: Write + Seek> NpzWriter<W> {
    pub fn new(writer: W) -> Self {
        Self::with_method(writer, CompressionMethod::Stored)
    }

    /// Deflate every entry, as `numpy.savez_compressed` does
    pub fn compressed(writer: W) -> Self {
        Self::with_method(writer, CompressionMethod::Deflated)
    }

    fn with_method(writer: W, method: CompressionMethod) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            file_options: SimpleFileOptions::default().compression_method(method),
            options: WriteOptions::default(),
        }
    }

    pub fn write_options(mut self, options: WriteOptions) -> Self {
        self.options = options;
        self
    }

    /// Encode `source` as entry `name`
    pub fn add<S: Source + ?Sized>(&mut self, name: &str, source: &S) -> Result<(), Error> {
        debug!(entry = name, "adding npz entry");
        self.zip
            .start_file(format!("{name}{SUFFIX}"), self.file_options)
            .map_err(archive_error)?;
        writer::write_with(&mut self.zip, source, self.options)
    }

    pub fn add_array(&mut self, name: &str, array: &Array) -> Result<(), Error> {
        debug!(entry = name, "adding npz entry");
        self.zip
            .start_file(format!("{name}{SUFFIX}"), self.file_options)
            .map_err(archive_error)?;
        writer::write_array(&mut self.zip, array, self.options)
    }

    /// Write the central directory and return the underlying writer
    pub fn finish(self) -> Result<W, Error> {
        self.zip.finish().map_err(archive_error)
    }
}
