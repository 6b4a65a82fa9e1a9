//! Named collections of independent array files
//!
//! Each entry is a complete array file and is decoded on its own, so a bad
//! entry never affects its siblings.

#[cfg(feature = "npz")]
mod npz;

#[cfg(feature = "npz")]
pub use npz::{NpzReader, NpzWriter};

use crate::error::Error;
use crate::parser;
use crate::types::{Array, Destination, Header, Source};
use crate::writer;
use std::collections::BTreeMap;
use std::io::Read;
use tracing::debug;

/// Container of array files addressed by name
pub trait Archive {
    /// Entry names, sorted
    fn entry_names(&self) -> Vec<String>;

    /// Open an entry as a byte stream. Fails with `MissingEntry` when absent.
    fn open_entry(&mut self, name: &str) -> Result<Box<dyn Read + '_>, Error>;

    fn read_header(&mut self, name: &str) -> Result<Header, Error> {
        debug!(entry = name, "reading archive entry header");
        let mut entry = self.open_entry(name)?;
        parser::read_header(&mut *entry)
    }

    fn read_into<D: Destination + ?Sized>(
        &mut self,
        name: &str,
        destination: &mut D,
    ) -> Result<(), Error>
    where
        Self: Sized,
    {
        debug!(entry = name, "reading archive entry");
        let mut entry = self.open_entry(name)?;
        parser::read_into(&mut *entry, destination)
    }

    fn read_array(&mut self, name: &str) -> Result<Array, Error> {
        debug!(entry = name, "reading archive entry");
        let mut entry = self.open_entry(name)?;
        parser::read_array(&mut *entry)
    }
}

/// Archive held entirely in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryArchive {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode `source` and store it under `name`, replacing any previous entry
    pub fn add<S: Source + ?Sized>(&mut self, name: &str, source: &S) -> Result<(), Error> {
        let bytes = writer::to_bytes(source)?;
        self.insert_raw(name, bytes);
        Ok(())
    }

    pub fn add_array(&mut self, name: &str, array: &Array) -> Result<(), Error> {
        let bytes = writer::array_to_bytes(array)?;
        self.insert_raw(name, bytes);
        Ok(())
    }

    /// Store already encoded file bytes. They are not validated.
    pub fn insert_raw(&mut self, name: &str, bytes: Vec<u8>) {
        self.entries.insert(name.to_string(), bytes);
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Archive for MemoryArchive {
    fn entry_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn open_entry(&mut self, name: &str) -> Result<Box<dyn Read + '_>, Error> {
        let bytes = self
            .entries
            .get(name)
            .ok_or_else(|| Error::MissingEntry(name.to_string()))?;
        Ok(Box::new(bytes.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;
    use crate::types::{ArrayData, MAGIC};

    fn unicode_entry() -> Vec<u8> {
        let dict = "{'descr': '<U8', 'fortran_order': False, 'shape': (1,), }\n";
        let mut bytes = MAGIC.to_vec();
        bytes.extend_from_slice(&[1, 0]);
        bytes.extend_from_slice(&(dict.len() as u16).to_le_bytes());
        bytes.extend_from_slice(dict.as_bytes());
        bytes.extend_from_slice(&[0u8; 32]);
        bytes
    }

    #[test]
    fn entries_are_sorted() {
        let mut archive = MemoryArchive::new();
        archive.add("weights", &vec![1.0f32, 2.0]).unwrap();
        archive.add("bias", &0.5f32).unwrap();
        assert_eq!(archive.entry_names(), vec!["bias", "weights"]);
        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn read_entries_independently() {
        let mut archive = MemoryArchive::new();
        archive.add("a", &[1i32, 2, 3]).unwrap();
        archive.insert_raw("bad", unicode_entry());
        archive.add("c", &true).unwrap();

        let err = archive.read_array("bad").unwrap_err();
        assert_eq!(err.unsupported_type().map(|e| e.token()), Some("<U8"));

        let mut a: Vec<i32> = Vec::new();
        archive.read_into("a", &mut a).unwrap();
        assert_eq!(a, vec![1, 2, 3]);

        let c = archive.read_array("c").unwrap();
        assert!(c.shape().is_empty());
        assert_eq!(*c.data(), ArrayData::Bool(vec![true]));
    }

    #[test]
    fn missing_entry() {
        let mut archive = MemoryArchive::new();
        assert!(matches!(
            archive.read_header("nope"),
            Err(Error::MissingEntry(name)) if name == "nope"
        ));
    }

    #[test]
    fn corrupt_entry_is_invalid_format() {
        let mut archive = MemoryArchive::new();
        archive.insert_raw("junk", b"not an array".to_vec());
        assert!(matches!(
            archive.read_header("junk"),
            Err(Error::InvalidFormat(FormatError::InvalidMagic(_)))
        ));
    }

    #[test]
    fn usable_as_trait_object() {
        let mut archive = MemoryArchive::new();
        archive.add("x", &7u8).unwrap();
        let dynamic: &mut dyn Archive = &mut archive;
        assert_eq!(dynamic.read_header("x").unwrap().descr().to_string(), "|u1");
    }
}
