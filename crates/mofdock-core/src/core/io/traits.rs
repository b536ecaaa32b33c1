use crate::core::models::structure::AtomicStructure;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing structure file formats.
///
/// Implementors only provide the reader/writer pair; path handling and
/// metadata-free writing come for free.
pub trait StructureFile {
    /// Format-specific data that is not part of the structure itself
    /// (comment lines, titles, extra columns).
    type Metadata: Default;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a structure from a buffered reader.
    ///
    /// # Return
    ///
    /// Returns the parsed structure and associated metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(AtomicStructure, Self::Metadata), Self::Error>;

    /// Writes a structure and metadata to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails or I/O operations encounter issues.
    fn write_to(
        structure: &AtomicStructure,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Writes a structure with default metadata.
    fn write_structure_to(
        structure: &AtomicStructure,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        Self::write_to(structure, &Self::Metadata::default(), writer)
    }

    fn read_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<(AtomicStructure, Self::Metadata), Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes a structure and metadata to a new file, replacing any existing one.
    fn write_to_path<P: AsRef<Path>>(
        structure: &AtomicStructure,
        metadata: &Self::Metadata,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(structure, metadata, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
