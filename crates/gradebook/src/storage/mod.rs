//! Storage layer for gradebook.
//!
//! This module provides the flat-file record store: the whole collection is
//! read once at the start of a session and rewritten in full after every
//! mutation. The in-memory helpers below (`find_by_id`, `add`,
//! `delete_by_id`) operate on the loaded sequence and never touch the disk;
//! callers persist with [`RecordStore::save`].

pub mod atomic;

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Terminator, WriterBuilder};
use tracing::{debug, info};

use crate::codec::{self, DelimitedScoreCodec, ScoreCodec};
use crate::error::{Error, Result};
use crate::record::StudentRecord;

/// A CSV file holding every student record, one row each.
///
/// No header row is written. The store is generic over the score
/// sub-encoding so it can be swapped without changing the row layout.
#[derive(Debug)]
pub struct RecordStore<C: ScoreCodec = DelimitedScoreCodec> {
    /// Path to the backing file.
    path: PathBuf,
    /// Encoding for the scores column.
    codec: C,
    /// Replace the file through a temporary file and rename.
    atomic: bool,
}

impl RecordStore {
    /// Create a store backed by the given path with the default score encoding.
    ///
    /// Nothing is read or created until [`load`](Self::load) or
    /// [`save`](Self::save) is called.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_codec(path, DelimitedScoreCodec)
    }
}

impl<C: ScoreCodec> RecordStore<C> {
    /// Create a store with a specific score encoding.
    #[must_use]
    pub fn with_codec(path: impl AsRef<Path>, codec: C) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            codec,
            atomic: true,
        }
    }

    /// Choose whether saves go through a temporary file (the default).
    #[must_use]
    pub fn atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    /// Get the path to the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record from the backing file.
    ///
    /// A missing file is an empty store. Rows with an empty id or a stray
    /// header id are skipped, as are blank lines.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataFileRead`] if the file exists but cannot be read
    /// as CSV.
    pub fn load(&self) -> Result<Vec<StudentRecord>> {
        if !self.path.exists() {
            debug!("No data file at {}, starting empty", self.path.display());
            return Ok(Vec::new());
        }

        let read_err = |source: csv::Error| Error::DataFileRead {
            path: self.path.clone(),
            source,
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .map_err(read_err)?;

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for row in reader.records() {
            let row = row.map_err(read_err)?;
            match codec::decode_row(&row, &self.codec) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }

        debug!(
            "Loaded {} records from {} ({} rows skipped)",
            records.len(),
            self.path.display(),
            skipped
        );
        Ok(records)
    }

    /// Overwrite the backing file with `records`, in order.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the file cannot be written.
    pub fn save(&self, records: &[StudentRecord]) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::CRLF)
            .from_writer(Vec::new());
        for record in records {
            writer.write_record(codec::encode_row(record, &self.codec))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        if self.atomic {
            atomic::write_atomic(&self.path, &bytes)?;
        } else {
            atomic::write_in_place(&self.path, &bytes)?;
        }

        debug!("Saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

/// Find the first record with exactly this id.
#[must_use]
pub fn find_by_id<'a>(
    records: &'a [StudentRecord],
    id: &str,
) -> Option<(usize, &'a StudentRecord)> {
    records.iter().enumerate().find(|(_, r)| r.id == id)
}

/// Mutable variant of [`find_by_id`].
pub fn find_by_id_mut<'a>(
    records: &'a mut [StudentRecord],
    id: &str,
) -> Option<&'a mut StudentRecord> {
    records.iter_mut().find(|r| r.id == id)
}

/// Append a record unless its id is already taken.
///
/// # Errors
///
/// Returns [`Error::DuplicateId`] and leaves `records` untouched if a record
/// with the same id exists.
pub fn add(records: &mut Vec<StudentRecord>, record: StudentRecord) -> Result<()> {
    if find_by_id(records, &record.id).is_some() {
        return Err(Error::duplicate_id(record.id));
    }
    info!("Adding student {}", record.id);
    records.push(record);
    Ok(())
}

/// Remove the record with this id, reporting whether anything was removed.
pub fn delete_by_id(records: &mut Vec<StudentRecord>, id: &str) -> bool {
    match find_by_id(records, id) {
        Some((index, _)) => {
            records.remove(index);
            info!("Deleted student {}", id);
            true
        }
        None => false,
    }
}
