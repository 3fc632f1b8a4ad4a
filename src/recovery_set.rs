//! Recovery set assembly and the finalized aggregate.
//!
//! Packets merge into the set one at a time through [`RecoverySetBuilder`];
//! `finish` sorts and releases the immutable [`RecoverySet`], so the
//! one-time finalize pass cannot be repeated or forgotten halfway.

use log::debug;
use rustc_hash::FxHashSet;

use crate::domain::{Crc32Value, FileId, Md5Hash, RecoverySetId};
use crate::packets::{MainUpdate, PacketUpdate};

/// Metadata for one member file, from a FileDesc packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescription {
    pub id: FileId,
    /// MD5 of the whole file.
    pub md5: Md5Hash,
    /// MD5 of the first 16 KiB of the file.
    pub md5_16k: Md5Hash,
    pub length: u64,
    pub name: String,
}

/// Per-slice checksums for one member file, from an IFSC packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSliceChecksums {
    pub file_id: FileId,
    /// Position in the sequence is the slice index; slice 0 covers the
    /// first slice-size bytes of the file.
    pub slices: Vec<SliceChecksum>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceChecksum {
    pub md5: Md5Hash,
    pub crc32: Crc32Value,
}

/// The merged view of one recovery stream.
///
/// Produced by [`RecoverySetBuilder::finish`], after which `files` and
/// `slice_checksums` are sorted by id and nothing mutates the set again;
/// it is safe to share read-only across verification workers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecoverySet {
    /// Identity adopted from the first checksum-valid packet, if any.
    pub id: Option<RecoverySetId>,
    pub slice_size: u64,
    /// Declared membership, in Main-packet order.
    pub file_ids: Vec<FileId>,
    pub files: Vec<FileDescription>,
    pub slice_checksums: Vec<FileSliceChecksums>,
}

impl RecoverySet {
    /// Look up a file description by id.
    pub fn file(&self, id: FileId) -> Option<&FileDescription> {
        self.files
            .binary_search_by(|f| f.id.cmp(&id))
            .ok()
            .map(|at| &self.files[at])
    }

    /// Look up a file's slice checksums by id.
    pub fn checksums(&self, id: FileId) -> Option<&FileSliceChecksums> {
        self.slice_checksums
            .binary_search_by(|c| c.file_id.cmp(&id))
            .ok()
            .map(|at| &self.slice_checksums[at])
    }

    /// True when every declared member has both a description and a
    /// checksum list, matched positionally once all three lists are sorted
    /// by id. Verifying against an incomplete set must never be read as a
    /// clean result.
    pub fn is_complete(&self) -> bool {
        if self.file_ids.is_empty() {
            return false;
        }
        if self.files.len() != self.file_ids.len()
            || self.slice_checksums.len() != self.file_ids.len()
        {
            return false;
        }

        let mut declared = self.file_ids.clone();
        declared.sort_unstable();
        declared
            .iter()
            .zip(&self.files)
            .all(|(id, file)| file.id == *id)
            && declared
                .iter()
                .zip(&self.slice_checksums)
                .all(|(id, sums)| sums.file_id == *id)
    }
}

/// Accumulates packet updates during a single forward scan.
#[derive(Debug, Default)]
pub struct RecoverySetBuilder {
    set: RecoverySet,
    seen_descriptions: FxHashSet<FileId>,
    seen_checksums: FxHashSet<FileId>,
}

impl RecoverySetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The identity established so far, if any.
    pub fn set_id(&self) -> Option<RecoverySetId> {
        self.set.id
    }

    /// Record the set identity; only the first adoption sticks.
    pub fn adopt_set_id(&mut self, id: RecoverySetId) {
        self.set.id.get_or_insert(id);
    }

    /// Merge one accepted packet into the set, atomically.
    ///
    /// Main packets overwrite the slice size and membership (last wins);
    /// descriptions and checksum lists only land for ids not seen before
    /// (first wins).
    pub fn apply(&mut self, update: PacketUpdate) {
        match update {
            PacketUpdate::Main(MainUpdate {
                slice_size,
                file_ids,
            }) => {
                self.set.slice_size = slice_size;
                self.set.file_ids = file_ids;
            }
            PacketUpdate::FileDescription(description) => {
                if self.seen_descriptions.insert(description.id) {
                    self.set.files.push(description);
                } else {
                    debug!(
                        "ignoring duplicate description for file {}",
                        description.id.to_hex()
                    );
                }
            }
            PacketUpdate::SliceChecksums(checksums) => {
                if self.seen_checksums.insert(checksums.file_id) {
                    self.set.slice_checksums.push(checksums);
                } else {
                    debug!(
                        "ignoring duplicate slice checksums for file {}",
                        checksums.file_id.to_hex()
                    );
                }
            }
        }
    }

    /// One-time finalize pass: stable-sort both assembled lists by id and
    /// release the set.
    pub fn finish(self) -> RecoverySet {
        let mut set = self.set;
        set.files.sort_by(|a, b| a.id.cmp(&b.id));
        set.slice_checksums.sort_by(|a, b| a.file_id.cmp(&b.file_id));
        set
    }
}
