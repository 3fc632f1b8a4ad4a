//! Slice-level verification of one file.

use log::warn;

use crate::checksum;
use crate::domain::FileId;
use crate::recovery_set::RecoverySet;
use crate::source::DataSource;

use super::error::VerifyError;

/// Verify one file's content against its stored per-slice checksums.
///
/// Returns the ascending indices of slices whose MD5 does not match. Slice
/// `i` covers the slice-size bytes at offset `i * slice_size`; whatever the
/// source does not yield there is hashed as zero bytes, so a source that
/// stops inside the final slice's padding region still verifies clean.
///
/// The set must hold a description and a checksum list for `file_id`, and
/// a slice size; anything missing is an error, never a silent pass. An i/o
/// failure aborts this file's verification only.
pub fn verify_file<S: DataSource + ?Sized>(
    set: &RecoverySet,
    file_id: FileId,
    source: &mut S,
) -> Result<Vec<usize>, VerifyError> {
    let description = set
        .file(file_id)
        .ok_or(VerifyError::MissingDescription(file_id))?;
    let stored = set
        .checksums(file_id)
        .ok_or(VerifyError::MissingChecksums(file_id))?;
    if set.slice_size == 0 {
        return Err(VerifyError::ZeroSliceSize);
    }

    let expected_slices = description.length.div_ceil(set.slice_size) as usize;
    if expected_slices != stored.slices.len() {
        warn!(
            "{}: {} bytes imply {} slices but {} checksums are stored; verifying the stored ones",
            description.name,
            description.length,
            expected_slices,
            stored.slices.len()
        );
    }

    let slice_size = set.slice_size as usize;
    let mut buf = vec![0u8; slice_size];
    let mut corrupt = Vec::new();

    for (index, expected) in stored.slices.iter().enumerate() {
        let offset = index as u64 * set.slice_size;
        let filled = source.read_at(offset, &mut buf)?;
        buf[filled..].fill(0);
        if checksum::compute_md5(&buf) != expected.md5 {
            corrupt.push(index);
        }
    }

    Ok(corrupt)
}
