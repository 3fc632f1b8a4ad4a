//! Result types for verification.

use crate::domain::FileId;

use super::error::VerifyError;

/// Outcome of one file's verification job.
///
/// `Ok` carries the ascending indices of corrupt slices; empty means every
/// checksummed slice matched. `Err` means verification itself could not
/// run or finish for this file.
#[derive(Debug)]
pub struct VerifyOutcome {
    pub file_id: FileId,
    pub result: Result<Vec<usize>, VerifyError>,
}

impl VerifyOutcome {
    /// True when verification ran and found every slice intact.
    pub fn is_clean(&self) -> bool {
        matches!(&self.result, Ok(corrupt) if corrupt.is_empty())
    }
}
