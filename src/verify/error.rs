//! Error taxonomy for verification.

use thiserror::Error;

use crate::domain::FileId;

/// Failure verifying one file.
///
/// The first three variants are precondition violations: the recovery set
/// does not hold what verification needs, which must surface rather than
/// read as a clean pass. `Io` is a genuine read failure, distinct from a
/// corruption finding.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("recovery set has no description for file {}", .0.to_hex())]
    MissingDescription(FileId),

    #[error("recovery set has no slice checksums for file {}", .0.to_hex())]
    MissingChecksums(FileId),

    /// No Main packet was accepted, so the slice size is unknown.
    #[error("recovery set declares no slice size")]
    ZeroSliceSize,

    #[error("i/o failure while reading file data: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure bringing up the verification worker pool, distinct from any
/// per-file outcome.
#[derive(Debug, Error)]
#[error("could not start verification workers: {0}")]
pub struct SchedulerError(#[from] rayon::ThreadPoolBuildError);
