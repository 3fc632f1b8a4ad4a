//! Verification of file sets described by PAR2-style recovery streams.
//!
//! A recovery stream is a sequence of self-describing, self-checksummed
//! packets declaring a slice size, a file membership list, per-file
//! metadata and per-slice checksums. [`parse_recovery_set`] scans a stream
//! (resynchronizing across foreign or corrupted byte runs) and merges every
//! accepted packet into one [`RecoverySet`]; [`verify::verify_file`] and
//! [`verify::verify_all`] then check file content against the stored slice
//! checksums. Corruption is detected, never repaired: recovery-slice
//! packets are not consumed here.

pub mod args;
pub mod checksum;
pub mod domain;
pub mod packets;
pub mod recovery_set;
pub mod scanner;
pub mod source;
pub mod verify;

pub use packets::{GateOutcome, MainUpdate, PacketUpdate, ParseError};
pub use recovery_set::{
    FileDescription, FileSliceChecksums, RecoverySet, RecoverySetBuilder, SliceChecksum,
};
pub use source::{DataSource, LazyFileSource};

use std::io::BufRead;

use log::{debug, warn};

/// Counters accumulated over one scan of a recovery stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    /// Packets that passed their checksum and were applied.
    pub accepted: usize,
    /// Packets dropped because their body checksum did not match.
    pub checksum_rejects: usize,
    /// Checksum-valid packets dropped for carrying a foreign set id.
    pub foreign_set_rejects: usize,
    /// Headers skipped for declaring an implausible packet length.
    pub implausible_lengths: usize,
}

/// Everything one scan produces: the merged set, the error that stopped
/// the scan early (if any), and the skip counters.
#[derive(Debug)]
pub struct ParseOutcome {
    /// Finalized set reflecting every packet accepted before the scan
    /// ended or failed.
    pub set: RecoverySet,
    /// Set only when a structural problem stopped the scan; clean
    /// end-of-stream leaves it `None`.
    pub error: Option<ParseError>,
    pub stats: ScanStats,
}

/// Scan `reader` to exhaustion and merge every accepted packet into one
/// finalized [`RecoverySet`].
///
/// Isolated corruption never stops the scan: packets failing their own
/// checksum, headers with implausible lengths, and packets from a foreign
/// recovery set are skipped and counted. Truncated packets, unknown packet
/// types and i/o failures stop the scan; the returned set still reflects
/// everything accepted up to that point.
pub fn parse_recovery_set<R: BufRead>(reader: &mut R) -> ParseOutcome {
    let mut builder = RecoverySetBuilder::new();
    let mut stats = ScanStats::default();
    let mut error = None;

    loop {
        match scanner::seek_next_packet(reader) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                error = Some(ParseError::Io(e));
                break;
            }
        }

        match packets::read_packet(reader, builder.set_id()) {
            Ok(GateOutcome::Update { set_id, update }) => {
                builder.adopt_set_id(set_id);
                builder.apply(update);
                stats.accepted += 1;
            }
            Ok(GateOutcome::ChecksumMismatch) => {
                debug!("dropped a packet with a failed body checksum");
                stats.checksum_rejects += 1;
            }
            Ok(GateOutcome::ImplausibleLength(len)) => {
                debug!(
                    "skipped a header declaring an implausible packet length of {} bytes",
                    len
                );
                stats.implausible_lengths += 1;
            }
            Err(ParseError::MismatchedRecoverySet { expected, found }) => {
                warn!(
                    "skipped a packet from foreign recovery set {} (established set is {})",
                    found.to_hex(),
                    expected.to_hex()
                );
                stats.foreign_set_rejects += 1;
            }
            Err(e) => {
                error = Some(e);
                break;
            }
        }
    }

    ParseOutcome {
        set: builder.finish(),
        error,
        stats,
    }
}
