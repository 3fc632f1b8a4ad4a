//! Error taxonomy for stream parsing.

use thiserror::Error;

use crate::domain::RecoverySetId;

/// Structural failure while scanning a recovery stream.
///
/// Clean end-of-stream is not an error, and a packet failing its own body
/// checksum never surfaces here; it is silently discarded and counted.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The stream ended, or the body ran out, before the declared packet
    /// length was satisfied.
    #[error("unexpected end of packet")]
    UnexpectedEndOfPacket,

    /// A well-formed header carried a type tag this crate does not decode.
    #[error("unknown packet type `{0}`")]
    UnknownPacketType(String),

    /// A checksum-valid packet carried an id conflicting with the set
    /// identity established by an earlier packet. The scan loop skips such
    /// packets; the variant is surfaced to direct callers of the gate.
    #[error(
        "packet belongs to recovery set {}, expected {}",
        .found.to_hex(),
        .expected.to_hex()
    )]
    MismatchedRecoverySet {
        expected: RecoverySetId,
        found: RecoverySetId,
    },

    #[error("i/o failure while scanning packets: {0}")]
    Io(#[from] std::io::Error),
}
