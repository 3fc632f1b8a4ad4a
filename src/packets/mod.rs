//! Packet header gate and body decoders.
//!
//! Once the scanner lands on a magic boundary, [`read_packet`] reads the
//! fixed 56-byte header tail, pulls the declared body into memory, checks
//! the packet's own MD5 (computed over set id, type tag and body), and only
//! then decodes. The decoders stay pure functions from body bytes to a
//! declarative update; a corrupt body is dropped before any of them run.
//!
//! Checksum failures and implausible lengths are reported as skips for the
//! scan loop to count; unknown types and short bodies abort the scan.

use std::io::{Cursor, ErrorKind, Read};

use binrw::BinReaderExt;

pub mod error;
pub mod file_description_packet;
pub mod main_packet;
pub mod slice_checksum_packet;

pub use error::ParseError;
pub use file_description_packet::FileDescriptionBody;
pub use main_packet::MainPacketBody;
pub use slice_checksum_packet::SliceChecksumBody;

use crate::checksum;
use crate::domain::{FileId, Md5Hash, RecoverySetId};
use crate::recovery_set::{FileDescription, FileSliceChecksums};

/// Total header length: magic, length, body MD5, set id, type tag.
pub const PACKET_HEADER_LEN: u64 = 64;

/// Header bytes remaining after the magic sequence.
const HEADER_TAIL_LEN: usize = 56;

/// Upper bound on a plausible declared packet length. Larger declarations
/// are corruption, not packets worth allocating for.
const MAX_PACKET_LEN: u64 = 100 * 1024 * 1024;

/// Declarative update decoded from one packet body.
///
/// Decoders only produce these; applying them is the recovery set
/// builder's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PacketUpdate {
    Main(MainUpdate),
    FileDescription(FileDescription),
    SliceChecksums(FileSliceChecksums),
}

/// Payload of a Main packet: slice size and the declared membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainUpdate {
    pub slice_size: u64,
    pub file_ids: Vec<FileId>,
}

/// What the gate found at one packet boundary.
#[derive(Debug)]
pub enum GateOutcome {
    /// A checksum-valid update, with the set id the packet carried.
    Update {
        set_id: RecoverySetId,
        update: PacketUpdate,
    },
    /// The body failed its own checksum; the decoded update was discarded.
    ChecksumMismatch,
    /// The header declared an implausible length; scanning resumes.
    ImplausibleLength(u64),
}

/// Read and validate one packet, with the reader positioned just past the
/// magic sequence.
///
/// `established` is the set identity adopted from earlier packets, if any;
/// a checksum-valid packet carrying a different id is rejected with
/// [`ParseError::MismatchedRecoverySet`]. Identity is never taken from a
/// packet that failed its checksum. On success the reader sits exactly at
/// the next packet boundary, any unread body remainder discarded.
pub fn read_packet<R: Read>(
    reader: &mut R,
    established: Option<RecoverySetId>,
) -> Result<GateOutcome, ParseError> {
    let mut header = [0u8; HEADER_TAIL_LEN];
    read_packet_bytes(reader, &mut header)?;

    let declared_len = u64::from_le_bytes(header[0..8].try_into().unwrap());
    if declared_len < PACKET_HEADER_LEN || declared_len > MAX_PACKET_LEN {
        return Ok(GateOutcome::ImplausibleLength(declared_len));
    }

    let stored_md5 = Md5Hash::new(header[8..24].try_into().unwrap());
    let set_id = RecoverySetId::new(header[24..40].try_into().unwrap());
    let type_tag: [u8; 16] = header[40..56].try_into().unwrap();

    let body_len = declared_len - PACKET_HEADER_LEN;
    let mut body = vec![0u8; body_len as usize];
    read_packet_bytes(reader, &mut body)?;

    // Checksum before decoding: a corrupted body is discarded no matter
    // which bytes the corruption hit.
    if checksum::compute_packet_md5(set_id.as_bytes(), &type_tag, &body) != stored_md5 {
        return Ok(GateOutcome::ChecksumMismatch);
    }

    let update = decode_body(&type_tag, &body, body_len)?;

    if let Some(expected) = established {
        if expected != set_id {
            return Err(ParseError::MismatchedRecoverySet {
                expected,
                found: set_id,
            });
        }
    }

    Ok(GateOutcome::Update { set_id, update })
}

/// Decode one body into its update. Pure: no effect beyond the returned
/// value, so the caller can drop the result when the checksum fails.
fn decode_body(
    type_tag: &[u8; 16],
    body: &[u8],
    body_len: u64,
) -> Result<PacketUpdate, ParseError> {
    let mut cursor = Cursor::new(body);
    match &type_tag[..] {
        main_packet::TYPE_OF_PACKET => {
            if body_len < 12 {
                return Err(ParseError::UnexpectedEndOfPacket);
            }
            let parsed: MainPacketBody = cursor
                .read_le_args((body_len,))
                .map_err(|_| ParseError::UnexpectedEndOfPacket)?;
            Ok(PacketUpdate::Main(parsed.into_update()))
        }
        file_description_packet::TYPE_OF_PACKET => {
            // The name field must hold at least one byte.
            if body_len <= file_description_packet::FIXED_FIELDS_LEN {
                return Err(ParseError::UnexpectedEndOfPacket);
            }
            let parsed: FileDescriptionBody = cursor
                .read_le_args((body_len,))
                .map_err(|_| ParseError::UnexpectedEndOfPacket)?;
            Ok(PacketUpdate::FileDescription(parsed.into_description()))
        }
        slice_checksum_packet::TYPE_OF_PACKET => {
            if body_len < 16 {
                return Err(ParseError::UnexpectedEndOfPacket);
            }
            let parsed: SliceChecksumBody = cursor
                .read_le_args((body_len,))
                .map_err(|_| ParseError::UnexpectedEndOfPacket)?;
            Ok(PacketUpdate::SliceChecksums(parsed.into_checksums()))
        }
        _ => Err(ParseError::UnknownPacketType(display_type_tag(type_tag))),
    }
}

fn display_type_tag(type_tag: &[u8; 16]) -> String {
    String::from_utf8_lossy(type_tag)
        .trim_end_matches('\0')
        .to_string()
}

fn read_packet_bytes<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), ParseError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => ParseError::UnexpectedEndOfPacket,
        _ => ParseError::Io(e),
    })
}
