use binrw::BinRead;

use crate::domain::{Crc32Value, FileId, Md5Hash};
use crate::recovery_set::{FileSliceChecksums, SliceChecksum};

pub const TYPE_OF_PACKET: &[u8] = b"PAR 2.0\0IFSC\0\0\0\0";

/// One 20-byte checksum record as it appears on the wire.
#[derive(Debug, BinRead)]
#[br(little)]
pub struct RawSliceChecksum {
    pub md5: [u8; 16],
    pub crc32: u32,
}

/// Body of an IFSC packet: the per-slice checksum sequence for one file.
///
/// Only complete 20-byte records are taken; a trailing fragment is left in
/// the body for the gate to discard.
#[derive(Debug, BinRead)]
#[br(little, import(body_len: u64))]
pub struct SliceChecksumBody {
    pub file_id: [u8; 16],
    #[br(count = (body_len - 16) / 20)]
    pub slice_checksums: Vec<RawSliceChecksum>,
}

impl SliceChecksumBody {
    pub fn into_checksums(self) -> FileSliceChecksums {
        FileSliceChecksums {
            file_id: FileId::new(self.file_id),
            slices: self
                .slice_checksums
                .into_iter()
                .map(|raw| SliceChecksum {
                    md5: Md5Hash::new(raw.md5),
                    crc32: Crc32Value::new(raw.crc32),
                })
                .collect(),
        }
    }
}
