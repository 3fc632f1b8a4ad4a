use binrw::BinRead;

use crate::domain::{FileId, Md5Hash};
use crate::recovery_set::FileDescription;

pub const TYPE_OF_PACKET: &[u8] = b"PAR 2.0\0FileDesc";

/// Fixed-size prefix of the body, before the name field.
pub const FIXED_FIELDS_LEN: u64 = 56;

/// Longest name field the decoder keeps.
pub const MAX_FILENAME_LEN: u64 = 128;

/// Body of a FileDesc packet: per-file metadata and the file name.
///
/// The name field runs to the end of the body, capped at 128 bytes; name
/// bytes past the cap are left for the gate to discard.
#[derive(Debug, BinRead)]
#[br(little, import(body_len: u64))]
pub struct FileDescriptionBody {
    pub file_id: [u8; 16],
    pub md5: [u8; 16],
    pub md5_16k: [u8; 16],
    pub file_length: u64,
    #[br(count = (body_len - FIXED_FIELDS_LEN).min(MAX_FILENAME_LEN))]
    pub file_name: Vec<u8>,
}

impl FileDescriptionBody {
    pub fn into_description(self) -> FileDescription {
        let name_end = self
            .file_name
            .iter()
            .rposition(|&byte| byte != 0)
            .map_or(0, |last| last + 1);
        FileDescription {
            id: FileId::new(self.file_id),
            md5: Md5Hash::new(self.md5),
            md5_16k: Md5Hash::new(self.md5_16k),
            length: self.file_length,
            name: String::from_utf8_lossy(&self.file_name[..name_end]).into_owned(),
        }
    }
}
