use binrw::BinRead;

use crate::domain::FileId;

use super::MainUpdate;

pub const TYPE_OF_PACKET: &[u8] = b"PAR 2.0\0Main\0\0\0\0";

/// Body of a Main packet: global slice size plus the declared membership.
///
/// The wire format may append a non-recovery id list after the declared
/// ids; it is left in the body for the gate to discard.
#[derive(Debug, BinRead)]
#[br(little, import(body_len: u64))]
pub struct MainPacketBody {
    pub slice_size: u64,
    #[br(assert(u64::from(file_count) * 16 <= body_len - 12))]
    pub file_count: u32,
    #[br(count = file_count)]
    pub file_ids: Vec<[u8; 16]>,
}

impl MainPacketBody {
    pub fn into_update(self) -> MainUpdate {
        MainUpdate {
            slice_size: self.slice_size,
            file_ids: self.file_ids.into_iter().map(FileId::new).collect(),
        }
    }
}
