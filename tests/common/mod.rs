//! Shared packet builders for integration tests.
//!
//! Packets are assembled byte-for-byte the way a writer would emit them:
//! magic, declared length, body MD5 over (set id, type tag, body), set id,
//! type tag, body.

#![allow(dead_code)]

use par2check::checksum;

pub const MAGIC: &[u8; 8] = b"PAR2\0PKT";
pub const TYPE_MAIN: &[u8; 16] = b"PAR 2.0\0Main\0\0\0\0";
pub const TYPE_FILE_DESC: &[u8; 16] = b"PAR 2.0\0FileDesc";
pub const TYPE_IFSC: &[u8; 16] = b"PAR 2.0\0IFSC\0\0\0\0";

pub fn packet(set_id: &[u8; 16], type_tag: &[u8; 16], body: &[u8]) -> Vec<u8> {
    let md5 = checksum::compute_packet_md5(set_id, type_tag, body);
    let mut out = Vec::with_capacity(64 + body.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&(64 + body.len() as u64).to_le_bytes());
    out.extend_from_slice(md5.as_bytes());
    out.extend_from_slice(set_id);
    out.extend_from_slice(type_tag);
    out.extend_from_slice(body);
    out
}

pub fn main_packet(set_id: &[u8; 16], slice_size: u64, file_ids: &[[u8; 16]]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&slice_size.to_le_bytes());
    body.extend_from_slice(&(file_ids.len() as u32).to_le_bytes());
    for id in file_ids {
        body.extend_from_slice(id);
    }
    packet(set_id, TYPE_MAIN, &body)
}

pub fn file_desc_packet(
    set_id: &[u8; 16],
    file_id: &[u8; 16],
    md5: &[u8; 16],
    md5_16k: &[u8; 16],
    length: u64,
    name: &str,
) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(file_id);
    body.extend_from_slice(md5);
    body.extend_from_slice(md5_16k);
    body.extend_from_slice(&length.to_le_bytes());
    body.extend_from_slice(name.as_bytes());
    // Writers pad the name field with NULs to a four-byte multiple.
    while (body.len() - 56) % 4 != 0 {
        body.push(0);
    }
    packet(set_id, TYPE_FILE_DESC, &body)
}

pub fn ifsc_packet(set_id: &[u8; 16], file_id: &[u8; 16], slices: &[([u8; 16], u32)]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(file_id);
    for (md5, crc32) in slices {
        body.extend_from_slice(md5);
        body.extend_from_slice(&crc32.to_le_bytes());
    }
    packet(set_id, TYPE_IFSC, &body)
}

/// Per-slice checksums for `content`, final slice zero-padded to
/// `slice_size` before hashing.
pub fn slice_checksums_for(content: &[u8], slice_size: usize) -> Vec<([u8; 16], u32)> {
    content
        .chunks(slice_size)
        .map(|chunk| {
            let mut padded = vec![0u8; slice_size];
            padded[..chunk.len()].copy_from_slice(chunk);
            (
                *checksum::compute_md5(&padded).as_bytes(),
                checksum::compute_crc32(&padded).as_u32(),
            )
        })
        .collect()
}

/// A full, consistent stream (Main + FileDesc + IFSC) describing one file
/// holding `content`.
pub fn single_file_stream(
    set_id: &[u8; 16],
    file_id: &[u8; 16],
    slice_size: u64,
    name: &str,
    content: &[u8],
) -> Vec<u8> {
    let mut stream = main_packet(set_id, slice_size, &[*file_id]);
    stream.extend_from_slice(&file_desc_packet(
        set_id,
        file_id,
        checksum::compute_md5(content).as_bytes(),
        checksum::compute_md5(&content[..content.len().min(16384)]).as_bytes(),
        content.len() as u64,
        name,
    ));
    stream.extend_from_slice(&ifsc_packet(
        set_id,
        file_id,
        &slice_checksums_for(content, slice_size as usize),
    ));
    stream
}
