//! Centralized hashing helpers.
//!
//! Packet validation, slice verification and test fixtures all hash through
//! this module so the same bytes always produce the same digests.

use crate::domain::{Crc32Value, Md5Hash};
use md5::{Digest, Md5};

/// MD5 of a byte slice in one shot.
#[inline]
pub fn compute_md5(data: &[u8]) -> Md5Hash {
    Md5Hash::new(Md5::digest(data).into())
}

/// MD5 over a packet's checksummed region: set id, type tag, then body.
#[inline]
pub fn compute_packet_md5(set_id: &[u8; 16], type_tag: &[u8; 16], body: &[u8]) -> Md5Hash {
    let mut hasher = Md5::new();
    hasher.update(set_id);
    hasher.update(type_tag);
    hasher.update(body);
    Md5Hash::new(hasher.finalize().into())
}

/// CRC32 checksum of a byte slice.
#[inline]
pub fn compute_crc32(data: &[u8]) -> Crc32Value {
    Crc32Value::new(crc32fast::hash(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packet_md5_covers_id_tag_and_body() {
        let set_id = [0x11u8; 16];
        let tag = *b"PAR 2.0\0Main\0\0\0\0";
        let body = [1u8, 2, 3, 4];

        let mut concatenated = Vec::new();
        concatenated.extend_from_slice(&set_id);
        concatenated.extend_from_slice(&tag);
        concatenated.extend_from_slice(&body);

        assert_eq!(
            compute_packet_md5(&set_id, &tag, &body),
            compute_md5(&concatenated)
        );
    }

    #[test]
    fn empty_input_md5_is_the_known_digest() {
        let digest = compute_md5(b"");
        assert_eq!(hex::encode(digest.as_bytes()), "d41d8cd98f00b204e9800998ecf8427e");
    }
}
