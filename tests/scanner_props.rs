//! Property tests for the magic resync automaton.

mod common;

use std::io::Cursor;

use proptest::prelude::*;

use par2check::domain::FileId;
use par2check::parse_recovery_set;
use par2check::scanner::{seek_next_packet, MagicScan, MAGIC_BYTES};

fn first_magic(stream: &[u8]) -> Option<usize> {
    stream
        .windows(MAGIC_BYTES.len())
        .position(|window| window == MAGIC_BYTES)
}

proptest! {
    #[test]
    fn scan_stops_exactly_after_the_first_magic(
        noise in prop::collection::vec(any::<u8>(), 0..256),
        tail in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let mut stream = noise;
        stream.extend_from_slice(MAGIC_BYTES);
        stream.extend_from_slice(&tail);

        let expected = first_magic(&stream).unwrap() + MAGIC_BYTES.len();
        let mut cursor = Cursor::new(stream.as_slice());
        prop_assert!(seek_next_packet(&mut cursor).unwrap());
        prop_assert_eq!(cursor.position() as usize, expected);
    }

    #[test]
    fn streams_without_magic_terminate_cleanly(
        noise in prop::collection::vec(any::<u8>(), 0..512),
    ) {
        prop_assume!(first_magic(&noise).is_none());
        let mut cursor = Cursor::new(noise.as_slice());
        prop_assert!(!seek_next_packet(&mut cursor).unwrap());
        prop_assert_eq!(cursor.position() as usize, noise.len());
    }

    #[test]
    fn automaton_agrees_with_naive_substring_search(
        stream in prop::collection::vec(any::<u8>(), 0..512),
    ) {
        let mut scan = MagicScan::new();
        let mut found = None;
        for (at, &byte) in stream.iter().enumerate() {
            scan = scan.advance(byte);
            if scan.is_complete() {
                found = Some(at + 1 - MAGIC_BYTES.len());
                break;
            }
        }
        prop_assert_eq!(found, first_magic(&stream));
    }

    /// Noise between packets never changes what a scan accepts, as long as
    /// the noise cannot open a magic sequence.
    #[test]
    fn inter_packet_noise_does_not_change_the_parse(
        before in prop::collection::vec(0u8..b'P', 0..64),
        between in prop::collection::vec(0u8..b'P', 0..64),
        after in prop::collection::vec(0u8..b'P', 0..64),
    ) {
        let set_id = [0x42u8; 16];
        let file_id = [1u8; 16];
        let main = common::main_packet(&set_id, 16, &[file_id]);
        let ifsc = common::ifsc_packet(&set_id, &file_id, &[([9u8; 16], 7)]);

        let mut clean = main.clone();
        clean.extend_from_slice(&ifsc);
        let reference = parse_recovery_set(&mut Cursor::new(clean));

        let mut noisy = before;
        noisy.extend_from_slice(&main);
        noisy.extend_from_slice(&between);
        noisy.extend_from_slice(&ifsc);
        noisy.extend_from_slice(&after);
        let outcome = parse_recovery_set(&mut Cursor::new(noisy));

        prop_assert!(outcome.error.is_none());
        prop_assert_eq!(&outcome.set, &reference.set);
        prop_assert_eq!(outcome.set.file_ids.clone(), vec![FileId::new(file_id)]);
    }
}
