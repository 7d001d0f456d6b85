use aes::cipher::KeyInit;
use aes::Aes128;
use ctr_iv::CtrIv;
use ctr_stream::CtrReader;
use hex_literal::hex;
use std::io::{Cursor, Read, Seek, SeekFrom};

// NIST SP 800-38A, F.5.1/F.5.2 (CTR-AES128)
const KEY: [u8; 16] = hex!("2b7e151628aed2a6abf7158809cf4f3c");
const INIT_CTR: [u8; 16] = hex!("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff");
const PLAINTEXT: [u8; 64] = hex!(
    "6bc1bee22e409f96e93d7e117393172a"
    "ae2d8a571e03ac9c9eb76fac45af8e51"
    "30c81c46a35ce411e5fbc1191a0a52ef"
    "f69f2445df4f9b17ad2b417be66c3710"
);
const CIPHERTEXT: [u8; 64] = hex!(
    "874d6191b620e3261bef6864990db6ce"
    "9806f66b7970fdff8617187bb9fffdff"
    "5ae4df3edbd5d35e5b4f09020db03eab"
    "1e031dda2fbe03d1792170a0f3009cee"
);

fn reader(data: Vec<u8>) -> CtrReader<Cursor<Vec<u8>>, Aes128> {
    CtrReader::new(
        Cursor::new(data),
        Aes128::new(&KEY.into()),
        CtrIv::new(&INIT_CTR.into()),
    )
}

fn read_all(mut r: impl Read) -> Vec<u8> {
    let mut out = Vec::new();
    r.read_to_end(&mut out).unwrap();
    out
}

/// Deterministic non-repeating filler for round-trip inputs.
fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

#[test]
fn matches_nist_ctr_aes128_encrypt_vectors() {
    assert_eq!(read_all(reader(PLAINTEXT.to_vec()))[..], CIPHERTEXT[..]);
}

#[test]
fn matches_nist_ctr_aes128_decrypt_vectors() {
    assert_eq!(read_all(reader(CIPHERTEXT.to_vec()))[..], PLAINTEXT[..]);
}

#[test]
fn chunked_reads_match_bulk_reads() {
    // pull in 3-byte chunks so reads straddle block boundaries
    let mut r = reader(PLAINTEXT.to_vec());
    let mut out = Vec::new();
    let mut chunk = [0u8; 3];
    loop {
        let n = r.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        out.extend_from_slice(&chunk[..n]);
    }
    assert_eq!(out[..], CIPHERTEXT[..]);
}

#[test]
fn round_trips_at_awkward_lengths() {
    for len in [0usize, 1, 15, 16, 17, 1_048_576] {
        let plaintext = pattern(len);
        let ciphertext = read_all(reader(plaintext.clone()));
        assert_eq!(ciphertext.len(), len, "len = {len}");

        let recovered = read_all(reader(ciphertext));
        assert_eq!(recovered, plaintext, "len = {len}");
    }
}

#[test]
fn seek_from_start_resumes_mid_stream() {
    let mut r = reader(CIPHERTEXT.to_vec());
    r.seek(SeekFrom::Start(32)).unwrap();
    assert_eq!(read_all(&mut r)[..], PLAINTEXT[32..]);
}

#[test]
fn seek_backward_replays_earlier_blocks() {
    let mut r = reader(CIPHERTEXT.to_vec());
    let mut skip = [0u8; 48];
    r.read_exact(&mut skip).unwrap();

    r.seek(SeekFrom::Start(16)).unwrap();
    let mut block = [0u8; 16];
    r.read_exact(&mut block).unwrap();
    assert_eq!(block[..], PLAINTEXT[16..32]);
}

#[test]
fn seek_from_current_skips_blocks() {
    let mut r = reader(CIPHERTEXT.to_vec());
    let mut block = [0u8; 16];
    r.read_exact(&mut block).unwrap();
    assert_eq!(block[..], PLAINTEXT[..16]);

    r.seek(SeekFrom::Current(16)).unwrap();
    r.read_exact(&mut block).unwrap();
    assert_eq!(block[..], PLAINTEXT[32..48]);
}

#[test]
fn misaligned_seeks_are_unsupported() {
    let mut r = reader(CIPHERTEXT.to_vec());
    let err = r.seek(SeekFrom::Start(5)).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::Unsupported);

    let err = r.seek(SeekFrom::End(0)).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::Unsupported);
}

#[test]
fn seeking_before_the_start_is_invalid() {
    let mut r = reader(CIPHERTEXT.to_vec());
    let err = r.seek(SeekFrom::Current(-16)).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
}

#[test]
fn stream_position_reports_bytes_read() {
    let mut r = reader(CIPHERTEXT.to_vec());
    let mut bytes = [0u8; 5];
    r.read_exact(&mut bytes).unwrap();
    // a no-op seek, so the mid-block position is fine
    assert_eq!(r.stream_position().unwrap(), 5);
}

#[test]
fn into_inner_returns_the_wrapped_reader() {
    let mut r = reader(CIPHERTEXT.to_vec());
    let mut block = [0u8; 16];
    r.read_exact(&mut block).unwrap();
    assert_eq!(r.into_inner().into_inner()[..], CIPHERTEXT[..]);
}
