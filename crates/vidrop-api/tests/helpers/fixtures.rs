//! Test fixtures: small video blobs.

/// Ten bytes standing in for a video; content is never inspected.
pub fn ten_bytes() -> Vec<u8> {
    b"0123456789".to_vec()
}

/// Minimal MP4 (ftyp + mdat).
pub fn create_test_video() -> Vec<u8> {
    let mut mp4 = Vec::new();
    mp4.extend_from_slice(&[0x00, 0x00, 0x00, 0x20]);
    mp4.extend_from_slice(b"ftyp");
    mp4.extend_from_slice(b"isom");
    mp4.extend_from_slice(&[0x00, 0x00, 0x02, 0x00]);
    mp4.extend_from_slice(b"isomiso2mp41");
    mp4.extend_from_slice(&[0x00, 0x00, 0x00, 0x08]);
    mp4.extend_from_slice(b"mdat");
    mp4
}

/// `len` bytes of filler
pub fn blob(len: usize) -> Vec<u8> {
    vec![0xAB; len]
}
