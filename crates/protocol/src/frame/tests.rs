use std::io;

use super::*;

#[test]
fn header_encodes_uppercase_hex_length() {
    let header = FrameHeader::new(b'a', 0x1f).unwrap();
    assert_eq!(&header.encode(), b"a001F");
    let header = FrameHeader::new(b'x', MAX_PAYLOAD_LEN).unwrap();
    assert_eq!(&header.encode(), b"xFFFF");
}

#[test]
fn header_decode_accepts_lowercase_digits() {
    let header = FrameHeader::decode(b"w00ff").unwrap();
    assert_eq!(header.tag(), b'w');
    assert_eq!(header.payload_len(), 255);
}

#[test]
fn header_rejects_bad_fields() {
    assert!(matches!(
        FrameHeader::decode(b"a00G0"),
        Err(FrameError::InvalidLength(digits)) if &digits == b"00G0"
    ));
    assert!(matches!(
        FrameHeader::decode(b"\n0000"),
        Err(FrameError::InvalidTag(b'\n'))
    ));
    assert!(matches!(
        FrameHeader::new(b'a', MAX_PAYLOAD_LEN + 1),
        Err(FrameError::OversizedPayload(len)) if len == MAX_PAYLOAD_LEN + 1
    ));
}

#[test]
fn write_then_read_preserves_frames() {
    let mut wire = Vec::new();
    write_frame(&mut wire, Command::Append, b"hello").unwrap();
    write_frame(&mut wire, Command::EndFile, b"").unwrap();
    assert_eq!(wire, b"a0005hellox0000");

    let mut cursor = wire.as_slice();
    let first = read_frame(&mut cursor).unwrap().unwrap();
    assert_eq!(first.command(), Some(Command::Append));
    assert_eq!(first.payload(), b"hello");
    let second = read_frame(&mut cursor).unwrap().unwrap();
    assert_eq!(second.command(), Some(Command::EndFile));
    assert!(second.payload().is_empty());
    assert!(read_frame(&mut cursor).unwrap().is_none());
}

#[test]
fn unknown_tags_are_preserved() {
    let mut cursor: &[u8] = b"q0002hi";
    let frame = read_frame(&mut cursor).unwrap().unwrap();
    assert_eq!(frame.tag(), b'q');
    assert_eq!(frame.command(), None);
    assert_eq!(frame.into_parts(), (b'q', b"hi".to_vec()));
}

#[test]
fn truncation_is_reported() {
    let mut cursor: &[u8] = b"a00";
    assert!(matches!(
        read_frame(&mut cursor),
        Err(FrameError::Truncated { read: 3, expected: HEADER_LEN })
    ));
    let mut cursor: &[u8] = b"a0004ab";
    assert!(matches!(
        read_frame(&mut cursor),
        Err(FrameError::Truncated { read: 2, expected: 4 })
    ));
}

#[test]
fn oversized_payload_is_rejected_before_writing() {
    let mut wire = Vec::new();
    let payload = vec![0u8; MAX_PAYLOAD_LEN + 1];
    assert!(matches!(
        write_frame(&mut wire, Command::Append, &payload),
        Err(FrameError::OversizedPayload(_))
    ));
    assert!(wire.is_empty());
}

#[test]
fn frame_encode_matches_write_frame() {
    let frame = Frame::new(Command::Warning, b"disk nearly full".to_vec()).unwrap();
    let mut encoded = Vec::new();
    frame.encode_into_vec(&mut encoded).unwrap();
    let mut written = Vec::new();
    write_frame(&mut written, Command::Warning, b"disk nearly full").unwrap();
    assert_eq!(encoded, written);
}

#[test]
fn io_error_conversion_keeps_kinds() {
    let err: io::Error = FrameError::Truncated { read: 1, expected: 5 }.into();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    let err: io::Error = FrameError::InvalidTag(0).into();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    let err: io::Error = FrameError::OversizedPayload(70_000).into();
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    let err: io::Error = FrameError::Io(io::Error::from(io::ErrorKind::BrokenPipe)).into();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}
