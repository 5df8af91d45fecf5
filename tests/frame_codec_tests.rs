use fae_rpc::constants::{
    FRAME_FIXED_HEADER_SIZE, FRAME_LENGTH_FIELD_SIZE, FRAME_METHOD_NAME_LENGTH_OFFSET,
    FRAME_MSG_TYPE_OFFSET, FRAME_SEQ_ID_OFFSET, FRAME_VERSION_OFFSET, MAX_FRAME_BODY_SIZE,
    MAX_METHOD_NAME_SIZE, PROTOCOL_VERSION,
};
use fae_rpc::frame::{FrameCodec, FrameDecodeError, FrameEncodeError, FrameReadError, read_frame, write_frame};
use fae_rpc::rpc::{RpcMessage, RpcMessageType, RpcValue};
use rand::Rng;
use std::io::{Cursor, ErrorKind};

fn body_of(frame: &[u8]) -> &[u8] {
    &frame[FRAME_LENGTH_FIELD_SIZE..]
}

#[test]
fn call_frame_layout_is_stable() {
    let call = RpcMessage::call(7, "noop", RpcValue::I32(1));
    let frame = FrameCodec::encode(&call).expect("encode failed");

    #[rustfmt::skip]
    let expected: Vec<u8> = vec![
        17, 0, 0, 0,          // body length
        PROTOCOL_VERSION,
        1,                    // Call
        7, 0, 0, 0,           // seq id
        4, 0,                 // name length
        b'n', b'o', b'o', b'p',
        0x08,                 // I32 tag
        1, 0, 0, 0,
    ];
    assert_eq!(frame, expected);

    let body = body_of(&frame);
    assert_eq!(body[FRAME_VERSION_OFFSET], PROTOCOL_VERSION);
    assert_eq!(body[FRAME_MSG_TYPE_OFFSET], RpcMessageType::Call as u8);
    assert_eq!(body[FRAME_SEQ_ID_OFFSET..FRAME_SEQ_ID_OFFSET + 4], 7u32.to_le_bytes());
    assert_eq!(
        body[FRAME_METHOD_NAME_LENGTH_OFFSET..FRAME_METHOD_NAME_LENGTH_OFFSET + 2],
        4u16.to_le_bytes()
    );
    assert_eq!(&body[FRAME_FIXED_HEADER_SIZE..FRAME_FIXED_HEADER_SIZE + 4], b"noop");
}

#[test]
fn decode_restores_every_field() {
    let call = RpcMessage::call(42, "noop", RpcValue::I64(i64::MIN));
    let reply = RpcMessage::reply_to(&call, RpcValue::from_i64(-3));
    let exception = RpcMessage::exception_to(&call, "unknown method: nope");

    for message in [call, reply, exception] {
        let frame = FrameCodec::encode(&message).unwrap();
        let decoded = FrameCodec::decode(body_of(&frame)).unwrap();
        assert_eq!(decoded, message);
    }
}

#[test]
fn random_integers_survive_the_codec() {
    let mut rng = rand::rng();

    for seq_id in 0..256u32 {
        let value: i64 = rng.random();
        let frame = FrameCodec::encode(&RpcMessage::call(seq_id, "noop", RpcValue::from_i64(value)))
            .unwrap();
        let decoded = FrameCodec::decode(body_of(&frame)).unwrap();
        assert_eq!(decoded.value.as_i64(), Some(value));
        assert_eq!(decoded.seq_id, seq_id);
    }
}

#[test]
fn every_strict_prefix_is_truncated() {
    let frame = FrameCodec::encode(&RpcMessage::call(1, "noop", RpcValue::I64(9))).unwrap();
    let body = body_of(&frame);

    for cut in 0..body.len() {
        assert_eq!(
            FrameCodec::decode(&body[..cut]),
            Err(FrameDecodeError::Truncated),
            "prefix of {cut} bytes should not decode"
        );
    }
}

#[test]
fn rejects_unknown_version() {
    let frame = FrameCodec::encode(&RpcMessage::call(1, "noop", RpcValue::I32(1))).unwrap();
    let mut body = body_of(&frame).to_vec();
    body[FRAME_VERSION_OFFSET] = PROTOCOL_VERSION + 1;

    assert_eq!(
        FrameCodec::decode(&body),
        Err(FrameDecodeError::UnsupportedVersion(PROTOCOL_VERSION + 1))
    );
}

#[test]
fn rejects_unknown_message_type_and_tag() {
    let frame = FrameCodec::encode(&RpcMessage::call(1, "noop", RpcValue::I32(1))).unwrap();

    let mut body = body_of(&frame).to_vec();
    body[FRAME_MSG_TYPE_OFFSET] = 0x7F;
    assert_eq!(
        FrameCodec::decode(&body),
        Err(FrameDecodeError::UnknownMessageType(0x7F))
    );

    let mut body = body_of(&frame).to_vec();
    let tag_offset = body.len() - 5;
    body[tag_offset] = 0x01;
    assert_eq!(
        FrameCodec::decode(&body),
        Err(FrameDecodeError::UnknownValueTag(0x01))
    );
}

#[test]
fn rejects_trailing_bytes() {
    let frame = FrameCodec::encode(&RpcMessage::call(1, "noop", RpcValue::I32(1))).unwrap();
    let mut body = body_of(&frame).to_vec();
    body.extend_from_slice(&[0, 0]);

    assert_eq!(FrameCodec::decode(&body), Err(FrameDecodeError::TrailingBytes(2)));
}

#[test]
fn rejects_invalid_utf8_method_name() {
    let frame = FrameCodec::encode(&RpcMessage::call(1, "noop", RpcValue::I32(1))).unwrap();
    let mut body = body_of(&frame).to_vec();
    body[FRAME_FIXED_HEADER_SIZE] = 0xFF;

    assert_eq!(FrameCodec::decode(&body), Err(FrameDecodeError::InvalidUtf8));
}

/// Builds a call body by hand so the name length can exceed what the
/// encoder allows.
fn call_body_with_name(name: &[u8]) -> Vec<u8> {
    let mut body = vec![PROTOCOL_VERSION, RpcMessageType::Call as u8];
    body.extend(&1u32.to_le_bytes());
    body.extend(&(name.len() as u16).to_le_bytes());
    body.extend(name);
    body.push(0x08);
    body.extend(&5i32.to_le_bytes());
    body
}

#[test]
fn method_name_limit_is_the_same_both_ways() {
    let longest = vec![b'm'; MAX_METHOD_NAME_SIZE];
    let decoded = FrameCodec::decode(&call_body_with_name(&longest)).unwrap();
    assert_eq!(decoded.method.len(), MAX_METHOD_NAME_SIZE);
    assert!(FrameCodec::encode(&RpcMessage::exception_to(&decoded, "unknown method")).is_ok());

    let too_long = vec![b'm'; MAX_METHOD_NAME_SIZE + 1];
    assert_eq!(
        FrameCodec::decode(&call_body_with_name(&too_long)),
        Err(FrameDecodeError::MethodNameTooLong(MAX_METHOD_NAME_SIZE + 1))
    );
    assert_eq!(
        FrameCodec::decode(&call_body_with_name(&[b'm'; 300])),
        Err(FrameDecodeError::MethodNameTooLong(300))
    );
}

#[test]
fn oversized_frames_are_refused_both_ways() {
    let prefix = ((MAX_FRAME_BODY_SIZE + 1) as u32).to_le_bytes();
    assert_eq!(
        FrameCodec::body_len(&prefix),
        Err(FrameDecodeError::FrameTooLarge(MAX_FRAME_BODY_SIZE + 1))
    );

    let huge = RpcMessage {
        msg_type: RpcMessageType::Exception,
        seq_id: 1,
        method: "noop".into(),
        value: RpcValue::Text("x".repeat(MAX_FRAME_BODY_SIZE)),
    };
    assert!(matches!(
        FrameCodec::encode(&huge),
        Err(FrameEncodeError::FrameTooLarge(_))
    ));

    let long_name = RpcMessage::call(1, "n".repeat(300), RpcValue::I32(0));
    assert_eq!(
        FrameCodec::encode(&long_name),
        Err(FrameEncodeError::MethodNameTooLong(300))
    );
}

#[test]
fn stream_helpers_read_back_what_was_written() {
    let mut wire = Vec::new();
    let first = RpcMessage::call(1, "noop", RpcValue::I32(10));
    let second = RpcMessage::call(2, "noop", RpcValue::I64(i64::MAX));

    write_frame(&mut wire, &first).unwrap();
    write_frame(&mut wire, &second).unwrap();

    let mut reader = Cursor::new(wire);
    assert_eq!(read_frame(&mut reader).unwrap(), first);
    assert_eq!(read_frame(&mut reader).unwrap(), second);

    match read_frame(&mut reader) {
        Err(FrameReadError::Io(e)) => assert_eq!(e.kind(), ErrorKind::UnexpectedEof),
        other => panic!("expected EOF, got {other:?}"),
    }
}

#[test]
fn read_frame_reports_truncated_stream_as_eof() {
    let frame = FrameCodec::encode(&RpcMessage::call(1, "noop", RpcValue::I32(1))).unwrap();
    let mut reader = Cursor::new(frame[..frame.len() - 2].to_vec());

    match read_frame(&mut reader) {
        Err(FrameReadError::Io(e)) => assert_eq!(e.kind(), ErrorKind::UnexpectedEof),
        other => panic!("expected EOF, got {other:?}"),
    }
}
