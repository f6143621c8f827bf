//! 编解码属性测试
//!
//! 验证：
//! 1. encode → decode 还原 id / control / params
//! 2. 校验和不变量 `(id + ctrl + sum(params) + checksum) mod 256 == 0`
//! 3. 有效帧的任意截断前缀都返回错误，不会 panic

use dobot_protocol::{MAX_PARAMS_LEN, Message, ProtocolError, decode, encode};
use proptest::prelude::*;

fn params_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=64)
}

proptest! {
    #[test]
    fn roundtrip_preserves_fields(id in any::<u8>(), control in any::<u8>(), params in params_strategy()) {
        let bytes = encode(id, control, &params);
        let msg = decode(&bytes).unwrap();
        prop_assert_eq!(msg.id(), id);
        prop_assert_eq!(msg.control(), control);
        prop_assert_eq!(msg.params(), params.as_slice());
        prop_assert_eq!(msg.length() as usize, 2 + params.len());
    }

    #[test]
    fn checksum_invariant_holds(id in any::<u8>(), control in any::<u8>(), params in params_strategy()) {
        let msg = Message::new(id, control, &params);
        let sum = params
            .iter()
            .fold(id as u32 + control as u32 + msg.checksum() as u32, |acc, b| acc + *b as u32);
        prop_assert_eq!(sum % 256, 0);
    }

    #[test]
    fn truncated_prefix_is_rejected(id in any::<u8>(), control in any::<u8>(), params in params_strategy(), cut in any::<prop::sample::Index>()) {
        let bytes = encode(id, control, &params);
        let len = cut.index(bytes.len());
        match decode(&bytes[..len]) {
            Err(ProtocolError::Framing { .. }) => prop_assert!(len < 3),
            Err(ProtocolError::ShortRead { expected, actual }) => {
                prop_assert_eq!(expected, bytes.len());
                prop_assert_eq!(actual, len);
            }
            other => prop_assert!(false, "unexpected result for prefix {}: {:?}", len, other),
        }
    }

    #[test]
    fn corrupted_checksum_is_rejected(id in any::<u8>(), control in any::<u8>(), params in params_strategy(), delta in 1u8..=255) {
        let mut bytes = encode(id, control, &params);
        let last = bytes.len() - 1;
        bytes[last] = bytes[last].wrapping_add(delta);
        let is_checksum_mismatch = matches!(decode(&bytes), Err(ProtocolError::ChecksumMismatch { .. }));
        prop_assert!(is_checksum_mismatch);
    }
}

#[test]
fn empty_params_frame_layout() {
    assert_eq!(encode(10, 0, &[]), vec![0xAA, 0xAA, 0x02, 0x0A, 0x00, 0xF6]);
}

#[test]
fn max_params_frame_roundtrip() {
    let params = vec![0xFF; MAX_PARAMS_LEN];
    let bytes = encode(1, 2, &params);
    assert_eq!(bytes.len(), 3 + 255 + 1);
    assert_eq!(decode(&bytes).unwrap().params(), params.as_slice());
}

#[cfg(feature = "serde")]
#[test]
fn pose_serializes_to_json() {
    use dobot_protocol::Pose;

    let pose = Pose {
        x: 1.0,
        ..Pose::default()
    };
    let json = serde_json::to_string(&pose).unwrap();
    assert!(json.contains("\"x\":1.0"));
    let back: Pose = serde_json::from_str(&json).unwrap();
    assert_eq!(back, pose);
}
