//! Big-endian fixed-width integer serialization with defensive decode:
//! decoding from a buffer shorter than the fixed width returns zero rather
//! than panicking. Code built against this crate may rely on that contract.

#[inline]
pub fn encode_i64(v: i64) -> [u8; 8] {
    v.to_be_bytes()
}

#[inline]
pub fn encode_i32(v: i32) -> [u8; 4] {
    v.to_be_bytes()
}

#[inline]
pub fn decode_i64(b: &[u8]) -> i64 {
    if b.len() < 8 {
        return 0;
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&b[..8]);
    i64::from_be_bytes(buf)
}

#[inline]
pub fn decode_i32(b: &[u8]) -> i32 {
    if b.len() < 4 {
        return 0;
    }
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&b[..4]);
    i32::from_be_bytes(buf)
}

/// Unsigned decode of a big-endian 4-byte length prefix, used by the
/// container and length-prefixed value framings (lengths are non-negative
/// by construction, but the wire representation is the plain 4-byte dump).
#[inline]
pub fn decode_u32(b: &[u8]) -> u32 {
    if b.len() < 4 {
        return 0;
    }
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&b[..4]);
    u32::from_be_bytes(buf)
}

#[inline]
pub fn encode_u32(v: u32) -> [u8; 4] {
    v.to_be_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn decode_short_input_is_zero() {
        assert_eq!(decode_i64(&[]), 0);
        assert_eq!(decode_i64(&[1, 2, 3]), 0);
        assert_eq!(decode_i32(&[]), 0);
        assert_eq!(decode_i32(&[1, 2, 3]), 0);
    }

    #[test]
    fn round_trip_edge_values() {
        for v in [i64::MIN, i64::MAX, 0, -1, 1] {
            assert_eq!(decode_i64(&encode_i64(v)), v);
        }
        for v in [i32::MIN, i32::MAX, 0, -1, 1] {
            assert_eq!(decode_i32(&encode_i32(v)), v);
        }
    }

    #[test]
    fn big_endian_byte_order() {
        assert_eq!(encode_i32(1), [0, 0, 0, 1]);
        assert_eq!(encode_i64(1), [0, 0, 0, 0, 0, 0, 0, 1]);
    }

    proptest! {
        #[test]
        fn roundtrip_i64(v: i64) {
            prop_assert_eq!(decode_i64(&encode_i64(v)), v);
        }

        #[test]
        fn roundtrip_i32(v: i32) {
            prop_assert_eq!(decode_i32(&encode_i32(v)), v);
        }
    }
}
