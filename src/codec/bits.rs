//! Bits codec: fixed-width bit-packing for Integer values around their
//! observed range (`spec.md` §4.3.4). Header is element count, `min`, and
//! the bit width `k = ceil(log2(range + 1))`; the body is `count` values of
//! `k` bits each, `value − min`, packed MSB-first.

use crate::bitio::{BitReader, BitWriter};
use crate::error::{MalformedEncodingSnafu, Result};
use crate::primitives::{decode_i64, encode_i64};

fn bit_width(range: u64) -> u8 {
    if range == 0 {
        0
    } else {
        (64 - range.leading_zeros()) as u8
    }
}

pub fn compress(values: &[i64]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(values.len() as u32).to_be_bytes());
    if values.is_empty() {
        return out;
    }
    let min = *values.iter().min().unwrap();
    let max = *values.iter().max().unwrap();
    let range = (max as u64).wrapping_sub(min as u64);
    let k = bit_width(range);

    out.extend_from_slice(&encode_i64(min));
    out.push(k);

    if k == 0 {
        return out;
    }
    let mut writer = BitWriter::with_capacity(values.len() * k as usize / 8 + 1);
    for &v in values {
        let offset = (v as u64).wrapping_sub(min as u64);
        writer.write_bits(offset, k);
    }
    out.extend_from_slice(&writer.into_bytes());
    out
}

pub fn decompress(bytes: &[u8]) -> Result<Vec<i64>> {
    let count_slice = bytes.get(0..4).ok_or_else(|| {
        MalformedEncodingSnafu {
            msg: "truncated bits element count",
        }
        .build()
    })?;
    let mut buf = [0u8; 4];
    buf.copy_from_slice(count_slice);
    let count = u32::from_be_bytes(buf) as usize;
    if count == 0 {
        return Ok(Vec::new());
    }

    let min_slice = bytes.get(4..12).ok_or_else(|| {
        MalformedEncodingSnafu {
            msg: "truncated bits minimum value",
        }
        .build()
    })?;
    let min = decode_i64(min_slice);
    let k = *bytes.get(12).ok_or_else(|| {
        MalformedEncodingSnafu {
            msg: "truncated bits width byte",
        }
        .build()
    })?;
    if k > 64 {
        return MalformedEncodingSnafu {
            msg: format!("bits width {k} exceeds 64"),
        }
        .fail();
    }

    if k == 0 {
        return Ok(vec![min; count]);
    }
    let packed = &bytes[13..];
    let required_bits = (count as u128) * (k as u128);
    if required_bits > (packed.len() as u128) * 8 {
        return MalformedEncodingSnafu {
            msg: "bits element count exceeds remaining buffer length",
        }
        .fail();
    }
    let mut reader = BitReader::new(packed);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let offset = reader.read_bits(k).ok_or_else(|| {
            MalformedEncodingSnafu {
                msg: "truncated bits packed payload",
            }
            .build()
        })?;
        out.push(min.wrapping_add(offset as i64));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_round_trips_to_count_only() {
        let enc = compress(&[]);
        assert_eq!(enc, 0u32.to_be_bytes());
        assert_eq!(decompress(&enc).unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn constant_series_uses_zero_bit_width() {
        let v = vec![42i64; 1000];
        let enc = compress(&v);
        // count(4) + min(8) + k(1), no packed body.
        assert_eq!(enc.len(), 13);
        assert_eq!(decompress(&enc).unwrap(), v);
    }

    #[test]
    fn small_range_uses_few_bits_per_value() {
        let v: Vec<i64> = vec![10, 11, 12, 13, 10, 11];
        let enc = compress(&v);
        assert_eq!(decompress(&enc).unwrap(), v);
        // range 3 needs k=2 bits; 6 values = 12 bits = 2 bytes packed.
        assert_eq!(enc[12], 2);
        assert_eq!(enc.len(), 13 + 2);
    }

    #[test]
    fn full_i64_range_uses_64_bits() {
        let v = vec![i64::MIN, i64::MAX, 0];
        let enc = compress(&v);
        assert_eq!(enc[12], 64);
        assert_eq!(decompress(&enc).unwrap(), v);
    }

    #[test]
    fn truncated_payload_is_malformed_encoding() {
        let enc = compress(&[1, 2, 3, 4, 5, 100]);
        let truncated = &enc[..enc.len() - 1];
        assert!(decompress(truncated).is_err());
    }

    proptest! {
        #[test]
        fn round_trip_arbitrary(v in prop::collection::vec(any::<i64>(), 0..200)) {
            prop_assert_eq!(decompress(&compress(&v)).unwrap(), v);
        }

        #[test]
        fn round_trip_narrow_range(v in prop::collection::vec(0i64..64, 0..500)) {
            prop_assert_eq!(decompress(&compress(&v)).unwrap(), v);
        }
    }
}
