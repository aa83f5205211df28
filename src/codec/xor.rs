//! Gorilla-style XOR codec for Real values (`spec.md` §4.3.5). Each value
//! is XORed against its predecessor; a zero XOR costs one bit, a repeat of
//! the previous leading/trailing-zero window costs one control bit plus
//! the meaningful bits, and a new window costs a 5-bit leading-zero count
//! and 6-bit meaningful-length prefix before the meaningful bits.

use crate::bitio::{BitReader, BitWriter};
use crate::error::{MalformedEncodingSnafu, Result};

const LEADING_ZERO_BITS: u8 = 5;
const MEANINGFUL_LEN_BITS: u8 = 6;
const MAX_STORED_LEADING: u8 = (1 << LEADING_ZERO_BITS) - 1; // 31

fn bitmask(n: u8) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

pub fn compress(values: &[f64]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(values.len() as u32).to_be_bytes());
    if values.is_empty() {
        return out;
    }

    let mut writer = BitWriter::with_capacity(values.len() * 2);
    let first_bits = bytemuck::cast::<f64, u64>(values[0]);
    writer.write_bits(first_bits, 64);

    let mut prev_bits = first_bits;
    let mut prev_leading: u8 = 64;
    let mut prev_trailing: u8 = 64;

    for &v in &values[1..] {
        let bits = bytemuck::cast::<f64, u64>(v);
        let xor = bits ^ prev_bits;
        if xor == 0 {
            writer.write_bit(false);
        } else {
            writer.write_bit(true);
            let leading = (xor.leading_zeros() as u8).min(MAX_STORED_LEADING);
            let trailing = xor.trailing_zeros() as u8;

            if leading >= prev_leading && trailing >= prev_trailing {
                writer.write_bit(false);
                let meaningful_bits = 64 - prev_leading - prev_trailing;
                let meaningful = (xor >> prev_trailing) & bitmask(meaningful_bits);
                writer.write_bits(meaningful, meaningful_bits);
            } else {
                writer.write_bit(true);
                let meaningful_bits = 64 - leading - trailing;
                writer.write_bits(leading as u64, LEADING_ZERO_BITS);
                writer.write_bits((meaningful_bits - 1) as u64, MEANINGFUL_LEN_BITS);
                let meaningful = (xor >> trailing) & bitmask(meaningful_bits);
                writer.write_bits(meaningful, meaningful_bits);
                prev_leading = leading;
                prev_trailing = trailing;
            }
        }
        prev_bits = bits;
    }

    out.extend_from_slice(&writer.into_bytes());
    out
}

pub fn decompress(bytes: &[u8]) -> Result<Vec<f64>> {
    let count_slice = bytes.get(0..4).ok_or_else(|| {
        MalformedEncodingSnafu {
            msg: "truncated xor element count",
        }
        .build()
    })?;
    let mut buf = [0u8; 4];
    buf.copy_from_slice(count_slice);
    let count = u32::from_be_bytes(buf) as usize;
    if count == 0 {
        return Ok(Vec::new());
    }

    let payload = &bytes[4..];
    // Every element beyond the first costs at least one control bit; bound
    // `count` against that before reserving capacity.
    let min_required_bits = 64u128 + (count as u128 - 1);
    if min_required_bits > (payload.len() as u128) * 8 {
        return MalformedEncodingSnafu {
            msg: "xor element count exceeds remaining buffer length",
        }
        .fail();
    }

    let mut reader = BitReader::new(payload);
    let first_bits = reader.read_bits(64).ok_or_else(|| {
        MalformedEncodingSnafu {
            msg: "truncated xor first value",
        }
        .build()
    })?;

    let mut out = Vec::with_capacity(count);
    out.push(bytemuck::cast::<u64, f64>(first_bits));

    let mut prev_bits = first_bits;
    let mut prev_leading: u8 = 64;
    let mut prev_trailing: u8 = 64;

    while out.len() < count {
        let changed = reader.read_bit().ok_or_else(|| {
            MalformedEncodingSnafu {
                msg: "truncated xor control bit",
            }
            .build()
        })?;
        if !changed {
            out.push(bytemuck::cast::<u64, f64>(prev_bits));
            continue;
        }

        let reuse_window = !reader.read_bit().ok_or_else(|| {
            MalformedEncodingSnafu {
                msg: "truncated xor window control bit",
            }
            .build()
        })?;

        let (leading, trailing) = if reuse_window {
            (prev_leading, prev_trailing)
        } else {
            let leading = reader.read_bits(LEADING_ZERO_BITS).ok_or_else(|| {
                MalformedEncodingSnafu {
                    msg: "truncated xor leading-zero count",
                }
                .build()
            })? as u8;
            let meaningful_len = reader.read_bits(MEANINGFUL_LEN_BITS).ok_or_else(|| {
                MalformedEncodingSnafu {
                    msg: "truncated xor meaningful-length",
                }
                .build()
            })? as u8
                + 1;
            let trailing = 64u8
                .checked_sub(leading)
                .and_then(|r| r.checked_sub(meaningful_len))
                .ok_or_else(|| {
                    MalformedEncodingSnafu {
                        msg: "xor window widths overflow 64 bits",
                    }
                    .build()
                })?;
            (leading, trailing)
        };

        let meaningful_bits = 64 - leading - trailing;
        let meaningful = reader.read_bits(meaningful_bits).ok_or_else(|| {
            MalformedEncodingSnafu {
                msg: "truncated xor meaningful bits",
            }
            .build()
        })?;
        let xor = meaningful << trailing;
        let value_bits = prev_bits ^ xor;
        out.push(bytemuck::cast::<u64, f64>(value_bits));

        prev_bits = value_bits;
        prev_leading = leading;
        prev_trailing = trailing;
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
        assert_eq!(decompress(&enc).unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn single_value_round_trips() {
        let v = vec![99.99];
        let out = decompress(&compress(&v)).unwrap();
        assert_eq!(out[0].to_bits(), v[0].to_bits());
    }

    #[test]
    fn repeated_value_costs_one_bit_each() {
        let v = vec![42.0; 100];
        let enc = compress(&v);
        // 4 (count) + 8 (first value) + ceil(99 bits / 8)
        assert_eq!(enc.len(), 4 + 8 + (99usize + 7) / 8);
        let out = decompress(&enc).unwrap();
        for (a, b) in v.iter().zip(out.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn gradually_changing_series_exercises_both_windows() {
        let v: Vec<f64> = (0..50).map(|i| 12.0 + (i as f64) * 0.5).collect();
        let out = decompress(&compress(&v)).unwrap();
        assert_eq!(out.len(), v.len());
        for (a, b) in v.iter().zip(out.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn nan_and_infinities_round_trip_by_bit_pattern() {
        let v = vec![1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -0.0, 0.0];
        let out = decompress(&compress(&v)).unwrap();
        assert_eq!(out.len(), v.len());
        for (a, b) in v.iter().zip(out.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn truncated_stream_is_malformed_encoding() {
        let enc = compress(&[1.0, 2.0, 3.0]);
        let truncated = &enc[..enc.len() - 1];
        assert!(decompress(truncated).is_err());
    }

    proptest! {
        #[test]
        fn round_trip_arbitrary_bits(v in prop::collection::vec(any::<u64>(), 0..200)) {
            let values: Vec<f64> = v.iter().map(|&b| f64::from_bits(b)).collect();
            let out = decompress(&compress(&values)).unwrap();
            prop_assert_eq!(out.len(), values.len());
            for (a, b) in values.iter().zip(out.iter()) {
                prop_assert_eq!(a.to_bits(), b.to_bits());
            }
        }
    }
}
