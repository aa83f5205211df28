//! Dictionary codec for Text values (`spec.md` §4.3.6): the distinct
//! values in first-seen order, followed by the element count and a
//! bit-packed array of `k = ceil(log2(max(D, 1)))`-bit indices into that
//! dictionary.

use super::elem::{read_string, write_string};
use crate::bitio::{BitReader, BitWriter};
use crate::error::{MalformedEncodingSnafu, Result};

fn index_width(distinct_count: usize) -> u8 {
    if distinct_count <= 1 {
        0
    } else {
        let range = (distinct_count - 1) as u64;
        (64 - range.leading_zeros()) as u8
    }
}

pub fn compress(values: &[String]) -> Vec<u8> {
    let mut dictionary: Vec<&str> = Vec::new();
    let mut indices = Vec::with_capacity(values.len());
    for v in values {
        let idx = match dictionary.iter().position(|d| *d == v) {
            Some(i) => i,
            None => {
                dictionary.push(v);
                dictionary.len() - 1
            }
        };
        indices.push(idx as u64);
    }

    let mut out = Vec::new();
    out.extend_from_slice(&(dictionary.len() as u32).to_be_bytes());
    for d in &dictionary {
        write_string(&mut out, d);
    }
    out.extend_from_slice(&(values.len() as u32).to_be_bytes());
    if values.is_empty() {
        return out;
    }

    let k = index_width(dictionary.len());
    if k == 0 {
        return out;
    }
    let mut writer = BitWriter::with_capacity(values.len() * k as usize / 8 + 1);
    for idx in indices {
        writer.write_bits(idx, k);
    }
    out.extend_from_slice(&writer.into_bytes());
    out
}

pub fn decompress(bytes: &[u8]) -> Result<Vec<String>> {
    let mut pos = 0;
    let d_slice = bytes.get(0..4).ok_or_else(|| {
        MalformedEncodingSnafu {
            msg: "truncated dictionary distinct-value count",
        }
        .build()
    })?;
    let mut buf = [0u8; 4];
    buf.copy_from_slice(d_slice);
    let distinct_count = u32::from_be_bytes(buf) as usize;
    pos += 4;

    // Every dictionary entry costs at least 4 bytes (its own length prefix),
    // so this bounds the count without walking the buffer twice.
    if distinct_count > bytes.len().saturating_sub(pos) / 4 {
        return MalformedEncodingSnafu {
            msg: "dictionary distinct-value count exceeds remaining buffer length",
        }
        .fail();
    }
    let mut dictionary = Vec::with_capacity(distinct_count);
    for _ in 0..distinct_count {
        dictionary.push(read_string(bytes, &mut pos)?);
    }

    let n_slice = bytes.get(pos..pos + 4).ok_or_else(|| {
        MalformedEncodingSnafu {
            msg: "truncated dictionary element count",
        }
        .build()
    })?;
    buf.copy_from_slice(n_slice);
    let count = u32::from_be_bytes(buf) as usize;
    pos += 4;

    if count == 0 {
        return Ok(Vec::new());
    }
    if distinct_count == 0 {
        return MalformedEncodingSnafu {
            msg: "dictionary has elements but no distinct values",
        }
        .fail();
    }

    let k = index_width(distinct_count);
    if k == 0 {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(dictionary[0].clone());
        }
        return Ok(out);
    }

    let packed = &bytes[pos..];
    let required_bits = (count as u128) * (k as u128);
    if required_bits > (packed.len() as u128) * 8 {
        return MalformedEncodingSnafu {
            msg: "dictionary element count exceeds remaining buffer length",
        }
        .fail();
    }
    let mut out = Vec::with_capacity(count);
    let mut reader = BitReader::new(packed);
    for _ in 0..count {
        let idx = reader.read_bits(k).ok_or_else(|| {
            MalformedEncodingSnafu {
                msg: "truncated dictionary index payload",
            }
            .build()
        })? as usize;
        let value = dictionary.get(idx).ok_or_else(|| {
            MalformedEncodingSnafu {
                msg: format!("dictionary index {idx} out of range"),
            }
            .build()
        })?;
        out.push(value.clone());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_input_is_unambiguous() {
        let enc = compress(&[]);
        assert_eq!(enc, [0u8, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(decompress(&enc).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn single_distinct_value_uses_zero_bit_width() {
        let v = vec!["ok".to_string(); 50];
        let enc = compress(&v);
        assert_eq!(decompress(&enc).unwrap(), v);
    }

    #[test]
    fn repeated_small_vocabulary_round_trips() {
        let v: Vec<String> = ["a", "b", "a", "c", "b", "a"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let enc = compress(&v);
        assert_eq!(decompress(&enc).unwrap(), v);
        // D=3 needs k=2 bits; dictionary header uses first-seen order a,b,c.
        assert_eq!(u32::from_be_bytes(enc[0..4].try_into().unwrap()), 3);
    }

    #[test]
    fn all_distinct_values_round_trip() {
        let v: Vec<String> = (0..40).map(|i| format!("v{i}")).collect();
        assert_eq!(decompress(&compress(&v)).unwrap(), v);
    }

    #[test]
    fn out_of_range_index_is_malformed_encoding() {
        // D=3 needs k=2 bits per index (max representable value 3); corrupting
        // the packed byte to all-ones yields index 3, out of range for D=3.
        let mut enc = compress(&["a".to_string(), "b".to_string(), "c".to_string()]);
        let last = enc.len() - 1;
        enc[last] = 0xFF;
        assert!(decompress(&enc).is_err());
    }

    proptest! {
        #[test]
        fn round_trip_small_vocabulary(v in prop::collection::vec("[a-e]{1,2}", 0..300)) {
            prop_assert_eq!(decompress(&compress(&v)).unwrap(), v);
        }
    }
}
