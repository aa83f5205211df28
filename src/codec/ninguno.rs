//! Ninguno: identity codec, a length-prefixed dump of each element's
//! canonical wire representation (`spec.md` §4.3.1).

use super::elem::{
    read_bool, read_count, read_f64, read_i64, read_string, write_bool, write_count, write_f64,
    write_i64, write_string,
};
use crate::error::Result;

pub fn compress_bool(values: &[bool]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + values.len());
    write_count(&mut out, values.len());
    for &v in values {
        write_bool(&mut out, v);
    }
    out
}

pub fn decompress_bool(bytes: &[u8]) -> Result<Vec<bool>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    let mut pos = 0;
    let count = read_count(bytes, &mut pos)?;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(read_bool(bytes, &mut pos)?);
    }
    Ok(out)
}

pub fn compress_i64(values: &[i64]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + values.len() * 8);
    write_count(&mut out, values.len());
    for &v in values {
        write_i64(&mut out, v);
    }
    out
}

pub fn decompress_i64(bytes: &[u8]) -> Result<Vec<i64>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    let mut pos = 0;
    let count = read_count(bytes, &mut pos)?;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(read_i64(bytes, &mut pos)?);
    }
    Ok(out)
}

pub fn compress_f64(values: &[f64]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + values.len() * 8);
    write_count(&mut out, values.len());
    for &v in values {
        write_f64(&mut out, v);
    }
    out
}

pub fn decompress_f64(bytes: &[u8]) -> Result<Vec<f64>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    let mut pos = 0;
    let count = read_count(bytes, &mut pos)?;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(read_f64(bytes, &mut pos)?);
    }
    Ok(out)
}

pub fn compress_string(values: &[String]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + values.len() * 8);
    write_count(&mut out, values.len());
    for v in values {
        write_string(&mut out, v);
    }
    out
}

pub fn decompress_string(bytes: &[u8]) -> Result<Vec<String>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    let mut pos = 0;
    let count = read_count(bytes, &mut pos)?;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(read_string(bytes, &mut pos)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_round_trips_to_empty_bytes() {
        assert!(compress_bool(&[]).is_empty());
        assert!(compress_i64(&[]).is_empty());
        assert!(compress_f64(&[]).is_empty());
        assert!(compress_string(&[]).is_empty());
    }

    #[test]
    fn bool_round_trip() {
        let v = vec![true, false, true, true];
        assert_eq!(decompress_bool(&compress_bool(&v)).unwrap(), v);
    }

    #[test]
    fn i64_round_trip_edge_values() {
        let v = vec![i64::MIN, i64::MAX, 0, -1];
        assert_eq!(decompress_i64(&compress_i64(&v)).unwrap(), v);
    }

    #[test]
    fn f64_round_trip_special_values() {
        let v = vec![f64::INFINITY, f64::NEG_INFINITY, f64::MIN_POSITIVE, 0.0, -0.0];
        let out = decompress_f64(&compress_f64(&v)).unwrap();
        assert_eq!(out.len(), v.len());
        for (a, b) in v.iter().zip(out.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn string_round_trip_including_multibyte() {
        let v = vec!["hello".to_string(), "".to_string(), "日本語".to_string()];
        assert_eq!(decompress_string(&compress_string(&v)).unwrap(), v);
    }

    proptest! {
        #[test]
        fn round_trip_i64(v in prop::collection::vec(any::<i64>(), 0..200)) {
            prop_assert_eq!(decompress_i64(&compress_i64(&v)).unwrap(), v);
        }

        #[test]
        fn round_trip_bool(v in prop::collection::vec(any::<bool>(), 0..200)) {
            prop_assert_eq!(decompress_bool(&compress_bool(&v)).unwrap(), v);
        }

        #[test]
        fn round_trip_string(v in prop::collection::vec("[a-zA-Z0-9]{0,20}", 0..50)) {
            prop_assert_eq!(decompress_string(&compress_string(&v)).unwrap(), v);
        }
    }
}
