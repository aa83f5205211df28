//! Run-length encoding over equality (`spec.md` §4.3.2). Runs are
//! greedy-maximal: a run ends only when the next element differs. `f64`
//! equality is bit-pattern identity so `NaN` runs are well-defined (see
//! [`crate::value::Value`]'s `PartialEq` impl for the same choice).

use super::elem::{
    read_bool, read_count, read_f64, read_i64, read_string, write_bool, write_count, write_f64,
    write_i64, write_string,
};
use crate::error::Result;

fn compress_generic<T: Clone>(
    values: &[T],
    write_elem: impl Fn(&mut Vec<u8>, &T),
    eq: impl Fn(&T, &T) -> bool,
) -> Vec<u8> {
    let mut out = Vec::new();
    write_count(&mut out, values.len());
    let mut i = 0;
    while i < values.len() {
        let mut run_len: u32 = 1;
        while i + (run_len as usize) < values.len() && eq(&values[i], &values[i + run_len as usize])
        {
            run_len += 1;
        }
        out.extend_from_slice(&run_len.to_be_bytes());
        write_elem(&mut out, &values[i]);
        i += run_len as usize;
    }
    out
}

fn decompress_generic<T>(
    bytes: &[u8],
    read_elem: impl Fn(&[u8], &mut usize) -> Result<T>,
) -> Result<Vec<T>>
where
    T: Clone,
{
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    let mut pos = 0;
    let count = read_count(bytes, &mut pos)?;
    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        let run_slice = bytes.get(pos..pos + 4).ok_or_else(|| {
            crate::error::MalformedEncodingSnafu {
                msg: "truncated RLE run length",
            }
            .build()
        })?;
        let mut buf = [0u8; 4];
        buf.copy_from_slice(run_slice);
        let run_len = u32::from_be_bytes(buf) as usize;
        pos += 4;
        if run_len > count - out.len() {
            return Err(crate::error::MalformedEncodingSnafu {
                msg: "RLE run length overruns declared element count",
            }
            .build());
        }
        let value = read_elem(bytes, &mut pos)?;
        for _ in 0..run_len {
            out.push(value.clone());
        }
    }
    Ok(out)
}

pub fn compress_bool(values: &[bool]) -> Vec<u8> {
    compress_generic(values, write_bool, |a, b| a == b)
}

pub fn decompress_bool(bytes: &[u8]) -> Result<Vec<bool>> {
    decompress_generic(bytes, read_bool)
}

pub fn compress_i64(values: &[i64]) -> Vec<u8> {
    compress_generic(values, write_i64, |a, b| a == b)
}

pub fn decompress_i64(bytes: &[u8]) -> Result<Vec<i64>> {
    decompress_generic(bytes, read_i64)
}

pub fn compress_f64(values: &[f64]) -> Vec<u8> {
    compress_generic(values, write_f64, |a, b| a.to_bits() == b.to_bits())
}

pub fn decompress_f64(bytes: &[u8]) -> Result<Vec<f64>> {
    decompress_generic(bytes, read_f64)
}

pub fn compress_string(values: &[String]) -> Vec<u8> {
    compress_generic(values, |out, v| write_string(out, v), |a, b| a == b)
}

pub fn decompress_string(bytes: &[u8]) -> Result<Vec<String>> {
    decompress_generic(bytes, read_string)
}
