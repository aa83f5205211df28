//! Delta-delta codec for Integer and Real values (`spec.md` §4.3.3): the
//! element count, then `v[0]`, then `v[1] − v[0]` at full width, then
//! second differences using the same flag-byte scheme as the timestamp
//! column (§4.4). `Real` reuses the `Integer` core by bit-casting to `i64`.

use crate::error::{MalformedEncodingSnafu, Result};
use crate::flagged_delta;
use crate::primitives::{decode_i64, encode_i64};

fn compress_i64_core(values: &[i64]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + values.len() * 2);
    out.extend_from_slice(&(values.len() as u32).to_be_bytes());
    if values.is_empty() {
        return out;
    }
    out.extend_from_slice(&encode_i64(values[0]));
    if values.len() == 1 {
        return out;
    }
    let first_delta = values[1].wrapping_sub(values[0]);
    out.extend_from_slice(&encode_i64(first_delta));

    let mut prev_delta = first_delta;
    let mut prev = values[1];
    for &v in &values[2..] {
        let delta = v.wrapping_sub(prev);
        let dd = delta.wrapping_sub(prev_delta);
        flagged_delta::write(&mut out, dd);
        prev_delta = delta;
        prev = v;
    }
    out
}

fn decompress_i64_core(bytes: &[u8]) -> Result<Vec<i64>> {
    let count_slice = bytes.get(0..4).ok_or_else(|| {
        MalformedEncodingSnafu {
            msg: "truncated delta-delta element count",
        }
        .build()
    })?;
    let mut buf = [0u8; 4];
    buf.copy_from_slice(count_slice);
    let count = u32::from_be_bytes(buf) as usize;
    let mut pos = 4;

    if count == 0 {
        return Ok(Vec::new());
    }
    let v0_slice = bytes.get(pos..pos + 8).ok_or_else(|| {
        MalformedEncodingSnafu {
            msg: "truncated delta-delta first value",
        }
        .build()
    })?;
    let v0 = decode_i64(v0_slice);
    pos += 8;

    // Every element beyond the first two costs at least a 1-byte flag plus a
    // 1-byte payload; bound `count` against that before reserving capacity.
    if count >= 2 {
        let remaining = bytes.len().saturating_sub(pos);
        let min_required = 8usize.saturating_add((count - 2).saturating_mul(2));
        if remaining < min_required {
            return MalformedEncodingSnafu {
                msg: "delta-delta element count exceeds remaining buffer length",
            }
            .fail();
        }
    }

    let mut out = Vec::with_capacity(count);
    out.push(v0);
    if count == 1 {
        return Ok(out);
    }

    let first_delta_slice = bytes.get(pos..pos + 8).ok_or_else(|| {
        MalformedEncodingSnafu {
            msg: "truncated delta-delta first delta",
        }
        .build()
    })?;
    let first_delta = decode_i64(first_delta_slice);
    pos += 8;
    let v1 = v0.wrapping_add(first_delta);
    out.push(v1);

    let mut prev_delta = first_delta;
    let mut prev = v1;
    while out.len() < count {
        let dd = flagged_delta::read(bytes, &mut pos)?;
        let delta = prev_delta.wrapping_add(dd);
        let value = prev.wrapping_add(delta);
        out.push(value);
        prev_delta = delta;
        prev = value;
    }
    Ok(out)
}

pub fn compress_i64(values: &[i64]) -> Vec<u8> {
    compress_i64_core(values)
}

pub fn decompress_i64(bytes: &[u8]) -> Result<Vec<i64>> {
    decompress_i64_core(bytes)
}

pub fn compress_f64(values: &[f64]) -> Vec<u8> {
    let bits: Vec<i64> = values
        .iter()
        .map(|&v| bytemuck::cast::<f64, i64>(v))
        .collect();
    compress_i64_core(&bits)
}

pub fn decompress_f64(bytes: &[u8]) -> Result<Vec<f64>> {
    let bits = decompress_i64_core(bytes)?;
    Ok(bits
        .into_iter()
        .map(|b| bytemuck::cast::<i64, f64>(b))
        .collect())
}
