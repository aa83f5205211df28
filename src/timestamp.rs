//! Specialized delta-delta codec for the timestamp column, always applied
//! regardless of series value kind. Framing is a first full-width value,
//! an optional first delta, then a per-sample flag byte selecting a
//! 1/2/4/8-byte delta-delta payload (`spec.md` §4.4).

use crate::error::{MalformedEncodingSnafu, Result};
use crate::flagged_delta;
use crate::primitives::{decode_i64, encode_i64};

#[cfg(test)]
use flagged_delta::{FLAG_I16, FLAG_I32, FLAG_I64, FLAG_I8};

/// Encodes a timestamp column. Empty input encodes to empty bytes.
pub fn encode(timestamps: &[i64]) -> Vec<u8> {
    let mut out = Vec::with_capacity(timestamps.len() * 2);
    if timestamps.is_empty() {
        return out;
    }
    out.extend_from_slice(&encode_i64(timestamps[0]));
    if timestamps.len() == 1 {
        return out;
    }
    let first_delta = timestamps[1].wrapping_sub(timestamps[0]);
    out.extend_from_slice(&encode_i64(first_delta));

    let mut prev_delta = first_delta;
    let mut prev = timestamps[1];
    for &t in &timestamps[2..] {
        let delta = t.wrapping_sub(prev);
        let dd = delta.wrapping_sub(prev_delta);
        flagged_delta::write(&mut out, dd);
        prev_delta = delta;
        prev = t;
    }
    out
}

/// Decodes a byte stream produced by [`encode`].
pub fn decode(bytes: &[u8]) -> Result<Vec<i64>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    if bytes.len() < 8 {
        return MalformedEncodingSnafu {
            msg: "timestamp stream shorter than first value width",
        }
        .fail();
    }
    let mut pos = 8;
    let first = decode_i64(&bytes[0..8]);
    let mut out = vec![first];

    if bytes.len() == 8 {
        return Ok(out);
    }
    if bytes.len() < pos + 8 {
        return MalformedEncodingSnafu {
            msg: "timestamp stream truncated in first delta",
        }
        .fail();
    }
    let first_delta = decode_i64(&bytes[pos..pos + 8]);
    pos += 8;
    let second = first.wrapping_add(first_delta);
    out.push(second);

    let mut prev_delta = first_delta;
    let mut prev = second;

    while pos < bytes.len() {
        let dd = flagged_delta::read(bytes, &mut pos)?;
        let delta = prev_delta.wrapping_add(dd);
        let value = prev.wrapping_add(delta);
        out.push(value);
        prev_delta = delta;
        prev = value;
    }

    Ok(out)
}
