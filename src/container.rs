//! The 8-byte-header container that bundles the compressed timestamp
//! payload and the compressed value payload into one buffer for Level 2 to
//! compress as a unit.

use crate::error::{MalformedContainerSnafu, Result};
use crate::primitives::{decode_u32, encode_u32};

/// Frames `timestamps` and `values` as
/// `u32_be(len(timestamps)) ‖ u32_be(len(values)) ‖ timestamps ‖ values`.
pub fn encode(timestamps: &[u8], values: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + timestamps.len() + values.len());
    out.extend_from_slice(&encode_u32(timestamps.len() as u32));
    out.extend_from_slice(&encode_u32(values.len() as u32));
    out.extend_from_slice(timestamps);
    out.extend_from_slice(values);
    out
}

/// Inverts [`encode`], failing with [`crate::error::Error::MalformedContainer`]
/// when the header is truncated or the declared lengths overrun the buffer.
pub fn decode(buf: &[u8]) -> Result<(&[u8], &[u8])> {
    if buf.len() < 8 {
        return MalformedContainerSnafu {
            msg: format!("container shorter than 8-byte header: {} bytes", buf.len()),
        }
        .fail();
    }
    let t_len = decode_u32(&buf[0..4]) as usize;
    let v_len = decode_u32(&buf[4..8]) as usize;
    let fits = 8usize
        .checked_add(t_len)
        .and_then(|n| n.checked_add(v_len))
        .is_some_and(|total| total <= buf.len());
    if !fits {
        return MalformedContainerSnafu {
            msg: format!(
                "declared lengths ({t_len} + {v_len} + 8 header bytes) exceed buffer length {}",
                buf.len()
            ),
        }
        .fail();
    }
    let timestamps = &buf[8..8 + t_len];
    let values = &buf[8 + t_len..8 + t_len + v_len];
    Ok((timestamps, values))
}
