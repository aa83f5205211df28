//! Per-element wire framing shared by the Ninguno and RLE codecs
//! (`spec.md` §4.3.1): each primitive kind has one canonical serialized
//! form, and both codecs reuse it rather than inventing their own.

use crate::error::{MalformedEncodingSnafu, Result};
use crate::primitives::{decode_i64, decode_u32, encode_i32, encode_i64};

pub fn write_bool(out: &mut Vec<u8>, v: bool) {
    out.push(v as u8);
}

pub fn read_bool(bytes: &[u8], pos: &mut usize) -> Result<bool> {
    let b = *bytes.get(*pos).ok_or_else(|| {
        MalformedEncodingSnafu {
            msg: "truncated bool element",
        }
        .build()
    })?;
    *pos += 1;
    Ok(b != 0)
}

pub fn write_i64(out: &mut Vec<u8>, v: i64) {
    out.extend_from_slice(&encode_i64(v));
}

pub fn read_i64(bytes: &[u8], pos: &mut usize) -> Result<i64> {
    let slice = bytes.get(*pos..*pos + 8).ok_or_else(|| {
        MalformedEncodingSnafu {
            msg: "truncated i64 element",
        }
        .build()
    })?;
    *pos += 8;
    Ok(decode_i64(slice))
}

pub fn write_f64(out: &mut Vec<u8>, v: f64) {
    out.extend_from_slice(&bytemuck::cast::<f64, u64>(v).to_be_bytes());
}

pub fn read_f64(bytes: &[u8], pos: &mut usize) -> Result<f64> {
    let slice = bytes.get(*pos..*pos + 8).ok_or_else(|| {
        MalformedEncodingSnafu {
            msg: "truncated f64 element",
        }
        .build()
    })?;
    *pos += 8;
    let mut buf = [0u8; 8];
    buf.copy_from_slice(slice);
    Ok(bytemuck::cast::<u64, f64>(u64::from_be_bytes(buf)))
}

pub fn write_string(out: &mut Vec<u8>, v: &str) {
    let bytes = v.as_bytes();
    out.extend_from_slice(&encode_i32(bytes.len() as i32));
    out.extend_from_slice(bytes);
}

pub fn read_string(bytes: &[u8], pos: &mut usize) -> Result<String> {
    let len_slice = bytes.get(*pos..*pos + 4).ok_or_else(|| {
        MalformedEncodingSnafu {
            msg: "truncated string length prefix",
        }
        .build()
    })?;
    let len = decode_u32(len_slice) as usize;
    *pos += 4;
    let str_slice = bytes.get(*pos..*pos + len).ok_or_else(|| {
        MalformedEncodingSnafu {
            msg: "truncated string payload",
        }
        .build()
    })?;
    *pos += len;
    String::from_utf8(str_slice.to_vec()).map_err(|_| {
        MalformedEncodingSnafu {
            msg: "string payload is not valid UTF-8",
        }
        .build()
    })
}

pub fn write_count(out: &mut Vec<u8>, count: usize) {
    out.extend_from_slice(&encode_i32(count as i32));
}

pub fn read_count(bytes: &[u8], pos: &mut usize) -> Result<usize> {
    let slice = bytes.get(*pos..*pos + 4).ok_or_else(|| {
        MalformedEncodingSnafu {
            msg: "truncated element count",
        }
        .build()
    })?;
    *pos += 4;
    let count = decode_u32(slice) as usize;
    if count > bytes.len().saturating_sub(*pos) {
        return MalformedEncodingSnafu {
            msg: "element count exceeds remaining buffer length",
        }
        .fail();
    }
    Ok(count)
}
