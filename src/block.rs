//! Series-block orchestrator (`spec.md` §4.5): the one public entry point
//! that wires the timestamp codec, the L1 value codec selected by
//! `(ValueKind, L1Algo)`, the container frame, and the L2 compressor into a
//! single compress/decompress pair.

use tracing::{debug, warn};

use crate::coerce;
use crate::codec::{bits, delta_delta, dictionary, ninguno, rle, xor};
use crate::container;
use crate::error::{InvariantViolationSnafu, Result, UnsupportedAlgorithmSnafu};
use crate::l2;
use crate::timestamp;
use crate::value::{is_supported, L1Algo, L2Algo, Measurement, Value, ValueKind};

/// Compresses a series under the given `(kind, l1, l2)` triple.
///
/// `kind` must match the runtime tag carried by every `Value` in `series`
/// (checked via [`crate::coerce`]), and `(kind, l1)` must be one of the
/// supported pairs in the kind/algorithm support matrix.
pub fn compress_block(
    series: &[Measurement],
    kind: ValueKind,
    l1: L1Algo,
    l2: L2Algo,
) -> Result<Vec<u8>> {
    debug!(len = series.len(), ?kind, ?l1, ?l2, "compressing series block");
    let result = compress_block_inner(series, kind, l1, l2);
    match &result {
        Ok(compressed) => debug!(
            raw_len = series.len(),
            compressed_len = compressed.len(),
            "compressed series block"
        ),
        Err(err) => warn!(?kind, ?l1, ?l2, %err, "failed to compress series block"),
    }
    result
}

fn compress_block_inner(
    series: &[Measurement],
    kind: ValueKind,
    l1: L1Algo,
    l2: L2Algo,
) -> Result<Vec<u8>> {
    if !is_supported(kind, l1) {
        return UnsupportedAlgorithmSnafu { kind, l1 }.fail();
    }

    let timestamps: Vec<i64> = series.iter().map(|m| m.timestamp).collect();
    let values: Vec<Value> = series.iter().map(|m| m.value.clone()).collect();

    let tc = timestamp::encode(&timestamps);
    let vc = encode_values(&values, kind, l1)?;
    let framed = container::encode(&tc, &vc);
    l2::compress(l2, &framed)
}

/// Decompresses a series previously produced by [`compress_block`] with the
/// same `(kind, l1, l2)` triple.
pub fn decompress_block(
    bytes: &[u8],
    kind: ValueKind,
    l1: L1Algo,
    l2: L2Algo,
) -> Result<Vec<Measurement>> {
    let result = decompress_block_inner(bytes, kind, l1, l2);
    match &result {
        Ok(series) => debug!(len = series.len(), ?kind, ?l1, ?l2, "decompressed series block"),
        Err(err) => warn!(?kind, ?l1, ?l2, %err, "failed to decompress series block"),
    }
    result
}

fn decompress_block_inner(
    bytes: &[u8],
    kind: ValueKind,
    l1: L1Algo,
    l2: L2Algo,
) -> Result<Vec<Measurement>> {
    if !is_supported(kind, l1) {
        return UnsupportedAlgorithmSnafu { kind, l1 }.fail();
    }

    let framed = l2::decompress(l2, bytes)?;
    let (tc, vc) = container::decode(&framed)?;
    let timestamps = timestamp::decode(tc)?;
    let values = decode_values(vc, kind, l1)?;

    if timestamps.len() != values.len() {
        return InvariantViolationSnafu {
            timestamps: timestamps.len(),
            values: values.len(),
        }
        .fail();
    }

    Ok(timestamps
        .into_iter()
        .zip(values)
        .map(|(timestamp, value)| Measurement { timestamp, value })
        .collect())
}

fn encode_values(values: &[Value], kind: ValueKind, l1: L1Algo) -> Result<Vec<u8>> {
    use L1Algo::*;
    use ValueKind::*;
    match (kind, l1) {
        (Boolean, Ninguno) => Ok(ninguno::compress_bool(&coerce::to_bool_vec(values)?)),
        (Boolean, Rle) => Ok(rle::compress_bool(&coerce::to_bool_vec(values)?)),

        (Integer, Ninguno) => Ok(ninguno::compress_i64(&coerce::to_i64_vec(values)?)),
        (Integer, Rle) => Ok(rle::compress_i64(&coerce::to_i64_vec(values)?)),
        (Integer, DeltaDelta) => Ok(delta_delta::compress_i64(&coerce::to_i64_vec(values)?)),
        (Integer, Bits) => Ok(bits::compress(&coerce::to_i64_vec(values)?)),

        (Real, Ninguno) => Ok(ninguno::compress_f64(&coerce::to_f64_vec(values)?)),
        (Real, Rle) => Ok(rle::compress_f64(&coerce::to_f64_vec(values)?)),
        (Real, DeltaDelta) => Ok(delta_delta::compress_f64(&coerce::to_f64_vec(values)?)),
        (Real, Xor) => Ok(xor::compress(&coerce::to_f64_vec(values)?)),

        (Text, Ninguno) => Ok(ninguno::compress_string(&coerce::to_string_vec(values)?)),
        (Text, Rle) => Ok(rle::compress_string(&coerce::to_string_vec(values)?)),
        (Text, Dictionary) => Ok(dictionary::compress(&coerce::to_string_vec(values)?)),

        _ => UnsupportedAlgorithmSnafu { kind, l1 }.fail(),
    }
}

fn decode_values(bytes: &[u8], kind: ValueKind, l1: L1Algo) -> Result<Vec<Value>> {
    use L1Algo::*;
    use ValueKind::*;
    match (kind, l1) {
        (Boolean, Ninguno) => Ok(ninguno::decompress_bool(bytes)?
            .into_iter()
            .map(Value::Boolean)
            .collect()),
        (Boolean, Rle) => Ok(rle::decompress_bool(bytes)?
            .into_iter()
            .map(Value::Boolean)
            .collect()),

        (Integer, Ninguno) => Ok(ninguno::decompress_i64(bytes)?
            .into_iter()
            .map(Value::Integer)
            .collect()),
        (Integer, Rle) => Ok(rle::decompress_i64(bytes)?
            .into_iter()
            .map(Value::Integer)
            .collect()),
        (Integer, DeltaDelta) => Ok(delta_delta::decompress_i64(bytes)?
            .into_iter()
            .map(Value::Integer)
            .collect()),
        (Integer, Bits) => Ok(bits::decompress(bytes)?
            .into_iter()
            .map(Value::Integer)
            .collect()),

        (Real, Ninguno) => Ok(ninguno::decompress_f64(bytes)?
            .into_iter()
            .map(Value::Real)
            .collect()),
        (Real, Rle) => Ok(rle::decompress_f64(bytes)?
            .into_iter()
            .map(Value::Real)
            .collect()),
        (Real, DeltaDelta) => Ok(delta_delta::decompress_f64(bytes)?
            .into_iter()
            .map(Value::Real)
            .collect()),
        (Real, Xor) => Ok(xor::decompress(bytes)?.into_iter().map(Value::Real).collect()),

        (Text, Ninguno) => Ok(ninguno::decompress_string(bytes)?
            .into_iter()
            .map(Value::Text)
            .collect()),
        (Text, Rle) => Ok(rle::decompress_string(bytes)?
            .into_iter()
            .map(Value::Text)
            .collect()),
        (Text, Dictionary) => Ok(dictionary::decompress(bytes)?
            .into_iter()
            .map(Value::Text)
            .collect()),

        _ => UnsupportedAlgorithmSnafu { kind, l1 }.fail(),
    }
}
