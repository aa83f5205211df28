//! The measurement data model: [`Value`], [`Measurement`], and the closed
//! enumerations that select a codec pairing.

use serde::{Deserialize, Serialize};

/// A single sensor reading. The tag carried by `value` determines which
/// element of the `(kind, l1, l2)` triple must be used to encode the series
/// this measurement belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub timestamp: i64,
    pub value: Value,
}

impl Measurement {
    pub fn new(timestamp: i64, value: Value) -> Self {
        Self { timestamp, value }
    }
}

/// A sensor value. `Real` equality is bit-pattern identity (not IEEE 754
/// equality), so that `NaN` values form well-defined equality classes for
/// the RLE codec.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Real(a), Value::Real(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Real(_) => ValueKind::Real,
            Value::Text(_) => ValueKind::Text,
        }
    }
}

/// A series is an ordered sequence of measurements sharing one [`Value`] tag.
/// The empty series is representable and always compresses to the empty
/// byte sequence.
pub type Series = Vec<Measurement>;

/// The closed set of value kinds a series may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Boolean,
    Integer,
    Real,
    Text,
}

/// The closed set of Level 1 (value-aware) codec algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum L1Algo {
    Ninguno,
    Rle,
    DeltaDelta,
    Bits,
    Xor,
    Dictionary,
}

/// The closed set of Level 2 (generic byte-stream) compressors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum L2Algo {
    #[default]
    Ninguna,
    Lz4,
    Zstd,
    Snappy,
    Gzip,
}

/// The codec triple selecting how a series is encoded: its value kind, the
/// L1 value codec, and the L2 byte-stream compressor. Deserializable from
/// configuration sources (e.g. a JSON or TOML block-level policy) via serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockConfig {
    pub kind: ValueKind,
    pub l1: L1Algo,
    pub l2: L2Algo,
}

/// Returns whether `(kind, algo)` is one of the supported pairs in the
/// kind/algorithm support matrix.
pub fn is_supported(kind: ValueKind, algo: L1Algo) -> bool {
    use L1Algo::*;
    use ValueKind::*;
    matches!(
        (kind, algo),
        (Boolean, Ninguno)
            | (Boolean, Rle)
            | (Integer, Ninguno)
            | (Integer, Rle)
            | (Integer, DeltaDelta)
            | (Integer, Bits)
            | (Real, Ninguno)
            | (Real, Rle)
            | (Real, DeltaDelta)
            | (Real, Xor)
            | (Text, Ninguno)
            | (Text, Rle)
            | (Text, Dictionary)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn support_matrix_matches_spec_table() {
        assert!(is_supported(ValueKind::Boolean, L1Algo::Ninguno));
        assert!(is_supported(ValueKind::Boolean, L1Algo::Rle));
        assert!(!is_supported(ValueKind::Boolean, L1Algo::DeltaDelta));
        assert!(!is_supported(ValueKind::Boolean, L1Algo::Bits));
        assert!(!is_supported(ValueKind::Boolean, L1Algo::Xor));
        assert!(!is_supported(ValueKind::Boolean, L1Algo::Dictionary));

        assert!(is_supported(ValueKind::Integer, L1Algo::DeltaDelta));
        assert!(is_supported(ValueKind::Integer, L1Algo::Bits));
        assert!(!is_supported(ValueKind::Integer, L1Algo::Xor));
        assert!(!is_supported(ValueKind::Integer, L1Algo::Dictionary));

        assert!(is_supported(ValueKind::Real, L1Algo::DeltaDelta));
        assert!(is_supported(ValueKind::Real, L1Algo::Xor));
        assert!(!is_supported(ValueKind::Real, L1Algo::Bits));
        assert!(!is_supported(ValueKind::Real, L1Algo::Dictionary));

        assert!(is_supported(ValueKind::Text, L1Algo::Dictionary));
        assert!(!is_supported(ValueKind::Text, L1Algo::DeltaDelta));
        assert!(!is_supported(ValueKind::Text, L1Algo::Bits));
        assert!(!is_supported(ValueKind::Text, L1Algo::Xor));
    }

    #[test]
    fn nan_real_equality_is_bitwise() {
        let a = Value::Real(f64::NAN);
        let b = Value::Real(f64::NAN);
        assert_eq!(a, b);

        let c = Value::Real(f64::from_bits(f64::NAN.to_bits() ^ 1));
        assert_ne!(a, c);
    }

    #[test]
    fn block_config_round_trips_through_json() {
        let config = BlockConfig {
            kind: ValueKind::Real,
            l1: L1Algo::Xor,
            l2: L2Algo::Zstd,
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: BlockConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn l2_algo_default_is_ninguna() {
        assert_eq!(L2Algo::default(), L2Algo::Ninguna);
    }
}
