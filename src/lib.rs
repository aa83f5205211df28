//! A two-level compression codec for sensor measurement time-series blocks:
//! per-kind, value-aware Level 1 codecs (Ninguno, RLE, Delta-Delta, Bits,
//! XOR, Dictionary) layered under a generic Level 2 byte-stream compressor
//! (none, LZ4, Zstd, Snappy, Gzip).
//!
//! [`compress_block`] and [`decompress_block`] are the two public entry
//! points; everything else in this crate exists to support them.

pub mod bitio;
pub mod block;
pub mod codec;
pub mod coerce;
pub mod container;
pub mod error;
pub mod flagged_delta;
pub mod l2;
pub mod primitives;
pub mod timestamp;
pub mod value;

pub use block::{compress_block, decompress_block};
pub use error::{Error, Result};
pub use value::{BlockConfig, L1Algo, L2Algo, Measurement, Series, Value, ValueKind};
