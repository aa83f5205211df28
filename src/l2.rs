//! Level 2 generic byte-stream compressors (`spec.md` §4.2). Each variant
//! bridges to a real compression crate the same way the L1 container bridges
//! to its own codecs: one function pair per [`L2Algo`], wrapping crate-local
//! errors into [`crate::error::Error::L2Failure`].

use std::io::{self, Read, Write};

use snafu::ResultExt;

use crate::error::{L2FailureSnafu, Result};
use crate::value::L2Algo;

pub fn compress(algo: L2Algo, bytes: &[u8]) -> Result<Vec<u8>> {
    match algo {
        L2Algo::Ninguna => Ok(bytes.to_vec()),
        L2Algo::Lz4 => Ok(lz4_flex::block::compress_prepend_size(bytes)),
        L2Algo::Zstd => {
            let mut encoder =
                zstd::stream::write::Encoder::new(Vec::new(), 0).context(L2FailureSnafu { algo })?;
            encoder.write_all(bytes).context(L2FailureSnafu { algo })?;
            encoder.finish().context(L2FailureSnafu { algo })
        }
        L2Algo::Snappy => {
            let mut encoder = snap::raw::Encoder::new();
            encoder
                .compress_vec(bytes)
                .map_err(to_io_error)
                .context(L2FailureSnafu { algo })
        }
        L2Algo::Gzip => {
            let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(bytes).context(L2FailureSnafu { algo })?;
            encoder.finish().context(L2FailureSnafu { algo })
        }
    }
}

pub fn decompress(algo: L2Algo, bytes: &[u8]) -> Result<Vec<u8>> {
    match algo {
        L2Algo::Ninguna => Ok(bytes.to_vec()),
        L2Algo::Lz4 => lz4_flex::block::decompress_size_prepended(bytes)
            .map_err(to_io_error)
            .context(L2FailureSnafu { algo }),
        L2Algo::Zstd => {
            let mut decoder =
                zstd::stream::read::Decoder::new(bytes).context(L2FailureSnafu { algo })?;
            let mut out = Vec::new();
            decoder.read_to_end(&mut out).context(L2FailureSnafu { algo })?;
            Ok(out)
        }
        L2Algo::Snappy => {
            let len = snap::raw::decompress_len(bytes)
                .map_err(to_io_error)
                .context(L2FailureSnafu { algo })?;
            let mut out = vec![0u8; len];
            let mut decoder = snap::raw::Decoder::new();
            decoder
                .decompress(bytes, &mut out)
                .map_err(to_io_error)
                .context(L2FailureSnafu { algo })?;
            Ok(out)
        }
        L2Algo::Gzip => {
            let mut decoder = flate2::read::GzDecoder::new(bytes);
            let mut out = Vec::new();
            decoder.read_to_end(&mut out).context(L2FailureSnafu { algo })?;
            Ok(out)
        }
    }
}

fn to_io_error<E: std::error::Error + Send + Sync + 'static>(err: E) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(algo: L2Algo) {
        let payload = b"the quick brown fox jumps over the lazy dog, repeated, repeated, repeated";
        let compressed = compress(algo, payload).unwrap();
        let decompressed = decompress(algo, &compressed).unwrap();
        assert_eq!(decompressed, payload);
    }

    #[test]
    fn ninguna_is_identity() {
        round_trip(L2Algo::Ninguna);
        assert_eq!(compress(L2Algo::Ninguna, b"abc").unwrap(), b"abc");
    }

    #[test]
    fn lz4_round_trips() {
        round_trip(L2Algo::Lz4);
    }

    #[test]
    fn zstd_round_trips() {
        round_trip(L2Algo::Zstd);
    }

    #[test]
    fn snappy_round_trips() {
        round_trip(L2Algo::Snappy);
    }

    #[test]
    fn gzip_round_trips() {
        round_trip(L2Algo::Gzip);
    }

    #[test]
    fn empty_payload_round_trips_for_every_algorithm() {
        for algo in [
            L2Algo::Ninguna,
            L2Algo::Lz4,
            L2Algo::Zstd,
            L2Algo::Snappy,
            L2Algo::Gzip,
        ] {
            let compressed = compress(algo, &[]).unwrap();
            assert_eq!(decompress(algo, &compressed).unwrap(), Vec::<u8>::new());
        }
    }

    #[test]
    fn corrupted_zstd_stream_is_l2_failure() {
        let compressed = compress(L2Algo::Zstd, b"some data").unwrap();
        let mut corrupted = compressed;
        let last = corrupted.len() - 1;
        corrupted[last] ^= 0xFF;
        assert!(decompress(L2Algo::Zstd, &corrupted).is_err());
    }
}
