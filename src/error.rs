//! Error taxonomy for the codec family.
//!
//! Every codec operation returns [`Result`]; no panics on malformed input.

use snafu::prelude::*;
use snafu::Location;

use crate::value::{L1Algo, L2Algo, ValueKind};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("L1 algorithm {l1:?} is not supported for value kind {kind:?}"))]
    UnsupportedAlgorithm {
        kind: ValueKind,
        l1: L1Algo,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("value at index {index} is not coercible to {target}"))]
    TypeCoercion {
        index: usize,
        target: &'static str,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("malformed encoding: {msg}"))]
    MalformedEncoding {
        msg: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("malformed container: {msg}"))]
    MalformedContainer {
        msg: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display(
        "decoded timestamp count ({timestamps}) does not match decoded value count ({values})"
    ))]
    InvariantViolation {
        timestamps: usize,
        values: usize,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("L2 compressor {algo:?} failed: {source}"))]
    L2Failure {
        algo: L2Algo,
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
