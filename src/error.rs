//! Error types for the arithmetic coder.

use thiserror::Error;

/// Error variants for compression and decompression.
#[derive(Debug, Error)]
pub enum Error {
    /// A symbol with zero modeled frequency reached the coder.
    #[error("symbol has zero frequency in the model")]
    ZeroFrequency,

    /// The container ended before the fixed-size header was complete.
    #[error("container header truncated")]
    TruncatedHeader,

    /// The header's declared symbol count disagrees with its frequency table.
    #[error("header declares {declared} symbols but counts sum to {summed}")]
    HeaderMismatch {
        /// Symbol count stored in the header.
        declared: u64,
        /// Sum of the 256 frequency-table entries.
        summed: u64,
    },

    /// The input is longer than the coder can model without interval collapse.
    #[error("{len} symbols exceed the supported maximum of {max}")]
    InputTooLarge {
        /// Offending symbol count.
        len: u64,
        /// Largest supported total.
        max: u64,
    },

    /// An I/O error occurred while reading the source or writing the sink.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for coder operations.
pub type Result<T> = std::result::Result<T, Error>;
