//! # Static-Model Arithmetic Coding
//!
//! *Lossless byte-stream compression down to the entropy of a one-pass model.*
//!
//! ## Intuition First
//!
//! Picture the unit interval `[0, 1)` as a dartboard where every symbol owns
//! a slice proportional to how often it occurs. Encoding a message means
//! repeatedly zooming into the slice of the next symbol: after the whole
//! message, you are left with one tiny sub-interval, and *any* number inside
//! it identifies the entire message. The coded output is just enough bits of
//! such a number to pin it down.
//!
//! Fractions of unbounded precision are not practical, so the interval lives
//! in fixed-width integers instead. Whenever the interval narrows enough
//! that its leading bit is settled, that bit is shipped out and the interval
//! is rescaled — and when the interval straddles the midpoint too closely to
//! settle the bit, its eventual value is deferred as a *pending* bit until a
//! later symbol resolves the carry.
//!
//! ## The Problem
//!
//! Prefix codes (Huffman) spend a whole number of bits per symbol, which
//! wastes up to a bit each time a probability is not a power of two.
//! Arithmetic coding spends *fractional* bits per symbol and approaches the
//! entropy of the model — at the price of order-dependent integer arithmetic
//! where a single rounding or renormalization mismatch silently corrupts the
//! stream with no crash.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon          Entropy as the fundamental limit
//! 1952  Huffman          Optimal prefix codes, whole-bit granularity
//! 1963  Elias            Interval coding idea (unbounded precision)
//! 1976  Pasco, Rissanen  Finite-precision arithmetic coding
//! 1979  Rubin            Carry control for streaming output
//! 1987  Witten/Neal/Cleary  The practical reference implementation
//! 1998  Moffat et al.    Revisited bounds and implementation tricks
//! ```
//!
//! ## Mathematical Formulation
//!
//! With cumulative starts $c_s$, frequencies $f_s$, and total $T$, coding
//! symbol $s$ maps the interval $[low, high]$ of width $R = high - low + 1$
//! to:
//!
//! ```text
//! low'  = low + floor(R * c_s / T)
//! high' = low + floor(R * (c_s + f_s) / T) - 1
//! ```
//!
//! Decoding inverts the map by scaling the code value back into frequency
//! space and locating the symbol whose `[c_s, c_s + f_s)` contains it.
//!
//! ## Complexity Analysis
//!
//! - **Time**: $O(1)$ per encoded symbol (amortized over emitted bits);
//!   $O(\log 256)$ per decoded symbol for the cumulative-table search.
//! - **Space**: $O(1)$ coder state plus the 256-entry model tables.
//!
//! ## Failure Modes
//!
//! 1. **Interval collapse**: if the total frequency outgrows the interval
//!    width, a rare symbol's sub-interval can round to empty. The engine
//!    bounds the total ([`coder::MAX_TOTAL_FREQ`]) and rejects larger inputs
//!    up front.
//! 2. **Desync**: encoder and decoder must perform bit-identical floor
//!    divisions and renormalization in the same branch order; any deviation
//!    produces garbage from the first divergent bit onward.
//!
//! ## Implementation Notes
//!
//! The model is static: one counting pass over the whole input builds a
//! 256-entry frequency table, which is stored verbatim in the container
//! header so the decoder rebuilds it exactly. This crate provides:
//!
//! - [`bitio`]: MSB-first bit packing over any byte source/sink.
//! - [`model`]: the frequency table and its cumulative prefix sums.
//! - [`coder`]: the interval-narrowing encoder/decoder pair.
//! - [`container`]: the header + body framing and one-call
//!   [`compress`]/[`decompress`] entry points.
//!
//! ## References
//!
//! - Witten, I., Neal, R., Cleary, J. (1987). "Arithmetic coding for data
//!   compression." Communications of the ACM.
//! - Moffat, A., Neal, R., Witten, I. (1998). "Arithmetic coding revisited."
//!   ACM Transactions on Information Systems.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bitio;
pub mod coder;
pub mod container;
pub mod error;
pub mod model;

pub use coder::{ArithDecoder, ArithEncoder};
pub use container::{compress, compress_to_vec, decompress, decompress_from_slice};
pub use error::Error;
pub use model::{CumulativeStarts, FrequencyModel};
