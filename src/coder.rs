//! Finite-precision arithmetic coding engine.
//!
//! The encoder narrows an integer interval `[low, high]` once per symbol,
//! in proportion to that symbol's share of the model, and emits bits as
//! the interval renormalizes. The decoder mirrors every narrowing and
//! every shift against a `value` register fed from the coded stream, so
//! the two stay in lock-step at every bit. Floor division in the interval
//! split is the sole source of rounding and must be identical on both
//! sides.

use std::io::{Read, Write};

use crate::bitio::{BitReader, BitWriter};
use crate::error::{Error, Result};

/// Width of the coding interval in bits.
pub const CODE_BITS: u32 = 32;

/// Top of the coding interval.
pub const MAX_RANGE: u32 = 0xFFFF_FFFF;

/// Midpoint of the interval; once the interval sits entirely on one side
/// of it, the next output bit is determined.
pub const HALF: u32 = 0x8000_0000;

/// Lower quartile of the interval.
pub const QUARTER: u32 = 0x4000_0000;

/// Upper quartile of the interval.
pub const THREE_QUARTERS: u32 = 0xC000_0000;

/// Largest total frequency the engine accepts.
///
/// Renormalization keeps the interval wider than `QUARTER`, so a total no
/// larger than `QUARTER` guarantees every nonzero-frequency symbol a
/// nonempty sub-interval. The four interval constants and this bound
/// scale together; none may change independently of the others.
pub const MAX_TOTAL_FREQ: u32 = QUARTER;

/// Arithmetic encoder writing coded bits to a byte sink.
pub struct ArithEncoder<W: Write> {
    low: u32,
    high: u32,
    pending: u64,
    bits: BitWriter<W>,
}

impl<W: Write> ArithEncoder<W> {
    /// Create an encoder over `sink` with the interval at full width.
    pub fn new(sink: W) -> Self {
        Self {
            low: 0,
            high: MAX_RANGE,
            pending: 0,
            bits: BitWriter::new(sink),
        }
    }

    /// Narrow the interval to the sub-range `[start, start + freq)` of a
    /// model with total frequency `total`, emitting bits as the interval
    /// renormalizes.
    ///
    /// # Errors
    /// Returns `ZeroFrequency` if `freq` is 0, and `Io` if the sink fails.
    pub fn encode(&mut self, start: u32, freq: u32, total: u32) -> Result<()> {
        if freq == 0 {
            return Err(Error::ZeroFrequency);
        }

        // the interval split lives in u64: `range` itself can be 2^32, and
        // the product must not wrap before the floor division
        let range = u64::from(self.high) - u64::from(self.low) + 1;
        let low = u64::from(self.low);
        let total = u64::from(total);
        let new_low = (low + (range * u64::from(start)) / total) as u32;
        let new_high = (low + (range * (u64::from(start) + u64::from(freq))) / total - 1) as u32;
        debug_assert!(new_low <= new_high);
        self.low = new_low;
        self.high = new_high;

        loop {
            if self.high < HALF {
                self.emit(0)?;
            } else if self.low >= HALF {
                self.emit(1)?;
                self.low -= HALF;
                self.high -= HALF;
            } else if self.low >= QUARTER && self.high < THREE_QUARTERS {
                // interval straddles the midpoint; the bit is not yet known
                self.pending += 1;
                self.low -= QUARTER;
                self.high -= QUARTER;
            } else {
                break;
            }
            self.low <<= 1;
            self.high = (self.high << 1) | 1;
        }
        Ok(())
    }

    /// Emit one determined bit followed by any pending opposite bits.
    fn emit(&mut self, bit: u8) -> Result<()> {
        self.bits.write_bit(bit)?;
        self.bits.write_bits(bit ^ 1, self.pending)?;
        self.pending = 0;
        Ok(())
    }

    /// Resolve the final interval to a concrete terminating code, flush
    /// the bit stream, and return the sink.
    ///
    /// After this the stream plus any run of trailing zero bits falls
    /// inside the final interval, which is what lets the decoder over-read
    /// past the end of the body.
    pub fn finish(mut self) -> Result<W> {
        self.pending += 1;
        if self.low < QUARTER {
            self.bits.write_bit(0)?;
            self.bits.write_bits(1, self.pending)?;
        } else {
            self.bits.write_bit(1)?;
            self.bits.write_bits(0, self.pending)?;
        }
        self.bits.finish()
    }
}

/// Arithmetic decoder reading coded bits from a byte source.
pub struct ArithDecoder<R: Read> {
    low: u32,
    high: u32,
    value: u32,
    bits: BitReader<R>,
}

impl<R: Read> ArithDecoder<R> {
    /// Create a decoder over `source`, priming the code value with the
    /// first [`CODE_BITS`] bits of the stream.
    ///
    /// # Errors
    /// Returns `Io` if the source fails; a source that is merely short
    /// primes with zero bits instead.
    pub fn new(source: R) -> Result<Self> {
        let mut bits = BitReader::new(source);
        let mut value = 0u32;
        for _ in 0..CODE_BITS {
            value = (value << 1) | u32::from(bits.read_bit()?);
        }
        Ok(Self {
            low: 0,
            high: MAX_RANGE,
            value,
            bits,
        })
    }

    /// Scale the current code value into the model's frequency space.
    ///
    /// The result falls in exactly one symbol's `[start, start + freq)`
    /// sub-interval; look that symbol up in the cumulative table, emit it,
    /// then call [`advance`](Self::advance) with its parameters.
    pub fn target(&self, total: u32) -> u32 {
        let range = u64::from(self.high) - u64::from(self.low) + 1;
        let scaled = (u64::from(self.value) - u64::from(self.low) + 1) * u64::from(total) - 1;
        let freq_val = (scaled / range) as u32;
        freq_val.min(total - 1)
    }

    /// Narrow the interval exactly as the encoder did for the decoded
    /// symbol, consuming one coded bit per renormalization shift.
    ///
    /// Must be called with the parameters of the symbol located via
    /// [`target`](Self::target).
    ///
    /// # Errors
    /// Returns `ZeroFrequency` if `freq` is 0, and `Io` if the source fails.
    pub fn advance(&mut self, start: u32, freq: u32, total: u32) -> Result<()> {
        if freq == 0 {
            return Err(Error::ZeroFrequency);
        }

        // identical split to the encoder, in u64 for the same reasons
        let range = u64::from(self.high) - u64::from(self.low) + 1;
        let low = u64::from(self.low);
        let total = u64::from(total);
        let new_low = (low + (range * u64::from(start)) / total) as u32;
        let new_high = (low + (range * (u64::from(start) + u64::from(freq))) / total - 1) as u32;
        debug_assert!(new_low <= new_high);
        self.low = new_low;
        self.high = new_high;

        loop {
            if self.high < HALF {
                // interval already in the lower half; only the shift applies
            } else if self.low >= HALF {
                self.value -= HALF;
                self.low -= HALF;
                self.high -= HALF;
            } else if self.low >= QUARTER && self.high < THREE_QUARTERS {
                self.value -= QUARTER;
                self.low -= QUARTER;
                self.high -= QUARTER;
            } else {
                break;
            }
            self.low <<= 1;
            self.high = (self.high << 1) | 1;
            self.value = (self.value << 1) | u32::from(self.bits.read_bit()?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // (start, freq) rows for a fixed 3-symbol model
    fn three_symbol_table() -> ([(u32, u32); 3], u32) {
        ([(0, 5), (5, 2), (7, 1)], 8)
    }

    fn roundtrip_with_table(input: &[usize], table: &[(u32, u32)], total: u32) -> Vec<usize> {
        let mut encoder = ArithEncoder::new(Vec::new());
        for &idx in input {
            let (start, freq) = table[idx];
            encoder.encode(start, freq, total).unwrap();
        }
        let coded = encoder.finish().unwrap();

        let mut source = coded.as_slice();
        let mut decoder = ArithDecoder::new(&mut source).unwrap();
        let mut output = Vec::with_capacity(input.len());
        for _ in 0..input.len() {
            let fv = decoder.target(total);
            let idx = table
                .iter()
                .position(|&(start, freq)| start <= fv && fv < start + freq)
                .unwrap();
            output.push(idx);
            let (start, freq) = table[idx];
            decoder.advance(start, freq, total).unwrap();
        }
        output
    }

    #[test]
    fn test_basic_roundtrip() {
        let (table, total) = three_symbol_table();
        let input = vec![0, 1, 2, 0, 0, 1, 2, 2, 0];
        assert_eq!(roundtrip_with_table(&input, &table, total), input);
    }

    #[test]
    fn test_single_symbol_alphabet() {
        // one symbol owns the whole interval; must not loop or divide by zero
        let table = [(0u32, 3u32)];
        let input = vec![0, 0, 0];
        assert_eq!(roundtrip_with_table(&input, &table, 3), input);
    }

    #[test]
    fn test_skewed_model_long_run() {
        let table = [(0u32, 1000u32), (1000, 1)];
        let mut input = vec![0; 500];
        input.push(1);
        input.extend_from_slice(&[0; 500]);
        assert_eq!(roundtrip_with_table(&input, &table, 1001), input);
    }

    #[test]
    fn test_zero_frequency_rejected() {
        let mut encoder = ArithEncoder::new(Vec::new());
        assert!(matches!(
            encoder.encode(0, 0, 8),
            Err(Error::ZeroFrequency)
        ));

        let mut source = &[0u8; 8][..];
        let mut decoder = ArithDecoder::new(&mut source).unwrap();
        assert!(matches!(
            decoder.advance(0, 0, 8),
            Err(Error::ZeroFrequency)
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_engine_roundtrip_random_model(
            freqs in prop::collection::vec(1u32..1000, 2..8),
            picks in prop::collection::vec(any::<prop::sample::Index>(), 1..200),
        ) {
            let mut table = Vec::with_capacity(freqs.len());
            let mut sum = 0u32;
            for &f in &freqs {
                table.push((sum, f));
                sum += f;
            }
            let input: Vec<usize> = picks.iter().map(|ix| ix.index(table.len())).collect();
            prop_assert_eq!(roundtrip_with_table(&input, &table, sum), input);
        }
    }
}
