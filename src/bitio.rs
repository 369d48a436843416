//! MSB-first bit stream I/O over byte-oriented sources and sinks.
//!
//! The coder produces and consumes individual bits; this module packs them
//! into bytes on the way out and unpacks them on the way in.

use std::io::{Read, Write};

use crate::error::Result;

/// Accumulates bits MSB-first and flushes whole bytes to a sink.
pub struct BitWriter<W: Write> {
    sink: W,
    buffer: u8,
    bits_used: u32,
}

impl<W: Write> BitWriter<W> {
    /// Create a bit writer over a byte sink.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            buffer: 0,
            bits_used: 0,
        }
    }

    /// Append one bit; any nonzero `bit` counts as 1.
    #[inline]
    pub fn write_bit(&mut self, bit: u8) -> Result<()> {
        self.buffer = (self.buffer << 1) | (bit & 1);
        self.bits_used += 1;
        if self.bits_used == 8 {
            self.sink.write_all(&[self.buffer])?;
            self.buffer = 0;
            self.bits_used = 0;
        }
        Ok(())
    }

    /// Append `count` copies of the same bit value.
    pub fn write_bits(&mut self, bit: u8, count: u64) -> Result<()> {
        for _ in 0..count {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Zero-pad any trailing partial byte, flush, and return the sink.
    pub fn finish(mut self) -> Result<W> {
        if self.bits_used > 0 {
            self.buffer <<= 8 - self.bits_used;
            self.sink.write_all(&[self.buffer])?;
        }
        self.sink.flush()?;
        Ok(self.sink)
    }
}

/// Extracts bits MSB-first from a byte source, one cached byte at a time.
///
/// Reads past the end of the source return 0 instead of failing, so a
/// decoder may over-read the final partial byte during renormalization.
pub struct BitReader<R: Read> {
    source: R,
    buffer: u8,
    bits_left: u32,
    exhausted: bool,
}

impl<R: Read> BitReader<R> {
    /// Create a bit reader over a byte source.
    pub fn new(source: R) -> Self {
        Self {
            source,
            buffer: 0,
            bits_left: 0,
            exhausted: false,
        }
    }

    /// Pull the next bit, refilling from the source when the cache runs dry.
    #[inline]
    pub fn read_bit(&mut self) -> Result<u8> {
        if self.bits_left == 0 {
            if self.exhausted {
                return Ok(0);
            }
            let mut byte = [0u8; 1];
            if self.source.read(&mut byte)? == 0 {
                self.exhausted = true;
                return Ok(0);
            }
            self.buffer = byte[0];
            self.bits_left = 8;
        }
        self.bits_left -= 1;
        Ok((self.buffer >> self.bits_left) & 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_packs_msb_first() {
        let mut writer = BitWriter::new(Vec::new());
        for bit in [1, 0, 1, 1, 0, 0, 1, 0] {
            writer.write_bit(bit).unwrap();
        }
        assert_eq!(writer.finish().unwrap(), vec![0b1011_0010]);
    }

    #[test]
    fn test_writer_pads_partial_byte_with_zeros() {
        let mut writer = BitWriter::new(Vec::new());
        for bit in [1, 1, 1] {
            writer.write_bit(bit).unwrap();
        }
        assert_eq!(writer.finish().unwrap(), vec![0b1110_0000]);
    }

    #[test]
    fn test_writer_run_of_bits() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(1, 9).unwrap();
        assert_eq!(writer.finish().unwrap(), vec![0xFF, 0b1000_0000]);
    }

    #[test]
    fn test_empty_writer_emits_nothing() {
        let writer = BitWriter::new(Vec::new());
        assert!(writer.finish().unwrap().is_empty());
    }

    #[test]
    fn test_reader_unpacks_msb_first() {
        let data = [0b1011_0010u8];
        let mut reader = BitReader::new(&data[..]);
        let bits: Vec<u8> = (0..8).map(|_| reader.read_bit().unwrap()).collect();
        assert_eq!(bits, vec![1, 0, 1, 1, 0, 0, 1, 0]);
    }

    #[test]
    fn test_reader_returns_zero_past_end() {
        let data = [0xFFu8];
        let mut reader = BitReader::new(&data[..]);
        for _ in 0..8 {
            assert_eq!(reader.read_bit().unwrap(), 1);
        }
        for _ in 0..32 {
            assert_eq!(reader.read_bit().unwrap(), 0);
        }
    }
}
