//! Container framing: a fixed little-endian header followed by the coded
//! bit body.
//!
//! The header stores the complete frequency model, so decompression
//! reconstructs the model byte-for-byte instead of recomputing it. Field
//! order and endianness are pinned; containers are portable across hosts.
//!
//! ```text
//! offset 0:     u64 LE        total symbol count
//! offset 8:     u32 LE x 256  per-symbol counts, ascending symbol order
//! offset 1032:  coded bits, packed MSB-first, last byte zero-padded
//! ```

use std::io::{ErrorKind, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::debug;

use crate::coder::{ArithDecoder, ArithEncoder, MAX_TOTAL_FREQ};
use crate::error::{Error, Result};
use crate::model::{CumulativeStarts, FrequencyModel, ALPHABET};

/// Size in bytes of the fixed container header.
pub const HEADER_LEN: usize = 8 + ALPHABET * 4;

/// Write the fixed header: total symbol count, then all 256 counts.
pub fn write_header<W: Write>(sink: &mut W, model: &FrequencyModel) -> Result<()> {
    sink.write_u64::<LittleEndian>(model.total())?;
    for &c in model.counts() {
        sink.write_u32::<LittleEndian>(c)?;
    }
    Ok(())
}

/// Read the fixed header and rebuild the frequency model it describes.
///
/// # Errors
/// `TruncatedHeader` if the source ends mid-header; `HeaderMismatch` or
/// `InputTooLarge` if the stored fields fail validation.
pub fn read_header<R: Read>(source: &mut R) -> Result<FrequencyModel> {
    let total = source.read_u64::<LittleEndian>().map_err(header_err)?;
    let mut counts = [0u32; ALPHABET];
    for c in &mut counts {
        *c = source.read_u32::<LittleEndian>().map_err(header_err)?;
    }
    FrequencyModel::from_parts(total, counts)
}

fn header_err(e: std::io::Error) -> Error {
    if e.kind() == ErrorKind::UnexpectedEof {
        Error::TruncatedHeader
    } else {
        Error::Io(e)
    }
}

/// Compress `data` into `sink`: model pass, header, then the coding pass.
///
/// The model is completed over the whole input before the first symbol is
/// coded, so `data` is scanned twice. An empty input produces a header
/// with an all-zero table and no body.
///
/// # Errors
/// `InputTooLarge` if `data` exceeds the engine's safe bound; `Io` if the
/// sink fails.
pub fn compress<W: Write>(data: &[u8], sink: &mut W) -> Result<()> {
    if data.len() as u64 > u64::from(MAX_TOTAL_FREQ) {
        return Err(Error::InputTooLarge {
            len: data.len() as u64,
            max: u64::from(MAX_TOTAL_FREQ),
        });
    }

    let model = FrequencyModel::scan(data);
    write_header(sink, &model)?;
    if model.is_empty() {
        return Ok(());
    }

    let starts = CumulativeStarts::from_model(&model);
    let total = starts.total_freq();

    let mut encoder = ArithEncoder::new(&mut *sink);
    for &b in data {
        encoder.encode(starts.start(b), starts.freq(b), total)?;
    }
    encoder.finish()?;
    Ok(())
}

/// Decompress a full container from `source`, returning the original bytes.
///
/// Runs exactly the declared number of decode steps; a declared count of
/// zero short-circuits to an empty output without touching the coder.
///
/// # Errors
/// Header validation errors for hostile or corrupted containers, `Io` if
/// the source fails.
pub fn decompress<R: Read>(source: &mut R) -> Result<Vec<u8>> {
    let model = read_header(source)?;
    if model.is_empty() {
        return Ok(Vec::new());
    }
    debug!("container: {} symbols declared", model.total());

    let starts = CumulativeStarts::from_model(&model);
    let total = starts.total_freq();
    let mut decoder = ArithDecoder::new(source)?;

    // the declared total is untrusted; cap the preallocation and let the
    // vec grow for genuinely large containers
    let mut out = Vec::with_capacity(model.total().min(1 << 16) as usize);
    for _ in 0..model.total() {
        let sym = starts.symbol_for(decoder.target(total));
        out.push(sym);
        decoder.advance(starts.start(sym), starts.freq(sym), total)?;
    }
    Ok(out)
}

/// Compress to a fresh byte vector.
pub fn compress_to_vec(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(HEADER_LEN + data.len() / 2);
    compress(data, &mut out)?;
    Ok(out)
}

/// Decompress an in-memory container.
pub fn decompress_from_slice(container: &[u8]) -> Result<Vec<u8>> {
    let mut source = container;
    decompress(&mut source)
}
