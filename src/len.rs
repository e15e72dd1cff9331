//! The fixed table of length-prefix codecs.

use crate::{BinaryReader, BinaryWriter};

/// Selects the width and signedness of a length prefix.
///
/// Each variant pairs a count write with a count read, and every
/// `*_prefixed` operation on [`BinaryWriter`] and [`BinaryReader`] takes one
/// by value, so the prefix codec is chosen independently per field:
///
/// ```
/// use chainbin::{BinaryWriter, Len};
///
/// let mut w = BinaryWriter::new();
/// w.write_str_prefixed("tiny", Len::U8)
///     .write_str_prefixed("roomy", Len::I64);
/// assert_eq!(w.len(), 1 + 4 + 8 + 5);
/// ```
///
/// Writing truncates counts that do not fit the chosen width; picking a
/// wide-enough prefix is the caller's responsibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Len {
    /// One-byte unsigned prefix.
    U8,
    /// One-byte signed prefix.
    I8,
    /// Two-byte unsigned prefix.
    U16,
    /// Two-byte signed prefix.
    I16,
    /// Four-byte unsigned prefix.
    U32,
    /// Four-byte signed prefix.
    I32,
    /// Eight-byte unsigned prefix.
    U64,
    /// Eight-byte signed prefix.
    I64,
}

impl Len {
    /// Writes `count` through this codec, little-endian, truncating if it
    /// does not fit.
    pub(crate) fn write(self, out: &mut BinaryWriter, count: usize) {
        match self {
            Len::U8 => out.write_u8(count as u8),
            Len::I8 => out.write_i8(count as i8),
            Len::U16 => out.write_u16(count as u16),
            Len::I16 => out.write_i16(count as i16),
            Len::U32 => out.write_u32(count as u32),
            Len::I32 => out.write_i32(count as i32),
            Len::U64 => out.write_u64(count as u64),
            Len::I64 => out.write_i64(count as i64),
        };
    }

    /// Reads a count through this codec. Under overflow the produced count
    /// is zero and the reader's flag is left for the caller to consult.
    ///
    /// # Panics
    ///
    /// Panics if the decoded count is negative or does not fit in `usize`;
    /// both indicate a caller bug or a stream written with a different
    /// schema, not an ordinary data boundary.
    pub(crate) fn read(self, src: &mut BinaryReader<'_>) -> usize {
        match self {
            Len::U8 => {
                let mut v = 0u8;
                src.read_u8(&mut v);
                v as usize
            }
            Len::I8 => {
                let mut v = 0i8;
                src.read_i8(&mut v);
                signed_count(v as i64)
            }
            Len::U16 => {
                let mut v = 0u16;
                src.read_u16(&mut v);
                v as usize
            }
            Len::I16 => {
                let mut v = 0i16;
                src.read_i16(&mut v);
                signed_count(v as i64)
            }
            Len::U32 => {
                let mut v = 0u32;
                src.read_u32(&mut v);
                unsigned_count(v as u64)
            }
            Len::I32 => {
                let mut v = 0i32;
                src.read_i32(&mut v);
                signed_count(v as i64)
            }
            Len::U64 => {
                let mut v = 0u64;
                src.read_u64(&mut v);
                unsigned_count(v)
            }
            Len::I64 => {
                let mut v = 0i64;
                src.read_i64(&mut v);
                signed_count(v)
            }
        }
    }
}

fn signed_count(value: i64) -> usize {
    match usize::try_from(value) {
        Ok(count) => count,
        Err(_) => panic!("invalid length prefix: {value}"),
    }
}

fn unsigned_count(value: u64) -> usize {
    match usize::try_from(value) {
        Ok(count) => count,
        Err(_) => panic!("length prefix {value} does not fit in usize"),
    }
}
