use alloc::vec::Vec;

use crate::endian::{Be, ByteOrder, Le};
use crate::len::Len;

/// Accumulates the binary encoding of a sequence of values.
///
/// Every write appends exactly the value's width and returns `&mut Self`,
/// so encoders are written as one chain of calls. No write can fail; counts
/// that do not fit a chosen length prefix are truncated, which is the
/// caller's responsibility to avoid.
///
/// Boolean flags can share a byte: consecutive [`write_flag`] calls pack up
/// to eight flags LSB-first into one byte. Any other write ends the current
/// flag byte, so the next flag starts a fresh one.
///
/// [`write_flag`]: Self::write_flag
#[derive(Debug, Default)]
pub struct BinaryWriter {
    bytes: Vec<u8>,
    // Bit position inside the last byte that the next flag packs into.
    // Zero means the next flag appends a fresh byte. Meaningful only while
    // the last append was a flag write; every other write resets it.
    flag_cursor: u8,
}

macro_rules! write_primitive {
    ($($le:ident, $be:ident, $ty:ty, $func:ident;)*) => {
        $(
            #[doc = concat!("Writes a [`", stringify!($ty), "`] in little-endian byte order.")]
            pub fn $le(&mut self, value: $ty) -> &mut Self {
                self.raw(|out| Le::$func(out, value))
            }

            #[doc = concat!("Writes a [`", stringify!($ty), "`] in big-endian byte order.")]
            pub fn $be(&mut self, value: $ty) -> &mut Self {
                self.raw(|out| Be::$func(out, value))
            }
        )*
    };
}

impl BinaryWriter {
    /// Creates an empty `BinaryWriter`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty `BinaryWriter` whose buffer has the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            flag_cursor: 0,
        }
    }

    /// The number of bytes written so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// A view of the accumulated bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the writer and returns the accumulated bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    /// Empties the buffer so the writer can be reused, keeping the
    /// allocation. Resets the flag cursor.
    pub fn clear(&mut self) -> &mut Self {
        self.bytes.clear();
        self.flag_cursor = 0;
        self
    }

    // Every non-flag write funnels through here: append, then end the
    // current flag byte.
    fn raw(&mut self, f: impl FnOnce(&mut Vec<u8>)) -> &mut Self {
        f(&mut self.bytes);
        self.flag_cursor = 0;
        self
    }

    /// Writes a single [`u8`].
    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.raw(|out| out.push(value))
    }

    /// Writes a single [`i8`].
    pub fn write_i8(&mut self, value: i8) -> &mut Self {
        self.write_u8(value as u8)
    }

    /// Writes a [`bool`] as one byte: `0x01` for true, `0x00` for false.
    pub fn write_bool(&mut self, value: bool) -> &mut Self {
        self.write_u8(value as u8)
    }

    write_primitive! {
        write_u16, write_u16_be, u16, write_u16;
        write_i16, write_i16_be, i16, write_i16;
        write_u32, write_u32_be, u32, write_u32;
        write_i32, write_i32_be, i32, write_i32;
        write_u64, write_u64_be, u64, write_u64;
        write_i64, write_i64_be, i64, write_i64;
        write_f32, write_f32_be, f32, write_f32;
        write_f64, write_f64_be, f64, write_f64;
    }

    /// Writes `bytes` verbatim, with no length prefix.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.raw(|out| out.extend_from_slice(bytes))
    }

    /// Writes the UTF-8 bytes of `value` verbatim, with no length prefix.
    pub fn write_str(&mut self, value: &str) -> &mut Self {
        self.write_bytes(value.as_bytes())
    }

    /// Encodes `value` as UTF-16 and writes the code units in little-endian
    /// byte order, with no length prefix.
    pub fn write_utf16(&mut self, value: &str) -> &mut Self {
        self.raw(|out| {
            for unit in value.encode_utf16() {
                Le::write_u16(out, unit);
            }
        })
    }

    /// Writes raw UTF-16 code units in little-endian byte order, with no
    /// length prefix.
    ///
    /// The code units are not validated; unpaired surrogates are written
    /// as-is.
    pub fn write_utf16_wchars(&mut self, value: &[u16]) -> &mut Self {
        self.raw(|out| {
            out.reserve(value.len() * 2);
            for &unit in value {
                Le::write_u16(out, unit);
            }
        })
    }

    /// Writes the byte count of `bytes` through the given length codec,
    /// then the bytes themselves.
    pub fn write_bytes_prefixed(&mut self, bytes: &[u8], len: Len) -> &mut Self {
        len.write(self, bytes.len());
        self.write_bytes(bytes)
    }

    /// Writes the UTF-8 byte count of `value` through the given length
    /// codec, then the bytes themselves.
    pub fn write_str_prefixed(&mut self, value: &str, len: Len) -> &mut Self {
        self.write_bytes_prefixed(value.as_bytes(), len)
    }

    /// Encodes `value` as UTF-16, writes its byte count (not code-unit
    /// count) through the given length codec, then the little-endian code
    /// units.
    pub fn write_utf16_prefixed(&mut self, value: &str, len: Len) -> &mut Self {
        let byte_count = value.encode_utf16().count() * 2;
        len.write(self, byte_count);
        self.write_utf16(value)
    }

    /// Packs one boolean into the current flag byte.
    ///
    /// Flags fill a byte LSB-first. When the flag cursor is zero (on a
    /// fresh writer, after eight flags, after any non-flag write, or after
    /// [`align_flags`]) a new byte is appended; otherwise the flag is
    /// OR'ed into the last byte.
    ///
    /// [`align_flags`]: Self::align_flags
    pub fn write_flag(&mut self, value: bool) -> &mut Self {
        if self.flag_cursor == 0 {
            self.write_bool(value);
        } else if value {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 1 << self.flag_cursor;
            }
        }
        self.flag_cursor = (self.flag_cursor + 1) % 8;
        self
    }

    /// Ends the current flag byte, so the next [`write_flag`] appends a
    /// fresh one even if the current byte still has room.
    ///
    /// [`write_flag`]: Self::write_flag
    pub fn write_flag_aligned(&mut self, value: bool) -> &mut Self {
        self.align_flags().write_flag(value)
    }

    /// Resets the flag cursor without writing anything.
    pub fn align_flags(&mut self) -> &mut Self {
        self.flag_cursor = 0;
        self
    }

    /// Invokes `f` once per value, in order. No count is written; callers
    /// that need one write it beforehand.
    pub fn write_seq<T>(
        &mut self,
        values: impl IntoIterator<Item = T>,
        mut f: impl FnMut(&mut Self, T),
    ) -> &mut Self {
        for value in values {
            f(self, value);
        }
        self
    }
}

impl From<BinaryWriter> for Vec<u8> {
    fn from(writer: BinaryWriter) -> Self {
        writer.bytes
    }
}
