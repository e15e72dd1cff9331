use alloc::string::String;
use alloc::vec::Vec;

use zerocopy::byteorder::{LE, U16};
use zerocopy::FromBytes;

use crate::endian::{Be, ByteOrder, Le};
use crate::len::Len;

/// Extracts values from a borrowed byte region.
///
/// Every read returns `&mut Self` and delivers its result through a `&mut`
/// out-parameter, so decoders mirror the chain of writes that produced the
/// buffer:
///
/// ```
/// use chainbin::BinaryReader;
///
/// let data = [0x2A, 0x03, 0x02];
/// let (mut a, mut b) = (0u8, 0u16);
/// BinaryReader::new(&data).read_u8(&mut a).read_u16(&mut b);
/// assert_eq!((a, b), (42, 0x0203));
/// ```
///
/// Reads never fail and never panic on exhaustion. A read that would cross
/// [`forbidden_index`] instead sets the sticky [`overflowed`] flag, produces
/// the type's default value, and leaves the cursor where it was; every
/// subsequent read is then a safe no-op producing defaults. The reader never
/// recovers; construct a new one to retry. Decoders that assemble a
/// composite value from several primitive reads must finish through
/// [`validate`], which refuses to run the constructor once overflowed.
///
/// [`forbidden_index`]: Self::forbidden_index
/// [`overflowed`]: Self::overflowed
/// [`validate`]: Self::validate
#[derive(Debug)]
pub struct BinaryReader<'a> {
    buf: &'a [u8],
    read_index: usize,
    forbidden_index: usize,
    overflowed: bool,
    // Mirror of the writer's flag packing: bit position inside `flag_byte`
    // that the next flag extracts, and the cached byte it extracts from.
    // The cache is refetched only when the cursor is zero.
    flag_cursor: u8,
    flag_byte: u8,
}

macro_rules! read_primitive {
    ($($le:ident, $be:ident, $ty:ty, $func:ident;)*) => {
        $(
            #[doc = concat!("Reads a [`", stringify!($ty), "`] in little-endian byte order.")]
            pub fn $le(&mut self, dest: &mut $ty) -> &mut Self {
                match self.read_array() {
                    Some(src) => *dest = Le::$func(src),
                    None => *dest = <$ty>::default(),
                }
                self
            }

            #[doc = concat!("Reads a [`", stringify!($ty), "`] in big-endian byte order.")]
            pub fn $be(&mut self, dest: &mut $ty) -> &mut Self {
                match self.read_array() {
                    Some(src) => *dest = Be::$func(src),
                    None => *dest = <$ty>::default(),
                }
                self
            }
        )*
    };
}

impl<'a> BinaryReader<'a> {
    /// Creates a reader over the whole of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_bounds(buf, 0, buf.len())
    }

    /// Creates a reader confined to `buf[read_index..forbidden_index)`,
    /// leaving bytes outside that region unreadable even though they exist.
    ///
    /// # Panics
    ///
    /// Panics unless `read_index <= forbidden_index <= buf.len()`; bounds
    /// that do not describe a region of the buffer are a caller bug, not a
    /// data boundary.
    pub fn with_bounds(buf: &'a [u8], read_index: usize, forbidden_index: usize) -> Self {
        assert!(
            read_index <= forbidden_index && forbidden_index <= buf.len(),
            "invalid reader bounds: [{read_index}, {forbidden_index}) over {} bytes",
            buf.len(),
        );
        Self {
            buf,
            read_index,
            forbidden_index,
            overflowed: false,
            flag_cursor: 0,
            flag_byte: 0,
        }
    }

    /// The offset of the next byte to consume.
    pub fn read_index(&self) -> usize {
        self.read_index
    }

    /// The exclusive upper bound of the readable region.
    pub fn forbidden_index(&self) -> usize {
        self.forbidden_index
    }

    /// The number of bytes still readable.
    pub fn remaining(&self) -> usize {
        self.forbidden_index - self.read_index
    }

    /// Whether every readable byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.read_index >= self.forbidden_index
    }

    /// Whether a read has attempted to cross the readable boundary. Sticky:
    /// once set, every later read produces a default value.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// The length of the backing buffer, including bytes outside the
    /// readable region.
    pub fn internal_len(&self) -> usize {
        self.buf.len()
    }

    /// The readable byte `offset` positions past the read cursor, without
    /// consuming anything.
    pub fn peek(&self, offset: usize) -> Option<u8> {
        let index = self.read_index.checked_add(offset)?;
        if index < self.forbidden_index {
            Some(self.buf[index])
        } else {
            None
        }
    }

    // The core primitive every read routes through. A zero-width request
    // trivially succeeds without moving the cursor; it still ends the
    // current flag byte, like any other successful read. Otherwise a
    // request that would cross the boundary marks the reader overflowed and
    // consumes nothing, and an already-overflowed reader consumes nothing
    // more.
    fn read_chunk(&mut self, width: usize) -> Option<&'a [u8]> {
        if width == 0 {
            self.flag_cursor = 0;
            return Some(&[]);
        }
        if self.overflowed {
            return None;
        }
        let next = match self.read_index.checked_add(width) {
            Some(next) if next <= self.forbidden_index => next,
            _ => {
                self.overflowed = true;
                return None;
            }
        };
        let chunk = &self.buf[self.read_index..next];
        self.read_index = next;
        self.flag_cursor = 0;
        Some(chunk)
    }

    fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        // The try_from cannot fail; read_chunk returned exactly N bytes.
        self.read_chunk(N)
            .map(|chunk| <[u8; N]>::try_from(chunk).unwrap_or([0; N]))
    }

    /// Reads a single [`u8`].
    pub fn read_u8(&mut self, dest: &mut u8) -> &mut Self {
        match self.read_array::<1>() {
            Some([value]) => *dest = value,
            None => *dest = 0,
        }
        self
    }

    /// Reads a single [`i8`].
    pub fn read_i8(&mut self, dest: &mut i8) -> &mut Self {
        let mut value = 0u8;
        self.read_u8(&mut value);
        *dest = value as i8;
        self
    }

    /// Reads a [`bool`] from one byte; any nonzero byte is true.
    pub fn read_bool(&mut self, dest: &mut bool) -> &mut Self {
        let mut value = 0u8;
        self.read_u8(&mut value);
        *dest = value != 0;
        self
    }

    read_primitive! {
        read_u16, read_u16_be, u16, read_u16;
        read_i16, read_i16_be, i16, read_i16;
        read_u32, read_u32_be, u32, read_u32;
        read_i32, read_i32_be, i32, read_i32;
        read_u64, read_u64_be, u64, read_u64;
        read_i64, read_i64_be, i64, read_i64;
        read_f32, read_f32_be, f32, read_f32;
        read_f64, read_f64_be, f64, read_f64;
    }

    /// Reads exactly `len` bytes into `dest`. A length of zero always
    /// succeeds and produces an empty value, even at exhaustion.
    pub fn read_bytes(&mut self, dest: &mut Vec<u8>, len: usize) -> &mut Self {
        match self.read_chunk(len) {
            Some(chunk) => {
                dest.clear();
                dest.extend_from_slice(chunk);
            }
            None => *dest = Vec::new(),
        }
        self
    }

    /// Reads every remaining readable byte into `dest`.
    pub fn read_bytes_to_end(&mut self, dest: &mut Vec<u8>) -> &mut Self {
        let len = self.remaining();
        self.read_bytes(dest, len)
    }

    /// Reads `len` bytes and decodes them as UTF-8, lossily: ill-formed
    /// sequences become replacement characters rather than errors. A length
    /// of zero always succeeds and produces an empty string.
    pub fn read_str(&mut self, dest: &mut String, len: usize) -> &mut Self {
        match self.read_chunk(len) {
            Some(chunk) => *dest = String::from_utf8_lossy(chunk).into_owned(),
            None => *dest = String::new(),
        }
        self
    }

    /// Reads every remaining readable byte as a lossy UTF-8 string.
    pub fn read_str_to_end(&mut self, dest: &mut String) -> &mut Self {
        let len = self.remaining();
        self.read_str(dest, len)
    }

    /// Reads `len` bytes as little-endian UTF-16 code units and decodes
    /// them lossily.
    ///
    /// # Panics
    ///
    /// Panics if `len` is odd; a UTF-16 payload always has an even byte
    /// count, so an odd request is a caller bug.
    pub fn read_utf16(&mut self, dest: &mut String, len: usize) -> &mut Self {
        assert!(len % 2 == 0, "UTF-16 byte length {len} is not even");
        match self.read_chunk(len) {
            Some(chunk) => {
                *dest = match <[U16<LE>]>::ref_from_bytes(chunk) {
                    Ok(wchars) => char::decode_utf16(wchars.iter().map(|unit| unit.get()))
                        .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
                        .collect(),
                    Err(_) => String::new(),
                };
            }
            None => *dest = String::new(),
        }
        self
    }

    /// Reads `count` little-endian UTF-16 code units into `dest`, without
    /// validating them.
    pub fn read_utf16_wchars(&mut self, dest: &mut Vec<u16>, count: usize) -> &mut Self {
        let Some(len) = count.checked_mul(2) else {
            self.overflowed = true;
            *dest = Vec::new();
            return self;
        };
        match self.read_chunk(len) {
            Some(chunk) => match <[U16<LE>]>::ref_from_bytes(chunk) {
                Ok(wchars) => {
                    dest.clear();
                    dest.extend(wchars.iter().map(|unit| unit.get()));
                }
                Err(_) => *dest = Vec::new(),
            },
            None => *dest = Vec::new(),
        }
        self
    }

    /// Reads a byte count through the given length codec, then that many
    /// bytes. If the prefix read overflows, the payload read is not
    /// attempted and `dest` is left empty.
    ///
    /// # Panics
    ///
    /// Panics on a negative prefix; see [`Len`].
    pub fn read_bytes_prefixed(&mut self, dest: &mut Vec<u8>, len: Len) -> &mut Self {
        let count = len.read(self);
        if self.overflowed {
            *dest = Vec::new();
            return self;
        }
        self.read_bytes(dest, count)
    }

    /// Reads a byte count through the given length codec, then that many
    /// bytes as a lossy UTF-8 string. If the prefix read overflows, the
    /// payload read is not attempted and `dest` is left empty.
    ///
    /// # Panics
    ///
    /// Panics on a negative prefix; see [`Len`].
    pub fn read_str_prefixed(&mut self, dest: &mut String, len: Len) -> &mut Self {
        let count = len.read(self);
        if self.overflowed {
            *dest = String::new();
            return self;
        }
        self.read_str(dest, count)
    }

    /// Reads a byte count through the given length codec, then that many
    /// bytes as little-endian UTF-16. If the prefix read overflows, the
    /// payload read is not attempted and `dest` is left empty.
    ///
    /// # Panics
    ///
    /// Panics on a negative or odd prefix; see [`Len`] and
    /// [`read_utf16`](Self::read_utf16).
    pub fn read_utf16_prefixed(&mut self, dest: &mut String, len: Len) -> &mut Self {
        let count = len.read(self);
        if self.overflowed {
            *dest = String::new();
            return self;
        }
        self.read_utf16(dest, count)
    }

    /// Reads a byte count through the given length codec, then that many
    /// bytes as an owned byte string. Useful for fields that are usually
    /// text but are not guaranteed to be valid UTF-8.
    ///
    /// # Panics
    ///
    /// Panics on a negative prefix; see [`Len`].
    #[cfg(feature = "bstr")]
    pub fn read_bstr_prefixed(&mut self, dest: &mut bstr::BString, len: Len) -> &mut Self {
        let count = len.read(self);
        if self.overflowed {
            *dest = bstr::BString::default();
            return self;
        }
        self.read_bstr(dest, count)
    }

    /// Reads exactly `len` bytes as an owned byte string.
    #[cfg(feature = "bstr")]
    pub fn read_bstr(&mut self, dest: &mut bstr::BString, len: usize) -> &mut Self {
        match self.read_chunk(len) {
            Some(chunk) => *dest = bstr::BString::from(chunk),
            None => *dest = bstr::BString::default(),
        }
        self
    }

    /// Unpacks one boolean from the current flag byte.
    ///
    /// When the flag cursor is zero the flag byte is refetched with an
    /// ordinary one-byte read, subject to the same overflow semantics as
    /// any primitive read; under overflow the produced flag is false.
    /// Otherwise the cached byte is reused. Mirrors
    /// [`BinaryWriter::write_flag`](crate::BinaryWriter::write_flag).
    pub fn read_flag(&mut self, dest: &mut bool) -> &mut Self {
        if self.flag_cursor == 0 {
            let mut byte = 0u8;
            self.read_u8(&mut byte);
            self.flag_byte = byte;
        }
        *dest = self.flag_byte & (1 << self.flag_cursor) != 0;
        self.flag_cursor = (self.flag_cursor + 1) % 8;
        self
    }

    /// Ends the current flag byte, so the next [`read_flag`] refetches from
    /// the buffer even if the cached byte still has unread bits.
    ///
    /// [`read_flag`]: Self::read_flag
    pub fn read_flag_aligned(&mut self, dest: &mut bool) -> &mut Self {
        self.align_flags().read_flag(dest)
    }

    /// Resets the flag cursor without reading anything.
    pub fn align_flags(&mut self) -> &mut Self {
        self.flag_cursor = 0;
        self
    }

    /// Invokes `f` exactly `count` times, collecting the results into
    /// `dest`. No count is read; callers typically read one just before.
    pub fn read_seq<T>(
        &mut self,
        dest: &mut Vec<T>,
        count: usize,
        mut f: impl FnMut(&mut Self) -> T,
    ) -> &mut Self {
        dest.clear();
        dest.reserve(count.min(self.remaining()));
        for _ in 0..count {
            let value = f(self);
            dest.push(value);
        }
        self
    }

    /// Assembles a composite value from previously-read parts, unless the
    /// reader has overflowed; then `dest` is set to the type's default and
    /// `constructor` is never invoked, so a superficially valid composite
    /// is never built from garbage intermediates.
    pub fn validate<T: Default>(&mut self, constructor: impl FnOnce() -> T, dest: &mut T) -> &mut Self {
        self.validate_or(constructor, dest, T::default)
    }

    /// Like [`validate`](Self::validate), with an explicit overflow branch
    /// instead of the type's default.
    pub fn validate_or<T>(
        &mut self,
        constructor: impl FnOnce() -> T,
        dest: &mut T,
        on_overflow: impl FnOnce() -> T,
    ) -> &mut Self {
        *dest = if self.overflowed {
            on_overflow()
        } else {
            constructor()
        };
        self
    }
}
