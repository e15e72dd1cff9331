//! Chainable binary encoding and decoding over in-memory byte buffers.
//!
//! [`BinaryWriter`] accumulates bytes for a sequence of values; [`BinaryReader`]
//! extracts them back out of a byte region. Both sides chain: every operation
//! returns the writer or reader itself, with read results delivered through
//! `&mut` out-parameters. The two sides must agree on the order, width, and
//! byte order of every field, since the format carries no self-description.
//!
//! Reads never fail. A read that would cross the readable boundary sets a
//! sticky `overflowed` flag and produces the type's default value; every
//! later read is then a no-op producing defaults. Composite decoders finish
//! with [`BinaryReader::validate`] so that a partially-decoded value is never
//! assembled from garbage intermediates.
//!
//! ```
//! use chainbin::{BinaryReader, BinaryWriter, Len};
//!
//! let mut w = BinaryWriter::new();
//! w.write_u32(10)
//!     .write_flag(true)
//!     .write_flag(false)
//!     .write_str_prefixed("Hello!", Len::U16);
//!
//! let (mut n, mut a, mut b, mut s) = (0u32, false, false, String::new());
//! let mut r = BinaryReader::new(w.as_bytes());
//! r.read_u32(&mut n)
//!     .read_flag(&mut a)
//!     .read_flag(&mut b)
//!     .read_str_prefixed(&mut s, Len::U16);
//!
//! assert!(!r.overflowed());
//! assert_eq!((n, a, b, s.as_str()), (10, true, false, "Hello!"));
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

extern crate alloc;

mod endian;
mod len;
mod reader;
mod writer;


pub use len::Len;
pub use reader::BinaryReader;
pub use writer::BinaryWriter;
