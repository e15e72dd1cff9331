//! Byte-order strategies that every multi-byte primitive routes through.

use alloc::vec::Vec;

/// A byte-order strategy: one append and one decode function per integer
/// width and signedness.
///
/// Floats deliberately have no byte-order routines of their own. The
/// trait-provided defaults reinterpret the value as its bit pattern and
/// route through the equal-width unsigned integer, so both orders handle
/// floats for free.
pub(crate) trait ByteOrder {
    fn write_u16(out: &mut Vec<u8>, value: u16);
    fn write_i16(out: &mut Vec<u8>, value: i16);
    fn write_u32(out: &mut Vec<u8>, value: u32);
    fn write_i32(out: &mut Vec<u8>, value: i32);
    fn write_u64(out: &mut Vec<u8>, value: u64);
    fn write_i64(out: &mut Vec<u8>, value: i64);

    fn read_u16(src: [u8; 2]) -> u16;
    fn read_i16(src: [u8; 2]) -> i16;
    fn read_u32(src: [u8; 4]) -> u32;
    fn read_i32(src: [u8; 4]) -> i32;
    fn read_u64(src: [u8; 8]) -> u64;
    fn read_i64(src: [u8; 8]) -> i64;

    fn write_f32(out: &mut Vec<u8>, value: f32) {
        Self::write_u32(out, value.to_bits());
    }

    fn write_f64(out: &mut Vec<u8>, value: f64) {
        Self::write_u64(out, value.to_bits());
    }

    fn read_f32(src: [u8; 4]) -> f32 {
        f32::from_bits(Self::read_u32(src))
    }

    fn read_f64(src: [u8; 8]) -> f64 {
        f64::from_bits(Self::read_u64(src))
    }
}

/// Little-endian byte order. The default for all unsuffixed operations.
pub(crate) enum Le {}

/// Big-endian byte order. Used only by `_be`-suffixed operations.
pub(crate) enum Be {}

macro_rules! byte_order_impl {
    ($order:ident, $to_bytes:ident, $from_bytes:ident) => {
        impl ByteOrder for $order {
            byte_order_impl! {
                @fns $to_bytes, $from_bytes,
                write_u16, read_u16, u16, 2,
                write_i16, read_i16, i16, 2,
                write_u32, read_u32, u32, 4,
                write_i32, read_i32, i32, 4,
                write_u64, read_u64, u64, 8,
                write_i64, read_i64, i64, 8,
            }
        }
    };
    (@fns $to_bytes:ident, $from_bytes:ident, $($write:ident, $read:ident, $ty:ty, $width:literal,)*) => {
        $(
            fn $write(out: &mut Vec<u8>, value: $ty) {
                out.extend_from_slice(&value.$to_bytes());
            }

            fn $read(src: [u8; $width]) -> $ty {
                <$ty>::$from_bytes(src)
            }
        )*
    };
}

byte_order_impl!(Le, to_le_bytes, from_le_bytes);
byte_order_impl!(Be, to_be_bytes, from_be_bytes);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_mirror_each_other() {
        let mut le = Vec::new();
        let mut be = Vec::new();
        Le::write_u32(&mut le, 0xAABBCCDD);
        Be::write_u32(&mut be, 0xAABBCCDD);

        assert_eq!(le, [0xDD, 0xCC, 0xBB, 0xAA]);
        assert_eq!(be, [0xAA, 0xBB, 0xCC, 0xDD]);
    }

    #[test]
    fn floats_route_through_integer_bits() {
        let mut out = Vec::new();
        Le::write_f32(&mut out, 10.5);
        assert_eq!(out, 10.5f32.to_bits().to_le_bytes());
        assert_eq!(Le::read_f32([out[0], out[1], out[2], out[3]]), 10.5);
    }
}
