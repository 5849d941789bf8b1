//! Fixed-width values that can live inside allocator memory.

use std::mem;

/// A value with a fixed little-endian byte representation.
///
/// Typed allocator helpers store `Plain` values into raw blocks and read them
/// back. `SIZE` and `ALIGN` default to the in-memory layout of the type, so a
/// block allocated for `T` has the same size and alignment a native `T` would.
///
/// `Plain` types are `Copy` and therefore trivially destructible.
pub trait Plain: Copy + Default {
    /// Encoded size in bytes.
    const SIZE: usize = mem::size_of::<Self>();
    /// Required alignment in bytes.
    const ALIGN: usize = mem::align_of::<Self>();

    /// Write the value into the first `SIZE` bytes of `out`.
    fn write_to(self, out: &mut [u8]);

    /// Read a value from the first `SIZE` bytes of `bytes`.
    fn read_from(bytes: &[u8]) -> Self;
}

macro_rules! impl_plain_le {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Plain for $ty {
                #[inline]
                fn write_to(self, out: &mut [u8]) {
                    out[..mem::size_of::<$ty>()].copy_from_slice(&self.to_le_bytes());
                }

                #[inline]
                fn read_from(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; mem::size_of::<$ty>()];
                    raw.copy_from_slice(&bytes[..mem::size_of::<$ty>()]);
                    <$ty>::from_le_bytes(raw)
                }
            }
        )*
    };
}

impl_plain_le!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

impl Plain for bool {
    #[inline]
    fn write_to(self, out: &mut [u8]) {
        out[0] = u8::from(self);
    }

    #[inline]
    fn read_from(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

impl Plain for char {
    #[inline]
    fn write_to(self, out: &mut [u8]) {
        u32::from(self).write_to(out);
    }

    /// Bytes that do not hold a Unicode scalar value read back as `'\0'`.
    #[inline]
    fn read_from(bytes: &[u8]) -> Self {
        char::from_u32(u32::read_from(bytes)).unwrap_or_default()
    }
}
