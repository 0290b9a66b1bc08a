use core::fmt::Debug;
use core::mem::size_of;
use core::ops::{BitAnd, BitOr, BitXor, Not, Shl, Shr, Sub};

/// Underlying integer of a register value.
pub trait RegRaw
where
    Self: Sized
        + Debug
        + Copy
        + Eq
        + Ord
        + Send
        + Sync
        + 'static
        + Not<Output = Self>
        + Sub<Output = Self>
        + BitOr<Output = Self>
        + BitXor<Output = Self>
        + BitAnd<Output = Self>
        + Shl<u32, Output = Self>
        + Shr<u32, Output = Self>,
{
    /// Width of the type in bits.
    const WIDTH: u32;

    /// All bits cleared.
    const ZERO: Self;

    /// Only the lowest bit set.
    const ONE: Self;

    /// Widens the value to `u64`.
    fn to_u64(self) -> u64;
}

macro_rules! reg_raw {
    ($type:ty) => {
        impl RegRaw for $type {
            const WIDTH: u32 = size_of::<$type>() as u32 * 8;
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline(always)]
            fn to_u64(self) -> u64 {
                self.into()
            }
        }
    };
}

reg_raw!(u8);
reg_raw!(u16);
reg_raw!(u32);
reg_raw!(u64);

/// Returns the mask of `width` low order bits.
#[inline(always)]
pub(crate) fn bit_mask<T: RegRaw>(width: u32) -> T {
    if width >= T::WIDTH { !T::ZERO } else { (T::ONE << width) - T::ONE }
}
