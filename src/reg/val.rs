use super::{RegField, RegRaw, RegResult};

/// Wrapper for a register value.
///
/// The bare integers implement this trait with a zero reset value, so a
/// register without named fields can be used as `RegHandle<u32, Rw>`.
/// Registers generated by [`reg!`](crate::reg!) get a dedicated value type
/// with per-field accessors.
pub trait RegVal
where
    Self: Sized + Copy + Send + Sync + 'static,
{
    /// Raw integer type.
    type Raw: RegRaw;

    /// The reset value.
    const RESET: Self::Raw;

    /// Creates a new `RegVal` from the raw value.
    fn from_raw(raw: Self::Raw) -> Self;

    /// Returns the inner integer.
    fn raw(&self) -> Self::Raw;

    /// Returns a mutable reference to the inner integer.
    fn raw_mut(&mut self) -> &mut Self::Raw;

    /// Creates a new `RegVal` from the reset value.
    #[inline]
    fn reset() -> Self {
        Self::from_raw(Self::RESET)
    }

    /// Decodes `field` from the value.
    #[inline]
    fn get(&self, field: &RegField<Self::Raw>) -> Self::Raw {
        field.decode(self.raw())
    }

    /// Encodes `value` into `field`, leaving other bits untouched.
    ///
    /// # Errors
    ///
    /// [`RegError::ValueOutOfRange`](super::RegError::ValueOutOfRange) if
    /// `value` doesn't fit in the field. The value is left unchanged then.
    #[inline]
    fn set(&mut self, field: &RegField<Self::Raw>, value: Self::Raw) -> RegResult<&mut Self> {
        *self.raw_mut() = field.encode(self.raw(), value)?;
        Ok(self)
    }
}

macro_rules! reg_val {
    ($type:ty) => {
        impl RegVal for $type {
            type Raw = $type;

            const RESET: $type = 0;

            #[inline(always)]
            fn from_raw(raw: $type) -> Self {
                raw
            }

            #[inline(always)]
            fn raw(&self) -> $type {
                *self
            }

            #[inline(always)]
            fn raw_mut(&mut self) -> &mut $type {
                self
            }
        }
    };
}

reg_val!(u8);
reg_val!(u16);
reg_val!(u32);
reg_val!(u64);
