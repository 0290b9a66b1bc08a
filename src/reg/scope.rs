use super::{RegError, RegField, RegResult, RegVal, RegValRaw, RwReg};
use core::fmt;

/// Read-modify-write scope of a register.
///
/// Opening the scope loads the register value once. Field mutations change
/// only the in-memory working value. The value is stored once, either by
/// [`close`](RegScope::close)/[`finish`](RegScope::finish) or, on any other
/// exit path (early return, `?` propagation, unwinding), by `Drop`. After the
/// store every mutation fails with [`RegError::ScopeClosed`].
///
/// ```
/// use mmreg::reg::prelude::*;
/// use mmreg::reg::{RegField, RegHandle, RegResult, Rw};
///
/// const A: RegField<u32> = RegField::new("A", 0, 4);
/// const B: RegField<u32> = RegField::new("B", 8, 4);
///
/// let mut memory = 0_u32;
/// let reg = unsafe { RegHandle::<u32, Rw>::new(core::ptr::addr_of_mut!(memory) as usize) };
/// {
///     let mut scope = reg.scope();
///     scope.set(&A, 0xF)?.set(&B, 0x3)?;
///     assert_eq!(scope.val(), 0x0000_030F);
/// }
/// assert_eq!(reg.read(), 0x0000_030F);
/// # RegResult::Ok(())
/// ```
#[must_use = "the register is stored when the scope is dropped"]
pub struct RegScope<'a, R: RwReg> {
    reg: &'a R,
    val: R::Val,
    open: bool,
}

impl<'a, R: RwReg> RegScope<'a, R> {
    /// Loads the value of `reg` and opens a scope for it.
    #[inline]
    pub fn open(reg: &'a R) -> Self {
        let val = reg.read();
        #[cfg(feature = "defmt")]
        defmt::trace!("reg scope open: {=u64:#x}", super::RegRaw::to_u64(val.raw()));
        Self { reg, val, open: true }
    }

    /// Returns `true` if the value has been stored.
    #[inline]
    pub fn is_closed(&self) -> bool {
        !self.open
    }

    /// Returns the working value.
    #[inline]
    pub fn val(&self) -> R::Val {
        self.val
    }

    /// Returns a mutable reference to the working value.
    ///
    /// # Errors
    ///
    /// [`RegError::ScopeClosed`] if the value has been stored.
    #[inline]
    pub fn val_mut(&mut self) -> RegResult<&mut R::Val> {
        self.ensure_open()?;
        Ok(&mut self.val)
    }

    /// Replaces the working value with `val` and returns the previous one.
    ///
    /// # Errors
    ///
    /// [`RegError::ScopeClosed`] if the value has been stored.
    #[inline]
    pub fn replace(&mut self, val: R::Val) -> RegResult<R::Val> {
        self.ensure_open()?;
        Ok(core::mem::replace(&mut self.val, val))
    }

    /// Decodes `field` from the working value.
    #[inline]
    pub fn get(&self, field: &RegField<RegValRaw<R>>) -> RegValRaw<R> {
        self.val.get(field)
    }

    /// Encodes `value` into `field` of the working value.
    ///
    /// # Errors
    ///
    /// * [`RegError::ScopeClosed`] if the value has been stored.
    /// * [`RegError::ValueOutOfRange`] if `value` doesn't fit in `field`. The
    ///   working value is left unchanged.
    #[inline]
    pub fn set(
        &mut self,
        field: &RegField<RegValRaw<R>>,
        value: RegValRaw<R>,
    ) -> RegResult<&mut Self> {
        self.val_mut()?.set(field, value)?;
        Ok(self)
    }

    /// Sets all bits of `field` in the working value.
    ///
    /// # Errors
    ///
    /// [`RegError::ScopeClosed`] if the value has been stored.
    #[inline]
    pub fn set_bit(&mut self, field: &RegField<RegValRaw<R>>) -> RegResult<&mut Self> {
        self.map_raw(|raw| field.set(raw))
    }

    /// Clears all bits of `field` in the working value.
    ///
    /// # Errors
    ///
    /// [`RegError::ScopeClosed`] if the value has been stored.
    #[inline]
    pub fn clear_bit(&mut self, field: &RegField<RegValRaw<R>>) -> RegResult<&mut Self> {
        self.map_raw(|raw| field.clear(raw))
    }

    /// Inverts all bits of `field` in the working value.
    ///
    /// # Errors
    ///
    /// [`RegError::ScopeClosed`] if the value has been stored.
    #[inline]
    pub fn toggle_bit(&mut self, field: &RegField<RegValRaw<R>>) -> RegResult<&mut Self> {
        self.map_raw(|raw| field.toggle(raw))
    }

    /// Stores the working value and closes the scope.
    ///
    /// # Errors
    ///
    /// [`RegError::ScopeClosed`] if the value has already been stored. The
    /// register is not written again.
    #[inline]
    pub fn close(&mut self) -> RegResult<()> {
        self.ensure_open()?;
        self.store();
        Ok(())
    }

    /// Stores the working value and consumes the scope.
    ///
    /// # Errors
    ///
    /// [`RegError::ScopeClosed`] if the value has already been stored.
    #[inline]
    pub fn finish(mut self) -> RegResult<()> {
        self.close()
    }

    /// Updates the working value of a freshly opened scope with `f` and
    /// stores it.
    pub(super) fn apply<F>(mut self, f: F)
    where
        F: FnOnce(&mut R::Val),
    {
        debug_assert!(self.open);
        f(&mut self.val);
    }

    fn map_raw<F>(&mut self, f: F) -> RegResult<&mut Self>
    where
        F: FnOnce(RegValRaw<R>) -> RegValRaw<R>,
    {
        let val = self.val_mut()?;
        let raw = f(val.raw());
        *val.raw_mut() = raw;
        Ok(self)
    }

    fn ensure_open(&self) -> RegResult<()> {
        if self.open { Ok(()) } else { Err(RegError::ScopeClosed) }
    }

    fn store(&mut self) {
        self.open = false;
        self.reg.write(self.val);
        #[cfg(feature = "defmt")]
        defmt::trace!("reg scope store: {=u64:#x}", super::RegRaw::to_u64(self.val.raw()));
    }
}

impl<R: RwReg> Drop for RegScope<'_, R> {
    #[inline]
    fn drop(&mut self) {
        if self.open {
            self.store();
        }
    }
}

impl<R: RwReg> fmt::Debug for RegScope<'_, R>
where
    R::Val: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegScope").field("val", &self.val).field("open", &self.open).finish()
    }
}
