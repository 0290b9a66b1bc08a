use super::{RAccess, RegAccess, RegResult, RegScope, RegVal, WAccess};
use core::fmt;
use core::marker::PhantomData;
use core::ptr::{read_volatile, write_volatile};

/// Disambiguation for `Reg::Val::Raw`
pub type RegValRaw<R> = <<R as Reg>::Val as RegVal>::Raw;

/// Register binding.
pub trait Reg {
    /// Type that wraps a raw register value.
    type Val: RegVal;
}

/// Register that can read its value.
pub trait RReg: Reg {
    /// Reads the register value. Exactly one hardware load.
    fn read(&self) -> Self::Val;

    /// Reads the raw register value.
    #[inline]
    fn read_raw(&self) -> RegValRaw<Self> {
        self.read().raw()
    }
}

/// Register that can write its value.
pub trait WReg: Reg {
    /// Writes `val` to the register. Exactly one hardware store.
    fn write(&self, val: Self::Val);

    /// Writes the raw value `raw` to the register.
    #[inline]
    fn write_raw(&self, raw: RegValRaw<Self>) {
        self.write(Self::Val::from_raw(raw));
    }

    /// Updates a new reset value with `f` and writes the result to the
    /// register. The register is not read.
    #[inline]
    fn reset<F>(&self, f: F)
    where
        F: FnOnce(&mut Self::Val),
    {
        let mut val = Self::Val::reset();
        f(&mut val);
        self.write(val);
    }
}

/// Register that can read and write its value.
///
/// Every read-modify-write performs exactly one load and one store. There
/// is no mutual exclusion: two contexts modifying the same register
/// concurrently can lose an update, so callers must serialize them.
pub trait RwReg
where
    Self: RReg + WReg + Sized,
{
    /// Opens a read-modify-write scope. Loads the register value; the value
    /// is stored back when the scope is closed or dropped.
    #[inline]
    fn scope(&self) -> RegScope<'_, Self> {
        RegScope::open(self)
    }

    /// Runs `f` inside a read-modify-write scope and returns its result.
    ///
    /// The store happens after `f` returns, whether it succeeded or not. If
    /// `f` fails midway, the value is stored as it was at the failure point.
    ///
    /// # Errors
    ///
    /// Whatever `f` returns.
    #[inline]
    fn modify<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut RegScope<'_, Self>) -> Result<T, E>,
    {
        let mut scope = self.scope();
        let result = f(&mut scope);
        drop(scope);
        result
    }

    /// Reads the register value, updates it with `f`, and writes the result
    /// back.
    #[inline]
    fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Self::Val),
    {
        self.scope().apply(f);
    }

    /// Like [`update`](RwReg::update), but for field setters that can fail.
    ///
    /// # Errors
    ///
    /// The first error returned by `f`. The value is stored anyway.
    #[inline]
    fn try_update<F>(&self, f: F) -> RegResult<()>
    where
        F: FnOnce(&mut Self::Val) -> RegResult<()>,
    {
        self.modify(|scope| f(scope.val_mut()?))
    }
}

impl<T: RReg + WReg> RwReg for T {}

/// Handle to a memory-mapped register.
///
/// The handle is the address of the register typed with its value `V` and
/// access mode `A`. It caches nothing: every [`read`](RReg::read) is one
/// volatile load and every [`write`](WReg::write) is one volatile store.
/// Ordering against accesses to other addresses is up to the platform's
/// barriers.
///
/// ```
/// use mmreg::reg::prelude::*;
/// use mmreg::reg::{RegField, RegHandle, RegResult, Rw};
///
/// const SPE: RegField<u32> = RegField::new("SPE", 0, 1);
///
/// let mut memory = 0_u32;
/// let reg = unsafe { RegHandle::<u32, Rw>::new(core::ptr::addr_of_mut!(memory) as usize) };
/// let result: RegResult<()> = reg.modify(|scope| {
///     assert_eq!(scope.get(&SPE), 0);
///     scope.set(&SPE, 1)?;
///     Ok(())
/// });
/// assert!(result.is_ok());
/// assert_eq!(reg.read(), 0x0000_0001);
/// ```
pub struct RegHandle<V, A> {
    address: usize,
    _marker: PhantomData<(fn() -> V, A)>,
}

impl<V, A> RegHandle<V, A> {
    /// Creates a new handle to the register at `address`.
    ///
    /// # Safety
    ///
    /// `address` must point to a readable and/or writable (according to `A`)
    /// location of the size of `V`'s raw type, properly aligned, for the
    /// whole lifetime of the handle and all of its copies.
    #[inline]
    pub const unsafe fn new(address: usize) -> Self {
        Self { address, _marker: PhantomData }
    }

    /// Returns the memory address of the register.
    #[inline]
    pub const fn address(&self) -> usize {
        self.address
    }
}

impl<V: RegVal, A: RegAccess> RegHandle<V, A> {
    /// Returns the width of the register in bits.
    #[inline]
    pub fn width(&self) -> u32 {
        <V::Raw as super::RegRaw>::WIDTH
    }

    /// Returns a raw constant pointer to the register.
    #[inline]
    pub fn as_ptr(&self) -> *const V::Raw {
        self.address as *const V::Raw
    }

    /// Returns a raw mutable pointer to the register.
    #[inline]
    pub fn as_mut_ptr(&self) -> *mut V::Raw {
        self.address as *mut V::Raw
    }
}

impl<V: RegVal, A: RegAccess> Reg for RegHandle<V, A> {
    type Val = V;
}

impl<V: RegVal, A: RAccess> RReg for RegHandle<V, A> {
    #[inline]
    fn read(&self) -> V {
        V::from_raw(unsafe { read_volatile(self.as_ptr()) })
    }
}

impl<V: RegVal, A: WAccess> WReg for RegHandle<V, A> {
    #[inline]
    fn write(&self, val: V) {
        unsafe { write_volatile(self.as_mut_ptr(), val.raw()) };
    }
}

impl<V, A> Clone for RegHandle<V, A> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<V, A> Copy for RegHandle<V, A> {}

impl<V, A> PartialEq for RegHandle<V, A> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl<V, A> Eq for RegHandle<V, A> {}

impl<V, A: Default + fmt::Debug> fmt::Debug for RegHandle<V, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegHandle")
            .field("address", &format_args!("{:#x}", self.address))
            .field("access", &A::default())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reg::{Ro, Rw, Wo};
    use core::mem::size_of;
    use core::ptr::addr_of_mut;

    fn assert_copy_send_sync<T: Copy + Send + Sync>() {}

    #[test]
    fn handle_is_address_only() {
        assert_eq!(size_of::<RegHandle<u32, Rw>>(), size_of::<usize>());
        assert_eq!(size_of::<RegHandle<u8, Ro>>(), size_of::<usize>());
        assert_copy_send_sync::<RegHandle<u64, Wo>>();
    }

    #[test]
    fn read_write() {
        let mut memory = 0x1234_5678_u32;
        let reg = unsafe { RegHandle::<u32, Rw>::new(addr_of_mut!(memory) as usize) };
        assert_eq!(reg.width(), 32);
        assert_eq!(reg.read(), 0x1234_5678);
        reg.write(0xCAFE_BABE);
        assert_eq!(reg.read_raw(), 0xCAFE_BABE);
        reg.write_raw(0);
        assert_eq!(reg.read(), 0);
        assert_eq!(memory, 0);
    }

    #[test]
    fn read_only_and_write_only() {
        let mut memory = 0xA5_u8;
        let ro = unsafe { RegHandle::<u8, Ro>::new(addr_of_mut!(memory) as usize) };
        let wo = unsafe { RegHandle::<u8, Wo>::new(ro.address()) };
        assert_eq!(ro.read(), 0xA5);
        wo.write(0x5A);
        assert_eq!(ro.read(), 0x5A);
        assert_eq!(ro.width(), 8);
    }

    #[test]
    fn reset_skips_load() {
        let mut memory = u16::MAX;
        let reg = unsafe { RegHandle::<u16, Wo>::new(addr_of_mut!(memory) as usize) };
        reg.reset(|val| *val |= 0b100);
        assert_eq!(memory, 0b100);
    }

    #[test]
    fn update() {
        let mut memory = 0x0F_u64;
        let reg = unsafe { RegHandle::<u64, Rw>::new(addr_of_mut!(memory) as usize) };
        reg.update(|val| *val <<= 60);
        assert_eq!(reg.read(), 0xF000_0000_0000_0000);
    }

    #[test]
    fn copies_are_equal() {
        let reg = unsafe { RegHandle::<u32, Rw>::new(0x4001_3000) };
        let copy = reg;
        assert_eq!(reg, copy);
        assert_eq!(copy.address(), 0x4001_3000);
    }
}
