use mmreg::reg::prelude::*;
use mmreg::reg::{RegError, RegResult};
use std::cell::Cell;

mmreg::reg! {
    /// Control register with mixed fields.
    pub mod TST CTRL;
    0x4000_0000 32 0x0000_0000 RReg WReg;
    /// Low nibble.
    A { 0 4 }
    /// Second byte nibble.
    B { 8 4 }
    /// Enable bit.
    EN { 31 1 }
}

/// Register stand-in that counts loads and stores.
#[derive(Default)]
struct MockReg {
    value: Cell<u32>,
    loads: Cell<usize>,
    stores: Cell<usize>,
}

impl MockReg {
    fn with(value: u32) -> Self {
        let reg = Self::default();
        reg.value.set(value);
        reg
    }

    fn loads(&self) -> usize {
        self.loads.get()
    }

    fn stores(&self) -> usize {
        self.stores.get()
    }
}

impl Reg for MockReg {
    type Val = tst_ctrl::Val;
}

impl RReg for MockReg {
    fn read(&self) -> tst_ctrl::Val {
        self.loads.set(self.loads.get() + 1);
        tst_ctrl::Val::from_raw(self.value.get())
    }
}

impl WReg for MockReg {
    fn write(&self, val: tst_ctrl::Val) {
        self.stores.set(self.stores.get() + 1);
        self.value.set(val.raw());
    }
}

#[test]
fn no_mutations() {
    let reg = MockReg::with(0x1234_5678);
    {
        let _scope = reg.scope();
        assert_eq!((reg.loads(), reg.stores()), (1, 0));
    }
    assert_eq!((reg.loads(), reg.stores()), (1, 1));
    assert_eq!(reg.value.get(), 0x1234_5678);
}

#[test]
fn three_mutations() {
    let reg = MockReg::default();
    {
        let mut scope = reg.scope();
        scope.set(&tst_ctrl::A, 0x1).unwrap();
        scope.set(&tst_ctrl::B, 0x2).unwrap();
        scope.set_bit(&tst_ctrl::EN).unwrap();
        assert_eq!((reg.loads(), reg.stores()), (1, 0));
    }
    assert_eq!((reg.loads(), reg.stores()), (1, 1));
    assert_eq!(reg.value.get(), 0x8000_0201);
}

#[test]
fn mixed_fields() {
    let reg = MockReg::default();
    let result: RegResult<()> = reg.modify(|scope| {
        scope.set(&tst_ctrl::A, 0xF)?.set(&tst_ctrl::B, 0x3)?;
        Ok(())
    });
    assert_eq!(result, Ok(()));
    assert_eq!(reg.value.get(), 0x0000_030F);
    let val = reg.read();
    assert_eq!(val.a(), 0xF);
    assert_eq!(val.b(), 0x3);
    assert!(!val.en());
}

#[test]
fn generated_setters_in_scope() {
    let reg = MockReg::with(0xFFFF_FFFF);
    reg.try_update(|val| {
        val.write_a(0)?.write_b(0x5)?.clear_en();
        Ok(())
    })
    .unwrap();
    assert_eq!(reg.value.get(), 0x7FFF_F5F0);
    assert_eq!((reg.loads(), reg.stores()), (1, 1));
}

#[test]
fn out_of_range_stores_partial_value() {
    let reg = MockReg::with(0x0000_0A00);
    let result: RegResult<()> = reg.modify(|scope| {
        scope.set(&tst_ctrl::A, 0x7)?;
        scope.set(&tst_ctrl::B, 0x10)?;
        scope.set_bit(&tst_ctrl::EN)?;
        Ok(())
    });
    assert_eq!(result, Err(RegError::ValueOutOfRange { field: "B", width: 4, value: 0x10 }));
    assert_eq!((reg.loads(), reg.stores()), (1, 1));
    assert_eq!(reg.value.get(), 0x0000_0A07);
}

#[test]
fn early_return_stores() {
    fn configure(reg: &MockReg, enable: bool) -> u32 {
        let mut scope = reg.scope();
        scope.set(&tst_ctrl::A, 0x9).unwrap();
        if !enable {
            return scope.val().raw();
        }
        scope.set_bit(&tst_ctrl::EN).unwrap();
        scope.val().raw()
    }

    let reg = MockReg::default();
    assert_eq!(configure(&reg, false), 0x0000_0009);
    assert_eq!((reg.loads(), reg.stores()), (1, 1));
    assert_eq!(reg.value.get(), 0x0000_0009);
}

#[test]
fn close_then_mutate() {
    let reg = MockReg::default();
    let mut scope = reg.scope();
    scope.set(&tst_ctrl::A, 0x3).unwrap();
    assert_eq!(scope.close(), Ok(()));
    assert_eq!(reg.stores(), 1);
    assert_eq!(scope.set(&tst_ctrl::A, 0x4).err(), Some(RegError::ScopeClosed));
    assert_eq!(scope.set_bit(&tst_ctrl::EN).err(), Some(RegError::ScopeClosed));
    assert_eq!(scope.clear_bit(&tst_ctrl::EN).err(), Some(RegError::ScopeClosed));
    assert_eq!(scope.close(), Err(RegError::ScopeClosed));
    assert_eq!(scope.get(&tst_ctrl::A), 0x3);
    drop(scope);
    assert_eq!((reg.loads(), reg.stores()), (1, 1));
    assert_eq!(reg.value.get(), 0x0000_0003);
}

#[test]
fn finish() {
    let reg = MockReg::default();
    let mut scope = reg.scope();
    scope.toggle_bit(&tst_ctrl::EN).unwrap();
    scope.finish().unwrap();
    assert_eq!((reg.loads(), reg.stores()), (1, 1));
    assert_eq!(reg.value.get(), 0x8000_0000);
}

#[test]
fn replace_whole_value() {
    let reg = MockReg::with(0x0000_0F0F);
    {
        let mut scope = reg.scope();
        let old = scope.replace(tst_ctrl::Val::reset()).unwrap();
        assert_eq!(old.raw(), 0x0000_0F0F);
    }
    assert_eq!(reg.value.get(), tst_ctrl::RESET);
}

#[test]
fn update_without_errors() {
    let reg = MockReg::default();
    reg.update(|val| {
        val.set_en();
    });
    assert_eq!((reg.loads(), reg.stores()), (1, 1));
    assert!(reg.read().en());
}

#[test]
fn reset_skips_load() {
    let reg = MockReg::with(0xFFFF_FFFF);
    reg.reset(|val| {
        val.write_a(0x2).unwrap();
    });
    assert_eq!((reg.loads(), reg.stores()), (0, 1));
    assert_eq!(reg.value.get(), 0x0000_0002);
}

#[test]
fn store_on_unwind() {
    let reg = MockReg::default();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let mut scope = reg.scope();
        scope.set(&tst_ctrl::B, 0x6).unwrap();
        panic!("interrupted");
    }));
    assert!(result.is_err());
    assert_eq!((reg.loads(), reg.stores()), (1, 1));
    assert_eq!(reg.value.get(), 0x0000_0600);
}
