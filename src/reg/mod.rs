//! Memory-mapped registers.
//!
//! # Register Definitions
//!
//! A register is declared with the [`reg!`](crate::reg!) macro. The macro
//! generates a module with a typed value, a constant descriptor for each
//! field, and a handle type bound to the register address.
//!
//! ```
//! use core::ptr::addr_of_mut;
//! use mmreg::reg::prelude::*;
//! use mmreg::reg::RegResult;
//!
//! mmreg::reg! {
//!     /// SPI control register 1.
//!     pub mod SPI1 CR1; // register block and name
//!
//!     0x4001_3000 // memory address
//!     32 // bit size
//!     0x0000_0000 // reset value
//!     RReg WReg; // list of access markers for the register
//!
//!     /// SPI enable.
//!     SPE { // field name
//!         6 // offset
//!         1 // width
//!         RRegField WRegField // list of access markers for the field
//!     }
//!     /// Baud rate control.
//!     BR { 3 3 }
//!     /// Master selection.
//!     MSTR { 2 1 enum Mode { SLAVE = 0, MASTER = 1 } }
//! }
//!
//! fn main() -> RegResult<()> {
//!     let mut memory = spi1_cr1::RESET;
//!     // The real register would be obtained with `spi1_cr1::take()`.
//!     let cr1 = unsafe { spi1_cr1::Reg::new(addr_of_mut!(memory) as usize) };
//!     cr1.modify(|scope| {
//!         let val = scope.val_mut()?;
//!         val.write_br(0b101)?.write_mstr(spi1_cr1::Mode::Master).set_spe();
//!         RegResult::Ok(())
//!     })?;
//!     let val = cr1.read();
//!     assert!(val.spe());
//!     assert_eq!(val.br(), 0b101);
//!     assert_eq!(val.mstr(), Some(spi1_cr1::Mode::Master));
//!     assert_eq!(memory, 0x0000_006C);
//!     Ok(())
//! }
//! ```
//!
//! # Read-Modify-Write
//!
//! A read-modify-write goes through a [`RegScope`]: the register is loaded
//! when the scope opens and stored when it closes, whatever the number of
//! field changes in between. See [`RwReg`].

pub mod prelude;

mod access;
mod error;
mod field;
mod raw;
#[allow(clippy::module_inception)]
mod reg;
mod scope;
mod val;

pub use self::{access::*, error::*, field::*, raw::RegRaw, reg::*, scope::*, val::*};

mod compile_tests {
    //! ```compile_fail
    //! use mmreg::reg::prelude::*;
    //! mmreg::reg! {
    //!     pub mod TST TST_WO_REG;
    //!     0xDEAD_BEE0 32 0xBEEF_CACE WReg;
    //!     TST_BIT { 0 1 }
    //! }
    //! fn main() {
    //!     let reg = unsafe { tst_tst_wo_reg::take() };
    //!     let _ = reg.read();
    //! }
    //! ```
    //!
    //! ```compile_fail
    //! use mmreg::reg::prelude::*;
    //! mmreg::reg! {
    //!     pub mod TST TST_RO_REG;
    //!     0xDEAD_BEE0 32 0xBEEF_CACE RReg;
    //!     TST_BIT { 0 1 }
    //! }
    //! fn main() {
    //!     let reg = unsafe { tst_tst_ro_reg::take() };
    //!     reg.write(tst_tst_ro_reg::Val::reset());
    //! }
    //! ```
    //!
    //! ```compile_fail
    //! use mmreg::reg::prelude::*;
    //! mmreg::reg! {
    //!     pub mod TST TST_RO_REG;
    //!     0xDEAD_BEE0 32 0xBEEF_CACE RReg;
    //!     TST_BIT { 0 1 }
    //! }
    //! fn main() {
    //!     let reg = unsafe { tst_tst_ro_reg::take() };
    //!     let _ = reg.scope();
    //! }
    //! ```
    //!
    //! ```compile_fail
    //! mmreg::reg! {
    //!     pub mod TST TST_RO_REG;
    //!     0xDEAD_BEE0 32 0xBEEF_CACE RReg;
    //!     TST_BIT { 0 1 }
    //! }
    //! fn main() {
    //!     let mut val = tst_tst_ro_reg::Val::default();
    //!     val.set_tst_bit();
    //! }
    //! ```
    //!
    //! ```
    //! use mmreg::reg::prelude::*;
    //! mmreg::reg! {
    //!     pub mod TST TST_RW_REG;
    //!     0xDEAD_BEE0 32 0xBEEF_CACE RReg WReg;
    //!     TST_BIT { 0 1 }
    //!     TST_RO_BIT { 1 1 RRegField }
    //! }
    //! fn assert_rw_reg<T: RwReg>() {}
    //! fn main() {
    //!     assert_rw_reg::<tst_tst_rw_reg::Reg>();
    //!     let mut val = tst_tst_rw_reg::Val::default();
    //!     val.toggle_tst_bit();
    //!     assert!(val.tst_ro_bit());
    //! }
    //! ```
    //!
    //! ```compile_fail
    //! mmreg::reg! {
    //!     pub mod TST TST_RW_REG;
    //!     0xDEAD_BEE0 32 0xBEEF_CACE RReg WReg;
    //!     TST_RO_BIT { 1 1 RRegField }
    //! }
    //! fn main() {
    //!     let mut val = tst_tst_rw_reg::Val::default();
    //!     val.set_tst_ro_bit();
    //! }
    //! ```
    //!
    //! ```compile_fail
    //! use mmreg::reg::RegField;
    //! const FIELD: RegField<u8> = RegField::new("FIELD", 6, 4);
    //! fn main() {
    //!     let _ = FIELD;
    //! }
    //! ```
    //!
    //! ```compile_fail
    //! use mmreg::reg::RegField;
    //! const FIELD: RegField<u32> = RegField::new("FIELD", 0, 0);
    //! fn main() {
    //!     let _ = FIELD;
    //! }
    //! ```
    //!
    //! ```compile_fail
    //! mmreg::reg! {
    //!     pub mod TST OVERLAP;
    //!     0x1000 32 0 RReg WReg;
    //!     A { 0 4 }
    //!     B { 3 2 }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! mmreg::reg! {
    //!     pub mod TST ZERO_WIDTH;
    //!     0x1000 32 0 RReg WReg;
    //!     A { 0 0 }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! mmreg::reg! {
    //!     pub mod TST OUT_OF_RANGE;
    //!     0x1000 16 0 RReg WReg;
    //!     A { 12 8 }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! mmreg::reg! {
    //!     pub mod TST ODD_SIZE;
    //!     0x1000 24 0 RReg WReg;
    //!     A { 0 4 }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! mmreg::reg! {
    //!     pub mod TST RESET_TOO_WIDE;
    //!     0x1000 8 0x100 RReg WReg;
    //!     A { 0 4 }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! mmreg::reg! {
    //!     pub mod TST WIDER_FIELD;
    //!     0x1000 32 0 RReg;
    //!     A { 0 4 RRegField WRegField }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! mmreg::reg! {
    //!     pub mod TST DUPLICATE;
    //!     0x1000 32 0 RReg WReg;
    //!     A { 0 4 }
    //!     A { 8 4 }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! mmreg::reg! {
    //!     pub mod TST ENUM_TOO_WIDE;
    //!     0x1000 32 0 RReg WReg;
    //!     MODE { 0 2 enum Mode { A = 0, B = 4 } }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! mmreg::reg! {
    //!     pub mod TST NO_ACCESS;
    //!     0x1000 32 0;
    //!     A { 0 4 }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! mmreg::reg! {
    //!     pub mod TWIM0 ADDRESS;
    //!     0x4000_3588 32 0 RReg WReg;
    //!     ADDRESS { 0 7 }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! mmreg::reg! {
    //!     pub mod TST ACCESSOR_CLASH;
    //!     0x1000 32 0 RReg WReg;
    //!     A { 0 1 }
    //!     SET_A { 1 1 }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! mmreg::reg! {
    //!     pub mod TST ENUM_TWICE;
    //!     0x1000 32 0 RReg WReg;
    //!     MODE0 { 0 2 enum Mode { A = 0, B = 1 } }
    //!     MODE1 { 2 2 enum Mode { A = 0, B = 1 } }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! mmreg::reg! {
    //!     pub mod TST ENUM_UNDEFINED;
    //!     0x1000 32 0 RReg WReg;
    //!     MODE0 { 0 2 enum Mode }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! mmreg::reg! {
    //!     pub mod TST ENUM_WIDTH_MISMATCH;
    //!     0x1000 32 0 RReg WReg;
    //!     MODE0 { 0 2 enum Mode { A = 0, B = 1 } }
    //!     MODE1 { 2 3 enum Mode }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! mmreg::reg! {
    //!     pub mod TST ENUM_NAMED_VAL;
    //!     0x1000 32 0 RReg WReg;
    //!     MODE { 0 2 enum Val { A = 0, B = 1 } }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! mmreg::reg! {
    //!     pub mod TST ARRAY_TOO_LONG;
    //!     0x1000 32 0 RReg WReg;
    //!     MODE { 0 2 [17; 2] }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! mmreg::reg! {
    //!     pub mod TST ARRAY_STRIDE;
    //!     0x1000 32 0 RReg WReg;
    //!     MODE { 0 2 [4; 1] }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! mmreg::reg! {
    //!     pub mod TST ARRAY_OVERLAP;
    //!     0x1000 32 0 RReg WReg;
    //!     CC { 0 2 [4; 4] }
    //!     FLAG { 5 1 }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```
    //! mmreg::reg! {
    //!     pub mod TST ARRAY_GAPS;
    //!     0x1000 32 0 RReg WReg;
    //!     CC { 0 2 [4; 4] }
    //!     FLAG { 2 1 }
    //!     MODE0 { 24 2 enum Mode { A = 0, B = 1 } }
    //!     MODE1 { 26 2 enum Mode }
    //! }
    //! fn main() {
    //!     let mut val = tst_array_gaps::Val::default();
    //!     val.set_flag().write_cc(3, 0b11).unwrap();
    //!     val.write_mode1(tst_array_gaps::Mode::B);
    //!     assert_eq!(mmreg::reg::RegVal::raw(&val), 0x0400_3004);
    //! }
    //! ```
}
