use core::mem::size_of;
use core::ptr::addr_of_mut;
use mmreg::reg::prelude::*;
use mmreg::reg::{RegError, RegField, RegResult};

mmreg::reg! {
    /// SPI control register 1.
    #[doc = "test reg attribute"]
    pub mod SPI1 CR1;
    0x4001_3000 32 0x0000_0000 RReg WReg;
    /// Clock phase.
    CPHA { 0 1 }
    /// Master selection.
    MSTR { 2 1 enum Mode {
        /// Slave configuration.
        SLAVE = 0,
        /// Master configuration.
        MASTER = 1,
    } }
    /// Baud rate control.
    BR { 3 3 }
    /// SPI enable.
    SPE { 6 1 }
    /// Frame type.
    TYPE { 8 2 enum FrameType { MOTOROLA = 0, TI = 1, RAW = 3 } }
}

mmreg::reg! {
    /// Status register.
    pub mod SPI1 SR;
    0x4001_3008 8 0x02 RReg;
    /// Receive buffer not empty.
    RXNE { 0 1 }
    /// Transmit buffer empty.
    TXE { 1 1 }
    /// FIFO level.
    FLVL { 4 2 }
}

mmreg::reg! {
    /// Interrupt clear register.
    pub mod TIM2 ICR;
    0x4000_0040 16 0 WReg;
    /// Update interrupt clear.
    UIF { 0 1 }
    /// Capture channel.
    CC { 1 4 }
}

mmreg::reg! {
    /// Cycle counter.
    pub mod DWT CYCCNT;
    0xE000_1004 64 0xFFFF_FFFF_0000_0000 RReg WReg;
    /// Low word.
    LOW { 0 32 }
    /// High word.
    HIGH { 32 32 RRegField }
}

mmreg::reg! {
    /// Port configuration register with two fields of one enum type.
    pub mod GPIOA CFG;
    0x4800_0010 32 0x0000_0000 RReg WReg;
    /// Pin 0 mode.
    MODE0 { 0 2 enum Mode {
        /// Input.
        INPUT = 0,
        /// General purpose output.
        OUTPUT = 1,
        /// Alternate function.
        ALTERNATE = 2,
        /// Analog.
        ANALOG = 3,
    } }
    /// Pin 1 mode.
    MODE1 { 2 2 enum Mode }
    /// Configuration lock.
    LOCK { 8 1 }
}

mmreg::reg! {
    /// Port mode register.
    pub mod GPIOB MODER;
    0x4800_0400 32 0xABFF_FFFF RReg WReg;
    /// Pin modes.
    MODE { 0 2 [16; 2] enum Mode {
        INPUT = 0,
        OUTPUT = 1,
        ALTERNATE = 2,
        ANALOG = 3,
    } }
}

mmreg::reg! {
    /// Port output data register.
    pub mod GPIOB ODR;
    0x4800_0414 16 0 RReg WReg;
    /// Output data bits.
    OD { 0 1 [16; 1] }
}

mmreg::reg! {
    /// Capture/compare mode register.
    pub mod TIM1 CCMR;
    0x4001_2C18 32 0 RReg WReg;
    /// Capture/compare selection, one per channel.
    CC { 0 3 [4; 8] }
    /// Preload enable.
    PE { 3 1 }
}

#[test]
fn constants() {
    assert_eq!(spi1_cr1::ADDRESS, 0x4001_3000);
    assert_eq!(spi1_cr1::RESET, 0);
    assert_eq!(spi1_sr::ADDRESS, 0x4001_3008);
    assert_eq!(spi1_sr::RESET, 0x02);
    assert_eq!(tim2_icr::ADDRESS, 0x4000_0040);
    assert_eq!(dwt_cyccnt::RESET, 0xFFFF_FFFF_0000_0000);
}

#[test]
fn field_descriptors() {
    assert_eq!(spi1_cr1::BR.name(), "BR");
    assert_eq!(spi1_cr1::BR.offset(), 3);
    assert_eq!(spi1_cr1::BR.width(), 3);
    assert_eq!(spi1_cr1::BR.mask(), 0x0000_0038);
    assert_eq!(spi1_cr1::SPE, RegField::<u32>::new("SPE", 6, 1));
    assert_eq!(spi1_cr1::TYPE.mask(), 0x0000_0300);
    assert_eq!(spi1_sr::FLVL.max(), 0b11);
    assert_eq!(dwt_cyccnt::HIGH.mask(), 0xFFFF_FFFF_0000_0000);
}

#[test]
fn value_sizes() {
    assert_eq!(size_of::<spi1_cr1::Val>(), 4);
    assert_eq!(size_of::<spi1_sr::Val>(), 1);
    assert_eq!(size_of::<tim2_icr::Val>(), 2);
    assert_eq!(size_of::<dwt_cyccnt::Val>(), 8);
    assert_eq!(size_of::<spi1_cr1::Reg>(), size_of::<usize>());
}

#[test]
fn default_is_reset() {
    assert_eq!(spi1_sr::Val::default().raw(), 0x02);
    assert_eq!(spi1_sr::Val::reset(), spi1_sr::Val::default());
    assert!(spi1_sr::Val::default().txe());
    assert!(!spi1_sr::Val::default().rxne());
    assert_eq!(dwt_cyccnt::Val::default().high(), 0xFFFF_FFFF);
}

#[test]
fn bit_accessors() {
    let mut val = spi1_cr1::Val::default();
    assert!(!val.spe());
    val.set_spe();
    assert!(val.spe());
    assert_eq!(val.raw(), 0x0000_0040);
    val.toggle_spe().toggle_cpha();
    assert!(!val.spe());
    assert!(val.cpha());
    val.write_cpha(false).write_spe(true);
    assert_eq!(val.raw(), 0x0000_0040);
    val.clear_spe();
    assert_eq!(val.raw(), 0);
}

#[test]
fn bits_accessors() -> RegResult<()> {
    let mut val = spi1_cr1::Val::default();
    val.write_br(0b111)?;
    assert_eq!(val.br(), 0b111);
    assert_eq!(val.raw(), 0x0000_0038);
    assert_eq!(
        val.write_br(0b1000).map(|val| val.raw()),
        Err(RegError::ValueOutOfRange { field: "BR", width: 3, value: 0b1000 })
    );
    assert_eq!(val.br(), 0b111);
    Ok(())
}

#[test]
fn enum_accessors() {
    let mut val = spi1_cr1::Val::default();
    assert_eq!(val.mstr(), Some(spi1_cr1::Mode::Slave));
    val.write_mstr(spi1_cr1::Mode::Master);
    assert_eq!(val.mstr(), Some(spi1_cr1::Mode::Master));
    assert_eq!(val.raw(), 0x0000_0004);
    val.write_type(spi1_cr1::FrameType::Raw);
    assert_eq!(val._type(), Some(spi1_cr1::FrameType::Raw));
    *val.raw_mut() = 0x0000_0200;
    assert_eq!(val._type(), None);
}

#[test]
fn enum_bits() {
    assert_eq!(spi1_cr1::FrameType::from_bits(1), Some(spi1_cr1::FrameType::Ti));
    assert_eq!(spi1_cr1::FrameType::from_bits(2), None);
    assert_eq!(spi1_cr1::FrameType::Raw.bits(), 3);
    assert_eq!(spi1_cr1::Mode::Master.bits(), 1);
}

#[test]
fn debug_output() {
    let mut val = spi1_cr1::Val::default();
    val.write_br(0b101).unwrap().set_spe();
    assert_eq!(
        format!("{val:?}"),
        "SPI1::CR1 { CPHA: 0, MSTR: 0, BR: 5, SPE: 1, TYPE: 0 }"
    );
}

#[test]
fn read_write_memory() {
    let mut memory = 0x0000_0000_u32;
    let cr1 = unsafe { spi1_cr1::Reg::new(addr_of_mut!(memory) as usize) };
    assert_eq!(cr1.address(), addr_of_mut!(memory) as usize);
    assert_eq!(cr1.width(), 32);
    let mut val = cr1.read();
    val.set_spe().write_mstr(spi1_cr1::Mode::Master);
    cr1.write(val);
    assert_eq!(cr1.read_raw(), 0x0000_0044);
    cr1.write_raw(0);
    assert_eq!(memory, 0);
}

#[test]
fn scoped_memory() {
    let mut memory = 0xFFFF_FF00_u32;
    let cr1 = unsafe { spi1_cr1::Reg::new(addr_of_mut!(memory) as usize) };
    let result: RegResult<()> = cr1.modify(|scope| {
        assert!(!scope.val().spe());
        scope.set(&spi1_cr1::SPE, 1)?;
        Ok(())
    });
    assert!(result.is_ok());
    assert_eq!(memory, 0xFFFF_FF40);
}

#[test]
fn read_only_memory() {
    let mut memory = 0b0001_0011_u8;
    let sr = unsafe { spi1_sr::Reg::new(addr_of_mut!(memory) as usize) };
    let val = sr.read();
    assert!(val.rxne());
    assert!(val.txe());
    assert_eq!(val.flvl(), 0b01);
}

#[test]
fn write_only_memory() {
    let mut memory = 0xFFFF_u16;
    let icr = unsafe { tim2_icr::Reg::new(addr_of_mut!(memory) as usize) };
    icr.reset(|val| {
        val.set_uif().write_cc(0b1010).unwrap();
    });
    assert_eq!(memory, 0b1_0101);
}

#[test]
fn full_width_fields() {
    let mut memory = dwt_cyccnt::RESET;
    let cyccnt = unsafe { dwt_cyccnt::Reg::new(addr_of_mut!(memory) as usize) };
    cyccnt.try_update(|val| val.write_low(0xDEAD_BEEF).map(drop)).unwrap();
    let val = cyccnt.read();
    assert_eq!(val.low(), 0xDEAD_BEEF);
    assert_eq!(val.high(), 0xFFFF_FFFF);
    assert_eq!(memory, 0xFFFF_FFFF_DEAD_BEEF);
}

#[test]
fn shared_enum() {
    let mut val = gpioa_cfg::Val::default();
    val.write_mode0(gpioa_cfg::Mode::Analog).write_mode1(gpioa_cfg::Mode::Output).set_lock();
    assert_eq!(val.mode0(), Some(gpioa_cfg::Mode::Analog));
    assert_eq!(val.mode1(), Some(gpioa_cfg::Mode::Output));
    assert!(val.lock());
    assert_eq!(val.raw(), 0x0000_0107);
    assert_eq!(gpioa_cfg::Mode::from_bits(2), Some(gpioa_cfg::Mode::Alternate));
}

#[test]
fn enum_array() {
    let mut val = gpiob_moder::Val::default();
    assert_eq!(val.mode(0), Ok(Some(gpiob_moder::Mode::Analog)));
    assert_eq!(val.mode(12), Ok(Some(gpiob_moder::Mode::Analog)));
    assert_eq!(val.mode(13), Ok(Some(gpiob_moder::Mode::Alternate)));
    assert_eq!(val.mode(15), Ok(Some(gpiob_moder::Mode::Alternate)));
    val.write_mode(0, gpiob_moder::Mode::Output).unwrap();
    assert_eq!(val.raw(), 0xABFF_FFFD);
    assert_eq!(
        val.mode(16),
        Err(RegError::IndexOutOfRange { field: "MODE", index: 16, len: 16 })
    );
    assert_eq!(
        val.write_mode(16, gpiob_moder::Mode::Input).map(|val| val.raw()),
        Err(RegError::IndexOutOfRange { field: "MODE", index: 16, len: 16 })
    );
    assert_eq!(val.raw(), 0xABFF_FFFD);
    assert_eq!(gpiob_moder::MODE.len(), 16);
    assert_eq!(gpiob_moder::MODE.stride(), 2);
}

#[test]
fn bit_array() -> RegResult<()> {
    let mut val = gpiob_odr::Val::default();
    val.set_od(0)?.set_od(15)?.toggle_od(1)?;
    assert_eq!(val.raw(), 0x8003);
    val.clear_od(0)?.write_od(15, false)?;
    assert_eq!(val.raw(), 0x0002);
    assert!(val.od(1)?);
    assert!(!val.od(2)?);
    assert!(val.od(16).is_err());
    assert!(val.set_od(16).is_err());
    assert_eq!(val.raw(), 0x0002);
    Ok(())
}

#[test]
fn bits_array_with_gaps() -> RegResult<()> {
    let mut val = tim1_ccmr::Val::default();
    val.write_cc(0, 0b101)?.write_cc(3, 0b111)?.set_pe();
    assert_eq!(val.raw(), 0x0700_000D);
    assert_eq!(val.cc(0)?, 0b101);
    assert_eq!(val.cc(1)?, 0);
    assert_eq!(val.cc(3)?, 0b111);
    assert_eq!(
        val.write_cc(1, 0b1000).map(|val| val.raw()),
        Err(RegError::ValueOutOfRange { field: "CC", width: 3, value: 0b1000 })
    );
    assert_eq!(format!("{val:?}"), "TIM1::CCMR { CC: [5, 0, 0, 7], PE: 1 }");
    Ok(())
}

#[test]
fn array_in_scope() {
    let mut memory = 0_u32;
    let ccmr = unsafe { tim1_ccmr::Reg::new(addr_of_mut!(memory) as usize) };
    let result: RegResult<()> = ccmr.modify(|scope| {
        scope.set(&tim1_ccmr::CC.get(2)?, 0b011)?;
        scope.set(&tim1_ccmr::CC.get(4)?, 0b001)?;
        Ok(())
    });
    assert_eq!(result, Err(RegError::IndexOutOfRange { field: "CC", index: 4, len: 4 }));
    assert_eq!(memory, 0x0003_0000);
}
