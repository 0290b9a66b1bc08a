//! Memory-mapped registers prelude.

pub use super::{RReg, Reg, RegVal, RwReg, WReg};
