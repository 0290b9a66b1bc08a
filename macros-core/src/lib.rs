//! Procedural macros base for mmreg.
//!
//! This crate provides shared functionality for all mmreg procedural macro
//! crates.

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod lit;
mod macros;
mod reg_mod;
mod unkeywordize;

pub use self::{
    lit::{parse_lit_u32, parse_lit_u64},
    reg_mod::RegMod,
    unkeywordize::unkeywordize,
};
