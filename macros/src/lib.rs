//! Procedural macros for mmreg.
//!
//! This crate is not meant to be used directly. See `mmreg` documentation
//! for details.

#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]

mod reg;

use proc_macro::TokenStream;

/// Generates a typed register module. See `mmreg::reg!` for the syntax.
#[proc_macro]
pub fn reg(input: TokenStream) -> TokenStream {
    reg::proc_macro(input)
}
