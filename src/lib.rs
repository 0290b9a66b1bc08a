//! Typed accessors for memory-mapped hardware registers.
//!
//! The crate turns a register description into a typed handle at a fixed
//! address, a value type with one accessor per bit-field, and a
//! read-modify-write scope that performs exactly one load and one store.
//!
//! * [`reg::RegHandle`] - volatile read and write of one register.
//! * [`reg::RegField`] - bit-field codec with range checking.
//! * [`reg::RegScope`] - scoped read-modify-write.
//! * [`reg!`] - generates the above from a register description.
//!
//! See the [`reg`] module for an example.
//!
//! # Features
//!
//! * `std` - implements `std::error::Error` for [`reg::RegError`].
//! * `defmt` - derives `defmt::Format` for public types and traces the
//!   loads and stores of read-modify-write scopes.

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::inline_always)]
#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate self as mmreg;

pub mod reg;

pub use mmreg_macros::reg;
