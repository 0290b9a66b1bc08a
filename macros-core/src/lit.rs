use syn::{LitInt, Result};

/// Parses an unsuffixed or suffixed integer literal into `u64`.
///
/// Hexadecimal, octal and binary literals are accepted.
pub fn parse_lit_u64(lit: &LitInt) -> Result<u64> {
    lit.base10_parse()
}

/// Parses an integer literal into `u32`.
pub fn parse_lit_u32(lit: &LitInt) -> Result<u32> {
    lit.base10_parse()
}
