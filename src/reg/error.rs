use core::fmt;

/// Result of a field encode or RMW scope operation.
pub type RegResult<T> = Result<T, RegError>;

/// Error returned by field encoding and RMW scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegError {
    /// A value doesn't fit in the bit width of a field.
    ValueOutOfRange {
        /// Field name.
        field: &'static str,
        /// Field width in bits.
        width: u32,
        /// The rejected value.
        value: u64,
    },
    /// An index is past the end of a field array.
    IndexOutOfRange {
        /// Field array name.
        field: &'static str,
        /// The rejected index.
        index: usize,
        /// Number of fields in the array.
        len: u32,
    },
    /// A mutation was attempted after the scope had stored its value.
    ScopeClosed,
}

impl fmt::Display for RegError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValueOutOfRange { field, width, value } => {
                write!(f, "value {value:#x} doesn't fit in {width}-bit field `{field}`")
            }
            Self::IndexOutOfRange { field, index, len } => {
                write!(f, "index {index} is out of range for field array `{field}` of length {len}")
            }
            Self::ScopeClosed => f.write_str("register scope is already closed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RegError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = RegError::ValueOutOfRange { field: "BR", width: 3, value: 8 };
        assert_eq!(err.to_string(), "value 0x8 doesn't fit in 3-bit field `BR`");
        let err = RegError::IndexOutOfRange { field: "MODE", index: 16, len: 16 };
        assert_eq!(err.to_string(), "index 16 is out of range for field array `MODE` of length 16");
        assert_eq!(RegError::ScopeClosed.to_string(), "register scope is already closed");
    }
}
