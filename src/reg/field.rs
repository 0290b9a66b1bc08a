use super::raw::bit_mask;
use super::{RegError, RegRaw, RegResult};
use core::fmt;
use core::marker::PhantomData;

/// Named contiguous range of bits inside a register value.
///
/// A descriptor is a pure codec: it never touches hardware. The layout is
/// checked once by [`RegField::new`], so the codec methods don't re-validate
/// it.
///
/// ```
/// use mmreg::reg::RegField;
///
/// const BR: RegField<u32> = RegField::new("BR", 3, 3);
///
/// let raw = BR.encode(0x0000_0041, 0b101).unwrap();
/// assert_eq!(raw, 0x0000_0069);
/// assert_eq!(BR.decode(raw), 0b101);
/// assert!(BR.encode(raw, 0b1000).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegField<R> {
    name: &'static str,
    offset: u32,
    width: u32,
    _raw: PhantomData<R>,
}

impl<R: RegRaw> RegField<R> {
    /// Creates a new field descriptor.
    ///
    /// # Panics
    ///
    /// * If `width` is zero.
    /// * If `offset + width` is greater than the width of `R` in bits.
    ///
    /// In a `const` item these are compile-time errors.
    #[must_use]
    pub const fn new(name: &'static str, offset: u32, width: u32) -> Self {
        assert!(width != 0, "register field has zero width");
        assert!(offset < R::WIDTH, "register field offset is out of the register");
        assert!(width <= R::WIDTH - offset, "register field exceeds the register");
        Self { name, offset, width, _raw: PhantomData }
    }

    /// Returns the field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the offset of the lowest bit of the field.
    #[inline]
    pub const fn offset(&self) -> u32 {
        self.offset
    }

    /// Returns the number of bits in the field.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the largest value the field can hold.
    #[inline]
    pub fn max(&self) -> R {
        bit_mask(self.width)
    }

    /// Returns the mask of the field bits in place.
    #[inline]
    pub fn mask(&self) -> R {
        self.max() << self.offset
    }

    /// Extracts the field from `raw`, right-justified.
    #[inline]
    pub fn decode(&self, raw: R) -> R {
        (raw >> self.offset) & self.max()
    }

    /// Returns `raw` with the field replaced by `value`. All other bits are
    /// preserved.
    ///
    /// # Errors
    ///
    /// [`RegError::ValueOutOfRange`] if `value` is greater than
    /// [`max`](RegField::max).
    #[inline]
    pub fn encode(&self, raw: R, value: R) -> RegResult<R> {
        if value > self.max() {
            return Err(RegError::ValueOutOfRange {
                field: self.name,
                width: self.width,
                value: value.to_u64(),
            });
        }
        Ok(self.insert(raw, value))
    }

    /// Returns `raw` with the field replaced by the low order bits of
    /// `value`. Higher bits of `value` are discarded.
    #[inline]
    pub fn insert(&self, raw: R, value: R) -> R {
        (raw & !self.mask()) | ((value & self.max()) << self.offset)
    }

    /// Returns `true` if any bit of the field is set in `raw`.
    #[inline]
    pub fn is_set(&self, raw: R) -> bool {
        raw & self.mask() != R::ZERO
    }

    /// Returns `raw` with all field bits set.
    #[inline]
    pub fn set(&self, raw: R) -> R {
        raw | self.mask()
    }

    /// Returns `raw` with all field bits cleared.
    #[inline]
    pub fn clear(&self, raw: R) -> R {
        raw & !self.mask()
    }

    /// Returns `raw` with all field bits inverted.
    #[inline]
    pub fn toggle(&self, raw: R) -> R {
        raw ^ self.mask()
    }
}

impl<R> fmt::Debug for RegField<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegField")
            .field("name", &self.name)
            .field("offset", &self.offset)
            .field("width", &self.width)
            .finish()
    }
}

/// Run of equally sized fields repeated at a fixed stride inside one
/// register, e.g. sixteen 2-bit pin modes.
///
/// ```
/// use mmreg::reg::{RegError, RegFieldArray};
///
/// const MODE: RegFieldArray<u32> = RegFieldArray::new("MODE", 0, 2, 16, 2);
///
/// let raw = MODE.get(3)?.encode(0, 0b11)?;
/// assert_eq!(raw, 0x0000_00C0);
/// assert_eq!(MODE.get(3)?.decode(raw), 0b11);
/// assert_eq!(
///     MODE.get(16),
///     Err(RegError::IndexOutOfRange { field: "MODE", index: 16, len: 16 })
/// );
/// # Ok::<(), RegError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegFieldArray<R> {
    first: RegField<R>,
    len: u32,
    stride: u32,
}

impl<R: RegRaw> RegFieldArray<R> {
    /// Creates a new field array descriptor. Element `n` starts at bit
    /// `offset + n * stride`.
    ///
    /// # Panics
    ///
    /// * If `width` or `len` is zero.
    /// * If `stride` is less than `width`.
    /// * If the last element exceeds the width of `R` in bits.
    ///
    /// In a `const` item these are compile-time errors.
    #[must_use]
    pub const fn new(name: &'static str, offset: u32, width: u32, len: u32, stride: u32) -> Self {
        assert!(len != 0, "register field array is empty");
        assert!(stride >= width, "register field array elements overlap");
        let first = RegField::new(name, offset, width);
        let end = offset as u64 + (len as u64 - 1) * stride as u64 + width as u64;
        assert!(end <= R::WIDTH as u64, "register field array exceeds the register");
        Self { first, len, stride }
    }

    /// Returns the field array name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.first.name
    }

    /// Returns the number of elements.
    #[allow(clippy::len_without_is_empty)]
    #[inline]
    pub const fn len(&self) -> u32 {
        self.len
    }

    /// Returns the distance in bits between the starts of two adjacent
    /// elements.
    #[inline]
    pub const fn stride(&self) -> u32 {
        self.stride
    }

    /// Returns the descriptor of element `index`.
    ///
    /// # Errors
    ///
    /// [`RegError::IndexOutOfRange`] if `index` is not less than
    /// [`len`](RegFieldArray::len).
    #[inline]
    pub fn get(&self, index: usize) -> RegResult<RegField<R>> {
        match u32::try_from(index) {
            Ok(index) if index < self.len => Ok(self.element(index)),
            _ => Err(RegError::IndexOutOfRange { field: self.first.name, index, len: self.len }),
        }
    }

    /// Returns an iterator over the element descriptors.
    pub fn iter(&self) -> impl Iterator<Item = RegField<R>> {
        let array = *self;
        (0..self.len).map(move |index| array.element(index))
    }

    /// Returns a [`Debug`](fmt::Debug) view of all elements decoded from
    /// `raw`.
    pub fn decoded(&self, raw: R) -> impl fmt::Debug {
        Decoded { array: *self, raw }
    }

    fn element(&self, index: u32) -> RegField<R> {
        RegField { offset: self.first.offset + index * self.stride, ..self.first }
    }
}

impl<R> fmt::Debug for RegFieldArray<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegFieldArray")
            .field("name", &self.first.name)
            .field("offset", &self.first.offset)
            .field("width", &self.first.width)
            .field("len", &self.len)
            .field("stride", &self.stride)
            .finish()
    }
}

struct Decoded<R> {
    array: RegFieldArray<R>,
    raw: R,
}

impl<R: RegRaw> fmt::Debug for Decoded<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.array.iter().map(|field| field.decode(self.raw))).finish()
    }
}
