use std::convert::Infallible;

/// Copy construction that may fail.
///
/// Implemented for every `Clone` type with [`Infallible`] error. Types that want
/// a fallible copy implement this trait instead of `Clone`.
pub trait CopyConstruct: Sized {
    type Error;

    fn copy_construct(&self) -> Result<Self, Self::Error>;
}

impl<T: Clone> CopyConstruct for T {
    type Error = Infallible;

    fn copy_construct(&self) -> Result<Self, Infallible> {
        Ok(self.clone())
    }
}

/// Construction without a source that may fail.
///
/// Implemented for every `Default` type with [`Infallible`] error, for which
/// default and value construction are the same.
pub trait DefaultConstruct: Sized {
    type Error;

    /// Default construction.
    fn default_construct() -> Result<Self, Self::Error>;

    /// Value construction, the type's notion of an empty or zero value.
    fn value_construct() -> Result<Self, Self::Error> {
        Self::default_construct()
    }
}

impl<T: Default> DefaultConstruct for T {
    type Error = Infallible;

    fn default_construct() -> Result<Self, Infallible> {
        Ok(T::default())
    }
}

/// Source element that can be turned into a `T` placed in a slot.
///
/// Which construction happens is decided by what the source yields:
/// - owned `T` is consumable and is moved,
/// - `&T` is persistent and is copied through [`CopyConstruct`].
///
/// Other owned wrappers may implement this too. Note that such an
/// implementation is free to fail after it has consumed itself, in which case
/// that source element is lost.
pub trait Emplace<T> {
    type Error;

    fn emplace(self) -> Result<T, Self::Error>;
}

impl<T> Emplace<T> for T {
    type Error = Infallible;

    #[inline(always)]
    fn emplace(self) -> Result<T, Infallible> {
        Ok(self)
    }
}

impl<'a, T: CopyConstruct> Emplace<T> for &'a T {
    type Error = T::Error;

    #[inline(always)]
    fn emplace(self) -> Result<T, T::Error> {
        self.copy_construct()
    }
}
