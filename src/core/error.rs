use getset::{CopyGetters, Getters};
use std::{
    convert::Infallible,
    error::Error,
    fmt::{self, Display},
};

/// Construction of an element failed.
///
/// Everything constructed before `index` has already been destroyed when this
/// is returned. `cause` is exactly what the element's construction returned.
#[derive(Debug, Clone, PartialEq, Eq, CopyGetters, Getters)]
pub struct ConstructionFailure<E> {
    /// Index of the element whose construction failed.
    #[getset(get_copy = "pub")]
    index: usize,
    #[getset(get = "pub")]
    cause: E,
}

impl<E> ConstructionFailure<E> {
    pub fn new(index: usize, cause: E) -> Self {
        Self { index, cause }
    }

    pub fn into_cause(self) -> E {
        self.cause
    }

    pub fn map_cause<F>(self, map: impl FnOnce(E) -> F) -> ConstructionFailure<F> {
        ConstructionFailure {
            index: self.index,
            cause: map(self.cause),
        }
    }
}

impl ConstructionFailure<Infallible> {
    /// Failure that can't happen.
    pub fn unreachable(self) -> ! {
        match self.cause {}
    }
}

impl<E: Display> Display for ConstructionFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Construction of element {} failed: {}",
            self.index, self.cause
        )
    }
}

impl<E: Error + 'static> Error for ConstructionFailure<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Refused(&'static str);

    impl Display for Refused {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "refused {}", self.0)
        }
    }

    impl Error for Refused {}

    #[test]
    fn cause_is_untouched() {
        let failure = ConstructionFailure::new(2, Refused("copy"));
        assert_eq!(failure.index(), 2);
        assert_eq!(failure.cause(), &Refused("copy"));
        assert_eq!(failure.into_cause(), Refused("copy"));
    }

    #[test]
    fn display_and_source() {
        let failure = ConstructionFailure::new(7, Refused("value"));
        assert_eq!(
            failure.to_string(),
            "Construction of element 7 failed: refused value"
        );
        let source = failure.source().expect("Cause should be the source");
        assert_eq!(source.to_string(), "refused value");
    }

    #[test]
    fn map_cause_keeps_index() {
        let failure = ConstructionFailure::new(3, Refused("fill")).map_cause(|c| c.0.len());
        assert_eq!(failure.index(), 3);
        assert_eq!(*failure.cause(), 4);
    }
}
