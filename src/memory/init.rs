use super::backout::Backout;
use crate::core::{span, ConstructionFailure, DefaultConstruct, SlotCursor};

type Failure<T> = ConstructionFailure<<T as DefaultConstruct>::Error>;

/// Which sourceless construction to run per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Init {
    Default,
    Value,
}

impl Init {
    #[inline(always)]
    fn make<T: DefaultConstruct>(self) -> Result<T, T::Error> {
        match self {
            Init::Default => T::default_construct(),
            Init::Value => T::value_construct(),
        }
    }
}

unsafe fn construct_n<C>(first: C, count: usize, init: Init) -> Result<C, Failure<C::Value>>
where
    C: SlotCursor,
    C::Value: DefaultConstruct,
{
    let mut backout = Backout::new(first);
    for _ in 0..count {
        // SAFETY: Forwarded to caller.
        unsafe { backout.construct(|| init.make())? };
    }
    Ok(backout.release())
}

unsafe fn construct_range<C>(first: C, last: C, init: Init) -> Result<(), Failure<C::Value>>
where
    C: SlotCursor,
    C::Value: DefaultConstruct,
{
    if let Some(count) = span(&first, &last) {
        // SAFETY: Forwarded to caller.
        return unsafe { construct_n(first, count, init) }.map(|_| ());
    }

    let mut backout = Backout::new(first);
    while *backout.current() != last {
        // SAFETY: Forwarded to caller.
        unsafe { backout.construct(|| init.make())? };
    }
    backout.release();
    Ok(())
}

/// Default constructs every slot of `[first, last)`.
///
/// If construction `i` fails, slots `[0, i)` are destroyed and the failure is
/// returned with index `i`.
///
/// # Safety
/// Every slot in `[first, last)` must be uninitialized and exclusively owned by
/// the caller for the duration of the call, and `last` reachable from `first`.
/// Pointer cursors over zero sized values can't tell `first` from `last`, so
/// nothing is constructed; use [`uninitialized_default_construct_n`] for those.
pub unsafe fn uninitialized_default_construct<C>(first: C, last: C) -> Result<(), Failure<C::Value>>
where
    C: SlotCursor,
    C::Value: DefaultConstruct,
{
    // SAFETY: Forwarded to caller.
    unsafe { construct_range(first, last, Init::Default) }
}

/// Default constructs `count` slots from `first`.
///
/// Returns cursor one past the last constructed slot.
///
/// # Safety
/// There must be `count` uninitialized slots from `first`, exclusively owned by
/// the caller for the duration of the call.
pub unsafe fn uninitialized_default_construct_n<C>(
    first: C,
    count: usize,
) -> Result<C, Failure<C::Value>>
where
    C: SlotCursor,
    C::Value: DefaultConstruct,
{
    // SAFETY: Forwarded to caller.
    unsafe { construct_n(first, count, Init::Default) }
}

/// Value constructs every slot of `[first, last)`.
///
/// # Safety
/// Same as [`uninitialized_default_construct`]. Zero sized values need
/// [`uninitialized_value_construct_n`].
pub unsafe fn uninitialized_value_construct<C>(first: C, last: C) -> Result<(), Failure<C::Value>>
where
    C: SlotCursor,
    C::Value: DefaultConstruct,
{
    // SAFETY: Forwarded to caller.
    unsafe { construct_range(first, last, Init::Value) }
}

/// Value constructs `count` slots from `first`.
///
/// Returns cursor one past the last constructed slot.
///
/// # Safety
/// Same as [`uninitialized_default_construct_n`].
pub unsafe fn uninitialized_value_construct_n<C>(
    first: C,
    count: usize,
) -> Result<C, Failure<C::Value>>
where
    C: SlotCursor,
    C::Value: DefaultConstruct,
{
    // SAFETY: Forwarded to caller.
    unsafe { construct_n(first, count, Init::Value) }
}

#[cfg(all(test, feature = "probe"))]
mod tests {
    use super::*;
    use crate::core::{Chain, Cursor, Region, Strided};
    use crate::memory::{destroy, destroy_n};
    use crate::util::probe::{self, Probe, ProbeError};
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::{
        mem::MaybeUninit,
        panic::{self, AssertUnwindSafe},
    };

    fn slots<const N: usize>() -> [MaybeUninit<Probe>; N] {
        std::array::from_fn(|_| MaybeUninit::uninit())
    }

    #[test]
    fn default_construct_n_counts() {
        probe::reset();
        let mut slots = slots::<3>();
        let dst = slots.as_mut_ptr().cast::<Probe>();

        let end = unsafe { uninitialized_default_construct_n(dst, 3) }.unwrap();
        assert_eq!(dst.distance_to(&end), Some(3));
        assert_eq!(probe::counts().defaults(), 3);
        assert_eq!(probe::counts().drops(), 0);

        // SAFETY: Three are live.
        unsafe { destroy_n(dst, 3) };
        assert_eq!(probe::counts().drops(), 3);
        assert_eq!(probe::live(), 0);
    }

    #[test]
    fn value_construct_range() {
        probe::reset();
        let mut slots = slots::<4>();
        let region = Region::new(&mut slots);
        let (begin, end) = (region.begin(), region.end());

        unsafe { uninitialized_value_construct(begin, end) }.unwrap();
        assert_eq!(probe::counts().values(), 4);
        assert_eq!(probe::counts().defaults(), 0);
        // SAFETY: Four were constructed.
        assert!(unsafe { region.assume_init(4) }.iter().all(|p| p.value() == 0));

        // SAFETY: Four are live.
        unsafe { destroy(begin, end) };
        assert_eq!(probe::live(), 0);
    }

    #[test]
    fn default_construct_std_types() {
        let mut vec = Vec::<Vec<u8>>::with_capacity(3);
        let region = Region::spare(&mut vec);
        let begin = region.begin();
        let end = begin.wrapping_add(3);
        unsafe { uninitialized_default_construct(begin, end) }.unwrap();
        // SAFETY: Three were constructed.
        unsafe { vec.set_len(3) };
        assert!(vec.iter().all(Vec::is_empty));

        let mut numbers = [5u64; 4];
        let end = unsafe { uninitialized_value_construct_n(numbers.as_mut_ptr(), 4) }.unwrap();
        assert_eq!(end, numbers.as_mut_ptr().wrapping_add(4));
        assert_eq!(numbers, [0; 4]);
    }

    #[test]
    fn zero_sized_counted() {
        let mut units = [(); 3];
        let first = units.as_mut_ptr();
        let end = unsafe { uninitialized_default_construct_n(first, 3) }.unwrap();
        assert_eq!(end, first);
    }

    #[test]
    fn default_rollback() {
        probe::reset();
        let mut slots = slots::<5>();
        let dst = slots.as_mut_ptr().cast::<Probe>();

        probe::fail_on(1);
        let failure = unsafe { uninitialized_default_construct_n(dst, 5) }.unwrap_err();
        assert_eq!(failure.index(), 1);
        assert_eq!(failure.into_cause(), ProbeError::new(1));
        assert_eq!(probe::counts().defaults(), 1);
        assert_eq!(probe::counts().drops(), 1);
        assert_eq!(probe::live(), 0);
    }

    #[test]
    fn value_rollback_on_panic() {
        probe::reset();
        let mut slots = slots::<4>();
        let dst = slots.as_mut_ptr().cast::<Probe>();

        probe::panic_on(3);
        let result = panic::catch_unwind(AssertUnwindSafe(|| unsafe {
            uninitialized_value_construct_n(dst, 4)
        }));
        assert!(result.is_err());
        assert_eq!(probe::counts().values(), 3);
        assert_eq!(probe::counts().drops(), 3);
        assert_eq!(probe::live(), 0);
    }

    #[test]
    fn success_completeness() {
        let mut rng = StdRng::seed_from_u64(0xde7a);
        for _ in 0..100 {
            probe::reset();
            let n = rng.gen_range(0..32);
            let mut dest = Vec::<Probe>::with_capacity(n);
            let begin = dest.as_mut_ptr();

            let end = if rng.gen_bool(0.5) {
                unsafe { uninitialized_default_construct_n(begin, n) }
            } else {
                unsafe { uninitialized_value_construct_n(begin, n) }
            }
            .unwrap();

            assert_eq!(begin.distance_to(&end), Some(n));
            assert_eq!(probe::live(), n);
            // SAFETY: n were constructed.
            unsafe { dest.set_len(n) };
            drop(dest);
            assert_eq!(probe::live(), 0);
            assert_eq!(probe::counts().double_drops(), 0);
        }
    }

    #[test]
    fn zero_sized_range_constructs_nothing() {
        let mut units = [MaybeUninit::<()>::uninit(); 4];
        let region = Region::new(&mut units);
        unsafe { uninitialized_value_construct(region.begin(), region.end()) }.unwrap();
        let end =
            unsafe { uninitialized_value_construct_n(region.begin(), region.len()) }.unwrap();
        assert_eq!(end, region.end());
    }

    #[test]
    fn forward_only_rollback() {
        probe::reset();
        let mut slots = slots::<5>();
        // Reversed, so consecutive positions are not adjacent in memory.
        let ptrs: Vec<*mut Probe> = slots
            .iter_mut()
            .rev()
            .map(MaybeUninit::as_mut_ptr)
            .collect();
        let (first, last) = Chain::bounds(&ptrs);

        probe::fail_on(4);
        let failure =
            unsafe { uninitialized_default_construct(first.clone(), last.clone()) }.unwrap_err();
        assert_eq!(failure.index(), 4);
        assert_eq!(probe::counts().drops(), 4);
        assert_eq!(probe::counts().double_drops(), 0);
        assert_eq!(probe::live(), 0);

        probe::panic_on(probe::attempts() + 1);
        let result = panic::catch_unwind(AssertUnwindSafe(|| unsafe {
            uninitialized_value_construct(first, last)
        }));
        assert!(result.is_err());
        assert_eq!(probe::counts().drops(), 5);
        assert_eq!(probe::counts().double_drops(), 0);
        assert_eq!(probe::live(), 0);
    }

    #[test]
    fn strided_rollback() {
        probe::reset();
        let mut slots = slots::<8>();
        let first = Strided::new(slots.as_mut_ptr().cast::<Probe>(), 2);

        probe::fail_on(3);
        let failure = unsafe { uninitialized_default_construct_n(first, 4) }.unwrap_err();
        assert_eq!(failure.index(), 3);
        assert_eq!(probe::counts().drops(), 3);
        assert_eq!(probe::counts().double_drops(), 0);
        assert_eq!(probe::live(), 0);

        let mut last = first;
        last.step_by(4);
        probe::panic_on(probe::attempts() + 2);
        let result = panic::catch_unwind(AssertUnwindSafe(|| unsafe {
            uninitialized_value_construct(first, last)
        }));
        assert!(result.is_err());
        assert_eq!(probe::counts().drops(), 5);
        assert_eq!(probe::counts().double_drops(), 0);
        assert_eq!(probe::live(), 0);
    }
}
