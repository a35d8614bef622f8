//! Instrumented element type for exercising construction and rollback paths.
//!
//! Every [`Probe`] has a unique id. A thread local ledger records which ids are
//! live, how each was constructed, and how often anything was dropped. Since
//! tests run on their own threads, each test sees its own ledger.
//!
//! Probe implements [`CopyConstruct`] and [`DefaultConstruct`] directly, not
//! `Clone` and `Default`, so every construction can be made to fail on demand
//! with [`fail_on`] or [`panic_on`].

use crate::core::{CopyConstruct, DefaultConstruct};
use ahash::AHashMap;
use getset::CopyGetters;
use std::{cell::RefCell, error::Error, fmt};

thread_local! {
    static LEDGER: RefCell<Ledger> = RefCell::new(Ledger::default());
}

/// Snapshot of the ledger counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Counts {
    /// Successful copy constructions.
    copies: usize,
    /// Successful default constructions.
    defaults: usize,
    /// Successful value constructions.
    values: usize,
    /// Construction attempts that failed, by error or panic.
    failures: usize,
    /// Every drop, including invalid ones.
    drops: usize,
    /// Drops of probes that were not live.
    double_drops: usize,
}

/// Injected construction failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct ProbeError {
    /// Attempt number, counted from the last [`reset`].
    attempt: usize,
}

impl ProbeError {
    pub fn new(attempt: usize) -> Self {
        Self { attempt }
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Probe construction attempt {} failed", self.attempt)
    }
}

impl Error for ProbeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Life {
    Live,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Copy,
    Default,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fault {
    Error,
    Panic,
}

#[derive(Debug, Default)]
struct Ledger {
    next_id: u64,
    lives: AHashMap<u64, Life>,
    counts: Counts,
    attempts: usize,
    fault: Option<(usize, Fault)>,
}

impl Ledger {
    fn register(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.lives.insert(id, Life::Live);
        id
    }

    /// Counts an attempt, returns fault to raise if it is armed for this one.
    fn attempt(&mut self, kind: Kind) -> Result<u64, (usize, Fault)> {
        let attempt = self.attempts;
        self.attempts += 1;
        match self.fault {
            Some((at, fault)) if at == attempt => {
                self.fault = None;
                self.counts.failures += 1;
                Err((attempt, fault))
            }
            _ => {
                match kind {
                    Kind::Copy => self.counts.copies += 1,
                    Kind::Default => self.counts.defaults += 1,
                    Kind::Value => self.counts.values += 1,
                }
                Ok(self.register())
            }
        }
    }

    fn dropped(&mut self, id: u64) {
        self.counts.drops += 1;
        match self.lives.get_mut(&id) {
            Some(life) if *life == Life::Live => *life = Life::Dead,
            _ => self.counts.double_drops += 1,
        }
    }

    fn live(&self) -> usize {
        self.lives.values().filter(|life| **life == Life::Live).count()
    }
}

fn construct(kind: Kind, value: i64) -> Result<Probe, ProbeError> {
    let outcome = LEDGER.with(|ledger| ledger.borrow_mut().attempt(kind));
    match outcome {
        Ok(id) => Ok(Probe { id, value }),
        Err((attempt, Fault::Error)) => Err(ProbeError::new(attempt)),
        // Ledger is no longer borrowed here.
        Err((attempt, Fault::Panic)) => panic!("Probe construction attempt {} panicked", attempt),
    }
}

/// Clears the ledger of this thread.
pub fn reset() {
    LEDGER.with(|ledger| *ledger.borrow_mut() = Ledger::default());
}

/// Construction attempt `attempt`, counted from the last [`reset`], returns [`ProbeError`].
pub fn fail_on(attempt: usize) {
    LEDGER.with(|ledger| ledger.borrow_mut().fault = Some((attempt, Fault::Error)));
}

/// Construction attempt `attempt`, counted from the last [`reset`], panics.
pub fn panic_on(attempt: usize) {
    LEDGER.with(|ledger| ledger.borrow_mut().fault = Some((attempt, Fault::Panic)));
}

/// Construction attempts since the last [`reset`], for arming [`fail_on`] relative to now.
pub fn attempts() -> usize {
    LEDGER.with(|ledger| ledger.borrow().attempts)
}

pub fn counts() -> Counts {
    LEDGER.with(|ledger| ledger.borrow().counts)
}

/// Number of live probes.
pub fn live() -> usize {
    LEDGER.with(|ledger| ledger.borrow().live())
}

/// Instrumented value.
///
/// Equality compares values, not identity.
#[derive(Debug)]
pub struct Probe {
    id: u64,
    value: i64,
}

impl Probe {
    /// New live probe. Not counted as a construction attempt.
    pub fn new(value: i64) -> Self {
        let id = LEDGER.with(|ledger| ledger.borrow_mut().register());
        Self { id, value }
    }

    /// Unique per constructed probe, preserved by moves.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}

impl CopyConstruct for Probe {
    type Error = ProbeError;

    fn copy_construct(&self) -> Result<Self, ProbeError> {
        construct(Kind::Copy, self.value)
    }
}

impl DefaultConstruct for Probe {
    type Error = ProbeError;

    fn default_construct() -> Result<Self, ProbeError> {
        construct(Kind::Default, 0)
    }

    fn value_construct() -> Result<Self, ProbeError> {
        construct(Kind::Value, 0)
    }
}

impl PartialEq for Probe {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for Probe {
    fn drop(&mut self) {
        // Thread may be tearing down its locals.
        let _ = LEDGER.try_with(|ledger| ledger.borrow_mut().dropped(self.id));
    }
}
