//! Identity generation for children added without an id.
//!
//! Generated identities look like `<content type>#<n>`. Uniqueness is not
//! checked; a collision replaces the existing child (see `OrderedChildren`).

use uuid::Uuid;

/// Default exclusive upper bound for generated suffixes.
pub const DEFAULT_ID_RANGE: u32 = 100;

/// Strategy producing identities for anonymous children.
pub trait IdGenerator {
    fn generate(&mut self, prefix: &str) -> String;
}

/// Random suffix in `[0, range)`, drawn from v4 UUID randomness.
#[derive(Debug, Clone, Copy)]
pub struct RandomIdGenerator {
    range: u32,
}

impl RandomIdGenerator {
    /// A `range` of 0 is treated as 1.
    pub fn new(range: u32) -> Self {
        Self {
            range: range.max(1),
        }
    }

    pub fn range(&self) -> u32 {
        self.range
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_RANGE)
    }
}

impl IdGenerator for RandomIdGenerator {
    fn generate(&mut self, prefix: &str) -> String {
        let n = Uuid::new_v4().as_u128() % u128::from(self.range);
        format!("{prefix}#{n}")
    }
}

/// Deterministic counter: `<prefix>#0`, `<prefix>#1`, ...
///
/// The counter is shared across prefixes.
#[derive(Debug, Clone, Default)]
pub struct SequentialIdGenerator {
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}#{}", self.next);
        self.next += 1;
        id
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn generate(&mut self, prefix: &str) -> String {
        (**self).generate(prefix)
    }
}
