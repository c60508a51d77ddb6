use num_bigint::BigUint;
use thiserror::Error;

/// A violated precondition of one of the automaton operations.
///
/// None of these are transient: the operation that reported it did not
/// proceed and retrying with the same arguments fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    #[error("rule number {number} needs more than {patterns} binary digits (n={n})")]
    RuleNumberOutOfRange {
        number: BigUint,
        n: u32,
        patterns: u64,
    },

    #[error("neighborhood size {0} must be odd")]
    EvenNeighborhood(u32),

    #[error("neighborhood size {n} needs a table wider than the supported maximum of n={max}")]
    UnsupportedNeighborhood { n: u32, max: u32 },

    #[error("ring size must be positive")]
    EmptyRing,

    #[error("seed position {pos} is outside of a ring of {size} cells")]
    SeedOutOfBounds { pos: usize, size: usize },

    #[error("neighborhood has {got} cells, rule expects {expected}")]
    NeighborhoodLength { expected: usize, got: usize },

    #[error("{number} can't be written with {digits} binary digits")]
    BinaryOutOfRange { number: BigUint, digits: u64 },
}

pub type Result<T> = std::result::Result<T, InvalidArgument>;
