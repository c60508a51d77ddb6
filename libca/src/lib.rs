//! One-dimensional cellular automata on a ring of binary cells.
//!
//! A [`Rule`] is derived from a rule number and an odd neighborhood width, and an
//! [`Automaton`] advances its ring one generation at a time under such a rule.

pub use num_bigint::BigUint;

pub use automaton::{Automaton, CellState, IterationLimit};
pub use bits::binary;
pub use error::{InvalidArgument, Result};
pub use rule::{MAX_NEIGHBORHOOD, Rule};

pub mod automaton;
pub mod bits;
pub mod decimal;
pub mod error;
pub mod rule;
