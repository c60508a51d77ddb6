use std::fmt;

use itertools::Itertools;
use log::info;
use num_bigint::BigUint;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    automaton::CellState,
    bits::{binary, pattern_cells, pattern_index},
    error::{InvalidArgument, Result},
};

/// Widest neighborhood whose lookup table is built: `2^25` one-byte entries, 32 MiB.
///
/// Rule numbers themselves are unbounded, this only caps the memory of the table.
pub const MAX_NEIGHBORHOOD: u32 = 25;

/// An elementary update rule: the next state of a cell for every possible neighborhood.
///
/// The rule number, written as `2^n` binary digits (most significant first), lists the
/// outputs for the neighborhood patterns `0, 1, ..., 2^n - 1` in that order. Pattern `i`
/// is itself read as `n` binary digits, leftmost cell first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RuleDef", into = "RuleDef")]
pub struct Rule {
    number: BigUint,
    n: u32,

    /// Indexed by the numeric value of the pattern.
    outputs: Vec<CellState>,
}

impl Rule {
    pub fn new(number: u128, n: u32) -> Result<Self> {
        Self::with_number(BigUint::from(number), n)
    }

    /// Builds a rule from a number of any width, as needed for `n > 7`.
    pub fn with_number(number: BigUint, n: u32) -> Result<Self> {
        let patterns = pattern_count(n)?;

        let outputs = match binary(&number, patterns) {
            Ok(digits) => digits.into_iter().map(CellState::from_digit).collect_vec(),
            Err(_) => {
                return Err(InvalidArgument::RuleNumberOutOfRange {
                    number,
                    n,
                    patterns,
                });
            }
        };

        Ok(Self { number, n, outputs })
    }

    /// Picks a rule number uniformly out of every number valid for `n`.
    pub fn random<R>(n: u32, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        let patterns = pattern_count(n)?;

        // 2^n random bits. Below 8 bits the single byte is masked down.
        let mut bytes = vec![0u8; patterns.div_ceil(8) as usize];
        rng.fill_bytes(&mut bytes);
        if patterns < 8 {
            bytes[0] &= (1u8 << patterns) - 1;
        }

        Self::with_number(BigUint::from_bytes_le(&bytes), n)
    }

    /// Uses `number` when given, otherwise generates and reports a random rule.
    pub fn new_or_random<R>(number: Option<BigUint>, n: u32, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        match number {
            Some(number) => Self::with_number(number, n),
            None => {
                let rule = Self::random(n, rng)?;
                info!("Randomly generated rule #{} (n={})", rule.number, rule.n);
                Ok(rule)
            }
        }
    }

    pub fn number(&self) -> &BigUint {
        &self.number
    }

    pub fn n(&self) -> u32 {
        self.n
    }

    /// Cells on each side of the center that take part in a neighborhood.
    pub fn margin(&self) -> u32 {
        self.n / 2
    }

    pub fn pattern_count(&self) -> usize {
        self.outputs.len()
    }

    /// Every pattern with its output, in enumeration order.
    pub fn mapping(&self) -> impl Iterator<Item = (Vec<CellState>, CellState)> + '_ {
        self.outputs
            .iter()
            .enumerate()
            .map(|(pattern, output)| (pattern_cells(pattern, self.n), *output))
    }

    pub fn get_next_cell(&self, neighborhood: &[CellState]) -> Result<CellState> {
        if neighborhood.len() != self.n as usize {
            return Err(InvalidArgument::NeighborhoodLength {
                expected: self.n as usize,
                got: neighborhood.len(),
            });
        }

        // A pattern of n cells always indexes into the 2^n entries.
        Ok(self.outputs[pattern_index(neighborhood)])
    }
}

fn pattern_count(n: u32) -> Result<u64> {
    if n % 2 == 0 {
        return Err(InvalidArgument::EvenNeighborhood(n));
    }

    if n > MAX_NEIGHBORHOOD {
        return Err(InvalidArgument::UnsupportedNeighborhood {
            n,
            max: MAX_NEIGHBORHOOD,
        });
    }

    Ok(1 << n)
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule #{} (n={})", self.number, self.n)?;

        for (pattern, output) in self.mapping() {
            let pattern_digits = pattern.iter().map(|cell| cell.digit()).join("");
            write!(f, "\n    {}: {}", pattern_digits, output.digit())?;
        }

        Ok(())
    }
}

/// The serialized form of a rule. The mapping is always rederived on load.
#[derive(Serialize, Deserialize)]
struct RuleDef {
    #[serde(with = "crate::decimal")]
    number: BigUint,
    n: u32,
}

impl TryFrom<RuleDef> for Rule {
    type Error = InvalidArgument;

    fn try_from(value: RuleDef) -> Result<Self> {
        Rule::with_number(value.number, value.n)
    }
}

impl From<Rule> for RuleDef {
    fn from(value: Rule) -> Self {
        Self {
            number: value.number,
            n: value.n,
        }
    }
}
