use std::fmt;

use rand::Rng;

use crate::{
    error::{InvalidArgument, Result},
    rule::Rule,
};

/// A finite ring of binary cells.
///
/// Index arithmetic wraps modulo the ring size, so the first and the last cell are neighbors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    cells: Vec<CellState>,
}

impl Automaton {
    /// Creates a ring of `size` dead cells.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(InvalidArgument::EmptyRing);
        }

        Ok(Self {
            cells: vec![CellState::default(); size],
        })
    }

    pub fn with_cells(cells: Vec<CellState>) -> Result<Self> {
        if cells.is_empty() {
            return Err(InvalidArgument::EmptyRing);
        }

        Ok(Self { cells })
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<CellState> {
        self.cells.get(index).copied()
    }

    /// Changes the ring size. Every cell is reset to dead, the previous content is discarded.
    pub fn resize(&mut self, size: usize) -> Result<()> {
        *self = Self::new(size)?;
        Ok(())
    }

    pub fn init_zeroes(&mut self) {
        self.cells.fill(CellState::Dead);
    }

    /// Kills every cell except the one at `pos`, which defaults to the middle of the ring.
    pub fn init_single(&mut self, pos: Option<usize>) -> Result<()> {
        let size = self.size();
        let pos = pos.unwrap_or(size / 2);

        if pos >= size {
            return Err(InvalidArgument::SeedOutOfBounds { pos, size });
        }

        self.init_zeroes();
        self.cells[pos] = CellState::Alive;

        Ok(())
    }

    pub fn randomize<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        for cell in &mut self.cells {
            *cell = CellState::from(rng.random::<bool>());
        }
    }

    /// The `2 * margin + 1` cells centered on `index`, leftmost first, wrapping around the ring.
    pub fn neighborhood(&self, index: usize, margin: u32) -> Vec<CellState> {
        let size = self.size() as isize;
        let margin = margin as isize;
        let center = index as isize;

        (center - margin..=center + margin)
            .map(|rel_index| self.cells[rel_index.rem_euclid(size) as usize])
            .collect()
    }

    /// Replaces every cell with its next generation under `rule`.
    ///
    /// All neighborhoods are read from the current generation before anything is written.
    pub fn advance_generation(&mut self, rule: &Rule) -> Result<()> {
        let next_cells = (0..self.size())
            .map(|index| rule.get_next_cell(&self.neighborhood(index, rule.margin())))
            .collect::<Result<Vec<_>>>()?;

        self.cells = next_cells;
        Ok(())
    }

    /// Half the ring size. A ring of a single cell therefore runs unbounded.
    pub fn default_iteration_limit(&self) -> IterationLimit {
        IterationLimit::from_signed((self.size() / 2) as i64)
    }

    /// Hands the current generation to `emit`, then advances, until `limit` advances were made.
    ///
    /// With [`IterationLimit::Unbounded`] this only returns once `emit` or a step fails.
    pub fn run<F, E>(
        &mut self,
        rule: &Rule,
        limit: IterationLimit,
        mut emit: F,
    ) -> std::result::Result<(), E>
    where
        F: FnMut(&Self) -> std::result::Result<(), E>,
        E: From<InvalidArgument>,
    {
        let mut iteration = 0;

        while !limit.reached(iteration) {
            emit(self)?;
            self.advance_generation(rule)?;

            iteration += 1;
        }

        Ok(())
    }

    /// Renders dead cells as spaces and live cells as `alive_symbol`.
    pub fn render(&self, alive_symbol: char) -> String {
        self.cells
            .iter()
            .map(|cell| match cell {
                CellState::Alive => alive_symbol,
                CellState::Dead => ' ',
            })
            .collect()
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(CellState::ALIVE_SYMBOL))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    Alive,

    #[default]
    Dead,
}

impl CellState {
    pub const ALIVE_SYMBOL: char = '#';

    /// Any nonzero digit is alive.
    pub fn from_digit(digit: u8) -> Self {
        Self::from(digit != 0)
    }

    pub fn digit(self) -> u8 {
        match self {
            CellState::Alive => 1,
            CellState::Dead => 0,
        }
    }

    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

/// How many generations [`Automaton::run`] advances before stopping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationLimit {
    Generations(usize),

    /// Never stops on its own; has to be interrupted by the operator.
    Unbounded,
}

impl IterationLimit {
    /// Non-positive limits mean running indefinitely.
    pub fn from_signed(limit: i64) -> Self {
        match usize::try_from(limit) {
            Ok(0) | Err(_) => IterationLimit::Unbounded,
            Ok(limit) => IterationLimit::Generations(limit),
        }
    }

    pub fn reached(&self, iteration: usize) -> bool {
        match self {
            IterationLimit::Generations(limit) => iteration >= *limit,
            IterationLimit::Unbounded => false,
        }
    }
}
