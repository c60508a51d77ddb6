use std::{fs, path::Path};

use anyhow::Context;
use libca::{Automaton, BigUint, CellState, IterationLimit};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// The rule to run. When absent a random rule is generated and its number logged.
    ///
    /// Numbers past 64 bits have to be given as decimal strings.
    #[serde(with = "libca::decimal::option")]
    pub rule_number: Option<BigUint>,

    /// Width of the neighborhood a cell's next state depends on, must be odd.
    pub neighborhood: u32,

    /// Number of cells in the ring.
    pub size: usize,

    pub seed: Seed,

    /// Generations to print. Absent means half the ring size, zero or negative means forever.
    pub iteration_limit: Option<i64>,

    /// Seed of the random source used for random rules and cells, generated when absent.
    pub rng_seed: Option<u64>,

    pub alive_symbol: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rule_number: None,
            neighborhood: 3,
            size: 256,
            seed: Seed::default(),
            iteration_limit: None,
            rng_seed: None,
            alive_symbol: CellState::ALIVE_SYMBOL,
        }
    }
}

impl Config {
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let config_serialized = fs::read(path).context("Couldn't read config")?;
        let config =
            serde_json::from_slice(&config_serialized).context("Couldn't deserialize config")?;
        Ok(config)
    }

    pub fn iteration_limit(&self, automaton: &Automaton) -> IterationLimit {
        self.iteration_limit.map_or_else(
            || automaton.default_iteration_limit(),
            IterationLimit::from_signed,
        )
    }
}

/// The initial generation of the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Seed {
    Zeroes,

    /// A single live cell in the middle of the ring.
    #[default]
    Middle,

    /// A single live cell at the given index.
    Position(usize),

    Random,
}

impl Seed {
    pub fn apply<R>(self, automaton: &mut Automaton, rng: &mut R) -> libca::Result<()>
    where
        R: Rng + ?Sized,
    {
        match self {
            Seed::Zeroes => automaton.init_zeroes(),
            Seed::Middle => automaton.init_single(None)?,
            Seed::Position(pos) => automaton.init_single(Some(pos))?,
            Seed::Random => automaton.randomize(rng),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.neighborhood, 3);
        assert_eq!(config.size, 256);
        assert_eq!(config.seed, Seed::Middle);
    }

    #[test]
    fn test_partial_config() {
        let config: Config = serde_json::from_str(
            r#"{
                "rule_number": 60,
                "size": 255,
                "seed": { "position": 0 },
                "iteration_limit": 127,
                "alive_symbol": "*"
            }"#,
        )
        .unwrap();

        assert_eq!(config.rule_number, Some(BigUint::from(60u32)));
        assert_eq!(config.size, 255);
        assert_eq!(config.seed, Seed::Position(0));
        assert_eq!(config.alive_symbol, '*');
        assert_eq!(config.rng_seed, None);

        let automaton = Automaton::new(config.size).unwrap();
        assert_eq!(
            config.iteration_limit(&automaton),
            IterationLimit::Generations(127)
        );
    }

    #[test]
    fn test_iteration_limit() {
        let automaton = Automaton::new(100).unwrap();

        let default = Config::default();
        assert_eq!(
            default.iteration_limit(&automaton),
            IterationLimit::Generations(50)
        );

        let forever = Config {
            iteration_limit: Some(-1),
            ..Config::default()
        };
        assert_eq!(forever.iteration_limit(&automaton), IterationLimit::Unbounded);
    }

    #[test]
    fn test_unknown_seed_is_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{ "seed": "everywhere" }"#).is_err());
        assert!(serde_json::from_str::<Config>(r#"{ "rule_number": -1 }"#).is_err());
        assert!(serde_json::from_str::<Config>(r#"{ "rule_number": "sixty" }"#).is_err());
    }

    #[test]
    fn test_wide_rule_number() {
        let config: Config = serde_json::from_str(
            r#"{ "rule_number": "340282366920938463463374607431768211456", "neighborhood": 9 }"#,
        )
        .unwrap();

        assert_eq!(config.rule_number, Some(BigUint::from(1u32) << 128u32));
        assert_eq!(config.neighborhood, 9);
    }

    #[test]
    fn test_seed_apply() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut automaton = Automaton::new(8).unwrap();

        Seed::Position(2).apply(&mut automaton, &mut rng).unwrap();
        assert_eq!(automaton.to_string(), "  #     ");

        Seed::Middle.apply(&mut automaton, &mut rng).unwrap();
        assert_eq!(automaton.to_string(), "    #   ");

        Seed::Zeroes.apply(&mut automaton, &mut rng).unwrap();
        assert_eq!(automaton.to_string(), "        ");

        assert!(Seed::Position(8).apply(&mut automaton, &mut rng).is_err());
    }
}
