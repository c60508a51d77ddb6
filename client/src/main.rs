use std::{
    env,
    io::{self, Write},
};

use anyhow::Context;
use config::Config;
use libca::{Automaton, IterationLimit, Rule};
use log::{LevelFilter, info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};
use simple_logger::SimpleLogger;

mod cli;
mod config;

pub struct State {
    automaton: Automaton,
    rule: Rule,
    rng: StdRng,
    alive_symbol: char,
}

impl State {
    fn new(config: &Config) -> anyhow::Result<Self> {
        let rng_seed = config.rng_seed.unwrap_or_else(|| rand::rng().random());
        info!("Seeding random source with {rng_seed}");
        let mut rng = StdRng::seed_from_u64(rng_seed);

        let rule = Rule::new_or_random(config.rule_number.clone(), config.neighborhood, &mut rng)
            .context("Couldn't create rule")?;

        let mut automaton = Automaton::new(config.size).context("Couldn't create automaton")?;
        config
            .seed
            .apply(&mut automaton, &mut rng)
            .context("Couldn't seed automaton")?;

        Ok(Self {
            automaton,
            rule,
            rng,
            alive_symbol: config.alive_symbol,
        })
    }

    /// Writes one line per generation while advancing the automaton.
    fn run<W>(&mut self, limit: IterationLimit, out: &mut W) -> anyhow::Result<()>
    where
        W: Write,
    {
        if limit == IterationLimit::Unbounded {
            warn!("No iteration limit, running until interrupted");
        }

        let alive_symbol = self.alive_symbol;
        self.automaton.run(&self.rule, limit, |automaton| {
            writeln!(out, "{}", automaton.render(alive_symbol)).context("Couldn't write generation")
        })
    }
}

fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()
        .context("Couldn't initialize logger")?;

    let mut args = env::args().skip(1);

    let config = match args.next().filter(|config_path| config_path != "-") {
        Some(config_path) => Config::load(config_path)?,
        None => Config::default(),
    };

    let interactive = args.next().is_some_and(|mode| mode == "interactive");

    let mut state = State::new(&config)?;

    if interactive {
        cli::run_cli(&mut state)
    } else {
        let limit = config.iteration_limit(&state.automaton);
        state.run(limit, &mut io::stdout().lock())
    }
}
