use std::{
    io::{self, Write},
    ops::ControlFlow,
};

use anyhow::{Context, bail};
use colored::Colorize;
use libca::{BigUint, IterationLimit, Rule};
use strum::EnumString;

use crate::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "snake_case")]
enum Command {
    Print,
    Step,
    Run,
    Clear,
    Single,
    Random,
    Resize,
    Rule,
    Show,
    Exit,
}

pub fn run_cli(state: &mut State) -> anyhow::Result<()> {
    let stdout = io::stdout();

    for line_res in io::stdin().lines() {
        let line = line_res.context("Couldn't read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let mut out = stdout.lock();
        match handle_cmd(state, line.split_whitespace(), &mut out) {
            Ok(ControlFlow::Continue(())) => writeln!(out, "{}", "OK".green())?,
            Ok(ControlFlow::Break(())) => break,
            Err(e) => eprintln!("{} {e:#}", "!".red()),
        }
    }

    Ok(())
}

fn handle_cmd<'a, I, W>(
    state: &mut State,
    mut args: I,
    out: &mut W,
) -> anyhow::Result<ControlFlow<()>>
where
    I: Iterator<Item = &'a str>,
    W: Write,
{
    let Ok(command) = args.next().context("No command")?.parse::<Command>() else {
        bail!("Unknown command");
    };

    match command {
        Command::Print => {
            writeln!(out, "{}", state.automaton.render(state.alive_symbol))?;
        }

        Command::Step => {
            let times = args.next().unwrap_or("1").parse::<usize>()?;

            for _ in 0..times {
                state.automaton.advance_generation(&state.rule)?;
                writeln!(out, "{}", state.automaton.render(state.alive_symbol))?;
            }
        }

        Command::Run => {
            let limit = match args.next() {
                Some(limit) => IterationLimit::from_signed(limit.parse::<i64>()?),
                None => state.automaton.default_iteration_limit(),
            };

            state.run(limit, out)?;
        }

        Command::Clear => {
            state.automaton.init_zeroes();
        }

        Command::Single => {
            let pos = args.next().map(str::parse::<usize>).transpose()?;

            state.automaton.init_single(pos)?;
        }

        Command::Random => {
            state.automaton.randomize(&mut state.rng);
        }

        Command::Resize => {
            let size = args.next().context("missing size")?.parse::<usize>()?;

            state.automaton.resize(size)?;
        }

        Command::Rule => {
            let number = args
                .next()
                .filter(|number| *number != "-")
                .map(str::parse::<BigUint>)
                .transpose()
                .context("invalid rule number")?;

            let n = args
                .next()
                .map(str::parse::<u32>)
                .transpose()
                .context("invalid neighborhood size")?
                .unwrap_or(state.rule.n());

            state.rule = Rule::new_or_random(number, n, &mut state.rng)?;
            writeln!(out, "{}", state.rule)?;
        }

        Command::Show => {
            writeln!(out, "{}", state.rule)?;
        }

        Command::Exit => {
            return Ok(ControlFlow::Break(()));
        }
    }

    Ok(ControlFlow::Continue(()))
}
