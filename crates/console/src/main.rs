//! chess-console
//!
//! `play` speaks a line protocol on stdin/stdout; `selfplay` runs seeded
//! random games and prints one summary line per game. Logs go to stderr.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chess_console::{SelfPlayConfig, Session, run_selfplay};
use chess_rules::{Game, RulesConfig};
use clap::{arg, command, value_parser, ArgMatches, Command};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let matches = command!()
        .propagate_version(true)
        .arg(arg!(-v --verbose "Log rule decisions at debug level").global(true))
        .arg(
            arg!(-c --config <PATH> "Rules config (TOML)")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(Command::new("play").about("Play a game over the stdin line protocol"))
        .subcommand(
            Command::new("selfplay")
                .about("Play random games against itself")
                .arg(
                    arg!(-g --games <N> "Number of games")
                        .default_value("1")
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    arg!(-s --seed <S> "Seed for the first game")
                        .default_value("0")
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    arg!(-m --"max-plies" <P> "Plies per game before stopping")
                        .default_value("200")
                        .value_parser(value_parser!(u32)),
                ),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));
    let rules = load_rules(&matches)?;

    match matches.subcommand() {
        Some(("selfplay", sub)) => selfplay(sub, rules),
        Some(("play", _)) | None => play(rules),
        Some((other, _)) => unreachable!("unhandled subcommand {other}"),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_rules(matches: &ArgMatches) -> Result<RulesConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            let rules = RulesConfig::load(path)
                .with_context(|| format!("failed to load rules from {}", path.display()))?;
            info!(path = %path.display(), "rules loaded");
            Ok(rules)
        }
        None => Ok(RulesConfig::default()),
    }
}

fn play(rules: RulesConfig) -> Result<()> {
    let mut session = Session::new(Game::with_config(rules));
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    session.run(stdin.lock(), &mut stdout)
}

fn selfplay(matches: &ArgMatches, rules: RulesConfig) -> Result<()> {
    let defaults = SelfPlayConfig::default();
    let config = SelfPlayConfig {
        num_games: matches.get_one::<u32>("games").copied().unwrap_or(defaults.num_games),
        seed: matches.get_one::<u64>("seed").copied().unwrap_or(defaults.seed),
        max_plies: matches
            .get_one::<u32>("max-plies")
            .copied()
            .unwrap_or(defaults.max_plies),
        rules,
    };

    for (n, summary) in run_selfplay(&config).iter().enumerate() {
        println!("game {}: {summary}", n + 1);
    }
    Ok(())
}
