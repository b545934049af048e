//! A terminal volleyball scoreboard.
//!
//! Reads one scorer command per line, applies it to the saved match and
//! prints the board. The match, its format and the finished-match history
//! live as JSON files in the data directory.

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Error};
use ctrlc::set_handler;
use log::{debug, info};
use pico_args::Arguments;
use volley_score::{
    MatchEvent, Side,
    session::Scoreboard,
    storage::{FileStore, KeyValueStore},
};
use vs_cli::{
    commands::{CliCommand, parse_command},
    config::{CliConfig, Overrides},
};

const HELP: &str = "\
Keep score of a volleyball match in the terminal

USAGE:
  vs_cli [OPTIONS]

OPTIONS:
  --data-dir   DIR         Where the match and history are saved  [default: env VS_DATA_DIR or ./volley_data]
  --sets       2|3         Sets to win for a new match            [default: env VS_SETS_TO_WIN or 3]
  --timeout    SECONDS     Length of a timeout                    [default: env VS_TIMEOUT_SECS or 30]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  RUST_LOG                 Log level (e.g., info, debug)
  (A .env file in the working directory is read first)
";

const COMMANDS: &str = "\
  a | b                    Point to team A or B
  -a | -b                  Take a point back from team A or B
  swap                     Swap sides
  timeout a|b              Call a timeout
  cancel                   End the running timeout early
  name a|b NAME            Rename a team
  color a|b COLOR          Change a team's color
  format 2|3               Play best of 3 or best of 5
  reset [keep|scores]      New match (keep team names), or clear the current set's scores
  rotation a|b N N N N N N Set a team's rotation, server first
  clock [reset]            Start/pause the match clock, or reset it
  tick SECONDS             Advance the clock and timeout by hand
  status                   Show the board
  history                  List finished matches
  history delete ID        Remove a finished match
  history clear            Remove all finished matches
  help                     Show this list
  quit                     Leave (the match is saved)
";

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = Overrides {
        data_dir: pargs.opt_value_from_str("--data-dir")?,
        sets_to_win: pargs.opt_value_from_str("--sets")?,
        timeout_secs: pargs.opt_value_from_str("--timeout")?,
    };
    let config = CliConfig::from_env(overrides)?;

    // Catching signals for exit. Every command is saved as it is applied.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();
    info!("Using data directory {}", config.data_dir.display());

    let store = FileStore::open(&config.data_dir).with_context(|| {
        format!(
            "Failed to open data directory {}",
            config.data_dir.display()
        )
    })?;
    let board = Scoreboard::open(store, config.scoreboard);

    run(board)
}

fn run<S: KeyValueStore>(mut board: Scoreboard<S>) -> Result<(), Error> {
    print_board(&board);
    println!("Type 'help' to see available commands");

    let stdin = io::stdin();
    let mut last_tick = Instant::now();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        // The clock follows wall time between commands.
        let elapsed = last_tick.elapsed().as_secs();
        if elapsed > 0 {
            last_tick += Duration::from_secs(elapsed);
            tick(&mut board, u32::try_from(elapsed).unwrap_or(u32::MAX));
        }

        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        debug!("parsed {command:?}");

        match command {
            CliCommand::Match(command) => match board.handle(command) {
                Ok(events) => {
                    for event in &events {
                        print_event(event);
                    }
                    print_board(&board);
                }
                Err(err) => println!("Rejected: {err}"),
            },
            CliCommand::ToggleClock => {
                board.toggle_clock();
                let status = if board.clock().is_running() {
                    "running"
                } else {
                    "paused"
                };
                println!("Clock {status} at {}", board.clock());
            }
            CliCommand::ResetClock => {
                board.reset_clock();
                println!("Clock reset");
            }
            CliCommand::Tick(seconds) => {
                tick(&mut board, seconds);
                print_board(&board);
            }
            CliCommand::CancelTimeout => {
                board.cancel_timeout();
                print_board(&board);
            }
            CliCommand::Status => print_board(&board),
            CliCommand::History => match board.history() {
                Ok(history) if history.is_empty() => println!("No finished matches"),
                Ok(history) => {
                    for record in history.iter() {
                        println!("  {record}");
                    }
                }
                Err(err) => println!("Could not read history: {err}"),
            },
            CliCommand::DeleteMatch(id) => match board.delete_match(id) {
                Ok(record) => println!("Deleted {record}"),
                Err(err) => println!("Could not delete match: {err}"),
            },
            CliCommand::ClearHistory => match board.clear_history() {
                Ok(()) => println!("History cleared"),
                Err(err) => println!("Could not clear history: {err}"),
            },
            CliCommand::Help => print!("{COMMANDS}"),
            CliCommand::Quit => break,
        }
    }

    info!("Leaving with match saved: {}", board.state());
    Ok(())
}

fn tick<S: KeyValueStore>(board: &mut Scoreboard<S>, seconds: u32) {
    if let Some(team) = board.tick(seconds) {
        println!("Timeout over for {team}");
    }
}

fn print_event(event: &MatchEvent) {
    match event {
        MatchEvent::MatchCompleted { .. } => println!("*** {event} ***"),
        _ => println!("-- {event}"),
    }
}

fn print_board<S: KeyValueStore>(board: &Scoreboard<S>) {
    let state = board.state();
    println!();
    println!("  {state}   [{}]  {}", board.clock(), state.phase());
    for side in [Side::A, Side::B] {
        println!(
            "  {:<15} {:<8} rotation {}  timeouts {}",
            state.team_name(side).as_str(),
            state.team_color(side),
            state.rotation(side),
            state.timeouts_remaining(side),
        );
    }
    if !state.set_history.is_empty() {
        let sets = state
            .set_history
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!("  sets: {sets}");
    }
    if board.countdown().is_active() {
        let team = board.timeout_team().map_or("", |team| team.as_str());
        println!("  TIMEOUT {team}: {}s", board.countdown().remaining());
    }
    println!();
}
