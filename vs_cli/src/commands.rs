use std::fmt;

use volley_score::{
    Command, Side,
    game::engine::{
        ResetMatch, ResetScores, SetMatchFormat, SetRotation, SetTeamColor, SetTeamName, SwapSides,
    },
    history::MatchId,
};

/// A line of scorer input: either a match command for the engine or an
/// action on the scoreboard around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Match(Command),
    /// Start or pause the match clock.
    ToggleClock,
    ResetClock,
    /// Advance clock and timeout countdown.
    Tick(u32),
    CancelTimeout,
    Status,
    History,
    DeleteMatch(MatchId),
    ClearHistory,
    Help,
    Quit,
}

impl From<Command> for CliCommand {
    fn from(command: Command) -> Self {
        Self::Match(command)
    }
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Side was not `a` or `b`.
    InvalidSide(String),
    /// Argument was not a valid number.
    InvalidNumber(String),
    /// Command given with missing or extra arguments.
    Usage(&'static str),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSide(value) => {
                write!(f, "Invalid side '{value}'. Use 'a' or 'b'")
            }
            Self::InvalidNumber(value) => {
                write!(f, "Invalid number '{value}'. Must be a whole positive number")
            }
            Self::Usage(usage) => write!(f, "Usage: {usage}"),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{cmd}'. Type 'help' to see available commands"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a line of input into a [`CliCommand`].
///
/// # Examples
///
/// ```
/// use vs_cli::commands::{CliCommand, parse_command};
/// use volley_score::{Command, Side};
///
/// assert_eq!(parse_command("a"), Ok(Command::add_point(Side::A).into()));
/// assert_eq!(parse_command("-b"), Ok(Command::remove_point(Side::B).into()));
/// assert_eq!(parse_command("tick 5"), Ok(CliCommand::Tick(5)));
/// ```
pub fn parse_command(input: &str) -> Result<CliCommand, ParseError> {
    let trimmed = input.trim();

    match trimmed.to_ascii_lowercase().as_str() {
        "a" => return Ok(Command::add_point(Side::A).into()),
        "b" => return Ok(Command::add_point(Side::B).into()),
        "-a" => return Ok(Command::remove_point(Side::A).into()),
        "-b" => return Ok(Command::remove_point(Side::B).into()),
        "swap" => return Ok(Command::from(SwapSides).into()),
        "clock" => return Ok(CliCommand::ToggleClock),
        "clock reset" => return Ok(CliCommand::ResetClock),
        "cancel" => return Ok(CliCommand::CancelTimeout),
        "status" => return Ok(CliCommand::Status),
        "history" => return Ok(CliCommand::History),
        "history clear" => return Ok(CliCommand::ClearHistory),
        "help" | "?" => return Ok(CliCommand::Help),
        "quit" | "exit" => return Ok(CliCommand::Quit),
        _ => {}
    }

    let parts: Vec<&str> = trimmed.split_ascii_whitespace().collect();
    match parts.first().map(|cmd| cmd.to_ascii_lowercase()).as_deref() {
        Some("timeout") => parse_timeout_command(&parts),
        Some("name") => parse_name_command(&parts),
        Some("color") => parse_color_command(&parts),
        Some("format") => parse_format_command(&parts),
        Some("reset") => parse_reset_command(&parts),
        Some("rotation") => parse_rotation_command(&parts),
        Some("tick") => parse_tick_command(&parts),
        Some("history") => parse_history_command(&parts),
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

fn parse_side(value: &str) -> Result<Side, ParseError> {
    match value.to_ascii_lowercase().as_str() {
        "a" => Ok(Side::A),
        "b" => Ok(Side::B),
        _ => Err(ParseError::InvalidSide(value.to_string())),
    }
}

fn parse_number<T: std::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value
        .parse()
        .map_err(|_| ParseError::InvalidNumber(value.to_string()))
}

/// Parse a timeout command: "timeout a|b"
fn parse_timeout_command(parts: &[&str]) -> Result<CliCommand, ParseError> {
    match parts {
        [_, side] => Ok(Command::request_timeout(parse_side(side)?).into()),
        _ => Err(ParseError::Usage("timeout a|b")),
    }
}

/// Parse a name command: "name a|b NAME..."
fn parse_name_command(parts: &[&str]) -> Result<CliCommand, ParseError> {
    match parts {
        [_, side, name @ ..] if !name.is_empty() => Ok(Command::from(SetTeamName {
            side: parse_side(side)?,
            name: name.join(" "),
        })
        .into()),
        _ => Err(ParseError::Usage("name a|b NAME")),
    }
}

/// Parse a color command: "color a|b COLOR"
fn parse_color_command(parts: &[&str]) -> Result<CliCommand, ParseError> {
    match parts {
        [_, side, color] => Ok(Command::from(SetTeamColor {
            side: parse_side(side)?,
            color: (*color).to_string(),
        })
        .into()),
        _ => Err(ParseError::Usage("color a|b COLOR")),
    }
}

/// Parse a format command: "format 2|3"
fn parse_format_command(parts: &[&str]) -> Result<CliCommand, ParseError> {
    match parts {
        [_, sets] => Ok(Command::from(SetMatchFormat {
            sets_to_win: parse_number(sets)?,
        })
        .into()),
        _ => Err(ParseError::Usage("format 2|3")),
    }
}

/// Parse a reset command: "reset [keep|scores]"
fn parse_reset_command(parts: &[&str]) -> Result<CliCommand, ParseError> {
    let reset_match = |keep_names: bool| -> CliCommand {
        Command::from(ResetMatch {
            sets_to_win: None,
            keep_names,
        })
        .into()
    };
    match parts.get(1).map(|arg| arg.to_ascii_lowercase()).as_deref() {
        _ if parts.len() > 2 => Err(ParseError::Usage("reset [keep|scores]")),
        None => Ok(reset_match(false)),
        Some("keep") => Ok(reset_match(true)),
        Some("scores") => Ok(Command::from(ResetScores).into()),
        Some(_) => Err(ParseError::Usage("reset [keep|scores]")),
    }
}

/// Parse a rotation command: "rotation a|b N N N N N N"
fn parse_rotation_command(parts: &[&str]) -> Result<CliCommand, ParseError> {
    match parts {
        [_, side, positions @ ..] if !positions.is_empty() => {
            let rotation = positions
                .iter()
                .map(|p| parse_number(p))
                .collect::<Result<Vec<u8>, _>>()?;
            Ok(Command::from(SetRotation {
                side: parse_side(side)?,
                rotation,
            })
            .into())
        }
        _ => Err(ParseError::Usage("rotation a|b N N N N N N")),
    }
}

/// Parse a tick command: "tick SECONDS"
fn parse_tick_command(parts: &[&str]) -> Result<CliCommand, ParseError> {
    match parts {
        [_, seconds] => Ok(CliCommand::Tick(parse_number(seconds)?)),
        _ => Err(ParseError::Usage("tick SECONDS")),
    }
}

/// Parse a history command: "history delete ID"
fn parse_history_command(parts: &[&str]) -> Result<CliCommand, ParseError> {
    match parts {
        [_, action, id] if action.eq_ignore_ascii_case("delete") => {
            Ok(CliCommand::DeleteMatch(MatchId(parse_number(id)?)))
        }
        _ => Err(ParseError::Usage("history [delete ID|clear]")),
    }
}
