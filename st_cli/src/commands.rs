use swiss_tournament::PlayerId;
use thiserror::Error;

/// Default field size for the offline demo
pub const DEFAULT_DEMO_PLAYERS: usize = 8;

/// Default number of rounds for the offline demo
pub const DEFAULT_DEMO_ROUNDS: usize = 3;

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No subcommand given.
    #[error("Missing command. Run with --help to see available commands")]
    MissingCommand,
    /// Subcommand is missing a required argument.
    #[error("'{command}' requires {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
    /// Player ID is not a number.
    #[error("Invalid player ID '{0}'. Must be a whole number")]
    InvalidPlayerId(String),
    /// Extra words after a complete command.
    #[error("Unexpected argument '{0}'")]
    UnexpectedArgument(String),
    /// Unrecognized command.
    #[error("Unrecognized command '{0}'. Run with --help to see available commands")]
    UnrecognizedCommand(String),
}

/// A single CLI invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the database schema
    Init,
    /// Register a player by name
    Register(String),
    /// Record that `winner` beat `loser`
    Report { winner: PlayerId, loser: PlayerId },
    /// Print the number of registered players
    Count,
    /// Print the standings
    Standings,
    /// Print the next round's pairings
    Pairings,
    /// Clear matches, or matches and players
    Reset { matches_only: bool },
    /// Simulate a tournament in memory
    Demo {
        players: usize,
        rounds: usize,
        seed: Option<u64>,
    },
}

impl Command {
    /// Whether the command talks to the database
    pub fn needs_database(&self) -> bool {
        !matches!(self, Command::Demo { .. })
    }
}

/// Options given as flags rather than positional words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandFlags {
    pub matches_only: bool,
    pub players: Option<usize>,
    pub rounds: Option<usize>,
    pub seed: Option<u64>,
}

/// Parse the positional words left after flag extraction.
///
/// A player name may span several words: `register Bruno Walton`.
pub fn parse_command(words: &[String], flags: &CommandFlags) -> Result<Command, ParseError> {
    let (name, rest) = words.split_first().ok_or(ParseError::MissingCommand)?;

    let command = match name.as_str() {
        "init" => Command::Init,
        "register" => {
            let player = rest.join(" ");
            if player.trim().is_empty() {
                return Err(ParseError::MissingArgument {
                    command: "register",
                    what: "a player name",
                });
            }
            return Ok(Command::Register(player));
        }
        "report" => {
            let [winner, loser, ..] = rest else {
                return Err(ParseError::MissingArgument {
                    command: "report",
                    what: "WINNER and LOSER ids",
                });
            };
            let command = Command::Report {
                winner: parse_player_id(winner)?,
                loser: parse_player_id(loser)?,
            };
            return expect_end(command, &rest[2..]);
        }
        "count" => Command::Count,
        "standings" => Command::Standings,
        "pairings" => Command::Pairings,
        "reset" => Command::Reset {
            matches_only: flags.matches_only,
        },
        "demo" => Command::Demo {
            players: flags.players.unwrap_or(DEFAULT_DEMO_PLAYERS),
            rounds: flags.rounds.unwrap_or(DEFAULT_DEMO_ROUNDS),
            seed: flags.seed,
        },
        other => return Err(ParseError::UnrecognizedCommand(other.to_string())),
    };

    expect_end(command, rest)
}

fn parse_player_id(word: &str) -> Result<PlayerId, ParseError> {
    word.parse()
        .map_err(|_| ParseError::InvalidPlayerId(word.to_string()))
}

fn expect_end(command: Command, rest: &[String]) -> Result<Command, ParseError> {
    match rest.first() {
        Some(extra) => Err(ParseError::UnexpectedArgument(extra.clone())),
        None => Ok(command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(input: &str) -> Vec<String> {
        input.split_whitespace().map(str::to_string).collect()
    }

    fn parse(input: &str) -> Result<Command, ParseError> {
        parse_command(&words(input), &CommandFlags::default())
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse("init"), Ok(Command::Init));
        assert_eq!(parse("count"), Ok(Command::Count));
        assert_eq!(parse("standings"), Ok(Command::Standings));
        assert_eq!(parse("pairings"), Ok(Command::Pairings));
    }

    #[test]
    fn test_parse_register_multi_word_name() {
        assert_eq!(
            parse("register Bruno Walton"),
            Ok(Command::Register("Bruno Walton".to_string()))
        );
    }

    #[test]
    fn test_parse_register_without_name() {
        assert!(matches!(
            parse("register"),
            Err(ParseError::MissingArgument { command: "register", .. })
        ));
    }

    #[test]
    fn test_parse_report() {
        assert_eq!(
            parse("report 3 4"),
            Ok(Command::Report { winner: 3, loser: 4 })
        );
    }

    #[test]
    fn test_parse_report_invalid_id() {
        assert_eq!(
            parse("report three 4"),
            Err(ParseError::InvalidPlayerId("three".to_string()))
        );
    }

    #[test]
    fn test_parse_report_missing_loser() {
        assert!(matches!(
            parse("report 3"),
            Err(ParseError::MissingArgument { command: "report", .. })
        ));
    }

    #[test]
    fn test_parse_report_extra_argument() {
        assert_eq!(
            parse("report 3 4 5"),
            Err(ParseError::UnexpectedArgument("5".to_string()))
        );
    }

    #[test]
    fn test_parse_reset_uses_flag() {
        assert_eq!(parse("reset"), Ok(Command::Reset { matches_only: false }));

        let flags = CommandFlags {
            matches_only: true,
            ..Default::default()
        };
        assert_eq!(
            parse_command(&words("reset"), &flags),
            Ok(Command::Reset { matches_only: true })
        );
    }

    #[test]
    fn test_parse_demo_defaults_and_overrides() {
        assert_eq!(
            parse("demo"),
            Ok(Command::Demo {
                players: DEFAULT_DEMO_PLAYERS,
                rounds: DEFAULT_DEMO_ROUNDS,
                seed: None,
            })
        );

        let flags = CommandFlags {
            players: Some(16),
            rounds: Some(4),
            seed: Some(7),
            ..Default::default()
        };
        assert_eq!(
            parse_command(&words("demo"), &flags),
            Ok(Command::Demo {
                players: 16,
                rounds: 4,
                seed: Some(7),
            })
        );
    }

    #[test]
    fn test_parse_unknown_and_missing() {
        assert_eq!(
            parse("shuffle"),
            Err(ParseError::UnrecognizedCommand("shuffle".to_string()))
        );
        assert_eq!(parse(""), Err(ParseError::MissingCommand));
    }

    #[test]
    fn test_only_demo_runs_offline() {
        assert!(Command::Standings.needs_database());
        assert!(!parse("demo").unwrap().needs_database());
    }
}
