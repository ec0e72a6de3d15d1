//! UCI command parsing.

use crate::UciError;

/// Commands sent from GUI to engine.
#[derive(Debug, Clone, PartialEq)]
pub enum GuiCommand {
    /// Initialize UCI mode.
    Uci,
    /// Check if engine is ready.
    IsReady,
    /// The next position belongs to a new game.
    UciNewGame,
    /// Set up position.
    Position {
        fen: Option<String>,
        moves: Vec<String>,
    },
    /// Start calculating.
    Go(GoOptions),
    /// Stop calculating.
    Stop,
    /// Quit the engine.
    Quit,
    /// Print the current position as FEN (non-standard).
    DumpFen,
    /// Unknown command (for forward compatibility).
    Unknown(String),
}

/// Options for the `go` command.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GoOptions {
    /// Search for exactly this time in milliseconds.
    pub movetime: Option<u64>,
    /// Search to this depth.
    pub depth: Option<u32>,
    /// White time remaining in milliseconds.
    pub wtime: Option<u64>,
    /// Black time remaining in milliseconds.
    pub btime: Option<u64>,
    /// Search indefinitely until `stop`.
    pub infinite: bool,
}

impl GuiCommand {
    /// Parse a UCI command string.
    pub fn parse(input: &str) -> Result<Self, UciError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();

        match parts.next().unwrap_or("") {
            "uci" => Ok(GuiCommand::Uci),
            "isready" => Ok(GuiCommand::IsReady),
            "ucinewgame" => Ok(GuiCommand::UciNewGame),
            "stop" => Ok(GuiCommand::Stop),
            "quit" => Ok(GuiCommand::Quit),
            "dumpfen" => Ok(GuiCommand::DumpFen),
            "position" => Self::parse_position(parts),
            "go" => Ok(GuiCommand::Go(parse_go(parts))),
            "" => Ok(GuiCommand::Unknown(String::new())),
            _ => Ok(GuiCommand::Unknown(input.to_string())),
        }
    }

    fn parse_position<'a>(mut parts: impl Iterator<Item = &'a str>) -> Result<Self, UciError> {
        let fen = match parts.next() {
            Some("startpos") => None,
            Some("fen") => {
                let mut fields = Vec::new();
                for part in parts.by_ref() {
                    if part == "moves" {
                        break;
                    }
                    fields.push(part);
                }
                if fields.is_empty() {
                    return Err(UciError::ParseError("Empty FEN".to_string()));
                }
                Some(fields.join(" "))
            }
            Some(other) => {
                return Err(UciError::ParseError(format!(
                    "Expected 'startpos' or 'fen', got '{}'",
                    other
                )));
            }
            None => {
                return Err(UciError::ParseError(
                    "Expected 'startpos' or 'fen'".to_string(),
                ));
            }
        };

        // In the startpos branch the "moves" keyword has not been consumed yet.
        let moves = parts
            .skip_while(|&part| part == "moves")
            .map(str::to_string)
            .collect();

        Ok(GuiCommand::Position { fen, moves })
    }
}

fn parse_go<'a>(mut parts: impl Iterator<Item = &'a str>) -> GoOptions {
    let mut opts = GoOptions::default();

    while let Some(keyword) = parts.next() {
        match keyword {
            "movetime" => opts.movetime = parts.next().and_then(|v| v.parse().ok()),
            "depth" => opts.depth = parts.next().and_then(|v| v.parse().ok()),
            "wtime" => opts.wtime = parts.next().and_then(|v| v.parse().ok()),
            "btime" => opts.btime = parts.next().and_then(|v| v.parse().ok()),
            "infinite" => opts.infinite = true,
            _ => {}
        }
    }

    opts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_commands() {
        assert_eq!(GuiCommand::parse("uci").unwrap(), GuiCommand::Uci);
        assert_eq!(GuiCommand::parse("isready").unwrap(), GuiCommand::IsReady);
        assert_eq!(
            GuiCommand::parse("ucinewgame").unwrap(),
            GuiCommand::UciNewGame
        );
        assert_eq!(GuiCommand::parse("dumpfen").unwrap(), GuiCommand::DumpFen);
        assert_eq!(GuiCommand::parse("quit\n").unwrap(), GuiCommand::Quit);
    }

    #[test]
    fn parse_position_startpos() {
        let cmd = GuiCommand::parse("position startpos").unwrap();
        assert_eq!(
            cmd,
            GuiCommand::Position {
                fen: None,
                moves: vec![]
            }
        );
    }

    #[test]
    fn parse_position_startpos_with_moves() {
        let cmd = GuiCommand::parse("position startpos moves e2e4 e7e5").unwrap();
        assert_eq!(
            cmd,
            GuiCommand::Position {
                fen: None,
                moves: vec!["e2e4".to_string(), "e7e5".to_string()]
            }
        );
    }

    #[test]
    fn parse_position_fen() {
        let cmd = GuiCommand::parse(
            "position fen rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        )
        .unwrap();
        assert_eq!(
            cmd,
            GuiCommand::Position {
                fen: Some(
                    "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1".to_string()
                ),
                moves: vec![]
            }
        );
    }

    #[test]
    fn parse_position_fen_with_moves() {
        let cmd = GuiCommand::parse("position fen 4k3/8/8/8/8/8/8/4K3 w - - 0 1 moves e1e2")
            .unwrap();
        assert_eq!(
            cmd,
            GuiCommand::Position {
                fen: Some("4k3/8/8/8/8/8/8/4K3 w - - 0 1".to_string()),
                moves: vec!["e1e2".to_string()]
            }
        );
    }

    #[test]
    fn parse_position_without_mode_is_an_error() {
        assert!(GuiCommand::parse("position").is_err());
        assert!(GuiCommand::parse("position sideways").is_err());
    }

    #[test]
    fn parse_go_options() {
        let cmd = GuiCommand::parse("go depth 10 movetime 1000").unwrap();
        if let GuiCommand::Go(opts) = cmd {
            assert_eq!(opts.depth, Some(10));
            assert_eq!(opts.movetime, Some(1000));
            assert!(!opts.infinite);
        } else {
            panic!("Expected Go command");
        }
    }

    #[test]
    fn parse_go_time_controls() {
        let cmd = GuiCommand::parse("go wtime 30000 btime 25000").unwrap();
        if let GuiCommand::Go(opts) = cmd {
            assert_eq!(opts.wtime, Some(30000));
            assert_eq!(opts.btime, Some(25000));
        } else {
            panic!("Expected Go command");
        }
    }

    #[test]
    fn parse_go_infinite() {
        let cmd = GuiCommand::parse("go infinite").unwrap();
        if let GuiCommand::Go(opts) = cmd {
            assert!(opts.infinite);
        } else {
            panic!("Expected Go command");
        }
    }

    #[test]
    fn unknown_commands_pass_through() {
        assert_eq!(
            GuiCommand::parse("setoption name Hash value 64").unwrap(),
            GuiCommand::Unknown("setoption name Hash value 64".to_string())
        );
    }
}
