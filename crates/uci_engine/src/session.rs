//! The command loop.
//!
//! Every command is one line. Responses are written to the output and
//! flushed immediately; unknown or malformed lines get no response. Both the
//! UCI tokens and the plain command names are accepted:
//!
//! | UCI          | alias          | response                            |
//! |--------------|----------------|-------------------------------------|
//! | `uci`        | `handshake`    | identity, then `uciok` / `protocolok` |
//! | `isready`    | `ready-check`  | `readyok`                           |
//! | `ucinewgame` | `new-game`     | none, resets the position           |
//! | `position`   | `set-position` | none                                |
//! | `go`         |                | `bestmove <move>`                   |
//! | `quit`       |                | none, ends the loop                 |

use std::io::{self, BufRead, Write};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use game_core::{EngineConfig, Notation, NotationError};

use crate::strategy::Strategy;

/// Printed when a search cannot produce a move.
const NULL_MOVE: &str = "0000";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("illegal move '{mv}' after {applied} moves of the sequence")]
    IllegalMoveInSequence { mv: String, applied: usize },

    #[error(transparent)]
    InvalidPosition(#[from] NotationError),
}

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct UciSession<G: Notation> {
    name: String,
    author: String,
    position: G,
    strategy: Strategy<G>,
    /// Defaults for every search; `setoption` edits them.
    config: EngineConfig,
}

impl<G: Notation> UciSession<G> {
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        strategy: Strategy<G>,
        config: EngineConfig,
    ) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            position: G::initial(),
            strategy,
            config,
        }
    }

    pub fn position(&self) -> &G {
        &self.position
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Reads commands until `quit` or end of input. Bytes that are not
    /// UTF-8 are replaced, so a garbled line is just an unknown command.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                return Ok(());
            }
            let line = String::from_utf8_lossy(&buf);
            if self.handle_line(&line, out)? == Flow::Quit {
                return Ok(());
            }
        }
    }

    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Ok(Flow::Continue);
        };

        match command {
            "uci" => {
                self.write_identity(out)?;
                self.write_options(out)?;
                writeln!(out, "uciok")?;
            }
            "handshake" => {
                self.write_identity(out)?;
                writeln!(out, "protocolok")?;
            }
            "isready" | "ready-check" => writeln!(out, "readyok")?,
            "ucinewgame" | "new-game" => {
                debug!("new game");
                self.position = G::initial();
            }
            "position" | "set-position" => {
                if let Err(e) = self.set_position(args) {
                    warn!(error = %e, "position command not fully applied");
                }
            }
            "setoption" => self.set_option(args),
            "go" => self.go(args, out)?,
            "d" => writeln!(out, "{}", self.position.encode())?,
            "stop" | "ponderhit" => {}
            "quit" => return Ok(Flow::Quit),
            other => debug!(command = other, "ignoring unknown command"),
        }

        out.flush()?;
        Ok(Flow::Continue)
    }

    /// Applies `startpos | [fen] <fen> [moves m1 m2 ...]`.
    ///
    /// A bad position leaves the current one untouched. An illegal move stops
    /// the sequence; the position after the last legal move is kept.
    pub fn set_position(&mut self, args: &[&str]) -> Result<(), SessionError> {
        let split = args.iter().position(|&t| t == "moves").unwrap_or(args.len());
        let (setup, moves) = args.split_at(split);
        let moves = moves.get(1..).unwrap_or_default();

        let fen = match setup {
            ["startpos"] => None,
            ["fen", rest @ ..] => Some(rest),
            rest => Some(rest),
        };
        let mut pos = match fen {
            None => G::initial(),
            Some(fen) => {
                let text = fen.join(" ");
                if text.is_empty() {
                    return Err(NotationError::InvalidPosition {
                        text,
                        reason: "missing position".into(),
                    }
                    .into());
                }
                G::decode(&text)?
            }
        };

        for (applied, text) in moves.iter().enumerate() {
            match pos.decode_move(text) {
                Ok(mv) => pos = pos.apply(mv),
                Err(_) => {
                    self.position = pos;
                    return Err(SessionError::IllegalMoveInSequence {
                        mv: text.to_string(),
                        applied,
                    });
                }
            }
        }

        self.position = pos;
        Ok(())
    }

    fn write_identity<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name {}", self.name)?;
        writeln!(out, "id author {}", self.author)
    }

    fn write_options<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "option name MoveTime type spin default {} min 0 max 3600000",
            self.config.time_limit_per_move.as_millis()
        )?;
        writeln!(
            out,
            "option name Depth type spin default {} min 1 max 64",
            self.config.max_depth
        )?;
        writeln!(
            out,
            "option name ExplorationWeight type string default {}",
            self.config.exploration_weight
        )
    }

    /// `setoption name <Name> value <v>`. Values that would make the
    /// configuration invalid are rejected with a warning.
    fn set_option(&mut self, args: &[&str]) {
        let (Some(name_at), Some(value_at)) = (
            args.iter().position(|&t| t == "name"),
            args.iter().position(|&t| t == "value"),
        ) else {
            warn!(?args, "malformed setoption");
            return;
        };
        if value_at <= name_at {
            warn!(?args, "malformed setoption");
            return;
        }
        let name = args[name_at + 1..value_at].join(" ");
        let value = args[value_at + 1..].join(" ");

        let mut next = self.config.clone();
        let parsed = match name.to_ascii_lowercase().as_str() {
            "movetime" => value
                .parse::<u64>()
                .map(|ms| next.time_limit_per_move = Duration::from_millis(ms))
                .is_ok(),
            "depth" => value.parse::<u32>().map(|d| next.max_depth = d).is_ok(),
            "explorationweight" => value
                .parse::<f64>()
                .map(|w| next.exploration_weight = w)
                .is_ok(),
            _ => {
                debug!(option = %name, "ignoring unknown option");
                return;
            }
        };

        if !parsed {
            warn!(option = %name, value = %value, "unparseable option value");
            return;
        }
        match next.validate() {
            Ok(()) => {
                info!(option = %name, value = %value, "option set");
                self.config = next;
            }
            Err(e) => warn!(option = %name, value = %value, error = %e, "option rejected"),
        }
    }

    /// Searches the current position and prints `bestmove`. `movetime <ms>`
    /// and `depth <n>` override the session defaults for this search only;
    /// other parameters are ignored.
    fn go<W: Write>(&mut self, args: &[&str], out: &mut W) -> io::Result<()> {
        let mut config = self.config.clone();
        let mut tokens = args.iter();
        while let Some(&token) = tokens.next() {
            match token {
                "movetime" => {
                    if let Some(ms) = tokens.next().and_then(|v| v.parse::<u64>().ok()) {
                        config.time_limit_per_move = Duration::from_millis(ms);
                    }
                }
                "depth" => {
                    if let Some(depth) = tokens.next().and_then(|v| v.parse::<u32>().ok()) {
                        config.max_depth = depth;
                    }
                }
                _ => {}
            }
        }

        match self.strategy.select_move(&self.position, &config) {
            Ok(mv) => writeln!(out, "bestmove {}", self.position.encode_move(mv)),
            Err(e) => {
                warn!(error = %e, strategy = self.strategy.kind().as_str(), "search failed");
                writeln!(out, "bestmove {NULL_MOVE}")
            }
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
