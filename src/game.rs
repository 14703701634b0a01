// This file is part of the rochade library.
// Copyright (C) 2026 The rochade developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! String-level interface for applications that drive a game.
//!
//! Everything here is built on [`Chess`]. Actions come in as UCI strings
//! and go out annotated with UCI, SAN and the resulting FEN. Rejected
//! actions are reported as `None`, never as a panic.
//!
//! # Examples
//!
//! ```
//! use rochade::{game, Status};
//!
//! let pos = game::new_game();
//! assert_eq!(game::legal_moves(&pos).len(), 20);
//!
//! let (pos, applied) = game::apply_uci(&pos, "e2e4").expect("legal");
//! assert_eq!(applied.action.san.to_string(), "e4");
//! assert_eq!(
//!     applied.fen.to_string(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
//! );
//!
//! assert!(game::apply_uci(&pos, "e2e4").is_none());
//! assert_eq!(game::status(&pos), Status::InProgress);
//! ```

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::{
    fen::Fen,
    m::{Move, MoveList},
    position::Chess,
    role::Role,
    san::{SanPlus, Suffix},
    status::Status,
    uci::UciMove,
};

/// The standard starting position.
pub fn new_game() -> Chess {
    Chess::default()
}

/// A legal move with everything needed to present it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnotatedMove {
    /// Role of the moving piece.
    pub role: Role,
    /// Role of the captured piece. A pawn for en passant, even though it
    /// does not stand on the destination square.
    pub capture: Option<Role>,
    pub uci: UciMove,
    pub san: SanPlus,
}

impl AnnotatedMove {
    /// Annotates `m`, which must be one of `legals`, the legal moves of
    /// `pos`.
    pub fn new(pos: &Chess, m: Move, legals: &MoveList) -> AnnotatedMove {
        AnnotatedMove {
            role: m.role(),
            capture: m.capture(),
            uci: UciMove::from_move(&m),
            san: SanPlus::from_legal_move(pos, m, legals),
        }
    }

    pub fn is_check(&self) -> bool {
        self.san.suffix.is_some()
    }

    pub fn is_checkmate(&self) -> bool {
        self.san.suffix == Some(Suffix::Checkmate)
    }
}

/// An [`AnnotatedMove`] that has been played, with the FEN of the
/// resulting position.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedMove {
    pub action: AnnotatedMove,
    pub fen: Fen,
}

/// Legal moves of `pos`, each with its UCI and SAN.
pub fn legal_moves(pos: &Chess) -> Vec<AnnotatedMove> {
    let legals = pos.legal_moves();
    legals
        .iter()
        .map(|&m| AnnotatedMove::new(pos, m, &legals))
        .collect()
}

/// Plays the move given in UCI notation.
///
/// Returns `None` if the string is not a UCI move or if it does not match
/// a legal move. `pos` itself is never changed.
pub fn apply_uci(pos: &Chess, uci: &str) -> Option<(Chess, AppliedMove)> {
    let Ok(parsed) = UciMove::from_ascii(uci.as_bytes()) else {
        debug!(uci, fen = %Fen::from_position(pos), "rejected unparseable uci move");
        return None;
    };

    let legals = pos.legal_moves();
    let Some(m) = legals
        .iter()
        .copied()
        .find(|m| UciMove::from_move(m) == parsed)
    else {
        debug!(uci, fen = %Fen::from_position(pos), "rejected illegal uci move");
        return None;
    };

    Some(apply_legal(pos, m, &legals))
}

fn apply_legal(pos: &Chess, m: Move, legals: &MoveList) -> (Chess, AppliedMove) {
    let action = AnnotatedMove::new(pos, m, legals);
    let after = pos.play_unchecked(&m);
    let fen = Fen::from_position(&after);
    trace!(uci = %action.uci, san = %action.san, fen = %fen, "applied move");
    (after, AppliedMove { action, fen })
}

/// Determines whether the game continues or has ended, and how.
pub fn status(pos: &Chess) -> Status {
    pos.status()
}

/// Entry of a game log.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveRecord {
    /// 1 for the first move of the game.
    pub ply: u32,
    pub applied: AppliedMove,
    pub played_at: DateTime<Utc>,
}

/// A game in progress: the current position, every earlier position and
/// the append-only log of moves played.
///
/// # Examples
///
/// ```
/// use rochade::{game::Game, Color, Status};
///
/// let mut game = Game::new();
/// for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
///     game.play_uci(uci).expect("legal");
/// }
/// assert_eq!(game.movetext(), "1. f3 e5 2. g4 Qh4#");
/// assert_eq!(game.status(), Status::Checkmate { winner: Color::Black });
///
/// let undone = game.undo().expect("move to undo");
/// assert_eq!(undone.applied.action.uci.to_string(), "d8h4");
/// assert_eq!(game.status(), Status::InProgress);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Game {
    position: Chess,
    history: Vec<Chess>,
    log: Vec<MoveRecord>,
}

impl Game {
    pub fn new() -> Game {
        Game::default()
    }

    /// Starts a game from an arbitrary position.
    pub fn from_position(position: Chess) -> Game {
        Game {
            position,
            history: Vec::new(),
            log: Vec::new(),
        }
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    /// The moves played so far, oldest first.
    pub fn records(&self) -> &[MoveRecord] {
        &self.log
    }

    pub fn status(&self) -> Status {
        self.position.status()
    }

    /// Plays a move given in UCI notation. Returns `None`, leaving the game
    /// unchanged, if it is not legal.
    pub fn play_uci(&mut self, uci: &str) -> Option<&MoveRecord> {
        let (after, applied) = apply_uci(&self.position, uci)?;
        Some(self.push(after, applied))
    }

    /// Plays a move given in SAN. Returns `None`, leaving the game
    /// unchanged, if it is not a unique legal move.
    pub fn play_san(&mut self, san: &str) -> Option<&MoveRecord> {
        let parsed = match san.parse::<SanPlus>() {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!(san, %err, "rejected san move");
                return None;
            }
        };

        let legals = self.position.legal_moves();
        let m = match parsed.san.find_move(&legals) {
            Ok(m) => *m,
            Err(err) => {
                debug!(san, %err, fen = %Fen::from_position(&self.position), "rejected san move");
                return None;
            }
        };

        let (after, applied) = apply_legal(&self.position, m, &legals);
        Some(self.push(after, applied))
    }

    fn push(&mut self, after: Chess, applied: AppliedMove) -> &MoveRecord {
        let ply = u32::try_from(self.log.len()).map_or(u32::MAX, |n| n.saturating_add(1));
        self.history
            .push(std::mem::replace(&mut self.position, after));
        self.log.push(MoveRecord {
            ply,
            applied,
            played_at: Utc::now(),
        });
        &self.log[self.log.len() - 1]
    }

    /// Takes back the last move.
    pub fn undo(&mut self) -> Option<MoveRecord> {
        let previous = self.history.pop()?;
        let record = self.log.pop()?;
        self.position = previous;
        debug!(ply = record.ply, uci = %record.applied.action.uci, "undo");
        Some(record)
    }

    /// Numbered SAN of the moves played, like `1. e4 e5 2. Nf3`.
    pub fn movetext(&self) -> String {
        let mut movetext = String::new();
        for (before, record) in self.history.iter().zip(&self.log) {
            if !movetext.is_empty() {
                movetext.push(' ');
            }
            if before.turn().is_white() {
                let _ = write!(movetext, "{}. ", before.fullmoves());
            } else if record.ply == 1 {
                let _ = write!(movetext, "{}... ", before.fullmoves());
            }
            let _ = write!(movetext, "{}", record.applied.action.san);
        }
        movetext
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_rejected_actions() {
        let pos = new_game();
        for uci in ["", "e2e5", "e7e5", "e2e4q", "xyz", "e1g1"] {
            assert!(apply_uci(&pos, uci).is_none(), "{uci}");
        }
    }

    #[test]
    fn test_annotated_legal_moves() {
        let pos = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"
            .parse::<Fen>()
            .expect("valid fen")
            .into_position();
        let moves = legal_moves(&pos);
        let castle = moves
            .iter()
            .find(|m| m.uci.to_string() == "e1g1")
            .expect("castling is legal");
        assert_eq!(castle.san.to_string(), "O-O");
        assert_eq!(castle.role, Role::King);

        let capture = moves
            .iter()
            .find(|m| m.uci.to_string() == "a1a8")
            .expect("rook capture is legal");
        assert_eq!(capture.san.to_string(), "Rxa8+");
        assert_eq!(capture.capture, Some(Role::Rook));
        assert!(capture.is_check());
        assert!(!capture.is_checkmate());
    }

    #[test]
    fn test_game_log() {
        let mut game = Game::new();
        assert!(game.play_uci("e2e4").is_some());
        assert!(game.play_san("e5").is_some());
        assert!(game.play_san("Nf6").is_none());
        assert!(game.play_uci("e1e3").is_none());
        let record = game.play_san("Nf3").expect("legal").clone();
        assert_eq!(record.ply, 3);
        assert_eq!(
            record.applied.fen.to_string(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );
        assert_eq!(game.records().len(), 3);
        assert_eq!(game.movetext(), "1. e4 e5 2. Nf3");

        let undone = game.undo().expect("move to undo");
        assert_eq!(undone.ply, 3);
        assert_eq!(game.records().len(), 2);
        assert_eq!(game.position().turn(), Color::White);
        assert_eq!(game.movetext(), "1. e4 e5");
    }

    #[test]
    fn test_movetext_from_black() {
        let pos = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
            .parse::<Fen>()
            .expect("valid fen")
            .into_position();
        let mut game = Game::from_position(pos);
        game.play_uci("c7c5").expect("legal");
        game.play_uci("g1f3").expect("legal");
        assert_eq!(game.movetext(), "1... c5 2. Nf3");
    }

    #[test]
    fn test_undo_empty() {
        assert!(Game::new().undo().is_none());
    }
}
