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

use std::{error::Error, fmt, str::FromStr};

use crate::{color::Color, position::Chess};

/// Whether a game is still running, and if not, how it ended.
///
/// # Examples
///
/// ```
/// use rochade::{fen::Fen, Chess, Color, Status};
///
/// assert_eq!(Chess::default().status(), Status::InProgress);
///
/// let fools_mate: Fen =
///     "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3".parse()?;
/// assert_eq!(
///     fools_mate.into_position().status(),
///     Status::Checkmate { winner: Color::Black }
/// );
/// # Ok::<_, rochade::fen::ParseFenError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Status {
    InProgress,
    /// The side to move is checkmated.
    Checkmate { winner: Color },
    /// The side to move has no legal moves but is not in check.
    Stalemate,
    /// 100 half-moves without a capture or pawn move.
    FiftyMoveRule,
    /// Only kings, or kings and a single bishop or knight, are left.
    InsufficientMaterial,
}

impl Status {
    pub const fn is_game_over(self) -> bool {
        !matches!(self, Status::InProgress)
    }

    pub const fn winner(self) -> Option<Color> {
        match self {
            Status::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }

    pub const fn is_draw(self) -> bool {
        matches!(
            self,
            Status::Stalemate | Status::FiftyMoveRule | Status::InsufficientMaterial
        )
    }

    /// The game result token used in movetext: `1-0`, `0-1`, `1/2-1/2`,
    /// or `*` for a game in progress.
    pub const fn result(self) -> &'static str {
        match self {
            Status::InProgress => "*",
            Status::Checkmate {
                winner: Color::White,
            } => "1-0",
            Status::Checkmate {
                winner: Color::Black,
            } => "0-1",
            Status::Stalemate | Status::FiftyMoveRule | Status::InsufficientMaterial => "1/2-1/2",
        }
    }

    /// Classifies a position whose number of legal moves is already known.
    ///
    /// No legal moves means checkmate (won by the side not to move) if in
    /// check, otherwise stalemate. Then the fifty-move rule applies from a
    /// halfmove clock of 100, then insufficient material.
    pub fn classify(pos: &Chess, legal_moves: usize) -> Status {
        if legal_moves == 0 {
            if pos.is_check() {
                Status::Checkmate {
                    winner: !pos.turn(),
                }
            } else {
                Status::Stalemate
            }
        } else if pos.halfmoves() >= 100 {
            Status::FiftyMoveRule
        } else if pos.is_insufficient_material() {
            Status::InsufficientMaterial
        } else {
            Status::InProgress
        }
    }
}

impl Chess {
    /// Determines whether the game continues or has ended, and how.
    pub fn status(&self) -> Status {
        Status::classify(self, self.legal_moves().len())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Status::InProgress => "in progress",
            Status::Checkmate {
                winner: Color::White,
            } => "checkmate, white wins",
            Status::Checkmate {
                winner: Color::Black,
            } => "checkmate, black wins",
            Status::Stalemate => "stalemate",
            Status::FiftyMoveRule => "draw by fifty-move rule",
            Status::InsufficientMaterial => "draw by insufficient material",
        })
    }
}

/// Error when parsing the textual representation of a [`Status`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseStatusError;

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid status")
    }
}

impl Error for ParseStatusError {}

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Status, ParseStatusError> {
        Ok(match s {
            "in progress" => Status::InProgress,
            "checkmate, white wins" => Status::Checkmate {
                winner: Color::White,
            },
            "checkmate, black wins" => Status::Checkmate {
                winner: Color::Black,
            },
            "stalemate" => Status::Stalemate,
            "draw by fifty-move rule" => Status::FiftyMoveRule,
            "draw by insufficient material" => Status::InsufficientMaterial,
            _ => return Err(ParseStatusError),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    fn status(fen: &str) -> Status {
        fen.parse::<Fen>().expect("valid fen").into_position().status()
    }

    #[test]
    fn test_status() {
        assert_eq!(
            status("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Status::InProgress
        );
        assert_eq!(
            status("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"),
            Status::Checkmate {
                winner: Color::Black
            }
        );
        assert_eq!(status("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"), Status::Stalemate);
        assert_eq!(
            status("8/8/8/8/8/8/k7/K7 w - - 0 1"),
            Status::InsufficientMaterial
        );
        assert_eq!(
            status("8/8/8/8/k7/8/8/KN6 b - - 0 1"),
            Status::InsufficientMaterial
        );
        assert_eq!(status("8/8/8/8/8/2k5/8/KR6 w - - 0 1"), Status::InProgress);
    }

    #[test]
    fn test_fifty_move_rule() {
        let fen = |halfmoves: u32| format!("8/8/8/8/8/2k5/8/KR6 w - - {halfmoves} 80");
        assert_eq!(status(&fen(99)), Status::InProgress);
        assert_eq!(status(&fen(100)), Status::FiftyMoveRule);
        assert_eq!(status(&fen(101)), Status::FiftyMoveRule);
    }

    #[test]
    fn test_checkmate_before_fifty_move_rule() {
        assert_eq!(
            status("R5k1/5ppp/8/8/8/8/8/6K1 b - - 100 70"),
            Status::Checkmate {
                winner: Color::White
            }
        );
    }

    #[test]
    fn test_display_roundtrip() {
        for status in [
            Status::InProgress,
            Status::Checkmate {
                winner: Color::White,
            },
            Status::Checkmate {
                winner: Color::Black,
            },
            Status::Stalemate,
            Status::FiftyMoveRule,
            Status::InsufficientMaterial,
        ] {
            assert_eq!(status.to_string().parse(), Ok(status));
            assert_eq!(status.is_game_over(), status != Status::InProgress);
        }
        assert_eq!("draw".parse::<Status>(), Err(ParseStatusError));
    }
}
