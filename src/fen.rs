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

//! Parse and write Forsyth-Edwards-Notation.
//!
//! # Examples
//!
//! Parse and write FENs:
//!
//! ```
//! use rochade::fen::Fen;
//!
//! let fen: Fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1".parse()?;
//! let pos = fen.into_position();
//! assert_eq!(pos.legal_moves().len(), 20);
//!
//! assert_eq!(
//!     Fen::from_position(&pos).to_string(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
//! );
//! # Ok::<_, rochade::fen::ParseFenError>(())
//! ```
//!
//! All six fields are required:
//!
//! ```
//! use rochade::fen::{Fen, ParseFenError};
//!
//! assert_eq!(
//!     "8/8/8/8/8/8/k7/K7 w - -".parse::<Fen>(),
//!     Err(ParseFenError::MissingField)
//! );
//! ```

use std::{error::Error, fmt, num::NonZeroU32, str::FromStr};

use crate::{
    board::Board,
    castling::CastlingRights,
    color::Color,
    position::Chess,
    role::Role,
    square::{Rank, Square},
};

/// Errors that can occur when parsing a FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    InvalidBoard,
    /// A side has more pieces than a game can produce, for example more
    /// than 16 pieces or more than 8 pawns.
    ImpossibleMaterial,
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
    InvalidHalfmoveClock,
    InvalidFullmoves,
    MissingField,
    TrailingField,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ParseFenError::InvalidBoard => "invalid board part in fen",
            ParseFenError::ImpossibleMaterial => "impossible material in fen",
            ParseFenError::InvalidTurn => "invalid turn part in fen",
            ParseFenError::InvalidCastling => "invalid castling part in fen",
            ParseFenError::InvalidEpSquare => "invalid ep square in fen",
            ParseFenError::InvalidHalfmoveClock => "invalid halfmove clock in fen",
            ParseFenError::InvalidFullmoves => "invalid fullmove part in fen",
            ParseFenError::MissingField => "missing field in fen",
            ParseFenError::TrailingField => "trailing field in fen",
        })
    }
}

impl Error for ParseFenError {}

/// A FEN like `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1`.
///
/// The six fields are piece placement, side to move, castling rights,
/// en passant square, halfmove clock and fullmove number.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct Fen(Chess);

impl Fen {
    /// Parses a FEN.
    ///
    /// Fields may be separated by any run of ASCII whitespace. Castling
    /// letters are accepted in any order.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError`] if any field is missing or malformed, or
    /// if there are more than six fields. The input is never repaired.
    pub fn from_ascii(fen: &[u8]) -> Result<Fen, ParseFenError> {
        let mut fields = fen
            .split(u8::is_ascii_whitespace)
            .filter(|field| !field.is_empty());

        let board_part = fields.next().ok_or(ParseFenError::MissingField)?;
        let board =
            Board::from_ascii_board_fen(board_part).map_err(|_| ParseFenError::InvalidBoard)?;
        if !is_possible_material(&board) {
            return Err(ParseFenError::ImpossibleMaterial);
        }

        let turn = match fields.next().ok_or(ParseFenError::MissingField)? {
            b"w" => Color::White,
            b"b" => Color::Black,
            _ => return Err(ParseFenError::InvalidTurn),
        };

        let castling_rights =
            parse_castling(fields.next().ok_or(ParseFenError::MissingField)?)?;

        let ep_square = match fields.next().ok_or(ParseFenError::MissingField)? {
            b"-" => None,
            ep_part => {
                let sq =
                    Square::from_ascii(ep_part).map_err(|_| ParseFenError::InvalidEpSquare)?;
                if !matches!(sq.rank(), Rank::Third | Rank::Sixth) {
                    return Err(ParseFenError::InvalidEpSquare);
                }
                Some(sq)
            }
        };

        let halfmoves = btoi::btou(fields.next().ok_or(ParseFenError::MissingField)?)
            .map_err(|_| ParseFenError::InvalidHalfmoveClock)?;

        let fullmoves = btoi::btou(fields.next().ok_or(ParseFenError::MissingField)?)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(ParseFenError::InvalidFullmoves)?;

        if fields.next().is_some() {
            return Err(ParseFenError::TrailingField);
        }

        Ok(Fen(Chess::from_parts(
            board,
            turn,
            castling_rights,
            ep_square,
            halfmoves,
            fullmoves,
        )))
    }

    pub fn from_position(pos: &Chess) -> Fen {
        Fen(pos.clone())
    }

    pub fn as_position(&self) -> &Chess {
        &self.0
    }

    pub fn into_position(self) -> Chess {
        self.0
    }
}

fn parse_castling(part: &[u8]) -> Result<CastlingRights, ParseFenError> {
    if part == b"-" {
        return Ok(CastlingRights::empty());
    }

    let mut castling_rights = CastlingRights::empty();
    for &ch in part {
        let flag = CastlingRights::from_char(char::from(ch)).ok_or(ParseFenError::InvalidCastling)?;
        if castling_rights.contains(flag) {
            return Err(ParseFenError::InvalidCastling);
        }
        castling_rights.insert(flag);
    }
    Ok(castling_rights)
}

/// Every piece beyond the initial set must be accounted for by a missing
/// pawn that promoted.
fn is_possible_material(board: &Board) -> bool {
    Color::ALL.into_iter().all(|color| {
        let count = |role: Role| {
            board
                .pieces()
                .filter(|&(_, piece)| piece == role.of(color))
                .count()
        };

        let pawns = count(Role::Pawn);
        let promoted = count(Role::Queen).saturating_sub(1)
            + count(Role::Rook).saturating_sub(2)
            + count(Role::Bishop).saturating_sub(2)
            + count(Role::Knight).saturating_sub(2);

        count(Role::King) <= 1 && pawns + promoted <= 8
    })
}

impl From<Chess> for Fen {
    fn from(pos: Chess) -> Fen {
        Fen(pos)
    }
}

impl From<Fen> for Chess {
    fn from(fen: Fen) -> Chess {
        fen.into_position()
    }
}

impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(fen: &str) -> Result<Fen, ParseFenError> {
        Fen::from_ascii(fen.as_bytes())
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pos = &self.0;
        write!(
            f,
            "{} {} {} ",
            pos.board().board_fen(),
            pos.turn().char(),
            pos.castling_rights()
        )?;
        match pos.ep_square() {
            Some(sq) => write!(f, "{sq}")?,
            None => f.write_str("-")?,
        }
        write!(f, " {} {}", pos.halfmoves(), pos.fullmoves())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Fen {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Fen {
    fn deserialize<D>(deserializer: D) -> Result<Fen, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct FenVisitor;

        impl serde::de::Visitor<'_> for FenVisitor {
            type Value = Fen;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("fen string")
            }

            fn visit_str<E>(self, value: &str) -> Result<Fen, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(FenVisitor)
    }
}
