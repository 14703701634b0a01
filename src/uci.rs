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

//! Parse and write moves in Universal Chess Interface representation.
//!
//! # Examples
//!
//! Parsing UCI moves:
//!
//! ```
//! use rochade::{uci::UciMove, Square};
//!
//! let uci: UciMove = "g1f3".parse()?;
//!
//! assert_eq!(
//!     uci,
//!     UciMove {
//!         from: Square::G1,
//!         to: Square::F3,
//!         promotion: None,
//!     }
//! );
//! # Ok::<_, rochade::uci::ParseUciMoveError>(())
//! ```
//!
//! Converting to a legal move in the context of a position:
//!
//! ```
//! # use rochade::{uci::UciMove, Square};
//! use rochade::{Chess, Color};
//!
//! # let uci: UciMove = "g1f3".parse()?;
//! let pos = Chess::default();
//! let m = uci.to_move(&pos)?;
//!
//! let after = pos.play_unchecked(&m);
//! assert_eq!(after.board().piece_at(Square::F3), Some(Color::White.knight()));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Castling is written as the two-file king move:
//!
//! ```
//! use rochade::{uci::UciMove, Move, Square};
//!
//! let m = Move::Castle { king: Square::E8, rook: Square::A8 };
//! assert_eq!(UciMove::from_move(&m).to_string(), "e8c8");
//! ```

use std::{error::Error, fmt, str::FromStr};

use crate::{m::Move, position::Chess, role::Role, square::Square};

/// Error when parsing a syntactically invalid UCI move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseUciMoveError;

impl fmt::Display for ParseUciMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid uci move")
    }
}

impl Error for ParseUciMoveError {}

/// Error when a UCI move is not legal in a position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IllegalUciMoveError;

impl fmt::Display for IllegalUciMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("illegal uci move")
    }
}

impl Error for IllegalUciMoveError {}

/// A move as represented in the UCI protocol: origin, destination and
/// an optional lowercase promotion letter, like `e2e4` or `e7e8q`.
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct UciMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl FromStr for UciMove {
    type Err = ParseUciMoveError;

    fn from_str(uci: &str) -> Result<UciMove, ParseUciMoveError> {
        UciMove::from_ascii(uci.as_bytes())
    }
}

impl fmt::Display for UciMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.char())?;
        }
        Ok(())
    }
}

impl UciMove {
    /// Parses a move in UCI notation.
    ///
    /// # Errors
    ///
    /// Returns [`ParseUciMoveError`] if `uci` is not 4 or 5 characters of
    /// the form `e7e8` or `e7e8q`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rochade::{uci::UciMove, Role, Square};
    ///
    /// let uci = UciMove::from_ascii(b"e7e8q")?;
    /// assert_eq!(uci.promotion, Some(Role::Queen));
    ///
    /// assert!(UciMove::from_ascii(b"e7e8Q").is_err());
    /// # Ok::<_, rochade::uci::ParseUciMoveError>(())
    /// ```
    pub fn from_ascii(uci: &[u8]) -> Result<UciMove, ParseUciMoveError> {
        let (squares, promotion) = match *uci {
            [a, b, c, d] => ([a, b, c, d], None),
            [a, b, c, d, p] => ([a, b, c, d], Some(p)),
            _ => return Err(ParseUciMoveError),
        };

        let from = Square::from_ascii(&squares[..2]).map_err(|_| ParseUciMoveError)?;
        let to = Square::from_ascii(&squares[2..]).map_err(|_| ParseUciMoveError)?;
        let promotion = match promotion {
            Some(ch) if ch.is_ascii_lowercase() => Some(
                Role::from_char(char::from(ch))
                    .filter(|role| Role::PROMOTIONS.contains(role))
                    .ok_or(ParseUciMoveError)?,
            ),
            Some(_) => return Err(ParseUciMoveError),
            None => None,
        };

        Ok(UciMove {
            from,
            to,
            promotion,
        })
    }

    /// Converts a move to UCI notation.
    pub const fn from_move(m: &Move) -> UciMove {
        UciMove {
            from: m.from(),
            to: m.to(),
            promotion: m.promotion(),
        }
    }

    /// Converts the UCI move to the matching legal move in the context of
    /// a position.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalUciMoveError`] if no legal move has this origin,
    /// destination and promotion.
    pub fn to_move(&self, pos: &Chess) -> Result<Move, IllegalUciMoveError> {
        pos.legal_moves()
            .into_iter()
            .find(|m| UciMove::from_move(m) == *self)
            .ok_or(IllegalUciMoveError)
    }
}

impl From<Move> for UciMove {
    fn from(m: Move) -> UciMove {
        UciMove::from_move(&m)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UciMove {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UciMove {
    fn deserialize<D>(deserializer: D) -> Result<UciMove, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct UciMoveVisitor;

        impl serde::de::Visitor<'_> for UciMoveVisitor {
            type Value = UciMove;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("uci move")
            }

            fn visit_str<E>(self, value: &str) -> Result<UciMove, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(UciMoveVisitor)
    }
}
