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

//! Read and write Standard Algebraic Notation.
//!
//! # Examples
//!
//! Parse and write SAN:
//!
//! ```
//! use rochade::san::San;
//!
//! let san: San = "Nf3".parse()?;
//! assert_eq!(san.to_string(), "Nf3");
//! # Ok::<_, rochade::san::ParseSanError>(())
//! ```
//!
//! Converting to a move:
//!
//! ```
//! # use rochade::san::San;
//! use rochade::{Chess, Move, Role, Square};
//!
//! # let san: San = "Nf3".parse()?;
//! let pos = Chess::default();
//! let m = san.to_move(&pos)?;
//!
//! assert_eq!(m, Move::Normal {
//!     role: Role::Knight,
//!     from: Square::G1,
//!     capture: None,
//!     to: Square::F3,
//!     promotion: None,
//! });
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Back to (possibly disambiguated) SAN:
//!
//! ```
//! # use rochade::{Chess, san::San};
//! # let pos = Chess::default();
//! # let m = "Nf3".parse::<San>()?.to_move(&pos)?;
//! assert_eq!(San::from_move(&pos, m).to_string(), "Nf3");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::{error::Error, fmt, fmt::Write as _, str::FromStr};

use crate::{
    castling::CastlingSide,
    m::{Move, MoveList},
    position::Chess,
    role::Role,
    square::{File, Rank, Square},
};

/// Error when parsing a syntactically invalid SAN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSanError;

impl fmt::Display for ParseSanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid san")
    }
}

impl Error for ParseSanError {}

/// `IllegalSan` or `AmbiguousSan`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SanError {
    /// Standard algebraic notation does not match a legal move.
    IllegalSan,
    /// Standard algebraic notation matches multiple legal moves.
    AmbiguousSan,
}

impl fmt::Display for SanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            SanError::IllegalSan => "illegal san",
            SanError::AmbiguousSan => "ambiguous san",
        })
    }
}

impl Error for SanError {}

/// A move in Standard Algebraic Notation.
#[derive(Copy, Debug, PartialEq, Eq, Clone, Hash)]
pub enum San {
    Normal {
        role: Role,
        file: Option<File>,
        rank: Option<Rank>,
        capture: bool,
        to: Square,
        promotion: Option<Role>,
    },
    Castle(CastlingSide),
}

impl San {
    /// Parses the given ASCII bytes as a move in SAN. Ignores a possible check
    /// or checkmate suffix.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSanError`] if `ascii` is not syntactically valid.
    pub fn from_ascii(ascii: &[u8]) -> Result<San, ParseSanError> {
        let mut reader = Reader::new(ascii);
        let san = reader.read_san().ok_or(ParseSanError)?;
        let _ = reader.eat(b'+') || reader.eat(b'#');
        if reader.remaining() != 0 {
            return Err(ParseSanError);
        }
        Ok(san)
    }

    /// Converts a move to Standard Algebraic Notation.
    pub fn from_move(pos: &Chess, m: Move) -> San {
        let legals = match m {
            Move::Normal { role, to, .. } if role != Role::Pawn => pos.san_candidates(role, to),
            _ => MoveList::new(),
        };

        San::disambiguate(m, &legals)
    }

    /// Tries to convert the `San` to a legal move in the context of a
    /// position.
    ///
    /// # Errors
    ///
    /// Returns [`SanError`] if there is no unique matching legal move.
    pub fn to_move(self, pos: &Chess) -> Result<Move, SanError> {
        match self {
            San::Normal { role, to, .. } => {
                let legals = pos.san_candidates(role, to);
                self.find_move(&legals).copied()
            }
            San::Castle(side) => pos
                .castling_moves(side)
                .first()
                .copied()
                .ok_or(SanError::IllegalSan),
        }
    }

    /// Writes a move as SAN, using `moves` to decide whether the origin
    /// file, rank or both are needed to tell it apart from other moves of
    /// the same role to the same square.
    ///
    /// `moves` would usually be the legal moves of the position. Pawn
    /// captures always name the origin file.
    pub fn disambiguate(m: Move, moves: &MoveList) -> San {
        match m {
            Move::Normal {
                role: Role::Pawn,
                from,
                capture,
                to,
                promotion,
            } => San::Normal {
                role: Role::Pawn,
                file: capture.is_some().then(|| from.file()),
                rank: None,
                capture: capture.is_some(),
                to,
                promotion,
            },
            Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => {
                let mut ambiguous = false;
                let mut ambiguous_file = false;
                let mut ambiguous_rank = false;
                for candidate in moves {
                    match *candidate {
                        Move::Normal {
                            role: r,
                            to: t,
                            promotion: p,
                            from: f,
                            ..
                        } if from != f && role == r && to == t && promotion == p => {
                            ambiguous = true;
                            if from.rank() == f.rank() {
                                ambiguous_rank = true;
                            }
                            if from.file() == f.file() {
                                ambiguous_file = true;
                            }
                        }
                        _ => {}
                    }
                }
                San::Normal {
                    role,
                    file: (ambiguous && (!ambiguous_file || ambiguous_rank)).then(|| from.file()),
                    rank: ambiguous_file.then(|| from.rank()),
                    capture: capture.is_some(),
                    to,
                    promotion,
                }
            }
            Move::EnPassant { from, to } => San::Normal {
                role: Role::Pawn,
                file: Some(from.file()),
                rank: None,
                capture: true,
                to,
                promotion: None,
            },
            Move::Castle { king, rook } => {
                San::Castle(CastlingSide::from_king_side(king < rook))
            }
        }
    }

    /// Searches a [`MoveList`] for a unique matching move.
    ///
    /// # Errors
    ///
    /// Returns [`SanError`] if there is no unique matching legal move.
    pub fn find_move(self, moves: &MoveList) -> Result<&Move, SanError> {
        let mut filtered = moves.iter().filter(|m| self.matches(**m));

        let Some(m) = filtered.next() else {
            return Err(SanError::IllegalSan);
        };

        if filtered.next().is_some() {
            Err(SanError::AmbiguousSan)
        } else {
            Ok(m)
        }
    }

    /// Test if the `San` can match the `Move` (in any position).
    ///
    /// # Examples
    ///
    /// ```
    /// use rochade::{Move, Role, Square, san::San};
    ///
    /// let m = Move::Normal {
    ///     role: Role::Knight,
    ///     from: Square::G1,
    ///     to: Square::F3,
    ///     capture: None,
    ///     promotion: None,
    /// };
    ///
    /// let nf3 = San::from_ascii(b"Nf3")?;
    /// assert!(nf3.matches(m));
    ///
    /// let ng1f3 = San::from_ascii(b"Ng1f3")?;
    /// assert!(ng1f3.matches(m));
    ///
    /// // capture does not match
    /// let nxf3 = San::from_ascii(b"Nxf3")?;
    /// assert!(!nxf3.matches(m));
    ///
    /// // other file does not match
    /// let nef3 = San::from_ascii(b"Nef3")?;
    /// assert!(!nef3.matches(m));
    /// # Ok::<_, rochade::san::ParseSanError>(())
    /// ```
    pub fn matches(self, m: Move) -> bool {
        match self {
            San::Normal {
                role,
                file,
                rank,
                capture,
                to,
                promotion,
            } => match m {
                Move::Normal {
                    role: r,
                    from,
                    capture: c,
                    to: t,
                    promotion: pr,
                } => {
                    role == r
                        && file.is_none_or(|f| f == from.file())
                        && rank.is_none_or(|r| r == from.rank())
                        && capture == c.is_some()
                        && to == t
                        && promotion == pr
                }
                Move::EnPassant { from, to: t } => {
                    role == Role::Pawn
                        && file.is_none_or(|f| f == from.file())
                        && rank.is_none_or(|r| r == from.rank())
                        && capture
                        && to == t
                        && promotion.is_none()
                }
                Move::Castle { .. } => false,
            },
            San::Castle(side) => m.castling_side() == Some(side),
        }
    }

    fn write_to<W: fmt::Write>(self, f: &mut W) -> fmt::Result {
        match self {
            San::Normal {
                role,
                file,
                rank,
                capture,
                to,
                promotion,
            } => {
                if role != Role::Pawn {
                    f.write_char(role.upper_char())?;
                }
                if let Some(file) = file {
                    f.write_char(file.char())?;
                }
                if let Some(rank) = rank {
                    f.write_char(rank.char())?;
                }
                if capture {
                    f.write_char('x')?;
                }
                write!(f, "{to}")?;
                if let Some(promotion) = promotion {
                    f.write_char('=')?;
                    f.write_char(promotion.upper_char())?;
                }
                Ok(())
            }
            San::Castle(CastlingSide::KingSide) => f.write_str("O-O"),
            San::Castle(CastlingSide::QueenSide) => f.write_str("O-O-O"),
        }
    }
}

impl FromStr for San {
    type Err = ParseSanError;

    fn from_str(san: &str) -> Result<San, ParseSanError> {
        San::from_ascii(san.as_bytes())
    }
}

impl fmt::Display for San {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for San {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Longest syntactically valid SAN: Na1xa1=Q
        let mut s = arrayvec::ArrayString::<8>::new();
        let _ = self.write_to(&mut s);
        serializer.serialize_str(&s)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for San {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SanVisitor;

        impl serde::de::Visitor<'_> for SanVisitor {
            type Value = San;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("SAN string")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(SanVisitor)
    }
}

/// Check (`+`) or checkmate (`#`) suffix.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Suffix {
    Check,
    Checkmate,
}

impl Suffix {
    pub const fn char(self) -> char {
        match self {
            Suffix::Check => '+',
            Suffix::Checkmate => '#',
        }
    }

    pub const fn from_char(ch: char) -> Option<Suffix> {
        match ch {
            '+' => Some(Suffix::Check),
            '#' => Some(Suffix::Checkmate),
            _ => None,
        }
    }

    /// The suffix for a move that led to `pos`: checkmate if the side to
    /// move is in check and has no legal moves, check if it is only in
    /// check.
    pub fn from_position(pos: &Chess) -> Option<Suffix> {
        if !pos.is_check() {
            None
        } else if pos.legal_moves().is_empty() {
            Some(Suffix::Checkmate)
        } else {
            Some(Suffix::Check)
        }
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.char())
    }
}

/// A [`San`] and possible check and checkmate suffixes.
#[derive(Copy, Debug, PartialEq, Eq, Clone, Hash)]
pub struct SanPlus {
    pub san: San,
    pub suffix: Option<Suffix>,
}

impl SanPlus {
    /// Parses the given ASCII bytes as a move in SAN and possible check or
    /// checkmate suffix.
    ///
    /// # Errors
    ///
    /// Errors with [`ParseSanError`] if `ascii` is not syntactically valid.
    pub fn from_ascii(ascii: &[u8]) -> Result<SanPlus, ParseSanError> {
        let mut reader = Reader::new(ascii);
        let san_plus = reader.read_san_plus().ok_or(ParseSanError)?;
        if reader.remaining() != 0 {
            return Err(ParseSanError);
        }
        Ok(san_plus)
    }

    /// Converts a legal move to SAN including possible check and checkmate
    /// suffixes. The position is not modified.
    ///
    /// No suffix is computed for moves that are not legal in `pos`.
    pub fn from_move(pos: &Chess, m: Move) -> SanPlus {
        let moves = match m {
            Move::Normal { role, to, .. } => pos.san_candidates(role, to),
            Move::EnPassant { to, .. } => pos.san_candidates(Role::Pawn, to),
            Move::Castle { king, rook } => {
                pos.castling_moves(CastlingSide::from_king_side(king < rook))
            }
        };
        SanPlus {
            san: San::disambiguate(m, &moves),
            suffix: if moves.contains(&m) {
                Suffix::from_position(&pos.play_unchecked(&m))
            } else {
                None
            },
        }
    }

    /// Like [`SanPlus::from_move()`], but disambiguates against the already
    /// generated legal moves of `pos`. `m` must be one of them.
    pub fn from_legal_move(pos: &Chess, m: Move, legals: &MoveList) -> SanPlus {
        SanPlus {
            san: San::disambiguate(m, legals),
            suffix: Suffix::from_position(&pos.play_unchecked(&m)),
        }
    }

    fn write_to<W: fmt::Write>(self, f: &mut W) -> fmt::Result {
        self.san.write_to(f)?;
        if let Some(suffix) = self.suffix {
            f.write_char(suffix.char())?;
        }
        Ok(())
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
}

impl Reader<'_> {
    #[inline]
    fn new(bytes: &[u8]) -> Reader<'_> {
        Reader { bytes }
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.first().copied()
    }

    #[inline]
    fn bump(&mut self) {
        self.bytes = &self.bytes[1..];
    }

    #[inline]
    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.bump();
            true
        } else {
            false
        }
    }

    #[inline]
    fn next(&mut self) -> Option<u8> {
        let byte = self.peek();
        if byte.is_some() {
            self.bump();
        }
        byte
    }

    #[inline]
    fn next_n(&mut self, n: usize) -> Option<&[u8]> {
        let (head, tail) = self.bytes.split_at_checked(n)?;
        self.bytes = tail;
        Some(head)
    }

    fn read_square(&mut self) -> Option<Square> {
        self.next_n(2)
            .and_then(|bytes| Square::from_ascii(bytes).ok())
    }

    fn read_san(&mut self) -> Option<San> {
        let role = match self.peek()? {
            b'N' => Role::Knight,
            b'B' => Role::Bishop,
            b'R' => Role::Rook,
            b'Q' => Role::Queen,
            b'K' => Role::King,
            b'P' => Role::Pawn,
            b'O' => {
                self.bump();
                if !self.eat(b'-') || !self.eat(b'O') {
                    return None;
                }
                if !self.eat(b'-') {
                    return Some(San::Castle(CastlingSide::KingSide));
                }
                if !self.eat(b'O') {
                    return None;
                }
                return Some(San::Castle(CastlingSide::QueenSide));
            }
            _ => {
                return self.read_normal(Role::Pawn);
            }
        };
        self.bump();
        self.read_normal(role)
    }

    fn read_normal(&mut self, role: Role) -> Option<San> {
        let file = File::from_char(char::from(self.peek()?));
        if file.is_some() {
            self.bump();
        }

        let rank = Rank::from_char(char::from(self.peek()?));
        if rank.is_some() {
            self.bump();
        }

        let (file, rank, capture, to) = if self.eat(b'x') {
            (file, rank, true, self.read_square()?)
        } else if let Some(to_file) = self.peek().and_then(|ch| File::from_char(char::from(ch))) {
            self.bump();
            let to_rank = Rank::from_char(char::from(self.next()?))?;
            (file, rank, false, Square::from_coords(to_file, to_rank))
        } else {
            (None, None, false, Square::from_coords(file?, rank?))
        };

        let promotion = if self.eat(b'=') {
            Some(Role::from_char(char::from(self.next()?))?)
        } else {
            None
        };

        Some(San::Normal {
            role,
            file,
            rank,
            capture,
            to,
            promotion,
        })
    }

    fn read_san_plus(&mut self) -> Option<SanPlus> {
        let san = self.read_san()?;

        let suffix = match self.peek() {
            Some(b'+') => {
                self.bump();
                Some(Suffix::Check)
            }
            Some(b'#') => {
                self.bump();
                Some(Suffix::Checkmate)
            }
            _ => None,
        };

        Some(SanPlus { san, suffix })
    }
}

impl FromStr for SanPlus {
    type Err = ParseSanError;

    fn from_str(san: &str) -> Result<SanPlus, ParseSanError> {
        SanPlus::from_ascii(san.as_bytes())
    }
}

impl fmt::Display for SanPlus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SanPlus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Longest syntactically valid SAN with suffix: Na1xa1=Q#
        let mut s = arrayvec::ArrayString::<9>::new();
        let _ = self.write_to(&mut s);
        serializer.serialize_str(&s)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SanPlus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SanPlusVisitor;

        impl serde::de::Visitor<'_> for SanPlusVisitor {
            type Value = SanPlus;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("SAN string with suffix")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(SanPlusVisitor)
    }
}

#[cfg(test)]
mod tests {
    use std::mem;

    use super::*;
    use crate::{fen::Fen, uci::UciMove};

    fn setup_fen(fen: &str) -> Chess {
        fen.parse::<Fen>().expect("valid fen").into_position()
    }

    #[test]
    fn test_size() {
        assert!(mem::size_of::<San>() <= 8);
        assert!(mem::size_of::<SanPlus>() <= 8);
    }

    #[test]
    fn test_read_write() {
        for san in [
            "a1", "a8", "h1", "h8", "e4", "b6", "e4=Q", "f1=N#", "hxg7", "bxc1", "axe4", "bxc1+",
            "bxa8=R+", "Nf3", "Ba5", "Qh8", "Kh1", "Bba5", "N2c4", "Red3", "d1=N", "Ra1a8",
            "O-O", "O-O-O+", "O-O#",
        ] {
            let result = san.parse::<SanPlus>().expect("valid san").to_string();
            assert_eq!(san, result, "read {san} write {result}");
        }
    }

    #[test]
    fn test_invalid_san() {
        for san in ["", "N", "Nf", "Nf9", "O-", "O-O-", "--", "Q@e4", "e4=", "e4=X", "e4++", "Xe4"] {
            assert_eq!(san.parse::<SanPlus>(), Err(ParseSanError), "{san}");
        }
    }

    #[test]
    fn test_pawn_capture_without_file() {
        let san = "f6".parse::<San>().expect("valid san");

        let pos = setup_fen("4k3/8/5p2/4P3/8/8/8/4K3 w - - 0 1");
        assert_eq!(san.to_move(&pos), Err(SanError::IllegalSan));

        let pos = setup_fen("4k3/8/8/4Pp2/8/8/8/4K3 w - f6 0 2");
        assert_eq!(san.to_move(&pos), Err(SanError::IllegalSan));
        let exf6 = "exf6".parse::<San>().expect("valid san");
        assert!(exf6.to_move(&pos).expect("legal").is_en_passant());
    }

    #[test]
    fn test_disambiguation() {
        let chaos_fen = "N3k2N/8/8/3N4/N4N1N/2R5/1R6/4K3 w - - 0 1";
        let regression_fen = "8/2KN1p2/5p2/3N1B1k/5PNp/7P/7P/8 w - - 0 1";
        let illegal_alternatives_fen = "8/8/8/R2nkn2/8/8/2K5/8 b - - 0 1";
        let promotions_fen = "7k/1p2Npbp/8/2P5/1P1r4/3b2QP/3q1pPK/2RB4 b - - 0 1";

        for (fen, uci, san) in [
            (chaos_fen, "e1f1", "Kf1"),
            (chaos_fen, "c3c2", "Rcc2"),
            (chaos_fen, "b2c2", "Rbc2"),
            (chaos_fen, "a4b6", "N4b6"),
            (chaos_fen, "h8g6", "N8g6"),
            (chaos_fen, "h4g6", "Nh4g6"),
            (regression_fen, "d5f6", "N5xf6#"),
            (illegal_alternatives_fen, "f5e3", "Ne3+"),
            (promotions_fen, "f2f1q", "f1=Q"),
            (promotions_fen, "f2f1n", "f1=N+"),
        ] {
            let pos = setup_fen(fen);
            let m = uci
                .parse::<UciMove>()
                .expect("valid uci")
                .to_move(&pos)
                .expect("legal uci");
            let san_plus = san.parse::<SanPlus>().expect("valid san");

            let legals = pos.legal_moves();
            assert_eq!(San::disambiguate(m, &legals), san_plus.san);
            assert_eq!(SanPlus::from_move(&pos, m), san_plus);
            assert_eq!(SanPlus::from_legal_move(&pos, m, &legals), san_plus);
            assert_eq!(san_plus.san.to_move(&pos), Ok(m));
        }
    }

    #[test]
    fn test_ambiguous_san() {
        let pos = setup_fen("N3k2N/8/8/3N4/N4N1N/2R5/1R6/4K3 w - - 0 1");
        assert_eq!(
            "Rc2".parse::<San>().expect("valid san").to_move(&pos),
            Err(SanError::AmbiguousSan)
        );
        assert_eq!(
            "Qc2".parse::<San>().expect("valid san").to_move(&pos),
            Err(SanError::IllegalSan)
        );
    }

    #[test]
    fn test_castling_san() {
        let pos = setup_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
        let m = "O-O-O".parse::<San>().expect("valid san").to_move(&pos).expect("legal");
        assert_eq!(
            m,
            Move::Castle {
                king: Square::E8,
                rook: Square::A8
            }
        );
        assert_eq!(SanPlus::from_move(&pos, m).to_string(), "O-O-O");

        let pos = setup_fen("4k3/8/8/8/8/8/8/4K2R b K - 0 1");
        assert_eq!(
            "O-O".parse::<San>().expect("valid san").to_move(&pos),
            Err(SanError::IllegalSan)
        );
    }

    #[test]
    fn test_lax_pawn_move_san_roundtrip() {
        let san = "6h8".parse::<San>().expect("kinda valid san");
        assert_eq!(
            san,
            San::Normal {
                role: Role::Pawn,
                file: None,
                rank: Some(Rank::Sixth),
                capture: false,
                to: Square::H8,
                promotion: None,
            }
        );
        assert_eq!(san.to_string(), "6h8");
    }
}
