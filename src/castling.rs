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

use std::{fmt, ops};

use bitflags::bitflags;

use crate::{
    color::Color,
    square::{File, Square},
};

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    #[inline]
    pub const fn is_queen_side(self) -> bool {
        matches!(self, CastlingSide::QueenSide)
    }

    #[inline]
    pub const fn is_king_side(self) -> bool {
        matches!(self, CastlingSide::KingSide)
    }

    #[inline]
    pub const fn from_king_side(king_side: bool) -> CastlingSide {
        if king_side {
            CastlingSide::KingSide
        } else {
            CastlingSide::QueenSide
        }
    }

    /// File of the rook that castles on this side, before castling.
    pub const fn rook_from_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::H,
            CastlingSide::QueenSide => File::A,
        }
    }

    pub const fn king_to_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::G,
            CastlingSide::QueenSide => File::C,
        }
    }

    pub const fn rook_to_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::F,
            CastlingSide::QueenSide => File::D,
        }
    }

    /// The square the king starts on. Only the standard starting setup can
    /// castle.
    pub const fn king_from(color: Color) -> Square {
        Square::from_coords(File::E, color.backrank())
    }

    pub const fn rook_from(self, color: Color) -> Square {
        Square::from_coords(self.rook_from_file(), color.backrank())
    }

    pub const fn king_to(self, color: Color) -> Square {
        Square::from_coords(self.king_to_file(), color.backrank())
    }

    /// The square the rook lands on. This is also the square the king
    /// passes over.
    pub const fn rook_to(self, color: Color) -> Square {
        Square::from_coords(self.rook_to_file(), color.backrank())
    }

    #[must_use]
    #[inline]
    pub const fn other(self) -> CastlingSide {
        match self {
            CastlingSide::KingSide => CastlingSide::QueenSide,
            CastlingSide::QueenSide => CastlingSide::KingSide,
        }
    }

    /// `KingSide` and `QueenSide`, in this order.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}

impl ops::Not for CastlingSide {
    type Output = CastlingSide;

    #[inline]
    fn not(self) -> CastlingSide {
        self.other()
    }
}

bitflags! {
    /// Remaining castling rights.
    ///
    /// Rights are only ever removed while a game is played.
    ///
    /// # Examples
    ///
    /// ```
    /// use rochade::{CastlingRights, CastlingSide, Color};
    ///
    /// let mut rights = CastlingRights::all();
    /// rights.discard_color(Color::White);
    /// assert!(!rights.has(Color::White, CastlingSide::KingSide));
    /// assert!(rights.has(Color::Black, CastlingSide::QueenSide));
    /// assert_eq!(rights.to_string(), "kq");
    /// ```
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct CastlingRights: u8 {
        /// `K`
        const WHITE_KING_SIDE = 1;
        /// `Q`
        const WHITE_QUEEN_SIDE = 2;
        /// `k`
        const BLACK_KING_SIDE = 4;
        /// `q`
        const BLACK_QUEEN_SIDE = 8;
    }
}

impl CastlingRights {
    pub const fn of(color: Color, side: CastlingSide) -> CastlingRights {
        match (color, side) {
            (Color::White, CastlingSide::KingSide) => CastlingRights::WHITE_KING_SIDE,
            (Color::White, CastlingSide::QueenSide) => CastlingRights::WHITE_QUEEN_SIDE,
            (Color::Black, CastlingSide::KingSide) => CastlingRights::BLACK_KING_SIDE,
            (Color::Black, CastlingSide::QueenSide) => CastlingRights::BLACK_QUEEN_SIDE,
        }
    }

    #[inline]
    pub fn has(self, color: Color, side: CastlingSide) -> bool {
        self.contains(CastlingRights::of(color, side))
    }

    pub fn discard_color(&mut self, color: Color) {
        for side in CastlingSide::ALL {
            self.remove(CastlingRights::of(color, side));
        }
    }

    /// Discards the right that belongs to a rook starting on `square`, if
    /// any.
    pub fn discard_rook(&mut self, square: Square) {
        for color in Color::ALL {
            for side in CastlingSide::ALL {
                if side.rook_from(color) == square {
                    self.remove(CastlingRights::of(color, side));
                }
            }
        }
    }

    /// Parses a single FEN castling letter.
    pub const fn from_char(ch: char) -> Option<CastlingRights> {
        match ch {
            'K' => Some(CastlingRights::WHITE_KING_SIDE),
            'Q' => Some(CastlingRights::WHITE_QUEEN_SIDE),
            'k' => Some(CastlingRights::BLACK_KING_SIDE),
            'q' => Some(CastlingRights::BLACK_QUEEN_SIDE),
            _ => None,
        }
    }
}

impl Default for CastlingRights {
    fn default() -> CastlingRights {
        CastlingRights::all()
    }
}

impl fmt::Display for CastlingRights {
    /// Writes the FEN castling field, always in `KQkq` order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for (flag, ch) in [
            (CastlingRights::WHITE_KING_SIDE, 'K'),
            (CastlingRights::WHITE_QUEEN_SIDE, 'Q'),
            (CastlingRights::BLACK_KING_SIDE, 'k'),
            (CastlingRights::BLACK_QUEEN_SIDE, 'q'),
        ] {
            if self.contains(flag) {
                fmt::Write::write_char(f, ch)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_castling_side_discriminants() {
        // Fixed but not publicly guaranteed discriminants.
        assert_eq!(CastlingSide::KingSide as usize, 0);
        assert_eq!(CastlingSide::QueenSide as usize, 1);
        assert!(CastlingSide::QueenSide.is_queen_side());
        assert!(!CastlingSide::KingSide.is_queen_side());
        assert_eq!(!CastlingSide::KingSide, CastlingSide::QueenSide);
    }

    #[test]
    fn test_squares() {
        assert_eq!(CastlingSide::king_from(Color::Black), Square::E8);
        assert_eq!(CastlingSide::KingSide.rook_from(Color::White), Square::H1);
        assert_eq!(CastlingSide::QueenSide.king_to(Color::Black), Square::C8);
        assert_eq!(CastlingSide::QueenSide.rook_to(Color::White), Square::D1);
    }

    #[test]
    fn test_discard_rook() {
        let mut rights = CastlingRights::all();
        rights.discard_rook(Square::A8);
        assert_eq!(rights.to_string(), "KQk");
        rights.discard_rook(Square::E4);
        assert_eq!(rights.to_string(), "KQk");
        rights.discard_rook(Square::H1);
        assert_eq!(rights.to_string(), "Qk");
    }

    #[test]
    fn test_display() {
        assert_eq!(CastlingRights::all().to_string(), "KQkq");
        assert_eq!(CastlingRights::empty().to_string(), "-");
        assert_eq!(
            (CastlingRights::BLACK_QUEEN_SIDE | CastlingRights::WHITE_KING_SIDE).to_string(),
            "Kq"
        );
    }
}
